mod common;

use common::{body, call, UserController};
use convrouter::Router;
use http::Method;
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 16;

fn shared_router() -> Arc<Router> {
    let mut router = Router::new();
    router.add_controller(Arc::new(UserController)).unwrap();
    Arc::new(router)
}

#[test]
fn test_concurrent_first_lookups_agree() {
    let router = shared_router();
    let barrier = Barrier::new(THREADS);

    let resolved: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    router.resolve("GET", "/user/show").unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let first = &resolved[0];
    assert!(resolved.iter().all(|route| Arc::ptr_eq(route, first)));
    assert_eq!(router.request_resolver().cache_len(), 1);
    // every thread either scanned or hit the cache, never more than once each
    let scans = router.table().scan_count();
    assert!((1..=THREADS).contains(&scans), "scans = {scans}");

    router.resolve("GET", "/user/show").unwrap();
    assert_eq!(router.table().scan_count(), scans);
}

#[test]
fn test_concurrent_requests_over_many_keys() {
    let router = shared_router();
    let uris = [
        (Method::GET, "/user/show", "user.show"),
        (Method::POST, "/user/create", "user.create"),
        (Method::GET, "/user", "user.index"),
        (Method::GET, "/user/address", "address.index"),
        (Method::PUT, "/user/address/update", "address.update"),
    ];

    thread::scope(|s| {
        for worker in 0..THREADS {
            let router = Arc::clone(&router);
            let uris = &uris;
            s.spawn(move || {
                for round in 0..50 {
                    let (method, uri, expected) = &uris[(worker + round) % uris.len()];
                    let (_, response) = call(&router, method.clone(), uri);
                    assert_eq!(body(&response), *expected);
                }
            });
        }
    });

    assert_eq!(router.request_resolver().cache_len(), uris.len());
}
