mod common;

use common::{body, call, tag_action, v2, UserController};
use convrouter::{Controller, Outcome, Route, Router};
use http::{Method, StatusCode};
use std::sync::Arc;

fn user_router() -> Router {
    let mut router = Router::new();
    router.add_controller(Arc::new(UserController)).unwrap();
    router
}

#[test]
fn test_show_resolves_and_dispatches() {
    let router = user_router();
    let (outcome, response) = call(&router, Method::GET, "/user/show");
    match outcome {
        Outcome::Dispatched { route, returns } => {
            assert_eq!(route.path(), "user/show");
            assert_eq!(returns.get::<&str>(0), Some(&"user.show"));
        }
        Outcome::NotFound => panic!("expected a dispatch"),
    }
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body(&response), "user.show");
}

#[test]
fn test_matching_ignores_case_and_separators() {
    let router = user_router();
    for uri in ["/USER/Show", "user/show/", "//user/show?", "/user/show?&", "/user/show?id=1"] {
        let (_, response) = call(&router, Method::GET, uri);
        assert_eq!(body(&response), "user.show", "{uri}");
    }
}

#[test]
fn test_verb_must_be_in_route_set() {
    let router = user_router();
    let (outcome, response) = call(&router, Method::GET, "/user/create");
    assert!(outcome.is_not_found());
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let (_, response) = call(&router, Method::POST, "/user/create");
    assert_eq!(body(&response), "user.create");
}

#[test]
fn test_verb_comparison_is_exact() {
    let router = user_router();
    let lowercase = Method::from_bytes(b"get").unwrap();
    let (outcome, _) = call(&router, lowercase, "/user/show");
    assert!(outcome.is_not_found());
}

#[test]
fn test_alias_reaches_index_action() {
    let router = user_router();
    let (_, response) = call(&router, Method::GET, "/user");
    assert_eq!(body(&response), "user.index");
    let (_, response) = call(&router, Method::GET, "/user/index");
    assert_eq!(body(&response), "user.index");
}

#[test]
fn test_sub_controller_routes() {
    let router = user_router();
    let (_, response) = call(&router, Method::GET, "/user/address");
    assert_eq!(body(&response), "address.index");
    let (_, response) = call(&router, Method::PUT, "/user/address/update");
    assert_eq!(body(&response), "address.update");
}

#[test]
fn test_extra_segments_fall_back_to_two_segment_key() {
    let router = user_router();
    let (_, response) = call(&router, Method::GET, "/user/show/42");
    assert_eq!(body(&response), "user.show");
}

#[test]
fn test_unknown_path_is_not_found() {
    let router = user_router();
    let (outcome, response) = call(&router, Method::GET, "/nothing/here");
    assert!(outcome.is_not_found());
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body(&response), "Not Found");
}

#[test]
fn test_earlier_registration_wins() {
    let mut router = user_router();
    router.add_controller(Arc::new(v2::UserController)).unwrap();

    for _ in 0..3 {
        let (_, response) = call(&router, Method::GET, "/user/show");
        assert_eq!(body(&response), "user.show");
    }

    // a verb only the later controller answers is still reachable
    let (_, response) = call(&router, Method::DELETE, "/user/show");
    assert_eq!(body(&response), "v2.delete");
}

#[test]
fn test_later_registration_of_same_key_is_unreachable_regardless_of_order() {
    let mut router = Router::new();
    router.add_controller(Arc::new(v2::UserController)).unwrap();
    router.add_controller(Arc::new(UserController)).unwrap();

    let (_, response) = call(&router, Method::GET, "/user/show");
    assert_eq!(body(&response), "v2.show");
}

#[test]
fn test_second_lookup_uses_cache() {
    let router = user_router();
    let first = router.resolve("GET", "/user/show").unwrap();
    assert_eq!(router.table().scan_count(), 1);
    assert_eq!(router.request_resolver().cache_len(), 1);

    let second = router.resolve("GET", "/user/show").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(router.table().scan_count(), 1);
}

#[test]
fn test_cache_key_uses_full_path() {
    let router = user_router();
    router.resolve("GET", "/user/show").unwrap();
    router.resolve("GET", "/user/show/1").unwrap();
    router.resolve("GET", "/user/show?id=2").unwrap();
    // "/user/show?id=2" shares the "GET__user/show" entry
    assert_eq!(router.request_resolver().cache_len(), 2);
    assert_eq!(router.table().scan_count(), 2);
}

struct ReportController;

impl Controller for ReportController {
    fn actions(self: Arc<Self>) -> Vec<convrouter::Action> {
        Vec::new()
    }
}

#[test]
fn test_explicit_route_registration() {
    let controller = Arc::new(ReportController);
    let mut router = Router::new();
    router.add_route(
        Route::builder("/Reports/Daily")
            .method(Method::GET)
            .method(Method::HEAD)
            .handler(&controller, tag_action("anything", &controller, "daily")),
    );

    let (_, response) = call(&router, Method::HEAD, "/reports/daily");
    assert_eq!(body(&response), "daily");
    assert_eq!(router.routes()[0].2, "reports/daily");
}

#[test]
fn test_route_listing() {
    let router = user_router();
    let routes = router.routes();
    assert_eq!(routes.len(), 7);
    assert_eq!(routes[0].0, 0);
    assert_eq!(routes[1].1.as_slice(), &[Method::POST]);
    assert_eq!(routes[3].2, "user");

    let mut out = Vec::new();
    router.write_routes(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "ID: 0\tGET \t\tuser/show");
    assert_eq!(lines[6], "ID: 6\tPUT \t\tuser/address/update");
}

#[test]
fn test_router_outputs_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Router>();
    assert_send_sync::<Route>();
}
