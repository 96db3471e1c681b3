//! Demo controllers used by the `convrouter` binary and the integration tests.
//!
//! | Route                        | Action                         |
//! |------------------------------|--------------------------------|
//! | `GET /` , `GET index/index`  | [`IndexController`] index      |
//! | `GET user`, `GET user/index` | [`UserController`] index       |
//! | `GET user/show?id=N`         | [`UserController`] show        |
//! | `POST user/create`           | [`UserController`] create      |
//! | `GET user/profile`           | [`UserController`] profile     |
//! | `GET user/address`           | [`AddressController`] index    |
//! | `PUT user/address/update`    | [`AddressController`] update   |

mod address;
mod index;
mod user;

pub use address::AddressController;
pub use index::IndexController;
pub use user::{User, UserController};

use crate::config::RouterConfig;
use crate::error::RouterError;
use crate::events::{PostRequestContext, PreRequestContext};
use crate::ids::{RequestId, REQUEST_ID_HEADER};
use crate::injector::{injector_fn, InjectorContext};
use crate::router::Router;
use http::header::{HeaderName, HeaderValue};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Time the request entered the pre-request pipeline.
#[derive(Debug, Clone, Copy)]
pub struct RequestStart(pub Instant);

/// Router with the demo controllers, a [`RequestId`] injector, a timing
/// pre-request event and a post-request event echoing the request id.
pub fn demo_router(config: RouterConfig) -> Result<Router, RouterError> {
    let mut router = Router::with_config(config);

    router.add_injector(injector_fn::<RequestId, _>(|ctx: &InjectorContext<'_>| {
        ctx.request().id()
    }));

    router.append_pre_request_event(|ctx: &mut PreRequestContext<'_>| {
        ctx.request_mut()
            .extensions_mut()
            .insert(RequestStart(Instant::now()));
    })?;

    router.append_post_request_event(|ctx: &mut PostRequestContext<'_>| {
        let id = ctx.request().id().to_string();
        if let Ok(value) = HeaderValue::from_str(&id) {
            ctx.response()
                .set_header(HeaderName::from_static(REQUEST_ID_HEADER), value);
        }
        if let Some(RequestStart(started)) = ctx.request().extensions().get::<RequestStart>() {
            debug!(
                elapsed_us = started.elapsed().as_micros(),
                returns = ctx.returns().len(),
                "Request handled"
            );
        }
    })?;

    router.add_controller(Arc::new(IndexController))?;
    router.add_controller(Arc::new(UserController::default()))?;
    Ok(router)
}
