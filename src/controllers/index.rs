use crate::controller::{Action, Controller, Invocation, Returns};
use crate::server::Response;
use http::StatusCode;
use std::sync::Arc;

/// Answers `GET /` through the `index/index` alias.
#[derive(Debug, Default)]
pub struct IndexController;

impl IndexController {
    fn index(&self, inv: &mut Invocation<'_>) -> Returns {
        inv.response()
            .write_text(StatusCode::OK, concat!("convrouter ", env!("CARGO_PKG_VERSION")));
        Returns::none()
    }
}

impl Controller for IndexController {
    fn actions(self: Arc<Self>) -> Vec<Action> {
        vec![Action::new("IndexAction", &self, IndexController::index).param::<Response>()]
    }
}
