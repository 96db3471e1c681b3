use crate::controller::{Action, Controller, Invocation, Returns};
use crate::server::{Request, Response};
use http::StatusCode;
use serde_json::json;
use std::sync::Arc;

/// Mounted below [`super::UserController`] as `user/address`.
#[derive(Debug, Default)]
pub struct AddressController;

impl AddressController {
    fn index(&self, inv: &mut Invocation<'_>) -> Returns {
        let user = inv.request().query_param("user").unwrap_or("unknown").to_string();
        inv.response()
            .write_json(&json!({ "user": user, "addresses": [] }));
        Returns::none()
    }

    fn update(&self, inv: &mut Invocation<'_>) -> Returns {
        let bytes = inv.request().body().len();
        inv.response().write_text(StatusCode::NO_CONTENT, "");
        Returns::one(bytes)
    }
}

impl Controller for AddressController {
    fn actions(self: Arc<Self>) -> Vec<Action> {
        vec![
            Action::new("IndexAction", &self, AddressController::index)
                .param::<Request>()
                .param::<Response>(),
            Action::new("Put_UpdateAction", &self, AddressController::update)
                .param::<Request>()
                .param::<Response>(),
        ]
    }
}
