use super::AddressController;
use crate::controller::{Action, Controller, Invocation, Returns};
use crate::ids::RequestId;
use crate::server::{Request, Response};
use http::StatusCode;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: u32,
    pub name: String,
}

/// In-memory user directory.
#[derive(Debug)]
pub struct UserController {
    users: Vec<User>,
}

impl Default for UserController {
    fn default() -> Self {
        Self {
            users: vec![
                User {
                    id: 1,
                    name: "ada".to_string(),
                },
                User {
                    id: 2,
                    name: "grace".to_string(),
                },
            ],
        }
    }
}

impl UserController {
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    fn index(&self, inv: &mut Invocation<'_>) -> Returns {
        inv.response().write_json(&json!({ "users": self.users }));
        Returns::one(self.users.len())
    }

    fn show(&self, inv: &mut Invocation<'_>) -> Returns {
        let id = inv
            .request()
            .query_param("id")
            .and_then(|v| v.parse::<u32>().ok());
        let user = id.and_then(|id| self.users.iter().find(|u| u.id == id));

        match user {
            Some(user) => {
                inv.response().write_json(&json!(user));
                Returns::one(user.id)
            }
            None => {
                inv.response().write_text(StatusCode::NOT_FOUND, "unknown user");
                Returns::none()
            }
        }
    }

    fn create(&self, inv: &mut Invocation<'_>) -> Returns {
        let name = String::from_utf8_lossy(inv.request().body()).trim().to_string();
        let request_id = inv.arg::<RequestId>(2).map(ToString::to_string);
        // the directory is fixed; creation is acknowledged, not stored
        let next_id = self.users.iter().map(|u| u.id).max().unwrap_or(0) + 1;

        let response = inv.response();
        response.set_status(StatusCode::CREATED);
        response.write_json(&json!({
            "id": next_id,
            "name": name,
            "request_id": request_id,
        }));
        Returns::one(next_id).and(name)
    }

    fn profile(&self, inv: &mut Invocation<'_>) -> Returns {
        let request_id = inv.arg::<RequestId>(1).copied();
        let body = match request_id {
            Some(id) => format!("profile for request {id}"),
            None => "profile".to_string(),
        };
        inv.response().write_text(StatusCode::OK, &body);
        Returns::one(request_id)
    }
}

impl Controller for UserController {
    fn actions(self: Arc<Self>) -> Vec<Action> {
        vec![
            Action::new("IndexAction", &self, UserController::index).param::<Response>(),
            Action::new("ShowAction", &self, UserController::show)
                .param::<Request>()
                .param::<Response>(),
            Action::new("Post_CreateAction", &self, UserController::create)
                .param::<Request>()
                .param::<Response>()
                .param::<RequestId>(),
            Action::new("ProfileAction", &self, UserController::profile)
                .param::<Response>()
                .param::<RequestId>(),
        ]
    }

    fn sub_controllers(&self) -> Vec<Arc<dyn Controller>> {
        vec![Arc::new(AddressController::default())]
    }
}
