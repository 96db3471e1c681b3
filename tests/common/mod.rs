#![allow(dead_code)]

use convrouter::{Action, Controller, Invocation, Outcome, Request, Response, Returns, Router};
use http::Method;
use std::sync::Arc;

/// Action that writes `tag` to the body and returns it.
pub fn tag_action<C: Send + Sync + 'static>(
    name: &str,
    controller: &Arc<C>,
    tag: &'static str,
) -> Action {
    Action::new(name, controller, move |_: &C, inv: &mut Invocation<'_>| {
        inv.response().write_str(tag);
        Returns::one(tag)
    })
    .param::<Response>()
}

/// Run one request through `router`.
pub fn call(router: &Router, method: Method, uri: &str) -> (Outcome, Response) {
    let mut request = Request::new(method, uri);
    let mut response = Response::new();
    let outcome = router.handle(&mut request, &mut response);
    (outcome, response)
}

pub fn body(response: &Response) -> &str {
    response.body_str().unwrap_or_default()
}

#[derive(Default)]
pub struct UserController;

impl Controller for UserController {
    fn actions(self: Arc<Self>) -> Vec<Action> {
        vec![
            tag_action("ShowAction", &self, "user.show"),
            tag_action("Post_CreateAction", &self, "user.create"),
            tag_action("IndexAction", &self, "user.index"),
        ]
    }

    fn sub_controllers(&self) -> Vec<Arc<dyn Controller>> {
        vec![Arc::new(AddressController)]
    }
}

#[derive(Default)]
pub struct AddressController;

impl Controller for AddressController {
    fn actions(self: Arc<Self>) -> Vec<Action> {
        vec![
            tag_action("IndexAction", &self, "address.index"),
            tag_action("Put_UpdateAction", &self, "address.update"),
        ]
    }
}

pub mod v2 {
    use super::tag_action;
    use convrouter::{Action, Controller};
    use std::sync::Arc;

    /// Same short name as the top-level `UserController`, so it derives the
    /// same paths.
    pub struct UserController;

    impl Controller for UserController {
        fn actions(self: Arc<Self>) -> Vec<Action> {
            vec![
                tag_action("ShowAction", &self, "v2.show"),
                tag_action("Delete_ShowAction", &self, "v2.delete"),
            ]
        }
    }
}
