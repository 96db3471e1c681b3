//! # Controllers
//!
//! A controller is a struct whose type name contains `Controller` and which
//! declares its actions and its sub-controllers explicitly. Routes are derived
//! from those declarations by naming convention:
//!
//! | Declaration                         | Route                        |
//! |-------------------------------------|------------------------------|
//! | `UserController` / `ShowAction`     | `GET user/show`              |
//! | `UserController` / `Post_CreateAction` | `POST user/create`        |
//! | `UserController` / `IndexAction`    | `GET user/index` and `GET user` |
//! | `AddressController` under `UserController` / `IndexAction` | `GET user/address/index` and `GET user/address` |
//!
//! ## Example
//!
//! ```rust
//! use convrouter::{Action, Controller, Invocation, Request, Response, Returns};
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct UserController;
//!
//! impl UserController {
//!     fn show(&self, inv: &mut Invocation<'_>) -> Returns {
//!         inv.response().write_str("user");
//!         Returns::none()
//!     }
//! }
//!
//! impl Controller for UserController {
//!     fn actions(self: Arc<Self>) -> Vec<Action> {
//!         vec![Action::new("ShowAction", &self, UserController::show)
//!             .param::<Request>()
//!             .param::<Response>()]
//!     }
//! }
//! ```

mod action;
mod resolver;
#[cfg(test)]
mod tests;

pub use action::{ActionFn, Action, Argument, Invocation, Param, Returns, TypeToken};
pub use resolver::{
    controller_path, verify_controller, ControllerResolver, ConventionResolver,
};

use std::sync::Arc;

/// Capability marker for route-providing types.
///
/// `type_name` defaults to the compiler's name for the implementing type and
/// is what the shape and naming checks look at.
pub trait Controller: Send + Sync + 'static {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Actions in the order their routes should be registered.
    fn actions(self: Arc<Self>) -> Vec<Action>;

    /// Freshly constructed child controllers, mounted below this
    /// controller's path.
    fn sub_controllers(&self) -> Vec<Arc<dyn Controller>> {
        Vec::new()
    }
}
