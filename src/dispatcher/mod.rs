//! # Dispatcher Module
//!
//! The dispatcher turns a resolved [`crate::Route`] into an action call.
//!
//! ## Argument Assembly
//!
//! The controller instance is bound into the action when the action is
//! declared, so it is always the first argument. Every declared parameter is
//! then resolved by type:
//!
//! - [`crate::Request`] and [`crate::Response`] are handed over directly
//! - anything else goes through the router's injector chain with a fresh
//!   [`crate::injector::InjectorContext`] (request, route, router, response)
//! - an unsupported type becomes an absent argument
//!
//! ## Error Handling
//!
//! There is no recovery boundary around the action. A panic inside an action
//! unwinds through [`Dispatcher::dispatch`] and [`crate::Router::handle`];
//! transports that need isolation catch it at their own entry point.

mod core;

pub use self::core::Dispatcher;
