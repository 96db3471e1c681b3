//! # convrouter
//!
//! **convrouter** is a convention-driven request router. Register controller
//! values; their routes are derived from type and action names, requests are
//! matched against the resulting table, action arguments are resolved through a
//! chain of injectors and lifecycle events run around every dispatch.
//!
//! ## Overview
//!
//! The library is organized into these modules:
//!
//! - **[`controller`]** - The [`Controller`] trait, actions and the naming convention
//! - **[`route`]** - Immutable route records and explicit route declaration
//! - **[`router`]** - Route table, cached request resolution and the [`Router`] itself
//! - **[`injector`]** - The argument injector chain
//! - **[`events`]** - Pre-request and post-request event pipelines
//! - **[`dispatcher`]** - Argument assembly and action invocation
//! - **[`server`]** - Transport-facing [`Request`] and [`Response`] types
//! - **[`config`]** / **[`logging`]** - Configuration loading and `tracing` setup
//!
//! ### Route Derivation
//!
//! | Controller / action                          | Route                              |
//! |----------------------------------------------|------------------------------------|
//! | `UserController` / `ShowAction`              | `GET user/show`                    |
//! | `UserController` / `Post_CreateAction`       | `POST user/create`                 |
//! | `UserController` / `IndexAction`             | `GET user/index`, `GET user`       |
//! | `AddressController` under `UserController`   | `user/address/...`                 |
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Transport
//!     participant Router
//!     participant Pre as Pre-request events
//!     participant Resolver as RequestResolver
//!     participant Dispatcher
//!     participant Injectors as InjectorChain
//!     participant Action
//!     participant Post as Post-request events
//!
//!     Transport->>Router: handle(request, response)
//!     Router->>Pre: run (may rewrite request/response)
//!     Router->>Resolver: resolve(verb, uri)
//!     alt No Route Match
//!         Resolver-->>Router: None
//!         Router-->>Transport: 404 "Not Found"
//!     end
//!     Resolver-->>Router: Arc<Route> (cached)
//!     Router->>Dispatcher: dispatch(route)
//!     loop every injected parameter
//!         Dispatcher->>Injectors: provide(type)
//!     end
//!     Dispatcher->>Action: invoke
//!     Action-->>Dispatcher: Returns
//!     Router->>Post: run (sees Returns)
//!     Router-->>Transport: Outcome::Dispatched
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use convrouter::{Action, Controller, Invocation, Request, Response, Returns, Router};
//! use http::Method;
//! use std::sync::Arc;
//!
//! struct GreetController;
//!
//! impl GreetController {
//!     fn hello(&self, inv: &mut Invocation<'_>) -> Returns {
//!         let name = inv.request().query_param("name").unwrap_or("world").to_string();
//!         inv.response().write_str(&format!("hello {name}"));
//!         Returns::one(name)
//!     }
//! }
//!
//! impl Controller for GreetController {
//!     fn actions(self: Arc<Self>) -> Vec<Action> {
//!         vec![Action::new("HelloAction", &self, GreetController::hello)
//!             .param::<Request>()
//!             .param::<Response>()]
//!     }
//! }
//!
//! let mut router = Router::new();
//! router.add_controller(Arc::new(GreetController)).unwrap();
//!
//! let mut request = Request::new(Method::GET, "/greet/hello?name=ferris");
//! let mut response = Response::new();
//! router.handle(&mut request, &mut response);
//! assert_eq!(response.body_str(), Some("hello ferris"));
//! ```
//!
//! ## Concurrency
//!
//! Registration takes `&mut Router`, serving takes `&Router`. Finish
//! registration, wrap the router in an `Arc` and serve from as many threads as
//! needed; the resolver cache is the only state written while serving.

pub mod cli;
pub mod config;
pub mod controller;
pub mod controllers;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod ids;
pub mod injector;
pub mod logging;
pub mod route;
pub mod router;
pub mod server;

pub use config::{AppConfig, RouterConfig};
pub use controller::{Action, Controller, Invocation, Param, Returns, TypeToken};
pub use error::RouterError;
pub use ids::RequestId;
pub use route::{Methods, Route};
pub use router::{Outcome, Router};
pub use server::{Request, Response};
