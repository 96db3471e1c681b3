//! # Router Module
//!
//! The router owns everything registered at startup and runs requests
//! through it.
//!
//! ## Overview
//!
//! - [`RouteTable`]: routes in registration order
//! - [`RequestResolver`]: (verb, raw path) to route, with a concurrent cache
//! - [`Router`]: registration surface, the request state machine and
//!   diagnostics
//!
//! ## Matching
//!
//! The raw path is lower-cased and trimmed of `/`, `?` and `&`. A route
//! matches when its path equals either the first two segments of that URI or
//! the whole path before the query string, and its verb set contains the
//! request verb. The first match in registration order wins and is cached
//! under `"{VERB}__{path}"` for the rest of the process.
//!
//! | Request              | Candidate keys                   |
//! |----------------------|----------------------------------|
//! | `GET /User/Show`     | `user/show`, `user/show`         |
//! | `GET /user/show/42`  | `user/show`, `user/show/42`      |
//! | `GET /user?tab=1`    | `user?tab=1`, `user`             |
//! | `GET /`              | ``, ``                           |

mod core;
mod resolver;
mod table;

pub use self::core::{Outcome, Router};
pub use resolver::{candidate_keys, RequestResolver};
pub use table::RouteTable;
