//! # CLI Module
//!
//! Command-line access to the demo router.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! Print the route table in registration order:
//!
//! ```bash
//! convrouter routes
//! convrouter --config config/config.yaml routes
//! ```
//!
//! ### `call`
//!
//! Run one request through the full lifecycle and print the response:
//!
//! ```bash
//! convrouter call GET '/user/show?id=1'
//! convrouter call POST /user/create --body 'linus'
//! convrouter call PUT /user/address/update -H 'x-request-id: 01ARZ3NDEKTSV4RRFFQ69G5FAV'
//! ```
//!
//! ## Configuration
//!
//! `--config` (or `CONVROUTER_CONFIG`) points at a YAML file; environment
//! overrides from [`crate::config`] and [`crate::logging`] apply on top.

mod commands;


pub use commands::{run_cli, Cli, Commands};
