//! Transport-facing request and response types.
//!
//! The router does not accept connections or parse raw HTTP. A transport
//! adapter builds a [`Request`] and an empty [`Response`] per inbound request,
//! calls [`crate::Router::handle`] and serializes the response afterwards.

pub mod request;
pub mod response;

pub use request::Request;
pub use response::{Response, NOT_FOUND_BODY};
