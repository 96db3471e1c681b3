use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, StatusCode};
use serde_json::Value;
use std::io;

/// Body written for requests that match no route.
pub const NOT_FOUND_BODY: &str = "Not Found";

/// Response sink handed over by the transport layer.
///
/// Handlers write the response themselves: a status, headers and body bytes.
/// The transport serializes whatever is in the sink once [`crate::Router::handle`]
/// returns. The sink starts out as `200 OK` with an empty body.
#[derive(Debug, Default)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Response {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    #[inline]
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Add or replace a header
    pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    /// Get a header value as text (case-insensitive name)
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    #[inline]
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The body as UTF-8 text, if it is valid UTF-8.
    #[must_use]
    pub fn body_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Append raw bytes to the body.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.body.extend_from_slice(bytes);
    }

    /// Append text to the body.
    pub fn write_str(&mut self, text: &str) {
        self.body.extend_from_slice(text.as_bytes());
    }

    /// Replace the body with `body` serialized as JSON and set the content type.
    pub fn write_json(&mut self, body: &Value) {
        self.set_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.body = body.to_string().into_bytes();
    }

    /// Replace the body with plain text and set the content type.
    pub fn write_text(&mut self, status: StatusCode, text: &str) {
        self.status = status;
        self.set_header(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        self.body = text.as_bytes().to_vec();
    }

    /// Turn the sink into the fixed not-found outcome: `404` and `Not Found`.
    pub fn not_found(&mut self) {
        self.write_text(StatusCode::NOT_FOUND, NOT_FOUND_BODY);
    }
}

impl io::Write for Response {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
