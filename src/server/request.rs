use crate::ids::{RequestId, REQUEST_ID_HEADER};
use http::header::{HeaderName, HeaderValue};
use http::{Extensions, HeaderMap, Method};

/// Request handle handed over by the transport layer.
///
/// The transport parses the connection, builds one `Request` per inbound
/// request and passes it to [`crate::Router::handle`]. Pre-request events
/// receive it mutably, so anything they rewrite (method, URI, headers) is what
/// route resolution and the handler see.
///
/// `extensions` is typed storage that lives exactly as long as the request:
/// a pre-request event can stash a value that the handler or a post-request
/// event picks up later.
#[derive(Debug)]
pub struct Request {
    id: RequestId,
    method: Method,
    uri: String,
    headers: HeaderMap,
    body: Vec<u8>,
    extensions: Extensions,
}

impl Request {
    /// Create a request for `method` and the raw path including any query
    /// string (e.g. `/user/show?id=3`).
    #[must_use]
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            id: RequestId::new(),
            method,
            uri: uri.into(),
            headers: HeaderMap::new(),
            body: Vec::new(),
            extensions: Extensions::new(),
        }
    }

    /// Add a header. An `x-request-id` header with a valid ULID also becomes
    /// the request id.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        if name.as_str() == REQUEST_ID_HEADER {
            self.id = RequestId::from_header_or_new(value.to_str().ok());
        }
        self.headers.append(name, value);
        self
    }

    /// Attach the raw body bytes. The router never inspects them.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> RequestId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    /// Raw path with query string, exactly as received or last rewritten.
    #[inline]
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn set_uri(&mut self, uri: impl Into<String>) {
        self.uri = uri.into();
    }

    /// The part of the URI before `?`.
    #[must_use]
    pub fn path(&self) -> &str {
        self.uri.split('?').next().unwrap_or_default()
    }

    /// The part of the URI after the first `?`, if any.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.uri.split_once('?').map(|(_, q)| q)
    }

    /// Look up a query parameter by name (no percent-decoding).
    ///
    /// Uses "last write wins" semantics: `?limit=10&limit=20` yields `20`.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query()?
            .split('&')
            .filter_map(|pair| {
                let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
                (k == name).then_some(v)
            })
            .last()
    }

    #[inline]
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
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

    #[inline]
    #[must_use]
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }
}
