use super::table::RouteTable;
use crate::route::Route;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// Maps an inbound (verb, raw path) to a route, memoizing every hit.
///
/// Cache entries are keyed `"{VERB}__{full path}"` and are never evicted.
/// Misses are not cached.
#[derive(Debug, Default)]
pub struct RequestResolver {
    cache: DashMap<String, Arc<Route>>,
}

const URI_TRIM: &[char] = &['?', '&', '/'];

/// Candidate keys for a raw request path.
///
/// Returns `(prefix, full)`: `prefix` is the first two `/` segments of the
/// trimmed URI (query string included, as it appears), `full` is the portion
/// before `?` with separators trimmed.
#[must_use]
pub fn candidate_keys(raw_path: &str) -> (String, String) {
    let uri = raw_path
        .to_lowercase()
        .trim_matches(URI_TRIM)
        .to_string();

    let full = uri
        .split('?')
        .next()
        .unwrap_or_default()
        .trim_matches('/')
        .to_string();

    let mut parts = uri.split('/');
    let first = parts.next().unwrap_or_default();
    let prefix = match parts.next() {
        Some(second) => format!("{first}/{second}"),
        None => first.to_string(),
    };

    (prefix, full)
}

impl RequestResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `verb` (upper-case) and `raw_path` against `table`.
    pub fn resolve(&self, table: &RouteTable, verb: &str, raw_path: &str) -> Option<Arc<Route>> {
        let (prefix, full) = candidate_keys(raw_path);
        let cache_key = format!("{verb}__{full}");

        let cached = self.cache.get(&cache_key).map(|entry| Arc::clone(entry.value()));
        if let Some(route) = cached {
            debug!(key = %cache_key, path = route.path(), "Route cache hit");
            return Some(route);
        }

        let route = table.find(verb, &[prefix.as_str(), full.as_str()])?;
        debug!(key = %cache_key, path = route.path(), "Route cache miss, memoized");
        self.cache.insert(cache_key, Arc::clone(&route));
        Some(route)
    }

    /// Number of memoized (verb, path) pairs.
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}
