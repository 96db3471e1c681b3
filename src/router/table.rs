use crate::route::Route;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Append-only ordered route collection.
///
/// Registration order is priority order: [`RouteTable::find`] returns the
/// first matching route, so a later route answering the same (path, verb) is
/// never reached.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Arc<Route>>,
    scans: AtomicUsize,
}

impl RouteTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, route: Route) -> Arc<Route> {
        let route = Arc::new(route);
        self.routes.push(Arc::clone(&route));
        route
    }

    /// Earliest registered route that already answers one of `route`'s
    /// (path, verb) pairs.
    #[must_use]
    pub fn shadowing(&self, route: &Route) -> Option<&Arc<Route>> {
        self.routes.iter().find(|existing| existing.overlaps(route))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    #[must_use]
    pub fn get(&self, ordinal: usize) -> Option<&Arc<Route>> {
        self.routes.get(ordinal)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Route>> {
        self.routes.iter()
    }

    /// Number of full scans performed by [`RouteTable::find`].
    #[must_use]
    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::Relaxed)
    }

    /// First route, in registration order, whose path equals one of `keys`
    /// and whose verb set contains `verb`.
    #[must_use]
    pub fn find(&self, verb: &str, keys: &[&str]) -> Option<Arc<Route>> {
        self.scans.fetch_add(1, Ordering::Relaxed);
        self.routes
            .iter()
            .find(|route| keys.contains(&route.path()) && route.allows(verb))
            .map(Arc::clone)
    }
}
