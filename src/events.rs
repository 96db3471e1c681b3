//! # Request lifecycle events
//!
//! Pre-request events run before route resolution and may rewrite the request
//! (method, URI, headers, extensions) or the response. Post-request events run
//! after the action returns and see its return values. Neither kind runs
//! concurrently with another hook of the same request.
//!
//! Each pipeline is ordered by a unique `i64` priority, lowest first.
//!
//! ```rust
//! use convrouter::events::PreRequestContext;
//! use convrouter::Router;
//!
//! let mut router = Router::new();
//! router
//!     .add_pre_request_event(
//!         |ctx: &mut PreRequestContext<'_>| {
//!             let rewritten = ctx.request().uri().replace("/legacy/", "/");
//!             ctx.request_mut().set_uri(rewritten);
//!         },
//!         10,
//!     )
//!     .unwrap();
//! assert!(router.add_pre_request_event(|_: &mut PreRequestContext<'_>| {}, 10).is_err());
//! ```

use crate::controller::Returns;
use crate::error::RouterError;
use crate::server::{Request, Response};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// What a pre-request hook can touch.
pub struct PreRequestContext<'a> {
    request: &'a mut Request,
    response: &'a mut Response,
}

impl<'a> PreRequestContext<'a> {
    pub fn new(request: &'a mut Request, response: &'a mut Response) -> Self {
        Self { request, response }
    }

    #[must_use]
    pub fn request(&self) -> &Request {
        self.request
    }

    pub fn request_mut(&mut self) -> &mut Request {
        self.request
    }

    pub fn response(&mut self) -> &mut Response {
        self.response
    }
}

/// What a post-request hook can touch. The route is already fixed.
pub struct PostRequestContext<'a> {
    request: &'a Request,
    response: &'a mut Response,
    returns: &'a Returns,
}

impl<'a> PostRequestContext<'a> {
    pub fn new(request: &'a Request, response: &'a mut Response, returns: &'a Returns) -> Self {
        Self {
            request,
            response,
            returns,
        }
    }

    #[must_use]
    pub fn request(&self) -> &Request {
        self.request
    }

    pub fn response(&mut self) -> &mut Response {
        self.response
    }

    /// The action's return values, in declaration order.
    #[must_use]
    pub fn returns(&self) -> &Returns {
        self.returns
    }
}

pub trait PreRequestEvent: Send + Sync {
    fn on_pre_request(&self, ctx: &mut PreRequestContext<'_>);
}

pub trait PostRequestEvent: Send + Sync {
    fn on_post_request(&self, ctx: &mut PostRequestContext<'_>);
}

impl<F> PreRequestEvent for F
where
    F: Fn(&mut PreRequestContext<'_>) + Send + Sync,
{
    fn on_pre_request(&self, ctx: &mut PreRequestContext<'_>) {
        self(ctx);
    }
}

impl<F> PostRequestEvent for F
where
    F: Fn(&mut PostRequestContext<'_>) + Send + Sync,
{
    fn on_post_request(&self, ctx: &mut PostRequestContext<'_>) {
        self(ctx);
    }
}

/// Priority-ordered hook list.
pub struct EventPipeline<E: ?Sized> {
    events: BTreeMap<i64, Arc<E>>,
}

impl<E: ?Sized> Default for EventPipeline<E> {
    fn default() -> Self {
        Self {
            events: BTreeMap::new(),
        }
    }
}

impl<E: ?Sized> EventPipeline<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `event` at `priority`. An occupied priority is an error and the
    /// pipeline is left as it was.
    pub fn insert(&mut self, priority: i64, event: Arc<E>) -> Result<(), RouterError> {
        if self.events.contains_key(&priority) {
            return Err(RouterError::EventPriority { priority });
        }
        self.events.insert(priority, event);
        Ok(())
    }

    /// Insert `event` one past the current highest priority (`0` when empty)
    /// and return the priority used.
    pub fn append(&mut self, event: Arc<E>) -> Result<i64, RouterError> {
        let priority = self.next_priority();
        self.insert(priority, event)?;
        Ok(priority)
    }

    #[must_use]
    pub fn next_priority(&self) -> i64 {
        self.events
            .keys()
            .next_back()
            .map_or(0, |highest| highest.saturating_add(1))
    }

    /// Priorities in run order.
    pub fn priorities(&self) -> impl Iterator<Item = i64> + '_ {
        self.events.keys().copied()
    }

    #[must_use]
    pub fn get(&self, priority: i64) -> Option<&Arc<E>> {
        self.events.get(&priority)
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, &Arc<E>)> + '_ {
        self.events.iter().map(|(priority, event)| (*priority, event))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventPipeline<dyn PreRequestEvent> {
    pub fn run(&self, ctx: &mut PreRequestContext<'_>) {
        for (priority, event) in &self.events {
            trace!(priority, "Running pre-request event");
            event.on_pre_request(ctx);
        }
    }
}

impl EventPipeline<dyn PostRequestEvent> {
    pub fn run(&self, ctx: &mut PostRequestContext<'_>) {
        for (priority, event) in &self.events {
            trace!(priority, "Running post-request event");
            event.on_post_request(ctx);
        }
    }
}

impl<E: ?Sized> fmt::Debug for EventPipeline<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventPipeline")
            .field("priorities", &self.events.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use std::sync::Mutex;

    fn recorder(log: &Arc<Mutex<Vec<i64>>>, tag: i64) -> Arc<dyn PreRequestEvent> {
        let log = Arc::clone(log);
        Arc::new(move |_: &mut PreRequestContext<'_>| {
            log.lock().unwrap().push(tag);
        })
    }

    #[test]
    fn test_runs_in_ascending_priority() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline: EventPipeline<dyn PreRequestEvent> = EventPipeline::new();
        pipeline.insert(5, recorder(&log, 5)).unwrap();
        pipeline.insert(-3, recorder(&log, -3)).unwrap();
        pipeline.insert(1, recorder(&log, 1)).unwrap();

        let mut request = Request::new(Method::GET, "/");
        let mut response = Response::new();
        pipeline.run(&mut PreRequestContext::new(&mut request, &mut response));

        assert_eq!(*log.lock().unwrap(), vec![-3, 1, 5]);
    }

    #[test]
    fn test_duplicate_priority_leaves_pipeline_unchanged() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline: EventPipeline<dyn PreRequestEvent> = EventPipeline::new();
        let first = recorder(&log, 1);
        pipeline.insert(7, Arc::clone(&first)).unwrap();

        let err = pipeline.insert(7, recorder(&log, 2)).unwrap_err();
        assert_eq!(err, RouterError::EventPriority { priority: 7 });
        assert_eq!(pipeline.len(), 1);
        assert!(Arc::ptr_eq(pipeline.get(7).unwrap(), &first));
    }

    #[test]
    fn test_append_uses_highest_plus_one() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline: EventPipeline<dyn PreRequestEvent> = EventPipeline::new();
        assert_eq!(pipeline.append(recorder(&log, 0)).unwrap(), 0);
        pipeline.insert(10, recorder(&log, 10)).unwrap();
        assert_eq!(pipeline.append(recorder(&log, 11)).unwrap(), 11);
        pipeline.insert(-20, recorder(&log, -20)).unwrap();
        assert_eq!(pipeline.next_priority(), 12);
        assert_eq!(pipeline.priorities().collect::<Vec<_>>(), vec![-20, 0, 10, 11]);
    }

    #[test]
    fn test_append_at_max_priority_fails() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline: EventPipeline<dyn PreRequestEvent> = EventPipeline::new();
        pipeline.insert(i64::MAX, recorder(&log, 0)).unwrap();
        assert!(pipeline.append(recorder(&log, 1)).is_err());
        assert_eq!(pipeline.len(), 1);
    }
}
