//! Route records.

use crate::controller::{Action, Controller};
use http::Method;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Verb set of a route. Most routes carry one or two verbs.
pub type Methods = SmallVec<[Method; 2]>;

/// Verb vocabulary recognized in action name prefixes, in matching order.
pub const ALLOWED_METHODS: [(&str, Method); 9] = [
    ("get", Method::GET),
    ("post", Method::POST),
    ("put", Method::PUT),
    ("patch", Method::PATCH),
    ("head", Method::HEAD),
    ("trace", Method::TRACE),
    ("connect", Method::CONNECT),
    ("options", Method::OPTIONS),
    ("delete", Method::DELETE),
];

/// The controller instance and the action to call on it.
#[derive(Clone)]
pub struct HandlerRef {
    controller: Arc<dyn Controller>,
    action: Arc<Action>,
}

impl HandlerRef {
    #[must_use]
    pub fn new(controller: Arc<dyn Controller>, action: Action) -> Self {
        Self {
            controller,
            action: Arc::new(action),
        }
    }

    #[inline]
    #[must_use]
    pub fn controller(&self) -> &Arc<dyn Controller> {
        &self.controller
    }

    #[inline]
    #[must_use]
    pub fn action(&self) -> &Action {
        &self.action
    }
}

impl fmt::Debug for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRef")
            .field("controller", &self.controller.type_name())
            .field("action", &self.action.name())
            .finish()
    }
}

/// One callable route.
///
/// The path is stored normalized: lower-case, without leading or trailing `/`.
/// Routes are immutable once built.
#[derive(Clone)]
pub struct Route {
    methods: Methods,
    path: String,
    handler: HandlerRef,
}

impl Route {
    #[must_use]
    pub fn new(methods: impl IntoIterator<Item = Method>, path: &str, handler: HandlerRef) -> Self {
        Self {
            methods: methods.into_iter().collect(),
            path: normalize_route_path(path),
            handler,
        }
    }

    /// Declare a route explicitly instead of deriving it from a controller.
    ///
    /// ```rust,ignore
    /// let route = Route::builder("/Reports/Daily")
    ///     .method(Method::GET)
    ///     .method(Method::HEAD)
    ///     .handler(&controller, Action::new("daily", &controller, ReportController::daily));
    /// assert_eq!(route.path(), "reports/daily");
    /// ```
    #[must_use]
    pub fn builder(path: &str) -> RouteBuilder {
        RouteBuilder {
            path: path.to_string(),
            methods: Methods::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn methods(&self) -> &Methods {
        &self.methods
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    #[must_use]
    pub fn handler(&self) -> &HandlerRef {
        &self.handler
    }

    #[inline]
    #[must_use]
    pub fn action(&self) -> &Action {
        self.handler.action()
    }

    /// Whether `verb` (upper-case, e.g. `GET`) is one of this route's verbs.
    #[inline]
    #[must_use]
    pub fn allows(&self, verb: &str) -> bool {
        if let [only] = self.methods.as_slice() {
            return only.as_str() == verb;
        }
        self.methods.iter().any(|m| m.as_str() == verb)
    }

    /// Whether this route and `other` answer at least one common (path, verb).
    #[must_use]
    pub fn overlaps(&self, other: &Route) -> bool {
        self.path == other.path && other.methods.iter().any(|m| self.allows(m.as_str()))
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("methods", &self.methods)
            .field("path", &self.path)
            .field("handler", &self.handler)
            .finish()
    }
}

/// Builder for explicitly declared routes. Defaults to `GET` when no verb is
/// given.
#[derive(Debug, Clone)]
pub struct RouteBuilder {
    path: String,
    methods: Methods,
}

impl RouteBuilder {
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        if !self.methods.contains(&method) {
            self.methods.push(method);
        }
        self
    }

    #[must_use]
    pub fn handler<C: Controller>(mut self, controller: &Arc<C>, action: Action) -> Route {
        if self.methods.is_empty() {
            self.methods.push(Method::GET);
        }
        let handler = HandlerRef::new(Arc::clone(controller) as Arc<dyn Controller>, action);
        Route::new(self.methods, &self.path, handler)
    }
}

/// Lower-case and strip leading/trailing separators.
#[must_use]
pub fn normalize_route_path(path: &str) -> String {
    path.trim_matches('/').to_lowercase()
}
