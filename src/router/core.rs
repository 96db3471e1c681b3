use super::resolver::RequestResolver;
use super::table::RouteTable;
use crate::config::RouterConfig;
use crate::controller::{Controller, ControllerResolver, ConventionResolver, Param, Returns, TypeToken};
use crate::dispatcher::Dispatcher;
use crate::error::RouterError;
use crate::events::{
    EventPipeline, PostRequestContext, PostRequestEvent, PreRequestContext, PreRequestEvent,
};
use crate::injector::{Injector, InjectorChain};
use crate::route::{Methods, Route};
use crate::server::{Request, Response};
use std::fmt;
use std::io;
use std::sync::Arc;
use tracing::{debug, info, info_span, warn};

/// How [`Router::handle`] ended.
#[derive(Debug)]
pub enum Outcome {
    /// A route matched and its action ran. Post-request events have run too.
    Dispatched { route: Arc<Route>, returns: Returns },
    /// No route matched; the response holds `404 Not Found`.
    NotFound,
}

impl Outcome {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Outcome::NotFound)
    }

    #[must_use]
    pub fn route(&self) -> Option<&Arc<Route>> {
        match self {
            Outcome::Dispatched { route, .. } => Some(route),
            Outcome::NotFound => None,
        }
    }

    #[must_use]
    pub fn returns(&self) -> Option<&Returns> {
        match self {
            Outcome::Dispatched { returns, .. } => Some(returns),
            Outcome::NotFound => None,
        }
    }
}

/// Convention-driven router.
///
/// Registration (`add_*`, `append_*`) takes `&mut self`; serving takes
/// `&self`. Build the router completely, then share it (`Arc<Router>`)
/// with the threads that serve requests.
///
/// ```rust
/// use convrouter::{Action, Controller, Invocation, Request, Response, Returns, Router};
/// use http::Method;
/// use std::sync::Arc;
///
/// struct HelloController;
///
/// impl Controller for HelloController {
///     fn actions(self: Arc<Self>) -> Vec<Action> {
///         vec![Action::new("IndexAction", &self, |_: &HelloController, inv: &mut Invocation<'_>| {
///             inv.response().write_str("hello");
///             Returns::none()
///         })]
///     }
/// }
///
/// let mut router = Router::new();
/// assert_eq!(router.add_controller(Arc::new(HelloController)).unwrap(), 2);
///
/// let mut request = Request::new(Method::GET, "/hello");
/// let mut response = Response::new();
/// let outcome = router.handle(&mut request, &mut response);
/// assert!(!outcome.is_not_found());
/// assert_eq!(response.body_str(), Some("hello"));
/// ```
pub struct Router {
    config: RouterConfig,
    resolver: Box<dyn ControllerResolver>,
    table: RouteTable,
    requests: RequestResolver,
    injectors: InjectorChain,
    pre_request: EventPipeline<dyn PreRequestEvent>,
    post_request: EventPipeline<dyn PostRequestEvent>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Router with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    /// Router deriving routes with the naming convention under `config`.
    #[must_use]
    pub fn with_config(config: RouterConfig) -> Self {
        let resolver = Box::new(ConventionResolver::new(&config));
        Self::with_resolver(config, resolver)
    }

    /// Router deriving routes with a custom resolver.
    #[must_use]
    pub fn with_resolver(config: RouterConfig, resolver: Box<dyn ControllerResolver>) -> Self {
        if config.error_redirect {
            debug!("ErrorRedirect is set but no error controller is consulted");
        }
        Self {
            config,
            resolver,
            table: RouteTable::new(),
            requests: RequestResolver::new(),
            injectors: InjectorChain::new(),
            pre_request: EventPipeline::new(),
            post_request: EventPipeline::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    // ---- registration -------------------------------------------------

    /// Derive the routes of `controller` and append them. Returns the number
    /// of routes added.
    ///
    /// A shape or naming failure of the controller itself adds nothing and is
    /// meant to abort startup.
    pub fn add_controller(&mut self, controller: Arc<dyn Controller>) -> Result<usize, RouterError> {
        let type_name = controller.type_name();
        let routes = self.resolver.resolve(controller)?;
        let count = routes.len();
        for route in routes {
            self.add_route(route);
        }
        info!(
            controller = type_name,
            routes_added = count,
            routes_total = self.table.len(),
            "Controller registered"
        );
        Ok(count)
    }

    /// Append an explicitly built route.
    pub fn add_route(&mut self, route: Route) -> Arc<Route> {
        if let Some(existing) = self.table.shadowing(&route) {
            warn!(
                path = route.path(),
                methods = ?route.methods(),
                existing_action = existing.action().name(),
                shadowed_action = route.action().name(),
                "Route is shadowed by an earlier registration and will not be reached"
            );
        }
        self.table.push(route)
    }

    /// Append an injector; earlier injectors take precedence.
    pub fn add_injector(&mut self, injector: impl Injector + 'static) {
        self.injectors.push(Arc::new(injector));
    }

    pub fn add_pre_request_event(
        &mut self,
        event: impl PreRequestEvent + 'static,
        priority: i64,
    ) -> Result<(), RouterError> {
        self.pre_request.insert(priority, Arc::new(event))
    }

    pub fn append_pre_request_event(
        &mut self,
        event: impl PreRequestEvent + 'static,
    ) -> Result<i64, RouterError> {
        self.pre_request.append(Arc::new(event))
    }

    pub fn add_post_request_event(
        &mut self,
        event: impl PostRequestEvent + 'static,
        priority: i64,
    ) -> Result<(), RouterError> {
        self.post_request.insert(priority, Arc::new(event))
    }

    pub fn append_post_request_event(
        &mut self,
        event: impl PostRequestEvent + 'static,
    ) -> Result<i64, RouterError> {
        self.post_request.append(Arc::new(event))
    }

    // ---- accessors ----------------------------------------------------

    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    #[must_use]
    pub fn request_resolver(&self) -> &RequestResolver {
        &self.requests
    }

    #[must_use]
    pub fn injectors(&self) -> &InjectorChain {
        &self.injectors
    }

    #[must_use]
    pub fn pre_request_events(&self) -> &EventPipeline<dyn PreRequestEvent> {
        &self.pre_request
    }

    #[must_use]
    pub fn post_request_events(&self) -> &EventPipeline<dyn PostRequestEvent> {
        &self.post_request
    }

    // ---- serving --------------------------------------------------------

    /// Find the route for `verb` (upper-case) and the raw path with query.
    #[must_use]
    pub fn resolve(&self, verb: &str, raw_path: &str) -> Option<Arc<Route>> {
        self.requests.resolve(&self.table, verb, raw_path)
    }

    /// Invoke `route` without running any events.
    pub fn dispatch(&self, route: &Route, request: &Request, response: &mut Response) -> Returns {
        Dispatcher::new(self).dispatch(route, request, response)
    }

    /// Run one request through the full lifecycle: pre-request events,
    /// resolution, then either dispatch and post-request events or the
    /// not-found response.
    pub fn handle(&self, request: &mut Request, response: &mut Response) -> Outcome {
        let span = info_span!(
            "request",
            request_id = %request.id(),
            method = %request.method(),
            uri = %request.uri(),
        );
        let _entered = span.enter();

        if !self.pre_request.is_empty() {
            self.pre_request
                .run(&mut PreRequestContext::new(request, response));
        }

        let Some(route) = self.resolve(request.method().as_str(), request.uri()) else {
            debug!(
                method = %request.method(),
                uri = %request.uri(),
                "No route matched"
            );
            response.not_found();
            return Outcome::NotFound;
        };

        let returns = self.dispatch(&route, request, response);

        if !self.post_request.is_empty() {
            self.post_request
                .run(&mut PostRequestContext::new(request, response, &returns));
        }

        Outcome::Dispatched { route, returns }
    }

    // ---- diagnostics ----------------------------------------------------

    /// `(ordinal, verbs, path)` for every registered route.
    #[must_use]
    pub fn routes(&self) -> Vec<(usize, Methods, String)> {
        self.table
            .iter()
            .enumerate()
            .map(|(ordinal, route)| (ordinal, route.methods().clone(), route.path().to_string()))
            .collect()
    }

    /// Write the route listing, one route per line.
    pub fn write_routes<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        for (ordinal, route) in self.table.iter().enumerate() {
            let mut verbs = String::new();
            for method in route.methods() {
                verbs.push_str(method.as_str());
                verbs.push(' ');
            }
            writeln!(out, "ID: {ordinal}\t{verbs}\t\t{}", route.path())?;
        }
        Ok(())
    }

    /// `(route path, type)` for every declared parameter no injector supports.
    #[must_use]
    pub fn unresolved_parameters(&self) -> Vec<(String, TypeToken)> {
        let mut missing = Vec::new();
        for route in self.table.iter() {
            for param in route.action().params() {
                if let Param::Inject(token) = param {
                    if !self.injectors.supports(token) {
                        missing.push((route.path().to_string(), *token));
                    }
                }
            }
        }
        missing
    }

    /// Log every unresolved parameter as a warning and return how many there
    /// were.
    pub fn verify(&self) -> usize {
        let missing = self.unresolved_parameters();
        for (path, token) in &missing {
            warn!(
                path = %path,
                parameter = token.name(),
                "No injector supports parameter type"
            );
        }
        info!(
            routes = self.table.len(),
            injectors = self.injectors.len(),
            pre_request_events = self.pre_request.len(),
            post_request_events = self.post_request.len(),
            unresolved_parameters = missing.len(),
            "Router verified"
        );
        missing.len()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("config", &self.config)
            .field("routes", &self.table.len())
            .field("cached", &self.requests.cache_len())
            .field("injectors", &self.injectors)
            .field("pre_request", &self.pre_request)
            .field("post_request", &self.post_request)
            .finish_non_exhaustive()
    }
}
