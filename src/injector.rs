//! # Argument injection
//!
//! Action parameters other than the request and the response are resolved
//! through an ordered chain of injectors. The first injector that supports a
//! parameter's [`TypeToken`] provides the value; later injectors are not asked.
//! When none supports it the argument is absent (`None`), which the action
//! observes through [`crate::Invocation::arg`].
//!
//! ```rust
//! use convrouter::injector::{injector_fn, InjectorContext};
//! use convrouter::{RequestId, Router};
//!
//! let mut router = Router::new();
//! router.add_injector(injector_fn::<RequestId, _>(|ctx: &InjectorContext<'_>| ctx.request().id()));
//! ```

use crate::controller::TypeToken;
use crate::route::Route;
use crate::router::Router;
use crate::server::{Request, Response};
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Request-scoped view handed to injectors.
///
/// The response is read-only here. An injector cannot provide a wrapper that
/// writes to the live response; actions write through the `Response`
/// parameter instead.
#[derive(Clone, Copy)]
pub struct InjectorContext<'a> {
    request: &'a Request,
    route: &'a Route,
    router: &'a Router,
    response: &'a Response,
}

impl<'a> InjectorContext<'a> {
    #[must_use]
    pub fn new(
        request: &'a Request,
        route: &'a Route,
        router: &'a Router,
        response: &'a Response,
    ) -> Self {
        Self {
            request,
            route,
            router,
            response,
        }
    }

    #[inline]
    #[must_use]
    pub fn request(&self) -> &'a Request {
        self.request
    }

    /// The route being dispatched.
    #[inline]
    #[must_use]
    pub fn route(&self) -> &'a Route {
        self.route
    }

    #[inline]
    #[must_use]
    pub fn router(&self) -> &'a Router {
        self.router
    }

    /// The response as written so far (pre-request events may have touched it).
    #[inline]
    #[must_use]
    pub fn response(&self) -> &'a Response {
        self.response
    }
}

/// A provider of action arguments.
pub trait Injector: Send + Sync {
    fn supports(&self, token: &TypeToken) -> bool;

    /// Produce the value. Only called after `supports` returned true.
    fn provide(&self, ctx: &InjectorContext<'_>) -> Box<dyn Any + Send>;
}

/// Injectors in registration order.
#[derive(Clone, Default)]
pub struct InjectorChain {
    injectors: Vec<Arc<dyn Injector>>,
}

impl InjectorChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an injector; it is consulted after every earlier one.
    pub fn push(&mut self, injector: Arc<dyn Injector>) {
        self.injectors.push(injector);
    }

    /// Whether any injector supports `token`.
    #[must_use]
    pub fn supports(&self, token: &TypeToken) -> bool {
        self.injectors.iter().any(|injector| injector.supports(token))
    }

    /// Value from the first injector supporting `token`.
    #[must_use]
    pub fn provide(&self, token: &TypeToken, ctx: &InjectorContext<'_>) -> Option<Box<dyn Any + Send>> {
        self.injectors
            .iter()
            .find(|injector| injector.supports(token))
            .map(|injector| injector.provide(ctx))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.injectors.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.injectors.is_empty()
    }
}

impl fmt::Debug for InjectorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectorChain")
            .field("len", &self.injectors.len())
            .finish()
    }
}

/// Injector for exactly one type `T`, backed by a closure.
pub struct FnInjector<T, F> {
    f: F,
    _marker: PhantomData<fn() -> T>,
}

/// Build an [`FnInjector`] supporting `T`.
pub fn injector_fn<T, F>(f: F) -> FnInjector<T, F>
where
    T: Any + Send,
    F: Fn(&InjectorContext<'_>) -> T + Send + Sync,
{
    FnInjector {
        f,
        _marker: PhantomData,
    }
}

impl<T, F> Injector for FnInjector<T, F>
where
    T: Any + Send,
    F: Fn(&InjectorContext<'_>) -> T + Send + Sync,
{
    fn supports(&self, token: &TypeToken) -> bool {
        token.is::<T>()
    }

    fn provide(&self, ctx: &InjectorContext<'_>) -> Box<dyn Any + Send> {
        Box::new((self.f)(ctx))
    }
}

impl<T, F> fmt::Debug for FnInjector<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FnInjector<{}>", std::any::type_name::<T>())
    }
}
