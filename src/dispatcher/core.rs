use crate::controller::{Argument, Invocation, Param, Returns};
use crate::injector::InjectorContext;
use crate::route::Route;
use crate::router::Router;
use crate::server::{Request, Response};
use tracing::{debug, warn};

/// Invokes routes on behalf of one router.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'r> {
    router: &'r Router,
}

impl<'r> Dispatcher<'r> {
    #[must_use]
    pub fn new(router: &'r Router) -> Self {
        Self { router }
    }

    /// Assemble the arguments of `route`'s action, invoke it and return its
    /// values in declaration order.
    pub fn dispatch(&self, route: &Route, request: &Request, response: &mut Response) -> Returns {
        let arguments = self.arguments(route, request, response);
        let action = route.action();

        debug!(
            controller = route.handler().controller().type_name(),
            action = action.name(),
            path = route.path(),
            arguments = arguments.len(),
            "Dispatching action"
        );

        let mut invocation = Invocation::new(request, response, arguments);
        let returns = action.invoke(&mut invocation);

        debug!(
            action = action.name(),
            returns = returns.len(),
            status = %response.status(),
            "Action returned"
        );
        returns
    }

    fn arguments(&self, route: &Route, request: &Request, response: &Response) -> Vec<Argument> {
        let injectors = self.router.injectors();
        route
            .action()
            .params()
            .iter()
            .map(|param| match param {
                Param::Request => Argument::Request,
                Param::Response => Argument::Response,
                Param::Inject(token) => {
                    let ctx = InjectorContext::new(request, route, self.router, response);
                    let value = injectors.provide(token, &ctx);
                    if value.is_none() {
                        warn!(
                            path = route.path(),
                            action = route.action().name(),
                            parameter = token.name(),
                            "No injector supports parameter type, passing an absent value"
                        );
                    }
                    Argument::Injected(value)
                }
            })
            .collect()
    }
}
