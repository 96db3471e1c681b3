use crate::server::{Request, Response};
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Stable descriptor of a parameter type.
///
/// Equality and hashing use the `TypeId`; the name is kept for diagnostics.
#[derive(Clone, Copy)]
pub struct TypeToken {
    id: TypeId,
    name: &'static str,
}

impl TypeToken {
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// True when this token describes `T`.
    #[inline]
    #[must_use]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeToken {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeToken {}

impl Hash for TypeToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeToken({})", self.name)
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A declared action parameter.
///
/// The request and the response sink are recognized by type and handed to the
/// action directly; everything else goes through the injector chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    Request,
    Response,
    Inject(TypeToken),
}

impl Param {
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        let token = TypeToken::of::<T>();
        if token.is::<Request>() {
            Param::Request
        } else if token.is::<Response>() {
            Param::Response
        } else {
            Param::Inject(token)
        }
    }
}

/// Values returned by an action, in declaration order.
#[derive(Default)]
pub struct Returns {
    values: Vec<Box<dyn Any + Send>>,
}

impl Returns {
    /// An action that returns nothing.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn one<T: Any + Send>(value: T) -> Self {
        Self::none().and(value)
    }

    /// Append another return value.
    #[must_use]
    pub fn and<T: Any + Send>(mut self, value: T) -> Self {
        self.push(value);
        self
    }

    pub fn push<T: Any + Send>(&mut self, value: T) {
        self.values.push(Box::new(value));
    }

    /// The value at `index` if it is a `T`.
    #[must_use]
    pub fn get<T: Any>(&self, index: usize) -> Option<&T> {
        self.values.get(index).and_then(|v| v.downcast_ref::<T>())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<()> for Returns {
    fn from(_: ()) -> Self {
        Self::none()
    }
}

impl fmt::Debug for Returns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Returns")
            .field("len", &self.values.len())
            .finish()
    }
}

/// One assembled argument.
pub enum Argument {
    Request,
    Response,
    /// `None` when no injector supports the declared type.
    Injected(Option<Box<dyn Any + Send>>),
}

impl fmt::Debug for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Request => f.write_str("Request"),
            Argument::Response => f.write_str("Response"),
            Argument::Injected(Some(_)) => f.write_str("Injected(..)"),
            Argument::Injected(None) => f.write_str("Injected(absent)"),
        }
    }
}

/// Everything an action sees when it runs.
///
/// Positions are the declared parameter positions (the controller itself is
/// bound separately as the handler's first argument). Injected values read
/// through `Option`: an absent injection is `None`, never a panic.
pub struct Invocation<'a> {
    request: &'a Request,
    response: &'a mut Response,
    arguments: Vec<Argument>,
}

impl<'a> Invocation<'a> {
    pub(crate) fn new(
        request: &'a Request,
        response: &'a mut Response,
        arguments: Vec<Argument>,
    ) -> Self {
        Self {
            request,
            response,
            arguments,
        }
    }

    #[inline]
    #[must_use]
    pub fn request(&self) -> &Request {
        self.request
    }

    #[inline]
    pub fn response(&mut self) -> &mut Response {
        self.response
    }

    #[must_use]
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Injected value at `position`, if present and a `T`.
    #[must_use]
    pub fn arg<T: Any>(&self, position: usize) -> Option<&T> {
        match self.arguments.get(position)? {
            Argument::Injected(Some(value)) => value.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Move the injected value at `position` out of the invocation.
    pub fn take<T: Any>(&mut self, position: usize) -> Option<T> {
        let Argument::Injected(slot) = self.arguments.get_mut(position)? else {
            return None;
        };
        let value = slot.take()?;
        match value.downcast::<T>() {
            Ok(value) => Some(*value),
            Err(value) => {
                *slot = Some(value);
                None
            }
        }
    }

    /// First injected value of type `T`, whatever its position.
    #[must_use]
    pub fn injected<T: Any>(&self) -> Option<&T> {
        self.arguments.iter().find_map(|argument| match argument {
            Argument::Injected(Some(value)) => value.downcast_ref::<T>(),
            _ => None,
        })
    }
}

/// Type-erased action body with the controller already bound.
pub type ActionFn = Arc<dyn Fn(&mut Invocation<'_>) -> Returns + Send + Sync>;

/// An invocable controller action.
///
/// The name drives route derivation (`Post_CreateAction` is `POST .../create`).
/// Parameters are declared in order with [`Action::param`].
///
/// ```rust,ignore
/// Action::new("Post_CreateAction", &self, UserController::create)
///     .param::<Request>()
///     .param::<Response>()
///     .param::<RequestId>()
/// ```
#[derive(Clone)]
pub struct Action {
    name: String,
    params: Vec<Param>,
    handler: ActionFn,
}

impl Action {
    /// Bind `f` to `controller`. The controller is the first argument of
    /// every invocation.
    pub fn new<C, F>(name: impl Into<String>, controller: &Arc<C>, f: F) -> Self
    where
        C: Send + Sync + 'static,
        F: Fn(&C, &mut Invocation<'_>) -> Returns + Send + Sync + 'static,
    {
        let controller = Arc::clone(controller);
        let handler: ActionFn = Arc::new(move |inv: &mut Invocation<'_>| f(&*controller, inv));
        Self {
            name: name.into(),
            params: Vec::new(),
            handler,
        }
    }

    /// Declare the next parameter.
    #[must_use]
    pub fn param<T: ?Sized + 'static>(mut self) -> Self {
        self.params.push(Param::of::<T>());
        self
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub(crate) fn invoke(&self, invocation: &mut Invocation<'_>) -> Returns {
        (self.handler)(invocation)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
