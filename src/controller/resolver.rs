//! Convention-based route derivation.
//!
//! The naming rules match on substrings:
//! - the verb prefix (`GetOrPost_...`) adds every verb whose name it contains
//! - `action` and `index` are removed wherever they occur in a name

use super::{Action, Controller};
use crate::config::RouterConfig;
use crate::error::RouterError;
use crate::route::{HandlerRef, Methods, Route, ALLOWED_METHODS};
use http::Method;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, warn};

static REPEATED_SLASHES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/+").expect("Failed to compile slash regex"));

const PRIMITIVES: [&str; 18] = [
    "bool", "char", "str", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64",
    "u128", "usize", "f32", "f64", "!",
];

/// Derives the routes of a controller at registration time.
///
/// Implementations fail with [`RouterError::Shape`] or [`RouterError::Naming`]
/// when the top-level controller is not acceptable.
pub trait ControllerResolver: Send + Sync {
    fn resolve(&self, controller: Arc<dyn Controller>) -> Result<Vec<Route>, RouterError>;
}

/// The default resolver: routes by naming convention.
#[derive(Debug, Clone, Copy)]
pub struct ConventionResolver {
    create_alias_routes: bool,
    allow_sub_controller: bool,
}

impl Default for ConventionResolver {
    fn default() -> Self {
        Self::new(&RouterConfig::default())
    }
}

impl ConventionResolver {
    #[must_use]
    pub fn new(config: &RouterConfig) -> Self {
        Self {
            create_alias_routes: config.create_alias_routes,
            allow_sub_controller: config.allow_sub_controller,
        }
    }

    fn collect(
        &self,
        controller: Arc<dyn Controller>,
        prefix: &str,
        routes: &mut Vec<Route>,
    ) -> Result<(), RouterError> {
        let short_name = verify_controller(controller.type_name())?;
        let base = controller_path(short_name);

        for action in Arc::clone(&controller).actions() {
            self.push_action_routes(&controller, action, &base, prefix, routes);
        }

        if !self.allow_sub_controller {
            return Ok(());
        }

        let sub_prefix = format!("{prefix}{base}/");
        for child in controller.sub_controllers() {
            if let Err(err) = verify_controller(child.type_name()) {
                warn!(
                    parent = controller.type_name(),
                    child = child.type_name(),
                    error = %err,
                    "Skipping sub-controller that fails verification"
                );
                continue;
            }
            self.collect(child, &sub_prefix, routes)?;
        }
        Ok(())
    }

    fn push_action_routes(
        &self,
        controller: &Arc<dyn Controller>,
        action: Action,
        base: &str,
        prefix: &str,
        routes: &mut Vec<Route>,
    ) {
        let (methods, action_name) = derive_action(action.name());
        let path = format!("{prefix}{base}/{action_name}");
        let handler = HandlerRef::new(Arc::clone(controller), action);

        debug!(
            controller = controller.type_name(),
            action = handler.action().name(),
            path = %path,
            methods = ?methods,
            "Derived route"
        );

        let alias = if self.create_alias_routes {
            alias_path(&path)
        } else {
            None
        };

        routes.push(Route::new(methods.clone(), &path, handler.clone()));
        if let Some(alias) = alias {
            debug!(path = %path, alias = %alias, "Derived alias route");
            routes.push(Route::new(methods, &alias, handler));
        }
    }
}

impl ControllerResolver for ConventionResolver {
    fn resolve(&self, controller: Arc<dyn Controller>) -> Result<Vec<Route>, RouterError> {
        let mut routes = Vec::new();
        self.collect(controller, "", &mut routes)?;
        Ok(routes)
    }
}

/// Check the shape and name of a controller type.
///
/// Returns the last path segment of the type name (without generic
/// arguments), which is what the route path is derived from.
pub fn verify_controller(type_name: &str) -> Result<&str, RouterError> {
    if let Some(kind) = non_record_kind(type_name) {
        return Err(RouterError::Shape {
            type_name: type_name.to_string(),
            kind,
        });
    }

    let short_name = short_type_name(type_name);
    if !short_name.contains("Controller") {
        return Err(RouterError::Naming {
            type_name: type_name.to_string(),
        });
    }

    Ok(short_name)
}

/// `UserController` → `user`
#[must_use]
pub fn controller_path(short_name: &str) -> String {
    short_name.to_lowercase().replace("controller", "")
}

fn non_record_kind(type_name: &str) -> Option<&'static str> {
    let t = type_name.trim();
    if t.is_empty() {
        Some("unnamed type")
    } else if t.starts_with('&') {
        Some("reference")
    } else if t.starts_with('*') {
        Some("raw pointer")
    } else if t.starts_with('(') {
        Some("tuple")
    } else if t.starts_with('[') {
        if t.contains(';') {
            Some("array")
        } else {
            Some("slice")
        }
    } else if t.starts_with("fn(")
        || t.starts_with("unsafe ")
        || t.starts_with("extern ")
    {
        Some("function pointer")
    } else if t.starts_with("dyn ") {
        Some("trait object")
    } else if PRIMITIVES.contains(&t) {
        Some("primitive")
    } else {
        None
    }
}

pub(crate) fn short_type_name(type_name: &str) -> &str {
    let base = type_name.split('<').next().unwrap_or(type_name);
    base.rsplit("::").next().unwrap_or(base)
}

/// Split an action name into its verb set and path segment.
///
/// `Post_CreateAction` → (`[POST]`, `create`); `ShowAction` → (`[GET]`, `show`).
pub(crate) fn derive_action(name: &str) -> (Methods, String) {
    let lowered = name.to_lowercase();
    let mut methods = Methods::new();
    let mut remainder = lowered.as_str();

    if lowered.contains('_') {
        let mut parts = lowered.split('_');
        let verbs = parts.next().unwrap_or_default();
        remainder = parts.next().unwrap_or_default();
        for (token, method) in ALLOWED_METHODS.iter() {
            if verbs.contains(*token) {
                methods.push(method.clone());
            }
        }
    }

    if methods.is_empty() {
        methods.push(Method::GET);
    }

    (methods, remainder.replace("action", ""))
}

/// `user/index` → `user`; `index/index` → `` (the root).
pub(crate) fn alias_path(path: &str) -> Option<String> {
    if !path.contains("index") {
        return None;
    }
    let stripped = path.replace("index", "");
    let collapsed = REPEATED_SLASHES.replace_all(&stripped, "/");
    Some(collapsed.trim_matches('/').to_string())
}
