//! # Configuration
//!
//! Router options come from a YAML file and can be overridden by environment
//! variables. The file is optional; every key has a default.
//!
//! ```yaml
//! router:
//!   ErrorRedirect: false
//!   CreateAliasRoutes: true
//!   AllowSubController: true
//! logging:
//!   level: info
//!   format: compact
//! ```
//!
//! ## Environment Variables
//!
//! | Variable                          | Overrides            |
//! |-----------------------------------|----------------------|
//! | `CONVROUTER_ERROR_REDIRECT`       | `ErrorRedirect`      |
//! | `CONVROUTER_CREATE_ALIAS_ROUTES`  | `CreateAliasRoutes`  |
//! | `CONVROUTER_ALLOW_SUB_CONTROLLER` | `AllowSubController` |
//!
//! Values are parsed as `true`/`false`; anything else leaves the setting as it
//! was. Logging variables are listed in [`crate::logging`].

use crate::logging::LogConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Options consumed by the routing core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RouterConfig {
    /// Recognized for compatibility; error controllers are not part of the
    /// router, so the value has no effect on request handling.
    ///
    /// Default: false
    pub error_redirect: bool,
    /// Also register an `index`-stripped alias for every route whose path
    /// contains `index` (`user/index` is reachable as `user`).
    ///
    /// Default: true
    pub create_alias_routes: bool,
    /// Mount declared sub-controllers below their parent's path.
    ///
    /// Default: true
    pub allow_sub_controller: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            error_redirect: false,
            create_alias_routes: true,
            allow_sub_controller: true,
        }
    }
}

impl RouterConfig {
    /// Defaults with environment overrides applied.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from `lookup` (an environment-like key/value source).
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str, current: bool| {
            lookup(key)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(current)
        };
        self.error_redirect = flag("CONVROUTER_ERROR_REDIRECT", self.error_redirect);
        self.create_alias_routes = flag("CONVROUTER_CREATE_ALIAS_ROUTES", self.create_alias_routes);
        self.allow_sub_controller =
            flag("CONVROUTER_ALLOW_SUB_CONTROLLER", self.allow_sub_controller);
        self
    }
}

/// Whole-application configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub router: RouterConfig,
    pub logging: LogConfig,
}

impl AppConfig {
    /// Apply process environment overrides to both sections.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    #[must_use]
    pub fn with_overrides<F>(self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            router: self.router.with_overrides(&lookup),
            logging: self.logging.with_overrides(&lookup),
        }
    }
}

/// Parse a YAML configuration document.
pub fn parse_config(text: &str) -> Result<AppConfig> {
    if text.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    serde_yaml::from_str(text).context("Failed to parse configuration YAML")
}

/// Load a YAML configuration file. Environment overrides are not applied.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_config(&text).with_context(|| format!("Invalid config file {}", path.display()))
}
