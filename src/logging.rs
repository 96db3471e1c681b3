//! Logging initialization
//!
//! Structured logging through `tracing`. The router itself only emits events;
//! binaries call [`init_logging_with_config`] once at startup.
//!
//! ## Environment Variables
//!
//! - `CONVROUTER_LOG_LEVEL`: trace/debug/info/warn/error (default `info`)
//! - `CONVROUTER_LOG_FORMAT`: json/pretty/compact (default `compact`)
//! - `CONVROUTER_LOG_ASYNC`: buffer output on a background thread (default `false`)
//! - `CONVROUTER_LOG_FILTER`: extra comma-separated `EnvFilter` directives
//!
//! `RUST_LOG`, when set, replaces the level entirely.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::{Level, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format: JSON for production, pretty or compact for development
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Compact,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level: trace/debug/info/warn/error
    pub level: String,
    pub format: LogFormat,
    /// Write through a non-blocking background writer
    pub async_logging: bool,
    /// Extra `EnvFilter` directives (comma-separated)
    pub target_filter: Option<String>,
    /// Include file:line location (dev only)
    pub include_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            async_logging: false,
            target_filter: None,
            include_location: false,
        }
    }
}

impl LogConfig {
    /// Parse configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("CONVROUTER_LOG_LEVEL") {
            self.level = level;
        }
        if let Some(format) = lookup("CONVROUTER_LOG_FORMAT") {
            self.format = LogFormat::parse(&format);
        }
        if let Some(flag) = lookup("CONVROUTER_LOG_ASYNC").and_then(|v| v.parse().ok()) {
            self.async_logging = flag;
        }
        if let Some(filter) = lookup("CONVROUTER_LOG_FILTER") {
            self.target_filter = Some(filter);
        }
        self
    }

    #[must_use]
    pub fn level(&self) -> Level {
        match self.level.trim().to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

/// Initialize logging with the given configuration. Output goes to stderr.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging_with_config(config: &LogConfig) -> Result<()> {
    let mut env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level().as_str()));

    if let Some(target_filter) = &config.target_filter {
        for filter in target_filter.split(',') {
            let filter = filter.trim();
            if filter.is_empty() {
                continue;
            }
            match filter.parse() {
                Ok(directive) => env_filter = env_filter.add_directive(directive),
                Err(_) => eprintln!("Warning: Invalid log filter directive: {}", filter),
            }
        }
    }

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.async_logging {
        let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());
        registry
            .with(fmt_layer(config, non_blocking))
            .try_init()
            .context("Failed to initialize async logging")?;
        // Keep the worker alive for the lifetime of the process.
        std::mem::forget(guard);
    } else {
        registry
            .with(fmt_layer(config, std::io::stderr))
            .try_init()
            .context("Failed to initialize sync logging")?;
    }

    Ok(())
}

fn fmt_layer<S, W>(config: &LogConfig, writer: W) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(writer)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(writer)
            .boxed(),
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(writer)
            .boxed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("PRETTY"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("compact"), LogFormat::Compact);
        assert_eq!(LogFormat::parse("whatever"), LogFormat::Compact);
    }

    #[test]
    fn test_level_falls_back_to_info() {
        let mut config = LogConfig::default();
        assert_eq!(config.level(), Level::INFO);
        config.level = "DEBUG".to_string();
        assert_eq!(config.level(), Level::DEBUG);
        config.level = "loud".to_string();
        assert_eq!(config.level(), Level::INFO);
    }

    #[test]
    fn test_overrides() {
        let config = LogConfig::default().with_overrides(|key| match key {
            "CONVROUTER_LOG_FORMAT" => Some("json".to_string()),
            "CONVROUTER_LOG_ASYNC" => Some("yes".to_string()),
            "CONVROUTER_LOG_FILTER" => Some("convrouter=debug".to_string()),
            _ => None,
        });
        assert_eq!(config.format, LogFormat::Json);
        assert!(!config.async_logging);
        assert_eq!(config.level, "info");
        assert_eq!(config.target_filter.as_deref(), Some("convrouter=debug"));
    }

    #[test]
    fn test_deserialize_lowercase_format() {
        let config: LogConfig = serde_yaml::from_str("format: pretty\nlevel: warn\n").unwrap();
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.level(), Level::WARN);
        assert!(!config.include_location);
    }
}
