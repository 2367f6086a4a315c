//! Logging System
//!
//! Structured logging with `tracing`. Targets follow the shell's subsystems
//! (`wm`, `fs`, `terminal`, `explorer`, `media`, `shell`, `desktop`, `config`)
//! so they can be filtered individually, e.g.
//! `PORTFOLIO_OS_LOG=info,wm=debug`.

use crate::error::ShellError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Environment variable that overrides the configured filter entirely
pub const LOG_ENV_VAR: &str = "PORTFOLIO_OS_LOG";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether logging is enabled (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable colored output (text format only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Per-target log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

/// Build the filter directive string: base level followed by per-target overrides,
/// in a stable order.
pub fn filter_directives(config: &LoggingConfig) -> String {
    let mut modules: Vec<_> = config.modules.iter().collect();
    modules.sort();
    let mut directives = vec![config.level.clone()];
    directives.extend(modules.into_iter().map(|(target, level)| format!("{}={}", target, level)));
    directives.join(",")
}

fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, ShellError> {
    if let Ok(from_env) = std::env::var(LOG_ENV_VAR) {
        if !from_env.is_empty() {
            return EnvFilter::try_new(from_env)
                .map_err(|e| ShellError::Logging(format!("Invalid {}: {}", LOG_ENV_VAR, e)));
        }
    }
    EnvFilter::try_new(filter_directives(config))
        .map_err(|e| ShellError::Logging(format!("Invalid log level: {}", e)))
}

/// Initialize the global subscriber. Output goes to stderr; the webview owns stdout
/// on some platforms.
pub fn init_logging(config: &LoggingConfig) -> Result<(), ShellError> {
    if !config.enabled {
        return Registry::default()
            .with(EnvFilter::new("off"))
            .try_init()
            .map_err(|e| ShellError::Logging(e.to_string()));
    }

    let filter = build_env_filter(config)?;
    let base_subscriber = Registry::default().with(filter);

    let result = match config.format.as_str() {
        "json" => base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        "text" => base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(config.color)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        other => {
            return Err(ShellError::Logging(format!(
                "Unknown log format '{}', expected 'text' or 'json'",
                other
            )))
        }
    };

    result.map_err(|e| ShellError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_list_base_level_then_sorted_targets() {
        let mut config = LoggingConfig::default();
        config.modules.insert("wm".to_string(), "trace".to_string());
        config.modules.insert("fs".to_string(), "debug".to_string());
        assert_eq!(filter_directives(&config), "info,fs=debug,wm=trace");
    }

    #[test]
    fn unknown_format_is_rejected() {
        let config = LoggingConfig {
            format: "xml".to_string(),
            ..LoggingConfig::default()
        };
        assert!(matches!(init_logging(&config), Err(ShellError::Logging(_))));
    }
}
