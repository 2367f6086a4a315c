//! Shell configuration
//!
//! Every value has a built-in default so the shell runs with no configuration
//! at all. Overrides come from an optional `portfolio-os.toml` next to the
//! working directory and from `PORTFOLIO_OS_*` environment variables, with
//! `__` separating nested keys (e.g. `PORTFOLIO_OS_WINDOWS__CASCADE_STEP=40`).

use crate::error::ShellError;
use crate::logging::LoggingConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "portfolio-os.toml";
pub const ENV_PREFIX: &str = "PORTFOLIO_OS";

/// First z-index handed out is this value plus one.
pub const INITIAL_WINDOW_Z_INDEX: u32 = 10;

/// Geometry and stacking defaults for newly opened windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowDefaults {
    /// Offset of the first window from the top-left corner
    pub cascade_base: f64,
    /// Diagonal offset added per already-open window
    pub cascade_step: f64,
    pub width: f64,
    pub height: f64,
    pub min_width: f64,
    pub min_height: f64,
    pub initial_z_index: u32,
}

impl Default for WindowDefaults {
    fn default() -> Self {
        Self {
            cascade_base: 50.0,
            cascade_step: 30.0,
            width: 800.0,
            height: 600.0,
            min_width: 320.0,
            min_height: 200.0,
            initial_z_index: INITIAL_WINDOW_Z_INDEX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub windows: WindowDefaults,
    /// Height reserved for the taskbar at the bottom of the canvas
    pub taskbar_height: f64,
    /// Viewports narrower than this get the "unsupported device" notice
    pub min_desktop_width: f64,
    pub clock_interval_ms: u64,
    pub logging: LoggingConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            windows: WindowDefaults::default(),
            taskbar_height: 40.0,
            min_desktop_width: 768.0,
            clock_interval_ms: 1000,
            logging: LoggingConfig::default(),
        }
    }
}

/// Loads [`ShellConfig`] from file and environment sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from `path` (or [`DEFAULT_CONFIG_FILE`]) plus environment overrides.
    /// A missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<ShellConfig, ShellError> {
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        let builder = Config::builder().add_source(File::from(file).required(false));
        Self::finish(Self::with_environment(builder))
    }

    fn with_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<ShellConfig, ShellError> {
        let config = builder.build()?.try_deserialize::<ShellConfig>()?;
        tracing::debug!(target: "config", ?config, "configuration loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(source: &str) -> ShellConfig {
        let builder = Config::builder().add_source(File::from_str(source, FileFormat::Toml));
        ConfigLoader::finish(builder).unwrap()
    }

    #[test]
    fn empty_sources_yield_defaults() {
        assert_eq!(from_toml(""), ShellConfig::default());
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let config = ConfigLoader::load(Some(Path::new("does-not-exist.toml"))).unwrap();
        assert_eq!(config.windows.cascade_base, 50.0);
    }

    #[test]
    fn file_overrides_nested_keys_and_keeps_other_defaults() {
        let config = from_toml(
            r#"
            taskbar_height = 48
            [windows]
            cascade_step = 40
            "#,
        );
        assert_eq!(config.taskbar_height, 48.0);
        assert_eq!(config.windows.cascade_step, 40.0);
        assert_eq!(config.windows.width, 800.0);
        assert_eq!(config.min_desktop_width, 768.0);
    }

    #[test]
    fn environment_overrides_file_defaults() {
        std::env::set_var("PORTFOLIO_OS_CLOCK_INTERVAL_MS", "250");
        let config = ConfigLoader::finish(ConfigLoader::with_environment(Config::builder()));
        std::env::remove_var("PORTFOLIO_OS_CLOCK_INTERVAL_MS");
        assert_eq!(config.unwrap().clock_interval_ms, 250);
    }
}
