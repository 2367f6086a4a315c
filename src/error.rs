// Host-level error type.
//
// Window and filesystem operations are total and never produce these; they
// only surface from startup (tree validation, configuration, logging) and the
// Tauri command layer.

use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Invalid filesystem tree: {0}")]
    InvalidTree(String),

    #[error("Unknown application id: {0}")]
    UnknownApp(String),

    #[error("Shell state lock poisoned: {0}")]
    StatePoisoned(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Logging error: {0}")]
    Logging(String),

    #[cfg(feature = "desktop")]
    #[error("Tauri error: {0}")]
    Tauri(#[from] tauri::Error),
}

// Tauri commands hand errors to the frontend as plain strings.
impl Serialize for ShellError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for ShellError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        ShellError::StatePoisoned(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_display_string() {
        let err = ShellError::UnknownApp("browser".to_string());
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "\"Unknown application id: browser\"");
    }
}
