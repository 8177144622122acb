use thiserror::Error;

/// Unified error type for update-notifier operations
#[derive(Error, Debug)]
pub enum UpdateNotifierError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience type alias for Results in update-notifier
pub type Result<T> = std::result::Result<T, UpdateNotifierError>;

impl UpdateNotifierError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        UpdateNotifierError::Config(msg.into())
    }

    /// Create a storage error with context
    pub fn storage(msg: impl Into<String>) -> Self {
        UpdateNotifierError::Storage(msg.into())
    }

    /// Create a settings error with context
    pub fn settings(msg: impl Into<String>) -> Self {
        UpdateNotifierError::Settings(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = UpdateNotifierError::config("bad interval");
        assert_eq!(err.to_string(), "Configuration error: bad interval");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: UpdateNotifierError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: UpdateNotifierError = json_err.into();
        assert!(err.to_string().starts_with("JSON error"));
    }

    #[test]
    fn test_error_from_toml() {
        let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: UpdateNotifierError = toml_err.into();
        assert!(err.to_string().starts_with("TOML error"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (UpdateNotifierError::config("x"), "Configuration error"),
            (UpdateNotifierError::storage("x"), "Storage error"),
            (UpdateNotifierError::settings("x"), "Settings error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_error_empty_messages() {
        for err in [
            UpdateNotifierError::config(""),
            UpdateNotifierError::storage(""),
            UpdateNotifierError::settings(""),
        ] {
            // Even with empty message, the error type prefix should be present
            assert!(!err.to_string().is_empty());
        }
    }
}
