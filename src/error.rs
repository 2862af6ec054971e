//! Error types and handling for the surfcast service

use thiserror::Error;

/// Main error type for the surfcast service
#[derive(Error, Debug)]
pub enum SurfcastError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Forecast provider communication errors
    #[error("Provider error: {message}")]
    Provider { message: String },

    /// Malformed numeric input, typically coordinates that fail to parse
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Persistent store errors
    #[error("Store error: {message}")]
    Store { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl SurfcastError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new provider error
    pub fn provider<S: Into<String>>(message: S) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new store error
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SurfcastError::Config { .. } => {
                "Configuration error. Please check your config file and API key.".to_string()
            }
            SurfcastError::Provider { .. } => {
                "Unable to reach the marine forecast provider. Please check your internet connection."
                    .to_string()
            }
            SurfcastError::Parse { message } => {
                format!("Malformed coordinate data: {message}")
            }
            SurfcastError::Store { .. } => {
                "Store operation failed. The data directory may be unavailable.".to_string()
            }
            SurfcastError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            SurfcastError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = SurfcastError::config("missing API key");
        assert!(matches!(config_err, SurfcastError::Config { .. }));

        let provider_err = SurfcastError::provider("connection failed");
        assert!(matches!(provider_err, SurfcastError::Provider { .. }));

        let parse_err = SurfcastError::parse("bad latitude");
        assert!(matches!(parse_err, SurfcastError::Parse { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = SurfcastError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let provider_err = SurfcastError::provider("test");
        assert!(provider_err.user_message().contains("Unable to reach"));

        let validation_err = SurfcastError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let surf_err: SurfcastError = io_err.into();
        assert!(matches!(surf_err, SurfcastError::Io { .. }));
    }
}
