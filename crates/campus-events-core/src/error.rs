//! Error types for the campus events client

use std::{error::Error as StdError, fmt};

/// Main error type for configuration and data handling
#[derive(Debug)]
pub enum Error {
    /// Configuration error
    Configuration {
        /// Error message
        message: String,
    },

    /// Validation error
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// Serialization error
    Serialization(serde_json::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration { message } => write!(f, "Configuration error: {message}"),
            Self::Validation { field, message } => {
                write!(f, "Validation error: {field} - {message}")
            }
            Self::Serialization(err) => write!(f, "Serialization error: {err}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Serialization(err) => Some(err),
            Self::Configuration { .. } | Self::Validation { .. } => None,
        }
    }
}

// From implementations for automatic conversions
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration {
            message: err.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Report the alphabetically first field so messages are stable
        let fields = errors.field_errors();
        let first = fields.iter().min_by(|(a, _), (b, _)| a.cmp(b));

        match first {
            Some((field, failures)) => Self::Validation {
                field: field.to_string(),
                message: failures
                    .first()
                    .and_then(|failure| failure.message.as_ref())
                    .map_or_else(|| errors.to_string(), ToString::to_string),
            },
            None => Self::Validation {
                field: String::new(),
                message: errors.to_string(),
            },
        }
    }
}
