//! Error types for the event service client

use thiserror::Error;

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Message shown for any failure that has no more specific wording
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Errors that can occur while talking to the event service
///
/// The variants exist for logging. Anything shown to a user goes through
/// [`ClientError::user_message`], which keeps the service's coarse wording.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level failure (connection refused, timeout, TLS)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Service returned {status} for {endpoint}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Endpoint path that failed
        endpoint: String,
    },

    /// Response body could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Credentials were refused
    #[error("Authentication failed: {message}")]
    Authentication {
        /// Message reported by the service
        message: String,
    },

    /// Input rejected before any request was made
    #[error("Validation error: {field} - {message}")]
    Validation {
        /// Offending field
        field: String,
        /// Error message
        message: String,
    },

    /// Client could not be constructed
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Error message
        message: String,
    },
}

impl ClientError {
    /// Create a status error
    pub fn status(status: reqwest::StatusCode, endpoint: impl Into<String>) -> Self {
        Self::Status {
            status: status.as_u16(),
            endpoint: endpoint.into(),
        }
    }

    /// Create an authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Message suitable for display next to the triggering form
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Authentication { message } | Self::Validation { message, .. } => message.clone(),
            Self::Http(_) | Self::Status { .. } | Self::Json(_) | Self::Configuration { .. } => {
                GENERIC_FAILURE.to_string()
            }
        }
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        campus_events_core::Error::from(errors).into()
    }
}

impl From<campus_events_core::Error> for ClientError {
    fn from(error: campus_events_core::Error) -> Self {
        match error {
            campus_events_core::Error::Validation { field, message } => {
                Self::Validation { field, message }
            }
            campus_events_core::Error::Serialization(err) => Self::Json(err),
            campus_events_core::Error::Configuration { message } => {
                Self::Configuration { message }
            }
        }
    }
}
