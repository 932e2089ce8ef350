//! Error types for the Apex Home connector

use thiserror::Error;

/// Connector error types
#[derive(Error, Debug)]
pub enum ApexHomeError {
    #[error("The operation \"{operation}\" is not supported for resource \"{resource}\"")]
    UnsupportedOperation { resource: String, operation: String },

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    #[error("Request failed{}: {message}", status_suffix(.status))]
    TransportFailure { status: Option<u16>, message: String },

    #[error("Failed to decode response: {0}")]
    ResponseDecodeFailure(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Invalid event catalog: {0}")]
    InvalidCatalog(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApexHomeError {
    pub fn unsupported(resource: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            resource: resource.into(),
            operation: operation.into(),
        }
    }

    pub fn invalid_parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::TransportFailure {
            status,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ApexHomeError {
    fn from(err: reqwest::Error) -> Self {
        Self::TransportFailure {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" with status {code}"),
        None => String::new(),
    }
}

/// Error that aborted a batch, tagged with the index of the failing item.
#[derive(Error, Debug)]
#[error("Item {index}: {source}")]
pub struct ItemError {
    pub index: usize,
    #[source]
    pub source: ApexHomeError,
}

/// Result type alias for connector operations
pub type Result<T> = std::result::Result<T, ApexHomeError>;
