//! Error types for the entity fetch layer

use std::io;
use thiserror::Error;

/// Result type alias for fetch operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while fetching entities
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure: connect, TLS, timeout
    #[error("HTTP request to {endpoint} failed: {source}")]
    Request {
        /// Endpoint path
        endpoint: String,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx answer
    #[error("Backend returned status {code} for {endpoint}")]
    Status {
        /// Endpoint path
        endpoint: String,
        /// HTTP status code
        code: u16,
    },

    /// 2xx answer with `success: false`
    #[error("Backend reported failure for {endpoint}: {message}")]
    Backend {
        /// Endpoint path
        endpoint: String,
        /// Backend message, empty when none was sent
        message: String,
    },

    /// Body did not match the expected shape
    #[error("Failed to decode {endpoint} payload: {source}")]
    Decode {
        /// Endpoint path
        endpoint: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Source has nothing for this endpoint
    #[error("No data available for {endpoint}")]
    NoData {
        /// Endpoint path
        endpoint: String,
    },

    /// Reading or writing the token file failed
    #[error("Token storage error: {0}")]
    Token(#[from] io::Error),

    /// Client could not be built from configuration
    #[error("Invalid client configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Wrap a JSON error with the endpoint it came from
    pub(crate) fn decode(endpoint: &str, source: serde_json::Error) -> Self {
        Self::Decode {
            endpoint: endpoint.to_string(),
            source,
        }
    }
}

impl From<ClientError> for staycrm_core::Error {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Request { endpoint, source } => {
                Self::Http(format!("{endpoint}: {source}"))
            }
            ClientError::Status { endpoint, code } => Self::Status { endpoint, code },
            ClientError::Backend { endpoint, message } => Self::Backend { endpoint, message },
            ClientError::Decode { source, .. } => Self::Serialization(source),
            ClientError::NoData { endpoint } => Self::NotFound { resource: endpoint },
            ClientError::Token(source) => Self::Io(source),
            ClientError::Configuration(message) => Self::Configuration { message },
        }
    }
}
