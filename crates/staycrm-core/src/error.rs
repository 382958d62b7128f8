//! Error types for the StayCRM analytics toolkit

use std::{error::Error as StdError, fmt};

/// Main error type for the StayCRM analytics toolkit
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(std::io::Error),

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

    /// Transport-level HTTP failure (connect, timeout, TLS)
    Http(String),

    /// Backend answered with a non-success HTTP status
    Status {
        /// Endpoint path that was requested
        endpoint: String,
        /// HTTP status code
        code: u16,
    },

    /// Backend answered 2xx but flagged the payload as unsuccessful
    Backend {
        /// Endpoint path that was requested
        endpoint: String,
        /// Message supplied by the backend, if any
        message: String,
    },

    /// Serialization error
    Serialization(serde_json::Error),

    /// Export error
    Export(String),

    /// Not found error
    NotFound {
        /// Resource that was not found
        resource: String,
    },

    /// Other error
    Other(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Configuration { message } => write!(f, "Configuration error: {message}"),
            Self::Validation { field, message } => {
                write!(f, "Validation error: {field} - {message}")
            }
            Self::Http(msg) => write!(f, "HTTP error: {msg}"),
            Self::Status { endpoint, code } => {
                write!(f, "Backend returned status {code} for {endpoint}")
            }
            Self::Backend { endpoint, message } => {
                write!(f, "Backend reported failure for {endpoint}: {message}")
            }
            Self::Serialization(err) => write!(f, "Serialization error: {err}"),
            Self::Export(msg) => write!(f, "Export error: {msg}"),
            Self::NotFound { resource } => write!(f, "Resource not found: {resource}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

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

impl Error {
    /// Whether the error came from the remote backend rather than local I/O.
    ///
    /// Remote failures are the ones the fetch layer answers with mock data.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Status { .. } | Self::Backend { .. } | Self::Serialization(_)
        )
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::panic,
    clippy::uninlined_format_args,
    clippy::match_same_arms
)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io;

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "token file missing");
        let app_error = Error::from(io_error);

        match app_error {
            Error::Io(_) => {}
            _ => panic!("Expected Io error variant"),
        }

        assert!(format!("{}", app_error).contains("I/O error"));
        assert!(app_error.source().is_some());
        assert!(!app_error.is_remote());
    }

    #[test]
    fn test_status_error_display() {
        let error = Error::Status {
            endpoint: "/booking/getallbooking".to_string(),
            code: 503,
        };

        assert_eq!(
            error.to_string(),
            "Backend returned status 503 for /booking/getallbooking"
        );
        assert!(error.is_remote());
    }

    #[test]
    fn test_backend_error_display() {
        let error = Error::Backend {
            endpoint: "/enquiry/getenquiries".to_string(),
            message: "session expired".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Backend reported failure for /enquiry/getenquiries: session expired"
        );
    }

    #[test]
    fn test_serialization_error_is_remote() {
        let json_error = serde_json::from_str::<serde_json::Value>("{broken").unwrap_err();
        let app_error = Error::from(json_error);

        assert!(app_error.to_string().starts_with("Serialization error"));
        assert!(app_error.is_remote());
        assert!(app_error.source().is_some());
    }

    #[test]
    fn test_local_errors_are_not_remote() {
        let errors = vec![
            Error::Configuration {
                message: "bad".to_string(),
            },
            Error::Validation {
                field: "limit".to_string(),
                message: "must be positive".to_string(),
            },
            Error::Export("disk full".to_string()),
            Error::NotFound {
                resource: "token".to_string(),
            },
            Error::Other("misc".to_string()),
        ];

        for error in errors {
            assert!(!error.is_remote(), "{error} should be local");
            assert!(error.source().is_none());
        }
    }

    #[test]
    fn test_validation_error_display() {
        let error = Error::Validation {
            field: "metrics.months".to_string(),
            message: "must be between 1 and 24".to_string(),
        };

        assert_eq!(
            format!("{}", error),
            "Validation error: metrics.months - must be between 1 and 24"
        );
    }
}
