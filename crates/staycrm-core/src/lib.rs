//! Core types and utilities for the StayCRM analytics toolkit

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{Config, LoggingConfig, MetricsConfig};
pub use error::{Error, Result};
pub use types::{
    ApiResponse, Booking, BookingStatus, CallRecord, CallStatus, CallType, DashboardStats, Lead,
    LeadSource, LeadStatus, PageQuery, PaginationInfo, User,
};

use tracing_appender::non_blocking::WorkerGuard;

/// Initialize the logging system
///
/// `RUST_LOG` overrides the configured level. When `logging.file` is set,
/// output goes to that file through a non-blocking writer; keep the returned
/// guard alive until shutdown so buffered lines are flushed.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a global subscriber
/// is already installed.
pub fn init_logging(logging: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .map_err(|e| Error::Configuration {
            message: format!("invalid log level '{}': {e}", logging.level),
        })?;

    let (writer, guard) = match &logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            (fmt::writer::BoxMakeWriter::new(writer), Some(guard))
        }
        None => (fmt::writer::BoxMakeWriter::new(std::io::stderr), None),
    };

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if logging.format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_writer(writer))
            .try_init()
    } else {
        registry
            .with(fmt::layer().pretty().with_writer(writer))
            .try_init()
    };

    installed.map_err(|e| Error::Other(format!("logging already initialised: {e}")))?;
    Ok(guard)
}
