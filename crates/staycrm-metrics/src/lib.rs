//! Dashboard metrics for StayCRM entities
//!
//! [`reducer`] folds lead, call and booking slices into rates, series and
//! breakdowns; [`DashboardSummary`] runs the whole fold once. [`format`] and
//! [`DashboardView`] turn the numbers into display strings, and [`export`]
//! writes the call history as CSV.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod export;
pub mod format;
pub mod reducer;
pub mod summary;
pub mod view;

#[cfg(test)]
mod fixtures;

pub use export::{CALL_HISTORY_HEADER, export_call_history, write_call_history};
pub use reducer::MetricsParams;
pub use summary::{DashboardSummary, Kpis, SummaryInput};
pub use view::{DashboardView, ViewRow, ViewSection};
