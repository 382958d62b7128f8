//! Pure folds from entity slices to aggregate views
//!
//! Nothing in here performs I/O or mutates its inputs. Every rate goes
//! through [`ratio_percent`] and every mean through [`mean`], so an empty
//! denominator yields `0.0` instead of `NaN`.

pub mod bookings;
pub mod calls;
pub mod cities;
pub mod hourly;
pub mod leads;
pub mod monthly;
pub mod sources;

use serde::Serialize;
use staycrm_core::MetricsConfig;

pub use bookings::{average_booking_value, occupancy_rate, total_revenue, unique_customers};
pub use calls::{CallOutcomes, average_call_duration, call_outcomes};
pub use cities::{CityBucket, OTHER_CITY, city_performance, classify_city};
pub use hourly::{HourBucket, hourly_call_volume};
pub use leads::{
    average_response_time_hours, conversion_rate, converted_leads, hot_leads, lead_status_counts,
};
pub use monthly::{MonthBucket, monthly_series};
pub use sources::{SourceRow, lead_source_breakdown};

/// `part / whole * 100`, or `0.0` when `whole` is zero
#[must_use]
pub fn ratio_percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// `sum / count`, or `0.0` when `count` is zero
#[must_use]
pub fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Tunables for the reducer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsParams {
    /// Room inventory assumed by [`occupancy_rate`]
    pub assumed_room_count: u32,
    /// Days in the occupancy window
    pub occupancy_days: u32,
    /// Calendar months in [`monthly_series`]
    pub months: u32,
    /// Cities recognised by [`classify_city`]
    pub known_cities: Vec<String>,
}

impl Default for MetricsParams {
    fn default() -> Self {
        Self::from(&MetricsConfig::default())
    }
}

impl From<&MetricsConfig> for MetricsParams {
    fn from(config: &MetricsConfig) -> Self {
        Self {
            assumed_room_count: config.assumed_room_count,
            occupancy_days: config.occupancy_days,
            months: config.months,
            known_cities: config.known_cities.clone(),
        }
    }
}
