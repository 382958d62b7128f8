//! Hour-of-day call histogram

use super::{mean, ratio_percent};
use chrono::{TimeZone, Timelike};
use serde::Serialize;
use staycrm_core::CallRecord;

/// Calls placed during one hour of the day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourBucket {
    /// Hour of day, 0-23
    pub hour: u32,
    /// Display label, e.g. `09:00`
    pub label: String,
    /// Calls in this hour
    pub count: usize,
    /// Of those, connected
    pub connected: usize,
    /// `connected / count * 100`
    pub success_rate: f64,
    /// Mean talk time of connected calls, seconds
    pub average_duration: f64,
}

/// Exactly 24 buckets, hour 0 first, with hours taken in `tz`
///
/// Hours without calls report zeros.
#[must_use]
pub fn hourly_call_volume<Tz: TimeZone>(calls: &[CallRecord], tz: &Tz) -> Vec<HourBucket> {
    let mut tally = [(0_usize, 0_usize, 0.0_f64); 24];
    for call in calls {
        let hour = call.date.with_timezone(tz).hour() as usize;
        if let Some((count, connected, duration_sum)) = tally.get_mut(hour) {
            *count += 1;
            if call.is_connected() {
                *connected += 1;
                *duration_sum += f64::from(call.duration);
            }
        }
    }

    (0_u32..)
        .zip(tally)
        .map(|(hour, (count, connected, duration_sum))| HourBucket {
            hour,
            label: format!("{hour:02}:00"),
            count,
            connected,
            success_rate: ratio_percent(connected, count),
            average_duration: mean(duration_sum, connected),
        })
        .collect()
}
