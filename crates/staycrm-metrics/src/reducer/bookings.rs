//! Booking revenue and occupancy

use super::{MetricsParams, mean};
use staycrm_core::Booking;
use std::collections::BTreeSet;

/// Sum of `total_amount`
#[must_use]
pub fn total_revenue(bookings: &[Booking]) -> f64 {
    bookings.iter().map(|b| b.total_amount).sum()
}

/// Mean `total_amount`; `0` for no bookings
#[must_use]
pub fn average_booking_value(bookings: &[Booking]) -> f64 {
    mean(total_revenue(bookings), bookings.len())
}

/// Distinct guests by trimmed, lower-cased email
///
/// Bookings without an email are not counted.
#[must_use]
pub fn unique_customers(bookings: &[Booking]) -> usize {
    bookings
        .iter()
        .map(|b| normalize_email(&b.guest_email))
        .filter(|email| !email.is_empty())
        .collect::<BTreeSet<_>>()
        .len()
}

/// Booked nights as a share of `occupancy_days * assumed_room_count`
///
/// A flat inventory approximation; `0` when the inventory is zero.
#[must_use]
pub fn occupancy_rate(bookings: &[Booking], params: &MetricsParams) -> f64 {
    let capacity = u64::from(params.occupancy_days) * u64::from(params.assumed_room_count);
    if capacity == 0 {
        return 0.0;
    }
    let nights: u64 = bookings.iter().map(|b| u64::from(b.nights)).sum();
    nights as f64 / capacity as f64 * 100.0
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
