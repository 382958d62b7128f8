//! Revenue by city, derived from property names

use super::mean;
use serde::Serialize;
use staycrm_core::Booking;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Bucket for bookings whose property names no known city
pub const OTHER_CITY: &str = "Other";

/// Aggregates for one city
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityBucket {
    /// City name as configured, or [`OTHER_CITY`]
    pub city: String,
    /// Number of bookings
    pub bookings: usize,
    /// Sum of `total_amount`
    pub revenue: f64,
    /// Sum of nights
    pub nights: u64,
    /// `revenue / bookings`
    pub average_booking_value: f64,
}

/// First known city contained in `property_name`, ignoring case
///
/// Falls back to [`OTHER_CITY`].
#[must_use]
pub fn classify_city<'a>(property_name: &str, known_cities: &'a [String]) -> &'a str {
    let haystack = property_name.to_lowercase();
    known_cities
        .iter()
        .find(|city| !city.is_empty() && haystack.contains(&city.to_lowercase()))
        .map_or(OTHER_CITY, String::as_str)
}

/// Bookings grouped by [`classify_city`], highest revenue first
///
/// Cities without bookings are omitted. Equal revenue orders by name.
#[must_use]
pub fn city_performance(bookings: &[Booking], known_cities: &[String]) -> Vec<CityBucket> {
    let mut grouped: BTreeMap<&str, (usize, f64, u64)> = BTreeMap::new();
    for booking in bookings {
        let entry = grouped
            .entry(classify_city(&booking.property_name, known_cities))
            .or_default();
        entry.0 += 1;
        entry.1 += booking.total_amount;
        entry.2 += u64::from(booking.nights);
    }

    let mut buckets: Vec<CityBucket> = grouped
        .into_iter()
        .map(|(city, (count, revenue, nights))| CityBucket {
            city: city.to_string(),
            bookings: count,
            revenue,
            nights,
            average_booking_value: mean(revenue, count),
        })
        .collect();

    buckets.sort_by(|a, b| {
        b.revenue
            .partial_cmp(&a.revenue)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.city.cmp(&b.city))
    });
    buckets
}
