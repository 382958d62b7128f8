//! Lead performance per acquisition channel

use super::bookings::normalize_email;
use super::ratio_percent;
use serde::Serialize;
use staycrm_core::{Booking, Lead, LeadSource, LeadStatus};
use std::collections::HashMap;

/// One acquisition channel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceRow {
    /// Channel
    pub source: LeadSource,
    /// Leads from this channel
    pub leads: usize,
    /// Of those, converted
    pub converted: usize,
    /// `converted / leads * 100`
    pub conversion_rate: f64,
    /// Booking revenue attributed to converted leads
    pub revenue: f64,
}

/// One row per [`LeadSource`] in declaration order, empty channels included
///
/// Revenue is attributed by matching a converted lead's email against the
/// first booking with the same guest email. Leads and bookings share no key,
/// so this is a best-effort join: a guest with several bookings only counts
/// the first, and a lead without a matching booking counts nothing.
#[must_use]
pub fn lead_source_breakdown(leads: &[Lead], bookings: &[Booking]) -> Vec<SourceRow> {
    let mut first_booking: HashMap<String, f64> = HashMap::new();
    for booking in bookings {
        let email = normalize_email(&booking.guest_email);
        if !email.is_empty() {
            first_booking.entry(email).or_insert(booking.total_amount);
        }
    }

    LeadSource::ALL
        .iter()
        .map(|source| {
            let group: Vec<&Lead> = leads.iter().filter(|l| l.source == *source).collect();
            let converted: Vec<&&Lead> = group
                .iter()
                .filter(|l| l.status == LeadStatus::Converted)
                .collect();
            let revenue: f64 = converted
                .iter()
                .filter_map(|l| first_booking.get(&normalize_email(&l.email)))
                .sum();

            SourceRow {
                source: *source,
                leads: group.len(),
                converted: converted.len(),
                conversion_rate: ratio_percent(converted.len(), group.len()),
                revenue,
            }
        })
        .collect()
}
