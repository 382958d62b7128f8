//! Calendar-month time series

use super::ratio_percent;
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use staycrm_core::{Booking, CallRecord, Lead, LeadStatus};

/// Activity within one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBucket {
    /// Calendar year
    pub year: i32,
    /// Calendar month, 1-12
    pub month: u32,
    /// Display label, e.g. `Mar 2026`
    pub label: String,
    /// Booking revenue created this month
    pub revenue: f64,
    /// Bookings created this month
    pub bookings: usize,
    /// Leads created this month
    pub leads: usize,
    /// Leads created this month that are now converted
    pub converted: usize,
    /// `converted / leads * 100`
    pub conversion_rate: f64,
    /// Calls placed this month
    pub calls: usize,
}

impl MonthBucket {
    fn empty(year: i32, month: u32) -> Self {
        let label = NaiveDate::from_ymd_opt(year, month, 1)
            .map_or_else(|| format!("{month:02}/{year}"), |d| d.format("%b %Y").to_string());
        Self {
            year,
            month,
            label,
            revenue: 0.0,
            bookings: 0,
            leads: 0,
            converted: 0,
            conversion_rate: 0.0,
            calls: 0,
        }
    }
}

/// The last `months` calendar months up to and including the month of `now`
///
/// Oldest first. Each bucket spans `[month start, next month start)` in the
/// time zone of `now`; entities dated outside the window are dropped.
#[must_use]
pub fn monthly_series<Tz: TimeZone>(
    leads: &[Lead],
    calls: &[CallRecord],
    bookings: &[Booking],
    now: &DateTime<Tz>,
    months: u32,
) -> Vec<MonthBucket> {
    let tz = now.timezone();
    let mut buckets: Vec<MonthBucket> = (0..months)
        .rev()
        .map(|back| {
            let (year, month) = shift_month(now.year(), now.month(), back);
            MonthBucket::empty(year, month)
        })
        .collect();

    let slot = |date: &DateTime<Utc>| {
        let local = date.with_timezone(&tz);
        let key = (local.year(), local.month());
        buckets.iter().position(|b| (b.year, b.month) == key)
    };

    let booking_slots: Vec<_> = bookings.iter().map(|b| slot(&b.created_date)).collect();
    let lead_slots: Vec<_> = leads.iter().map(|l| slot(&l.created_date)).collect();
    let call_slots: Vec<_> = calls.iter().map(|c| slot(&c.date)).collect();

    for (booking, idx) in bookings.iter().zip(booking_slots) {
        if let Some(bucket) = idx.and_then(|i| buckets.get_mut(i)) {
            bucket.revenue += booking.total_amount;
            bucket.bookings += 1;
        }
    }
    for (lead, idx) in leads.iter().zip(lead_slots) {
        if let Some(bucket) = idx.and_then(|i| buckets.get_mut(i)) {
            bucket.leads += 1;
            if lead.status == LeadStatus::Converted {
                bucket.converted += 1;
            }
        }
    }
    for idx in call_slots.into_iter().flatten() {
        if let Some(bucket) = buckets.get_mut(idx) {
            bucket.calls += 1;
        }
    }

    for bucket in &mut buckets {
        bucket.conversion_rate = ratio_percent(bucket.converted, bucket.leads);
    }
    buckets
}

/// `(year, month)` that lies `back` months before the given one
fn shift_month(year: i32, month: u32, back: u32) -> (i32, u32) {
    let index = i64::from(year) * 12 + i64::from(month) - 1 - i64::from(back);
    let year = i32::try_from(index.div_euclid(12)).unwrap_or(year);
    let month = u32::try_from(index.rem_euclid(12)).unwrap_or(0) + 1;
    (year, month)
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::indexing_slicing, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fixtures::{at, booking, call, lead};
    use chrono::FixedOffset;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;
    use staycrm_core::{CallStatus, LeadSource};

    #[rstest]
    #[case(2026, 10, 0, (2026, 10))]
    #[case(2026, 10, 5, (2026, 5))]
    #[case(2026, 3, 5, (2025, 10))]
    #[case(2026, 1, 1, (2025, 12))]
    #[case(2026, 1, 24, (2024, 1))]
    fn test_shift_month(
        #[case] year: i32,
        #[case] month: u32,
        #[case] back: u32,
        #[case] expected: (i32, u32),
    ) {
        assert_eq!(shift_month(year, month, back), expected);
    }

    #[test]
    fn test_buckets_oldest_first_with_labels() {
        let now = at(2026, 3, 15, 12);
        let series = monthly_series(&[], &[], &[], &now, 6);

        let labels: Vec<_> = series.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Oct 2025", "Nov 2025", "Dec 2025", "Jan 2026", "Feb 2026", "Mar 2026"]
        );
        assert!(series.iter().all(|b| b.revenue == 0.0 && b.conversion_rate == 0.0));
    }

    #[test]
    fn test_entities_land_in_their_month() {
        let now = at(2026, 10, 18, 12);
        let bookings = vec![
            booking("a", 10_000.0, 2, at(2026, 10, 1, 0)),
            booking("b", 5_000.0, 1, at(2026, 9, 30, 23)),
            booking("old", 99_000.0, 1, at(2026, 4, 30, 23)),
        ];
        let mut converted = lead("l1", LeadSource::Web, LeadStatus::Converted);
        converted.created_date = at(2026, 9, 10, 9);
        let mut fresh = lead("l2", LeadSource::Web, LeadStatus::New);
        fresh.created_date = at(2026, 9, 11, 9);
        let calls = vec![call("c", CallStatus::Missed, 0, at(2026, 5, 1, 0))];

        let series = monthly_series(&[converted, fresh], &calls, &bookings, &now, 6);

        assert_eq!(series[0].label, "May 2026");
        assert_eq!(series[0].calls, 1);
        assert_eq!(series[4].revenue, 5_000.0);
        assert_eq!(series[4].leads, 2);
        assert_eq!(series[4].converted, 1);
        assert_eq!(series[4].conversion_rate, 50.0);
        assert_eq!(series[5].revenue, 10_000.0);
        assert_eq!(series.iter().map(|b| b.bookings).sum::<usize>(), 2);
    }

    #[test]
    fn test_future_dated_entities_are_dropped() {
        let now = at(2026, 10, 18, 12);
        let bookings = vec![
            booking("now", 4_000.0, 1, at(2026, 10, 17, 9)),
            booking("next", 20_000.0, 3, at(2026, 11, 2, 9)),
            booking("next-year", 30_000.0, 2, at(2027, 10, 5, 9)),
        ];
        let mut early = lead("l1", LeadSource::Web, LeadStatus::Converted);
        early.created_date = at(2026, 12, 1, 9);
        let calls = vec![call("c", CallStatus::Connected, 60, at(2026, 11, 1, 0))];

        let series = monthly_series(&[early], &calls, &bookings, &now, 6);

        assert_eq!(series[5].label, "Oct 2026");
        assert_eq!(series[5].revenue, 4_000.0);
        assert_eq!(series.iter().map(|b| b.bookings).sum::<usize>(), 1);
        assert_eq!(series.iter().map(|b| b.leads + b.calls).sum::<usize>(), 0);
    }

    #[test]
    fn test_month_boundary_follows_time_zone() {
        // 20:00 UTC on Sep 30 is already Oct 1 in India
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let now = at(2026, 10, 18, 12).with_timezone(&ist);
        let bookings = vec![booking("a", 1_000.0, 1, at(2026, 9, 30, 20))];

        let series = monthly_series(&[], &[], &bookings, &now, 2);

        assert_eq!(series[0].revenue, 0.0);
        assert_eq!(series[1].revenue, 1_000.0);
    }

    proptest! {
        #[test]
        fn prop_revenue_is_exhaustive_over_window(
            entries in prop::collection::vec((0u32..12, 1u32..28, 0u32..50_000), 0..60)
        ) {
            let now = at(2026, 10, 18, 12);
            let bookings: Vec<Booking> = entries
                .iter()
                .enumerate()
                .map(|(i, (back, day, amount))| {
                    let (year, month) = shift_month(2026, 10, *back);
                    booking(&i.to_string(), f64::from(*amount), 1, at(year, month, *day, 10))
                })
                .collect();

            let series = monthly_series(&[], &[], &bookings, &now, 6);
            let bucketed: f64 = series.iter().map(|b| b.revenue).sum();
            let in_window: f64 = entries
                .iter()
                .filter(|(back, _, _)| *back < 6)
                .map(|(_, _, amount)| f64::from(*amount))
                .sum();

            prop_assert_eq!(series.len(), 6);
            prop_assert!((bucketed - in_window).abs() < 1e-6);
        }
    }
}
