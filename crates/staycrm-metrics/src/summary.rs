//! One-pass dashboard fold over a snapshot

use crate::reducer::{
    self, CallOutcomes, CityBucket, HourBucket, MetricsParams, MonthBucket, SourceRow,
};
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use staycrm_core::{Booking, CallRecord, DashboardStats, Lead, LeadStatus};
use tracing::debug;

/// Borrowed entity slices to summarise
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryInput<'a> {
    /// Leads
    pub leads: &'a [Lead],
    /// Call log
    pub calls: &'a [CallRecord],
    /// Bookings
    pub bookings: &'a [Booking],
    /// Backend aggregates, when available
    pub stats: Option<&'a DashboardStats>,
}

/// Headline figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    /// Lead count; backend total when known
    pub total_leads: u64,
    /// Booking count; backend total when known
    pub total_bookings: u64,
    /// Call count; backend total when known
    pub total_calls: u64,
    /// Booking revenue; backend total when known
    pub total_revenue: f64,
    /// Leads marked hot
    pub hot_leads: usize,
    /// Converted share of leads, percent
    pub conversion_rate: f64,
    /// Mean booking amount
    pub average_booking_value: f64,
    /// Distinct guest emails
    pub unique_customers: usize,
    /// Mean connected talk time, seconds
    pub average_call_duration: f64,
    /// Mean hours from lead creation to last contact
    pub average_response_hours: f64,
    /// Booked nights over assumed inventory, percent
    pub occupancy_rate: f64,
    /// Connected share of calls, percent
    pub connect_rate: f64,
    /// Backend-reported lead growth, percent
    pub lead_growth: f64,
    /// Backend-reported booking growth, percent
    pub booking_growth: f64,
    /// Backend-reported revenue growth, percent
    pub revenue_growth: f64,
    /// Backend-reported call growth, percent
    pub call_growth: f64,
}

/// Everything the dashboard shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// When the fold ran
    pub generated_at: DateTime<Utc>,
    /// Headline figures
    pub kpis: Kpis,
    /// Leads per pipeline stage
    pub lead_status: Vec<(LeadStatus, usize)>,
    /// Call outcome tallies
    pub call_outcomes: CallOutcomes,
    /// Trailing calendar months, oldest first
    pub monthly: Vec<MonthBucket>,
    /// Revenue per city, highest first
    pub cities: Vec<CityBucket>,
    /// Per acquisition channel
    pub sources: Vec<SourceRow>,
    /// 24 hour-of-day buckets
    pub hourly: Vec<HourBucket>,
}

impl DashboardSummary {
    /// Fold `input` into a summary as of `now`
    ///
    /// Calendar months and hours of day are taken in the time zone of `now`.
    #[must_use]
    pub fn compute<Tz: TimeZone>(
        input: &SummaryInput<'_>,
        params: &MetricsParams,
        now: &DateTime<Tz>,
    ) -> Self {
        let SummaryInput {
            leads,
            calls,
            bookings,
            stats,
        } = *input;

        debug!(
            leads = leads.len(),
            calls = calls.len(),
            bookings = bookings.len(),
            backend_stats = stats.is_some(),
            "Computing dashboard summary"
        );

        let call_outcomes = reducer::call_outcomes(calls);
        let kpis = Kpis {
            total_leads: stats
                .and_then(|s| s.total_leads)
                .unwrap_or(leads.len() as u64),
            total_bookings: stats
                .and_then(|s| s.total_bookings)
                .unwrap_or(bookings.len() as u64),
            total_calls: stats
                .and_then(|s| s.total_calls)
                .unwrap_or(calls.len() as u64),
            total_revenue: stats
                .and_then(|s| s.total_revenue)
                .unwrap_or_else(|| reducer::total_revenue(bookings)),
            hot_leads: reducer::hot_leads(leads),
            conversion_rate: reducer::conversion_rate(leads),
            average_booking_value: reducer::average_booking_value(bookings),
            unique_customers: reducer::unique_customers(bookings),
            average_call_duration: reducer::average_call_duration(calls),
            average_response_hours: reducer::average_response_time_hours(leads),
            occupancy_rate: reducer::occupancy_rate(bookings, params),
            connect_rate: call_outcomes.connect_rate,
            lead_growth: stats.map_or(0.0, |s| s.lead_growth),
            booking_growth: stats.map_or(0.0, |s| s.booking_growth),
            revenue_growth: stats.map_or(0.0, |s| s.revenue_growth),
            call_growth: stats.map_or(0.0, |s| s.call_growth),
        };

        Self {
            generated_at: now.with_timezone(&Utc),
            kpis,
            lead_status: reducer::lead_status_counts(leads),
            call_outcomes,
            monthly: reducer::monthly_series(leads, calls, bookings, now, params.months),
            cities: reducer::city_performance(bookings, &params.known_cities),
            sources: reducer::lead_source_breakdown(leads, bookings),
            hourly: reducer::hourly_call_volume(calls, &now.timezone()),
        }
    }
}
