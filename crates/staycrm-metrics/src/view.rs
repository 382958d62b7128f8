//! Labelled display rows for a dashboard summary

use crate::format::{
    format_currency_compact, format_duration_short, format_growth, format_hours, format_inr,
    format_lakhs, format_percent,
};
use crate::summary::DashboardSummary;
use serde::Serialize;
use std::fmt;

/// One `label: value` line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewRow {
    /// Left column
    pub label: String,
    /// Formatted value
    pub value: String,
}

/// A titled group of rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSection {
    /// Heading
    pub title: String,
    /// Rows in display order
    pub rows: Vec<ViewRow>,
}

impl ViewSection {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            rows: Vec::new(),
        }
    }

    fn row(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.rows.push(ViewRow {
            label: label.into(),
            value: value.into(),
        });
        self
    }
}

/// Fully formatted dashboard, ready to print
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    /// Shown above the table when set, e.g. a sample-data warning
    pub notice: Option<String>,
    /// Sections in display order
    pub sections: Vec<ViewSection>,
}

impl DashboardView {
    /// Format every figure of `summary`
    #[must_use]
    pub fn from_summary(summary: &DashboardSummary) -> Self {
        let k = &summary.kpis;

        let overview = ViewSection::new("Overview")
            .row("Total revenue", format_currency_compact(k.total_revenue))
            .row("Revenue growth", format_growth(k.revenue_growth))
            .row("Total leads", k.total_leads.to_string())
            .row("Lead growth", format_growth(k.lead_growth))
            .row("Hot leads", k.hot_leads.to_string())
            .row("Conversion rate", format_percent(k.conversion_rate))
            .row("Total bookings", k.total_bookings.to_string())
            .row("Booking growth", format_growth(k.booking_growth))
            .row("Avg booking value", format_inr(k.average_booking_value))
            .row("Unique customers", k.unique_customers.to_string())
            .row("Occupancy", format_percent(k.occupancy_rate))
            .row("Total calls", k.total_calls.to_string())
            .row("Call growth", format_growth(k.call_growth))
            .row("Connect rate", format_percent(k.connect_rate))
            .row("Avg call duration", format_duration_short(k.average_call_duration))
            .row("Avg response time", format_hours(k.average_response_hours));

        let monthly = summary
            .monthly
            .iter()
            .fold(ViewSection::new("Monthly"), |section, m| {
                section.row(
                    m.label.clone(),
                    format!(
                        "{} | {} bookings | {} leads | {} converted | {} calls",
                        format_lakhs(m.revenue),
                        m.bookings,
                        m.leads,
                        format_percent(m.conversion_rate),
                        m.calls
                    ),
                )
            });

        let cities = summary
            .cities
            .iter()
            .fold(ViewSection::new("Cities"), |section, c| {
                section.row(
                    c.city.clone(),
                    format!(
                        "{} | {} bookings | {} nights | avg {}",
                        format_lakhs(c.revenue),
                        c.bookings,
                        c.nights,
                        format_inr(c.average_booking_value)
                    ),
                )
            });

        let sources = summary
            .sources
            .iter()
            .fold(ViewSection::new("Lead sources"), |section, s| {
                section.row(
                    s.source.as_str(),
                    format!(
                        "{} leads | {} converted | {}",
                        s.leads,
                        format_percent(s.conversion_rate),
                        format_lakhs(s.revenue)
                    ),
                )
            });

        let hourly = summary
            .hourly
            .iter()
            .filter(|h| h.count > 0)
            .fold(ViewSection::new("Calls by hour"), |section, h| {
                section.row(
                    h.label.clone(),
                    format!(
                        "{} calls | {} connected | avg {}",
                        h.count,
                        format_percent(h.success_rate),
                        format_duration_short(h.average_duration)
                    ),
                )
            });

        Self {
            notice: None,
            sections: vec![overview, monthly, cities, sources, hourly],
        }
    }

    /// Attach a notice line
    #[must_use]
    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }

    /// Section by title
    #[must_use]
    pub fn section(&self, title: &str) -> Option<&ViewSection> {
        self.sections.iter().find(|s| s.title == title)
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(notice) = &self.notice {
            writeln!(f, "! {notice}")?;
            writeln!(f)?;
        }
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", section.title)?;
            writeln!(f, "{}", "-".repeat(section.title.chars().count()))?;
            if section.rows.is_empty() {
                writeln!(f, "  (none)")?;
                continue;
            }
            let width = section
                .rows
                .iter()
                .map(|r| r.label.chars().count())
                .max()
                .unwrap_or(0);
            for row in &section.rows {
                writeln!(f, "  {:<width$}  {}", row.label, row.value)?;
            }
        }
        Ok(())
    }
}
