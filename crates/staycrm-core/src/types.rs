//! CRM entity types as served by the backend
//!
//! Every entity mirrors the backend's camelCase JSON. They are read-only
//! snapshots: nothing in this workspace creates or mutates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Channel a lead arrived through
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LeadSource {
    /// Website enquiry form
    Web,
    /// WhatsApp conversation
    WhatsApp,
    /// Inbound phone call
    Call,
    /// Social media campaign
    Social,
    /// Referred by an existing guest or partner
    Referral,
}

impl LeadSource {
    /// All sources in declaration order
    pub const ALL: [Self; 5] = [
        Self::Web,
        Self::WhatsApp,
        Self::Call,
        Self::Social,
        Self::Referral,
    ];

    /// Wire label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Web => "Web",
            Self::WhatsApp => "WhatsApp",
            Self::Call => "Call",
            Self::Social => "Social",
            Self::Referral => "Referral",
        }
    }
}

/// Pipeline stage of a lead
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LeadStatus {
    /// Not yet contacted
    New,
    /// Strong buying signal
    Hot,
    /// Awaiting another touch point
    #[serde(rename = "Follow-up")]
    FollowUp,
    /// Became a booking
    Converted,
    /// Dropped out
    Lost,
}

impl LeadStatus {
    /// All statuses in declaration order
    pub const ALL: [Self; 5] = [
        Self::New,
        Self::Hot,
        Self::FollowUp,
        Self::Converted,
        Self::Lost,
    ];

    /// Wire label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Hot => "Hot",
            Self::FollowUp => "Follow-up",
            Self::Converted => "Converted",
            Self::Lost => "Lost",
        }
    }
}

/// A sales lead (backend "enquiry")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    /// Backend identifier
    #[serde(alias = "_id")]
    pub id: String,
    /// Contact name
    pub name: String,
    /// Contact email
    #[serde(default)]
    pub email: String,
    /// Contact phone
    #[serde(default)]
    pub phone: String,
    /// Acquisition channel
    pub source: LeadSource,
    /// Pipeline stage
    pub status: LeadStatus,
    /// When the lead was created
    pub created_date: DateTime<Utc>,
    /// Most recent contact, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_contact_date: Option<DateTime<Utc>>,
    /// Revenue the lead is expected to bring
    #[serde(default)]
    pub expected_revenue: f64,
    /// Property the lead asked about
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_interest: Option<String>,
    /// Agent owning the lead
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
}

/// Direction of a call
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CallType {
    /// Guest called in
    Incoming,
    /// Agent called out
    Outgoing,
}

impl CallType {
    /// Wire label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Incoming => "Incoming",
            Self::Outgoing => "Outgoing",
        }
    }
}

/// Outcome of a call attempt
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CallStatus {
    /// Both parties talked
    Connected,
    /// Nobody answered
    Missed,
    /// Callee declined
    Rejected,
    /// Line engaged
    Busy,
}

impl CallStatus {
    /// All statuses in declaration order
    pub const ALL: [Self; 4] = [Self::Connected, Self::Missed, Self::Rejected, Self::Busy];

    /// Wire label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connected => "Connected",
            Self::Missed => "Missed",
            Self::Rejected => "Rejected",
            Self::Busy => "Busy",
        }
    }
}

/// One entry of the call log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    /// Backend identifier
    #[serde(alias = "_id")]
    pub id: String,
    /// Direction
    #[serde(rename = "type")]
    pub call_type: CallType,
    /// Outcome
    pub status: CallStatus,
    /// Talk time in seconds; only meaningful for connected calls
    pub duration: u32,
    /// When the call started
    pub date: DateTime<Utc>,
    /// Free-text result category ("Booking confirmed", "Callback requested", ...)
    #[serde(default)]
    pub result: String,
    /// Agent who handled the call
    #[serde(default)]
    pub user: String,
    /// Other party's number
    #[serde(default)]
    pub phone: String,
    /// Agent notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Lead the call belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<String>,
}

impl CallRecord {
    /// Whether the call reached the other party
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.status == CallStatus::Connected
    }
}

/// Lifecycle state of a booking
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    /// Paid or guaranteed
    Confirmed,
    /// Awaiting confirmation
    Pending,
    /// Called off
    Cancelled,
    /// Guest has checked out
    Completed,
}

/// A room booking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Backend identifier
    #[serde(alias = "_id")]
    pub id: String,
    /// Guest name
    #[serde(default)]
    pub guest_name: String,
    /// Guest email; loose customer key
    #[serde(default)]
    pub guest_email: String,
    /// Property name, free text that usually embeds the city
    #[serde(default)]
    pub property_name: String,
    /// Amount charged in rupees
    pub total_amount: f64,
    /// Length of stay
    pub nights: u32,
    /// Lifecycle state
    pub status: BookingStatus,
    /// When the booking was made
    pub created_date: DateTime<Utc>,
    /// Arrival
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in: Option<DateTime<Utc>>,
    /// Departure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out: Option<DateTime<Utc>>,
}

/// A CRM user (agent, manager, admin)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend identifier
    #[serde(alias = "_id")]
    pub id: String,
    /// Display name
    pub name: String,
    /// Login email
    #[serde(default)]
    pub email: String,
    /// Role label
    #[serde(default)]
    pub role: String,
    /// Whether the account is enabled
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

/// Aggregate snapshot precomputed by the backend
///
/// Totals here take precedence over locally computed ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    /// Lead count across all time
    pub total_leads: Option<u64>,
    /// Booking count across all time
    pub total_bookings: Option<u64>,
    /// Booking revenue across all time
    pub total_revenue: Option<f64>,
    /// Call count across all time
    pub total_calls: Option<u64>,
    /// Lead growth vs. the previous period, percent
    pub lead_growth: f64,
    /// Booking growth vs. the previous period, percent
    pub booking_growth: f64,
    /// Revenue growth vs. the previous period, percent
    pub revenue_growth: f64,
    /// Call growth vs. the previous period, percent
    pub call_growth: f64,
}

/// Pagination block returned with list endpoints
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    /// 1-based page number
    pub page: u32,
    /// Page size
    pub limit: u32,
    /// Total items across all pages
    pub total: u64,
    /// Number of pages
    pub total_pages: u32,
}

impl PaginationInfo {
    /// Build the pagination block for `total` items
    #[must_use]
    pub fn for_total(page: u32, limit: u32, total: u64) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            u32::try_from(total.div_ceil(u64::from(limit))).unwrap_or(u32::MAX)
        };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }

    /// Whether a further page exists
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Envelope every backend endpoint answers with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Backend-level success flag
    pub success: bool,
    /// Payload
    pub data: T,
    /// Optional human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Present on paginated endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationInfo>,
}

impl<T> ApiResponse<T> {
    /// Successful response without pagination
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
            pagination: None,
        }
    }
}

/// Page request with optional filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// 1-based page number
    pub page: u32,
    /// Page size
    pub limit: u32,
    /// Extra filter parameters (`status=Hot`, `source=Web`, ...)
    pub filters: BTreeMap<String, String>,
}

impl PageQuery {
    /// First page with the given size
    #[must_use]
    pub fn first(limit: u32) -> Self {
        Self {
            page: 1,
            limit,
            filters: BTreeMap::new(),
        }
    }

    /// Select another page
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Add a filter parameter
    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Zero-based offset of the first item on this page
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.page.max(1) as usize - 1).saturating_mul(self.limit as usize)
    }

    /// Query string pairs in a stable order: page, limit, then filters
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        pairs.extend(self.filters.iter().map(|(k, v)| (k.clone(), v.clone())));
        pairs
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::first(10)
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(LeadSource, LeadStatus, CallType, CallStatus);
