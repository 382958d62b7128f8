//! Endpoint catalogue and the trait every entity source implements

use crate::error::ClientResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use staycrm_core::{ApiResponse, PageQuery, PaginationInfo};
use std::fmt;

/// Backend collections this toolkit reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resource {
    /// Sales leads
    Leads,
    /// Call log
    Calls,
    /// Room bookings
    Bookings,
    /// CRM users
    Users,
    /// Precomputed dashboard totals (not paginated)
    DashboardStats,
}

impl Resource {
    /// Every resource, in snapshot order
    pub const ALL: [Self; 5] = [
        Self::Leads,
        Self::Calls,
        Self::Bookings,
        Self::Users,
        Self::DashboardStats,
    ];

    /// Endpoint path relative to the backend base URL
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Leads => "/enquiry/getenquiries",
            Self::Calls => "/call/getcalllogs",
            Self::Bookings => "/booking/getallbooking",
            Self::Users => "/user/getuser",
            Self::DashboardStats => "/dashboard/stats",
        }
    }

    /// Short human-readable name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Leads => "leads",
            Self::Calls => "calls",
            Self::Bookings => "bookings",
            Self::Users => "users",
            Self::DashboardStats => "dashboard stats",
        }
    }

    /// Whether the endpoint answers with a paginated list
    #[must_use]
    pub const fn is_paginated(self) -> bool {
        !matches!(self, Self::DashboardStats)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Where a piece of data came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataOrigin {
    /// The live backend
    Live,
    /// The built-in mock dataset
    Mock,
}

impl fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::Mock => write!(f, "mock"),
        }
    }
}

/// Fetched payload tagged with its origin
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    /// Payload
    pub data: T,
    /// Live backend or mock dataset
    pub origin: DataOrigin,
    /// Pagination of the last page read, when the endpoint is paginated
    pub pagination: Option<PaginationInfo>,
}

impl<T> Fetched<T> {
    /// Whether the payload is placeholder data
    pub fn is_mock(&self) -> bool {
        self.origin == DataOrigin::Mock
    }
}

/// A source of backend payloads
///
/// Sources hand back the raw JSON envelope; typed decoding happens in
/// [`crate::CrmClient`] so that a shape mismatch counts as a failed fetch.
#[async_trait]
pub trait EntitySource: Send + Sync + fmt::Debug {
    /// Fetch one page of `resource`
    ///
    /// Non-paginated resources ignore `query`.
    async fn fetch_raw(
        &self,
        resource: Resource,
        query: &PageQuery,
    ) -> ClientResult<ApiResponse<serde_json::Value>>;

    /// Which origin this source reports
    fn origin(&self) -> DataOrigin;
}
