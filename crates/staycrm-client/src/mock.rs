//! Static mock dataset used when the live backend is unavailable

use crate::error::{ClientError, ClientResult};
use crate::source::{DataOrigin, EntitySource, Resource};
use async_trait::async_trait;
use serde_json::Value;
use staycrm_core::{ApiResponse, PageQuery, PaginationInfo};
use std::collections::BTreeMap;

/// Canned payloads keyed by endpoint path
fn builtin_dataset() -> BTreeMap<&'static str, &'static str> {
    BTreeMap::from([
        (Resource::Leads.path(), include_str!("../data/leads.json")),
        (Resource::Calls.path(), include_str!("../data/calls.json")),
        (Resource::Bookings.path(), include_str!("../data/bookings.json")),
        (Resource::Users.path(), include_str!("../data/users.json")),
        (
            Resource::DashboardStats.path(),
            include_str!("../data/dashboard_stats.json"),
        ),
    ])
}

/// In-memory source answering from a fixed dataset
///
/// List endpoints are sliced with the same `page`/`limit` arithmetic as the
/// backend. String filters are honoured on items that carry the filtered
/// field; items without it pass through.
#[derive(Debug, Clone)]
pub struct MockSource {
    payloads: BTreeMap<String, String>,
}

impl MockSource {
    /// Source with the built-in dataset
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            payloads: builtin_dataset()
                .into_iter()
                .map(|(path, body)| (path.to_string(), body.to_string()))
                .collect(),
        }
    }

    /// Source with no data at all
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            payloads: BTreeMap::new(),
        }
    }

    /// Replace the payload served for `resource`
    #[must_use]
    pub fn with_payload(mut self, resource: Resource, json: impl Into<String>) -> Self {
        self.payloads.insert(resource.path().to_string(), json.into());
        self
    }

    fn paginate(items: Vec<Value>, query: &PageQuery) -> (Vec<Value>, PaginationInfo) {
        let filtered: Vec<Value> = items
            .into_iter()
            .filter(|item| matches_filters(item, query))
            .collect();

        let total = filtered.len() as u64;
        let page: Vec<Value> = filtered
            .into_iter()
            .skip(query.offset())
            .take(query.limit as usize)
            .collect();

        (
            page,
            PaginationInfo::for_total(query.page.max(1), query.limit, total),
        )
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::builtin()
    }
}

fn matches_filters(item: &Value, query: &PageQuery) -> bool {
    query.filters.iter().all(|(key, wanted)| match item.get(key) {
        Some(Value::String(actual)) => actual.eq_ignore_ascii_case(wanted),
        _ => true,
    })
}

#[async_trait]
impl EntitySource for MockSource {
    async fn fetch_raw(
        &self,
        resource: Resource,
        query: &PageQuery,
    ) -> ClientResult<ApiResponse<Value>> {
        let endpoint = resource.path();
        let body = self
            .payloads
            .get(endpoint)
            .ok_or_else(|| ClientError::NoData {
                endpoint: endpoint.to_string(),
            })?;

        let value: Value =
            serde_json::from_str(body).map_err(|source| ClientError::decode(endpoint, source))?;

        match value {
            Value::Array(items) if resource.is_paginated() => {
                let (page, pagination) = Self::paginate(items, query);
                Ok(ApiResponse {
                    success: true,
                    data: Value::Array(page),
                    message: Some("mock data".to_string()),
                    pagination: Some(pagination),
                })
            }
            other => Ok(ApiResponse {
                success: true,
                data: other,
                message: Some("mock data".to_string()),
                pagination: None,
            }),
        }
    }

    fn origin(&self) -> DataOrigin {
        DataOrigin::Mock
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use staycrm_core::{Booking, CallRecord, DashboardStats, Lead, User};

    #[tokio::test]
    async fn test_builtin_dataset_decodes_into_entities() {
        let mock = MockSource::builtin();
        let all = PageQuery::first(1000);

        let leads = mock.fetch_raw(Resource::Leads, &all).await.unwrap();
        let leads: Vec<Lead> = serde_json::from_value(leads.data).unwrap();
        assert_eq!(leads.len(), 12);

        let calls = mock.fetch_raw(Resource::Calls, &all).await.unwrap();
        let calls: Vec<CallRecord> = serde_json::from_value(calls.data).unwrap();
        assert_eq!(calls.len(), 14);

        let bookings = mock.fetch_raw(Resource::Bookings, &all).await.unwrap();
        let bookings: Vec<Booking> = serde_json::from_value(bookings.data).unwrap();
        assert_eq!(bookings.len(), 8);

        let users = mock.fetch_raw(Resource::Users, &all).await.unwrap();
        let users: Vec<User> = serde_json::from_value(users.data).unwrap();
        assert_eq!(users.len(), 4);

        let stats = mock.fetch_raw(Resource::DashboardStats, &all).await.unwrap();
        assert!(stats.pagination.is_none());
        let stats: DashboardStats = serde_json::from_value(stats.data).unwrap();
        assert_eq!(stats.total_bookings, Some(8));
    }

    #[tokio::test]
    async fn test_pagination_slices_like_backend() {
        let mock = MockSource::builtin();

        let page2 = mock
            .fetch_raw(Resource::Leads, &PageQuery::first(5).page(2))
            .await
            .unwrap();

        let items = page2.data.as_array().unwrap();
        assert_eq!(items.len(), 5);
        assert_eq!(items[0]["_id"], "enq-1006");

        let pagination = page2.pagination.unwrap();
        assert_eq!(pagination.page, 2);
        assert_eq!(pagination.total, 12);
        assert_eq!(pagination.total_pages, 3);
        assert!(pagination.has_next());
    }

    #[tokio::test]
    async fn test_page_past_end_is_empty() {
        let mock = MockSource::builtin();
        let response = mock
            .fetch_raw(Resource::Users, &PageQuery::first(10).page(9))
            .await
            .unwrap();

        assert!(response.data.as_array().unwrap().is_empty());
        assert_eq!(response.pagination.unwrap().total, 4);
    }

    #[tokio::test]
    async fn test_filters_narrow_results() {
        let mock = MockSource::builtin();
        let hot = mock
            .fetch_raw(Resource::Leads, &PageQuery::first(50).filter("status", "hot"))
            .await
            .unwrap();

        let items = hot.data.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|lead| lead["status"] == "Hot"));
    }

    #[tokio::test]
    async fn test_empty_source_reports_no_data() {
        let err = MockSource::empty()
            .fetch_raw(Resource::Calls, &PageQuery::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::NoData { .. }));
    }

    #[tokio::test]
    async fn test_override_payload() {
        let mock = MockSource::empty().with_payload(Resource::Users, "[]");
        let response = mock
            .fetch_raw(Resource::Users, &PageQuery::default())
            .await
            .unwrap();

        assert_eq!(response.pagination.unwrap().total_pages, 0);
        assert_eq!(mock.origin(), DataOrigin::Mock);
    }
}
