//! Fetch orchestration: live first, mock on any failure

use crate::error::{ClientError, ClientResult};
use crate::http::HttpSource;
use crate::mock::MockSource;
use crate::source::{DataOrigin, EntitySource, Fetched, Resource};
use crate::token::TokenStore;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use staycrm_core::{Booking, CallRecord, Config, DashboardStats, Lead, PageQuery, PaginationInfo, User};
use tracing::{debug, warn};

/// Upper bound on pages followed by [`CrmClient::fetch_all`]
const DEFAULT_MAX_PAGES: u32 = 50;

/// What to read from a source
#[derive(Debug, Clone)]
enum Request {
    /// One page of a list endpoint
    Page(PageQuery),
    /// Every page of a list endpoint
    All {
        /// Page size
        limit: u32,
        /// Stop after this many pages
        max_pages: u32,
    },
    /// A non-paginated endpoint
    Single,
}

/// Client for the CRM backend with transparent mock fallback
///
/// Every read goes to the live source first. When that fails for any
/// reason (transport, status, `success: false`, shape mismatch) the same
/// read is answered once from the fallback source and the result is tagged
/// [`DataOrigin::Mock`]. With a fallback configured, reads never fail: at
/// worst they return empty data.
#[derive(Debug)]
pub struct CrmClient {
    live: Box<dyn EntitySource>,
    fallback: Option<Box<dyn EntitySource>>,
    page_limit: u32,
    max_pages: u32,
}

/// Everything the dashboard needs, fetched together
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Leads
    pub leads: Fetched<Vec<Lead>>,
    /// Call log
    pub calls: Fetched<Vec<CallRecord>>,
    /// Bookings
    pub bookings: Fetched<Vec<Booking>>,
    /// Users
    pub users: Fetched<Vec<User>>,
    /// Backend totals, when the backend (or mock) has them
    pub stats: Fetched<Option<DashboardStats>>,
    /// When the fetch completed
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    /// Resources that were answered from mock data
    #[must_use]
    pub fn mock_resources(&self) -> Vec<Resource> {
        [
            (Resource::Leads, self.leads.origin),
            (Resource::Calls, self.calls.origin),
            (Resource::Bookings, self.bookings.origin),
            (Resource::Users, self.users.origin),
            (Resource::DashboardStats, self.stats.origin),
        ]
        .into_iter()
        .filter(|(_, origin)| *origin == DataOrigin::Mock)
        .map(|(resource, _)| resource)
        .collect()
    }

    /// Whether any part of the snapshot is placeholder data
    #[must_use]
    pub fn any_mock(&self) -> bool {
        !self.mock_resources().is_empty()
    }
}

impl CrmClient {
    /// Client over `live` with no fallback
    pub fn new(live: impl EntitySource + 'static) -> Self {
        Self {
            live: Box::new(live),
            fallback: None,
            page_limit: 100,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Build the live HTTP client plus the built-in mock fallback from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or the token location cannot be set up.
    pub fn from_config(config: &Config) -> ClientResult<Self> {
        let tokens = TokenStore::from_config(config.auth.token_path.as_deref())?;
        let live = HttpSource::from_config(&config.backend)?.with_token_store(tokens);

        let client = Self::new(live).with_page_limit(config.backend.default_page_limit);
        Ok(if config.backend.mock_fallback {
            client.with_fallback(MockSource::builtin())
        } else {
            client
        })
    }

    /// Answer failed reads from `fallback`
    #[must_use]
    pub fn with_fallback(mut self, fallback: impl EntitySource + 'static) -> Self {
        self.fallback = Some(Box::new(fallback));
        self
    }

    /// Page size used by [`Self::fetch_all`]
    #[must_use]
    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.page_limit = limit.max(1);
        self
    }

    /// Cap on the number of pages [`Self::fetch_all`] follows
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Fetch a single page of a list resource
    ///
    /// # Errors
    ///
    /// Only fails when no fallback is configured and the live read fails.
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        resource: Resource,
        query: PageQuery,
    ) -> ClientResult<Fetched<Vec<T>>> {
        self.resolve(resource, &Request::Page(query)).await
    }

    /// Fetch every page of a list resource
    ///
    /// # Errors
    ///
    /// Only fails when no fallback is configured and the live read fails.
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        resource: Resource,
    ) -> ClientResult<Fetched<Vec<T>>> {
        self.resolve(
            resource,
            &Request::All {
                limit: self.page_limit,
                max_pages: self.max_pages,
            },
        )
        .await
    }

    /// Fetch the backend's precomputed totals
    ///
    /// # Errors
    ///
    /// Only fails when no fallback is configured and the live read fails.
    pub async fn fetch_stats(&self) -> ClientResult<Fetched<Option<DashboardStats>>> {
        self.resolve(Resource::DashboardStats, &Request::Single).await
    }

    /// Fetch leads, calls, bookings, users and stats concurrently
    ///
    /// All five reads must finish before this returns; no ordering between
    /// them is guaranteed.
    ///
    /// # Errors
    ///
    /// Only fails when no fallback is configured and a live read fails.
    pub async fn fetch_snapshot(&self) -> ClientResult<Snapshot> {
        let (leads, calls, bookings, users, stats) = tokio::try_join!(
            self.fetch_all::<Lead>(Resource::Leads),
            self.fetch_all::<CallRecord>(Resource::Calls),
            self.fetch_all::<Booking>(Resource::Bookings),
            self.fetch_all::<User>(Resource::Users),
            self.fetch_stats(),
        )?;

        let snapshot = Snapshot {
            leads,
            calls,
            bookings,
            users,
            stats,
            fetched_at: Utc::now(),
        };

        debug!(
            leads = snapshot.leads.data.len(),
            calls = snapshot.calls.data.len(),
            bookings = snapshot.bookings.data.len(),
            users = snapshot.users.data.len(),
            mock = snapshot.any_mock(),
            "snapshot fetched"
        );
        Ok(snapshot)
    }

    async fn resolve<T>(&self, resource: Resource, request: &Request) -> ClientResult<Fetched<T>>
    where
        T: DeserializeOwned + Default,
    {
        let err = match load::<T>(self.live.as_ref(), resource, request).await {
            Ok((data, pagination)) => {
                debug!(endpoint = %resource, origin = %self.live.origin(), "fetch succeeded");
                return Ok(Fetched {
                    data,
                    origin: self.live.origin(),
                    pagination,
                });
            }
            Err(err) => err,
        };

        let Some(fallback) = &self.fallback else {
            return Err(err);
        };
        warn!(endpoint = %resource, error = %err, "live fetch failed, serving mock data");

        match load::<T>(fallback.as_ref(), resource, request).await {
            Ok((data, pagination)) => Ok(Fetched {
                data,
                origin: fallback.origin(),
                pagination,
            }),
            Err(mock_err) => {
                warn!(endpoint = %resource, error = %mock_err, "mock data unavailable, returning empty");
                Ok(Fetched {
                    data: T::default(),
                    origin: fallback.origin(),
                    pagination: None,
                })
            }
        }
    }
}

async fn load<T: DeserializeOwned>(
    source: &dyn EntitySource,
    resource: Resource,
    request: &Request,
) -> ClientResult<(T, Option<PaginationInfo>)> {
    let endpoint = resource.path();
    let decode = |value: Value| {
        serde_json::from_value::<T>(value).map_err(|e| ClientError::decode(endpoint, e))
    };

    match request {
        Request::Single => {
            let response = source.fetch_raw(resource, &PageQuery::default()).await?;
            Ok((decode(response.data)?, response.pagination))
        }
        Request::Page(query) => {
            let response = source.fetch_raw(resource, query).await?;
            Ok((decode(response.data)?, response.pagination))
        }
        Request::All { limit, max_pages } => {
            let mut items = Vec::new();
            let mut query = PageQuery::first(*limit);
            let mut last = None;

            for page in 1..=*max_pages {
                query = query.page(page);
                let response = source.fetch_raw(resource, &query).await?;
                if page > 1
                    && let Some(p) = response.pagination
                    && p.page < page
                {
                    warn!(
                        endpoint,
                        requested = page,
                        returned = p.page,
                        "backend ignored page parameter, stopping"
                    );
                    break;
                }

                let batch: Vec<Value> = serde_json::from_value(response.data)
                    .map_err(|e| ClientError::decode(endpoint, e))?;
                let fetched = batch.len();
                items.extend(batch);
                last = response.pagination;

                let more = last.is_some_and(|p| p.has_next());
                if !more || fetched == 0 {
                    break;
                }
                if page == *max_pages {
                    warn!(
                        endpoint,
                        max_pages,
                        total_pages = last.map_or(0, |p| p.total_pages),
                        "page cap reached, result truncated"
                    );
                }
            }

            Ok((decode(Value::Array(items))?, last))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use staycrm_core::ApiResponse;

    /// Source that always fails with a 503
    #[derive(Debug)]
    struct DownSource;

    #[async_trait]
    impl EntitySource for DownSource {
        async fn fetch_raw(
            &self,
            resource: Resource,
            _query: &PageQuery,
        ) -> ClientResult<ApiResponse<Value>> {
            Err(ClientError::Status {
                endpoint: resource.path().to_string(),
                code: 503,
            })
        }

        fn origin(&self) -> DataOrigin {
            DataOrigin::Live
        }
    }

    #[tokio::test]
    async fn test_down_backend_without_fallback_errors() {
        let client = CrmClient::new(DownSource);
        let result = client.fetch_all::<Lead>(Resource::Leads).await;
        assert!(matches!(result, Err(ClientError::Status { code: 503, .. })));
    }

    #[tokio::test]
    async fn test_down_backend_falls_back_to_mock() {
        let client = CrmClient::new(DownSource).with_fallback(MockSource::builtin());

        let leads = client.fetch_all::<Lead>(Resource::Leads).await.unwrap();
        assert!(leads.is_mock());
        assert_eq!(leads.data.len(), 12);
    }

    #[tokio::test]
    async fn test_fetch_all_follows_pages() {
        // Mock used as the "live" source so paging is exercised end to end.
        let client = CrmClient::new(MockSource::builtin()).with_page_limit(5);

        let calls = client.fetch_all::<CallRecord>(Resource::Calls).await.unwrap();
        assert_eq!(calls.data.len(), 14);
        assert_eq!(calls.pagination.unwrap().page, 3);
    }

    #[tokio::test]
    async fn test_fetch_all_respects_page_cap() {
        let client = CrmClient::new(MockSource::builtin())
            .with_page_limit(5)
            .with_max_pages(2);

        let calls = client.fetch_all::<CallRecord>(Resource::Calls).await.unwrap();
        assert_eq!(calls.data.len(), 10);
    }

    /// Source that ignores the requested page and always answers page 1 of 4
    #[derive(Debug)]
    struct StuckPager;

    #[async_trait]
    impl EntitySource for StuckPager {
        async fn fetch_raw(
            &self,
            _resource: Resource,
            query: &PageQuery,
        ) -> ClientResult<ApiResponse<Value>> {
            Ok(ApiResponse {
                success: true,
                data: serde_json::json!([{"id": "u1", "name": "Priya", "email": "priya@example.com", "role": "sales"}]),
                message: None,
                pagination: Some(PaginationInfo::for_total(1, query.limit, 4)),
            })
        }

        fn origin(&self) -> DataOrigin {
            DataOrigin::Live
        }
    }

    #[tokio::test]
    async fn test_fetch_all_stops_when_page_does_not_advance() {
        let client = CrmClient::new(StuckPager).with_page_limit(1);

        let users = client.fetch_all::<User>(Resource::Users).await.unwrap();
        assert_eq!(users.data.len(), 1);
        assert_eq!(users.pagination.unwrap().page, 1);
    }

    #[tokio::test]
    async fn test_missing_mock_entry_yields_empty_data() {
        let client = CrmClient::new(DownSource).with_fallback(MockSource::empty());

        let users = client.fetch_all::<User>(Resource::Users).await.unwrap();
        assert!(users.data.is_empty());
        assert_eq!(users.origin, DataOrigin::Mock);

        let stats = client.fetch_stats().await.unwrap();
        assert!(stats.data.is_none());
    }

    #[tokio::test]
    async fn test_snapshot_reports_mock_parts() {
        let client = CrmClient::new(DownSource).with_fallback(MockSource::builtin());

        let snapshot = client.fetch_snapshot().await.unwrap();
        assert!(snapshot.any_mock());
        assert_eq!(snapshot.mock_resources(), Resource::ALL.to_vec());
        assert_eq!(snapshot.bookings.data.len(), 8);
        assert_eq!(snapshot.stats.data.unwrap().total_leads, Some(12));
    }

    #[tokio::test]
    async fn test_snapshot_origin_follows_source() {
        let client = CrmClient::new(MockSource::builtin());
        let snapshot = client.fetch_snapshot().await.unwrap();

        // The builtin mock reports itself as Mock even when used as primary.
        assert_eq!(snapshot.leads.origin, DataOrigin::Mock);
        assert_eq!(snapshot.users.data.len(), 4);
    }
}
