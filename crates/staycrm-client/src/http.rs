//! Live backend source over HTTP

use crate::error::{ClientError, ClientResult};
use crate::source::{DataOrigin, EntitySource, Resource};
use crate::token::TokenStore;
use async_trait::async_trait;
use reqwest::Client;
use staycrm_core::config::BackendConfig;
use staycrm_core::{ApiResponse, PageQuery};
use std::time::Duration;
use tracing::debug;

/// Source backed by the CRM REST API
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: String,
    tokens: Option<TokenStore>,
}

impl HttpSource {
    /// Create a source for `base_url` with a per-request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("staycrm/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens: None,
        })
    }

    /// Create a source from the backend section of the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn from_config(config: &BackendConfig) -> ClientResult<Self> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Attach a token store; its token is sent as `Authorization: Bearer`
    #[must_use]
    pub fn with_token_store(mut self, tokens: TokenStore) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl EntitySource for HttpSource {
    async fn fetch_raw(
        &self,
        resource: Resource,
        query: &PageQuery,
    ) -> ClientResult<ApiResponse<serde_json::Value>> {
        let endpoint = resource.path();
        let url = format!("{}{endpoint}", self.base_url);

        let mut request = self.client.get(&url);
        if resource.is_paginated() {
            request = request.query(&query.to_pairs());
        }

        // Re-read on every call so a `token set` in another shell is picked up.
        if let Some(tokens) = &self.tokens
            && let Some(token) = tokens.load().await?
        {
            request = request.bearer_auth(token);
        }

        debug!(%endpoint, page = query.page, limit = query.limit, "requesting live data");

        let response = request.send().await.map_err(|source| ClientError::Request {
            endpoint: endpoint.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                endpoint: endpoint.to_string(),
                code: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| ClientError::Request {
            endpoint: endpoint.to_string(),
            source,
        })?;

        let envelope: ApiResponse<serde_json::Value> = serde_json::from_slice(&body)
            .map_err(|source| ClientError::decode(endpoint, source))?;

        if !envelope.success {
            return Err(ClientError::Backend {
                endpoint: endpoint.to_string(),
                message: envelope.message.unwrap_or_default(),
            });
        }

        Ok(envelope)
    }

    fn origin(&self) -> DataOrigin {
        DataOrigin::Live
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_trailing_slash_trimmed() {
        let source = HttpSource::new("http://crm.local/api/", Duration::from_secs(5)).unwrap();
        assert_eq!(source.base_url(), "http://crm.local/api");
    }

    #[test]
    fn test_from_config_uses_base_url() {
        let config = BackendConfig::default();
        let source = HttpSource::from_config(&config).unwrap();
        assert_eq!(source.base_url(), "http://localhost:5000/api");
        assert_eq!(source.origin(), DataOrigin::Live);
    }
}
