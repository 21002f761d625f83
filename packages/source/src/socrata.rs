//! Socrata SODA API client for the Chicago crimes dataset.
//!
//! Issues a single `GET` with `$where` (and optionally `$limit`) per
//! lookup. The app token travels in the `X-App-Token` header so it never
//! appears in a request URL, and transport errors are stripped of their URL
//! before being returned. There is no retry.

use std::time::Duration;

use async_trait::async_trait;
use crime_nearby_source_models::IncidentRecord;

use crate::{IncidentSource, SourceError};

/// Chicago "Crimes - One year prior to present" resource endpoint.
/// Portal: <https://data.cityofchicago.org/Public-Safety/Crimes-One-year-prior-to-present/x2n5-8w5q>
pub const CHICAGO_CRIMES_API_URL: &str = "https://data.cityofchicago.org/resource/3uz7-d32j.json";

/// Longest error body kept in [`SourceError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Header carrying the Socrata application token.
pub const APP_TOKEN_HEADER: &str = "X-App-Token";

/// Configuration for the Socrata client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocrataConfig {
    /// Resource endpoint (e.g. [`CHICAGO_CRIMES_API_URL`]).
    pub api_url: String,
    /// Socrata application token, sent as [`APP_TOKEN_HEADER`] when set.
    pub app_token: Option<String>,
    /// Optional `$limit`. Socrata applies its own default when unset.
    pub limit: Option<u64>,
    /// Optional overall request timeout.
    pub timeout: Option<Duration>,
}

impl Default for SocrataConfig {
    fn default() -> Self {
        Self {
            api_url: CHICAGO_CRIMES_API_URL.to_string(),
            app_token: None,
            limit: None,
            timeout: None,
        }
    }
}

/// [`IncidentSource`] backed by a Socrata resource endpoint.
pub struct SocrataSource {
    client: reqwest::Client,
    config: SocrataConfig,
}

impl SocrataSource {
    /// Creates a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the HTTP client cannot be built.
    pub fn new(config: SocrataConfig) -> Result<Self, SourceError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// The query parameters sent for `where_clause`.
    #[must_use]
    pub fn query_params(&self, where_clause: &str) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(2);
        params.push(("$where", where_clause.to_string()));
        if let Some(limit) = self.config.limit {
            params.push(("$limit", limit.to_string()));
        }
        params
    }

    fn request(&self, where_clause: &str) -> reqwest::RequestBuilder {
        let request = self
            .client
            .get(&self.config.api_url)
            .query(&self.query_params(where_clause));

        match &self.config.app_token {
            Some(token) => request.header(APP_TOKEN_HEADER, token),
            None => request,
        }
    }
}

fn transport(e: reqwest::Error) -> SourceError {
    SourceError::Http(e.without_url())
}

#[async_trait]
impl IncidentSource for SocrataSource {
    fn name(&self) -> &'static str {
        "chicago_crimes"
    }

    async fn fetch(&self, where_clause: &str) -> Result<Vec<IncidentRecord>, SourceError> {
        log::debug!("Querying {} with $where={where_clause}", self.config.api_url);

        let response = self.request(where_clause).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            log::error!("Data API returned HTTP {status}: {body}");
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(transport)?;
        let records: Vec<IncidentRecord> = serde_json::from_slice(&bytes)?;
        log::info!("Fetched {} records from {}", records.len(), self.name());

        Ok(records)
    }
}
