#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Incident lookup against the Chicago crimes dataset.
//!
//! An [`IncidentSource`] runs one `$where`-filtered query per request. The
//! production implementation is [`socrata::SocrataSource`]; tests plug in
//! an in-memory source. [`lookup::lookup_nearby`] ties constraint assembly,
//! the fetch, and the time-of-day post-filter together.

pub mod filter;
pub mod lookup;
pub mod parsing;
pub mod socrata;

use async_trait::async_trait;
use crime_nearby_source_models::IncidentRecord;

/// Errors that can occur while fetching incidents.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed before a response was read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The data API answered with a non-success status.
    #[error("Data API returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Something that can answer a `SoQL` `$where` query with incident rows.
#[async_trait]
pub trait IncidentSource: Send + Sync {
    /// Returns a short identifier for log messages.
    fn name(&self) -> &str;

    /// Runs a single query constrained by `where_clause`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the request fails, the API answers with
    /// a non-success status, or the body is not a JSON array of records.
    async fn fetch(&self, where_clause: &str) -> Result<Vec<IncidentRecord>, SourceError>;
}
