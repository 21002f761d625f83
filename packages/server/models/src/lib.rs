#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the crime nearby server.
//!
//! The incident endpoint echoes dataset rows as-is, so only the envelope
//! types that the server itself defines live here.

use crime_nearby_query_models::FilterRequest;
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Body of every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// What went wrong.
    pub error: String,
}

/// Body of the marker endpoint: the usual filters plus the viewer's
/// position, if the map should draw it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerRequest {
    /// Viewport and toggles.
    #[serde(flatten)]
    pub filter: FilterRequest,
    /// `[longitude, latitude]` of the viewer. Omit to leave the
    /// "You Are Here" marker out.
    #[serde(
        rename = "youAreHere",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub you_are_here: Option<[f64; 2]>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_request_position_is_optional() {
        let without: MarkerRequest = serde_json::from_value(serde_json::json!({
            "box": [-87.65, 41.87, -87.61, 41.88],
            "last20days": true,
            "weekdaytype": true
        }))
        .unwrap();
        assert!(without.you_are_here.is_none());
        assert!(without.filter.last_20_days);

        let with: MarkerRequest = serde_json::from_value(serde_json::json!({
            "box": [-87.65, 41.87, -87.61, 41.88],
            "last20days": false,
            "weekdaytype": true,
            "youAreHere": [-87.6359, 41.8789]
        }))
        .unwrap();
        assert_eq!(with.you_are_here, Some([-87.6359, 41.8789]));
    }
}
