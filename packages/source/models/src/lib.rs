#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! The incident record returned by the Chicago crimes dataset.
//!
//! Only the columns the service reads are typed. Every other column is
//! kept in [`IncidentRecord::other`] so a record serializes back to the
//! same shape the upstream API produced.

use serde::{Deserialize, Deserializer, Serialize};

/// One row of the "Crimes - One year prior to present" dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentRecord {
    /// Case number.
    #[serde(
        rename = "case_",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub case_number: Option<String>,
    /// Floating timestamp in Chicago local time
    /// (e.g. `"2024-01-15T14:30:00.000"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_occurrence: Option<String>,
    /// Primary offense description (e.g. `"ROBBERY"`). The dataset column
    /// is spelled `_primary_decsription`.
    #[serde(
        rename = "_primary_decsription",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub primary_description: Option<String>,
    /// Secondary offense description (e.g. `"ARMED - HANDGUN"`).
    #[serde(
        rename = "_secondary_description",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub secondary_description: Option<String>,
    /// Latitude as published (the API sends numbers as strings).
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub latitude: Option<String>,
    /// Longitude as published.
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub longitude: Option<String>,
    /// All remaining columns, passed through untouched.
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
