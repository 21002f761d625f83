#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Request and query-constraint types for the crime nearby service.
//!
//! A [`FilterRequest`] arrives from the map frontend once per viewport
//! change. It is turned into a [`ConstraintSet`] of dataset-level filters
//! which the query crate renders into a `SoQL` `$where` clause.

use std::convert::Infallible;
use std::str::FromStr;

use chrono::NaiveDate;
use crime_nearby_temporal::WeekdayType;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Location descriptions treated as "on the street".
pub const STREET_LOCATION_DESCRIPTIONS: &[&str] = &["STREET", "SIDEWALK"];

/// Primary descriptions dropped when [`CategoryExclusion::Default`] is
/// enabled. These are offenses a passer-by is unlikely to run into.
pub const DEFAULT_EXCLUDED_PRIMARY_DESCRIPTIONS: &[&str] = &[
    "ARSON",
    "CRIMINAL TRESPASS",
    "DECEPTIVE PRACTICE",
    "LIQUOR LAW VIOLATION",
    "INTERFERENCE WITH PUBLIC OFFICER",
    "GAMBLING",
    "OTHER OFFENSE",
    "NON-CRIMINAL",
    "OBSCENITY",
    "OFFENSE INVOLVING CHILDREN",
    "BURGLARY",
    "CRIMINAL DAMAGE",
];

/// Errors produced while decoding an inbound request body.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The body was empty.
    #[error("Request body is empty")]
    EmptyBody,

    /// The body (or the string it wrapped) was not JSON.
    #[error("Request body is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),

    /// The JSON did not have the expected shape or values.
    #[error("Invalid request: {0}")]
    Fields(#[source] serde_json::Error),
}

/// Decodes a JSON request body, accepting either the object itself or a
/// JSON string containing it.
///
/// Some clients `JSON.stringify` the payload and then send it with a JSON
/// content type, so the body arrives as a quoted string that needs a
/// second parse.
///
/// # Errors
///
/// Returns [`RequestError`] if the body is empty, not JSON, or does not
/// match `T`.
pub fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, RequestError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(RequestError::EmptyBody);
    }

    let mut value: serde_json::Value = serde_json::from_slice(body).map_err(RequestError::Json)?;
    if let serde_json::Value::String(inner) = &value {
        value = serde_json::from_str(inner).map_err(RequestError::Json)?;
    }

    serde_json::from_value(value).map_err(RequestError::Fields)
}

/// A geographic bounding box in WGS84 degrees.
///
/// On the wire this is the four-element array
/// `[west, south, east, north]`, i.e. `[minLon, minLat, maxLon, maxLat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    /// Western longitude boundary.
    pub west: f64,
    /// Southern latitude boundary.
    pub south: f64,
    /// Eastern longitude boundary.
    pub east: f64,
    /// Northern latitude boundary.
    pub north: f64,
}

/// Why a bounding box was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidBoundingBox {
    /// A coordinate was NaN or infinite.
    #[error("bounding box coordinates must be finite numbers")]
    NotFinite,
    /// `west` was greater than `east`.
    #[error("bounding box west edge is east of its east edge")]
    LongitudeInverted,
    /// `south` was greater than `north`.
    #[error("bounding box south edge is north of its north edge")]
    LatitudeInverted,
    /// A latitude was outside `-90..=90`.
    #[error("bounding box latitude must be within -90..=90")]
    LatitudeOutOfRange,
}

impl BoundingBox {
    /// Creates a bounding box, checking that it is well formed.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidBoundingBox`] if a coordinate is not finite, a
    /// latitude is out of range, or an edge pair is inverted.
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Result<Self, InvalidBoundingBox> {
        if ![west, south, east, north].iter().all(|v| v.is_finite()) {
            return Err(InvalidBoundingBox::NotFinite);
        }
        if !(-90.0..=90.0).contains(&south) || !(-90.0..=90.0).contains(&north) {
            return Err(InvalidBoundingBox::LatitudeOutOfRange);
        }
        if west > east {
            return Err(InvalidBoundingBox::LongitudeInverted);
        }
        if south > north {
            return Err(InvalidBoundingBox::LatitudeInverted);
        }
        Ok(Self {
            west,
            south,
            east,
            north,
        })
    }
}

impl TryFrom<[f64; 4]> for BoundingBox {
    type Error = InvalidBoundingBox;

    fn try_from([west, south, east, north]: [f64; 4]) -> Result<Self, Self::Error> {
        Self::new(west, south, east, north)
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.west, b.south, b.east, b.north]
    }
}

/// Filters requested by the map for the current viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterRequest {
    /// The visible map extent.
    #[serde(rename = "box")]
    pub bounding_box: BoundingBox,
    /// Restrict to records on or after the start of the last 20 days
    /// sharing today's weekday type.
    #[serde(rename = "last20days")]
    pub last_20_days: bool,
    /// Restrict to records whose day of week shares today's weekday type.
    #[serde(rename = "weekdaytype")]
    pub weekday_type: bool,
}

impl FilterRequest {
    /// Decodes a request from a raw body. See [`decode_body`].
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the body is malformed or a field is
    /// missing or invalid.
    pub fn from_body(body: &[u8]) -> Result<Self, RequestError> {
        decode_body(body)
    }
}

/// Whether and how records are excluded by primary description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryExclusion {
    /// No exclusion clause.
    #[default]
    Disabled,
    /// Exclude [`DEFAULT_EXCLUDED_PRIMARY_DESCRIPTIONS`].
    Default,
    /// Exclude the given primary descriptions.
    Custom(Vec<String>),
}

impl CategoryExclusion {
    /// The primary descriptions to exclude, or `None` when disabled.
    #[must_use]
    pub fn descriptions(&self) -> Option<Vec<String>> {
        match self {
            Self::Disabled => None,
            Self::Default => Some(
                DEFAULT_EXCLUDED_PRIMARY_DESCRIPTIONS
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            ),
            Self::Custom(list) if list.is_empty() => None,
            Self::Custom(list) => Some(list.clone()),
        }
    }
}

impl FromStr for CategoryExclusion {
    type Err = Infallible;

    /// Parses `""`, `"none"` or `"off"` as disabled, `"default"` as the
    /// built-in list, and anything else as a comma-separated list.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("none")
            || trimmed.eq_ignore_ascii_case("off")
        {
            return Ok(Self::Disabled);
        }
        if trimmed.eq_ignore_ascii_case("default") {
            return Ok(Self::Default);
        }
        let list: Vec<String> = trimmed
            .split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_uppercase)
            .collect();
        Ok(Self::Custom(list))
    }
}

/// A single dataset-level filter.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryConstraint {
    /// `_location_description` is one of the given values.
    LocationDescriptionIn(Vec<String>),
    /// `domestic` is false.
    NonDomestic,
    /// `date_of_occurrence` is on or after the given date.
    OccurredOnOrAfter(NaiveDate),
    /// The day of week of `date_of_occurrence` has the given type.
    DayOfWeekIn(WeekdayType),
    /// `_primary_decsription` is none of the given values.
    PrimaryDescriptionNotIn(Vec<String>),
    /// `location` lies inside the box.
    WithinBox(BoundingBox),
}

/// Ordered set of constraints for one dataset query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintSet {
    /// Constraints, all of which must hold.
    pub constraints: Vec<QueryConstraint>,
}

impl ConstraintSet {
    /// Appends a constraint.
    pub fn push(&mut self, constraint: QueryConstraint) {
        self.constraints.push(constraint);
    }

    /// The recency lower bound, if one is present.
    #[must_use]
    pub fn recency_lower_bound(&self) -> Option<NaiveDate> {
        self.constraints.iter().find_map(|c| match c {
            QueryConstraint::OccurredOnOrAfter(date) => Some(*date),
            _ => None,
        })
    }

    /// The weekday-type clause, if one is present.
    #[must_use]
    pub fn weekday_type(&self) -> Option<WeekdayType> {
        self.constraints.iter().find_map(|c| match c {
            QueryConstraint::DayOfWeekIn(t) => Some(*t),
            _ => None,
        })
    }

    /// Iterates the constraints in order.
    pub fn iter(&self) -> std::slice::Iter<'_, QueryConstraint> {
        self.constraints.iter()
    }
}

impl<'a> IntoIterator for &'a ConstraintSet {
    type Item = &'a QueryConstraint;
    type IntoIter = std::slice::Iter<'a, QueryConstraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_plain_object() {
        let body = br#"{"box": [-87.65, 41.87, -87.61, 41.88], "last20days": true, "weekdaytype": false}"#;
        let req = FilterRequest::from_body(body).unwrap();
        assert!(req.last_20_days);
        assert!(!req.weekday_type);
        assert!((req.bounding_box.west - -87.65).abs() < f64::EPSILON);
        assert!((req.bounding_box.north - 41.88).abs() < f64::EPSILON);
    }

    #[test]
    fn decodes_double_encoded_string() {
        let inner = r#"{"box": [-87.65, 41.87, -87.61, 41.88], "last20days": false, "weekdaytype": true}"#;
        let body = serde_json::to_vec(&inner).unwrap();
        let req = FilterRequest::from_body(&body).unwrap();
        assert!(!req.last_20_days);
        assert!(req.weekday_type);
    }

    #[test]
    fn rejects_missing_toggle() {
        let body = br#"{"box": [-87.65, 41.87, -87.61, 41.88], "last20days": true}"#;
        let err = FilterRequest::from_body(body).unwrap_err();
        assert!(matches!(err, RequestError::Fields(_)));
        assert!(err.to_string().contains("weekdaytype"), "{err}");
    }

    #[test]
    fn rejects_short_box() {
        let body = br#"{"box": [-87.65, 41.87, -87.61], "last20days": true, "weekdaytype": true}"#;
        assert!(matches!(
            FilterRequest::from_body(body),
            Err(RequestError::Fields(_))
        ));
    }

    #[test]
    fn rejects_inverted_box() {
        let body = br#"{"box": [-87.61, 41.87, -87.65, 41.88], "last20days": true, "weekdaytype": true}"#;
        let err = FilterRequest::from_body(body).unwrap_err();
        assert!(err.to_string().contains("west edge"), "{err}");
    }

    #[test]
    fn rejects_garbage_and_empty_bodies() {
        assert!(matches!(
            FilterRequest::from_body(b"not json"),
            Err(RequestError::Json(_))
        ));
        assert!(matches!(
            FilterRequest::from_body(b"\"still not json\""),
            Err(RequestError::Json(_))
        ));
        assert!(matches!(
            FilterRequest::from_body(b"  "),
            Err(RequestError::EmptyBody)
        ));
    }

    #[test]
    fn bounding_box_serializes_as_array() {
        let b = BoundingBox::new(-87.65, 41.87, -87.61, 41.88).unwrap();
        assert_eq!(
            serde_json::to_value(b).unwrap(),
            serde_json::json!([-87.65, 41.87, -87.61, 41.88])
        );
    }

    #[test]
    fn bounding_box_rejects_bad_latitude() {
        assert_eq!(
            BoundingBox::new(-87.6, -91.0, -87.5, 41.0),
            Err(InvalidBoundingBox::LatitudeOutOfRange)
        );
        assert_eq!(
            BoundingBox::new(f64::NAN, 41.0, -87.5, 42.0),
            Err(InvalidBoundingBox::NotFinite)
        );
    }

    #[test]
    fn parses_category_exclusion() {
        assert_eq!(
            "".parse::<CategoryExclusion>().unwrap(),
            CategoryExclusion::Disabled
        );
        assert_eq!(
            "Default".parse::<CategoryExclusion>().unwrap(),
            CategoryExclusion::Default
        );
        assert_eq!(
            "arson, gambling ,".parse::<CategoryExclusion>().unwrap(),
            CategoryExclusion::Custom(vec!["ARSON".to_string(), "GAMBLING".to_string()])
        );
    }

    #[test]
    fn category_exclusion_descriptions() {
        assert!(CategoryExclusion::Disabled.descriptions().is_none());
        assert!(CategoryExclusion::Custom(Vec::new()).descriptions().is_none());
        assert_eq!(
            CategoryExclusion::Default.descriptions().unwrap().len(),
            DEFAULT_EXCLUDED_PRIMARY_DESCRIPTIONS.len()
        );
    }
}
