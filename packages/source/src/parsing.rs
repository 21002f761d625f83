//! Parsing of the dataset's string-typed columns.

use chrono::NaiveDateTime;
use crime_nearby_source_models::IncidentRecord;

/// Parses a Socrata floating timestamp (ISO 8601 without offset, optional
/// fractional seconds). The result is in the dataset's local time.
#[must_use]
pub fn parse_socrata_date(s: &str) -> Option<NaiveDateTime> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive);
    }
    None
}

/// Parses lat/lng from optional string fields. Returns `None` if missing,
/// unparseable, or zero.
#[must_use]
pub fn parse_lat_lng_str(lat: Option<&str>, lng: Option<&str>) -> Option<(f64, f64)> {
    let latitude = lat?.trim().parse::<f64>().ok()?;
    let longitude = lng?.trim().parse::<f64>().ok()?;
    if latitude == 0.0 || longitude == 0.0 || !latitude.is_finite() || !longitude.is_finite() {
        return None;
    }
    Some((latitude, longitude))
}

/// When the incident occurred, if the record carries a parseable timestamp.
#[must_use]
pub fn occurred_at(record: &IncidentRecord) -> Option<NaiveDateTime> {
    record
        .date_of_occurrence
        .as_deref()
        .and_then(parse_socrata_date)
}

/// The incident's `(latitude, longitude)`, if present and non-zero.
#[must_use]
pub fn lat_lng(record: &IncidentRecord) -> Option<(f64, f64)> {
    parse_lat_lng_str(record.latitude.as_deref(), record.longitude.as_deref())
}
