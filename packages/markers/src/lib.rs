#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map markers for nearby incidents.
//!
//! Turns filtered [`IncidentRecord`]s into labelled points ready for a map
//! layer, e.g. `Robbery: Mon 1/15 @ 2:30 PM`, and serializes them as a
//! GeoJSON `FeatureCollection`. The viewer's own position is only drawn
//! when the caller passes it to [`build_markers`].

pub mod label;

use crime_nearby_source::parsing::{lat_lng, occurred_at};
use crime_nearby_source_models::IncidentRecord;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use label::{display_description, incident_label, proper_case};

/// Label of the viewer-position marker.
pub const YOU_ARE_HERE_LABEL: &str = "You Are Here";

/// What a marker represents.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MarkerKind {
    /// A crime incident
    Incident,
    /// The viewer's position
    YouAreHere,
}

impl MarkerKind {
    /// Fill color used by the map layer.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Incident => "rgba(255, 0, 0, 1)",
            Self::YouAreHere => "yellow",
        }
    }
}

/// A labelled point on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    /// What the marker represents.
    pub kind: MarkerKind,
    /// Text shown next to the point.
    pub label: String,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Latitude (WGS84).
    pub latitude: f64,
}

/// Builds one marker per record that has usable coordinates, followed by a
/// "You Are Here" marker when `you_are_here` (`(longitude, latitude)`) is
/// given.
#[must_use]
pub fn build_markers(records: &[IncidentRecord], you_are_here: Option<(f64, f64)>) -> Vec<MapMarker> {
    let mut markers: Vec<MapMarker> = records
        .iter()
        .filter_map(|record| {
            let (latitude, longitude) = lat_lng(record)?;
            let description = display_description(record.primary_description.as_deref());
            Some(MapMarker {
                kind: MarkerKind::Incident,
                label: incident_label(&description, occurred_at(record)),
                longitude,
                latitude,
            })
        })
        .collect();

    if let Some((longitude, latitude)) = you_are_here {
        markers.push(MapMarker {
            kind: MarkerKind::YouAreHere,
            label: YOU_ARE_HERE_LABEL.to_string(),
            longitude,
            latitude,
        });
    }

    markers
}

/// Converts markers to a GeoJSON `FeatureCollection` of points carrying
/// `label`, `kind` and `color` properties.
#[must_use]
pub fn to_feature_collection(markers: &[MapMarker]) -> FeatureCollection {
    let features = markers
        .iter()
        .map(|marker| {
            let mut properties = JsonObject::new();
            properties.insert("label".to_string(), marker.label.clone().into());
            properties.insert("kind".to_string(), marker.kind.to_string().into());
            properties.insert("color".to_string(), marker.kind.color().into());

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(geojson::Value::Point(vec![
                    marker.longitude,
                    marker.latitude,
                ]))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
