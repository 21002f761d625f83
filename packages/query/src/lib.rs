#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Turns a [`FilterRequest`] into dataset-level constraints.
//!
//! [`assemble_constraints`] decides *which* filters apply for a request on
//! a given Chicago calendar day; [`soql::to_soql_where`] renders them for
//! the Socrata API. Neither performs I/O.

pub mod soql;

use chrono::NaiveDate;
use crime_nearby_query_models::{
    CategoryExclusion, ConstraintSet, FilterRequest, QueryConstraint,
    STREET_LOCATION_DESCRIPTIONS,
};
use crime_nearby_temporal::{WeekdayType, default_reference_date};

pub use soql::to_soql_where;

/// Server-side options that shape every query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Optional exclusion by primary description.
    pub category_exclusion: CategoryExclusion,
}

/// Builds the constraint set for `request` as seen on `today` (a Chicago
/// calendar date).
///
/// The street-location and non-domestic constraints are always present,
/// and the bounding box always comes last. The recency lower bound and the
/// weekday-type clause are added only when the matching toggle is set, and
/// both use today's weekday type.
#[must_use]
pub fn assemble_constraints(
    request: &FilterRequest,
    today: NaiveDate,
    options: &QueryOptions,
) -> ConstraintSet {
    let today_type = WeekdayType::of(today);
    let mut set = ConstraintSet::default();

    set.push(QueryConstraint::LocationDescriptionIn(
        STREET_LOCATION_DESCRIPTIONS
            .iter()
            .map(ToString::to_string)
            .collect(),
    ));
    set.push(QueryConstraint::NonDomestic);

    if request.last_20_days {
        match default_reference_date(today, today_type.is_weekday()) {
            Some(since) => {
                log::debug!("Recency lower bound for {today} ({today_type}): {since}");
                set.push(QueryConstraint::OccurredOnOrAfter(since));
            }
            None => log::warn!("No recency lower bound before {today}; skipping"),
        }
    }

    if request.weekday_type {
        set.push(QueryConstraint::DayOfWeekIn(today_type));
    }

    if let Some(excluded) = options.category_exclusion.descriptions() {
        set.push(QueryConstraint::PrimaryDescriptionNotIn(excluded));
    }

    set.push(QueryConstraint::WithinBox(request.bounding_box));

    set
}
