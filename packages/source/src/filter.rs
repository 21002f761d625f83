//! Time-of-day post-filter applied to fetched records.

use crime_nearby_source_models::IncidentRecord;
use crime_nearby_temporal::{minutes_of_day, within_time_window};

use crate::parsing::occurred_at;

/// Keeps the records that occurred within `tolerance` minutes of
/// `now_minutes` on the daily clock, regardless of date.
///
/// Records without a parseable `date_of_occurrence` are dropped.
#[must_use]
pub fn filter_by_time_of_day(
    records: Vec<IncidentRecord>,
    now_minutes: u32,
    tolerance: u32,
) -> Vec<IncidentRecord> {
    records
        .into_iter()
        .filter(|record| {
            occurred_at(record).is_some_and(|at| {
                within_time_window(minutes_of_day(at.time()), now_minutes, tolerance)
            })
        })
        .collect()
}
