//! End-to-end incident lookup for one request.

use chrono::{DateTime, Utc};
use crime_nearby_query::{QueryOptions, assemble_constraints, to_soql_where};
use crime_nearby_query_models::FilterRequest;
use crime_nearby_source_models::IncidentRecord;
use crime_nearby_temporal::{DEFAULT_WINDOW_MINUTES, chicago_minutes_now, today_in_chicago};

use crate::filter::filter_by_time_of_day;
use crate::{IncidentSource, SourceError};

/// Options shared by every lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOptions {
    /// Dataset-level query options.
    pub query: QueryOptions,
    /// Half-width of the time-of-day window in minutes.
    pub window_minutes: u32,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            query: QueryOptions::default(),
            window_minutes: DEFAULT_WINDOW_MINUTES,
        }
    }
}

/// Fetches the street incidents for `request` that happened around the
/// current Chicago time of day.
///
/// `now` is converted to Chicago time to derive today's date (for the
/// recency bound and weekday type) and the minute of day (for the
/// post-filter). The source is queried exactly once.
///
/// # Errors
///
/// Returns the [`SourceError`] from the fetch unchanged; no partial result
/// is produced.
pub async fn lookup_nearby(
    source: &dyn IncidentSource,
    request: &FilterRequest,
    now: DateTime<Utc>,
    options: &LookupOptions,
) -> Result<Vec<IncidentRecord>, SourceError> {
    let today = today_in_chicago(now);
    let now_minutes = chicago_minutes_now(now);

    let constraints = assemble_constraints(request, today, &options.query);
    let where_clause = to_soql_where(&constraints);

    let records = source.fetch(&where_clause).await?;
    let fetched = records.len();
    let kept = filter_by_time_of_day(records, now_minutes, options.window_minutes);

    log::info!(
        "{}: kept {} of {fetched} records within {} minutes of {:02}:{:02}",
        source.name(),
        kept.len(),
        options.window_minutes,
        now_minutes / 60,
        now_minutes % 60,
    );

    Ok(kept)
}
