#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Calendar and clock arithmetic used to decide which historical crime
//! records are comparable to "right now".
//!
//! All dates handed to this crate are expected to already be expressed in
//! Chicago local time. Use [`today_in_chicago`] and [`chicago_minutes_now`]
//! to derive them from a UTC instant; nothing here reads the host clock or
//! the host's local timezone.

pub mod window;

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc, Weekday};
use chrono_tz::America::Chicago;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use window::{
    DEFAULT_WINDOW_MINUTES, MINUTES_PER_DAY, circular_distance, minutes_of_day,
    within_time_window,
};

/// The published dataset trails real time by about a week, so the
/// comparable-day search starts this many days before today.
pub const DATASET_LAG_DAYS: u32 = 7;

/// Number of comparable days the recency window spans.
pub const MATCHING_DAY_COUNT: u32 = 20;

/// Whether a calendar date falls on a weekday or on the weekend.
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
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum WeekdayType {
    /// Monday through Friday
    Weekday,
    /// Saturday and Sunday
    Weekend,
}

impl WeekdayType {
    /// Classifies `date` by its day of week.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => Self::Weekend,
            Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu | Weekday::Fri => {
                Self::Weekday
            }
        }
    }

    /// Maps the boolean form used by the request toggles back to a type.
    #[must_use]
    pub const fn from_is_weekday(is_weekday: bool) -> Self {
        if is_weekday {
            Self::Weekday
        } else {
            Self::Weekend
        }
    }

    /// Returns `true` for [`WeekdayType::Weekday`].
    #[must_use]
    pub const fn is_weekday(self) -> bool {
        matches!(self, Self::Weekday)
    }

    /// Socrata `date_extract_dow` codes (0 = Sunday, 6 = Saturday) that
    /// belong to this type.
    #[must_use]
    pub const fn socrata_day_codes(self) -> &'static [u8] {
        match self {
            Self::Weekday => &[1, 2, 3, 4, 5],
            Self::Weekend => &[0, 6],
        }
    }
}

/// Returns `true` if `date` is Monday through Friday.
#[must_use]
pub fn is_weekday(date: NaiveDate) -> bool {
    WeekdayType::of(date).is_weekday()
}

/// The calendar date in Chicago at the instant `now`.
#[must_use]
pub fn today_in_chicago(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&Chicago).date_naive()
}

/// Minutes since Chicago midnight at the instant `now`.
#[must_use]
pub fn chicago_minutes_now(now: DateTime<Utc>) -> u32 {
    minutes_of_day(now.with_timezone(&Chicago).time())
}

/// Finds the earliest date of a window holding exactly `max_count` days of
/// the wanted weekday type.
///
/// The search starts at `today - lag_days` and steps back one day at a
/// time. The starting date is never counted. Each stepped-to date whose
/// type matches `want_weekday` increments the count, and the date on which
/// the count reaches `max_count` is returned. With `max_count == 0` the
/// starting date is returned unchanged.
///
/// Weekend days are the sparser type at 2/7 of any week, so the loop takes
/// at most `4 * max_count` steps past the starting date.
///
/// Returns `None` if the search would step before [`NaiveDate::MIN`].
#[must_use]
pub fn reference_date(
    today: NaiveDate,
    want_weekday: bool,
    lag_days: u32,
    max_count: u32,
) -> Option<NaiveDate> {
    let mut day = today.checked_sub_days(Days::new(u64::from(lag_days)))?;
    let mut count = 0;

    while count < max_count {
        day = day.pred_opt()?;
        if is_weekday(day) == want_weekday {
            count += 1;
        }
    }

    Some(day)
}

/// [`reference_date`] with the dataset's lag and window size.
#[must_use]
pub fn default_reference_date(today: NaiveDate, want_weekday: bool) -> Option<NaiveDate> {
    reference_date(today, want_weekday, DATASET_LAG_DAYS, MATCHING_DAY_COUNT)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn count_matching(from: NaiveDate, until: NaiveDate, want_weekday: bool) -> usize {
        from.iter_days()
            .take_while(|d| *d < until)
            .filter(|d| is_weekday(*d) == want_weekday)
            .count()
    }

    #[test]
    fn classifies_every_day_of_a_week() {
        // 2024-01-15 is a Monday.
        let monday = date(2024, 1, 15);
        let expected = [true, true, true, true, true, false, false];
        for (offset, want) in expected.into_iter().enumerate() {
            let d = monday + Days::new(offset as u64);
            assert_eq!(is_weekday(d), want, "{d} ({:?})", d.weekday());
        }
    }

    #[test]
    fn only_saturday_and_sunday_are_weekend() {
        for d in date(2023, 12, 1).iter_days().take(400) {
            let weekend = matches!(d.weekday(), Weekday::Sat | Weekday::Sun);
            assert_eq!(WeekdayType::of(d) == WeekdayType::Weekend, weekend);
        }
    }

    #[test]
    fn socrata_day_codes_cover_the_week_once() {
        let mut codes: Vec<u8> = WeekdayType::Weekday
            .socrata_day_codes()
            .iter()
            .chain(WeekdayType::Weekend.socrata_day_codes())
            .copied()
            .collect();
        codes.sort_unstable();
        assert_eq!(codes, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn reference_date_from_wednesday_spans_twenty_weekdays() {
        // 2024-03-13 is a Wednesday.
        let today = date(2024, 3, 13);
        let start = today - Days::new(7);
        let found = reference_date(today, true, 7, 20).unwrap();

        assert!(is_weekday(found));
        assert_eq!(count_matching(found, start, true), 20);
        // 2024-03-06 minus 20 weekdays, no holidays considered.
        assert_eq!(found, date(2024, 2, 7));
    }

    #[test]
    fn reference_date_for_weekends_spans_twenty_weekend_days() {
        let today = date(2024, 3, 16);
        let start = today - Days::new(7);
        let found = reference_date(today, false, 7, 20).unwrap();

        assert!(!is_weekday(found));
        assert_eq!(count_matching(found, start, false), 20);
    }

    #[test]
    fn reference_date_holds_for_a_full_year_of_todays() {
        for today in date(2024, 1, 1).iter_days().take(366) {
            for want in [true, false] {
                let start = today - Days::new(u64::from(DATASET_LAG_DAYS));
                let found = default_reference_date(today, want).unwrap();
                assert_eq!(is_weekday(found), want);
                assert_eq!(count_matching(found, start, want), 20, "today={today}");
                let steps = (start - found).num_days();
                assert!(steps <= i64::from(4 * MATCHING_DAY_COUNT), "today={today}");
            }
        }
    }

    #[test]
    fn reference_date_never_counts_the_start_date() {
        // Start (today - 7) is 2024-03-06, a Wednesday. One matching weekday
        // must be the Tuesday before it.
        let today = date(2024, 3, 13);
        assert_eq!(reference_date(today, true, 7, 1), Some(date(2024, 3, 5)));
    }

    #[test]
    fn reference_date_with_zero_count_returns_start() {
        let today = date(2024, 3, 13);
        assert_eq!(reference_date(today, true, 7, 0), Some(date(2024, 3, 6)));
    }

    #[test]
    fn reference_date_stops_at_the_start_of_the_calendar() {
        let earliest = NaiveDate::MIN;
        assert_eq!(reference_date(earliest, true, 7, 20), None);
        assert_eq!(reference_date(earliest, is_weekday(earliest), 0, 0), Some(earliest));

        let near = earliest + Days::new(3);
        assert_eq!(reference_date(near, !is_weekday(earliest), 0, 20), None);
    }

    #[test]
    fn today_uses_chicago_calendar() {
        // 03:30 UTC on the 16th is still the evening of the 15th in Chicago.
        let now = Utc.with_ymd_and_hms(2024, 1, 16, 3, 30, 0).unwrap();
        assert_eq!(today_in_chicago(now), date(2024, 1, 15));
        assert_eq!(chicago_minutes_now(now), 21 * 60 + 30);
    }

    #[test]
    fn chicago_minutes_follow_daylight_saving() {
        // CDT is UTC-5 in July.
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 17, 5, 0).unwrap();
        assert_eq!(chicago_minutes_now(now), 12 * 60 + 5);
    }
}
