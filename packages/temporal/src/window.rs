//! Time-of-day proximity on a 24-hour clock.
//!
//! Times are compared as minutes since midnight on a cycle of
//! [`MINUTES_PER_DAY`], so 23:55 and 00:05 are ten minutes apart.

use chrono::{NaiveTime, Timelike as _};

/// Length of the time-of-day cycle in minutes.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Default half-width of the time-of-day window (two hours either side).
pub const DEFAULT_WINDOW_MINUTES: u32 = 2 * 60;

/// Minutes elapsed since midnight, in `0..MINUTES_PER_DAY`.
#[must_use]
pub fn minutes_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Shortest distance between `a` and `b` on a cycle of length `cycle`.
///
/// Inputs are reduced modulo `cycle` first. The result is symmetric and
/// never exceeds `cycle / 2`.
#[must_use]
pub const fn circular_distance(a: u32, b: u32, cycle: u32) -> u32 {
    if cycle == 0 {
        return 0;
    }
    let diff = (a % cycle).abs_diff(b % cycle);
    let wrapped = cycle - diff;
    if diff < wrapped { diff } else { wrapped }
}

/// Whether two minute-of-day values lie within `tolerance` minutes of each
/// other on the daily cycle.
#[must_use]
pub const fn within_time_window(a: u32, b: u32, tolerance: u32) -> bool {
    circular_distance(a, b, MINUTES_PER_DAY) <= tolerance
}
