//! Opening-range high: the breakout reference for the session.

use chrono::{Duration, NaiveTime};
use chrono_tz::Tz;

use crate::models::Bar;

/// Highest high among bars whose venue-local time falls inside the
/// opening window `[open, open + minutes)`.
///
/// Returns None when no bar lands in the window, e.g. a feed that only
/// starts returning data later in the session.
pub fn opening_range_high(
    bars: &[Bar],
    timezone: Tz,
    open: NaiveTime,
    minutes: i64,
) -> Option<f64> {
    let (end, _) = open.overflowing_add_signed(Duration::minutes(minutes));

    bars.iter()
        .filter(|bar| {
            let local = bar.timestamp.with_timezone(&timezone).time();
            local >= open && local < end
        })
        .map(|bar| bar.high)
        .fold(None, |acc, high| match acc {
            Some(current) if current >= high => Some(current),
            _ => Some(high),
        })
}
