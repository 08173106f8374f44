//! Calendar-day window helpers
//!
//! All windows are computed in UTC from an injected `now` so callers (and
//! tests) control the clock. The discovery cutoff intentionally spans roughly
//! 24-48 hours depending on time-of-day, to tolerate polling latency.

use chrono::{DateTime, Duration, NaiveTime, Utc};

/// Midnight UTC of the day containing `ts`
pub fn start_of_day(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Oldest `updated` timestamp a feed entry may carry and still be considered
/// recent: the start of yesterday's day boundary
pub fn discovery_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    start_of_day(now - Duration::days(1))
}

/// Today's calendar-day window `[start, end)`
pub fn day_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = start_of_day(now);
    (start, start + Duration::days(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_start_of_day() {
        assert_eq!(
            start_of_day(ts("2024-03-15T17:45:12Z")),
            ts("2024-03-15T00:00:00Z")
        );
        assert_eq!(
            start_of_day(ts("2024-03-15T00:00:00Z")),
            ts("2024-03-15T00:00:00Z")
        );
    }

    #[test]
    fn test_discovery_cutoff_spans_into_yesterday() {
        // just after midnight: the window reaches back almost 48 hours
        assert_eq!(
            discovery_cutoff(ts("2024-03-15T00:10:00Z")),
            ts("2024-03-14T00:00:00Z")
        );
        // just before midnight: barely more than 24 hours
        assert_eq!(
            discovery_cutoff(ts("2024-03-15T23:50:00Z")),
            ts("2024-03-14T00:00:00Z")
        );
    }

    #[test]
    fn test_day_bounds() {
        let (start, end) = day_bounds(ts("2024-03-15T17:45:12Z"));
        assert_eq!(start, ts("2024-03-15T00:00:00Z"));
        assert_eq!(end, ts("2024-03-16T00:00:00Z"));
    }
}
