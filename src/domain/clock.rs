//! Clock and timezone adapter.
//!
//! Everything date-related goes through [`Clock`] so that expiration math can
//! be tested against a pinned instant, and through [`to_local`] so that no
//! call site hardcodes a UTC offset.

use chrono::{DateTime, Duration, Utc};

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a fixed instant, for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Shifts a stored UTC instant into a user's local wall time.
#[must_use]
pub fn to_local(instant: DateTime<Utc>, offset_hours: i32) -> DateTime<Utc> {
    instant + Duration::hours(i64::from(offset_hours))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn to_local_applies_offset_in_both_directions() {
        let noon = Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap();

        let pacific = to_local(noon, -8);
        assert_eq!(pacific.to_rfc3339(), "2026-03-14T04:00:00+00:00");

        let tokyo = to_local(noon, 9);
        assert_eq!(tokyo.to_rfc3339(), "2026-03-14T21:00:00+00:00");

        assert_eq!(to_local(noon, 0), noon);
    }

    #[test]
    fn fixed_clock_is_stable() {
        let instant = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let clock = FixedClock(instant);
        assert_eq!(clock.now(), clock.now());
    }
}
