//! Date math for the expiration calculator.
//!
//! The absolute expiration instant is always derived from `last_purchased`
//! plus the shelf life, shifted by the caller's display offset. Nothing here
//! is cached or persisted, so the value can never go stale when an item is
//! restocked.

use chrono::{DateTime, Duration, Utc};

/// Absolute instant at which an item expires, shifted into the display
/// timezone. `offset_hours` is signed (the historical deployment used -8).
#[must_use]
pub fn expiration_instant(
    last_purchased: DateTime<Utc>,
    shelf_life_days: i32,
    offset_hours: i32,
) -> DateTime<Utc> {
    last_purchased
        + Duration::days(i64::from(shelf_life_days))
        + Duration::hours(i64::from(offset_hours))
}

/// Whole days until expiration, floored toward negative infinity so that an
/// item expired earlier today reports -1, not 0.
#[must_use]
pub fn days_remaining(
    last_purchased: DateTime<Utc>,
    shelf_life_days: i32,
    offset_hours: i32,
    now: DateTime<Utc>,
) -> i64 {
    floor_days(expiration_instant(last_purchased, shelf_life_days, offset_hours) - now)
}

fn floor_days(delta: Duration) -> i64 {
    let mut secs = delta.num_seconds();
    // num_seconds truncates toward zero; pull sub-second negatives down.
    if delta.subsec_nanos() < 0 {
        secs -= 1;
    }
    secs.div_euclid(86_400)
}
