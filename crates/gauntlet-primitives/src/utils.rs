use chrono::Utc;

/// Current unix time in milliseconds.
#[must_use]
pub fn now_ms() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
}

/// Exclusivity deadline in unix seconds, counted from a millisecond timestamp.
#[must_use]
pub fn exclusivity_expiry(from_ms: u64, winner_permission_time_secs: u64) -> u64 {
    (from_ms / 1000).saturating_add(winner_permission_time_secs)
}
