use chrono::Utc;
use std::sync::Arc;

/// Epoch-millisecond clock, injectable so capture instants are
/// deterministic under test.
pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

/// The wall clock.
#[must_use]
pub fn system_clock() -> Clock {
    Arc::new(|| Utc::now().timestamp_millis())
}

/// A clock pinned to one instant.
#[must_use]
pub fn fixed_clock(epoch_ms: i64) -> Clock {
    Arc::new(move || epoch_ms)
}

/// Generate a URL-safe random ID of a given length.
#[must_use]
pub fn nice_id(length: usize) -> String {
    const URL_SAFE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_";
    (0..length)
        .map(|_| {
            let idx = fastrand::usize(0..URL_SAFE.len());
            URL_SAFE[idx] as char
        })
        .collect()
}
