//! Clock and formatting helpers shared by the hooks.

use rand::Rng;

/// Current wall-clock time in milliseconds since the Unix epoch.
#[cfg(target_arch = "wasm32")]
pub fn now_millis() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_millis() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}

/// Current wall-clock time in whole seconds.
pub fn now_seconds() -> f64 {
    (now_millis() / 1000.0).round()
}

/// Uniform random delay in `[0, bound)` milliseconds.
pub fn jitter_ms(bound: u32) -> u32 {
    if bound == 0 {
        return 0;
    }
    rand::thread_rng().gen_range(0..bound)
}

/// Render a position in seconds as zero-padded `mm:ss`.
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() { seconds.max(0.0) as u64 } else { 0 };
    let mins = total / 60;
    let secs = total % 60;
    format!("{mins:02}:{secs:02}")
}
