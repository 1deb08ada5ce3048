//! Wasm-side checks of the pure helpers, using the browser's clock and
//! random source.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use chorus_web::player::controls::click_fraction;
use chorus_web::player::{ProgressMeter, ProgressStep, ADVANCE_JITTER_MS};
use chorus_web::time;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn clock_formats_zero_padded() {
    assert_eq!(time::format_clock(125.0), "02:05");
    assert_eq!(time::format_clock(0.0), "00:00");
}

#[wasm_bindgen_test]
fn jitter_uses_browser_rng_within_bound() {
    for _ in 0..500 {
        assert!(time::jitter_ms(ADVANCE_JITTER_MS) < ADVANCE_JITTER_MS);
    }
}

#[wasm_bindgen_test]
fn click_fraction_matches_bar_percent() {
    assert_eq!(click_fraction(75.0, 300.0), 0.25);
}

#[wasm_bindgen_test]
async fn zero_delay_timeout_yields_and_completes() {
    // The player defers dropping a finished poll handle across one of these.
    gloo_timers::future::TimeoutFuture::new(0).await;
}

#[wasm_bindgen_test]
fn meter_skips_until_metadata_arrives() {
    let mut meter = ProgressMeter::default();
    assert_eq!(meter.observe(0.0, f64::NAN), ProgressStep::Skip);
}
