//! End-of-track detection and progress rendering decisions.
//!
//! The meter is deliberately free of browser types: the poll loop feeds it
//! raw position/duration readings and applies whatever step comes back.

use crate::time;

/// Poll cadence while a track is playing.
pub const POLL_INTERVAL_MS: u32 = 100;

/// Upper bound for the auto-advance delay. Clients synchronized to the same
/// server stream all reach end-of-track within the same poll tick; spreading
/// their advance requests keeps the backend from seeing a correlated burst.
pub const ADVANCE_JITTER_MS: u32 = 1500;

/// What the poll loop should do with one position reading.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressStep {
    /// Metadata not loaded yet, or an advance is already scheduled.
    Skip,
    /// Track complete: stop polling and schedule the auto-advance after
    /// `delay_ms`.
    Finish { delay_ms: u32 },
    /// Normal tick: redraw the bar and both time texts.
    Render {
        percent: f64,
        elapsed: String,
        total: String,
    },
}

/// Tracks whether an auto-advance is pending so completion fires at most once
/// per track.
#[derive(Debug, Default)]
pub struct ProgressMeter {
    advance_pending: bool,
}

impl ProgressMeter {
    pub fn observe(&mut self, position: f64, duration: f64) -> ProgressStep {
        if !duration.is_finite() {
            return ProgressStep::Skip;
        }
        if self.advance_pending {
            return ProgressStep::Skip;
        }
        if position >= duration {
            self.advance_pending = true;
            return ProgressStep::Finish {
                delay_ms: time::jitter_ms(ADVANCE_JITTER_MS),
            };
        }
        ProgressStep::Render {
            percent: (position / duration) * 100.0,
            elapsed: time::format_clock(position),
            total: time::format_clock(duration),
        }
    }

    /// Clear the pending flag when playback stops or a new track starts.
    pub fn reset(&mut self) {
        self.advance_pending = false;
    }

    pub fn advance_pending(&self) -> bool {
        self.advance_pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unloaded_duration_renders_nothing() {
        let mut meter = ProgressMeter::default();
        assert_eq!(meter.observe(0.0, f64::NAN), ProgressStep::Skip);
        assert_eq!(meter.observe(3.0, f64::INFINITY), ProgressStep::Skip);
        assert!(!meter.advance_pending());
    }

    #[test]
    fn renders_percent_and_clock_texts() {
        let mut meter = ProgressMeter::default();
        match meter.observe(125.0, 250.0) {
            ProgressStep::Render {
                percent,
                elapsed,
                total,
            } => {
                assert!((percent - 50.0).abs() < 1e-9);
                assert_eq!(elapsed, "02:05");
                assert_eq!(total, "04:10");
            }
            other => panic!("expected render, got {other:?}"),
        }
    }

    #[test]
    fn completion_fires_once_with_bounded_jitter() {
        let mut meter = ProgressMeter::default();
        match meter.observe(180.0, 180.0) {
            ProgressStep::Finish { delay_ms } => assert!(delay_ms < ADVANCE_JITTER_MS),
            other => panic!("expected finish, got {other:?}"),
        }
        // Further ticks while the advance is pending must not reschedule.
        assert_eq!(meter.observe(180.0, 180.0), ProgressStep::Skip);
        assert_eq!(meter.observe(181.0, 180.0), ProgressStep::Skip);
        assert!(meter.advance_pending());
    }

    #[test]
    fn reset_rearms_completion_for_the_next_track() {
        let mut meter = ProgressMeter::default();
        let _ = meter.observe(10.0, 10.0);
        meter.reset();
        assert!(!meter.advance_pending());
        assert!(matches!(
            meter.observe(10.0, 10.0),
            ProgressStep::Finish { .. }
        ));
    }

    #[test]
    fn next_track_renders_while_old_poll_teardown_is_still_deferred() {
        // End-of-track detection hands the finished poll off for deferred
        // cancellation; a `play` for the next track can arrive before that
        // teardown runs. The reset meter must render the new track, and any
        // straggling tick from the finished poll era must not have consumed
        // the render by re-finishing.
        let mut meter = ProgressMeter::default();
        assert!(matches!(
            meter.observe(180.0, 180.0),
            ProgressStep::Finish { .. }
        ));
        // Straggling tick from the old poll before its teardown fires.
        assert_eq!(meter.observe(180.0, 180.0), ProgressStep::Skip);
        // New track starts: meter is reset, fresh poll takes over.
        meter.reset();
        match meter.observe(0.5, 200.0) {
            ProgressStep::Render { percent, .. } => assert!(percent < 1.0),
            other => panic!("expected render, got {other:?}"),
        }
    }

    #[test]
    fn position_past_duration_still_finishes() {
        let mut meter = ProgressMeter::default();
        assert!(matches!(
            meter.observe(200.5, 180.0),
            ProgressStep::Finish { .. }
        ));
    }
}
