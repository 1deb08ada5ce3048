//! Thin control surface over the hook's media element and display bindings.
//!
//! The display elements are render targets only; the audio element owns the
//! live playback state and this wrapper never caches it.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{HtmlAudioElement, HtmlElement};

use crate::error::HookError;

pub(super) struct MediaSurface {
    audio: HtmlAudioElement,
    time_text: HtmlElement,
    duration_text: HtmlElement,
    progress_bar: HtmlElement,
    progress_track: HtmlElement,
    volume_bar: HtmlElement,
    volume_track: HtmlElement,
}

impl MediaSurface {
    /// Resolve the audio element and display bindings under the host element.
    /// Any missing child fails the mount.
    pub fn bind(host: &HtmlElement) -> Result<Self, HookError> {
        Ok(Self {
            audio: child(host, "audio")?
                .dyn_into()
                .map_err(|_| HookError::WrongElementType {
                    selector: "audio",
                    expected: "HtmlAudioElement",
                })?,
            time_text: child(host, "#player-time")?,
            duration_text: child(host, "#player-duration")?,
            progress_bar: child(host, "#player-progress")?,
            progress_track: child(host, "#player-progress-container")?,
            volume_bar: child(host, "#player-volume")?,
            volume_track: child(host, "#player-volume-container")?,
        })
    }

    /// Request playback; the caller awaits the promise to learn whether the
    /// browser allowed it.
    pub fn play(&self) -> Result<js_sys::Promise, JsValue> {
        self.audio.play()
    }

    pub fn pause(&self) {
        let _ = self.audio.pause();
    }

    /// Pause, rewind, and blank the displayed times.
    pub fn stop(&self) {
        self.pause();
        self.audio.set_current_time(0.0);
        self.draw_progress_fraction(0.0);
        self.time_text.set_inner_text("");
        self.duration_text.set_inner_text("");
    }

    pub fn seek(&self, seconds: f64) {
        self.audio.set_current_time(seconds.max(0.0));
    }

    /// Set the element volume and redraw the bar proportionally.
    pub fn set_volume(&self, fraction: f64) {
        let fraction = fraction.clamp(0.0, 1.0);
        self.audio.set_volume(fraction);
        set_bar_width(&self.volume_bar, fraction * 100.0);
    }

    pub fn set_source(&self, url: &str) {
        self.audio.set_src(url);
    }

    pub fn current_src(&self) -> String {
        self.audio.src()
    }

    pub fn has_source(&self) -> bool {
        !self.audio.src().is_empty()
    }

    /// HAVE_NOTHING: no media data loaded yet.
    pub fn never_loaded(&self) -> bool {
        self.audio.ready_state() == 0
    }

    pub fn position(&self) -> f64 {
        self.audio.current_time()
    }

    pub fn duration(&self) -> f64 {
        self.audio.duration()
    }

    pub fn paused(&self) -> bool {
        self.audio.paused()
    }

    pub fn render_progress(&self, percent: f64, elapsed: &str, total: &str) {
        set_bar_width(&self.progress_bar, percent);
        self.time_text.set_inner_text(elapsed);
        self.duration_text.set_inner_text(total);
    }

    pub fn draw_progress_fraction(&self, fraction: f64) {
        set_bar_width(&self.progress_bar, fraction * 100.0);
    }

    pub fn progress_track(&self) -> &HtmlElement {
        &self.progress_track
    }

    pub fn volume_track(&self) -> &HtmlElement {
        &self.volume_track
    }

    pub fn progress_track_width(&self) -> f64 {
        f64::from(self.progress_track.offset_width())
    }

    pub fn volume_track_width(&self) -> f64 {
        f64::from(self.volume_track.offset_width())
    }
}

fn child(host: &HtmlElement, selector: &'static str) -> Result<HtmlElement, HookError> {
    host.query_selector(selector)?
        .ok_or(HookError::MissingChild(selector))?
        .dyn_into()
        .map_err(|_| HookError::WrongElementType {
            selector,
            expected: "HtmlElement",
        })
}

fn set_bar_width(bar: &HtmlElement, percent: f64) {
    let _ = bar
        .style()
        .set_property("width", &format!("{}%", percent.clamp(0.0, 100.0)));
}
