//! User-driven seek and volume input.
//!
//! Click positions are reduced to a whole-percent fraction of the track
//! width, matching how the bars are drawn, before touching the element.

#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};
#[cfg(target_arch = "wasm32")]
use web_sys::MouseEvent;

#[cfg(target_arch = "wasm32")]
use crate::events::ClientEvent;
#[cfg(target_arch = "wasm32")]
use crate::error::HookError;

#[cfg(target_arch = "wasm32")]
use super::AudioPlayer;

/// Horizontal click offset as a fraction of the track width, floored to a
/// whole percent and clamped to `[0, 1]`.
pub fn click_fraction(offset_x: f64, track_width: f64) -> f64 {
    if track_width <= 0.0 || !offset_x.is_finite() || !track_width.is_finite() {
        return 0.0;
    }
    let percent = ((offset_x / track_width) * 100.0).floor().clamp(0.0, 100.0);
    percent / 100.0
}

/// Attach the click-to-seek and click-to-set-volume listeners.
#[cfg(target_arch = "wasm32")]
pub(super) fn install(player: &mut AudioPlayer) -> Result<(), HookError> {
    let seek = {
        let weak = Rc::downgrade(&player.inner);
        Closure::wrap(Box::new(move |event: MouseEvent| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let p = inner.borrow();
            let fraction = click_fraction(event.offset_x() as f64, p.media.progress_track_width());
            // Optimistic redraw before the element confirms the new position.
            p.media.draw_progress_fraction(fraction);
            let duration = p.media.duration();
            if duration.is_finite() {
                p.media.seek(fraction * duration);
            }
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    player
        .inner
        .borrow()
        .media
        .progress_track()
        .add_event_listener_with_callback("click", seek.as_ref().unchecked_ref())?;
    player.seek_click = Some(seek);

    let volume = {
        let weak = Rc::downgrade(&player.inner);
        Closure::wrap(Box::new(move |event: MouseEvent| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let p = inner.borrow();
            let fraction = click_fraction(event.offset_x() as f64, p.media.volume_track_width());
            p.media.set_volume(fraction);
            // User-initiated changes echo to the server; server-pushed ones
            // never do.
            p.channel.push(ClientEvent::Volume { volume: fraction });
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    player
        .inner
        .borrow()
        .media
        .volume_track()
        .add_event_listener_with_callback("click", volume.as_ref().unchecked_ref())?;
    player.volume_click = Some(volume);

    Ok(())
}
