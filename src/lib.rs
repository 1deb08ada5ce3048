//! Browser-side hooks for a server-driven music UI.
//!
//! The server decides what plays and how far in; this crate owns the DOM
//! side: an audio player hook that keeps the local `<audio>` element
//! synchronized to the server's position, plus the small hooks around it
//! (flash dismissal, ping display, connection status, focus handling).
//!
//! The transport is the application's concern: it constructs something
//! implementing [`channel::EventChannel`], hands it to the hooks, and feeds
//! inbound `(name, payload)` pairs to [`player::AudioPlayer::handle_raw`].
//!
//! Pure decision logic (synchronized-seek math, completion detection, click
//! fractions) compiles on any target; everything touching the DOM is gated
//! to `wasm32`.

pub mod channel;
pub mod error;
pub mod events;
pub mod player;
pub mod time;

#[cfg(target_arch = "wasm32")]
pub mod focus;
#[cfg(target_arch = "wasm32")]
pub mod hooks;

pub use channel::EventChannel;
pub use error::HookError;
pub use events::{ClientEvent, EventError, PlayPayload, ServerEvent};

#[cfg(target_arch = "wasm32")]
pub use player::AudioPlayer;

/// Route panics and `log` records to the browser console. Call once at
/// startup, before mounting any hook.
#[cfg(target_arch = "wasm32")]
pub fn init() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).unwrap_or(());
}
