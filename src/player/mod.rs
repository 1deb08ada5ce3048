//! Audio player hook: reconciles server-pushed playback commands with the
//! local media element.
//!
//! The server owns what is playing and how far in; the hook owns one
//! `<audio>` element, a progress poll, and the timers around track
//! completion. Everything is torn down by dropping the hook.

pub mod controls;
pub mod progress;
pub mod session;

#[cfg(target_arch = "wasm32")]
mod media;

pub use progress::{ProgressMeter, ProgressStep, ADVANCE_JITTER_MS, POLL_INTERVAL_MS};
pub use session::{canonical_track_url, PlaybackSession, SyncAction};

#[cfg(target_arch = "wasm32")]
pub use hook::{drive, AudioPlayer};

#[cfg(target_arch = "wasm32")]
mod hook {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures_util::{Stream, StreamExt};

    use gloo_timers::callback::{Interval, Timeout};
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::{spawn_local, JsFuture};
    use web_sys::{Document, HtmlElement, MediaMetadata, MouseEvent};

    use super::media::MediaSurface;
    use super::progress::{ProgressMeter, ProgressStep, POLL_INTERVAL_MS};
    use super::session::{PlaybackSession, SyncAction};
    use super::controls;
    use crate::channel::EventChannel;
    use crate::error::HookError;
    use crate::events::{ClientEvent, EventError, PlayPayload, ServerEvent};
    use crate::time;

    /// Id of the affordance revealed when autoplay is blocked.
    const ENABLE_AUDIO_ID: &str = "enable-audio";

    pub(super) struct PlayerInner {
        pub(super) media: MediaSurface,
        pub(super) channel: Rc<dyn EventChannel>,
        session: Option<PlaybackSession>,
        meter: ProgressMeter,
        /// At most one alive; replacing it cancels the old poll.
        poll: Option<Interval>,
        /// At most one pending advance per session.
        advance: Option<Timeout>,
        /// Bumped by every play/pause/stop so stale play-promise resolutions
        /// cannot restart polling for a superseded command.
        generation: u64,
    }

    /// The audio player hook. Dropping it cancels every outstanding timer and
    /// document listener.
    pub struct AudioPlayer {
        pub(super) inner: Rc<RefCell<PlayerInner>>,
        document: Document,
        unlock: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
        pub(super) seek_click: Option<Closure<dyn FnMut(MouseEvent)>>,
        pub(super) volume_click: Option<Closure<dyn FnMut(MouseEvent)>>,
    }

    impl AudioPlayer {
        /// Attach the hook to its host element. The host must contain the
        /// audio element and the display children; anything missing fails the
        /// mount.
        pub fn mount(
            host: &HtmlElement,
            channel: Rc<dyn EventChannel>,
        ) -> Result<AudioPlayer, HookError> {
            let document = web_sys::window()
                .and_then(|w| w.document())
                .ok_or_else(|| HookError::Dom("no document".to_string()))?;
            let media = MediaSurface::bind(host)?;
            let inner = Rc::new(RefCell::new(PlayerInner {
                media,
                channel,
                session: None,
                meter: ProgressMeter::default(),
                poll: None,
                advance: None,
                generation: 0,
            }));
            let mut player = AudioPlayer {
                inner,
                document,
                unlock: Rc::new(RefCell::new(None)),
                seek_click: None,
                volume_click: None,
            };
            player.install_unlock_listener()?;
            controls::install(&mut player)?;
            Ok(player)
        }

        /// Dispatch one server command.
        pub fn handle(&self, event: ServerEvent) {
            match event {
                ServerEvent::Play(payload) => on_play(&self.inner, payload),
                ServerEvent::Pause => on_pause(&self.inner),
                ServerEvent::Stop => on_stop(&self.inner),
                ServerEvent::SetVolume { volume } => {
                    // Server-pushed volume (e.g. after reconnect) is applied
                    // without echoing back.
                    self.inner.borrow().media.set_volume(volume);
                }
            }
        }

        /// Parse and dispatch a raw `(name, payload)` pair from the channel.
        pub fn handle_raw(
            &self,
            name: &str,
            payload: serde_json::Value,
        ) -> Result<(), EventError> {
            self.handle(ServerEvent::parse(name, payload)?);
            Ok(())
        }

        /// Explicit user request to start playback (e.g. a "listen now"
        /// button), synchronized to the server position.
        pub fn listen_now(&self) {
            start_playback(&self.inner, true);
        }

        /// Toggle helper for a play/pause button: only starts when paused.
        pub fn play_if_paused(&self) {
            if self.inner.borrow().media.paused() {
                start_playback(&self.inner, false);
            }
        }

        /// Browsers refuse programmatic playback until a user gesture occurs.
        /// A one-time document click performs a play-then-pause unlock once a
        /// source is set, then detaches itself.
        fn install_unlock_listener(&mut self) -> Result<(), HookError> {
            let weak = Rc::downgrade(&self.inner);
            let document = self.document.clone();
            let slot = Rc::clone(&self.unlock);
            let closure = Closure::wrap(Box::new(move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let ready = {
                    let p = inner.borrow();
                    p.media.has_source()
                };
                if !ready {
                    return;
                }
                if let Some(cb) = slot.borrow().as_ref() {
                    let _ = document.remove_event_listener_with_callback(
                        "click",
                        cb.as_ref().unchecked_ref(),
                    );
                }
                let p = inner.borrow();
                if p.media.never_loaded() {
                    if let Ok(promise) = p.media.play() {
                        // Swallow the rejection; this is only the gesture
                        // unlock, not a real start.
                        spawn_local(async move {
                            let _ = JsFuture::from(promise).await;
                        });
                    }
                    p.media.pause();
                }
            }) as Box<dyn FnMut()>);
            self.document
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            *self.unlock.borrow_mut() = Some(closure);
            Ok(())
        }
    }

    impl Drop for AudioPlayer {
        fn drop(&mut self) {
            if let Some(cb) = self.unlock.borrow().as_ref() {
                let _ = self
                    .document
                    .remove_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
            }
            let p = self.inner.borrow();
            if let Some(cb) = self.seek_click.as_ref() {
                let _ = p
                    .media
                    .progress_track()
                    .remove_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
            }
            if let Some(cb) = self.volume_click.as_ref() {
                let _ = p
                    .media
                    .volume_track()
                    .remove_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
            }
            // Poll and advance timers cancel when `inner` drops.
        }
    }

    /// Pump raw `(name, payload)` pairs from the event channel into the hook
    /// until the stream ends. Malformed events are logged and dropped; they
    /// must not take the whole pump down.
    pub async fn drive(
        player: &AudioPlayer,
        mut events: impl Stream<Item = (String, serde_json::Value)> + Unpin,
    ) {
        while let Some((name, payload)) = events.next().await {
            if let Err(err) = player.handle_raw(&name, payload) {
                log::warn!("dropping inbound event: {err}");
            }
        }
    }

    fn on_play(inner: &Rc<RefCell<PlayerInner>>, payload: PlayPayload) {
        let action = {
            let mut p = inner.borrow_mut();
            // A pending advance from the previous track must never fire into
            // the new one.
            p.advance = None;
            p.meter.reset();
            let session = PlaybackSession::begin(
                payload.url,
                payload.token,
                payload.elapsed,
                time::now_seconds(),
            );
            let action = session.decide(Some(p.media.current_src().as_str()), p.media.paused());
            if action == SyncAction::LoadAndStart {
                p.media.set_source(&session.media_url());
            }
            p.session = Some(session);
            action
        };
        match action {
            SyncAction::AlreadyPlaying => {
                log::debug!("play command for the track already playing; leaving stream alone");
            }
            SyncAction::ResumeInPlace | SyncAction::LoadAndStart => {
                start_playback(inner, true);
            }
        }
        update_media_session(&payload.artist, &payload.title);
    }

    fn on_pause(inner: &Rc<RefCell<PlayerInner>>) {
        let mut p = inner.borrow_mut();
        p.generation = p.generation.wrapping_add(1);
        p.poll = None;
        p.advance = None;
        p.media.pause();
    }

    fn on_stop(inner: &Rc<RefCell<PlayerInner>>) {
        let mut p = inner.borrow_mut();
        p.generation = p.generation.wrapping_add(1);
        p.poll = None;
        p.advance = None;
        p.meter.reset();
        p.media.stop();
    }

    /// Request playback and, once the browser grants it, optionally seek to
    /// the server-implied position and start the progress poll.
    fn start_playback(inner: &Rc<RefCell<PlayerInner>>, sync: bool) {
        let (request, generation) = {
            let mut p = inner.borrow_mut();
            p.generation = p.generation.wrapping_add(1);
            (p.media.play(), p.generation)
        };
        let promise = match request {
            Ok(promise) => promise,
            Err(err) => {
                log::debug!("playback request failed: {err:?}");
                return;
            }
        };
        let weak = Rc::downgrade(inner);
        spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(_) => {
                    let Some(inner) = weak.upgrade() else {
                        return;
                    };
                    {
                        let p = inner.borrow();
                        if p.generation != generation {
                            // A newer command superseded this start.
                            return;
                        }
                        if sync {
                            if let Some(session) = p.session.as_ref() {
                                p.media.seek(session.target_position(time::now_seconds()));
                            }
                        }
                    }
                    start_poll(&inner);
                }
                Err(err) => {
                    if autoplay_blocked(&err) {
                        reveal_enable_audio();
                    } else {
                        // No user-facing recovery path; keep it quiet.
                        log::debug!("media play rejected: {err:?}");
                    }
                }
            }
        });
    }

    fn start_poll(inner: &Rc<RefCell<PlayerInner>>) {
        let weak = Rc::downgrade(inner);
        let interval = Interval::new(POLL_INTERVAL_MS, move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            poll_tick(&inner);
        });
        // Replacing the handle cancels any prior poll.
        inner.borrow_mut().poll = Some(interval);
    }

    fn poll_tick(inner: &Rc<RefCell<PlayerInner>>) {
        let mut p = inner.borrow_mut();
        let position = p.media.position();
        let duration = p.media.duration();
        match p.meter.observe(position, duration) {
            ProgressStep::Skip => {}
            ProgressStep::Render {
                percent,
                elapsed,
                total,
            } => {
                p.media.render_progress(percent, &elapsed, &total);
            }
            ProgressStep::Finish { delay_ms } => {
                let channel = Rc::clone(&p.channel);
                p.advance = Some(Timeout::new(delay_ms, move || {
                    channel.push(ClientEvent::NextTrackAuto);
                }));
                // Detach the finished poll now so a `play` racing this tick
                // installs its interval into an empty slot; the handle itself
                // cannot be dropped from inside its own callback, so it rides
                // along until after a yield to the event loop. The zero-delay
                // timeout expires before the next 100ms tick could fire, and
                // the pending flag keeps any such tick inert anyway.
                let expired = p.poll.take();
                drop(p);
                spawn_local(async move {
                    TimeoutFuture::new(0).await;
                    drop(expired);
                });
            }
        }
    }

    /// Update the platform "now playing" metadata where supported.
    fn update_media_session(artist: &str, title: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let navigator = window.navigator();
        let has_session = js_sys::Reflect::has(navigator.as_ref(), &"mediaSession".into())
            .unwrap_or(false);
        if !has_session {
            return;
        }
        if let Ok(metadata) = MediaMetadata::new() {
            metadata.set_artist(artist);
            metadata.set_title(title);
            navigator.media_session().set_metadata(Some(&metadata));
        }
    }

    fn autoplay_blocked(err: &JsValue) -> bool {
        js_sys::Reflect::get(err, &"name".into())
            .ok()
            .and_then(|name| name.as_string())
            .is_some_and(|name| name == "NotAllowedError")
    }

    /// Reveal the "enable audio" affordance so a user gesture can unlock
    /// playback. Not an error: this is the expected autoplay-policy path.
    fn reveal_enable_audio() {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        match document.get_element_by_id(ENABLE_AUDIO_ID) {
            Some(el) => {
                let _ = el.remove_attribute("hidden");
            }
            None => log::debug!("autoplay blocked but no #{ENABLE_AUDIO_ID} element to reveal"),
        }
    }
}
