//! Server-authoritative playback session.
//!
//! A session is created whole from every `play` command and replaced whole by
//! the next one. Its job is to answer two questions: where should the local
//! element be seeked to right now, and does the incoming track match what is
//! already loaded.

/// Strip the query string (access token and friends) before comparing track
/// identity. The element's `src` carries the token; the server's URL does not.
pub fn canonical_track_url(src: &str) -> &str {
    src.split_once('?').map_or(src, |(base, _)| base)
}

/// What the synchronization controller should do with a `play` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// Same track, currently paused: resume after a synchronized seek.
    ResumeInPlace,
    /// Different track: load the tokenized URL, then start with a
    /// synchronized seek.
    LoadAndStart,
    /// Same track, already playing: leave the stream alone.
    AlreadyPlaying,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSession {
    track_url: String,
    token: String,
    server_elapsed: f64,
    received_at: f64,
}

impl PlaybackSession {
    pub fn begin(track_url: String, token: String, server_elapsed: f64, received_at: f64) -> Self {
        Self {
            track_url,
            token,
            server_elapsed,
            received_at,
        }
    }

    /// Estimated wall-clock second at which the server started this track.
    pub fn origin(&self) -> f64 {
        self.received_at - self.server_elapsed
    }

    /// Position the client should be at when it synchronizes at `now`.
    pub fn target_position(&self, now: f64) -> f64 {
        (now - self.origin()).max(0.0)
    }

    /// Track URL with the access token appended for the media element.
    pub fn media_url(&self) -> String {
        format!("{}?token={}", self.track_url, self.token)
    }

    pub fn track_url(&self) -> &str {
        &self.track_url
    }

    /// Compare against the element's live `src` (token stripped) and its
    /// paused flag.
    pub fn decide(&self, current_src: Option<&str>, paused: bool) -> SyncAction {
        let same_track = current_src
            .map(canonical_track_url)
            .is_some_and(|current| !current.is_empty() && current == self.track_url);
        if !same_track {
            SyncAction::LoadAndStart
        } else if paused {
            SyncAction::ResumeInPlace
        } else {
            SyncAction::AlreadyPlaying
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://localhost:4000/files/track.mp3";

    fn session(elapsed: f64, received_at: f64) -> PlaybackSession {
        PlaybackSession::begin(URL.to_string(), "tok".to_string(), elapsed, received_at)
    }

    #[test]
    fn canonical_url_strips_query() {
        assert_eq!(canonical_track_url("http://a/b.mp3?token=xyz"), "http://a/b.mp3");
        assert_eq!(canonical_track_url("http://a/b.mp3"), "http://a/b.mp3");
        assert_eq!(canonical_track_url(""), "");
    }

    #[test]
    fn synchronized_seek_lands_at_server_position() {
        // `play` with elapsed E received at T, resumed Δ later, must land at
        // E + Δ.
        let (e, t) = (42.0, 1_000.0);
        let s = session(e, t);
        for delta in [0.0, 1.0, 7.5, 600.0] {
            assert_eq!(s.target_position(t + delta), e + delta);
        }
    }

    #[test]
    fn target_position_never_goes_negative() {
        // A clock skewed behind the receipt time must not seek before zero.
        let s = session(5.0, 1_000.0);
        assert_eq!(s.target_position(990.0), 0.0);
    }

    #[test]
    fn media_url_carries_the_token() {
        assert_eq!(session(0.0, 0.0).media_url(), format!("{URL}?token=tok"));
    }

    #[test]
    fn same_track_paused_resumes_in_place() {
        let s = session(0.0, 0.0);
        let src = format!("{URL}?token=old");
        assert_eq!(s.decide(Some(&src), true), SyncAction::ResumeInPlace);
    }

    #[test]
    fn same_track_playing_is_a_no_op() {
        let s = session(0.0, 0.0);
        let src = format!("{URL}?token=old");
        assert_eq!(s.decide(Some(&src), false), SyncAction::AlreadyPlaying);
    }

    #[test]
    fn different_or_missing_track_loads_fresh() {
        let s = session(0.0, 0.0);
        assert_eq!(
            s.decide(Some("http://localhost:4000/files/other.mp3?token=x"), true),
            SyncAction::LoadAndStart
        );
        assert_eq!(s.decide(Some(""), true), SyncAction::LoadAndStart);
        assert_eq!(s.decide(None, true), SyncAction::LoadAndStart);
    }
}
