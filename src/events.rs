//! Typed vocabulary for the bidirectional event channel.
//!
//! The transport itself lives in the composing application; this module only
//! fixes the event names and payload shapes so the hooks never touch raw JSON
//! more than once.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payload of the server's `play` command.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlayPayload {
    pub url: String,
    pub token: String,
    /// Seconds the server considers already elapsed when the command was sent.
    #[serde(default)]
    pub elapsed: f64,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub title: String,
}

/// Commands pushed by the server to the audio player hook.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    Play(PlayPayload),
    Pause,
    Stop,
    SetVolume { volume: f64 },
}

impl ServerEvent {
    /// Build a typed event from a raw `(name, payload)` pair as delivered by
    /// the event channel.
    pub fn parse(name: &str, payload: serde_json::Value) -> Result<Self, EventError> {
        match name {
            "play" => Ok(ServerEvent::Play(serde_json::from_value(payload)?)),
            "pause" => Ok(ServerEvent::Pause),
            "stop" => Ok(ServerEvent::Stop),
            "set_volume" => {
                #[derive(Deserialize)]
                struct VolumePayload {
                    volume: f64,
                }
                let VolumePayload { volume } = serde_json::from_value(payload)?;
                Ok(ServerEvent::SetVolume { volume })
            }
            other => Err(EventError::UnknownEvent(other.to_string())),
        }
    }
}

/// Events the hooks push back to the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ClientEvent {
    Volume { volume: f64 },
    NextTrackAuto,
    Ping { rtt: Option<f64> },
}

impl ClientEvent {
    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::Volume { .. } => "volume",
            ClientEvent::NextTrackAuto => "next_song_auto",
            ClientEvent::Ping { .. } => "ping",
        }
    }

    /// JSON payload of the event. Events without fields carry an empty map.
    pub fn payload(&self) -> serde_json::Value {
        match self {
            ClientEvent::NextTrackAuto => serde_json::json!({}),
            other => serde_json::to_value(other).unwrap_or_else(|_| serde_json::json!({})),
        }
    }
}

#[derive(Debug, Error)]
pub enum EventError {
    #[error("unknown server event: {0}")]
    UnknownEvent(String),
    #[error("malformed event payload: {0}")]
    BadPayload(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_play_payload() {
        let payload = json!({
            "url": "http://localhost:4000/files/song.mp3",
            "token": "abc123",
            "elapsed": 42.0,
            "artist": "Some Artist",
            "title": "Some Song",
        });
        let event = ServerEvent::parse("play", payload).unwrap();
        match event {
            ServerEvent::Play(play) => {
                assert_eq!(play.url, "http://localhost:4000/files/song.mp3");
                assert_eq!(play.token, "abc123");
                assert_eq!(play.elapsed, 42.0);
                assert_eq!(play.artist, "Some Artist");
            }
            other => panic!("expected play, got {other:?}"),
        }
    }

    #[test]
    fn play_metadata_is_optional() {
        let payload = json!({ "url": "/files/a.mp3", "token": "t" });
        let event = ServerEvent::parse("play", payload).unwrap();
        match event {
            ServerEvent::Play(play) => {
                assert_eq!(play.elapsed, 0.0);
                assert!(play.artist.is_empty());
                assert!(play.title.is_empty());
            }
            other => panic!("expected play, got {other:?}"),
        }
    }

    #[test]
    fn parses_bare_commands_and_volume() {
        assert_eq!(
            ServerEvent::parse("pause", json!({})).unwrap(),
            ServerEvent::Pause
        );
        assert_eq!(
            ServerEvent::parse("stop", json!({})).unwrap(),
            ServerEvent::Stop
        );
        assert_eq!(
            ServerEvent::parse("set_volume", json!({ "volume": 0.25 })).unwrap(),
            ServerEvent::SetVolume { volume: 0.25 }
        );
    }

    #[test]
    fn rejects_unknown_events_and_bad_payloads() {
        assert!(matches!(
            ServerEvent::parse("shuffle", json!({})),
            Err(EventError::UnknownEvent(_))
        ));
        assert!(matches!(
            ServerEvent::parse("set_volume", json!({})),
            Err(EventError::BadPayload(_))
        ));
    }

    #[test]
    fn outbound_events_have_wire_names_and_payloads() {
        let volume = ClientEvent::Volume { volume: 0.5 };
        assert_eq!(volume.name(), "volume");
        assert_eq!(volume.payload(), json!({ "volume": 0.5 }));

        let advance = ClientEvent::NextTrackAuto;
        assert_eq!(advance.name(), "next_song_auto");
        assert_eq!(advance.payload(), json!({}));

        let ping = ClientEvent::Ping { rtt: None };
        assert_eq!(ping.name(), "ping");
        assert_eq!(ping.payload(), json!({ "rtt": null }));
    }
}
