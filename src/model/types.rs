use serde::{Deserialize, Serialize};

/// Media playback lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Buffering,
    Playing,
    Paused,
    Error,
}

impl PlaybackState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackState::Idle => "idle",
            PlaybackState::Loading => "loading",
            PlaybackState::Loaded => "loaded",
            PlaybackState::Buffering => "buffering",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
            PlaybackState::Error => "error",
        }
    }
}

/// How the time axis of the active stream behaves. Unset stream type is
/// treated as VOD throughout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamType {
    #[default]
    Vod,
    Live,
    Dvr,
}

impl StreamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamType::Vod => "VOD",
            StreamType::Live => "LIVE",
            StreamType::Dvr => "DVR",
        }
    }
}

/// Seekable window reported by the provider, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SeekRange {
    pub start: f64,
    pub end: f64,
}

/// One selectable rendition of the active stream.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QualityLevel {
    pub label: String,
    pub bitrate: Option<f64>,
}

/// Rendition actually in use, as reported by the provider.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisualQuality {
    pub mode: String,
    pub reason: String,
    pub level: QualityLevel,
}

/// A subtitle/caption track the user can select.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CaptionsTrack {
    #[serde(default)]
    pub id: String,
    pub label: String,
}

/// Side-loaded track kinds the timeline knows how to dispatch.
/// Unrecognized kinds deserialize to `Other` and are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Thumbnails,
    Chapters,
    Comments,
    #[serde(other)]
    Other,
}

/// A side-loaded track attached to a playlist item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideTrack {
    pub kind: TrackKind,
    pub file: String,
}

/// One entry of the playlist. The DVR fields override the configured
/// defaults for the duration of the item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaylistItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub starttime: f64,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub min_dvr_window: Option<f64>,
    #[serde(default)]
    pub dvr_seek_limit: Option<f64>,
    #[serde(default)]
    pub tracks: Vec<SideTrack>,
}

/// Autostart preference. `Viewable` defers the start until the player
/// scrolls into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Autostart {
    #[default]
    Off,
    On,
    Viewable,
}

// Stored as `false` / `true` / `"viewable"`, the shape player configs use.
impl From<Autostart> for crate::store::Value {
    fn from(value: Autostart) -> Self {
        match value {
            Autostart::Off => crate::store::Value::Bool(false),
            Autostart::On => crate::store::Value::Bool(true),
            Autostart::Viewable => crate::store::Value::Str("viewable".to_string()),
        }
    }
}

impl Autostart {
    pub fn from_value(value: &crate::store::Value) -> Self {
        match value {
            crate::store::Value::Bool(true) => Autostart::On,
            crate::store::Value::Str(s) if s == "viewable" => Autostart::Viewable,
            _ => Autostart::Off,
        }
    }
}

/// Host platform capabilities injected at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlatformCaps {
    pub mobile: bool,
}

/// When an annotation happens: either playback seconds or a percentage
/// of the timeline (the `"25%"` convention of comment payloads).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnnotationTime {
    Seconds(f64),
    Percent(f64),
}

impl AnnotationTime {
    /// Playback seconds, if this time is absolute.
    pub fn seconds(&self) -> Option<f64> {
        match self {
            AnnotationTime::Seconds(s) => Some(*s),
            AnnotationTime::Percent(_) => None,
        }
    }

    /// Rail percentage for the given duration. Percent times pass
    /// through unchanged; the caller guards against zero duration.
    pub fn percent_on(&self, duration: f64) -> f64 {
        match self {
            AnnotationTime::Seconds(s) => s / duration * 100.0,
            AnnotationTime::Percent(p) => *p,
        }
    }

    fn parse(text: &str) -> Result<Self, String> {
        let trimmed = text.trim();
        if let Some(stripped) = trimmed.strip_suffix('%') {
            stripped
                .trim()
                .parse::<f64>()
                .map(AnnotationTime::Percent)
                .map_err(|_| format!("invalid percentage time {trimmed:?}"))
        } else {
            trimmed
                .parse::<f64>()
                .map(AnnotationTime::Seconds)
                .map_err(|_| format!("invalid time {trimmed:?}"))
        }
    }
}

impl<'de> Deserialize<'de> for AnnotationTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(AnnotationTime::Seconds(n)),
            Raw::Text(s) => AnnotationTime::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}

/// A timed viewer comment shown on the rail.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub time: AnnotationTime,
    pub author: String,
    pub text: String,
}

/// A chapter cue shown on the rail.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub time: AnnotationTime,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotation_time_from_number() {
        let time: AnnotationTime = serde_json::from_str("12.5").unwrap();
        assert_eq!(time, AnnotationTime::Seconds(12.5));
    }

    #[test]
    fn annotation_time_from_percent_string() {
        let time: AnnotationTime = serde_json::from_str("\"25%\"").unwrap();
        assert_eq!(time, AnnotationTime::Percent(25.0));
    }

    #[test]
    fn annotation_time_from_numeric_string() {
        let time: AnnotationTime = serde_json::from_str("\"30\"").unwrap();
        assert_eq!(time, AnnotationTime::Seconds(30.0));
    }

    #[test]
    fn annotation_time_rejects_garbage() {
        assert!(serde_json::from_str::<AnnotationTime>("\"later\"").is_err());
        assert!(serde_json::from_str::<AnnotationTime>("\"%\"").is_err());
    }

    #[test]
    fn percent_on_passes_percent_through() {
        assert_eq!(AnnotationTime::Percent(40.0).percent_on(120.0), 40.0);
        assert_eq!(AnnotationTime::Seconds(30.0).percent_on(120.0), 25.0);
    }

    #[test]
    fn unknown_track_kind_maps_to_other() {
        let track: SideTrack =
            serde_json::from_str(r#"{"kind": "captions", "file": "talk.vtt"}"#).unwrap();
        assert_eq!(track.kind, TrackKind::Other);
    }

    #[test]
    fn playlist_item_fields_default() {
        let item: PlaylistItem = serde_json::from_str(r#"{"duration": 300}"#).unwrap();
        assert_eq!(item.duration, 300.0);
        assert_eq!(item.starttime, 0.0);
        assert!(item.tracks.is_empty());
    }
}
