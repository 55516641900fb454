use crate::model::types::{
    CaptionsTrack, Comment, Cue, PlaybackState, PlaylistItem, SeekRange, StreamType, VisualQuality,
};

/// Attribute value stored in an [`AttributeStore`](super::AttributeStore).
///
/// Equality on `Value` is what gates change notification: writing a value
/// that compares equal to the stored one is a no-op. A missing attribute
/// reads as `Null`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    State(PlaybackState),
    Stream(StreamType),
    Range(SeekRange),
    Quality(VisualQuality),
    Comments(Vec<Comment>),
    Cues(Vec<Cue>),
    Caption(CaptionsTrack),
    Item(PlaylistItem),
    Playlist(Vec<PlaylistItem>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Truthiness following the conventions of loosely-typed player
    /// configs: `Null`, `false`, `0`, `NaN` and `""` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            _ => true,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_state(&self) -> Option<PlaybackState> {
        match self {
            Value::State(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_stream(&self) -> Option<StreamType> {
        match self {
            Value::Stream(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_range(&self) -> Option<SeekRange> {
        match self {
            Value::Range(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_quality(&self) -> Option<&VisualQuality> {
        match self {
            Value::Quality(q) => Some(q),
            _ => None,
        }
    }

    pub fn as_comments(&self) -> Option<&[Comment]> {
        match self {
            Value::Comments(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_cues(&self) -> Option<&[Cue]> {
        match self {
            Value::Cues(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_caption(&self) -> Option<&CaptionsTrack> {
        match self {
            Value::Caption(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_item(&self) -> Option<&PlaylistItem> {
        match self {
            Value::Item(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_playlist(&self) -> Option<&[PlaylistItem]> {
        match self {
            Value::Playlist(p) => Some(p),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<PlaybackState> for Value {
    fn from(value: PlaybackState) -> Self {
        Value::State(value)
    }
}

impl From<StreamType> for Value {
    fn from(value: StreamType) -> Self {
        Value::Stream(value)
    }
}

impl From<SeekRange> for Value {
    fn from(value: SeekRange) -> Self {
        Value::Range(value)
    }
}

impl From<VisualQuality> for Value {
    fn from(value: VisualQuality) -> Self {
        Value::Quality(value)
    }
}

impl From<Vec<Comment>> for Value {
    fn from(value: Vec<Comment>) -> Self {
        Value::Comments(value)
    }
}

impl From<Vec<Cue>> for Value {
    fn from(value: Vec<Cue>) -> Self {
        Value::Cues(value)
    }
}

impl From<CaptionsTrack> for Value {
    fn from(value: CaptionsTrack) -> Self {
        Value::Caption(value)
    }
}

impl From<PlaylistItem> for Value {
    fn from(value: PlaylistItem) -> Self {
        Value::Item(value)
    }
}

impl From<Vec<PlaylistItem>> for Value {
    fn from(value: Vec<PlaylistItem>) -> Self {
        Value::Playlist(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}
