//! Attribute names shared by the player and media stores. These are the
//! observable surface of the model; consumers subscribe by key.

// Media instance state, forwarded into the player store.
pub const MEDIA_STATE: &str = "mediaState";
pub const POSITION: &str = "position";
pub const CURRENT_TIME: &str = "currentTime";
pub const DURATION: &str = "duration";
pub const BUFFER: &str = "buffer";
pub const SEEK_RANGE: &str = "seekRange";
pub const VISUAL_QUALITY: &str = "visualQuality";
pub const SETUP: &str = "setup";
pub const STARTED: &str = "started";
pub const PRELOADED: &str = "preloaded";

// Player-level state.
pub const VOLUME: &str = "volume";
pub const MUTE: &str = "mute";
pub const AUTOSTART_MUTED: &str = "autostartMuted";
pub const AUTOSTART: &str = "autostart";
pub const PLAY_ON_VIEWABLE: &str = "playOnViewable";
pub const PLAYBACK_RATE: &str = "playbackRate";
pub const STREAM_TYPE: &str = "streamType";
pub const DVR_SEEK_LIMIT: &str = "dvrSeekLimit";
pub const MIN_DVR_WINDOW: &str = "minDvrWindow";
pub const SCRUBBING: &str = "scrubbing";
pub const FULLSCREEN: &str = "fullscreen";
pub const PLAY_REJECTED: &str = "playRejected";
pub const ITEM: &str = "item";
pub const PLAYLIST: &str = "playlist";
pub const PLAYLIST_ITEM: &str = "playlistItem";
pub const BANDWIDTH_ESTIMATE: &str = "bandwidthEstimate";
pub const BITRATE_SELECTION: &str = "bitrateSelection";
pub const QUALITY_LABEL: &str = "qualityLabel";
pub const CAPTIONS_INDEX: &str = "captionsIndex";
pub const CAPTION_LABEL: &str = "captionLabel";
pub const CAPTIONS_TRACK: &str = "captionsTrack";
pub const PROVIDER: &str = "provider";
pub const CONTAINER_WIDTH: &str = "containerWidth";
pub const DESTROYED: &str = "_destroyed";

// Timeline annotations.
pub const COMMENTS: &str = "comments";
pub const COMMENTS_SHOW_USER: &str = "commentsShowUser";
pub const COMMENTS_AVAILABLE: &str = "commentsAvailable";
pub const CUES: &str = "cues";

// Named events (no attribute payload).
pub const SEEKED: &str = "seeked";
