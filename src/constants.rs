// Timing and geometry constants - all tunable behavior in one place

use std::time::Duration;

// === Seek input ===
/// Window over which rapid drag input is coalesced into one seek.
pub const SEEK_DEBOUNCE: Duration = Duration::from_millis(400);
/// Seeking to 100% lands this many seconds before the end of the stream.
pub const EOS_SEEK_GUARD: f64 = 0.25;

// === Annotations ===
/// A comment stays "active" for this many playback seconds past its time.
pub const COMMENT_WINDOW: f64 = 3.0;
/// Wall-clock lifetime of a popup comment before auto-dismissal.
pub const POPUP_DURATION: Duration = Duration::from_secs(3);
/// Touch input snaps to a cue within this many rail pixels.
pub const MOBILE_HOVER_DISTANCE: f64 = 5.0;

// === Tooltip geometry ===
/// Padding added to the measured tooltip width before edge clamping.
pub const TIP_PADDING: f64 = 16.0;

// === Volume ===
/// Unmuting raises the volume to at least this level.
pub const UNMUTE_MIN_VOLUME: f64 = 10.0;
