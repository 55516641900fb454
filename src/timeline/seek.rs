use std::time::Instant;
use tracing::trace;

use crate::constants::{EOS_SEEK_GUARD, SEEK_DEBOUNCE};
use crate::model::keys;
use crate::model::types::StreamType;
use crate::store::AttributeStore;

/// Resolved outcome of a coalesced seek request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeekCommand {
    /// Nothing to seek into yet; start playback instead.
    Play,
    /// Seek to this position in seconds.
    Seek(f64),
}

/// Coalesces rapid drag input into one seek per debounce window.
///
/// The first request arms a single deadline; further requests replace
/// the pending percent without re-arming, so the command fires exactly
/// when the window elapses, carrying the most recent percent. The model
/// is read at fire time, not request time.
#[derive(Debug)]
pub struct SeekCoordinator {
    pending_pct: f64,
    deadline: Option<Instant>,
}

impl Default for SeekCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl SeekCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending_pct: 0.0,
            deadline: None,
        }
    }

    /// Record a seek intent at `percent` of the rail (0..100).
    pub fn request(&mut self, percent: f64, now: Instant) {
        self.pending_pct = percent;
        if self.deadline.is_none() {
            self.deadline = Some(now + SEEK_DEBOUNCE);
            trace!("seek window armed at {percent}%");
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fire the pending seek if the window has elapsed. Resolution reads
    /// the store now: zero duration plays instead of seeking, DVR maps
    /// the percent into the seekable window, and VOD stays clear of the
    /// end of the stream.
    pub fn poll(&mut self, now: Instant, store: &AttributeStore) -> Option<SeekCommand> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;

        let percent = self.pending_pct;
        let duration = store.get(keys::DURATION).as_number().unwrap_or(0.0);
        if duration == 0.0 {
            return Some(SeekCommand::Play);
        }
        let stream_type = store.get(keys::STREAM_TYPE).as_stream().unwrap_or_default();
        let position = if stream_type == StreamType::Dvr {
            let range = store.get(keys::SEEK_RANGE).as_range().unwrap_or_default();
            let dvr_seek_limit = store.get(keys::DVR_SEEK_LIMIT).as_number().unwrap_or(0.0);
            range.start + (-duration - dvr_seek_limit) * percent / 100.0
        } else {
            (percent / 100.0 * duration).min(duration - EOS_SEEK_GUARD)
        };
        Some(SeekCommand::Seek(position))
    }
}
