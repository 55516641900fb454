use crate::model::keys;
use crate::model::types::{PlaybackState, SeekRange, VisualQuality};
use crate::store::{AttributeStore, Value};

/// Observable state of one media instance. A fresh `MediaModel` is
/// created whenever the active playlist item changes; the previous
/// instance is detached by [`PlayerModel::set_media_model`]
/// (`crate::model::player::PlayerModel::set_media_model`).
#[derive(Debug)]
pub struct MediaModel {
    store: AttributeStore,
}

impl Default for MediaModel {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaModel {
    #[must_use]
    pub fn new() -> Self {
        let store = AttributeStore::new();
        store.set_silent(keys::MEDIA_STATE, PlaybackState::Idle);
        store.set_silent(keys::SETUP, false);
        store.set_silent(keys::STARTED, false);
        store.set_silent(keys::PRELOADED, false);
        store.set_silent(keys::VISUAL_QUALITY, Value::Null);
        store.set_silent(keys::BUFFER, 0.0);
        store.set_silent(keys::CURRENT_TIME, 0.0);
        store.set_silent(keys::POSITION, 0.0);
        store.set_silent(keys::DURATION, 0.0);
        Self { store }
    }

    pub fn store(&self) -> &AttributeStore {
        &self.store
    }

    pub fn media_state(&self) -> PlaybackState {
        self.store.get(keys::MEDIA_STATE).as_state().unwrap_or_default()
    }

    pub fn set_media_state(&self, state: PlaybackState) {
        self.store.set(keys::MEDIA_STATE, state);
    }

    pub fn set_position(&self, position: f64) {
        self.store.set(keys::POSITION, position);
    }

    pub fn set_current_time(&self, time: f64) {
        self.store.set(keys::CURRENT_TIME, time);
    }

    pub fn set_duration(&self, duration: f64) {
        self.store.set(keys::DURATION, duration);
    }

    /// Buffered share of the stream as a percentage in `[0, 100]`.
    pub fn set_buffer(&self, buffer: f64) {
        self.store.set(keys::BUFFER, buffer);
    }

    pub fn set_seek_range(&self, range: SeekRange) {
        self.store.set(keys::SEEK_RANGE, range);
    }

    pub fn set_visual_quality(&self, quality: Option<VisualQuality>) {
        self.store.set(keys::VISUAL_QUALITY, quality);
    }

    pub fn set_setup(&self, setup: bool) {
        self.store.set(keys::SETUP, setup);
    }

    pub fn set_started(&self, started: bool) {
        self.store.set(keys::STARTED, started);
    }

    pub fn set_preloaded(&self, preloaded: bool) {
        self.store.set(keys::PRELOADED, preloaded);
    }

    /// Restore source-bound attributes to their defaults ahead of a new
    /// load. Writes are silent; the next provider updates announce the
    /// fresh values.
    pub fn src_reset(&self) {
        self.store.set_silent(keys::SETUP, false);
        self.store.set_silent(keys::STARTED, false);
        self.store.set_silent(keys::PRELOADED, false);
        self.store.set_silent(keys::VISUAL_QUALITY, Value::Null);
        self.store.set_silent(keys::BUFFER, 0.0);
        self.store.set_silent(keys::CURRENT_TIME, 0.0);
    }
}
