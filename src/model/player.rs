use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, warn};

use crate::api::PlaybackApi;
use crate::config::PlayerConfig;
use crate::constants::UNMUTE_MIN_VOLUME;
use crate::model::keys;
use crate::model::media::MediaModel;
use crate::model::types::{
    Autostart, CaptionsTrack, Comment, Cue, PlatformCaps, PlaybackState, PlaylistItem,
    QualityLevel, StreamType,
};
use crate::store::{AttributeStore, Subscription, Value};

/// Observable player-level state. Owns the single current [`MediaModel`]
/// and forwards its attribute changes into the player store under the
/// same keys, so consumers observe one surface.
pub struct PlayerModel {
    store: AttributeStore,
    media: MediaModel,
    media_subs: Vec<Subscription>,
    platform: PlatformCaps,
    api: Rc<dyn PlaybackApi>,
}

impl PlayerModel {
    pub fn new(api: Rc<dyn PlaybackApi>) -> Self {
        let mut model = Self {
            store: AttributeStore::new(),
            media: MediaModel::new(),
            media_subs: Vec::new(),
            platform: PlatformCaps::default(),
            api,
        };
        model.attach_media();
        model
    }

    pub fn store(&self) -> &AttributeStore {
        &self.store
    }

    pub fn media(&self) -> &MediaModel {
        &self.media
    }

    /// Merge the configuration into the attributes, then apply the fixed
    /// initial player state on top. All writes are silent; subscribers
    /// attach after setup and sync through `change()` semantics.
    pub fn setup(&mut self, config: &PlayerConfig, platform: PlatformCaps) {
        self.platform = platform;

        let volume = if config.playback.volume.is_finite() {
            config.playback.volume.clamp(0.0, 100.0)
        } else {
            90.0
        };
        let rate = if config.playback.playback_rate.is_finite() {
            config.playback.playback_rate.clamp(0.25, 4.0)
        } else {
            1.0
        };
        self.store.set_silent(keys::VOLUME, volume);
        self.store.set_silent(keys::MUTE, config.playback.mute);
        self.store.set_silent(keys::AUTOSTART_MUTED, false);
        self.store.set_silent(keys::AUTOSTART, config.playback.autostart);
        self.store.set_silent(keys::PLAYBACK_RATE, rate);
        self.store
            .set_silent(keys::MIN_DVR_WINDOW, config.dvr.min_dvr_window);
        self.store
            .set_silent(keys::DVR_SEEK_LIMIT, config.dvr.dvr_seek_limit);

        self.store.set_silent(keys::MEDIA_STATE, PlaybackState::Idle);
        self.store.set_silent(keys::POSITION, 0.0);
        self.store.set_silent(keys::DURATION, 0.0);
        self.store.set_silent(keys::BUFFER, 0.0);
        self.store.set_silent(keys::CURRENT_TIME, 0.0);
        self.store.set_silent(keys::PLAY_REJECTED, false);
        self.store.set_silent(keys::SCRUBBING, false);
        self.store.set_silent(keys::FULLSCREEN, false);

        self.set_auto_start(None);
        debug!("player model set up (mobile: {})", platform.mobile);
    }

    /// Flattened clone of the player attributes with the current media
    /// instance's state keys overlaid, as handed to provider setup.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, Value> {
        let mut config: HashMap<String, Value> = self.store.entries().into_iter().collect();
        for key in [
            keys::MEDIA_STATE,
            keys::POSITION,
            keys::DURATION,
            keys::BUFFER,
            keys::CURRENT_TIME,
        ] {
            config.insert(key.to_string(), self.media.store().get(key));
        }
        config
    }

    // === Volume and mute ===

    /// Set the volume in `[0, 100]`. Non-finite input is ignored; the
    /// value is clamped, never rounded. Exactly zero implies mute.
    pub fn set_volume(&self, volume: f64) {
        if !volume.is_finite() {
            debug!("ignoring non-finite volume {volume}");
            return;
        }
        let volume = volume.clamp(0.0, 100.0);
        self.store.set(keys::VOLUME, volume);
        let mute = volume == 0.0;
        if mute != self.mute() {
            self.set_mute(Some(mute));
        }
    }

    pub fn volume(&self) -> f64 {
        self.store.get(keys::VOLUME).as_number().unwrap_or(0.0)
    }

    /// Set or toggle mute (`None` toggles). Unmuting clears the
    /// autostart-muted flag and raises the volume to at least 10.
    pub fn set_mute(&self, mute: Option<bool>) {
        let mute = mute.unwrap_or_else(|| !self.mute());
        self.store.set(keys::MUTE, mute);
        if !mute {
            let volume = self.volume().max(UNMUTE_MIN_VOLUME);
            self.store.set(keys::AUTOSTART_MUTED, false);
            self.set_volume(volume);
        }
    }

    /// Effective mute: an autostart-muted player reports muted even
    /// while the `mute` attribute is false.
    pub fn mute(&self) -> bool {
        self.store.get(keys::AUTOSTART_MUTED).is_truthy()
            || self.store.get(keys::MUTE).is_truthy()
    }

    // === Playback rate and stream type ===

    /// Set the playback rate, clamped to `[0.25, 4]`. Live streams pin
    /// the rate to 1. The accepted rate is passed through to the
    /// playback API; success is observed via later state changes.
    pub fn set_playback_rate(&self, rate: f64) {
        if !rate.is_finite() {
            debug!("ignoring non-finite playback rate {rate}");
            return;
        }
        let mut rate = rate.clamp(0.25, 4.0);
        if self.stream_type() == StreamType::Live {
            rate = 1.0;
        }
        self.store.set(keys::PLAYBACK_RATE, rate);
        self.api.set_playback_rate(rate);
    }

    pub fn playback_rate(&self) -> f64 {
        self.store.get(keys::PLAYBACK_RATE).as_number().unwrap_or(1.0)
    }

    pub fn set_stream_type(&self, stream_type: StreamType) {
        self.store.set(keys::STREAM_TYPE, stream_type);
        if stream_type == StreamType::Live {
            self.set_playback_rate(1.0);
        }
    }

    /// Unset stream type reads as VOD.
    pub fn stream_type(&self) -> StreamType {
        self.store.get(keys::STREAM_TYPE).as_stream().unwrap_or_default()
    }

    // === Autostart ===

    /// Update the autostart preference (`None` re-derives from the
    /// current value) and recompute `playOnViewable`: mobile platforms
    /// defer any autostart to viewability, as does `viewable` itself.
    pub fn set_auto_start(&self, autostart: Option<Autostart>) {
        if let Some(mode) = autostart {
            self.store.set(keys::AUTOSTART, mode);
        }
        let autostart = self.autostart();
        let on_mobile = self.platform.mobile && autostart != Autostart::Off;
        self.store.set(
            keys::PLAY_ON_VIEWABLE,
            on_mobile || autostart == Autostart::Viewable,
        );
    }

    pub fn autostart(&self) -> Autostart {
        Autostart::from_value(&self.store.get(keys::AUTOSTART))
    }

    // === Media instance lifecycle ===

    /// Replace the current media instance. The previous instance's
    /// forwarding subscriptions are dropped before the new ones attach,
    /// so a stale instance can never reach the player store again. The
    /// new instance's attributes are copied across and its state is
    /// re-announced so consumers sync without a real change.
    pub fn set_media_model(&mut self, media: MediaModel) {
        self.media_subs.clear();
        self.media = media;
        self.attach_media();
    }

    fn attach_media(&mut self) {
        let forward = self.store.clone();
        self.media_subs
            .push(self.media.store().on_any(move |_, key, new, _old| {
                forward.set(key, new.clone());
            }));
        for (key, value) in self.media.store().entries() {
            self.store.set(&key, value);
        }
        self.store.retrigger(keys::MEDIA_STATE);
    }

    /// Activate a playlist entry: reset per-item state, then null the
    /// item attribute silently so the subsequent set always notifies,
    /// even when re-activating the same entry.
    pub fn set_active_item(&mut self, index: usize) {
        let item = {
            let playlist = self.store.get(keys::PLAYLIST);
            match playlist.as_playlist().and_then(|list| list.get(index)) {
                Some(item) => item.clone(),
                None => {
                    warn!("playlist index {index} out of range");
                    return;
                }
            }
        };
        self.reset_item(&item);
        self.store.set_silent(keys::PLAYLIST_ITEM, Value::Null);
        self.store.set(keys::ITEM, index as f64);
        if let Some(window) = item.min_dvr_window {
            self.store.set(keys::MIN_DVR_WINDOW, window);
        }
        if let Some(limit) = item.dvr_seek_limit {
            self.store.set(keys::DVR_SEEK_LIMIT, limit);
        }
        self.store.set(keys::PLAYLIST_ITEM, item);
    }

    /// Reset playback state for a new item: position starts at the
    /// item's start time, the duration is taken from its metadata.
    pub fn reset_item(&self, item: &PlaylistItem) {
        self.store.set(keys::PLAY_REJECTED, false);
        self.media.set_position(item.starttime);
        self.media.set_current_time(0.0);
        self.media.set_duration(item.duration);
    }

    pub fn set_playlist(&self, playlist: Vec<PlaylistItem>) {
        self.store.set(keys::PLAYLIST, playlist);
    }

    // === Provider sync ===

    /// Record the attached provider and re-apply the persisted playback
    /// rate through it.
    pub fn set_provider(&self, name: &str) {
        self.store.set(keys::PROVIDER, name);
        self.api.set_playback_rate(self.playback_rate());
    }

    pub fn reset_provider(&self) {
        self.store.set(keys::PROVIDER, Value::Null);
    }

    // === Persistence of user selections ===

    pub fn persist_bandwidth_estimate(&self, estimate: f64) {
        if !estimate.is_finite() {
            return;
        }
        self.store.set(keys::BANDWIDTH_ESTIMATE, estimate);
    }

    /// Persist the chosen quality level. Levels without a valid bitrate
    /// (e.g. "Auto") store a null bitrate selection.
    pub fn persist_quality_level(&self, index: usize, levels: &[QualityLevel]) {
        let level = levels.get(index);
        let bitrate = level
            .and_then(|l| l.bitrate)
            .filter(|b| b.is_finite())
            .map(Value::Number)
            .unwrap_or(Value::Null);
        let label = level.map(|l| l.label.clone()).unwrap_or_default();
        self.store.set(keys::BITRATE_SELECTION, bitrate);
        self.store.set(keys::QUALITY_LABEL, label);
    }

    // === Captions ===

    /// Select a subtitle track. Index 0 means off; positive indices are
    /// 1-based into the track list.
    pub fn set_video_subtitle_track(&self, index: usize, tracks: &[CaptionsTrack]) {
        self.store.set(keys::CAPTIONS_INDEX, index as f64);
        if index > 0
            && let Some(track) = tracks.get(index - 1)
        {
            self.store.set(keys::CAPTIONS_TRACK, track.clone());
        }
    }

    /// Remember the current captions selection as the user preference.
    pub fn persist_captions_track(&self) {
        let label = self
            .store
            .get(keys::CAPTIONS_TRACK)
            .as_caption()
            .map(|t| t.label.clone())
            .unwrap_or_else(|| "Off".to_string());
        self.store.set(keys::CAPTION_LABEL, label);
    }

    pub fn persist_video_subtitle_track(&self, index: usize, tracks: &[CaptionsTrack]) {
        self.set_video_subtitle_track(index, tracks);
        self.persist_captions_track();
    }

    // === Annotations ===

    /// Append a comment. The list is replaced wholesale so the change
    /// event fires; with `show_user` the new comment is flagged for
    /// immediate popup display.
    pub fn add_comment(&self, comment: Comment, show_user: bool) {
        let mut comments = self.comments();
        comments.push(comment);
        self.store.set(keys::COMMENTS, comments);
        if show_user {
            self.store.set(keys::COMMENTS_SHOW_USER, true);
        }
    }

    pub fn set_comments(&self, comments: Vec<Comment>) {
        self.store.set(keys::COMMENTS, comments);
    }

    pub fn comments(&self) -> Vec<Comment> {
        match self.store.get(keys::COMMENTS) {
            Value::Comments(comments) => comments,
            _ => Vec::new(),
        }
    }

    pub fn set_cues(&self, cues: Vec<Cue>) {
        self.store.set(keys::CUES, cues);
    }

    // === View state ===

    pub fn set_fullscreen(&self, fullscreen: bool) {
        self.store.set(keys::FULLSCREEN, fullscreen);
    }

    pub fn set_container_width(&self, width: f64) {
        self.store.set(keys::CONTAINER_WIDTH, width);
    }

    /// Mark the model destroyed and detach the media instance. The flag
    /// is written silently; nothing should react to teardown.
    pub fn destroy(&mut self) {
        self.store.set_silent(keys::DESTROYED, true);
        self.media_subs.clear();
    }
}

impl std::fmt::Debug for PlayerModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerModel")
            .field("store", &self.store)
            .field("platform", &self.platform)
            .finish_non_exhaustive()
    }
}
