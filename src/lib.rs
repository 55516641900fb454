// Headless player-state and timeline core. Rendering, decoding and
// network loading live behind the collaborator traits in `api`.

pub mod api;
pub mod config;
pub mod constants;
pub mod model;
pub mod store;
pub mod timeline;
pub mod utils;

pub use api::{
    AnnotationSource, PlaybackApi, PointerKind, RailMark, Reason, RenderSink, TooltipRender,
};
pub use config::{DvrConfig, PlaybackDefaults, PlayerConfig};
pub use model::keys;
pub use model::media::MediaModel;
pub use model::player::PlayerModel;
pub use model::types::{
    AnnotationTime, Autostart, CaptionsTrack, Comment, Cue, PlatformCaps, PlaybackState,
    PlaylistItem, QualityLevel, SeekRange, SideTrack, StreamType, TrackKind, VisualQuality,
};
pub use store::{AttributeStore, Subscription, Value};
pub use timeline::annotations::AnnotationOverlay;
pub use timeline::position::{calc_pct, calc_time};
pub use timeline::seek::{SeekCommand, SeekCoordinator};
pub use timeline::slider::TimeSlider;
pub use timeline::tooltip::TimeTip;
pub use utils::clock::{Clock, ManualClock, SystemClock};
pub use utils::errors::Error;
