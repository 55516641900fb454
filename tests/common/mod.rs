//! Shared harness for the integration suites: recording collaborators
//! and a fully wired player-plus-slider rig.

#![allow(dead_code)]

pub mod builders;
pub mod mocks;

use std::rc::Rc;

use timerail::{
    AnnotationSource, Clock, ManualClock, PlatformCaps, PlaybackApi, PlayerConfig, PlayerModel,
    RenderSink, TimeSlider,
};

use mocks::{RecordingApi, RecordingSink, RecordingSource};

/// A player model and time slider wired to recording collaborators and a
/// manual clock. Constructed quiet: the sink events from initial sync
/// are cleared, and the rail is laid out at 400px in a 440px player.
pub struct TestPlayer {
    pub model: PlayerModel,
    pub slider: TimeSlider,
    pub api: Rc<RecordingApi>,
    pub sink: Rc<RecordingSink>,
    pub source: Rc<RecordingSource>,
    pub clock: Rc<ManualClock>,
}

impl TestPlayer {
    pub fn new() -> Self {
        Self::with_config(&PlayerConfig::default())
    }

    pub fn with_config(config: &PlayerConfig) -> Self {
        let api = Rc::new(RecordingApi::default());
        let sink = Rc::new(RecordingSink::default());
        let source = Rc::new(RecordingSource::default());
        let clock = Rc::new(ManualClock::new());

        let mut model = PlayerModel::new(Rc::clone(&api) as Rc<dyn PlaybackApi>);
        model.setup(config, PlatformCaps::default());

        let slider = TimeSlider::new(
            &model,
            Rc::clone(&api) as Rc<dyn PlaybackApi>,
            Rc::clone(&sink) as Rc<dyn RenderSink>,
            Rc::clone(&source) as Rc<dyn AnnotationSource>,
            Rc::clone(&clock) as Rc<dyn Clock>,
        );
        slider.set_rail_width(400.0);
        model.set_container_width(440.0);
        sink.clear();

        Self {
            model,
            slider,
            api,
            sink,
            source,
            clock,
        }
    }
}
