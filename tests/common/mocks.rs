use std::cell::RefCell;

use timerail::{
    AnnotationSource, PlaybackApi, RailMark, Reason, RenderSink, TooltipRender, TrackKind,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Play(Reason),
    Seek(f64, Reason),
    Rate(f64),
}

/// Playback API that records every command it receives.
#[derive(Debug, Default)]
pub struct RecordingApi {
    calls: RefCell<Vec<ApiCall>>,
}

impl RecordingApi {
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl PlaybackApi for RecordingApi {
    fn play(&self, reason: Reason) {
        self.calls.borrow_mut().push(ApiCall::Play(reason));
    }

    fn seek(&self, position: f64, reason: Reason) {
        self.calls.borrow_mut().push(ApiCall::Seek(position, reason));
    }

    fn set_playback_rate(&self, rate: f64) {
        self.calls.borrow_mut().push(ApiCall::Rate(rate));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Progress(f64),
    Buffer(f64),
    CueMarks(Vec<RailMark>),
    CommentMarks(Vec<RailMark>),
    Tooltip(TooltipRender),
    HideTooltip,
    Aria(String),
}

/// Render sink that records everything the slider paints, in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: RefCell<Vec<SinkEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn last_progress(&self) -> Option<f64> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            SinkEvent::Progress(pct) => Some(*pct),
            _ => None,
        })
    }

    pub fn last_buffer(&self) -> Option<f64> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            SinkEvent::Buffer(pct) => Some(*pct),
            _ => None,
        })
    }

    pub fn last_tooltip(&self) -> Option<TooltipRender> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            SinkEvent::Tooltip(tip) => Some(tip.clone()),
            _ => None,
        })
    }

    pub fn tooltip_count(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, SinkEvent::Tooltip(_)))
            .count()
    }

    pub fn hide_count(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, SinkEvent::HideTooltip))
            .count()
    }

    pub fn last_aria(&self) -> Option<String> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            SinkEvent::Aria(text) => Some(text.clone()),
            _ => None,
        })
    }

    pub fn aria_count(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, SinkEvent::Aria(_)))
            .count()
    }

    pub fn last_comment_marks(&self) -> Option<Vec<RailMark>> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            SinkEvent::CommentMarks(marks) => Some(marks.clone()),
            _ => None,
        })
    }

    pub fn comment_marks_count(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, SinkEvent::CommentMarks(_)))
            .count()
    }

    pub fn last_cue_marks(&self) -> Option<Vec<RailMark>> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            SinkEvent::CueMarks(marks) => Some(marks.clone()),
            _ => None,
        })
    }
}

impl RenderSink for RecordingSink {
    fn render_progress(&self, pct: f64) {
        self.events.borrow_mut().push(SinkEvent::Progress(pct));
    }

    fn render_buffer(&self, pct: f64) {
        self.events.borrow_mut().push(SinkEvent::Buffer(pct));
    }

    fn render_cue_marks(&self, marks: &[RailMark]) {
        self.events
            .borrow_mut()
            .push(SinkEvent::CueMarks(marks.to_vec()));
    }

    fn render_comment_marks(&self, marks: &[RailMark]) {
        self.events
            .borrow_mut()
            .push(SinkEvent::CommentMarks(marks.to_vec()));
    }

    fn render_tooltip(&self, tip: &TooltipRender) {
        self.events.borrow_mut().push(SinkEvent::Tooltip(tip.clone()));
    }

    fn hide_tooltip(&self) {
        self.events.borrow_mut().push(SinkEvent::HideTooltip);
    }

    fn render_aria(&self, text: &str) {
        self.events.borrow_mut().push(SinkEvent::Aria(text.to_string()));
    }
}

/// Annotation source that records the track fetches it was asked for.
#[derive(Debug, Default)]
pub struct RecordingSource {
    requests: RefCell<Vec<(TrackKind, String)>>,
}

impl RecordingSource {
    pub fn requests(&self) -> Vec<(TrackKind, String)> {
        self.requests.borrow().clone()
    }
}

impl AnnotationSource for RecordingSource {
    fn request(&self, kind: TrackKind, file: &str) {
        self.requests.borrow_mut().push((kind, file.to_string()));
    }
}
