//! Collaborator traits at the edges of the core: issuing playback
//! commands, fetching side tracks, and painting the rail. All calls are
//! fire-and-forget; outcomes are observed through later model changes.

use crate::model::types::TrackKind;

/// Why a playback command was issued. Carried through to the host as an
/// opaque tag; the core only ever issues `Interaction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    Interaction,
    External,
    Viewable,
    Autostart,
}

impl Reason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::Interaction => "interaction",
            Reason::External => "external",
            Reason::Viewable => "viewable",
            Reason::Autostart => "autostart",
        }
    }
}

/// Commands into the playback provider.
pub trait PlaybackApi {
    fn play(&self, reason: Reason);
    fn seek(&self, position: f64, reason: Reason);
    fn set_playback_rate(&self, rate: f64);
}

/// Fetching of side-loaded tracks (thumbnails, chapters, comments). The
/// implementation delivers results back through
/// [`TimeSlider::apply_comments_payload`](crate::TimeSlider::apply_comments_payload)
/// or [`PlayerModel::set_cues`](crate::PlayerModel::set_cues).
pub trait AnnotationSource {
    fn request(&self, kind: TrackKind, file: &str);
}

/// What kind of pointer produced a hover event. Touch input resolves to
/// nearby cues instead of free positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// A mark to draw on the rail at a percentage position.
#[derive(Debug, Clone, PartialEq)]
pub struct RailMark {
    pub pct: f64,
    pub text: String,
    pub author: Option<String>,
}

/// A tooltip to show over the rail. `pct` is already clamped so the
/// tooltip stays inside the player; `time` is the hover time in seconds
/// for hosts that render thumbnail previews.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipRender {
    pub pct: f64,
    pub text: String,
    pub author: Option<String>,
    pub time: f64,
}

/// Everything the core wants painted. The sink decides how.
pub trait RenderSink {
    fn render_progress(&self, pct: f64);
    fn render_buffer(&self, pct: f64);
    fn render_cue_marks(&self, marks: &[RailMark]);
    fn render_comment_marks(&self, marks: &[RailMark]);
    fn render_tooltip(&self, tip: &TooltipRender);
    fn hide_tooltip(&self);
    fn render_aria(&self, text: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_stringifies_for_analytics() {
        assert_eq!(Reason::Interaction.as_str(), "interaction");
        assert_eq!(Reason::Viewable.as_str(), "viewable");
    }
}
