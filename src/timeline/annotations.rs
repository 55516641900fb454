use std::time::Instant;

use crate::api::RailMark;
use crate::constants::{COMMENT_WINDOW, MOBILE_HOVER_DISTANCE, POPUP_DURATION};
use crate::model::types::{AnnotationTime, Comment, Cue};

/// A comment with its computed rail percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedComment {
    pub comment: Comment,
    pub pct: f64,
}

/// A cue with its computed rail percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCue {
    pub cue: Cue,
    pub pct: f64,
}

#[derive(Debug)]
struct Popup {
    index: usize,
    deadline: Instant,
}

/// Time-indexed annotation state for the rail: placed comment and cue
/// marks, the hover selection, and the transient popup with its
/// wall-clock deadline.
#[derive(Debug, Default)]
pub struct AnnotationOverlay {
    comments: Vec<PlacedComment>,
    cues: Vec<PlacedCue>,
    hovered_comment: Option<usize>,
    hovered_cue: Option<usize>,
    popup: Option<Popup>,
}

impl AnnotationOverlay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the comment channel. Marks are placed by percentage of
    /// the duration; percent-typed times pass through. Zero or negative
    /// duration places nothing.
    pub fn set_comments(&mut self, comments: &[Comment], duration: f64) {
        self.comments.clear();
        self.hovered_comment = None;
        if duration > 0.0 {
            for comment in comments {
                self.comments.push(PlacedComment {
                    comment: comment.clone(),
                    pct: comment.time.percent_on(duration),
                });
            }
        }
        if let Some(popup) = &self.popup
            && popup.index >= self.comments.len()
        {
            self.popup = None;
        }
    }

    /// Replace the cue channel. Same placement rules as comments.
    pub fn set_cues(&mut self, cues: &[Cue], duration: f64) {
        self.cues.clear();
        self.hovered_cue = None;
        if duration > 0.0 {
            for cue in cues {
                self.cues.push(PlacedCue {
                    cue: cue.clone(),
                    pct: cue.time.percent_on(duration),
                });
            }
        }
    }

    pub fn comments(&self) -> &[PlacedComment] {
        &self.comments
    }

    pub fn cues(&self) -> &[PlacedCue] {
        &self.cues
    }

    pub fn comment_marks(&self) -> Vec<RailMark> {
        self.comments
            .iter()
            .map(|placed| RailMark {
                pct: placed.pct,
                text: placed.comment.text.clone(),
                author: Some(placed.comment.author.clone()),
            })
            .collect()
    }

    pub fn cue_marks(&self) -> Vec<RailMark> {
        self.cues
            .iter()
            .map(|placed| RailMark {
                pct: placed.pct,
                text: placed.cue.text.clone(),
                author: None,
            })
            .collect()
    }

    /// First comment in list order whose window `[time, time + 3s]`
    /// contains the position. Overlaps are not resolved beyond list
    /// order; percent-typed comments never match.
    pub fn comment_at(&self, position: f64) -> Option<&PlacedComment> {
        self.comments.iter().find(|placed| {
            match placed.comment.time {
                AnnotationTime::Seconds(time) => {
                    position >= time && position <= time + COMMENT_WINDOW
                }
                AnnotationTime::Percent(_) => false,
            }
        })
    }

    /// Cue to activate for a touch at pointer x: the last cue in list
    /// order within [`MOBILE_HOVER_DISTANCE`] rail pixels.
    pub fn cue_near(&self, x: f64, rail_width: f64) -> Option<usize> {
        self.cues.iter().enumerate().rev().find_map(|(index, placed)| {
            let distance = (rail_width * placed.pct / 100.0 - x).abs();
            (distance < MOBILE_HOVER_DISTANCE).then_some(index)
        })
    }

    pub fn set_hovered_comment(&mut self, index: Option<usize>) {
        self.hovered_comment = index.filter(|i| *i < self.comments.len());
    }

    pub fn hovered_comment(&self) -> Option<&PlacedComment> {
        self.hovered_comment.and_then(|i| self.comments.get(i))
    }

    pub fn set_hovered_cue(&mut self, index: Option<usize>) {
        self.hovered_cue = index.filter(|i| *i < self.cues.len());
    }

    pub fn hovered_cue(&self) -> Option<&PlacedCue> {
        self.hovered_cue.and_then(|i| self.cues.get(i))
    }

    /// Arm the popup on the most recently placed comment. Re-arming
    /// replaces the deadline rather than stacking a second one.
    pub fn arm_popup(&mut self, now: Instant) -> Option<&PlacedComment> {
        let index = self.comments.len().checked_sub(1)?;
        self.popup = Some(Popup {
            index,
            deadline: now + POPUP_DURATION,
        });
        self.comments.get(index)
    }

    pub fn has_popup(&self) -> bool {
        self.popup.is_some()
    }

    pub fn popup_comment(&self) -> Option<&PlacedComment> {
        self.popup.as_ref().and_then(|p| self.comments.get(p.index))
    }

    /// True exactly once, on the tick where the popup deadline passes.
    pub fn poll_popup(&mut self, now: Instant) -> bool {
        match &self.popup {
            Some(popup) if now >= popup.deadline => {
                self.popup = None;
                true
            }
            _ => false,
        }
    }

    pub fn dismiss_popup(&mut self) {
        self.popup = None;
    }

    /// Drop all placed marks and transient state, for item changes.
    pub fn reset(&mut self) {
        self.comments.clear();
        self.cues.clear();
        self.hovered_comment = None;
        self.hovered_cue = None;
        self.popup = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn comment(time: AnnotationTime, author: &str, text: &str) -> Comment {
        Comment {
            time,
            author: author.to_string(),
            text: text.to_string(),
        }
    }

    fn seconds(time: f64) -> AnnotationTime {
        AnnotationTime::Seconds(time)
    }

    #[test]
    fn first_match_wins_for_overlapping_windows() {
        let mut overlay = AnnotationOverlay::new();
        overlay.set_comments(
            &[
                comment(seconds(10.0), "a", "first"),
                comment(seconds(11.0), "b", "second"),
            ],
            100.0,
        );

        let hit = overlay.comment_at(12.0).unwrap();
        assert_eq!(hit.comment.text, "first");
    }

    #[test]
    fn comment_window_is_inclusive_for_three_seconds() {
        let mut overlay = AnnotationOverlay::new();
        overlay.set_comments(&[comment(seconds(10.0), "a", "x")], 100.0);

        assert!(overlay.comment_at(9.9).is_none());
        assert!(overlay.comment_at(10.0).is_some());
        assert!(overlay.comment_at(13.0).is_some());
        assert!(overlay.comment_at(13.1).is_none());
    }

    #[test]
    fn percent_comments_never_match_a_position() {
        let mut overlay = AnnotationOverlay::new();
        overlay.set_comments(
            &[comment(AnnotationTime::Percent(25.0), "a", "x")],
            100.0,
        );
        assert!(overlay.comment_at(25.0).is_none());
        assert_eq!(overlay.comments()[0].pct, 25.0);
    }

    #[test]
    fn zero_duration_places_nothing() {
        let mut overlay = AnnotationOverlay::new();
        overlay.set_comments(&[comment(seconds(10.0), "a", "x")], 0.0);
        assert!(overlay.comments().is_empty());

        overlay.set_comments(&[comment(seconds(10.0), "a", "x")], -30.0);
        assert!(overlay.comments().is_empty());
    }

    #[test]
    fn placement_is_percent_of_duration() {
        let mut overlay = AnnotationOverlay::new();
        overlay.set_comments(&[comment(seconds(30.0), "a", "x")], 120.0);
        assert_eq!(overlay.comments()[0].pct, 25.0);

        overlay.set_cues(
            &[Cue {
                time: AnnotationTime::Percent(60.0),
                text: "chapter".into(),
            }],
            120.0,
        );
        assert_eq!(overlay.cues()[0].pct, 60.0);
    }

    #[test]
    fn popup_expires_after_three_seconds() {
        let mut overlay = AnnotationOverlay::new();
        overlay.set_comments(&[comment(seconds(5.0), "a", "x")], 100.0);
        let t0 = Instant::now();

        assert!(overlay.arm_popup(t0).is_some());
        assert!(overlay.has_popup());
        assert!(!overlay.poll_popup(t0 + Duration::from_millis(2999)));
        assert!(overlay.has_popup());
        assert!(overlay.poll_popup(t0 + Duration::from_secs(3)));
        assert!(!overlay.has_popup());
        // Expiry reports exactly once.
        assert!(!overlay.poll_popup(t0 + Duration::from_secs(4)));
    }

    #[test]
    fn rearming_replaces_the_deadline() {
        let mut overlay = AnnotationOverlay::new();
        overlay.set_comments(
            &[
                comment(seconds(5.0), "a", "x"),
                comment(seconds(6.0), "b", "y"),
            ],
            100.0,
        );
        let t0 = Instant::now();

        overlay.arm_popup(t0);
        overlay.arm_popup(t0 + Duration::from_secs(2));
        // The first deadline has passed; the replacement has not.
        assert!(!overlay.poll_popup(t0 + Duration::from_secs(4)));
        assert!(overlay.poll_popup(t0 + Duration::from_secs(5)));
    }

    #[test]
    fn popup_shows_last_placed_comment() {
        let mut overlay = AnnotationOverlay::new();
        overlay.set_comments(
            &[
                comment(seconds(5.0), "a", "x"),
                comment(seconds(6.0), "b", "latest"),
            ],
            100.0,
        );
        let shown = overlay.arm_popup(Instant::now()).unwrap();
        assert_eq!(shown.comment.text, "latest");
    }

    #[test]
    fn arm_popup_with_no_comments_is_a_no_op() {
        let mut overlay = AnnotationOverlay::new();
        assert!(overlay.arm_popup(Instant::now()).is_none());
        assert!(!overlay.has_popup());
    }

    #[test]
    fn touch_snaps_to_a_cue_within_five_pixels() {
        let mut overlay = AnnotationOverlay::new();
        overlay.set_cues(
            &[
                Cue {
                    time: seconds(10.0),
                    text: "one".into(),
                },
                Cue {
                    time: seconds(12.0),
                    text: "two".into(),
                },
            ],
            100.0,
        );
        // Rail of 1000px: cues sit at x=100 and x=120.
        assert_eq!(overlay.cue_near(104.0, 1000.0), Some(0));
        assert_eq!(overlay.cue_near(118.0, 1000.0), Some(1));
        assert_eq!(overlay.cue_near(110.0, 1000.0), None);
    }

    #[test]
    fn later_cue_wins_when_both_are_in_reach() {
        let mut overlay = AnnotationOverlay::new();
        overlay.set_cues(
            &[
                Cue {
                    time: seconds(10.0),
                    text: "one".into(),
                },
                Cue {
                    time: seconds(10.4),
                    text: "two".into(),
                },
            ],
            100.0,
        );
        // Cues at x=100 and x=104; the first is closer to x=101, but
        // the last one inside the window is selected.
        assert_eq!(overlay.cue_near(101.0, 1000.0), Some(1));
    }

    #[test]
    fn reset_clears_marks_and_popup() {
        let mut overlay = AnnotationOverlay::new();
        overlay.set_comments(&[comment(seconds(5.0), "a", "x")], 100.0);
        overlay.arm_popup(Instant::now());
        overlay.reset();
        assert!(overlay.comments().is_empty());
        assert!(!overlay.has_popup());
    }
}
