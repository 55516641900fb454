use std::cell::RefCell;
use std::rc::Rc;

use serde::Deserialize;
use tracing::debug;

use crate::api::{
    AnnotationSource, PlaybackApi, PointerKind, Reason, RenderSink, TooltipRender,
};
use crate::model::PlayerModel;
use crate::model::keys;
use crate::model::types::{AnnotationTime, Comment, StreamType, TrackKind};
use crate::store::{AttributeStore, Subscription, Value};
use crate::timeline::annotations::AnnotationOverlay;
use crate::timeline::position::{calc_pct, calc_time};
use crate::timeline::seek::{SeekCommand, SeekCoordinator};
use crate::timeline::tooltip::{TimeTip, clamp_pct};
use crate::utils::clock::Clock;
use crate::utils::errors::Error;
use crate::utils::time_format::time_format;

struct SliderState {
    overlay: AnnotationOverlay,
    tip: TimeTip,
    seek: SeekCoordinator,
    stream_type: StreamType,
    rail_width: f64,
    /// True while the user is holding a hover tooltip open.
    tooltip_selected: bool,
}

/// The time rail. Subscribes to the player model on construction and
/// keeps the render sink current: playback progress, buffer, annotation
/// marks, tooltips and accessible text. Pointer input comes in through
/// [`update`](TimeSlider::update) / [`show_time_tooltip`](TimeSlider::show_time_tooltip)
/// and flows out as debounced commands on the playback API.
///
/// The host pumps [`tick`](TimeSlider::tick) to fire the two cancellable
/// deadlines (seek debounce, popup auto-dismiss) against the injected
/// clock. Dropping the slider drops its subscriptions.
pub struct TimeSlider {
    store: AttributeStore,
    state: Rc<RefCell<SliderState>>,
    api: Rc<dyn PlaybackApi>,
    sink: Rc<dyn RenderSink>,
    clock: Rc<dyn Clock>,
    _subs: Vec<Subscription>,
}

impl TimeSlider {
    pub fn new(
        model: &PlayerModel,
        api: Rc<dyn PlaybackApi>,
        sink: Rc<dyn RenderSink>,
        source: Rc<dyn AnnotationSource>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        let store = model.store().clone();
        let state = Rc::new(RefCell::new(SliderState {
            overlay: AnnotationOverlay::new(),
            tip: TimeTip::new(),
            seek: SeekCoordinator::new(),
            stream_type: StreamType::default(),
            rail_width: 0.0,
            tooltip_selected: false,
        }));

        let mut subs = Vec::new();

        {
            let state = Rc::clone(&state);
            let sink = Rc::clone(&sink);
            subs.push(store.on_change(keys::DURATION, move |store, new, _| {
                on_duration(&state, store, &sink, new.as_number().unwrap_or(0.0));
            }));
        }
        {
            let state = Rc::clone(&state);
            let sink = Rc::clone(&sink);
            subs.push(store.on_change(keys::CUES, move |store, _, _| {
                redraw_cues(&state, store, &sink);
            }));
        }
        {
            let state = Rc::clone(&state);
            let sink = Rc::clone(&sink);
            subs.push(store.on_change(keys::COMMENTS, move |store, new, _| {
                on_comments_changed(&state, store, &sink, new);
            }));
        }
        {
            let state = Rc::clone(&state);
            let sink = Rc::clone(&sink);
            let clock = Rc::clone(&clock);
            subs.push(store.on_change(keys::COMMENTS_SHOW_USER, move |store, new, _| {
                on_show_comment(&state, store, &sink, &clock, new);
            }));
        }
        {
            let state = Rc::clone(&state);
            let sink = Rc::clone(&sink);
            subs.push(store.on_event(keys::SEEKED, move |store| {
                if !store.get(keys::SCRUBBING).is_truthy() {
                    update_aria_text(&state, store, &sink);
                }
            }));
        }
        {
            let state = Rc::clone(&state);
            let sink = Rc::clone(&sink);
            subs.push(store.change(keys::PLAYLIST_ITEM, move |store, new, _| {
                on_playlist_item(&state, store, &sink, &source, new);
            }));
        }
        {
            let state = Rc::clone(&state);
            let sink = Rc::clone(&sink);
            subs.push(store.change(keys::POSITION, move |store, new, _| {
                on_position(&state, store, &sink, new.as_number().unwrap_or(0.0));
            }));
        }
        {
            let sink = Rc::clone(&sink);
            subs.push(store.change(keys::BUFFER, move |_, new, _| {
                sink.render_buffer(new.as_number().unwrap_or(0.0));
            }));
        }
        {
            let state = Rc::clone(&state);
            subs.push(store.change(keys::STREAM_TYPE, move |_, new, _| {
                state.borrow_mut().stream_type = new.as_stream().unwrap_or_default();
            }));
        }

        Self {
            store,
            state,
            api,
            sink,
            clock,
            _subs: subs,
        }
    }

    // === Drag input ===

    pub fn drag_start(&self) {
        self.store.set(keys::SCRUBBING, true);
    }

    /// Record a drag position as seek intent and move the thumb. The
    /// actual seek fires from [`tick`](TimeSlider::tick) once the
    /// debounce window elapses.
    pub fn update(&self, percent: f64) {
        let now = self.clock.now();
        self.state.borrow_mut().seek.request(percent, now);
        self.sink.render_progress(percent);
    }

    pub fn drag_end(&self) {
        self.store.set(keys::SCRUBBING, false);
    }

    // === Hover input ===

    /// Show the hover tooltip for pointer x over the rail. Touch input
    /// snaps to a cue in reach instead of hovering freely. The tooltip
    /// stays user-selected until [`hide_time_tooltip`](TimeSlider::hide_time_tooltip).
    pub fn show_time_tooltip(&self, x: f64, pointer: PointerKind) {
        let duration = self.store.get(keys::DURATION).as_number().unwrap_or(0.0);
        if duration == 0.0 {
            return;
        }
        // An armed popup overrides hover display.
        if self.state.borrow().overlay.has_popup() {
            return;
        }
        let rail_width = self.state.borrow().rail_width;
        if rail_width <= 0.0 {
            return;
        }

        let x = x.clamp(0.0, rail_width);
        let pct = x / rail_width;
        let limit = self
            .store
            .get(keys::DVR_SEEK_LIMIT)
            .as_number()
            .unwrap_or(0.0);
        let time = calc_time(duration, limit, pct);

        if pointer == PointerKind::Touch {
            let mut state = self.state.borrow_mut();
            let near = state.overlay.cue_near(x, rail_width);
            state.overlay.set_hovered_cue(near);
        }

        let (text, author) = {
            let state = self.state.borrow();
            if let Some(placed) = state.overlay.hovered_cue() {
                (placed.cue.text.clone(), None)
            } else if let Some(placed) = state.overlay.hovered_comment() {
                (placed.comment.text.clone(), Some(placed.comment.author.clone()))
            } else if duration < 0.0 && time > -1.0 {
                // DVR within the live buffer
                ("Live".to_string(), None)
            } else {
                (time_format(time, true), None)
            }
        };

        render_tooltip(&self.state, &self.store, &self.sink, pct, text, author);
        self.state.borrow_mut().tooltip_selected = true;
    }

    pub fn hide_time_tooltip(&self) {
        self.sink.hide_tooltip();
        self.state.borrow_mut().tooltip_selected = false;
    }

    /// Report the comment mark the pointer is over, if any.
    pub fn hover_comment(&self, index: Option<usize>) {
        self.state.borrow_mut().overlay.set_hovered_comment(index);
    }

    /// Report the cue mark the pointer is over, if any.
    pub fn hover_cue(&self, index: Option<usize>) {
        self.state.borrow_mut().overlay.set_hovered_cue(index);
    }

    // === Layout feedback ===

    pub fn set_rail_width(&self, width: f64) {
        self.state.borrow_mut().rail_width = width;
    }

    /// Feed back the measured tooltip width so edge clamping can work.
    pub fn set_tooltip_width(&self, measured: f64) {
        self.state.borrow_mut().tip.set_width(measured);
    }

    // === Deadlines ===

    /// Poll the seek debounce and popup auto-dismiss deadlines. Fires at
    /// most one seek command per elapsed window; hides the popup exactly
    /// once when its three seconds are up.
    pub fn tick(&self) {
        let now = self.clock.now();
        let command = {
            let mut state = self.state.borrow_mut();
            state.seek.poll(now, &self.store)
        };
        match command {
            Some(SeekCommand::Play) => self.api.play(Reason::Interaction),
            Some(SeekCommand::Seek(position)) => self.api.seek(position, Reason::Interaction),
            None => {}
        }

        let expired = self.state.borrow_mut().overlay.poll_popup(now);
        if expired {
            self.sink.hide_tooltip();
        }
    }

    // === Annotation payloads ===

    /// Apply a comments payload fetched by the annotation source. A
    /// malformed payload is dropped whole; nothing is partially applied.
    pub fn apply_comments_payload(&self, body: &str) {
        match parse_comments(body) {
            Ok(comments) => self.store.set(keys::COMMENTS, comments),
            Err(err) => debug!("dropping comments payload: {err}"),
        }
    }

    /// Re-announce the accessible text, for focus changes.
    pub fn refresh_aria_text(&self) {
        update_aria_text(&self.state, &self.store, &self.sink);
    }
}

impl std::fmt::Debug for TimeSlider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeSlider")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

fn on_duration(
    state: &Rc<RefCell<SliderState>>,
    store: &AttributeStore,
    sink: &Rc<dyn RenderSink>,
    duration: f64,
) {
    let position = store.get(keys::POSITION).as_number().unwrap_or(0.0);
    render_time(state, store, sink, position, duration);
    update_aria_text(state, store, sink);
    redraw_cues(state, store, sink);
    redraw_comments(state, store, sink);
}

fn on_position(
    state: &Rc<RefCell<SliderState>>,
    store: &AttributeStore,
    sink: &Rc<dyn RenderSink>,
    position: f64,
) {
    let duration = store.get(keys::DURATION).as_number().unwrap_or(0.0);
    render_time(state, store, sink, position, duration);

    let (popup, selected) = {
        let state = state.borrow();
        (state.overlay.has_popup(), state.tooltip_selected)
    };
    if popup {
        // Popup expiry is timer-driven; nothing to resolve here.
        return;
    }
    if selected {
        return;
    }

    let hit = state.borrow().overlay.comment_at(position).map(|placed| {
        (
            placed.pct,
            placed.comment.text.clone(),
            placed.comment.author.clone(),
        )
    });
    match hit {
        Some((pct, text, author)) => {
            render_tooltip(state, store, sink, pct / 100.0, text, Some(author));
        }
        None => sink.hide_tooltip(),
    }
}

fn render_time(
    state: &Rc<RefCell<SliderState>>,
    store: &AttributeStore,
    sink: &Rc<dyn RenderSink>,
    position: f64,
    duration: f64,
) {
    let limit = store.get(keys::DVR_SEEK_LIMIT).as_number().unwrap_or(0.0);
    let stream_type = state.borrow().stream_type;
    sink.render_progress(calc_pct(duration, limit, stream_type, position) * 100.0);
}

fn on_comments_changed(
    state: &Rc<RefCell<SliderState>>,
    store: &AttributeStore,
    sink: &Rc<dyn RenderSink>,
    new: &Value,
) {
    store.set(keys::COMMENTS_AVAILABLE, false);
    redraw_comments(state, store, sink);
    if new.as_comments().is_some_and(|comments| !comments.is_empty()) {
        store.set(keys::COMMENTS_AVAILABLE, true);
    }
}

fn on_show_comment(
    state: &Rc<RefCell<SliderState>>,
    store: &AttributeStore,
    sink: &Rc<dyn RenderSink>,
    clock: &Rc<dyn Clock>,
    new: &Value,
) {
    if !new.is_truthy() {
        return;
    }
    let was_selected = {
        let mut state = state.borrow_mut();
        std::mem::take(&mut state.tooltip_selected)
    };
    if was_selected {
        sink.hide_tooltip();
    }

    let placed = {
        let mut state = state.borrow_mut();
        state.overlay.arm_popup(clock.now()).cloned()
    };
    if let Some(placed) = placed {
        render_tooltip(
            state,
            store,
            sink,
            placed.pct / 100.0,
            placed.comment.text.clone(),
            Some(placed.comment.author.clone()),
        );
    }
    store.set(keys::COMMENTS_SHOW_USER, false);
}

fn on_playlist_item(
    state: &Rc<RefCell<SliderState>>,
    store: &AttributeStore,
    sink: &Rc<dyn RenderSink>,
    source: &Rc<dyn AnnotationSource>,
    new: &Value,
) {
    let Some(item) = new.as_item() else {
        return;
    };
    {
        let mut state = state.borrow_mut();
        state.overlay.reset();
        state.tip.reset();
    }
    // Clearing the model comments triggers the comments redraw.
    store.set(keys::COMMENTS, Vec::<Comment>::new());
    redraw_cues(state, store, sink);

    for track in &item.tracks {
        if track.kind != TrackKind::Other {
            debug!("requesting {:?} track {}", track.kind, track.file);
            source.request(track.kind, &track.file);
        }
    }
}

fn redraw_cues(
    state: &Rc<RefCell<SliderState>>,
    store: &AttributeStore,
    sink: &Rc<dyn RenderSink>,
) {
    let duration = store.get(keys::DURATION).as_number().unwrap_or(0.0);
    let value = store.get(keys::CUES);
    let cues = value.as_cues().unwrap_or(&[]);
    let marks = {
        let mut state = state.borrow_mut();
        state.overlay.set_cues(cues, duration);
        state.overlay.cue_marks()
    };
    sink.render_cue_marks(&marks);
}

fn redraw_comments(
    state: &Rc<RefCell<SliderState>>,
    store: &AttributeStore,
    sink: &Rc<dyn RenderSink>,
) {
    let duration = store.get(keys::DURATION).as_number().unwrap_or(0.0);
    let value = store.get(keys::COMMENTS);
    let comments = value.as_comments().unwrap_or(&[]);
    let marks = {
        let mut state = state.borrow_mut();
        state.overlay.set_comments(comments, duration);
        state.overlay.comment_marks()
    };
    sink.render_comment_marks(&marks);
}

fn render_tooltip(
    state: &Rc<RefCell<SliderState>>,
    store: &AttributeStore,
    sink: &Rc<dyn RenderSink>,
    pct: f64,
    text: String,
    author: Option<String>,
) {
    let duration = store.get(keys::DURATION).as_number().unwrap_or(0.0);
    let limit = store.get(keys::DVR_SEEK_LIMIT).as_number().unwrap_or(0.0);
    let time = calc_time(duration, limit, pct);

    let (tip_width, rail_width) = {
        let mut state = state.borrow_mut();
        state.tip.note_text(&text);
        (state.tip.width(), state.rail_width)
    };
    if rail_width <= 0.0 {
        return;
    }
    let player_width = store
        .get(keys::CONTAINER_WIDTH)
        .as_number()
        .unwrap_or(rail_width);

    sink.render_tooltip(&TooltipRender {
        pct: clamp_pct(pct, tip_width, rail_width, player_width),
        text,
        author,
        time,
    });
}

fn update_aria_text(
    state: &Rc<RefCell<SliderState>>,
    store: &AttributeStore,
    sink: &Rc<dyn RenderSink>,
) {
    let position = store.get(keys::POSITION).as_number().unwrap_or(0.0);
    let duration = store.get(keys::DURATION).as_number().unwrap_or(0.0);
    let text = if state.borrow().stream_type == StreamType::Dvr {
        time_format(position, false)
    } else {
        format!(
            "{} of {}",
            time_format(position, false),
            time_format(duration, false)
        )
    };
    sink.render_aria(&text);
}

#[derive(Deserialize)]
struct CommentsPayload {
    comments: Vec<CommentRecord>,
}

#[derive(Deserialize)]
struct CommentRecord {
    video_position: AnnotationTime,
    #[serde(default)]
    author: String,
    message: String,
}

fn parse_comments(body: &str) -> Result<Vec<Comment>, Error> {
    let payload: CommentsPayload = serde_json::from_str(body)?;
    Ok(payload
        .comments
        .into_iter()
        .map(|record| Comment {
            time: record.video_position,
            author: record.author,
            text: record.message,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_maps_wire_fields() {
        let comments = parse_comments(
            r#"{"comments": [
                {"video_position": 12.5, "message": "nice shot", "author": "ada"},
                {"video_position": "25%", "message": "later"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].time, AnnotationTime::Seconds(12.5));
        assert_eq!(comments[0].text, "nice shot");
        assert_eq!(comments[0].author, "ada");
        assert_eq!(comments[1].time, AnnotationTime::Percent(25.0));
        assert_eq!(comments[1].author, "");
    }

    #[test]
    fn non_array_comments_are_rejected_whole() {
        assert!(parse_comments(r#"{"comments": "not-an-array"}"#).is_err());
        assert!(parse_comments(r#"{}"#).is_err());
        assert!(parse_comments("junk").is_err());
    }

    #[test]
    fn one_bad_record_drops_the_payload() {
        let result = parse_comments(
            r#"{"comments": [
                {"video_position": 5, "message": "ok", "author": "a"},
                {"video_position": "half past", "message": "bad", "author": "b"}
            ]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn empty_list_parses_to_nothing() {
        assert!(parse_comments(r#"{"comments": []}"#).unwrap().is_empty());
    }
}
