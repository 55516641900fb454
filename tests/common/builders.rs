use timerail::{AnnotationTime, Comment, Cue, PlaylistItem, SideTrack, TrackKind};

pub fn comment(time: f64, author: &str, text: &str) -> Comment {
    Comment {
        time: AnnotationTime::Seconds(time),
        author: author.to_string(),
        text: text.to_string(),
    }
}

pub fn percent_comment(pct: f64, author: &str, text: &str) -> Comment {
    Comment {
        time: AnnotationTime::Percent(pct),
        author: author.to_string(),
        text: text.to_string(),
    }
}

pub fn cue(time: f64, text: &str) -> Cue {
    Cue {
        time: AnnotationTime::Seconds(time),
        text: text.to_string(),
    }
}

pub fn track(kind: TrackKind, file: &str) -> SideTrack {
    SideTrack {
        kind,
        file: file.to_string(),
    }
}

pub fn item(title: &str, starttime: f64, duration: f64) -> PlaylistItem {
    PlaylistItem {
        title: title.to_string(),
        starttime,
        duration,
        ..PlaylistItem::default()
    }
}

pub fn item_with_tracks(title: &str, duration: f64, tracks: Vec<SideTrack>) -> PlaylistItem {
    PlaylistItem {
        title: title.to_string(),
        duration,
        tracks,
        ..PlaylistItem::default()
    }
}
