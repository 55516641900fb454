//! Conversion between playback position and rail fraction. DVR streams
//! report duration as a negative distance behind the live edge, which
//! inverts the axis; the seek limit shifts the usable window.

use crate::model::types::StreamType;

/// Fraction of the rail (in `[0, 1]` for in-window positions) for a
/// playback position. Zero or NaN duration maps to 0; live streams have
/// no rail position.
pub fn calc_pct(duration: f64, dvr_seek_limit: f64, stream_type: StreamType, position: f64) -> f64 {
    if duration == 0.0 || duration.is_nan() {
        return 0.0;
    }
    match stream_type {
        StreamType::Dvr => {
            let diff = duration + dvr_seek_limit;
            let pos = position + dvr_seek_limit;
            (diff - pos) / diff
        }
        StreamType::Vod => position / duration,
        StreamType::Live => 0.0,
    }
}

/// Time for a rail fraction. Negative duration selects the DVR
/// transform, which returns a seek-window-relative time: composing with
/// [`calc_pct`] recovers `position + dvr_seek_limit`. With a zero seek
/// limit (and always for VOD) the round trip is exact.
pub fn calc_time(duration: f64, dvr_seek_limit: f64, pct: f64) -> f64 {
    let mut time = duration * pct;
    if duration < 0.0 {
        let dvr_duration = duration + dvr_seek_limit;
        time = dvr_duration - dvr_duration * pct;
    }
    time
}
