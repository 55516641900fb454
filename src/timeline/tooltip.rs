use crate::constants::TIP_PADDING;

/// Cached tooltip geometry. The rendered width is measured by the host
/// and fed back in; the cache is invalidated whenever the tooltip text
/// length changes, since the box re-wraps then.
#[derive(Debug, Default)]
pub struct TimeTip {
    width: f64,
    text_length: usize,
}

impl TimeTip {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a measured width. Padding is added once here.
    pub fn set_width(&mut self, measured: f64) {
        self.width = measured + TIP_PADDING;
    }

    /// Cached width including padding; 0 while unmeasured.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Track the text about to be rendered, dropping the width cache on
    /// a length change.
    pub fn note_text(&mut self, text: &str) {
        if text.len() != self.text_length {
            self.text_length = text.len();
            self.width = 0.0;
        }
    }

    pub fn reset(&mut self) {
        self.width = 0.0;
        self.text_length = 0;
    }
}

/// Clamp a rail fraction so a tooltip of `tip_width` pixels stays inside
/// the player. The player is `player_width` pixels with the rail
/// centered at `rail_width`; the overhang tolerance is their difference.
/// Returns a percentage rounded to three decimals of the fraction.
pub fn clamp_pct(pct: f64, tip_width: f64, rail_width: f64, player_width: f64) -> f64 {
    let width_pct = rail_width / 100.0;
    let tolerance = player_width - rail_width;
    let mut margin = 0.0;
    if tip_width > tolerance {
        margin = (tip_width - tolerance) / (2.0 * 100.0 * width_pct);
    }
    let safe = (1.0 - margin).min(margin.max(pct));
    (safe * 1000.0).round() / 1000.0 * 100.0
}
