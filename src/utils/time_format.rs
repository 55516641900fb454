/// Format seconds as `mm:ss` (or `h:mm:ss` past an hour). Non-positive
/// input reads `00:00` unless negatives are allowed, as they are for
/// DVR offsets behind the live edge.
pub fn time_format(seconds: f64, allow_negative: bool) -> String {
    if seconds <= 0.0 && !allow_negative {
        return "00:00".to_string();
    }
    let total = seconds.abs();
    let hours = (total / 3600.0).floor() as u64;
    let minutes = ((total / 60.0).floor() as u64) % 60;
    let secs = (total % 60.0).floor() as u64;
    let sign = if seconds < 0.0 { "-" } else { "" };
    if hours > 0 {
        format!("{sign}{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{sign}{minutes:02}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(time_format(0.0, false), "00:00");
        assert_eq!(time_format(5.0, false), "00:05");
        assert_eq!(time_format(65.4, false), "01:05");
        assert_eq!(time_format(600.0, false), "10:00");
    }

    #[test]
    fn formats_hours_past_sixty_minutes() {
        assert_eq!(time_format(3600.0, false), "1:00:00");
        assert_eq!(time_format(3661.0, false), "1:01:01");
        assert_eq!(time_format(36_000.0, false), "10:00:00");
    }

    #[test]
    fn negative_times_clamp_unless_allowed() {
        assert_eq!(time_format(-42.0, false), "00:00");
        assert_eq!(time_format(-42.0, true), "-00:42");
        assert_eq!(time_format(-3725.0, true), "-1:02:05");
    }
}
