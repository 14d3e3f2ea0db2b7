/// Format seconds as a player clock: `m:ss`, or `h:mm:ss` past the hour.
/// Zero and NaN render as `0:00`.
pub fn format_timestamp(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }

    let total = seconds.floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// `elapsed / total` as shown under the seek bar.
pub fn status_line(played_fraction: f64, duration_seconds: f64) -> String {
    format!(
        "{} / {}",
        format_timestamp(played_fraction * duration_seconds),
        format_timestamp(duration_seconds)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_hours() {
        assert_eq!(format_timestamp(0.0), "0:00");
        assert_eq!(format_timestamp(f64::NAN), "0:00");
        assert_eq!(format_timestamp(5.9), "0:05");
        assert_eq!(format_timestamp(754.0), "12:34");
        assert_eq!(format_timestamp(3_725.0), "1:02:05");
    }

    #[test]
    fn status_line_uses_played_fraction() {
        assert_eq!(status_line(0.5, 120.0), "1:00 / 2:00");
        assert_eq!(status_line(0.0, 0.0), "0:00 / 0:00");
    }
}
