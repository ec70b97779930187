/// Format a duration in milliseconds as `MM:SS.mmm` for the HUD and the
/// results screen.
pub fn format_time(milliseconds: u64) -> String {
    let minutes = milliseconds / 60_000;
    let seconds = (milliseconds % 60_000) / 1_000;
    let millis = milliseconds % 1_000;
    format!("{minutes:02}:{seconds:02}.{millis:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero() {
        assert_eq!(format_time(0), "00:00.000");
    }

    #[test]
    fn formats_minutes_seconds_and_millis() {
        assert_eq!(format_time(83_456), "01:23.456");
    }

    #[test]
    fn pads_each_field() {
        assert_eq!(format_time(61_001), "01:01.001");
    }

    #[test]
    fn minutes_keep_counting_past_an_hour() {
        assert_eq!(format_time(60 * 60_000 + 500), "60:00.500");
    }
}
