//! Duration formatting helpers.

/// Format a duration in milliseconds as a short human-readable string.
pub fn format_duration(millis: u64) -> String {
    let secs = millis / 1000;
    if millis < 1000 {
        format!("{}ms", millis)
    } else if secs < 60 {
        format!("{}.{}s", secs, (millis % 1000) / 100)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_each_range() {
        assert_eq!(format_duration(850), "850ms");
        assert_eq!(format_duration(12_480), "12.4s");
        assert_eq!(format_duration(185_000), "3m 5s");
        assert_eq!(format_duration(7_260_000), "2h 1m");
    }
}
