//! Display helpers for leaderboard values.

/// Render seconds as `45s` or `1m 30s`. Missing or zero renders as `--`.
pub fn format_duration(secs: Option<u32>) -> String {
    match secs {
        None | Some(0) => "--".to_string(),
        Some(s) if s < 60 => format!("{s}s"),
        Some(s) => format!("{}m {}s", s / 60, s % 60),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats() {
        assert_eq!(format_duration(None), "--");
        assert_eq!(format_duration(Some(0)), "--");
        assert_eq!(format_duration(Some(45)), "45s");
        assert_eq!(format_duration(Some(60)), "1m 0s");
        assert_eq!(format_duration(Some(90)), "1m 30s");
        assert_eq!(format_duration(Some(3725)), "62m 5s");
    }
}
