//! Remaining-time formatting

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How remaining seconds are rendered as text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimeFormat {
    /// Zero-padded `MM:SS`
    #[default]
    Clock,
    /// Bare seconds below a minute, `M:SS` above
    Bare,
}

impl TimeFormat {
    /// Render `seconds` in this format
    pub fn render(self, seconds: u64) -> String {
        match self {
            TimeFormat::Clock => format_time(seconds),
            TimeFormat::Bare => format_bare(seconds),
        }
    }
}

/// Format seconds as `MM:SS`, both parts padded to two digits.
///
/// Minutes are not capped, so 6000 seconds renders as `100:00`.
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Format seconds as a bare number under one minute, otherwise `M:SS`
pub fn format_bare(seconds: u64) -> String {
    if seconds < 60 {
        seconds.to_string()
    } else {
        format!("{}:{:02}", seconds / 60, seconds % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn clock_format_examples() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(10), "00:10");
        assert_eq!(format_time(60), "01:00");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(3599), "59:59");
        assert_eq!(format_time(6000), "100:00");
    }

    #[test]
    fn bare_format_examples() {
        assert_eq!(format_bare(0), "0");
        assert_eq!(format_bare(45), "45");
        assert_eq!(format_bare(60), "1:00");
        assert_eq!(format_bare(65), "1:05");
        assert_eq!(format_bare(6000), "100:00");
    }

    #[test]
    fn render_dispatches_on_variant() {
        assert_eq!(TimeFormat::default().render(9), "00:09");
        assert_eq!(TimeFormat::Bare.render(9), "9");
    }

    proptest! {
        #[test]
        fn clock_format_splits_minutes_and_seconds(s in any::<u64>()) {
            let text = format_time(s);
            let (minutes, seconds) = text.split_once(':').unwrap();
            prop_assert!(minutes.len() >= 2);
            prop_assert_eq!(seconds.len(), 2);
            prop_assert_eq!(minutes.parse::<u64>().unwrap(), s / 60);
            prop_assert_eq!(seconds.parse::<u64>().unwrap(), s % 60);
        }
    }
}
