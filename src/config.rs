//! Configuration and CLI argument handling

use clap::Parser;

use crate::utils::TimeFormat;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "countdown-timer")]
#[command(about = "Count down from a number of seconds, with freeze and reset from stdin")]
#[command(version)]
pub struct Config {
    /// Initial countdown duration in seconds
    #[arg(short, long, default_value = "60")]
    pub seconds: u64,

    /// Start frozen; send `resume` on stdin to begin
    #[arg(short, long)]
    pub frozen: bool,

    /// How remaining time is rendered
    #[arg(long, value_enum, default_value_t = TimeFormat::Clock)]
    pub format: TimeFormat,

    /// Print each state change as a JSON line
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_one_minute_clock_format() {
        let config = Config::try_parse_from(["countdown-timer"]).unwrap();
        assert_eq!(config.seconds, 60);
        assert!(!config.frozen);
        assert_eq!(config.format, TimeFormat::Clock);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn parses_all_flags() {
        let config = Config::try_parse_from([
            "countdown-timer", "-s", "90", "--frozen", "--format", "bare", "--json", "-v",
        ])
        .unwrap();
        assert_eq!(config.seconds, 90);
        assert!(config.frozen);
        assert_eq!(config.format, TimeFormat::Bare);
        assert!(config.json);
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn rejects_negative_seconds() {
        assert!(Config::try_parse_from(["countdown-timer", "--seconds", "-5"]).is_err());
    }
}
