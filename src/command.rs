//! Caller operations on a countdown, as values
//!
//! The demo binary reads these from stdin, one per line:
//!
//! ```text
//! freeze | resume | reset | reset frozen | initial <N> | set <N>
//! ```

use std::str::FromStr;

use crate::error::TimerError;

/// One caller-invokable operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Freeze (`true`) or resume (`false`) ticking
    SetFreeze(bool),
    /// Restore the configured initial seconds, optionally frozen
    Reset { freeze: bool },
    /// Change the configured initial seconds and resync to it
    SetInitialSeconds(u64),
    /// Overwrite the remaining seconds
    SetSecondsRemaining(u64),
}

impl FromStr for Command {
    type Err = TimerError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let word = words.next().unwrap_or_default().to_lowercase();
        let argument = words.next();

        match word.as_str() {
            "freeze" | "pause" => Ok(Command::SetFreeze(true)),
            "resume" | "unfreeze" => Ok(Command::SetFreeze(false)),
            "reset" => match argument {
                None => Ok(Command::Reset { freeze: false }),
                Some("frozen") | Some("freeze") => Ok(Command::Reset { freeze: true }),
                Some(other) => Err(TimerError::UnknownCommand(format!("reset {}", other))),
            },
            "initial" => parse_seconds(argument).map(Command::SetInitialSeconds),
            "set" => parse_seconds(argument).map(Command::SetSecondsRemaining),
            _ => Err(TimerError::UnknownCommand(line.trim().to_string())),
        }
    }
}

/// Parse a non-negative seconds argument
fn parse_seconds(argument: Option<&str>) -> Result<u64, TimerError> {
    let raw = argument.ok_or(TimerError::MissingArgument("seconds"))?;
    let value: i64 = raw
        .parse()
        .map_err(|_| TimerError::InvalidSeconds(raw.to_string()))?;
    u64::try_from(value).map_err(|_| TimerError::NegativeSeconds(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_freeze_and_resume() {
        assert_eq!("freeze".parse::<Command>(), Ok(Command::SetFreeze(true)));
        assert_eq!("  Resume ".parse::<Command>(), Ok(Command::SetFreeze(false)));
    }

    #[test]
    fn parses_reset_variants() {
        assert_eq!("reset".parse::<Command>(), Ok(Command::Reset { freeze: false }));
        assert_eq!("reset frozen".parse::<Command>(), Ok(Command::Reset { freeze: true }));
        assert!(matches!(
            "reset later".parse::<Command>(),
            Err(TimerError::UnknownCommand(_))
        ));
    }

    #[test]
    fn parses_seconds_arguments() {
        assert_eq!("initial 90".parse::<Command>(), Ok(Command::SetInitialSeconds(90)));
        assert_eq!("set 0".parse::<Command>(), Ok(Command::SetSecondsRemaining(0)));
    }

    #[test]
    fn rejects_negative_seconds() {
        assert_eq!(
            "initial -5".parse::<Command>(),
            Err(TimerError::NegativeSeconds(-5))
        );
    }

    #[test]
    fn rejects_bad_arguments() {
        assert_eq!(
            "set".parse::<Command>(),
            Err(TimerError::MissingArgument("seconds"))
        );
        assert_eq!(
            "set ten".parse::<Command>(),
            Err(TimerError::InvalidSeconds("ten".to_string()))
        );
        assert_eq!(
            "explode".parse::<Command>(),
            Err(TimerError::UnknownCommand("explode".to_string()))
        );
    }
}
