//! Error types for the countdown engine and its task

use thiserror::Error;

/// Errors produced by the countdown engine, its task handle and command parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// A duration argument was below zero
    #[error("seconds must not be negative, got {0}")]
    NegativeSeconds(i64),

    /// A duration argument was not an integer
    #[error("invalid seconds value: '{0}'")]
    InvalidSeconds(String),

    /// The command word was not recognised
    #[error("unknown command: '{0}'")]
    UnknownCommand(String),

    /// The command needs an argument that was not given
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    /// The completion callback panicked; the timer is still frozen at zero
    #[error("completion callback panicked")]
    CallbackPanicked,

    /// The countdown task has shut down
    #[error("countdown task is not running")]
    Stopped,
}
