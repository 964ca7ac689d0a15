//! Countdown Timer - a one-second countdown state manager
//!
//! This library counts whole seconds down to zero, keeps a formatted copy of
//! the remaining time, and supports freezing, resetting and a completion
//! callback. [`Countdown`] is the synchronous engine driven by a [`Clock`];
//! [`CountdownHandle`] runs one on a tokio task.

pub mod command;
pub mod config;
pub mod error;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use command::Command;
pub use config::Config;
pub use error::TimerError;
pub use state::{Countdown, TimerSnapshot};
pub use tasks::CountdownHandle;
pub use utils::{format_time, Clock, MockClock, SystemClock, TimeFormat, TokioClock};
