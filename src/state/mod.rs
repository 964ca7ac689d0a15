//! State management module
//!
//! This module contains the countdown engine and the snapshot it exposes.

pub mod countdown;
pub mod snapshot;

// Re-export main types
pub use countdown::{CompletionCallback, Countdown, TICK_INTERVAL};
pub use snapshot::TimerSnapshot;
