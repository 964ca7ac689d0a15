//! Utility module
//!
//! Time formatting, the clock abstraction and shutdown signal handling.

pub mod clock;
pub mod format;
pub mod signals;

// Re-export main items
pub use clock::{Clock, MockClock, SystemClock, TokioClock};
pub use format::{format_bare, format_time, TimeFormat};
pub use signals::shutdown_signal;
