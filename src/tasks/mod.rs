//! Background tasks module
//!
//! This module hosts countdowns on tokio tasks.

pub mod countdown_task;

// Re-export main types
pub use countdown_task::CountdownHandle;
