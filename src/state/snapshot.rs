//! Observable countdown state

use serde::{Deserialize, Serialize};

/// Point-in-time copy of everything a caller can observe on a countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    /// Whole seconds left
    pub seconds_remaining: u64,
    /// `seconds_remaining` rendered in the countdown's format
    pub time_remaining: String,
    /// Whether ticking is suspended
    pub is_frozen: bool,
    /// Number of times the countdown has run out by ticking
    pub completed_count: u64,
}

impl TimerSnapshot {
    /// True while a tick is expected
    pub fn is_counting(&self) -> bool {
        !self.is_frozen && self.seconds_remaining > 0
    }

    /// True once the countdown has run out at least once
    pub fn has_completed(&self) -> bool {
        self.completed_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_snake_case_fields() {
        let snapshot = TimerSnapshot {
            seconds_remaining: 65,
            time_remaining: "01:05".to_string(),
            is_frozen: false,
            completed_count: 0,
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["seconds_remaining"], 65);
        assert_eq!(json["time_remaining"], "01:05");
        assert_eq!(json["is_frozen"], false);
        assert!(snapshot.is_counting());
        assert!(!snapshot.has_completed());
    }
}
