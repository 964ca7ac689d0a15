//! Countdown engine
//!
//! A single-owner state machine that counts whole seconds down to zero.
//!
//! ```text
//! Counting(n) --tick--> Counting(n-1) | Exhausted
//! Counting(n) --set_freeze(true)--> ManuallyFrozen(n)
//! ManuallyFrozen(n > 0) --set_freeze(false)--> Counting(n)
//! any --reset_timer(f)--> Counting(initial) | ManuallyFrozen(initial)
//! ```
//!
//! The engine never sleeps. Every caller mutation first applies the ticks that
//! are already due, then ends in `reschedule`, which drops the pending tick
//! deadline and, if the countdown should keep running, sets a new one a second
//! out. The owner calls [`Countdown::poll`]
//! to apply every tick whose deadline has passed on the injected [`Clock`].

use std::{
    fmt,
    panic::{catch_unwind, AssertUnwindSafe},
    time::{Duration, Instant},
};
use tracing::{debug, error, info};

use crate::{
    command::Command,
    error::TimerError,
    utils::{Clock, SystemClock, TimeFormat},
};
use super::TimerSnapshot;

/// Time between two ticks
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Callback invoked when the countdown runs out by ticking
pub type CompletionCallback = Box<dyn FnMut() + Send + 'static>;

/// Countdown state owned by one caller
pub struct Countdown<C: Clock = SystemClock> {
    initial_seconds: u64,
    seconds_remaining: u64,
    time_remaining: String,
    frozen: bool,
    format: TimeFormat,
    completed_count: u64,
    /// Deadline of the only outstanding tick
    next_tick: Option<Instant>,
    on_completed: Option<CompletionCallback>,
    clock: C,
}

impl Countdown<SystemClock> {
    /// Create a countdown on the system clock
    pub fn new(initial_seconds: u64, initial_freeze: bool) -> Self {
        Self::with_clock(initial_seconds, initial_freeze, SystemClock)
    }
}

impl<C: Clock> Countdown<C> {
    /// Create a countdown that reads time from `clock`
    pub fn with_clock(initial_seconds: u64, initial_freeze: bool, clock: C) -> Self {
        let format = TimeFormat::default();
        let mut countdown = Self {
            initial_seconds,
            seconds_remaining: initial_seconds,
            time_remaining: format.render(initial_seconds),
            frozen: initial_freeze,
            format,
            completed_count: 0,
            next_tick: None,
            on_completed: None,
            clock,
        };
        countdown.settle();
        countdown
    }

    /// Render remaining time with `format` instead of `MM:SS`
    pub fn with_format(mut self, format: TimeFormat) -> Self {
        self.format = format;
        self.time_remaining = format.render(self.seconds_remaining);
        self
    }

    /// Call `callback` each time the countdown runs out by ticking
    pub fn on_completed<F>(mut self, callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.on_completed = Some(Box::new(callback));
        self
    }

    /// Whole seconds left
    pub fn seconds_remaining(&self) -> u64 {
        self.seconds_remaining
    }

    /// Remaining time rendered in the configured format
    pub fn time_remaining(&self) -> &str {
        &self.time_remaining
    }

    /// Whether ticking is suspended
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Configured duration that resets return to
    pub fn initial_seconds(&self) -> u64 {
        self.initial_seconds
    }

    /// Number of times the countdown has run out by ticking
    pub fn completed_count(&self) -> u64 {
        self.completed_count
    }

    /// Format used for `time_remaining`
    pub fn format(&self) -> TimeFormat {
        self.format
    }

    /// Deadline of the pending tick, if one is scheduled
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_tick
    }

    /// Whether a tick is scheduled
    pub fn has_pending_tick(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Copy the observable state
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            seconds_remaining: self.seconds_remaining,
            time_remaining: self.time_remaining.clone(),
            is_frozen: self.frozen,
            completed_count: self.completed_count,
        }
    }

    /// Freeze or resume ticking.
    ///
    /// Ticks already due are applied first. Setting the flag it already has is
    /// a no-op, so an outstanding tick keeps its deadline.
    pub fn set_freeze(&mut self, value: bool) -> Result<(), TimerError> {
        let caught_up = self.catch_up();
        if self.frozen != value {
            debug!("Setting frozen to {}", value);
            self.frozen = value;
            self.settle();
        }
        caught_up
    }

    /// Restore the configured initial seconds with the given frozen flag
    pub fn reset_timer(&mut self, freeze: bool) -> Result<(), TimerError> {
        let caught_up = self.catch_up();
        info!(
            "Resetting countdown to {}s (frozen={})",
            self.initial_seconds, freeze
        );
        self.set_remaining(self.initial_seconds);
        self.frozen = freeze;
        self.settle();
        caught_up
    }

    /// Change the configured initial seconds and resync the remaining time.
    ///
    /// The frozen flag is kept. An unchanged value only applies due ticks.
    pub fn set_initial_seconds(&mut self, seconds: u64) -> Result<(), TimerError> {
        let caught_up = self.catch_up();
        if self.initial_seconds != seconds {
            info!(
                "Initial seconds changed from {} to {}, resyncing",
                self.initial_seconds, seconds
            );
            self.initial_seconds = seconds;
            self.set_remaining(seconds);
            self.settle();
        }
        caught_up
    }

    /// Overwrite the remaining seconds without touching the configuration
    pub fn set_seconds_remaining(&mut self, seconds: u64) -> Result<(), TimerError> {
        let caught_up = self.catch_up();
        debug!("Setting remaining seconds to {}", seconds);
        self.set_remaining(seconds);
        self.settle();
        caught_up
    }

    /// Apply one caller command.
    ///
    /// Like the individual setters, the command takes effect even when a due
    /// tick's completion callback panics; that fault is returned afterwards.
    pub fn apply(&mut self, command: Command) -> Result<(), TimerError> {
        match command {
            Command::SetFreeze(value) => self.set_freeze(value),
            Command::Reset { freeze } => self.reset_timer(freeze),
            Command::SetInitialSeconds(seconds) => self.set_initial_seconds(seconds),
            Command::SetSecondsRemaining(seconds) => self.set_seconds_remaining(seconds),
        }
    }

    /// Apply every tick whose deadline has passed and return how many ran.
    ///
    /// Ticks are chained from the previous deadline, so a late poll catches up
    /// without drifting. If the completion callback panics the countdown is
    /// still frozen at zero and [`TimerError::CallbackPanicked`] is returned.
    pub fn poll(&mut self) -> Result<u64, TimerError> {
        let now = self.clock.now();
        let mut ticks = 0;

        while let Some(deadline) = self.next_tick {
            if deadline > now {
                break;
            }
            self.next_tick = None;
            ticks += 1;

            self.set_remaining(self.seconds_remaining.saturating_sub(1));
            debug!("Tick: {} remaining", self.time_remaining);

            if self.seconds_remaining > 0 {
                self.next_tick = Some(deadline + TICK_INTERVAL);
            } else {
                self.exhaust()?;
            }
        }

        Ok(ticks)
    }

    /// Apply ticks whose deadline passed before a caller mutation
    fn catch_up(&mut self) -> Result<(), TimerError> {
        self.poll().map(|ticks| {
            if ticks > 0 {
                debug!("Caught up {} due ticks", ticks);
            }
        })
    }

    /// Freeze at zero, then notify the completion callback
    fn exhaust(&mut self) -> Result<(), TimerError> {
        self.frozen = true;
        self.completed_count += 1;
        info!("Countdown complete");

        let Some(callback) = self.on_completed.as_mut() else {
            return Ok(());
        };
        catch_unwind(AssertUnwindSafe(|| callback())).map_err(|_| {
            error!("Completion callback panicked; countdown stays frozen");
            TimerError::CallbackPanicked
        })
    }

    /// Write the seconds and the string derived from them together
    fn set_remaining(&mut self, seconds: u64) {
        self.seconds_remaining = seconds;
        self.time_remaining = self.format.render(seconds);
    }

    /// Auto-freeze at zero without firing completion, then reschedule
    fn settle(&mut self) {
        if self.seconds_remaining == 0 && !self.frozen {
            debug!("No time remaining, freezing without completion");
            self.frozen = true;
        }
        self.reschedule();
    }

    /// Cancel the pending tick and schedule the next one if still counting
    fn reschedule(&mut self) {
        self.next_tick = None;
        if self.seconds_remaining > 0 && !self.frozen {
            self.next_tick = Some(self.clock.now() + TICK_INTERVAL);
        }
    }
}

impl<C: Clock> fmt::Debug for Countdown<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Countdown")
            .field("initial_seconds", &self.initial_seconds)
            .field("seconds_remaining", &self.seconds_remaining)
            .field("time_remaining", &self.time_remaining)
            .field("frozen", &self.frozen)
            .field("format", &self.format)
            .field("completed_count", &self.completed_count)
            .field("next_tick", &self.next_tick)
            .field("has_callback", &self.on_completed.is_some())
            .finish()
    }
}
