//! Countdown background task

use std::{future, time::Instant};
use tokio::{
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
    time::sleep_until,
};
use tracing::{debug, error, info};

use crate::{
    command::Command,
    error::TimerError,
    state::{Countdown, TimerSnapshot},
    utils::TokioClock,
};

/// A command together with the channel its resulting snapshot is sent back on
type Request = (Command, oneshot::Sender<TimerSnapshot>);

/// Handle to a countdown running on its own tokio task.
///
/// Dropping the handle stops the task; a pending tick never fires afterwards.
#[derive(Debug)]
pub struct CountdownHandle {
    commands: mpsc::UnboundedSender<Request>,
    snapshots: watch::Receiver<TimerSnapshot>,
    task: JoinHandle<()>,
}

impl CountdownHandle {
    /// Move `countdown` onto a new task on the current tokio runtime
    pub fn spawn(countdown: Countdown<TokioClock>) -> Self {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshots) = watch::channel(countdown.snapshot());
        let task = tokio::spawn(countdown_task(countdown, command_rx, snapshot_tx));

        Self {
            commands,
            snapshots,
            task,
        }
    }

    /// Latest published state
    pub fn snapshot(&self) -> TimerSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified whenever the observable state changes
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshots.clone()
    }

    /// Send a command and wait until the task has applied it
    pub async fn send(&self, command: Command) -> Result<TimerSnapshot, TimerError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send((command, reply_tx))
            .map_err(|_| TimerError::Stopped)?;
        reply_rx.await.map_err(|_| TimerError::Stopped)
    }

    /// Freeze or resume ticking
    pub async fn set_freeze(&self, value: bool) -> Result<TimerSnapshot, TimerError> {
        self.send(Command::SetFreeze(value)).await
    }

    /// Restore the initial seconds, optionally frozen
    pub async fn reset_timer(&self, freeze: bool) -> Result<TimerSnapshot, TimerError> {
        self.send(Command::Reset { freeze }).await
    }

    /// Change the initial seconds and resync the remaining time
    pub async fn set_initial_seconds(&self, seconds: u64) -> Result<TimerSnapshot, TimerError> {
        self.send(Command::SetInitialSeconds(seconds)).await
    }

    /// Overwrite the remaining seconds
    pub async fn set_seconds_remaining(&self, seconds: u64) -> Result<TimerSnapshot, TimerError> {
        self.send(Command::SetSecondsRemaining(seconds)).await
    }

    /// Whether the task is still running
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop the task; later commands fail with [`TimerError::Stopped`]
    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Wait for the tick deadline, or forever when none is pending
async fn next_tick(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline.into()).await,
        None => future::pending::<()>().await,
    }
}

/// Event loop owning one countdown.
///
/// Commands are polled before the tick so that a command arriving ahead of a
/// deadline cancels that tick. A deadline that has already passed is applied
/// before the command.
async fn countdown_task(
    mut countdown: Countdown<TokioClock>,
    mut command_rx: mpsc::UnboundedReceiver<Request>,
    snapshot_tx: watch::Sender<TimerSnapshot>,
) {
    info!(
        "Starting countdown task: {}s, frozen={}",
        countdown.seconds_remaining(),
        countdown.is_frozen()
    );

    loop {
        let deadline = countdown.next_deadline();

        tokio::select! {
            biased;

            request = command_rx.recv() => {
                let Some((command, reply_tx)) = request else {
                    debug!("Command channel closed");
                    break;
                };
                // Ticks that came due while the command waited still count
                if let Err(e) = countdown.poll() {
                    error!("Countdown tick failed: {}", e);
                }
                debug!("Applying {:?}", command);
                if let Err(e) = countdown.apply(command) {
                    error!("Countdown tick failed: {}", e);
                }
                publish(&snapshot_tx, countdown.snapshot());
                // The caller may have stopped waiting for the reply
                let _ = reply_tx.send(countdown.snapshot());
            }

            _ = next_tick(deadline) => {
                if let Err(e) = countdown.poll() {
                    error!("Countdown tick failed: {}", e);
                }
                publish(&snapshot_tx, countdown.snapshot());
            }
        }
    }

    info!("Countdown task stopped");
}

/// Notify watchers only when the observable state changed
fn publish(snapshot_tx: &watch::Sender<TimerSnapshot>, snapshot: TimerSnapshot) {
    snapshot_tx.send_if_modified(|current| {
        if *current == snapshot {
            false
        } else {
            *current = snapshot;
            true
        }
    });
}
