//! Countdown Timer - count down in the terminal
//!
//! Renders every state change on stdout and reads commands from stdin
//! (`freeze`, `resume`, `reset`, `reset frozen`, `initial <N>`, `set <N>`).

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use countdown_timer::{
    config::Config,
    state::Countdown,
    tasks::CountdownHandle,
    utils::{shutdown_signal, TokioClock},
    Command, TimerSnapshot,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so stdout only carries the countdown
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_timer={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Starting countdown: seconds={}, frozen={}, format={:?}",
        config.seconds, config.frozen, config.format
    );

    let countdown = Countdown::with_clock(config.seconds, config.frozen, TokioClock)
        .with_format(config.format)
        .on_completed(|| info!("Time is up"));
    let handle = CountdownHandle::spawn(countdown);

    let mut snapshots = handle.subscribe();
    render(&config, &snapshots.borrow_and_update())?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    warn!("Countdown task stopped unexpectedly");
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                render(&config, &snapshot)?;
                if snapshot.has_completed() {
                    break;
                }
            }

            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) if line.trim().is_empty() => {}
                Ok(Some(line)) => match line.parse::<Command>() {
                    Ok(command) => {
                        handle.send(command).await?;
                    }
                    Err(e) => warn!("Ignoring command: {}", e),
                },
                Ok(None) => {
                    info!("stdin closed, commands disabled");
                    stdin_open = false;
                }
                Err(e) => {
                    warn!("Failed to read stdin: {}", e);
                    stdin_open = false;
                }
            },

            result = &mut shutdown => {
                result?;
                info!("Shutdown signal received");
                break;
            }
        }
    }

    info!("Countdown stopped at {}", handle.snapshot().time_remaining);
    Ok(())
}

/// Print one snapshot as text or as a JSON line
fn render(config: &Config, snapshot: &TimerSnapshot) -> anyhow::Result<()> {
    if config.json {
        println!("{}", serde_json::to_string(snapshot)?);
    } else if snapshot.is_frozen && snapshot.seconds_remaining > 0 {
        println!("{} (frozen)", snapshot.time_remaining);
    } else {
        println!("{}", snapshot.time_remaining);
    }
    Ok(())
}
