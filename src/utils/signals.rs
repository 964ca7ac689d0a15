//! Signal handling for graceful shutdown

use futures::stream::StreamExt;
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook_tokio::Signals;
use tracing::info;

/// Wait for the first SIGTERM or SIGINT
pub async fn shutdown_signal() -> std::io::Result<()> {
    let mut signals = Signals::new([SIGTERM, SIGINT])?;
    let handle = signals.handle();

    if let Some(signal) = signals.next().await {
        let name = if signal == SIGINT { "SIGINT" } else { "SIGTERM" };
        info!("Received {}, stopping countdown", name);
    }

    handle.close();
    Ok(())
}
