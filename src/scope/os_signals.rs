//! Signal-driven registry reset.
//!
//! [`reset_on_shutdown`] completes when the process receives a termination
//! signal, after hard-resetting the given registry. Useful for hosts that
//! treat process shutdown as their only lifecycle boundary.
//!
//! ## Unix
//! Handled signals:
//! - **SIGINT** (Ctrl-C in terminal)
//! - **SIGTERM** (default kill signal, used by systemd/Kubernetes)
//! - **SIGQUIT** (optional "quit" signal, often used for hard stop)
//!
//! Additionally, [`tokio::signal::ctrl_c`] is awaited as a fallback.
//!
//! ## Windows
//! On non-Unix platforms only [`tokio::signal::ctrl_c`] is awaited.

use std::sync::Arc;

use crate::registry::EventRegistry;

#[cfg(unix)]
pub async fn reset_on_shutdown(registry: Arc<EventRegistry>) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigquit = signal(SignalKind::quit())?;

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {},
        _ = sigint.recv()  => {},
        _ = sigterm.recv() => {},
        _ = sigquit.recv() => {},
    }

    registry.reset();
    Ok(())
}

#[cfg(not(unix))]
pub async fn reset_on_shutdown(registry: Arc<EventRegistry>) -> std::io::Result<()> {
    tokio::signal::ctrl_c().await?;
    registry.reset();
    Ok(())
}
