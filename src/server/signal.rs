// Signal handling module
//
// Supported signals:
// - SIGHUP:  Refresh the certification listing
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;
use tracing::info;

use crate::config::AppState;

/// Shutdown coordination between the signal task and the accept loop
pub struct SignalHandler {
    /// Notified once on SIGTERM/SIGINT; holds a permit if nobody is waiting yet
    pub shutdown: Notify,
    pub shutdown_requested: AtomicBool,
}

impl SignalHandler {
    pub fn new() -> Self {
        Self {
            shutdown: Notify::new(),
            shutdown_requested: AtomicBool::new(false),
        }
    }

    /// Ask the server to stop accepting and drain
    pub fn request_shutdown(&self) {
        if !self.shutdown_requested.swap(true, Ordering::SeqCst) {
            self.shutdown.notify_one();
        }
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::SeqCst)
    }
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Start signal handlers (Unix only)
///
/// | Signal  | Action                         |
/// |---------|--------------------------------|
/// | SIGHUP  | Refresh certification listing  |
/// | SIGTERM | Graceful stop                  |
/// | SIGINT  | Graceful stop                  |
///
/// Registration happens before this returns, so failures surface to the caller.
#[cfg(unix)]
pub fn start_signal_handler(
    handler: Arc<SignalHandler>,
    state: Arc<AppState>,
) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sighup = signal(SignalKind::hangup())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    info!(
        pid = std::process::id(),
        "Signal handlers registered (SIGHUP: refresh certifications, SIGTERM/SIGINT: shutdown)"
    );

    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = sighup.recv() => {
                    info!("SIGHUP received, refreshing certification listing");
                    state.assets.refresh_certifications().await;
                }
                _ = sigterm.recv() => {
                    info!("SIGTERM received, initiating graceful shutdown");
                    handler.request_shutdown();
                    break;
                }
                _ = sigint.recv() => {
                    info!("SIGINT received (Ctrl+C), initiating graceful shutdown");
                    handler.request_shutdown();
                    break;
                }
            }
        }
    });

    Ok(())
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(
    handler: Arc<SignalHandler>,
    _state: Arc<AppState>,
) -> std::io::Result<()> {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            info!("Ctrl+C received, initiating graceful shutdown");
            handler.request_shutdown();
        }
    });
    Ok(())
}
