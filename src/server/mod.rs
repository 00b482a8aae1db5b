// Server module entry point
// Accept loop, connection handling and graceful shutdown

pub mod connection;
pub mod listener;
pub mod signal;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hyper_util::server::graceful::GracefulShutdown;
use tokio::net::TcpListener;
use tracing::{error, warn};

use crate::config::AppState;
use crate::logger;

pub use connection::accept_connection;
pub use listener::create_listener;
pub use signal::{start_signal_handler, SignalHandler};

/// Accept connections until shutdown is requested, then drain.
///
/// In-flight connections get `performance.shutdown_timeout` seconds to
/// finish; whatever is still open after that is dropped.
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
    signals: Arc<SignalHandler>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let active_connections = Arc::new(AtomicUsize::new(0));
    let graceful = GracefulShutdown::new();

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(
                            stream,
                            peer_addr,
                            &state,
                            &active_connections,
                            &graceful,
                        );
                    }
                    Err(e) => error!("Failed to accept connection: {e}"),
                }
            }

            () = signals.shutdown.notified() => break,
        }
    }

    // Stop accepting before draining
    drop(listener);
    logger::log_shutdown_started(active_connections.load(Ordering::SeqCst));

    let drain_timeout = Duration::from_secs(state.config.performance.shutdown_timeout);
    if tokio::time::timeout(drain_timeout, graceful.shutdown())
        .await
        .is_err()
    {
        warn!(
            "Timed out after {}s waiting for {} connection(s) to close",
            drain_timeout.as_secs(),
            active_connections.load(Ordering::SeqCst)
        );
    }

    Ok(())
}
