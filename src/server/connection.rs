// Connection handling module
// Accepts a single TCP connection and serves it with hyper

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use hyper_util::server::graceful::GracefulShutdown;
use tokio::net::TcpStream;
use tracing::warn;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Accept and process a connection, enforcing `performance.max_connections`.
///
/// The connection is registered with `graceful` so shutdown can wait for it.
pub fn accept_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: &Arc<AppState>,
    conn_counter: &Arc<AtomicUsize>,
    graceful: &GracefulShutdown,
) {
    // Increment first, then check, so concurrent accepts cannot overshoot
    let prev_count = conn_counter.fetch_add(1, Ordering::SeqCst);

    if let Some(max_conn) = state.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            conn_counter.fetch_sub(1, Ordering::SeqCst);
            warn!("Max connections reached: {prev_count}/{max_conn}. Connection from {peer_addr} rejected.");
            drop(stream);
            return;
        }
    }

    if state.access_log_enabled() {
        logger::log_connection_accepted(&peer_addr);
    }

    handle_connection(
        stream,
        peer_addr,
        Arc::clone(state),
        Arc::clone(conn_counter),
        graceful,
    );
}

/// Serve one connection on a spawned task, bounded by
/// `performance.connection_timeout`
fn handle_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
    conn_counter: Arc<AtomicUsize>,
    graceful: &GracefulShutdown,
) {
    let io = TokioIo::new(stream);
    let timeout = Duration::from_secs(state.config.performance.connection_timeout);

    let mut builder = http1::Builder::new();
    builder.keep_alive(state.config.performance.keep_alive);

    let service_state = Arc::clone(&state);
    let conn = builder.serve_connection(
        io,
        service_fn(move |req| {
            handler::handle_request(req, Some(peer_addr), Arc::clone(&service_state))
        }),
    );
    let conn = graceful.watch(conn);

    tokio::spawn(async move {
        match tokio::time::timeout(timeout, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => {
                warn!(
                    "Connection from {peer_addr} timed out after {} seconds",
                    timeout.as_secs()
                );
            }
        }
        conn_counter.fetch_sub(1, Ordering::SeqCst);
    });
}
