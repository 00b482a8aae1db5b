//! Logger module
//!
//! Sets up the `tracing` subscriber and provides the lifecycle and access
//! log helpers used by the server. Access lines go to the `access` target so
//! they can be filtered separately, e.g. `RUST_LOG=info,access=off`.

mod format;

pub use format::AccessLogEntry;

use std::net::SocketAddr;

use hyper::Version;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Config, LoggingConfig};

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over `logging.level` when set. Call once at
/// startup; a second call fails.
pub fn init(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)?,
    };
    fmt().with_env_filter(filter).with_target(true).try_init()
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    info!("======================================");
    info!("Portfolio backend started successfully");
    info!("Listening on: http://{addr}");
    info!("Environment: {}", config.environment);
    info!("API prefix: {}", display_prefix(&config.http.api_prefix));
    info!("Static files: {}", config.static_files.root);
    if let Some(workers) = config.server.workers {
        info!("Worker threads: {workers}");
    }
    if let Some(max) = config.performance.max_connections {
        info!("Max connections: {max}");
    }
    info!("======================================");
}

/// Loud notice that contact records are readable without authentication
pub fn log_admin_listing_enabled(prefix: &str) {
    warn!(
        "Admin listing is ENABLED: {}/contact/admin/all exposes every contact submission without authentication",
        prefix
    );
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    tracing::debug!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    error!("Failed to serve connection: {err:?}");
}

pub fn log_shutdown_started(in_flight: usize) {
    info!("Shutdown signal received, draining {in_flight} connection(s)");
}

pub fn log_shutdown_complete() {
    info!("Application shutdown completed");
}

/// Emit one access line in the configured format
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    info!(target: "access", "{}", entry.format(format));
}

/// HTTP version as written in request lines (`1.1`, `2`)
pub fn format_version(version: Version) -> String {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
    .to_string()
}

fn display_prefix(prefix: &str) -> &str {
    if prefix.is_empty() {
        "/"
    } else {
        prefix
    }
}
