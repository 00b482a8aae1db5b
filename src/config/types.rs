// Configuration types
// One struct per table of config.toml

use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub http: HttpConfig,
    pub performance: PerformanceConfig,
    pub logging: LoggingConfig,
    pub static_files: StaticFilesConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    /// Deployment environment name ("development" or "production")
    pub environment: String,
}

/// Listening socket and runtime sizing
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Document store configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    pub name: String,
    pub min_pool_size: u32,
    pub max_pool_size: u32,
    pub server_selection_timeout: u64,
    pub connect_timeout: u64,
    /// Upper bound for a single store round-trip, in seconds
    pub socket_timeout: u64,
}

impl DatabaseConfig {
    pub const fn server_selection_timeout(&self) -> Duration {
        Duration::from_secs(self.server_selection_timeout)
    }

    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    pub const fn socket_timeout(&self) -> Duration {
        Duration::from_secs(self.socket_timeout)
    }

    pub fn is_configured(&self) -> bool {
        !self.uri.trim().is_empty()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Versioned path prefix for all API routes, e.g. `/api/v1`
    pub api_prefix: String,
    pub server_name: String,
    /// Origins allowed by the CORS policy; `*` allows any origin
    pub cors_origins: Vec<String>,
    pub max_body_size: u64,
}

/// Connection handling limits
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    /// Connection lifetime limit in seconds
    pub connection_timeout: u64,
    /// Grace period for in-flight connections on shutdown, in seconds
    pub shutdown_timeout: u64,
    pub max_connections: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// `combined`, `common`, `json` or a `$variable` pattern
    pub access_log_format: String,
}

/// Static asset configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StaticFilesConfig {
    /// Root directory holding `resume/` and `certifications/`
    pub root: String,
    /// Lifetime of the cached certification listing; unset keeps it until refreshed
    #[serde(default)]
    pub certifications_ttl_secs: Option<u64>,
}

impl StaticFilesConfig {
    pub fn certifications_ttl(&self) -> Option<Duration> {
        self.certifications_ttl_secs.map(Duration::from_secs)
    }
}

/// Admin surface configuration
///
/// The contact listing endpoint has no authentication. It stays disabled
/// unless explicitly switched on.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AdminConfig {
    #[serde(default)]
    pub listing_enabled: bool,
}
