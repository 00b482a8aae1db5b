// Configuration module entry point
// Manages application configuration and shared runtime state

mod state;
mod types;

use std::env;
use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    AdminConfig, Config, DatabaseConfig, HttpConfig, LoggingConfig, PerformanceConfig,
    ServerConfig, StaticFilesConfig,
};

/// Prefix for structured environment overrides, e.g. `PORTFOLIO__DATABASE__URI`
const ENV_PREFIX: &str = "PORTFOLIO";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("database.uri", "mongodb://localhost:27017")?
            .set_default("database.name", "portfolio_db")?
            .set_default("database.min_pool_size", 1)?
            .set_default("database.max_pool_size", 10)?
            .set_default("database.server_selection_timeout", 30)?
            .set_default("database.connect_timeout", 20)?
            .set_default("database.socket_timeout", 20)?
            .set_default("http.api_prefix", "/api/v1")?
            .set_default("http.server_name", "Portfolio-Backend/1.0")?
            .set_default(
                "http.cors_origins",
                vec!["http://localhost:5173", "http://localhost:3000"],
            )?
            .set_default("http.max_body_size", 65_536)? // 64KB
            .set_default("performance.keep_alive", true)?
            .set_default("performance.connection_timeout", 60)?
            .set_default("performance.shutdown_timeout", 10)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("static_files.root", "static")?
            .set_default("admin.listing_enabled", false)?
            .set_default("environment", "development")?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("http.cors_origins")
                    .try_parsing(true),
            )
            .set_override_option("database.uri", env::var("MONGODB_URI").ok())?
            .set_override_option("database.name", env::var("DATABASE_NAME").ok())?
            .set_override_option("http.cors_origins", legacy_cors_origins())?
            .set_override_option("http.api_prefix", env::var("API_V1_STR").ok())?
            .set_override_option("static_files.root", env::var("STATIC_FILES_PATH").ok())?
            .set_override_option("environment", env::var("ENVIRONMENT").ok())?
            .set_override_option("server.port", legacy_port())?
            .build()?;

        let mut cfg: Self = settings.try_deserialize()?;
        cfg.http.api_prefix = normalize_prefix(&cfg.http.api_prefix);
        Ok(cfg)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }
}

/// `CORS_ORIGINS=a,b,c` as accepted by earlier deployments
fn legacy_cors_origins() -> Option<Vec<String>> {
    let raw = env::var("CORS_ORIGINS").ok()?;
    Some(parse_origin_list(&raw))
}

fn legacy_port() -> Option<i64> {
    env::var("PORT").ok().and_then(|p| p.trim().parse().ok())
}

fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Ensure the prefix starts with `/` and carries no trailing slash
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
pub(crate) fn test_config(static_root: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            workers: None,
        },
        database: DatabaseConfig {
            uri: "mongodb://localhost:27017".to_string(),
            name: "portfolio_test".to_string(),
            min_pool_size: 1,
            max_pool_size: 10,
            server_selection_timeout: 30,
            connect_timeout: 20,
            socket_timeout: 20,
        },
        http: HttpConfig {
            api_prefix: "/api/v1".to_string(),
            server_name: "Portfolio-Backend/test".to_string(),
            cors_origins: vec!["http://localhost:5173".to_string()],
            max_body_size: 65_536,
        },
        performance: PerformanceConfig {
            keep_alive: true,
            connection_timeout: 60,
            shutdown_timeout: 1,
            max_connections: None,
        },
        logging: LoggingConfig {
            level: "info".to_string(),
            access_log: false,
            access_log_format: "combined".to_string(),
        },
        static_files: StaticFilesConfig {
            root: static_root.to_string(),
            certifications_ttl_secs: None,
        },
        admin: AdminConfig {
            listing_enabled: true,
        },
        environment: "development".to_string(),
    }
}
