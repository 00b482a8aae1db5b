// Application state module
// Shared, explicitly constructed state handed to every request

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::types::Config;
use crate::assets::StaticAssets;
use crate::handler::router::RouteTable;
use crate::http::cors::CorsPolicy;
use crate::storage::ContactStore;

/// Application state
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn ContactStore>,
    pub assets: StaticAssets,
    pub routes: RouteTable,
    pub cors: CorsPolicy,

    // Cached config values for fast access without locks
    pub cached_access_log: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn ContactStore>) -> Self {
        let assets = StaticAssets::new(
            &config.static_files.root,
            &config.http.api_prefix,
            config.static_files.certifications_ttl(),
        );
        let routes = RouteTable::new(&config.http.api_prefix);
        let cors = CorsPolicy::new(&config.http.cors_origins);
        let cached_access_log = Arc::new(AtomicBool::new(config.logging.access_log));

        Self {
            config,
            store,
            assets,
            routes,
            cors,
            cached_access_log,
        }
    }

    pub fn access_log_enabled(&self) -> bool {
        self.cached_access_log.load(Ordering::Relaxed)
    }
}
