use std::sync::Arc;

use portfolio_backend::config::{AppState, Config};
use portfolio_backend::logger;
use portfolio_backend::server::{self, SignalHandler};
use portfolio_backend::storage::{ContactStore, MemoryStore, MongoStore};
use tracing::warn;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> Result<(), BoxError> {
    // Config path without extension, e.g. `config` for `config.toml`
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config".to_string());
    let cfg = Config::load_from(&config_path)?;
    logger::init(&cfg.logging)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), BoxError> {
    let addr = cfg.get_socket_addr()?;

    let store: Arc<dyn ContactStore> = if cfg.database.is_configured() {
        Arc::new(MongoStore::connect(&cfg.database).await?)
    } else {
        warn!("No database URI configured, contact submissions are kept in memory only");
        Arc::new(MemoryStore::new())
    };

    if cfg.admin.listing_enabled {
        logger::log_admin_listing_enabled(&cfg.http.api_prefix);
    }

    let listener = server::create_listener(addr)?;
    logger::log_server_start(&addr, &cfg);

    let state = Arc::new(AppState::new(cfg, Arc::clone(&store)));
    let signals = Arc::new(SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals), Arc::clone(&state))?;

    let served = server::serve(listener, state, signals).await;

    store.close().await;
    logger::log_shutdown_complete();
    served
}
