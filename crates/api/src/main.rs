use anyhow::Result;
use persistence::{MemoryStore, PgStore, VitalsStore};
use std::sync::Arc;
use tracing::info;

use vital_monitor_api::app::create_app;
use vital_monitor_api::config::{Config, StorageBackend};
use vital_monitor_api::middleware::{init_metrics, logging::init_logging};

async fn create_store(config: &Config) -> Result<Arc<dyn VitalsStore>> {
    match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Postgres => {
            let pool = persistence::db::create_pool(&(&config.database).into()).await?;

            info!("Running database migrations...");
            persistence::db::run_migrations(&pool).await?;
            info!("Migrations completed");

            Ok(Arc::new(PgStore::new(pool)))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = Config::load()?;

    init_logging(&config.logging)?;
    init_metrics()?;

    info!("Starting Vital Monitor v{}", env!("CARGO_PKG_VERSION"));

    let store = create_store(&config).await?;
    let addr = config.socket_addr()?;
    let app = create_app(config, store);

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
