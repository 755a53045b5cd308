mod analytics;
mod api;
mod config;
mod models;
mod storage;

use anyhow::Result;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use analytics::{AnalyticsService, SnapshotCache};
use api::AppState;
use config::{Config, DatabaseBackend};
use storage::{OrderStore, PostgresStorage, SqliteStorage};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration");

    // Initialize storage
    let store: Arc<dyn OrderStore> = match config.database.backend {
        DatabaseBackend::Sqlite => {
            info!("Using SQLite order store: {}", config.database.url);
            Arc::new(SqliteStorage::new(&config.database.url, config.database.max_connections).await?)
        }
        DatabaseBackend::Postgres => {
            info!("Using PostgreSQL order store: {}", config.database.url);
            Arc::new(PostgresStorage::new(&config.database.url).await?)
        }
    };

    info!("Initializing database...");
    store.init().await?;
    info!("Database initialized successfully");

    let analytics = AnalyticsService::new(Arc::clone(&store));

    let snapshot_cache = if config.snapshot_cache_ttl_secs > 0 {
        info!(
            "Snapshot caching enabled (ttl: {}s)",
            config.snapshot_cache_ttl_secs
        );
        Some(SnapshotCache::new(config.snapshot_cache_ttl_secs))
    } else {
        None
    };

    let state = Arc::new(AppState {
        store,
        analytics,
        snapshot_cache,
        started_at: Instant::now(),
    });
    let router = api::create_router(state, &config.cors_allowed_origins);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚀 Server listening on http://{}", addr);
    info!(
        "   - Business insights at http://{}/api/business-insights",
        addr
    );

    axum::serve(listener, router).await?;

    Ok(())
}
