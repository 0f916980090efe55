//! Project-management server binary.

use std::net::SocketAddr;

use anyhow::Context;
use pm_server::{
    config::{Config, StorageBackend},
    create_app, create_state, init_tracing,
};
use task_store::{MemoryTaskStore, PgTaskStore, TaskStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    init_tracing(&config.log_level);

    tracing::info!(
        storage = %config.storage,
        environment = %config.environment,
        "Starting project-management server"
    );

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid listen address {}", config.server_addr()))?;

    match config.storage {
        StorageBackend::Memory => serve(config, addr, MemoryTaskStore::new()).await,
        StorageBackend::Postgres => {
            let store = PgTaskStore::connect(&config.database_url, config.db_max_connections)
                .await
                .context("failed to connect to database")?;
            store
                .run_schema()
                .await
                .context("failed to apply database schema")?;
            tracing::info!(
                max_connections = config.db_max_connections,
                "Database ready"
            );
            serve(config, addr, store).await
        }
    }
}

async fn serve<S: TaskStore>(config: Config, addr: SocketAddr, store: S) -> anyhow::Result<()> {
    let app = create_app(create_state(config, store));

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
