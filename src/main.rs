//! Server binary: reads settings, picks the store, mounts the routes.

use storefront::{app, apply_migrations, ensure_database_exists, AppConfig, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("storefront=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let state = match &config.database_url {
        Some(database_url) => {
            if config.create_database {
                ensure_database_exists(database_url).await?;
            }
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(database_url)
                .await?;
            apply_migrations(&pool).await?;
            tracing::info!(max_connections = config.max_connections, "using postgres store");
            AppState::postgres(pool)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory store");
            AppState::in_memory()
        }
    };

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state, config.body_limit_bytes))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
