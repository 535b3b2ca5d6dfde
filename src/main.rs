//! Student API server: reads settings from the environment, prepares storage, and serves the router.

use std::sync::Arc;
use student_api::{
    app, ensure_database_exists, ensure_student_table, AppState, MemoryStudentStore, PgStudentStore,
    Settings, StoreKind, StudentStore,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("student_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;

    let store: Arc<dyn StudentStore> = match settings.store {
        StoreKind::Postgres => {
            ensure_database_exists(&settings.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .connect(&settings.database_url)
                .await?;
            ensure_student_table(&pool, &settings.table).await?;
            Arc::new(PgStudentStore::new(pool, settings.table.clone()))
        }
        StoreKind::Memory => {
            tracing::warn!("using in-memory store; data is lost on exit");
            Arc::new(MemoryStudentStore::new())
        }
    };

    let state = AppState::new(store, &settings.app_name);
    let router = app(state, settings.body_limit_bytes);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
