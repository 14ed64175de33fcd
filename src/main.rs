use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::{info, warn};

use devcamper::devcamper_config::ServerConfig;
use devcamper::devcamper_db::{DocumentStore, PgDocumentStore, connect};
use devcamper::logging::init_tracing;
use devcamper::router::init_router;
use devcamper::state::{AppState, memory_store};

async fn init_store(config: &ServerConfig) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match &config.database_url {
        Some(url) => {
            let pool = connect(url).await.context("Failed to connect to database")?;
            let store = PgDocumentStore::new(pool);
            store.migrate().await.context("Failed to run migrations")?;
            info!("Using PostgreSQL document store");
            Ok(Arc::new(store))
        }
        None => {
            warn!("DATABASE_URL not set; data is kept in memory and lost on exit");
            Ok(Arc::new(memory_store()))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let _guard = init_tracing();

    let server_config = ServerConfig::from_env();
    let store = init_store(&server_config).await?;
    let port = server_config.port;
    info!(environment = server_config.environment.as_str(), "Starting DevCamper API");

    let app = init_router(AppState::new(store, server_config));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    println!("🚀 Server running on http://localhost:{}", port);
    println!("📚 Swagger UI available at http://localhost:{}/swagger-ui", port);
    println!("📖 Scalar UI available at http://localhost:{}/scalar", port);
    axum::serve(listener, app).await?;

    Ok(())
}
