use dotenvy::dotenv;
use invoice_service::config::get_configuration;
use invoice_service::services::Database;
use invoice_service::startup::build_router;
use invoice_service::AppState;
use service_core::observability::logging::init_tracing;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let settings = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "invoice-service",
        &settings.observability.log_level,
        settings.observability.otlp_endpoint.as_deref(),
    );

    invoice_service::services::metrics::init_metrics();

    let db = Database::new(
        &settings.database.url,
        settings.database.max_connections,
        settings.database.min_connections,
    )
    .await?;
    db.run_migrations().await?;

    let state = AppState {
        db: Arc::new(db),
        settings: Arc::new(settings.clone()),
    };

    let app = build_router(state);

    let address = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await.map_err(|e| {
        tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
        anyhow::anyhow!("Failed to bind to address {}: {}", address, e)
    })?;

    info!("Starting invoice-service on {}", address);
    axum::serve(listener, app).await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}
