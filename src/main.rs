//! Sensor Anomaly Service entry point

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sensor_anomaly_service::{
    config::{Config, LogFormat},
    create_router,
    logic::{ModelHandle, ScoringService},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Initialize logging
    init_tracing(config.log_format);

    tracing::info!("Sensor Anomaly Service starting ({})...", config.environment);
    tracing::info!(
        "History capacity: {}, model path: {}",
        config.history_capacity,
        config.model_path.display()
    );

    // Load model once; a missing or broken artifact leaves scoring disabled
    let model = ModelHandle::load(&config.model_path).unwrap_or_else(|e| {
        tracing::error!("Failed to load model, scoring disabled: {}", e);
        ModelHandle::Unloaded
    });
    tracing::info!("Model loaded: {}", model.is_loaded());

    let service = ScoringService::new(
        config.service_name.clone(),
        model,
        config.history_capacity,
    );
    let state = AppState::new(service, config.clone());

    // Build router
    let app = create_router(state);

    // Start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sensor_anomaly_service=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl+c: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
}
