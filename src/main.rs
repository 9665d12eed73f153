//! House price predictor server
//!
//! Loads the model artifacts, then serves the predictor page.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use house_price_web::artifacts::Artifacts;
use house_price_web::config::Config;
use house_price_web::model::InferenceStats;
use house_price_web::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Initialize logging
    let production = config.is_production();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "house_price_web=debug,tower_http=debug".into()))
        .with(production.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!production).then(|| tracing_subscriber::fmt::layer()))
        .init();

    tracing::info!("House price predictor starting...");

    // Artifacts must load before anything is served
    let artifacts = match Artifacts::load(&config.model_path, &config.features_path) {
        Ok(artifacts) => artifacts,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    // Build application state
    let state = AppState {
        artifacts: Arc::new(artifacts),
        stats: Arc::new(InferenceStats::new()),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from((config.host, config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
