//! House price predictor
//!
//! Single-page web form over a pre-trained regression pipeline.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    HOUSE PRICE PREDICTOR                     │
//! ├──────────────────────────────────────────────────────────────┤
//! │  startup                         per request                 │
//! │  ┌────────────────┐    ┌──────────────────────────────────┐  │
//! │  │ Artifact       │    │ GET /        form                │  │
//! │  │ Loader         │───▶│ POST /predict                    │  │
//! │  │ (model+schema) │    │   listing → record → align →     │  │
//! │  └────────────────┘    │   predict → importances → page   │  │
//! │                        └──────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod artifacts;
pub mod config;
pub mod error;
pub mod handlers;
pub mod listing;
pub mod model;
pub mod predict;
pub mod render;
pub mod schema;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup, read-only afterwards
    pub artifacts: Arc<artifacts::Artifacts>,
    pub stats: Arc<model::InferenceStats>,
    pub config: config::Config,
}

/// Create the router: the page, its submit action and a health probe
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::predictor::page))
        .route("/predict", post(handlers::predictor::submit))
        .route("/health", get(handlers::health::check))
        .fallback(handlers::not_found)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
