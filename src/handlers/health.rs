//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::model::EngineStatus;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    environment: String,
    engine: EngineStatus,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let metadata = &state.artifacts.metadata;

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        environment: state.config.environment.clone(),
        engine: EngineStatus {
            model_loaded: true,
            feature_count: metadata.feature_count,
            layout_hash: format!("{:08x}", metadata.layout_hash),
            avg_latency_ms: state.stats.avg_latency_ms(),
            inference_count: state.stats.inference_count(),
            failure_count: state.stats.failure_count(),
        },
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::artifacts::Artifacts;
    use crate::config::Config;
    use crate::model::{InferenceStats, Pipeline};
    use crate::schema::FeatureSchema;

    #[test]
    fn test_health_counts_inferences() {
        let stats = Arc::new(InferenceStats::new());
        stats.record_success(2000);
        let state = AppState {
            artifacts: Arc::new(Artifacts::from_parts(
                Pipeline::new(vec![]),
                FeatureSchema::new(["superficie", "chambre"]),
            )),
            stats,
            config: Config::default(),
        };

        let Json(health) = tokio_test::block_on(check(State(state)));
        assert_eq!(health.status, "healthy");
        assert_eq!(health.environment, "development");
        assert_eq!(health.engine.feature_count, 2);
        assert_eq!(health.engine.inference_count, 1);
        assert_eq!(health.engine.layout_hash.len(), 8);
    }
}
