//! Predict-and-explain
//!
//! One submission: align the Input Record to the schema, call the pipeline
//! once, then rank the model step's importances against the schema.

use std::time::Instant;

use serde::Serialize;

use crate::artifacts::Artifacts;
use crate::model::PredictionError;
use crate::schema::{align, FeatureSchema, InputRecord};

/// Number of importance bars shown
pub const TOP_IMPORTANCES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionOutcome {
    /// Raw model output, not checked for plausibility
    pub price: f64,
    /// Largest importances, ascending
    pub importances: Vec<FeatureImportance>,
    pub inference_time_us: u64,
}

pub fn predict_and_explain(
    artifacts: &Artifacts,
    record: &InputRecord,
) -> Result<PredictionOutcome, PredictionError> {
    let start_time = Instant::now();

    let row = align(record, &artifacts.schema);
    let price = artifacts.model.predict(row.values())?;

    let importances = top_importances(
        &artifacts.schema,
        artifacts.model.feature_importances()?,
        TOP_IMPORTANCES,
    )?;

    Ok(PredictionOutcome {
        price,
        importances,
        inference_time_us: start_time.elapsed().as_micros() as u64,
    })
}

/// Pair importances with schema names, sort ascending, keep the last `n`
pub fn top_importances(
    schema: &FeatureSchema,
    importances: &[f64],
    n: usize,
) -> Result<Vec<FeatureImportance>, PredictionError> {
    if importances.len() != schema.len() {
        return Err(PredictionError::ImportanceLength {
            expected: schema.len(),
            actual: importances.len(),
        });
    }

    let mut ranked: Vec<FeatureImportance> = schema
        .names()
        .iter()
        .zip(importances)
        .map(|(feature, score)| FeatureImportance {
            feature: feature.clone(),
            score: *score,
        })
        .collect();
    ranked.sort_by(|a, b| a.score.total_cmp(&b.score));

    let skip = ranked.len().saturating_sub(n);
    Ok(ranked.split_off(skip))
}
