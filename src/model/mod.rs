//! Model Module - Serialized Pipeline Inference
//!
//! The trained model arrives as a pipeline of named steps: zero or more
//! transformers followed by one estimator. Training happens elsewhere; this
//! module only evaluates what was exported.

pub mod estimators;
pub mod pipeline;
pub mod stats;
pub mod tree;

pub use estimators::{
    DecisionTreeRegressor, GradientBoostingRegressor, LinearRegressor, RandomForestRegressor,
    StandardScaler,
};
pub use pipeline::{Pipeline, Step, StepKind, IMPORTANCE_STEP};
pub use stats::{EngineStatus, InferenceStats};
pub use tree::Tree;

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Why a prediction or importance extraction could not be produced
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    #[error("pipeline has no steps")]
    EmptyPipeline,

    #[error("step '{step}' expects {expected} features, got {actual}")]
    WidthMismatch {
        step: String,
        expected: usize,
        actual: usize,
    },

    #[error("step '{step}' cannot be used here: {reason}")]
    MisplacedStep { step: String, reason: &'static str },

    #[error("malformed tree in step '{step}': {reason}")]
    MalformedTree { step: String, reason: String },

    #[error("pipeline has no step named '{0}'")]
    MissingStep(String),

    #[error("step '{0}' does not expose feature importances")]
    NoImportances(String),

    #[error("feature importances have length {actual}, schema has {expected} features")]
    ImportanceLength { expected: usize, actual: usize },
}

// ============================================================================
// ENGINE TRAITS
// ============================================================================

/// A fitted step that maps a row to another row
pub trait Transformer {
    fn transform(&self, step: &str, row: &[f64]) -> Result<Vec<f64>, PredictionError>;
}

/// A fitted estimator that maps a row to a scalar
pub trait Regressor {
    fn predict_row(&self, step: &str, row: &[f64]) -> Result<f64, PredictionError>;

    /// Per-input importance scores, when the estimator type has them
    fn feature_importances(&self) -> Option<&[f64]> {
        None
    }
}

pub(crate) fn check_width(step: &str, expected: usize, row: &[f64]) -> Result<(), PredictionError> {
    if expected != row.len() {
        return Err(PredictionError::WidthMismatch {
            step: step.to_string(),
            expected,
            actual: row.len(),
        });
    }
    Ok(())
}
