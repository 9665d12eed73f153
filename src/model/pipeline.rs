//! Pipeline of named steps
//!
//! Every step but the last transforms the row; the last step predicts.

use serde::{Deserialize, Serialize};

use super::estimators::{
    DecisionTreeRegressor, GradientBoostingRegressor, LinearRegressor, RandomForestRegressor,
    StandardScaler,
};
use super::{PredictionError, Regressor, Transformer};

/// Step the importance vector is read from
pub const IMPORTANCE_STEP: &str = "model";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepKind {
    StandardScaler(StandardScaler),
    DecisionTree(DecisionTreeRegressor),
    RandomForest(RandomForestRegressor),
    GradientBoosting(GradientBoostingRegressor),
    Linear(LinearRegressor),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub name: String,
    #[serde(flatten)]
    pub kind: StepKind,
}

impl Step {
    pub fn new(name: impl Into<String>, kind: StepKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    fn as_transformer(&self) -> Option<&dyn Transformer> {
        match &self.kind {
            StepKind::StandardScaler(s) => Some(s),
            _ => None,
        }
    }

    fn as_regressor(&self) -> Option<&dyn Regressor> {
        match &self.kind {
            StepKind::StandardScaler(_) => None,
            StepKind::DecisionTree(m) => Some(m),
            StepKind::RandomForest(m) => Some(m),
            StepKind::GradientBoosting(m) => Some(m),
            StepKind::Linear(m) => Some(m),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub steps: Vec<Step>,
}

impl Pipeline {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    pub fn named_step(&self, name: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.name == name)
    }

    /// Run the row through every transformer, then the final estimator
    pub fn predict(&self, row: &[f64]) -> Result<f64, PredictionError> {
        let (last, transforms) = self
            .steps
            .split_last()
            .ok_or(PredictionError::EmptyPipeline)?;

        let mut current = row.to_vec();
        for step in transforms {
            let transformer = step.as_transformer().ok_or_else(|| PredictionError::MisplacedStep {
                step: step.name.clone(),
                reason: "only the final step may be an estimator",
            })?;
            current = transformer.transform(&step.name, &current)?;
        }

        let estimator = last.as_regressor().ok_or_else(|| PredictionError::MisplacedStep {
            step: last.name.clone(),
            reason: "the final step must be an estimator",
        })?;
        estimator.predict_row(&last.name, &current)
    }

    /// Importance vector of the step named [`IMPORTANCE_STEP`]
    pub fn feature_importances(&self) -> Result<&[f64], PredictionError> {
        let step = self
            .named_step(IMPORTANCE_STEP)
            .ok_or_else(|| PredictionError::MissingStep(IMPORTANCE_STEP.to_string()))?;

        step.as_regressor()
            .and_then(|r| r.feature_importances())
            .ok_or_else(|| PredictionError::NoImportances(step.name.clone()))
    }
}
