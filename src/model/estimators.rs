//! Fitted transformers and estimators a pipeline step can hold

use serde::{Deserialize, Serialize};

use super::tree::Tree;
use super::{check_width, PredictionError, Regressor, Transformer};

// ============================================================================
// TRANSFORMERS
// ============================================================================

/// Per-column standardization, `(x - mean) / scale`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl Transformer for StandardScaler {
    fn transform(&self, step: &str, row: &[f64]) -> Result<Vec<f64>, PredictionError> {
        check_width(step, self.mean.len(), row)?;
        check_width(step, self.scale.len(), row)?;

        Ok(row
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| {
                // Constant columns were fitted with scale 0
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (x - mean) / scale
            })
            .collect())
    }
}

// ============================================================================
// ESTIMATORS
// ============================================================================

/// Ordinary linear model. Has no importance scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub coef: Vec<f64>,
    pub intercept: f64,
}

impl Regressor for LinearRegressor {
    fn predict_row(&self, step: &str, row: &[f64]) -> Result<f64, PredictionError> {
        check_width(step, self.coef.len(), row)?;
        Ok(self.intercept + self.coef.iter().zip(row).map(|(c, x)| c * x).sum::<f64>())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTreeRegressor {
    pub tree: Tree,
    #[serde(default)]
    pub n_features_in: Option<usize>,
    #[serde(default)]
    pub feature_importances: Option<Vec<f64>>,
}

impl Regressor for DecisionTreeRegressor {
    fn predict_row(&self, step: &str, row: &[f64]) -> Result<f64, PredictionError> {
        if let Some(expected) = self.n_features_in {
            check_width(step, expected, row)?;
        }
        self.tree.evaluate(step, row)
    }

    fn feature_importances(&self) -> Option<&[f64]> {
        self.feature_importances.as_deref()
    }
}

/// Bagged trees, prediction is the mean of all tree outputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    pub trees: Vec<Tree>,
    #[serde(default)]
    pub n_features_in: Option<usize>,
    #[serde(default)]
    pub feature_importances: Option<Vec<f64>>,
}

impl Regressor for RandomForestRegressor {
    fn predict_row(&self, step: &str, row: &[f64]) -> Result<f64, PredictionError> {
        if let Some(expected) = self.n_features_in {
            check_width(step, expected, row)?;
        }
        if self.trees.is_empty() {
            return Err(PredictionError::MalformedTree {
                step: step.to_string(),
                reason: "forest has no trees".to_string(),
            });
        }

        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.evaluate(step, row)?;
        }
        Ok(sum / self.trees.len() as f64)
    }

    fn feature_importances(&self) -> Option<&[f64]> {
        self.feature_importances.as_deref()
    }
}

/// Boosted trees, `init + learning_rate * sum(tree outputs)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoostingRegressor {
    pub init: f64,
    pub learning_rate: f64,
    pub trees: Vec<Tree>,
    #[serde(default)]
    pub n_features_in: Option<usize>,
    #[serde(default)]
    pub feature_importances: Option<Vec<f64>>,
}

impl Regressor for GradientBoostingRegressor {
    fn predict_row(&self, step: &str, row: &[f64]) -> Result<f64, PredictionError> {
        if let Some(expected) = self.n_features_in {
            check_width(step, expected, row)?;
        }

        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.evaluate(step, row)?;
        }
        Ok(self.init + self.learning_rate * sum)
    }

    fn feature_importances(&self) -> Option<&[f64]> {
        self.feature_importances.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaler() {
        let scaler = StandardScaler {
            mean: vec![10.0, 0.0],
            scale: vec![2.0, 0.0],
        };
        let out = scaler.transform("scaler", &[14.0, 3.0]).unwrap();
        assert_eq!(out, vec![2.0, 3.0]);
    }

    #[test]
    fn test_scaler_width_mismatch() {
        let scaler = StandardScaler {
            mean: vec![0.0; 3],
            scale: vec![1.0; 3],
        };
        let err = scaler.transform("scaler", &[1.0]).unwrap_err();
        assert_eq!(
            err,
            PredictionError::WidthMismatch {
                step: "scaler".to_string(),
                expected: 3,
                actual: 1,
            }
        );
    }

    #[test]
    fn test_linear() {
        let model = LinearRegressor {
            coef: vec![2.0, -1.0],
            intercept: 5.0,
        };
        assert_eq!(model.predict_row("model", &[3.0, 4.0]).unwrap(), 7.0);
        assert!(model.feature_importances().is_none());
    }

    #[test]
    fn test_forest_averages_trees() {
        let forest = RandomForestRegressor {
            trees: vec![Tree::constant(100.0), Tree::constant(200.0)],
            n_features_in: Some(1),
            feature_importances: Some(vec![1.0]),
        };
        assert_eq!(forest.predict_row("model", &[0.0]).unwrap(), 150.0);
        assert_eq!(forest.feature_importances(), Some(&[1.0][..]));
    }

    #[test]
    fn test_forest_checks_width() {
        let forest = RandomForestRegressor {
            trees: vec![Tree::constant(1.0)],
            n_features_in: Some(13),
            feature_importances: None,
        };
        assert!(matches!(
            forest.predict_row("model", &[0.0; 12]),
            Err(PredictionError::WidthMismatch { expected: 13, actual: 12, .. })
        ));
    }

    #[test]
    fn test_empty_forest() {
        let forest = RandomForestRegressor {
            trees: vec![],
            n_features_in: None,
            feature_importances: None,
        };
        assert!(forest.predict_row("model", &[]).is_err());
    }

    #[test]
    fn test_gradient_boosting() {
        let gbm = GradientBoostingRegressor {
            init: 1000.0,
            learning_rate: 0.1,
            trees: vec![Tree::constant(50.0), Tree::constant(-20.0)],
            n_features_in: None,
            feature_importances: None,
        };
        let value = gbm.predict_row("model", &[]).unwrap();
        assert!((value - 1003.0).abs() < 1e-9);
    }

    #[test]
    fn test_decision_tree() {
        let tree = DecisionTreeRegressor {
            tree: Tree::constant(42.0),
            n_features_in: None,
            feature_importances: Some(vec![]),
        };
        assert_eq!(tree.predict_row("model", &[1.0, 2.0]).unwrap(), 42.0);
    }
}
