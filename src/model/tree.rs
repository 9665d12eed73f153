//! Flat-array regression tree
//!
//! Node `i` is a leaf when `children_left[i] == -1`. Internal nodes send a
//! sample left when `row[feature[i]] <= threshold[i]`.

use serde::{Deserialize, Serialize};

use super::PredictionError;

/// Child index marking a leaf
pub const LEAF: i64 = -1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl Tree {
    /// Single-leaf tree, mostly useful in tests
    pub fn constant(value: f64) -> Self {
        Self {
            children_left: vec![LEAF],
            children_right: vec![LEAF],
            feature: vec![LEAF],
            threshold: vec![0.0],
            value: vec![value],
        }
    }

    pub fn node_count(&self) -> usize {
        self.value.len()
    }

    /// Walk from the root to a leaf and return its value
    pub fn evaluate(&self, step: &str, row: &[f64]) -> Result<f64, PredictionError> {
        let n = self.node_count();
        let malformed = |reason: String| PredictionError::MalformedTree {
            step: step.to_string(),
            reason,
        };

        if n == 0 {
            return Err(malformed("tree has no nodes".to_string()));
        }
        if self.children_left.len() != n
            || self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
        {
            return Err(malformed("node arrays differ in length".to_string()));
        }

        let mut node = 0usize;
        // A well-formed tree reaches a leaf in fewer than n hops
        for _ in 0..n {
            let left = self.children_left[node];
            if left == LEAF {
                return Ok(self.value[node]);
            }

            let feature = usize::try_from(self.feature[node])
                .ok()
                .filter(|&f| f < row.len())
                .ok_or_else(|| {
                    malformed(format!(
                        "node {} splits on feature {} of {}",
                        node,
                        self.feature[node],
                        row.len()
                    ))
                })?;

            let next = if row[feature] <= self.threshold[node] {
                left
            } else {
                self.children_right[node]
            };

            node = usize::try_from(next)
                .ok()
                .filter(|&c| c < n)
                .ok_or_else(|| malformed(format!("node {} points at child {}", node, next)))?;
        }

        Err(malformed("no leaf reached".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// x0 <= 2.5 ? (x1 <= 0.5 ? 10 : 20) : 30
    fn stump() -> Tree {
        Tree {
            children_left: vec![1, 3, LEAF, LEAF, LEAF],
            children_right: vec![2, 4, LEAF, LEAF, LEAF],
            feature: vec![0, 1, LEAF, LEAF, LEAF],
            threshold: vec![2.5, 0.5, 0.0, 0.0, 0.0],
            value: vec![0.0, 0.0, 30.0, 10.0, 20.0],
        }
    }

    #[test]
    fn test_traversal() {
        let tree = stump();
        assert_eq!(tree.evaluate("t", &[1.0, 0.0]).unwrap(), 10.0);
        assert_eq!(tree.evaluate("t", &[1.0, 1.0]).unwrap(), 20.0);
        assert_eq!(tree.evaluate("t", &[3.0, 0.0]).unwrap(), 30.0);
    }

    #[test]
    fn test_threshold_is_inclusive_on_left() {
        let tree = stump();
        assert_eq!(tree.evaluate("t", &[2.5, 0.5]).unwrap(), 10.0);
    }

    #[test]
    fn test_constant_tree() {
        assert_eq!(Tree::constant(7.5).evaluate("t", &[]).unwrap(), 7.5);
    }

    #[test]
    fn test_feature_out_of_range() {
        let err = stump().evaluate("t", &[1.0]).unwrap_err();
        assert!(matches!(err, PredictionError::MalformedTree { .. }));
    }

    #[test]
    fn test_cycle_is_rejected() {
        let tree = Tree {
            children_left: vec![0],
            children_right: vec![0],
            feature: vec![0],
            threshold: vec![1.0],
            value: vec![0.0],
        };
        let err = tree.evaluate("loop", &[0.0]).unwrap_err();
        assert_eq!(
            err,
            PredictionError::MalformedTree {
                step: "loop".to_string(),
                reason: "no leaf reached".to_string(),
            }
        );
    }

    #[test]
    fn test_mismatched_arrays() {
        let mut tree = stump();
        tree.threshold.pop();
        assert!(tree.evaluate("t", &[0.0, 0.0]).is_err());
    }
}
