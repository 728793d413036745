//! Random Forest Classifier
//!
//! Evaluates a forest exported as the fitted tree arrays (`children_left`,
//! `children_right`, `feature`, `threshold`, `value`). Probabilities are the
//! mean of the per-tree leaf class distributions and the predicted label is
//! the class with the highest mean probability, first class winning ties.

use crate::classifier::{check_input, Classifier};
use crate::{ConfigurationError, InferenceError};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

const LEAF: i64 = -1;

/// Tree arrays as exported from the fitted model
#[derive(Debug, Clone, Deserialize)]
struct TreeArrays {
    children_left: Vec<i64>,
    children_right: Vec<i64>,
    feature: Vec<i64>,
    threshold: Vec<f64>,
    value: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Deserialize)]
struct ForestFile {
    classes: Vec<i64>,
    n_features: usize,
    trees: Vec<TreeArrays>,
}

#[derive(Debug, Clone)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        distribution: Vec<f64>,
    },
}

#[derive(Debug, Clone)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn from_arrays(arrays: TreeArrays, n_features: usize, n_classes: usize) -> Result<Self, String> {
        let n = arrays.children_left.len();
        if n == 0 {
            return Err("tree has no nodes".to_string());
        }
        if [
            arrays.children_right.len(),
            arrays.feature.len(),
            arrays.threshold.len(),
            arrays.value.len(),
        ]
        .iter()
        .any(|len| *len != n)
        {
            return Err("tree arrays differ in length".to_string());
        }

        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            let (left, right) = (arrays.children_left[i], arrays.children_right[i]);

            if left == LEAF && right == LEAF {
                let value = &arrays.value[i];
                if value.len() != n_classes {
                    return Err(format!("node {i} has {} class values, expected {n_classes}", value.len()));
                }
                let total: f64 = value.iter().sum();
                if !total.is_finite() || total <= 0.0 || value.iter().any(|v| *v < 0.0) {
                    return Err(format!("node {i} has an invalid class distribution"));
                }
                nodes.push(Node::Leaf {
                    distribution: value.iter().map(|v| v / total).collect(),
                });
                continue;
            }

            // Children always come after their parent, so traversal terminates
            let child = |c: i64| -> Result<usize, String> {
                if c <= i as i64 || c >= n as i64 {
                    Err(format!("node {i} has invalid child {c}"))
                } else {
                    Ok(c as usize)
                }
            };
            let feature = arrays.feature[i];
            if feature < 0 || feature as usize >= n_features {
                return Err(format!("node {i} splits on invalid feature {feature}"));
            }
            if !arrays.threshold[i].is_finite() {
                return Err(format!("node {i} has a non-finite threshold"));
            }
            nodes.push(Node::Split {
                feature: feature as usize,
                threshold: arrays.threshold[i],
                left: child(left)?,
                right: child(right)?,
            });
        }

        Ok(Self { nodes })
    }

    fn leaf_distribution(&self, x: &[f64]) -> &[f64] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    // Trees were fitted on single precision inputs
                    let value = x[*feature] as f32 as f64;
                    index = if value <= *threshold { *left } else { *right };
                }
                Node::Leaf { distribution } => return distribution,
            }
        }
    }
}

/// Random forest classifier
#[derive(Debug, Clone)]
pub struct RandomForest {
    classes: Vec<i64>,
    n_features: usize,
    trees: Vec<Tree>,
}

impl RandomForest {
    /// Load a forest from its JSON export
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigurationError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let forest = Self::from_json_str(&json).map_err(|reason| ConfigurationError::Malformed {
            path: path.to_path_buf(),
            reason,
        })?;

        info!(
            "Loaded random forest: {} trees, {} features, classes {:?}",
            forest.trees.len(),
            forest.n_features,
            forest.classes
        );
        Ok(forest)
    }

    /// Parse a forest from its JSON export
    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let file: ForestFile = serde_json::from_str(json).map_err(|e| e.to_string())?;

        if file.classes.len() < 2 {
            return Err(format!("expected at least 2 classes, got {}", file.classes.len()));
        }
        let mut sorted = file.classes.clone();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.len() != file.classes.len() {
            return Err("duplicate class labels".to_string());
        }
        if file.n_features == 0 {
            return Err("forest has no input features".to_string());
        }
        if file.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }

        let n_classes = file.classes.len();
        let trees = file
            .trees
            .into_iter()
            .enumerate()
            .map(|(i, arrays)| {
                Tree::from_arrays(arrays, file.n_features, n_classes).map_err(|e| format!("tree {i}: {e}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            classes: file.classes,
            n_features: file.n_features,
            trees,
        })
    }

    /// Number of trees
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    fn mean_distribution(&self, x: &[f64]) -> Vec<f64> {
        let mut sum = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            for (acc, p) in sum.iter_mut().zip(tree.leaf_distribution(x)) {
                *acc += p;
            }
        }
        let n = self.trees.len() as f64;
        sum.iter().map(|s| s / n).collect()
    }
}

impl Classifier for RandomForest {
    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, x: &[f64]) -> Result<i64, InferenceError> {
        let proba = self.predict_proba(x)?;
        let mut best = 0;
        for (i, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = i;
            }
        }
        debug!("Forest decision: class {} (p={:.4})", self.classes[best], proba[best]);
        Ok(self.classes[best])
    }

    fn predict_proba(&self, x: &[f64]) -> Result<Vec<f64>, InferenceError> {
        check_input(self.n_features, x)?;
        if x.iter().any(|v| !v.is_finite()) {
            return Err(InferenceError::InferenceFailed("input contains non-finite values".to_string()));
        }
        Ok(self.mean_distribution(x))
    }

    fn name(&self) -> &str {
        "random_forest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One stump on feature 0 and one constant tree
    const FOREST: &str = r#"{
        "classes": [0, 1],
        "n_features": 2,
        "trees": [
            {
                "children_left": [1, -1, -1],
                "children_right": [2, -1, -1],
                "feature": [0, -2, -2],
                "threshold": [0.5, -2.0, -2.0],
                "value": [[50, 50], [40, 10], [10, 40]]
            },
            {
                "children_left": [-1],
                "children_right": [-1],
                "feature": [-2],
                "threshold": [-2.0],
                "value": [[0.5, 0.5]]
            }
        ]
    }"#;

    #[test]
    fn test_predict_proba_averages_trees() {
        let forest = RandomForest::from_json_str(FOREST).unwrap();
        assert_eq!(forest.n_trees(), 2);

        let low = forest.predict_proba(&[0.0, 0.0]).unwrap();
        assert!((low[0] - 0.65).abs() < 1e-12);
        assert!((low[1] - 0.35).abs() < 1e-12);

        let high = forest.predict_proba(&[1.0, 0.0]).unwrap();
        assert!((high[1] - 0.65).abs() < 1e-12);
    }

    #[test]
    fn test_predict_uses_highest_probability() {
        let forest = RandomForest::from_json_str(FOREST).unwrap();
        assert_eq!(forest.predict(&[0.0, 0.0]).unwrap(), 0);
        assert_eq!(forest.predict(&[1.0, 0.0]).unwrap(), 1);
    }

    #[test]
    fn test_threshold_is_inclusive_on_the_left() {
        let forest = RandomForest::from_json_str(FOREST).unwrap();
        assert_eq!(forest.predict(&[0.5, 0.0]).unwrap(), 0);
    }

    #[test]
    fn test_tie_goes_to_first_class() {
        let json = r#"{
            "classes": [0, 1], "n_features": 1,
            "trees": [{"children_left": [-1], "children_right": [-1], "feature": [-2],
                       "threshold": [-2.0], "value": [[1, 1]]}]
        }"#;
        let forest = RandomForest::from_json_str(json).unwrap();
        assert_eq!(forest.predict(&[0.0]).unwrap(), 0);
    }

    #[test]
    fn test_wrong_input_length() {
        let forest = RandomForest::from_json_str(FOREST).unwrap();
        assert_eq!(
            forest.predict(&[0.0]),
            Err(InferenceError::InvalidInputShape { expected: 2, actual: 1 })
        );
    }

    #[test]
    fn test_rejects_cyclic_tree() {
        let json = r#"{
            "classes": [0, 1], "n_features": 1,
            "trees": [{"children_left": [0, -1], "children_right": [1, -1], "feature": [0, -2],
                       "threshold": [0.0, -2.0], "value": [[1, 1], [1, 0]]}]
        }"#;
        assert!(RandomForest::from_json_str(json).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_feature() {
        let json = r#"{
            "classes": [0, 1], "n_features": 1,
            "trees": [{"children_left": [1, -1, -1], "children_right": [2, -1, -1], "feature": [3, -2, -2],
                       "threshold": [0.0, -2.0, -2.0], "value": [[1, 1], [1, 0], [0, 1]]}]
        }"#;
        let err = RandomForest::from_json_str(json).unwrap_err();
        assert!(err.contains("invalid feature"));
    }

    #[test]
    fn test_rejects_duplicate_classes() {
        let json = r#"{"classes": [1, 1], "n_features": 1, "trees": []}"#;
        assert!(RandomForest::from_json_str(json).is_err());
    }
}
