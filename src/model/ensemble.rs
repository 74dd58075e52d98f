//! Inference over an externally trained regression-tree ensemble.
//!
//! Trees are boosted residual learners: the prediction is the base score
//! plus the scaled sum of every tree's leaf value. Only inference lives
//! here; the ensemble itself comes from an outside trainer, dumped as JSON:
//!
//! ```json
//! {
//!   "base_score": 2.1,
//!   "learning_rate": 1.0,
//!   "best_iteration": 41,
//!   "best_score": 0.93,
//!   "feature_names": ["blue", "red", "green", "nir", "..."],
//!   "trees": [{"nodes": [{"feature": 8, "threshold": 540.0, "left": 1, "right": 2, "value": 0.0}, ...]}]
//! }
//! ```
//!
//! A node with a negative `feature` is a leaf. Children must come after their
//! parent in the node list.

use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::matrix::{FEATURE_COLUMNS, FeatureMatrix, N_FEATURES};
use super::{ModelError, Predictor};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TreeNode {
    pub feature: i32,
    /// Samples with `value <= threshold` go left
    #[serde(default)]
    pub threshold: f64,
    #[serde(default)]
    pub left: i32,
    #[serde(default)]
    pub right: i32,
    #[serde(default)]
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// Fails when a split references a missing feature or a child that does
    /// not come after its parent.
    pub fn new(nodes: Vec<TreeNode>) -> Result<Self, ModelError> {
        let tree = Self { nodes };
        tree.validate(0)?;
        Ok(tree)
    }

    fn validate(&self, tree: usize) -> Result<(), ModelError> {
        let invalid = |message: String| ModelError::InvalidTree { tree, message };

        if self.nodes.is_empty() {
            return Err(invalid("tree has no nodes".to_string()));
        }

        for (i, node) in self.nodes.iter().enumerate() {
            if node.feature < 0 {
                continue;
            }
            if node.feature as usize >= N_FEATURES {
                return Err(invalid(format!(
                    "node {} splits on feature {} but there are {} features",
                    i, node.feature, N_FEATURES
                )));
            }
            for child in [node.left, node.right] {
                if child <= i as i32 || child as usize >= self.nodes.len() {
                    return Err(invalid(format!(
                        "node {} has child {} outside ({}, {})",
                        i,
                        child,
                        i,
                        self.nodes.len()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Only called on validated trees.
    pub(crate) fn predict_row(&self, row: &[f64; N_FEATURES]) -> f64 {
        let mut idx = 0usize;
        loop {
            let node = &self.nodes[idx];
            if node.feature < 0 {
                return node.value;
            }
            idx = if row[node.feature as usize] <= node.threshold {
                node.left as usize
            } else {
                node.right as usize
            };
        }
    }
}

fn one() -> f64 {
    1.0
}

#[derive(Deserialize)]
struct EnsembleDump {
    #[serde(default)]
    base_score: f64,
    #[serde(default = "one")]
    learning_rate: f64,
    #[serde(default)]
    best_iteration: Option<usize>,
    #[serde(default)]
    best_score: Option<f64>,
    feature_names: Vec<String>,
    trees: Vec<RegressionTree>,
}

/// Deserializing validates the trees, like [`TreeEnsemble::new`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "EnsembleDump")]
pub struct TreeEnsemble {
    base_score: f64,
    /// Leaf values are scaled by this factor
    learning_rate: f64,
    /// 0-based; trees after it are ignored
    best_iteration: Option<usize>,
    best_score: Option<f64>,
    feature_names: Vec<String>,
    trees: Vec<RegressionTree>,
}

impl TryFrom<EnsembleDump> for TreeEnsemble {
    type Error = ModelError;

    fn try_from(dump: EnsembleDump) -> Result<Self, Self::Error> {
        let ensemble = Self {
            base_score: dump.base_score,
            learning_rate: dump.learning_rate,
            best_iteration: dump.best_iteration,
            best_score: dump.best_score,
            feature_names: dump.feature_names,
            trees: dump.trees,
        };
        ensemble.validate()?;
        Ok(ensemble)
    }
}

impl TreeEnsemble {
    pub fn new(
        base_score: f64,
        learning_rate: f64,
        trees: Vec<RegressionTree>,
    ) -> Result<Self, ModelError> {
        let ensemble = Self {
            base_score,
            learning_rate,
            best_iteration: None,
            best_score: None,
            feature_names: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            trees,
        };
        ensemble.validate()?;
        Ok(ensemble)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ModelError> {
        let dump: EnsembleDump = serde_json::from_reader(reader)?;
        Self::try_from(dump)
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.feature_names.iter().map(String::as_str).ne(FEATURE_COLUMNS) {
            return Err(ModelError::FeatureNames {
                expected: FEATURE_COLUMNS.join(", "),
                found: self.feature_names.join(", "),
            });
        }
        if self.trees.is_empty() {
            return Err(ModelError::InvalidTree {
                tree: 0,
                message: "ensemble has no trees".to_string(),
            });
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(i)?;
        }
        Ok(())
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    fn active_trees(&self) -> &[RegressionTree] {
        let n = self
            .best_iteration
            .map_or(self.trees.len(), |best| (best + 1).min(self.trees.len()));
        &self.trees[..n]
    }

    pub fn predict_row(&self, row: &[f64; N_FEATURES]) -> f64 {
        let sum: f64 = self.active_trees().iter().map(|t| t.predict_row(row)).sum();
        self.base_score + self.learning_rate * sum
    }
}

impl Predictor for TreeEnsemble {
    fn predict(&self, features: &FeatureMatrix) -> Vec<f64> {
        features.rows().iter().map(|row| self.predict_row(row)).collect()
    }

    fn best_score(&self) -> Option<f64> {
        self.best_score
    }

    fn best_iteration(&self) -> Option<usize> {
        self.best_iteration
    }
}
