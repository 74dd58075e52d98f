//! Model collaborator seam
//!
//! Gradient boosting itself is delegated to an outside library. This module
//! fixes what is handed over (the feature matrix, the target and a
//! [`BoostingConfig`]) and what comes back (a [`Predictor`]), and provides the
//! evaluation around it.

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::records::FeatureRecord;

pub mod ensemble;
pub mod matrix;
pub mod metrics;
pub mod split;

pub use ensemble::{RegressionTree, TreeEnsemble, TreeNode};
pub use matrix::{FEATURE_COLUMNS, FeatureMatrix, target};
pub use metrics::Metrics;
pub use split::split_train_validation;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("expected {expected} values, found {found}")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("no rows to train or evaluate on")]
    EmptyData,

    #[error("model features do not match: expected [{expected}], found [{found}]")]
    FeatureNames { expected: String, found: String },

    #[error("tree {tree} is invalid: {message}")]
    InvalidTree { tree: usize, message: String },

    #[error("trainer failed: {0}")]
    Trainer(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fixed training configuration handed to the trainer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoostingConfig {
    /// Upper bound on boosting rounds
    pub max_rounds: usize,
    pub learning_rate: f64,
    pub max_depth: u32,
    /// Row subsample ratio per tree
    pub subsample: f64,
    /// Column subsample ratio per tree
    pub colsample_bytree: f64,
    /// Rounds without validation improvement before stopping
    pub early_stopping_rounds: usize,
    pub seed: u64,
}

impl Default for BoostingConfig {
    fn default() -> Self {
        Self {
            max_rounds: 1000,
            learning_rate: 0.1,
            max_depth: 6,
            subsample: 0.8,
            colsample_bytree: 0.8,
            early_stopping_rounds: 20,
            seed: 42,
        }
    }
}

impl BoostingConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_rounds == 0 {
            return Err("max_rounds must be at least 1".to_string());
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err("learning_rate must be in (0, 1]".to_string());
        }
        for (name, ratio) in [
            ("subsample", self.subsample),
            ("colsample_bytree", self.colsample_bytree),
        ] {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(format!("{} must be in (0, 1]", name));
            }
        }
        Ok(())
    }
}

pub trait Predictor {
    fn predict(&self, features: &FeatureMatrix) -> Vec<f64>;

    /// Validation score at the best iteration, when the trainer reports one.
    fn best_score(&self) -> Option<f64>;

    fn best_iteration(&self) -> Option<usize>;
}

/// An external boosted-tree trainer with early stopping on the validation set.
pub trait Trainer {
    fn train(
        &self,
        features: &FeatureMatrix,
        target: &[f64],
        valid_features: &FeatureMatrix,
        valid_target: &[f64],
        config: &BoostingConfig,
    ) -> Result<Box<dyn Predictor>, ModelError>;
}

/// Assembles matrices from feature records and hands them to `trainer`.
pub fn fit(
    trainer: &dyn Trainer,
    train: &[FeatureRecord],
    valid: &[FeatureRecord],
    config: &BoostingConfig,
) -> Result<Box<dyn Predictor>, ModelError> {
    if train.is_empty() || valid.is_empty() {
        return Err(ModelError::EmptyData);
    }
    config.validate().map_err(ModelError::Trainer)?;

    info!(
        "Training on {} record(s), validating on {}",
        train.len(),
        valid.len()
    );

    trainer.train(
        &FeatureMatrix::from_records(train),
        &target(train),
        &FeatureMatrix::from_records(valid),
        &target(valid),
        config,
    )
}

/// Predicts `records` and scores the predictions against their Secchi depth.
pub fn evaluate(
    predictor: &dyn Predictor,
    records: &[FeatureRecord],
) -> Result<Metrics, ModelError> {
    let predicted = predictor.predict(&FeatureMatrix::from_records(records));
    Metrics::evaluate(&target(records), &predicted)
}
