use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("end_date cannot be earlier than start_date")]
    DateOrder,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("validation_fraction should be strictly between 0 and 1, got {0}")]
    ValidationFraction(f64),

    #[error("Invalid bbox: {0}")]
    Bbox(String),

    #[error("Invalid boosting configuration: {0}")]
    Boosting(String),

    #[error("input must not be empty")]
    EmptyInput,
}
