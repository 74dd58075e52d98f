use thiserror::Error;

use crate::readers::ReadError;

/// Errors that abort a feature build.
///
/// Rows removed by quality control or by the color-class join are not errors;
/// they simply do not appear in the output.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("row {row}: {field} is missing or not a finite number")]
    MalformedInput { row: usize, field: &'static str },

    #[error(transparent)]
    Read(#[from] ReadError),

    #[error("failed to write feature table {path}: {message}")]
    Write { path: String, message: String },
}
