use std::path::Path;
use thiserror::Error;

use crate::records::RawRecord;

pub trait RecordReader {
    fn read_records(&self) -> Result<Vec<RawRecord>, ReadError>;
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{}CSV error{}: {message}", file_prefix(.file), line_suffix(.line))]
    Csv {
        file: Option<String>,
        line: Option<u64>,
        message: String,
    },

    #[error("{}JSON error: {message}", file_prefix(.file))]
    Json {
        file: Option<String>,
        message: String,
    },

    #[error("unsupported file type: {0}")]
    UnknownFileType(String),

    #[error("invalid color class table: {0}")]
    InvalidTable(String),

    #[error("invalid input pattern {pattern}: {message}")]
    Pattern { pattern: String, message: String },

    #[error("no input files found for {0}")]
    NoInput(String),
}

fn file_prefix(file: &Option<String>) -> String {
    file.as_ref().map(|f| format!("{}: ", f)).unwrap_or_default()
}

fn line_suffix(line: &Option<u64>) -> String {
    line.map(|l| format!(" at line {}", l)).unwrap_or_default()
}

impl ReadError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        ReadError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    /// Attaches the source file name to parse errors.
    pub fn in_file(self, name: &str) -> Self {
        match self {
            ReadError::Csv { line, message, .. } => ReadError::Csv {
                file: Some(name.to_string()),
                line,
                message,
            },
            ReadError::Json { message, .. } => ReadError::Json {
                file: Some(name.to_string()),
                message,
            },
            other => other,
        }
    }
}

impl From<csv::Error> for ReadError {
    fn from(err: csv::Error) -> ReadError {
        ReadError::Csv {
            file: None,
            line: err.position().map(|p| p.line()),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ReadError {
    fn from(err: serde_json::Error) -> ReadError {
        ReadError::Json {
            file: None,
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Csv,
    Json,
}
