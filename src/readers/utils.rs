use super::types::{FileType, ReadError};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

pub fn reader_from_filetype(path: &Path) -> Result<FileType, ReadError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("csv") => Ok(FileType::Csv),
        Some("json") => Ok(FileType::Json),
        _ => Err(ReadError::UnknownFileType(path.display().to_string())),
    }
}

pub fn is_supported_file_type(path: &Path) -> bool {
    reader_from_filetype(path).is_ok()
}

/// Resolves `input` to a sorted list of record files.
///
/// `input` may name a single file, a directory searched recursively for
/// supported files, or a glob pattern.
pub fn discover_inputs(input: &str) -> Result<Vec<PathBuf>, ReadError> {
    let path = Path::new(input);

    let mut files: Vec<PathBuf> = if path.is_file() {
        vec![path.to_path_buf()]
    } else if path.is_dir() {
        WalkDir::new(path)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && is_supported_file_type(e.path()))
            .map(|e| e.into_path())
            .collect()
    } else {
        let entries = glob::glob(input).map_err(|e| ReadError::Pattern {
            pattern: input.to_string(),
            message: e.to_string(),
        })?;

        entries
            .filter_map(|e| e.ok())
            .filter(|p| p.is_file() && is_supported_file_type(p))
            .collect()
    };

    if files.is_empty() {
        return Err(ReadError::NoInput(input.to_string()));
    }

    files.sort();
    debug!("Found {} input file(s) for {}", files.len(), input);

    Ok(files)
}
