use std::path::PathBuf;
use tracing::info;

use crate::records::RawRecord;

pub mod csv_file;
pub mod json_file;
pub mod types;
pub mod utils;

pub use csv_file::CsvReader;
pub use json_file::JsonReader;
pub use types::{FileType, ReadError, RecordReader};
pub use utils::{discover_inputs, reader_from_filetype};

pub fn create_reader(file_name: String) -> Result<Box<dyn RecordReader>, ReadError> {
    match reader_from_filetype(file_name.as_ref())? {
        FileType::Csv => Ok(Box::new(CsvReader { file_name })),
        FileType::Json => Ok(Box::new(JsonReader { file_name })),
    }
}

/// Reads and concatenates every file, in order.
pub fn read_all(files: &[PathBuf]) -> Result<Vec<RawRecord>, ReadError> {
    let mut records = Vec::new();

    for file in files {
        let reader = create_reader(file.display().to_string())?;
        let mut batch = reader.read_records()?;
        info!("Read {} record(s) from {}", batch.len(), file.display());
        records.append(&mut batch);
    }

    Ok(records)
}
