use super::{ReadError, RecordReader};
use crate::records::RawRecord;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// A JSON array of objects keyed like the CSV headers.
pub struct JsonReader {
    pub file_name: String,
}

impl RecordReader for JsonReader {
    fn read_records(&self) -> Result<Vec<RawRecord>, ReadError> {
        let path = Path::new(&self.file_name);
        let file = File::open(path).map_err(|e| ReadError::io(path, e))?;

        read_json(BufReader::new(file)).map_err(|e| e.in_file(&self.file_name))
    }
}

pub fn read_json<R: Read>(reader: R) -> Result<Vec<RawRecord>, ReadError> {
    Ok(serde_json::from_reader(reader)?)
}
