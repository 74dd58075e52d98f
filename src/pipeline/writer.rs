use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::PipelineError;
use crate::records::FeatureRecord;

/// Writes the feature table as CSV with a header row.
pub fn write_features<P: AsRef<Path>>(
    path: P,
    features: &[FeatureRecord],
) -> Result<(), PipelineError> {
    let path = path.as_ref();
    let write_error = |message: String| PipelineError::Write {
        path: path.display().to_string(),
        message,
    };

    let file = File::create(path).map_err(|e| write_error(e.to_string()))?;
    write_features_to(file, features).map_err(|e| write_error(e.to_string()))
}

pub fn write_features_to<W: Write>(writer: W, features: &[FeatureRecord]) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for feature in features {
        csv_writer.serialize(feature)?;
    }

    csv_writer.flush()?;
    Ok(())
}
