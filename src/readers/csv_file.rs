use super::{ReadError, RecordReader};
use crate::records::RawRecord;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub struct CsvReader {
    pub file_name: String,
}

impl RecordReader for CsvReader {
    fn read_records(&self) -> Result<Vec<RawRecord>, ReadError> {
        let path = Path::new(&self.file_name);
        let file = File::open(path).map_err(|e| ReadError::io(path, e))?;

        read_csv(BufReader::new(file)).map_err(|e| e.in_file(&self.file_name))
    }
}

/// Columns are matched by header name; extra columns are ignored and empty
/// cells read as missing values.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<RawRecord>, ReadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.deserialize::<RawRecord>() {
        records.push(row?);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const HEADER: &str =
        "blue,green,red,nir,swir1,swir2,type,date,pwater,pixelCount,clouds,secchi,lat,long,sat,SiteID";

    #[test]
    fn test_read_csv_maps_headers() {
        let data = format!(
            "{}\n0.05,0.06,0.07,0.2,0.03,0.02,Lake,2015-06-01,95,50,2,3.5,43.1,-89.4,LC08,WIDNR-1\n",
            HEADER
        );

        let records = read_csv(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.nir, Some(0.2));
        assert_eq!(r.water_type.as_deref(), Some("Lake"));
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2015, 6, 1));
        assert_eq!(r.pixel_count, Some(50));
        assert_eq!(r.long, Some(-89.4));
        assert_eq!(r.sat.as_deref(), Some("LC08"));
    }

    #[test]
    fn test_empty_cells_are_missing() {
        let data = format!(
            "{}\n0.05,0.06,0.07,0.2,0.03,0.02,Lake,2015-06-01,95,50,2,,43.1,-89.4,LC08,\n",
            HEADER
        );

        let records = read_csv(data.as_bytes()).unwrap();
        assert_eq!(records[0].secchi, None);
    }

    #[test]
    fn test_non_numeric_band_reports_line() {
        let data = format!(
            "{}\n0.05,0.06,0.07,0.2,0.03,0.02,Lake,2015-06-01,95,50,2,3.5,43.1,-89.4,LC08,a\n0.05,abc,0.07,0.2,0.03,0.02,Lake,2015-06-02,95,50,2,3.5,43.1,-89.4,LC08,b\n",
            HEADER
        );

        match read_csv(data.as_bytes()) {
            Err(ReadError::Csv { line, .. }) => assert_eq!(line, Some(3)),
            other => panic!("expected CSV error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_band_column_reads_as_none() {
        let data = "blue,green,red,nir,swir1,type,secchi\n0.05,0.06,0.07,0.2,0.03,Lake,3.5\n";

        let records = read_csv(data.as_bytes()).unwrap();
        assert_eq!(records[0].swir2, None);
    }
}
