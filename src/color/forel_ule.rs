use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::color::constants::FOREL_ULE_CLASSES;
use crate::readers::ReadError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorClass {
    pub forel_ule: u8,
    /// Display color, e.g. "#7ba654"
    pub color: String,
}

#[derive(Debug, Deserialize)]
struct ColorClassRow {
    #[serde(rename = "dWL")]
    wavelength: u32,
    fui: u8,
    color: String,
}

/// Dominant wavelength (1 nm bins) to Forel-Ule class.
#[derive(Debug, Clone)]
pub struct ColorClassTable {
    classes: BTreeMap<u32, ColorClass>,
}

impl ColorClassTable {
    /// Built-in Forel-Ule scale, 471 to 583 nm.
    pub fn forel_ule() -> Self {
        let mut classes = BTreeMap::new();

        for (fui, first, last, color) in FOREL_ULE_CLASSES {
            for nm in first..=last {
                classes.insert(
                    nm,
                    ColorClass {
                        forel_ule: fui,
                        color: color.to_string(),
                    },
                );
            }
        }

        Self { classes }
    }

    /// Reads a CSV table with the columns `dWL`, `fui` and `color`, one row
    /// per wavelength bin.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ReadError::io(path, e))?;

        Self::from_reader(BufReader::new(file))
            .map_err(|e| e.in_file(&path.display().to_string()))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ReadError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut classes = BTreeMap::new();

        for row in csv_reader.deserialize::<ColorClassRow>() {
            let row = row.map_err(ReadError::from)?;

            let class = ColorClass {
                forel_ule: row.fui,
                color: row.color,
            };
            if classes.insert(row.wavelength, class).is_some() {
                return Err(ReadError::InvalidTable(format!(
                    "wavelength {} nm appears more than once",
                    row.wavelength
                )));
            }
        }

        if classes.is_empty() {
            return Err(ReadError::InvalidTable(
                "color class table has no rows".to_string(),
            ));
        }

        Ok(Self { classes })
    }

    pub fn get(&self, wavelength: u32) -> Option<&ColorClass> {
        self.classes.get(&wavelength)
    }

    /// Inclusive wavelength domain covered by the table.
    pub fn domain(&self) -> Option<(u32, u32)> {
        let first = self.classes.keys().next()?;
        let last = self.classes.keys().next_back()?;
        Some((*first, *last))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl Default for ColorClassTable {
    fn default() -> Self {
        Self::forel_ule()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_table_covers_scale() {
        let table = ColorClassTable::forel_ule();

        assert_eq!(table.domain(), Some((471, 583)));
        assert_eq!(table.len(), 113);
        assert_eq!(table.get(471).unwrap().forel_ule, 1);
        assert_eq!(table.get(583).unwrap().forel_ule, 21);
        assert_eq!(table.get(502).unwrap().forel_ule, 6);
        assert_eq!(table.get(502).unwrap().color, "#6d9298");
        assert!(table.get(470).is_none());
        assert!(table.get(610).is_none());
    }

    #[test]
    fn test_builtin_classes_are_monotonic() {
        let table = ColorClassTable::forel_ule();
        let classes: Vec<u8> = (471..=583)
            .map(|nm| table.get(nm).unwrap().forel_ule)
            .collect();

        assert!(classes.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("fui.csv");
        let mut file = File::create(&file_path).unwrap();

        file.write_all(b"dWL,fui,color\n500,5,#568f96\n501,6,#6d9298\n")
            .unwrap();

        let table = ColorClassTable::from_file(&file_path).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(501).unwrap().forel_ule, 6);
        assert_eq!(table.domain(), Some((500, 501)));
    }

    #[test]
    fn test_duplicate_wavelength_is_rejected() {
        let data = "dWL,fui,color\n500,5,#568f96\n500,6,#6d9298\n";
        assert!(matches!(
            ColorClassTable::from_reader(data.as_bytes()),
            Err(ReadError::InvalidTable(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(ColorClassTable::from_file("./does/not/exist.csv").is_err());
    }
}
