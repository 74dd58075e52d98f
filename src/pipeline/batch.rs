use std::path::PathBuf;
use tracing::{info, warn};

use crate::color::ColorClassTable;
use crate::config::Config;
use crate::error::PipelineError;
use crate::qc::QualityFilter;
use crate::readers;
use crate::records::FeatureRecord;

use super::builder::{FeatureBuilder, StageReport};
use super::writer::write_features;

#[derive(Debug)]
pub struct BatchOutput {
    pub features: Vec<FeatureRecord>,
    pub report: StageReport,
    pub written_to: Option<String>,
}

/// Runs the feature build over every input file named by a [`Config`].
#[derive(Debug)]
pub struct BatchRunner {
    files: Vec<PathBuf>,
    classes: ColorClassTable,
    config: Config,
}

impl BatchRunner {
    /// Resolves the input files and loads the color-class table once.
    pub fn new(config: Config) -> Result<Self, PipelineError> {
        let files = readers::discover_inputs(config.input())?;
        info!("Found {} input file(s) for {}", files.len(), config.input());

        let classes = match config.color_table() {
            Some(path) => ColorClassTable::from_file(path)?,
            None => ColorClassTable::forel_ule(),
        };

        Ok(BatchRunner {
            files,
            classes,
            config,
        })
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn classes(&self) -> &ColorClassTable {
        &self.classes
    }

    pub fn builder(&self) -> FeatureBuilder<'_> {
        FeatureBuilder::new(&self.classes)
            .with_quality_filter(QualityFilter::new(self.config.qc().clone()))
            .with_chromaticity(self.config.chromaticity())
            .parallel(self.config.parallel())
    }

    pub fn run(&self) -> Result<BatchOutput, PipelineError> {
        let raw = readers::read_all(&self.files)?;
        let (features, report) = self.builder().build_with_report(&raw)?;

        if features.is_empty() {
            warn!("No record survived the feature build");
        }

        let written_to = match self.config.output() {
            Some(path) => {
                write_features(path, &features)?;
                info!("✓ Saved {} feature record(s) to: {}", features.len(), path);
                Some(path.to_string())
            }
            None => None,
        };

        Ok(BatchOutput {
            features,
            report,
            written_to,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::tempdir;

    const HEADER: &str =
        "blue,green,red,nir,swir1,swir2,type,date,pwater,pixelCount,clouds,secchi,lat,long,sat";

    fn write_csv(path: &std::path::Path, rows: &[&str]) {
        let mut file = File::create(path).unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
    }

    #[test]
    fn test_run_over_directory_writes_features() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input");
        fs::create_dir(&input).unwrap();

        write_csv(
            &input.join("2015.csv"),
            &[
                "0.04,0.05,0.02,0.02,0.01,0.01,Lake,2015-06-01,95,50,2,2.1,43.1,-89.4,LC08",
                "0.04,0.05,0.02,0.02,0.01,0.01,Reservoir,2015-06-02,95,50,2,2.1,43.1,-89.4,LC08",
            ],
        );
        write_csv(
            &input.join("2016.csv"),
            &["0.05,0.06,0.07,0.2,0.03,0.02,Lake,2016-06-01,95,50,2,3.5,43.1,-89.4,LE07"],
        );

        let output = dir.path().join("features.csv");
        let config = Config::new(input.to_str().unwrap()).with_output(output.to_str().unwrap());

        let runner = BatchRunner::new(config).unwrap();
        assert_eq!(runner.files().len(), 2);

        let result = runner.run().unwrap();

        assert_eq!(
            result.report,
            StageReport {
                input: 3,
                after_qc: 2,
                derived: 2,
                joined: 1
            }
        );
        assert_eq!(result.features[0].id, 1);
        assert_eq!(result.written_to.as_deref(), output.to_str());

        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(written.lines().count(), 2);
    }

    fn write_color_table(path: &std::path::Path) {
        let mut file = File::create(path).unwrap();
        writeln!(file, "dWL,fui,color").unwrap();
        for nm in 500..=510 {
            writeln!(file, "{},5,#102030", nm).unwrap();
        }
        for nm in 575..=590 {
            writeln!(file, "{},18,#a0b0c0", nm).unwrap();
        }
    }

    #[test]
    fn test_color_table_and_chromaticity_from_config() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("matchups.csv");
        write_csv(
            &input,
            &[
                "0.04,0.05,0.02,0.02,0.01,0.01,Lake,2015-06-01,95,50,2,2.1,43.1,-89.4,LC08",
                "0.05,0.06,0.07,0.2,0.03,0.02,Lake,2016-06-01,95,50,2,3.5,43.1,-89.4,LE07",
            ],
        );
        let table = dir.path().join("fui.csv");
        write_color_table(&table);

        let config_for = |chromaticity: &str| -> Config {
            serde_json::from_value(json!({
                "input": input.to_str().unwrap(),
                "color_table": table.to_str().unwrap(),
                "chromaticity": chromaticity,
            }))
            .unwrap()
        };

        // The reddish row sits near 610 nm, outside the table
        let runner = BatchRunner::new(config_for("band_fraction")).unwrap();
        assert_eq!(runner.classes().len(), 27);

        let result = runner.run().unwrap();
        assert_eq!(result.report.derived, 2);
        assert_eq!(result.features.len(), 1);
        assert_eq!(result.features[0].dominant_wavelength, 502);
        assert_eq!(result.features[0].forel_ule, 5);
        assert_eq!(result.features[0].color, "#102030");

        // Tristimulus weighting moves it near 580 nm, where the table has it
        let result = BatchRunner::new(config_for("cie_tristimulus"))
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(result.features.len(), 2);

        let reddish = &result.features[1];
        assert_eq!(reddish.id, 2);
        assert_eq!(reddish.secchi, 3.5);
        assert!((575..=590).contains(&reddish.dominant_wavelength));
        assert_eq!(reddish.forel_ule, 18);
        assert_eq!(reddish.color, "#a0b0c0");
    }

    #[test]
    fn test_malformed_file_aborts_run() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("matchups.csv");
        write_csv(
            &input,
            &["0.04,,0.02,0.02,0.01,0.01,Lake,2015-06-01,95,50,2,2.1,43.1,-89.4,LC08"],
        );

        let runner = BatchRunner::new(Config::new(input.to_str().unwrap())).unwrap();

        assert!(matches!(
            runner.run(),
            Err(PipelineError::MalformedInput {
                row: 1,
                field: "green"
            })
        ));
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let dir = tempdir().unwrap();
        let pattern = format!("{}/*.csv", dir.path().display());

        assert!(BatchRunner::new(Config::new(pattern)).is_err());
    }
}
