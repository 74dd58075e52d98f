use chrono::NaiveDate;

use serde::Deserialize;
use serde::Deserializer;
use serde::de::Error;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::bbox::Bbox;
use crate::color::ChromaticityModel;
use crate::lake::LakeSelection;
use crate::model::BoostingConfig;
use crate::qc::QcThresholds;

pub mod error;
pub use error::ConfigError;

const DEFAULT_VALIDATION_FRACTION: f64 = 0.3;

#[derive(Debug, Clone)]
pub struct Config {
    input: String,
    output: Option<String>,
    color_table: Option<String>,
    chromaticity: ChromaticityModel,
    qc: QcThresholds,
    parallel: bool,
    lake: Option<LakeSelection>,
    boosting: BoostingConfig,
    validation_fraction: f64,
}

// Deserializes through a helper so that dates are parsed and ordered, the
// bounding box is range checked and the numeric settings are in range.
impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ConfigHelper {
            input: String,
            output: Option<String>,
            color_table: Option<String>,
            #[serde(default)]
            chromaticity: ChromaticityModel,
            #[serde(default)]
            qc: QcThresholds,
            #[serde(default)]
            parallel: bool,
            lake: Option<LakeHelper>,
            #[serde(default)]
            boosting: BoostingConfig,
            validation_fraction: Option<f64>,
        }

        #[derive(Deserialize)]
        struct LakeHelper {
            name: Option<String>,
            bbox: BboxHelper,
            start_date: Option<String>,
            end_date: Option<String>,
        }

        #[derive(Deserialize)]
        struct BboxHelper {
            xmin: f64,
            xmax: f64,
            ymin: f64,
            ymax: f64,
        }

        let parse_date =
            |field: &str, value: Option<String>| -> Result<Option<NaiveDate>, D::Error> {
                value
                    .map(|v| {
                        NaiveDate::parse_from_str(&v, "%Y-%m-%d").map_err(|e| {
                            D::Error::custom(format!("Invalid {} format: {}", field, e))
                        })
                    })
                    .transpose()
            };

        let helper = ConfigHelper::deserialize(deserializer)?;

        if helper.input.trim().is_empty() {
            return Err(D::Error::custom(ConfigError::EmptyInput));
        }

        let lake = match helper.lake {
            Some(lake) => {
                let start_date = parse_date("start_date", lake.start_date)?;
                let end_date = parse_date("end_date", lake.end_date)?;

                if let (Some(start), Some(end)) = (start_date, end_date)
                    && start > end
                {
                    return Err(D::Error::custom(ConfigError::DateOrder));
                }

                let bbox = Bbox::new(
                    lake.bbox.xmin,
                    lake.bbox.xmax,
                    lake.bbox.ymin,
                    lake.bbox.ymax,
                )
                .map_err(|e| D::Error::custom(ConfigError::Bbox(e)))?;

                Some(LakeSelection {
                    name: lake.name,
                    bbox,
                    start_date,
                    end_date,
                })
            }
            None => None,
        };

        let validation_fraction = helper
            .validation_fraction
            .unwrap_or(DEFAULT_VALIDATION_FRACTION);
        if !(validation_fraction > 0.0 && validation_fraction < 1.0) {
            return Err(D::Error::custom(ConfigError::ValidationFraction(
                validation_fraction,
            )));
        }

        helper
            .boosting
            .validate()
            .map_err(|e| D::Error::custom(ConfigError::Boosting(e)))?;

        Ok(Config {
            input: helper.input,
            output: helper.output,
            color_table: helper.color_table,
            chromaticity: helper.chromaticity,
            qc: helper.qc,
            parallel: helper.parallel,
            lake,
            boosting: helper.boosting,
            validation_fraction,
        })
    }
}

impl Config {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: None,
            color_table: None,
            chromaticity: ChromaticityModel::default(),
            qc: QcThresholds::default(),
            parallel: false,
            lake: None,
            boosting: BoostingConfig::default(),
            validation_fraction: DEFAULT_VALIDATION_FRACTION,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let config: Config = serde_json::from_reader(reader).map_err(ConfigError::from)?;

        Ok(config)
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn color_table(&self) -> Option<&str> {
        self.color_table.as_deref()
    }

    pub fn chromaticity(&self) -> ChromaticityModel {
        self.chromaticity
    }

    pub fn qc(&self) -> &QcThresholds {
        &self.qc
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    pub fn lake(&self) -> Option<&LakeSelection> {
        self.lake.as_ref()
    }

    pub fn boosting(&self) -> &BoostingConfig {
        &self.boosting
    }

    pub fn validation_fraction(&self) -> f64 {
        self.validation_fraction
    }
}
