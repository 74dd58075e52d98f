//! Row types flowing through the feature pipeline.
//!
//! A [`RawRecord`] is one matched satellite overpass / in-situ Secchi
//! measurement exactly as it appears in the source table. It becomes a
//! [`ReflectanceRecord`] once the six reflectance bands are known to be
//! present and numeric, and a [`FeatureRecord`] once it has survived
//! quality control, received its derived features and joined a Forel-Ule
//! color class.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    pub blue: Option<f64>,
    pub green: Option<f64>,
    pub red: Option<f64>,
    pub nir: Option<f64>,
    pub swir1: Option<f64>,
    pub swir2: Option<f64>,
    #[serde(rename = "type")]
    pub water_type: Option<String>,
    pub date: Option<NaiveDate>,
    pub pwater: Option<f64>,
    #[serde(rename = "pixelCount")]
    pub pixel_count: Option<i64>,
    pub clouds: Option<f64>,
    pub secchi: Option<f64>,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    pub sat: Option<String>,
}

/// Surface reflectance of the six Landsat-style bands (dimensionless).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bands {
    pub blue: f64,
    pub green: f64,
    pub red: f64,
    pub nir: f64,
    pub swir1: f64,
    pub swir2: f64,
}

impl Bands {
    pub fn named(&self) -> [(&'static str, f64); 6] {
        [
            ("blue", self.blue),
            ("green", self.green),
            ("red", self.red),
            ("nir", self.nir),
            ("swir1", self.swir1),
            ("swir2", self.swir2),
        ]
    }
}

/// A raw record whose bands have been checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ReflectanceRecord {
    pub bands: Bands,
    pub water_type: String,
    pub date: Option<NaiveDate>,
    pub pwater: Option<f64>,
    pub pixel_count: Option<i64>,
    pub clouds: Option<f64>,
    pub secchi: Option<f64>,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    pub sat: String,
}

impl ReflectanceRecord {
    /// Checks that all six bands are present and finite.
    ///
    /// `row` is the 1-based position of the record in its input and only
    /// serves the error message.
    pub fn from_raw(raw: &RawRecord, row: usize) -> Result<Self, PipelineError> {
        let band = |field: &'static str, value: Option<f64>| match value {
            Some(v) if v.is_finite() => Ok(v),
            _ => Err(PipelineError::MalformedInput { row, field }),
        };

        let bands = Bands {
            blue: band("blue", raw.blue)?,
            green: band("green", raw.green)?,
            red: band("red", raw.red)?,
            nir: band("nir", raw.nir)?,
            swir1: band("swir1", raw.swir1)?,
            swir2: band("swir2", raw.swir2)?,
        };

        Ok(Self {
            bands,
            water_type: raw.water_type.clone().unwrap_or_default(),
            date: raw.date,
            pwater: raw.pwater,
            pixel_count: raw.pixel_count,
            clouds: raw.clouds,
            secchi: raw.secchi,
            lat: raw.lat,
            long: raw.long,
            sat: raw.sat.clone().unwrap_or_default(),
        })
    }
}

/// One row of the model-ready table. Field order is the output column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub blue: f64,
    pub green: f64,
    pub red: f64,
    pub nir: f64,
    pub swir1: f64,
    pub swir2: f64,
    pub sat: String,
    pub date: Option<NaiveDate>,
    pub secchi: f64,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    pub near_infrared_red_ratio: f64,
    pub normalized_difference_vegetation_index: f64,
    pub green_normalized_difference_vegetation_index: f64,
    pub normalized_difference_turbidity_index: f64,
    /// Nanometers
    pub dominant_wavelength: u32,
    pub id: usize,
    pub forel_ule: u8,
    pub color: String,
}
