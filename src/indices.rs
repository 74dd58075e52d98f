//! Band ratios and normalized-difference indices used as model features.
//!
//! After quality control every band is strictly positive, so none of the
//! denominators below can be zero.

use crate::records::Bands;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandIndices {
    pub near_infrared_red_ratio: f64,
    pub normalized_difference_vegetation_index: f64,
    pub green_normalized_difference_vegetation_index: f64,
    pub normalized_difference_turbidity_index: f64,
}

impl BandIndices {
    pub fn from_bands(bands: &Bands) -> Self {
        Self {
            near_infrared_red_ratio: bands.nir / bands.red,
            normalized_difference_vegetation_index: normalized_difference(bands.nir, bands.red),
            green_normalized_difference_vegetation_index: normalized_difference(
                bands.nir,
                bands.green,
            ),
            normalized_difference_turbidity_index: normalized_difference(bands.red, bands.green),
        }
    }
}

/// (a - b) / (a + b)
pub fn normalized_difference(a: f64, b: f64) -> f64 {
    (a - b) / (a + b)
}
