//! Dominant wavelength from red, green and blue reflectance.
//!
//! The reflectance triplet is weighted into tristimulus values, projected to
//! chromaticity coordinates and expressed as a hue angle around the white
//! point. The dominant wavelength is the point of the spectral locus whose
//! hue angle is closest, at 1 nm resolution.

use serde::Deserialize;

use crate::color::constants::{CIE1931_LOCUS, RGB_TO_XYZ, WHITE_POINT};

/// Below this distance from the white point the hue is undefined.
const ACHROMATIC_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChromaticityModel {
    /// X = red, Y = green, Z = blue
    #[default]
    BandFraction,
    /// Weighted with [`RGB_TO_XYZ`]
    CieTristimulus,
}

impl ChromaticityModel {
    pub fn tristimulus(&self, red: f64, green: f64, blue: f64) -> [f64; 3] {
        match self {
            ChromaticityModel::BandFraction => [red, green, blue],
            ChromaticityModel::CieTristimulus => {
                RGB_TO_XYZ.map(|w| w[0] * red + w[1] * green + w[2] * blue)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chromaticity {
    pub x: f64,
    pub y: f64,
}

impl Chromaticity {
    /// `None` when the tristimulus sum is not a positive finite number.
    pub fn from_rgb(model: ChromaticityModel, red: f64, green: f64, blue: f64) -> Option<Self> {
        let [x, y, z] = model.tristimulus(red, green, blue);
        let sum = x + y + z;

        if !sum.is_finite() || sum <= 0.0 {
            return None;
        }

        Some(Self {
            x: x / sum,
            y: y / sum,
        })
    }

    /// Angle in degrees, in [0, 360), of the vector from the white point.
    /// `None` for an achromatic point.
    pub fn hue_angle(&self) -> Option<f64> {
        let dx = self.x - WHITE_POINT.0;
        let dy = self.y - WHITE_POINT.1;

        if dx.hypot(dy) < ACHROMATIC_EPSILON {
            return None;
        }

        Some(dy.atan2(dx).to_degrees().rem_euclid(360.0))
    }
}

/// Smallest difference between two angles in degrees, across 0/360.
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

/// Hue angle of every whole wavelength on the spectral locus.
#[derive(Debug, Clone)]
pub struct HueTable {
    // (wavelength nm, hue angle), ascending wavelength
    entries: Vec<(u32, f64)>,
}

impl HueTable {
    /// One entry per tabulated locus wavelength.
    pub fn cie1931() -> Self {
        let entries = CIE1931_LOCUS
            .iter()
            .filter_map(|(&nm, &(x, y))| Some((nm, Chromaticity { x, y }.hue_angle()?)))
            .collect();

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hue_of(&self, wavelength: u32) -> Option<f64> {
        self.entries
            .iter()
            .find(|(nm, _)| *nm == wavelength)
            .map(|&(_, hue)| hue)
    }

    /// Nearest wavelength by circular hue difference. Ties go to the
    /// shorter wavelength.
    pub fn nearest_wavelength(&self, hue: f64) -> Option<u32> {
        let mut best: Option<(u32, f64)> = None;

        for &(nm, reference) in &self.entries {
            let diff = angular_difference(hue, reference);
            if best.is_none_or(|(_, d)| diff < d) {
                best = Some((nm, diff));
            }
        }

        best.map(|(nm, _)| nm)
    }
}

/// Maps a reflectance triplet to its dominant wavelength.
#[derive(Debug, Clone)]
pub struct DominantWavelength {
    model: ChromaticityModel,
    table: HueTable,
}

impl DominantWavelength {
    pub fn new(model: ChromaticityModel) -> Self {
        Self {
            model,
            table: HueTable::cie1931(),
        }
    }

    pub fn model(&self) -> ChromaticityModel {
        self.model
    }

    /// `None` for degenerate chromaticity (non-positive sum or achromatic).
    pub fn compute(&self, red: f64, green: f64, blue: f64) -> Option<u32> {
        let hue = Chromaticity::from_rgb(self.model, red, green, blue)?.hue_angle()?;
        self.table.nearest_wavelength(hue)
    }
}

impl Default for DominantWavelength {
    fn default() -> Self {
        Self::new(ChromaticityModel::default())
    }
}
