//! Water color module
//!
//! Dominant wavelength of a reflectance triplet and its Forel-Ule color class.

pub mod constants;
pub mod forel_ule;
pub mod hue;

pub use forel_ule::{ColorClass, ColorClassTable};
pub use hue::{Chromaticity, ChromaticityModel, DominantWavelength, HueTable};
