//! Lake clarity features from matched Landsat surface reflectance and in-situ
//! Secchi depth.
//!
//! Raw matchups are quality controlled, augmented with band ratios and a
//! dominant wavelength, and classified on the Forel-Ule scale. The resulting
//! table is what a boosted-tree trainer is fitted on; the trainer itself is
//! reached through [`model::Trainer`].

pub mod bbox;
pub mod color;
pub mod config;
pub mod error;
pub mod indices;
pub mod lake;
pub mod model;
pub mod pipeline;
pub mod qc;
pub mod readers;
pub mod records;

pub use error::PipelineError;
pub use pipeline::{BatchRunner, FeatureBuilder};
