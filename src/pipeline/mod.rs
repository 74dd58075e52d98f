pub mod batch;
pub mod builder;
pub mod writer;

pub use batch::{BatchOutput, BatchRunner};
pub use builder::{DerivedRecord, FeatureBuilder, StageReport};
pub use writer::write_features;
