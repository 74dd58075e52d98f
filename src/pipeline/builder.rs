use rayon::prelude::*;
use std::fmt::Display;
use tracing::{debug, info};

use crate::color::{ChromaticityModel, ColorClassTable, DominantWavelength};
use crate::error::PipelineError;
use crate::indices::BandIndices;
use crate::qc::QualityFilter;
use crate::records::{FeatureRecord, RawRecord, ReflectanceRecord};

/// A quality-controlled record with its derived features and row id.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedRecord {
    /// 1-based, in quality-control survival order
    pub id: usize,
    pub record: ReflectanceRecord,
    pub indices: BandIndices,
    /// `None` when the chromaticity is degenerate
    pub dominant_wavelength: Option<u32>,
}

/// Row counts after each stage of a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageReport {
    pub input: usize,
    pub after_qc: usize,
    /// Quality-controlled records with a defined dominant wavelength
    pub derived: usize,
    pub joined: usize,
}

impl StageReport {
    pub fn dropped_by_qc(&self) -> usize {
        self.input - self.after_qc
    }

    pub fn without_wavelength(&self) -> usize {
        self.after_qc - self.derived
    }

    pub fn dropped_by_join(&self) -> usize {
        self.derived - self.joined
    }
}

impl Display for StageReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "input: {}, after QC: {} (-{}), with dominant wavelength: {} (-{}), after color join: {} (-{})",
            self.input,
            self.after_qc,
            self.dropped_by_qc(),
            self.derived,
            self.without_wavelength(),
            self.joined,
            self.dropped_by_join()
        )
    }
}

/// Turns matched reflectance / Secchi records into the model-ready table.
///
/// The stages run in order: band validation, quality control, feature
/// derivation with row ids, and the Forel-Ule join. Each stage is a pure
/// function of its input and is exposed on its own.
#[derive(Debug, Clone)]
pub struct FeatureBuilder<'a> {
    quality: QualityFilter,
    wavelength: DominantWavelength,
    classes: &'a ColorClassTable,
    parallel: bool,
}

impl<'a> FeatureBuilder<'a> {
    pub fn new(classes: &'a ColorClassTable) -> Self {
        Self {
            quality: QualityFilter::default(),
            wavelength: DominantWavelength::default(),
            classes,
            parallel: false,
        }
    }

    pub fn with_quality_filter(mut self, quality: QualityFilter) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_chromaticity(mut self, model: ChromaticityModel) -> Self {
        self.wavelength = DominantWavelength::new(model);
        self
    }

    /// Derive features on the rayon pool. Output is identical either way.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Fails on the first record whose bands are missing or not finite.
    pub fn validate(&self, raw: &[RawRecord]) -> Result<Vec<ReflectanceRecord>, PipelineError> {
        raw.iter()
            .enumerate()
            .map(|(i, r)| ReflectanceRecord::from_raw(r, i + 1))
            .collect()
    }

    pub fn quality_control(&self, records: Vec<ReflectanceRecord>) -> Vec<ReflectanceRecord> {
        self.quality.filter(records)
    }

    /// Ids are assigned here, so they stay dense over the quality-controlled
    /// set whatever the color join removes later.
    pub fn derive(&self, records: Vec<ReflectanceRecord>) -> Vec<DerivedRecord> {
        let derive_one = |(i, record): (usize, ReflectanceRecord)| {
            let bands = &record.bands;
            let indices = BandIndices::from_bands(bands);
            let dominant_wavelength = self.wavelength.compute(bands.red, bands.green, bands.blue);

            DerivedRecord {
                id: i + 1,
                record,
                indices,
                dominant_wavelength,
            }
        };

        if self.parallel {
            records.into_par_iter().enumerate().map(derive_one).collect()
        } else {
            records.into_iter().enumerate().map(derive_one).collect()
        }
    }

    /// Drops records without a dominant wavelength or outside the table.
    pub fn join_color_classes(&self, derived: Vec<DerivedRecord>) -> Vec<FeatureRecord> {
        derived
            .into_iter()
            .filter_map(|d| {
                let wavelength = d.dominant_wavelength?;
                let class = self.classes.get(wavelength)?;
                let secchi = d.record.secchi?;
                let r = d.record;

                Some(FeatureRecord {
                    blue: r.bands.blue,
                    green: r.bands.green,
                    red: r.bands.red,
                    nir: r.bands.nir,
                    swir1: r.bands.swir1,
                    swir2: r.bands.swir2,
                    sat: r.sat,
                    date: r.date,
                    secchi,
                    lat: r.lat,
                    long: r.long,
                    near_infrared_red_ratio: d.indices.near_infrared_red_ratio,
                    normalized_difference_vegetation_index: d
                        .indices
                        .normalized_difference_vegetation_index,
                    green_normalized_difference_vegetation_index: d
                        .indices
                        .green_normalized_difference_vegetation_index,
                    normalized_difference_turbidity_index: d
                        .indices
                        .normalized_difference_turbidity_index,
                    dominant_wavelength: wavelength,
                    id: d.id,
                    forel_ule: class.forel_ule,
                    color: class.color.clone(),
                })
            })
            .collect()
    }

    pub fn build(&self, raw: &[RawRecord]) -> Result<Vec<FeatureRecord>, PipelineError> {
        self.build_with_report(raw).map(|(features, _)| features)
    }

    pub fn build_with_report(
        &self,
        raw: &[RawRecord],
    ) -> Result<(Vec<FeatureRecord>, StageReport), PipelineError> {
        let validated = self.validate(raw)?;

        let passed = self.quality_control(validated);
        let after_qc = passed.len();
        debug!("{} of {} record(s) passed quality control", after_qc, raw.len());

        let derived = self.derive(passed);
        let with_wavelength = derived
            .iter()
            .filter(|d| d.dominant_wavelength.is_some())
            .count();
        let features = self.join_color_classes(derived);

        let report = StageReport {
            input: raw.len(),
            after_qc,
            derived: with_wavelength,
            joined: features.len(),
        };
        info!("Feature build: {}", report);

        Ok((features, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn raw(blue: f64, green: f64, red: f64, secchi: f64) -> RawRecord {
        RawRecord {
            blue: Some(blue),
            green: Some(green),
            red: Some(red),
            nir: Some(0.02),
            swir1: Some(0.01),
            swir2: Some(0.01),
            water_type: Some("Lake".to_string()),
            pwater: Some(95.0),
            pixel_count: Some(50),
            clouds: Some(2.0),
            secchi: Some(secchi),
            sat: Some("LC08".to_string()),
            ..Default::default()
        }
    }

    // Dominant wavelength near 500 nm, inside the Forel-Ule table
    fn blue_green(secchi: f64) -> RawRecord {
        raw(0.04, 0.05, 0.02, secchi)
    }

    // Dominant wavelength near 610 nm, outside the Forel-Ule table
    fn reddish(secchi: f64) -> RawRecord {
        raw(0.05, 0.06, 0.07, secchi)
    }

    #[test]
    fn test_reference_row_passes_qc_with_expected_indices() {
        let table = ColorClassTable::forel_ule();
        let builder = FeatureBuilder::new(&table);

        let mut row = reddish(3.5);
        row.nir = Some(0.20);
        row.swir1 = Some(0.03);
        row.swir2 = Some(0.02);

        let validated = builder.validate(&[row]).unwrap();
        let passed = builder.quality_control(validated);
        assert_eq!(passed.len(), 1);

        let derived = builder.derive(passed);
        assert_relative_eq!(
            derived[0].indices.near_infrared_red_ratio,
            2.857142857,
            epsilon = 1e-6
        );
        assert_relative_eq!(
            derived[0].indices.normalized_difference_vegetation_index,
            0.4815,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_build_joins_color_class() {
        let table = ColorClassTable::forel_ule();
        let features = FeatureBuilder::new(&table)
            .build(&[blue_green(2.0)])
            .unwrap();

        assert_eq!(features.len(), 1);
        let f = &features[0];
        assert_eq!(f.id, 1);
        assert_eq!(f.secchi, 2.0);
        assert_eq!(f.sat, "LC08");
        assert!((495..=510).contains(&f.dominant_wavelength));
        assert_eq!(
            table.get(f.dominant_wavelength).unwrap().forel_ule,
            f.forel_ule
        );
    }

    #[test]
    fn test_ids_are_dense_over_qc_survivors() {
        let table = ColorClassTable::forel_ule();
        let builder = FeatureBuilder::new(&table);

        let rows = vec![
            blue_green(1.0),
            blue_green(0.0), // fails QC
            reddish(2.0),    // fails the join
            blue_green(3.0),
        ];

        let (features, report) = builder.build_with_report(&rows).unwrap();

        assert_eq!(
            report,
            StageReport {
                input: 4,
                after_qc: 3,
                derived: 3,
                joined: 2
            }
        );
        let ids: Vec<usize> = features.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(features[1].secchi, 3.0);
    }

    #[test]
    fn test_degenerate_chromaticity_is_dropped_at_join() {
        let table = ColorClassTable::forel_ule();
        let builder = FeatureBuilder::new(&table);

        let validated = builder.validate(&[raw(0.03, 0.03, 0.03, 2.0)]).unwrap();
        let derived = builder.derive(builder.quality_control(validated));

        assert_eq!(derived.len(), 1);
        assert_eq!(derived[0].dominant_wavelength, None);
        assert!(builder.join_color_classes(derived).is_empty());

        let (_, report) = builder
            .build_with_report(&[raw(0.03, 0.03, 0.03, 2.0), blue_green(1.0)])
            .unwrap();
        assert_eq!(report.after_qc, 2);
        assert_eq!(report.derived, 1);
        assert_eq!(report.without_wavelength(), 1);
        assert_eq!(report.dropped_by_join(), 0);
    }

    #[test]
    fn test_malformed_band_aborts_build() {
        let table = ColorClassTable::forel_ule();
        let mut bad = blue_green(2.0);
        bad.nir = None;

        let result = FeatureBuilder::new(&table).build(&[blue_green(1.0), bad]);

        assert!(matches!(
            result,
            Err(PipelineError::MalformedInput {
                row: 2,
                field: "nir"
            })
        ));
    }

    #[test]
    fn test_all_filtered_is_empty_not_error() {
        let table = ColorClassTable::forel_ule();
        let mut row = blue_green(2.0);
        row.pixel_count = Some(10);

        let features = FeatureBuilder::new(&table).build(&[row]).unwrap();
        assert!(features.is_empty());

        assert!(FeatureBuilder::new(&table).build(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_all_zero_bands_never_reach_the_join() {
        let table = ColorClassTable::forel_ule();
        let builder = FeatureBuilder::new(&table);

        let validated = builder.validate(&[raw(0.0, 0.0, 0.0, 2.0)]).unwrap();
        assert!(builder.quality_control(validated).is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let table = ColorClassTable::forel_ule();
        let rows: Vec<RawRecord> = (0..200)
            .map(|i| {
                let t = i as f64 / 200.0;
                raw(0.02 + 0.03 * t, 0.05, 0.01 + 0.05 * t, 0.5 + 9.0 * t)
            })
            .collect();

        let sequential = FeatureBuilder::new(&table).build(&rows).unwrap();
        let parallel = FeatureBuilder::new(&table)
            .parallel(true)
            .build(&rows)
            .unwrap();

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_derived_values_do_not_depend_on_row_order() {
        let table = ColorClassTable::forel_ule();
        let builder = FeatureBuilder::new(&table);

        let rows = vec![blue_green(1.0), raw(0.03, 0.06, 0.03, 2.0), blue_green(4.0)];
        let mut reversed = rows.clone();
        reversed.reverse();

        let forward = builder.build(&rows).unwrap();
        let backward = builder.build(&reversed).unwrap();

        assert_eq!(forward.len(), backward.len());
        for f in &forward {
            let twin = backward
                .iter()
                .find(|b| b.secchi == f.secchi)
                .expect("same record in both orders");
            assert_eq!(twin.dominant_wavelength, f.dominant_wavelength);
            assert_eq!(twin.near_infrared_red_ratio, f.near_infrared_red_ratio);
            assert_eq!(twin.forel_ule, f.forel_ule);
        }
    }
}
