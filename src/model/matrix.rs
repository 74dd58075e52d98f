use crate::records::FeatureRecord;

/// Model input columns, in order.
pub const FEATURE_COLUMNS: [&str; 9] = [
    "blue",
    "red",
    "green",
    "nir",
    "near_infrared_red_ratio",
    "green_normalized_difference_vegetation_index",
    "normalized_difference_turbidity_index",
    "normalized_difference_vegetation_index",
    "dominant_wavelength",
];

pub const N_FEATURES: usize = FEATURE_COLUMNS.len();

/// Row-major feature matrix in [`FEATURE_COLUMNS`] order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureMatrix {
    rows: Vec<[f64; N_FEATURES]>,
}

impl FeatureMatrix {
    pub fn from_records(records: &[FeatureRecord]) -> Self {
        let rows = records
            .iter()
            .map(|r| {
                [
                    r.blue,
                    r.red,
                    r.green,
                    r.nir,
                    r.near_infrared_red_ratio,
                    r.green_normalized_difference_vegetation_index,
                    r.normalized_difference_turbidity_index,
                    r.normalized_difference_vegetation_index,
                    r.dominant_wavelength as f64,
                ]
            })
            .collect();

        Self { rows }
    }

    pub fn from_rows(rows: Vec<[f64; N_FEATURES]>) -> Self {
        Self { rows }
    }

    pub fn column_names(&self) -> &'static [&'static str] {
        &FEATURE_COLUMNS
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[[f64; N_FEATURES]] {
        &self.rows
    }

    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = FEATURE_COLUMNS.iter().position(|c| *c == name)?;
        Some(self.rows.iter().map(|row| row[idx]).collect())
    }
}

/// Secchi depth of each record, aligned with [`FeatureMatrix::from_records`].
pub fn target(records: &[FeatureRecord]) -> Vec<f64> {
    records.iter().map(|r| r.secchi).collect()
}
