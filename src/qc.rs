//! Fixed-threshold quality control applied before any feature is derived.

use serde::Deserialize;

use crate::records::ReflectanceRecord;

/// All bounds are exclusive.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct QcThresholds {
    /// Compared case-insensitively
    pub water_type: String,
    /// Water pixel coverage (%) must exceed this
    pub min_pwater: f64,
    pub min_pixel_count: i64,
    /// Cloud cover (%) must stay below this
    pub max_clouds: f64,
    /// Secchi depth (m)
    pub secchi_range: (f64, f64),
    pub band_range: (f64, f64),
}

impl Default for QcThresholds {
    fn default() -> Self {
        Self {
            water_type: "lake".to_string(),
            min_pwater: 90.0,
            min_pixel_count: 10,
            max_clouds: 10.0,
            secchi_range: (0.0, 10.0),
            band_range: (0.0, 1000.0),
        }
    }
}

fn strictly_within(value: f64, (low, high): (f64, f64)) -> bool {
    value > low && value < high
}

#[derive(Debug, Clone, Default)]
pub struct QualityFilter {
    thresholds: QcThresholds,
}

impl QualityFilter {
    pub fn new(thresholds: QcThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &QcThresholds {
        &self.thresholds
    }

    /// Absent pwater, pixel count, clouds or secchi fail the check.
    pub fn passes(&self, record: &ReflectanceRecord) -> bool {
        let t = &self.thresholds;

        let Some(secchi) = record.secchi else {
            return false;
        };

        record.water_type.eq_ignore_ascii_case(&t.water_type)
            && record.pwater.is_some_and(|p| p > t.min_pwater)
            && record.pixel_count.is_some_and(|n| n > t.min_pixel_count)
            && record.clouds.is_some_and(|c| c < t.max_clouds)
            && strictly_within(secchi, t.secchi_range)
            && record
                .bands
                .named()
                .iter()
                .all(|&(_, v)| strictly_within(v, t.band_range))
    }

    /// Survivors keep their relative order.
    pub fn filter(&self, records: Vec<ReflectanceRecord>) -> Vec<ReflectanceRecord> {
        records.into_iter().filter(|r| self.passes(r)).collect()
    }
}
