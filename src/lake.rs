use chrono::NaiveDate;

use crate::bbox::Bbox;
use crate::model::{FeatureMatrix, Predictor};
use crate::records::FeatureRecord;

/// Which records belong to the lake of interest. Built from the `lake`
/// section of [`Config`](crate::config::Config), which validates it.
#[derive(Debug, Clone)]
pub struct LakeSelection {
    pub name: Option<String>,
    pub bbox: Bbox,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub id: usize,
    pub date: Option<NaiveDate>,
    pub observed: f64,
    pub predicted: f64,
}

/// Feature records of a single lake, ordered in time.
#[derive(Debug, Clone)]
pub struct LakeSeries {
    records: Vec<FeatureRecord>,
}

impl LakeSeries {
    /// Keeps records located inside `selection.bbox` and within the date
    /// window. Records without coordinates are skipped, and so are undated
    /// records when a window is set. Sorted by date, then id.
    pub fn select(records: &[FeatureRecord], selection: &LakeSelection) -> Self {
        let in_window = |date: Option<NaiveDate>| {
            if selection.start_date.is_none() && selection.end_date.is_none() {
                return true;
            }
            let Some(date) = date else {
                return false;
            };
            selection.start_date.is_none_or(|start| date >= start)
                && selection.end_date.is_none_or(|end| date <= end)
        };

        let mut records: Vec<FeatureRecord> = records
            .iter()
            .filter(|r| match (r.lat, r.long) {
                (Some(lat), Some(long)) => selection.bbox.contains(lat, long),
                _ => false,
            })
            .filter(|r| in_window(r.date))
            .cloned()
            .collect();

        records.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

        Self { records }
    }

    pub fn records(&self) -> &[FeatureRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn predict(&self, predictor: &dyn Predictor) -> Vec<SeriesPoint> {
        let predicted = predictor.predict(&FeatureMatrix::from_records(&self.records));

        self.records
            .iter()
            .zip(predicted)
            .map(|(r, predicted)| SeriesPoint {
                id: r.id,
                date: r.date,
                observed: r.secchi,
                predicted,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct WavelengthPredictor;

    impl Predictor for WavelengthPredictor {
        fn predict(&self, features: &FeatureMatrix) -> Vec<f64> {
            features.rows().iter().map(|row| row[8] / 100.0).collect()
        }

        fn best_score(&self) -> Option<f64> {
            None
        }

        fn best_iteration(&self) -> Option<usize> {
            None
        }
    }

    fn record(id: usize, lat: f64, long: f64, date: Option<NaiveDate>) -> FeatureRecord {
        FeatureRecord {
            blue: 0.04,
            green: 0.05,
            red: 0.02,
            nir: 0.02,
            swir1: 0.01,
            swir2: 0.01,
            sat: "LE07".to_string(),
            date,
            secchi: 2.0,
            lat: Some(lat),
            long: Some(long),
            near_infrared_red_ratio: 1.0,
            normalized_difference_vegetation_index: 0.0,
            green_normalized_difference_vegetation_index: 0.0,
            normalized_difference_turbidity_index: 0.0,
            dominant_wavelength: 500 + id as u32,
            id,
            forel_ule: 6,
            color: String::new(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn mendota(start: Option<NaiveDate>, end: Option<NaiveDate>) -> LakeSelection {
        LakeSelection {
            name: Some("Mendota".to_string()),
            bbox: Bbox::new(-89.48, -89.35, 43.06, 43.16).unwrap(),
            start_date: start,
            end_date: end,
        }
    }

    #[test]
    fn test_select_sorts_by_date_inside_bbox() {
        let records = vec![
            record(1, 43.1, -89.4, date(2018, 8, 1)),
            record(2, 45.0, -89.4, date(2018, 6, 1)),
            record(3, 43.1, -89.4, date(2015, 5, 20)),
        ];

        let series = LakeSeries::select(&records, &mendota(None, None));
        let ids: Vec<usize> = series.records().iter().map(|r| r.id).collect();

        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_select_applies_date_window() {
        let records = vec![
            record(1, 43.1, -89.4, date(2014, 8, 1)),
            record(2, 43.1, -89.4, date(2016, 6, 1)),
            record(3, 43.1, -89.4, None),
        ];

        let series = LakeSeries::select(&records, &mendota(date(2015, 1, 1), None));

        assert_eq!(series.len(), 1);
        assert_eq!(series.records()[0].id, 2);
    }

    #[test]
    fn test_predict_aligns_with_records() {
        let records = vec![
            record(2, 43.1, -89.4, date(2017, 7, 1)),
            record(1, 43.1, -89.4, date(2016, 7, 1)),
        ];

        let points =
            LakeSeries::select(&records, &mendota(None, None)).predict(&WavelengthPredictor);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].id, 1);
        assert_eq!(points[0].predicted, 5.01);
        assert_eq!(points[1].predicted, 5.02);
        assert_eq!(points[1].observed, 2.0);
    }
}
