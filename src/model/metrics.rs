use std::fmt::Display;

use super::ModelError;

/// Agreement between observed and predicted Secchi depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub n: usize,
    pub rmse: f64,
    pub mae: f64,
    /// Mean of predicted minus observed
    pub bias: f64,
    /// `None` when the observations have no variance
    pub r_squared: Option<f64>,
}

impl Metrics {
    pub fn evaluate(observed: &[f64], predicted: &[f64]) -> Result<Self, ModelError> {
        if observed.len() != predicted.len() {
            return Err(ModelError::ShapeMismatch {
                expected: observed.len(),
                found: predicted.len(),
            });
        }
        if observed.is_empty() {
            return Err(ModelError::EmptyData);
        }

        let n = observed.len() as f64;
        let residuals: Vec<f64> = predicted
            .iter()
            .zip(observed)
            .map(|(p, o)| p - o)
            .collect();

        let sse: f64 = residuals.iter().map(|r| r * r).sum();
        let mae = residuals.iter().map(|r| r.abs()).sum::<f64>() / n;
        let bias = residuals.iter().sum::<f64>() / n;

        let mean = observed.iter().sum::<f64>() / n;
        let sst: f64 = observed.iter().map(|o| (o - mean).powi(2)).sum();
        let r_squared = (sst > 0.0).then(|| 1.0 - sse / sst);

        Ok(Self {
            n: observed.len(),
            rmse: (sse / n).sqrt(),
            mae,
            bias,
            r_squared,
        })
    }
}

impl Display for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "n: {}, RMSE: {:.3} m, MAE: {:.3} m, bias: {:.3} m, R²: ",
            self.n, self.rmse, self.mae, self.bias
        )?;
        match self.r_squared {
            Some(r2) => write!(f, "{:.3}", r2),
            None => write!(f, "n/a"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_perfect_prediction() {
        let obs = [1.0, 2.0, 3.0];
        let m = Metrics::evaluate(&obs, &obs).unwrap();

        assert_eq!(m.n, 3);
        assert_relative_eq!(m.rmse, 0.0);
        assert_relative_eq!(m.r_squared.unwrap(), 1.0);
    }

    #[test]
    fn test_constant_offset() {
        let obs = [1.0, 2.0, 3.0, 4.0];
        let pred = [1.5, 2.5, 3.5, 4.5];
        let m = Metrics::evaluate(&obs, &pred).unwrap();

        assert_relative_eq!(m.rmse, 0.5, epsilon = 1e-12);
        assert_relative_eq!(m.mae, 0.5, epsilon = 1e-12);
        assert_relative_eq!(m.bias, 0.5, epsilon = 1e-12);
        // sse = 1.0, sst = 5.0
        assert_relative_eq!(m.r_squared.unwrap(), 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_observations_have_no_r_squared() {
        let m = Metrics::evaluate(&[2.0, 2.0], &[1.0, 3.0]).unwrap();
        assert!(m.r_squared.is_none());
        assert_relative_eq!(m.bias, 0.0);
    }

    #[test]
    fn test_length_mismatch() {
        assert!(matches!(
            Metrics::evaluate(&[1.0], &[1.0, 2.0]),
            Err(ModelError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            Metrics::evaluate(&[], &[]),
            Err(ModelError::EmptyData)
        ));
    }
}
