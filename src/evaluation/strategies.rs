use crate::error::{PipelineError, Result};
use smartcore::metrics::{mean_squared_error, r2};
use tracing::{error, info};

/// Stratégia evaluácie: zo skutočných a predikovaných hodnôt spraví jedno číslo
pub trait Evaluation {
    /// Názov metriky, pod ktorým sa loguje
    fn get_name(&self) -> &str;

    fn calculate_scores(&self, y_true: &[f64], y_pred: &[f64]) -> Result<f64>;
}

/// Obe postupnosti musia mať rovnakú, nenulovú dĺžku
fn check_shapes(y_true: &[f64], y_pred: &[f64]) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(PipelineError::ShapeMismatch {
            expected: y_true.len(),
            got: y_pred.len(),
        });
    }
    if y_true.is_empty() {
        return Err(PipelineError::ShapeMismatch { expected: 1, got: 0 });
    }
    Ok(())
}

fn logged(name: &str, score: Result<f64>) -> Result<f64> {
    match &score {
        Ok(value) => info!(metric = name, value, "score calculated"),
        Err(err) => error!(metric = name, error = %err, "error occurred in calculating score"),
    }
    score
}

/// Mean Squared Error
#[derive(Debug, Clone, Copy, Default)]
pub struct Mse;

impl Mse {
    fn score(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
        check_shapes(y_true, y_pred)?;
        Ok(mean_squared_error(&y_true.to_vec(), &y_pred.to_vec()))
    }
}

impl Evaluation for Mse {
    fn get_name(&self) -> &str {
        "mse"
    }

    fn calculate_scores(&self, y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
        logged(self.get_name(), Self::score(y_true, y_pred))
    }
}

/// Root Mean Squared Error, v rovnakých jednotkách ako y
#[derive(Debug, Clone, Copy, Default)]
pub struct Rmse;

impl Evaluation for Rmse {
    fn get_name(&self) -> &str {
        "rmse"
    }

    fn calculate_scores(&self, y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
        logged(self.get_name(), Mse::score(y_true, y_pred).map(f64::sqrt))
    }
}

/// Koeficient determinácie R².
///
/// Ak sú skutočné hodnoty konštantné (nulový rozptyl), vráti 1.0 pre presnú
/// predikciu a 0.0 inak, nikdy NaN ani nekonečno.
#[derive(Debug, Clone, Copy, Default)]
pub struct R2;

impl R2 {
    fn score(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
        check_shapes(y_true, y_pred)?;

        // smartcore delí rozptylom y, pri konštantnom y by vrátil NaN
        let first = y_true[0];
        if y_true.iter().all(|&t| t == first) {
            let exact = y_true.iter().zip(y_pred).all(|(t, p)| t == p);
            return Ok(if exact { 1.0 } else { 0.0 });
        }
        Ok(r2(&y_true.to_vec(), &y_pred.to_vec()))
    }
}

impl Evaluation for R2 {
    fn get_name(&self) -> &str {
        "r2"
    }

    fn calculate_scores(&self, y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
        logged(self.get_name(), Self::score(y_true, y_pred))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const Y_TRUE: [f64; 5] = [3.0, -0.5, 2.0, 7.0, 4.2];
    const Y_PRED: [f64; 5] = [2.5, 0.0, 2.0, 8.0, 4.0];

    #[test]
    fn mse_of_known_values() {
        // (0.25 + 0.25 + 0 + 1 + 0.04) / 5
        let mse = Mse.calculate_scores(&Y_TRUE, &Y_PRED).unwrap();
        assert!((mse - 0.308).abs() < 1e-12);
    }

    #[test]
    fn rmse_is_sqrt_of_mse() {
        let pairs: [(&[f64], &[f64]); 3] = [
            (&Y_TRUE, &Y_PRED),
            (&[1.0, 2.0], &[4.0, -2.0]),
            (&[0.1], &[0.7]),
        ];
        for (y_true, y_pred) in pairs {
            let mse = Mse.calculate_scores(y_true, y_pred).unwrap();
            let rmse = Rmse.calculate_scores(y_true, y_pred).unwrap();
            assert_eq!(rmse, mse.sqrt());
        }
    }

    #[test]
    fn identical_sequences_have_zero_error() {
        assert_eq!(Mse.calculate_scores(&Y_TRUE, &Y_TRUE).unwrap(), 0.0);
        assert_eq!(Rmse.calculate_scores(&Y_TRUE, &Y_TRUE).unwrap(), 0.0);
    }

    #[test]
    fn r2_perfect_prediction_is_one() {
        assert_eq!(R2.calculate_scores(&Y_TRUE, &Y_TRUE).unwrap(), 1.0);
    }

    #[test]
    fn r2_mean_prediction_is_zero() {
        let mean = Y_TRUE.iter().sum::<f64>() / Y_TRUE.len() as f64;
        let r2 = R2.calculate_scores(&Y_TRUE, &[mean; 5]).unwrap();
        assert!(r2.abs() < 1e-12, "{}", r2);
    }

    #[test]
    fn r2_of_known_values() {
        let r2 = R2.calculate_scores(&Y_TRUE, &Y_PRED).unwrap();
        let mean = 3.14;
        let ss_tot: f64 = Y_TRUE.iter().map(|t| (t - mean) * (t - mean)).sum();
        assert!((r2 - (1.0 - 1.54 / ss_tot)).abs() < 1e-9);
    }

    #[test]
    fn r2_worse_than_mean_is_negative() {
        let y_true = [1.0, 2.0, 3.0];
        // ss_res = 4 + 0 + 4, ss_tot = 2
        let r2 = R2.calculate_scores(&y_true, &[3.0, 2.0, 1.0]).unwrap();
        assert!((r2 - (-3.0)).abs() < 1e-12, "{}", r2);
    }

    #[test]
    fn r2_constant_labels_stay_finite() {
        let y = [2.0, 2.0, 2.0];
        assert_eq!(R2.calculate_scores(&y, &y).unwrap(), 1.0);
        assert_eq!(R2.calculate_scores(&y, &[1.0, 2.0, 3.0]).unwrap(), 0.0);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        for metric in [&Mse as &dyn Evaluation, &Rmse, &R2] {
            let err = metric.calculate_scores(&[1.0, 2.0], &[1.0]).unwrap_err();
            assert!(matches!(err, PipelineError::ShapeMismatch { expected: 2, got: 1 }));
            let err = metric.calculate_scores(&[], &[]).unwrap_err();
            assert!(matches!(err, PipelineError::ShapeMismatch { .. }));
        }
    }
}
