use super::{FittedModel, IModel};
use crate::data_loading::Table;
use crate::error::{PipelineError, Result};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linalg::traits::svd::SVDDecomposable;
use smartcore::linear::linear_regression::{
    LinearRegression, LinearRegressionParameters, LinearRegressionSolverName,
};
use tracing::{debug, error, info};

/// Relatívny prah, pod ktorým sa singulárna hodnota berie ako nula
const RANK_TOLERANCE: f64 = 1e-10;

/// Lineárna regresia (najmenšie štvorce, s interceptom)
pub struct LinRegWrapper {
    solver: String,
}

impl LinRegWrapper {
    pub fn new() -> Self {
        Self {
            solver: "qr".to_string(),
        }
    }

    fn fit(&self, x_train: &Table, y_train: &[f64]) -> Result<LinearRegressionModel> {
        let (rows, cols) = x_train.shape();
        if rows != y_train.len() {
            return Err(PipelineError::ShapeMismatch {
                expected: rows,
                got: y_train.len(),
            });
        }
        if cols == 0 {
            return Err(PipelineError::Schema(
                "training features have no columns".to_string(),
            ));
        }
        // Podurčený systém smartcore nevie vyriešiť
        if rows < cols + 1 {
            return Err(PipelineError::Numerical(format!(
                "{} rows are not enough to fit {} features and an intercept",
                rows, cols
            )));
        }

        let rows_major = x_train.to_row_major()?;
        check_full_rank(&rows_major)?;

        let x = DenseMatrix::from_2d_vec(&rows_major)
            .map_err(|e| PipelineError::Numerical(e.to_string()))?;
        let mut params = LinearRegressionParameters::default();
        params.solver = match self.solver.as_str() {
            "svd" => LinearRegressionSolverName::SVD,
            _ => LinearRegressionSolverName::QR,
        };

        let model = LinearRegression::fit(&x, &y_train.to_vec(), params)
            .map_err(|e| PipelineError::Numerical(format!("least squares fit failed: {}", e)))?;

        let in_sample = model
            .predict(&x)
            .map_err(|e| PipelineError::Numerical(e.to_string()))?;
        if in_sample.iter().any(|v| !v.is_finite()) {
            return Err(PipelineError::Numerical(
                "fit produced non-finite values, the feature matrix is singular".to_string(),
            ));
        }

        Ok(LinearRegressionModel {
            model,
            feature_names: x_train.column_names().to_vec(),
        })
    }
}

impl Default for LinRegWrapper {
    fn default() -> Self {
        Self::new()
    }
}

impl IModel for LinRegWrapper {
    fn get_name(&self) -> &str {
        "LinearRegression"
    }

    fn get_supported_params(&self) -> Vec<&str> {
        vec!["solver"]
    }

    fn set_param(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "solver" => {
                if value == "qr" || value == "svd" {
                    self.solver = value.to_string();
                    Ok(())
                } else {
                    Err(PipelineError::InvalidConfig(format!(
                        "supported solvers are qr, svd; got '{}'",
                        value
                    )))
                }
            }
            _ => Err(PipelineError::InvalidConfig(format!(
                "unknown model parameter '{}'",
                key
            ))),
        }
    }

    fn train(&self, x_train: &Table, y_train: &[f64]) -> Result<Box<dyn FittedModel>> {
        let fitted = self.fit(x_train, y_train).inspect_err(|err| {
            error!(model = self.get_name(), error = %err, "error occurred in training the model");
        })?;
        info!(
            model = self.get_name(),
            solver = %self.solver,
            rows = x_train.n_rows(),
            features = x_train.n_cols(),
            "model training completed"
        );
        Ok(Box::new(fitted))
    }
}

/// Natrénovaná lineárna regresia
pub struct LinearRegressionModel {
    model: LinearRegression<f64, f64, DenseMatrix<f64>, Vec<f64>>,
    feature_names: Vec<String>,
}

impl FittedModel for LinearRegressionModel {
    fn get_name(&self) -> &str {
        "LinearRegression"
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, x: &Table) -> Result<Vec<f64>> {
        if x.column_names() != self.feature_names.as_slice() {
            return Err(PipelineError::Schema(format!(
                "prediction columns {:?} differ from training columns {:?}",
                x.column_names(),
                self.feature_names
            )));
        }
        if x.n_rows() == 0 {
            return Ok(Vec::new());
        }

        let matrix = to_dense_matrix(x)?;
        self.model
            .predict(&matrix)
            .map_err(|e| PipelineError::Numerical(format!("prediction failed: {}", e)))
    }
}

/// Matica s interceptom musí mať plnú hodnosť, inak QR solver v smartcore panikári
fn check_full_rank(rows: &[Vec<f64>]) -> Result<()> {
    let with_intercept: Vec<Vec<f64>> = rows
        .iter()
        .map(|row| row.iter().copied().chain(std::iter::once(1.0)).collect())
        .collect();
    let matrix = DenseMatrix::from_2d_vec(&with_intercept)
        .map_err(|e| PipelineError::Numerical(e.to_string()))?;
    let singular_values = matrix
        .svd()
        .map_err(|e| PipelineError::Numerical(format!("SVD of the feature matrix failed: {}", e)))?
        .s;

    let largest = singular_values.iter().copied().fold(0.0_f64, f64::max);
    let smallest = singular_values.iter().copied().fold(f64::INFINITY, f64::min);
    debug!(largest, smallest, "feature matrix singular values");
    if !largest.is_finite() || largest == 0.0 || smallest <= largest * RANK_TOLERANCE {
        return Err(PipelineError::Numerical(format!(
            "feature matrix is rank deficient (singular values {:e}..{:e}); \
             a feature is constant, all zero or a combination of other features",
            smallest, largest
        )));
    }
    Ok(())
}

fn to_dense_matrix(x: &Table) -> Result<DenseMatrix<f64>> {
    let rows = x.to_row_major()?;
    DenseMatrix::from_2d_vec(&rows).map_err(|e| PipelineError::Numerical(e.to_string()))
}
