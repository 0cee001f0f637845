use super::metrics::EvaluationReport;
use super::strategies::{Evaluation, Mse, R2, Rmse};
use crate::error::{PipelineError, Result};

/// Factory pre metriky podľa názvu
pub struct MetricFactory;

impl MetricFactory {
    pub fn create(metric: &str) -> Result<Box<dyn Evaluation>> {
        match metric {
            "mse" => Ok(Box::new(Mse)),
            "rmse" => Ok(Box::new(Rmse)),
            "r2" => Ok(Box::new(R2)),
            _ => Err(PipelineError::InvalidConfig(format!("unknown metric: {}", metric))),
        }
    }

    /// Predvolené metriky regresie v poradí, v akom sa logujú
    pub fn regression_defaults() -> Vec<Box<dyn Evaluation>> {
        vec![Box::new(Mse), Box::new(Rmse), Box::new(R2)]
    }

    pub fn available() -> Vec<&'static str> {
        vec!["mse", "rmse", "r2"]
    }
}

pub struct ModelEvaluator;

impl ModelEvaluator {
    /// Vypočíta všetky metriky; prvá chyba ukončí evaluáciu
    pub fn evaluate(
        model_name: &str,
        metrics: &[Box<dyn Evaluation>],
        y_true: &[f64],
        y_pred: &[f64],
    ) -> Result<EvaluationReport> {
        let mut report = EvaluationReport::new(model_name.to_string(), "regression".to_string());

        for metric in metrics {
            let score = metric.calculate_scores(y_true, y_pred)?;
            report.add_metric(metric.get_name().to_string(), score);
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_keeps_metric_order() {
        let report = ModelEvaluator::evaluate(
            "LinearRegression",
            &MetricFactory::regression_defaults(),
            &[1.0, 2.0, 3.0],
            &[1.0, 2.0, 4.0],
        )
        .unwrap();

        let names: Vec<&str> = report.metrics.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["mse", "rmse", "r2"]);
        assert!((report.get_metric("mse").unwrap() - 1.0 / 3.0).abs() < 1e-12);
        assert!((report.get_metric("r2").unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(report.model_name, "LinearRegression");
        assert_eq!(report.evaluation_type, "regression");
    }

    #[test]
    fn first_failure_aborts() {
        let err = ModelEvaluator::evaluate(
            "LinearRegression",
            &MetricFactory::regression_defaults(),
            &[1.0, 2.0],
            &[1.0],
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::ShapeMismatch { .. }));
    }

    #[test]
    fn factory_knows_all_metrics() {
        for name in MetricFactory::available() {
            assert_eq!(MetricFactory::create(name).unwrap().get_name(), name);
        }
        assert!(MetricFactory::create("mae").is_err());
    }
}
