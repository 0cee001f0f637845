pub mod strategies;
pub mod evaluator;
pub mod metrics;

pub use strategies::{Evaluation, Mse, R2, Rmse};
pub use evaluator::{MetricFactory, ModelEvaluator};
pub use metrics::EvaluationReport;
