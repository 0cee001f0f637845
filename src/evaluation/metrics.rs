use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Výsledky evaluácie jedného modelu; metriky v poradí, v akom vznikli
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub metrics: IndexMap<String, f64>,
    pub model_name: String,
    pub evaluation_type: String,
}

impl EvaluationReport {
    pub fn new(model_name: String, evaluation_type: String) -> Self {
        Self {
            metrics: IndexMap::new(),
            model_name,
            evaluation_type,
        }
    }

    pub fn add_metric(&mut self, name: String, value: f64) {
        self.metrics.insert(name, value);
    }

    pub fn get_metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    pub fn get_all_metrics(&self) -> &IndexMap<String, f64> {
        &self.metrics
    }
}
