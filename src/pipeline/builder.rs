use super::pipeline::TrainingPipeline;
use crate::config::ModelNameConfig;
use crate::data_loading::{DataLoader, DataLoaderFactory};
use crate::error::{PipelineError, Result};
use crate::evaluation::{Evaluation, MetricFactory};
use crate::models::ModelFactory;
use crate::processing::{DataCleaning, DataStrategy};
use crate::tracking::{MetricSink, NoopMetricSink};
use std::path::PathBuf;
use tracing::debug;

/// Builder pre konfiguráciu tréningového pipeline
pub struct TrainingPipelineBuilder {
    data_path: Option<PathBuf>,
    loader: Option<Box<dyn DataLoader>>,
    cleaning: DataCleaning,
    model_config: ModelNameConfig,
    metrics: Vec<Box<dyn Evaluation>>,
    sink: Option<Box<dyn MetricSink>>,
}

impl TrainingPipelineBuilder {
    pub fn new() -> Self {
        Self {
            data_path: None,
            loader: None,
            cleaning: DataCleaning::new(),
            model_config: ModelNameConfig::default(),
            metrics: Vec::new(),
            sink: None,
        }
    }

    /// Cesta k zdrojovému súboru
    pub fn data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = Some(path.into());
        self
    }

    /// Nastaví loader; bez neho sa vyberie podľa prípony súboru
    pub fn loader(mut self, loader: Box<dyn DataLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Nahradí celý reťazec čistenia
    pub fn cleaning(mut self, cleaning: DataCleaning) -> Self {
        self.cleaning = cleaning;
        self
    }

    /// Pridá krok na koniec reťazca čistenia
    pub fn cleaning_step(mut self, step: Box<dyn DataStrategy>) -> Self {
        self.cleaning.add_mut(step);
        self
    }

    pub fn model(mut self, model_name: &str) -> Self {
        self.model_config.model_name = model_name.to_string();
        self
    }

    pub fn model_config(mut self, config: ModelNameConfig) -> Self {
        self.model_config = config;
        self
    }

    /// Pridá metriku; bez metrík sa použijú mse, rmse, r2
    pub fn metric(mut self, metric: Box<dyn Evaluation>) -> Self {
        self.metrics.push(metric);
        self
    }

    pub fn sink(mut self, sink: Box<dyn MetricSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Vytvorí pipeline; všetky chyby konfigurácie sa ohlásia tu, nie až pri behu
    pub fn build(self) -> Result<TrainingPipeline> {
        let model = ModelFactory::from_config(&self.model_config)?;

        let data_path = self
            .data_path
            .ok_or_else(|| PipelineError::InvalidConfig("data path is not set".to_string()))?;

        self.cleaning.validate()?;

        let loader = match self.loader {
            Some(loader) => loader,
            None => DataLoaderFactory::create_from_path(&data_path, None, &[])?,
        };

        let metrics = if self.metrics.is_empty() {
            MetricFactory::regression_defaults()
        } else {
            self.metrics
        };
        for required in ["r2", "rmse"] {
            if !metrics.iter().any(|m| m.get_name() == required) {
                return Err(PipelineError::InvalidConfig(format!(
                    "metric {} is required for the pipeline outcome",
                    required
                )));
            }
        }

        let sink = self.sink.unwrap_or_else(|| Box::new(NoopMetricSink));

        debug!(
            path = %data_path.display(),
            steps = ?self.cleaning.step_names(),
            model = model.get_name(),
            sink = sink.get_name(),
            "pipeline built"
        );

        Ok(TrainingPipeline::new(
            data_path,
            loader,
            self.cleaning,
            model,
            metrics,
            sink,
        ))
    }
}

impl Default for TrainingPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
