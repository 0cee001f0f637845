use super::builder::TrainingPipelineBuilder;
use super::pipeline::TrainingPipeline;
use crate::config::PipelineConfig;
use crate::data_loading::DataLoaderFactory;
use crate::error::{PipelineError, Result};
use crate::processing::ProcessorFactory;
use crate::tracking::{JsonlMetricSink, MetricSink, NoopMetricSink};
use serde::Serialize;
use std::path::PathBuf;

/// Director pre Builder pattern - hotové "recepty" na tréningový pipeline
pub struct TrainingPipelineDirector;

impl TrainingPipelineDirector {
    /// Celý workflow pre dataset objednávok:
    /// csv -> preprocess -> split -> LinearRegression -> mse/rmse/r2.
    /// Metriky idú do JSONL súboru, ak je tracking zapnutý.
    pub fn build_default(config: &PipelineConfig, data_path: impl Into<PathBuf>) -> Result<TrainingPipeline> {
        config.validate()?;
        let sink: Box<dyn MetricSink> = if config.tracking.enabled {
            Box::new(JsonlMetricSink::new(
                &config.tracking.metrics_path,
                &config.tracking.experiment,
            )?)
        } else {
            Box::new(NoopMetricSink)
        };
        Self::build_with_sink(config, data_path, sink)
    }

    /// Ako [`Self::build_default`], metriky idú do zadaného sinku
    pub fn build_with_sink(
        config: &PipelineConfig,
        data_path: impl Into<PathBuf>,
        sink: Box<dyn MetricSink>,
    ) -> Result<TrainingPipeline> {
        Self::build_preset("default", config, data_path.into(), sink)
    }

    /// Pre dáta, ktoré sú už číselné a čisté: iba split bez preprocessu
    pub fn build_numeric(config: &PipelineConfig, data_path: impl Into<PathBuf>) -> Result<TrainingPipeline> {
        Self::build_preset("numeric", config, data_path.into(), Box::new(NoopMetricSink))
    }

    /// Vytvorí pipeline podľa názvu receptu
    pub fn build_preset(
        preset: &str,
        config: &PipelineConfig,
        data_path: PathBuf,
        sink: Box<dyn MetricSink>,
    ) -> Result<TrainingPipeline> {
        config.validate()?;
        let info = Self::available_presets()
            .into_iter()
            .find(|p| p.name == preset)
            .ok_or_else(|| PipelineError::InvalidConfig(format!("unknown preset: {}", preset)))?;

        let loader = DataLoaderFactory::create_from_path(
            &data_path,
            config.delimiter,
            &Self::declared_numeric_columns(info.name, config),
        )?;
        let cleaning = ProcessorFactory::create_chain(info.cleaning_steps, config)?;

        TrainingPipelineBuilder::new()
            .data_path(data_path)
            .loader(loader)
            .cleaning(cleaning)
            .model_config(config.model.clone())
            .sink(sink)
            .build()
    }

    /// Stĺpce, ktoré recept očakáva ako čísla už pri načítaní.
    /// Preprocess pracuje s mediánmi a identifikátormi, split s labelom.
    fn declared_numeric_columns(preset: &str, config: &PipelineConfig) -> Vec<String> {
        let mut columns = vec![config.split.label_column.clone()];
        if preset == "default" {
            let preprocess = &config.preprocess;
            for column in preprocess.median_fill_columns.iter().chain(&preprocess.identifier_columns) {
                if !columns.contains(column) {
                    columns.push(column.clone());
                }
            }
        }
        columns
    }

    /// Vráti všetky dostupné predpripravené konfigurácie
    pub fn available_presets() -> Vec<PresetInfo> {
        vec![
            PresetInfo {
                name: "default",
                description: "Preprocess + split + Linear Regression (mse, rmse, r2)",
                cleaning_steps: &["preprocess", "split"],
            },
            PresetInfo {
                name: "numeric",
                description: "Split + Linear Regression pre už vyčistené číselné dáta",
                cleaning_steps: &["split"],
            },
        ]
    }
}

/// Informácie o predpripravenej konfigurácii
#[derive(Debug, Clone, Serialize)]
pub struct PresetInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub cleaning_steps: &'static [&'static str],
}
