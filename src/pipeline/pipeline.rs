use super::builder::TrainingPipelineBuilder;
use super::steps;
use crate::data_loading::DataLoader;
use crate::error::{PipelineError, Result};
use crate::evaluation::{Evaluation, EvaluationReport};
use crate::models::IModel;
use crate::processing::{CleaningOutput, DataCleaning};
use crate::tracking::MetricSink;
use std::fmt;
use std::path::PathBuf;
use tracing::{error, info};

/// Stav tréningového behu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Ingested,
    Cleaned,
    Split,
    Trained,
    Evaluated,
    Done,
    Failed,
}

impl PipelineState {
    /// Beh skončil úspechom alebo chybou a nedá sa spustiť znova
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed)
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Idle => "idle",
            PipelineState::Ingested => "ingested",
            PipelineState::Cleaned => "cleaned",
            PipelineState::Split => "split",
            PipelineState::Trained => "trained",
            PipelineState::Evaluated => "evaluated",
            PipelineState::Done => "done",
            PipelineState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Aktuálny stav a všetky stavy, ktorými beh prešiel
#[derive(Debug, Clone)]
struct StateMachine {
    state: PipelineState,
    history: Vec<PipelineState>,
}

impl StateMachine {
    fn new() -> Self {
        Self {
            state: PipelineState::Idle,
            history: vec![PipelineState::Idle],
        }
    }

    fn advance(&mut self, next: PipelineState) {
        if self.state == next {
            return;
        }
        info!(from = %self.state, to = %next, "pipeline state changed");
        self.state = next;
        self.history.push(next);
    }
}

/// Výsledok úspešného behu
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutcome {
    pub r2_score: f64,
    pub rmse: f64,
    pub report: EvaluationReport,
    pub train_rows: usize,
    pub test_rows: usize,
}

/// Facade nad celým workflow: ingest -> čistenie -> tréning -> evaluácia.
///
/// Beží raz. Prvá chyba ktoréhokoľvek kroku presunie pipeline do stavu
/// `Failed` a vráti sa volajúcemu nezmenená.
pub struct TrainingPipeline {
    pub(crate) data_path: PathBuf,
    pub(crate) loader: Box<dyn DataLoader>,
    pub(crate) cleaning: DataCleaning,
    pub(crate) model: Box<dyn IModel>,
    pub(crate) metrics: Vec<Box<dyn Evaluation>>,
    pub(crate) sink: Box<dyn MetricSink>,
    machine: StateMachine,
}

impl TrainingPipeline {
    pub fn builder() -> TrainingPipelineBuilder {
        TrainingPipelineBuilder::new()
    }

    pub(crate) fn new(
        data_path: PathBuf,
        loader: Box<dyn DataLoader>,
        cleaning: DataCleaning,
        model: Box<dyn IModel>,
        metrics: Vec<Box<dyn Evaluation>>,
        sink: Box<dyn MetricSink>,
    ) -> Self {
        Self {
            data_path,
            loader,
            cleaning,
            model,
            metrics,
            sink,
            machine: StateMachine::new(),
        }
    }

    pub fn state(&self) -> PipelineState {
        self.machine.state
    }

    pub fn history(&self) -> &[PipelineState] {
        &self.machine.history
    }

    pub fn info(&self) -> PipelineInfo {
        PipelineInfo {
            data_path: self.data_path.clone(),
            loader: self.loader.get_name().to_string(),
            cleaning_steps: self
                .cleaning
                .step_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            model: self.model.get_name().to_string(),
            metrics: self.metrics.iter().map(|m| m.get_name().to_string()).collect(),
            sink: self.sink.get_name().to_string(),
        }
    }

    /// Spustí celý workflow a vráti R² a RMSE na testovacej časti
    pub fn run(&mut self) -> Result<PipelineOutcome> {
        if self.machine.state.is_terminal() {
            return Err(PipelineError::InvalidConfig(format!(
                "pipeline already ran and is {}",
                self.machine.state
            )));
        }

        match self.execute() {
            Ok(outcome) => {
                self.machine.advance(PipelineState::Done);
                info!(
                    r2 = outcome.r2_score,
                    rmse = outcome.rmse,
                    train_rows = outcome.train_rows,
                    test_rows = outcome.test_rows,
                    "pipeline finished"
                );
                Ok(outcome)
            }
            Err(err) => {
                error!(state = %self.machine.state, kind = err.kind(), error = %err, "pipeline failed");
                self.machine.advance(PipelineState::Failed);
                Err(err)
            }
        }
    }

    fn execute(&mut self) -> Result<PipelineOutcome> {
        let data = steps::ingest_data(self.loader.as_ref(), &self.data_path)?;
        self.machine.advance(PipelineState::Ingested);

        let machine = &mut self.machine;
        let split = steps::clean_data_with(&self.cleaning, data, |_, output| match output {
            CleaningOutput::Table(_) => machine.advance(PipelineState::Cleaned),
            CleaningOutput::Split(_) => machine.advance(PipelineState::Split),
        })?;

        let model = steps::train_model(self.model.as_ref(), &split)?;
        self.machine.advance(PipelineState::Trained);

        let report = steps::evaluate_model(model.as_ref(), &self.metrics, &split)?;
        self.machine.advance(PipelineState::Evaluated);

        steps::log_scores(self.sink.as_mut(), &report)?;

        let score = |name: &str| {
            report.get_metric(name).ok_or_else(|| {
                PipelineError::InvalidConfig(format!("metric {} was not computed", name))
            })
        };
        Ok(PipelineOutcome {
            r2_score: score("r2")?,
            rmse: score("rmse")?,
            train_rows: split.y_train.len(),
            test_rows: split.y_test.len(),
            report,
        })
    }
}

/// Popis nakonfigurovaného pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineInfo {
    pub data_path: PathBuf,
    pub loader: String,
    pub cleaning_steps: Vec<String>,
    pub model: String,
    pub metrics: Vec<String>,
    pub sink: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_loading::CsvDataLoader;
    use crate::pipeline::fixtures;
    use crate::processing::{DataSplitStrategy, ProcessorFactory};
    use crate::tracking::InMemoryMetricSink;
    use tempfile::tempdir;

    struct FailingSink;

    impl MetricSink for FailingSink {
        fn get_name(&self) -> &str {
            "failing"
        }

        fn log_metric(&mut self, _name: &str, _value: f64) -> Result<()> {
            Err(PipelineError::Tracking("sink unavailable".to_string()))
        }
    }

    fn pipeline_for(path: PathBuf, sink: Box<dyn MetricSink>) -> TrainingPipeline {
        let config = fixtures::scenario_config();
        TrainingPipeline::builder()
            .data_path(path)
            .cleaning(ProcessorFactory::create_chain(&["preprocess", "split"], &config).unwrap())
            .sink(sink)
            .build()
            .unwrap()
    }

    #[test]
    fn end_to_end_scenario() {
        let dir = tempdir().unwrap();
        let path = fixtures::write_scenario_csv(dir.path(), 100);

        let mut pipeline = pipeline_for(path, Box::new(InMemoryMetricSink::new()));
        let outcome = pipeline.run().unwrap();

        assert_eq!(outcome.train_rows, 80);
        assert_eq!(outcome.test_rows, 20);
        assert!(outcome.r2_score.is_finite() && outcome.r2_score <= 1.0);
        assert!(outcome.rmse.is_finite() && outcome.rmse >= 0.0);
        assert_eq!(outcome.rmse, outcome.report.get_metric("mse").unwrap().sqrt());
        assert_eq!(outcome.report.model_name, "LinearRegression");
        assert_eq!(pipeline.state(), PipelineState::Done);
    }

    #[test]
    fn cleaned_split_has_no_missing_values() {
        let dir = tempdir().unwrap();
        let path = fixtures::write_scenario_csv(dir.path(), 100);
        let config = fixtures::scenario_config();

        let table = steps::ingest_data(&CsvDataLoader::new(), &path).unwrap();
        assert_eq!(table.require("product_weight_g").unwrap().null_count(), 5);

        let chain = ProcessorFactory::create_chain(&["preprocess", "split"], &config).unwrap();
        let split = steps::clean_data(&chain, table).unwrap();
        assert_eq!(split.x_train.n_rows(), 80);
        assert_eq!(split.x_test.n_rows(), 20);
        assert_eq!(split.x_train.null_count(), 0);
        assert_eq!(split.x_test.null_count(), 0);
        assert!(split.x_train.column("review_score").is_none());
        assert!(split.x_train.column("order_item_id").is_none());
    }

    #[test]
    fn walks_every_state() {
        let dir = tempdir().unwrap();
        let path = fixtures::write_scenario_csv(dir.path(), 60);

        let mut pipeline = pipeline_for(path, Box::new(InMemoryMetricSink::new()));
        assert_eq!(pipeline.state(), PipelineState::Idle);
        pipeline.run().unwrap();

        assert_eq!(
            pipeline.history(),
            &[
                PipelineState::Idle,
                PipelineState::Ingested,
                PipelineState::Cleaned,
                PipelineState::Split,
                PipelineState::Trained,
                PipelineState::Evaluated,
                PipelineState::Done,
            ]
        );
    }

    #[test]
    fn split_only_chain_skips_cleaned_state() {
        let dir = tempdir().unwrap();
        let path = fixtures::write_numeric_csv(dir.path(), 30);

        let mut pipeline = TrainingPipeline::builder()
            .data_path(path)
            .cleaning_step(Box::new(DataSplitStrategy::default()))
            .build()
            .unwrap();
        pipeline.run().unwrap();

        assert!(!pipeline.history().contains(&PipelineState::Cleaned));
        assert!(pipeline.history().contains(&PipelineState::Split));
    }

    #[test]
    fn scores_are_forwarded_to_sink() {
        let dir = tempdir().unwrap();
        let path = fixtures::write_scenario_csv(dir.path(), 100);
        let sink = InMemoryMetricSink::new();

        let outcome = pipeline_for(path, Box::new(sink.clone())).run().unwrap();

        let names: Vec<String> = sink.records().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["mse", "rmse", "r2"]);
        assert_eq!(sink.get("r2"), Some(outcome.r2_score));
        assert_eq!(sink.get("rmse"), Some(outcome.rmse));
    }

    #[test]
    fn sink_does_not_change_results() {
        let dir = tempdir().unwrap();
        let path = fixtures::write_scenario_csv(dir.path(), 100);

        let tracked = pipeline_for(path.clone(), Box::new(InMemoryMetricSink::new()))
            .run()
            .unwrap();
        let untracked = TrainingPipeline::builder()
            .data_path(path)
            .cleaning(
                ProcessorFactory::create_chain(&["preprocess", "split"], &fixtures::scenario_config())
                    .unwrap(),
            )
            .build()
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(tracked, untracked);
    }

    #[test]
    fn sink_failure_fails_the_run() {
        let dir = tempdir().unwrap();
        let path = fixtures::write_scenario_csv(dir.path(), 100);

        let mut pipeline = pipeline_for(path, Box::new(FailingSink));
        assert!(matches!(pipeline.run(), Err(PipelineError::Tracking(_))));
        assert_eq!(pipeline.state(), PipelineState::Failed);
        assert_eq!(
            &pipeline.history()[pipeline.history().len() - 2..],
            &[PipelineState::Evaluated, PipelineState::Failed]
        );
    }

    #[test]
    fn missing_file_fails_before_ingest() {
        let dir = tempdir().unwrap();
        let sink = InMemoryMetricSink::new();
        let mut pipeline = pipeline_for(dir.path().join("absent.csv"), Box::new(sink.clone()));

        assert!(matches!(pipeline.run(), Err(PipelineError::NotFound(_))));
        assert_eq!(pipeline.history(), &[PipelineState::Idle, PipelineState::Failed]);
        assert!(sink.is_empty());
    }

    #[test]
    fn schema_error_stops_after_ingest() {
        let dir = tempdir().unwrap();
        let path = fixtures::write_numeric_csv(dir.path(), 30);

        // numerický súbor nemá stĺpce, ktoré preprocess zahadzuje
        let mut pipeline = pipeline_for(path, Box::new(InMemoryMetricSink::new()));
        assert!(matches!(pipeline.run(), Err(PipelineError::Schema(_))));
        assert_eq!(
            pipeline.history(),
            &[PipelineState::Idle, PipelineState::Ingested, PipelineState::Failed]
        );
    }

    #[test]
    fn second_run_is_rejected() {
        let dir = tempdir().unwrap();
        let path = fixtures::write_scenario_csv(dir.path(), 40);

        let mut pipeline = pipeline_for(path, Box::new(InMemoryMetricSink::new()));
        pipeline.run().unwrap();
        assert!(matches!(pipeline.run(), Err(PipelineError::InvalidConfig(_))));
        assert_eq!(pipeline.state(), PipelineState::Done);
    }

    #[test]
    fn failed_run_cannot_be_retried() {
        let dir = tempdir().unwrap();
        let mut pipeline = pipeline_for(dir.path().join("absent.csv"), Box::new(InMemoryMetricSink::new()));

        assert!(!pipeline.state().is_terminal());
        assert!(pipeline.run().is_err());
        assert!(pipeline.state().is_terminal());

        fixtures::write_scenario_csv(dir.path(), 40);
        std::fs::rename(dir.path().join("scenario.csv"), dir.path().join("absent.csv")).unwrap();
        assert!(matches!(pipeline.run(), Err(PipelineError::InvalidConfig(_))));
        assert_eq!(pipeline.history(), &[PipelineState::Idle, PipelineState::Failed]);
    }

    #[test]
    fn info_describes_configuration() {
        let pipeline = pipeline_for(PathBuf::from("orders.csv"), Box::new(InMemoryMetricSink::new()));
        let info = pipeline.info();
        assert_eq!(info.cleaning_steps, vec!["preprocess", "split"]);
        assert_eq!(info.model, "LinearRegression");
        assert_eq!(info.metrics, vec!["mse", "rmse", "r2"]);
        assert_eq!(info.sink, "in_memory");
        assert_eq!(info.loader, "CSV Data Loader");
    }
}
