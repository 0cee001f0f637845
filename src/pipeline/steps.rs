//! Jednotlivé kroky tréningového workflow.
//!
//! Každý krok zaloguje svoj vstup, pri chybe zaloguje kontext a chybu vráti
//! nezmenenú. Kroky si nedržia žiadny stav.

use crate::data_loading::{DataLoader, Table};
use crate::error::Result;
use crate::evaluation::{Evaluation, EvaluationReport, ModelEvaluator};
use crate::models::{FittedModel, IModel};
use crate::processing::{CleaningOutput, DataCleaning, DataSplit};
use crate::tracking::MetricSink;
use std::path::Path;
use tracing::{error, info};

/// Načíta zdrojovú tabuľku
pub fn ingest_data(loader: &dyn DataLoader, data_path: &Path) -> Result<Table> {
    info!(path = %data_path.display(), loader = loader.get_name(), "ingesting data");
    let table = loader.load(data_path).inspect_err(|err| {
        error!(step = "ingest_data", error = %err, "error while ingesting data");
    })?;
    info!(rows = table.n_rows(), columns = table.n_cols(), "data ingested");
    Ok(table)
}

/// Prejde reťazec čistenia a vráti train/test split
pub fn clean_data(cleaning: &DataCleaning, data: Table) -> Result<DataSplit> {
    clean_data_with(cleaning, data, |_, _| {})
}

/// Ako [`clean_data`], `on_step` dostane výstup každého kroku reťazca
pub fn clean_data_with<F>(cleaning: &DataCleaning, data: Table, on_step: F) -> Result<DataSplit>
where
    F: FnMut(&str, &CleaningOutput),
{
    info!(steps = ?cleaning.step_names(), rows = data.n_rows(), "cleaning data");
    cleaning
        .validate()
        .and_then(|_| cleaning.handle_data_with(data, on_step))
        .and_then(CleaningOutput::into_split)
        .inspect_err(|err| {
            error!(step = "clean_data", error = %err, "error while cleaning data");
        })
}

/// Natrénuje model na trénovacej časti splitu
pub fn train_model(model: &dyn IModel, split: &DataSplit) -> Result<Box<dyn FittedModel>> {
    info!(
        model = model.get_name(),
        rows = split.x_train.n_rows(),
        features = split.x_train.n_cols(),
        "training model"
    );
    model.train(&split.x_train, &split.y_train).inspect_err(|err| {
        error!(step = "train_model", error = %err, "error while training model");
    })
}

/// Predikuje testovaciu časť a vyhodnotí ju zadanými metrikami
pub fn evaluate_model(
    model: &dyn FittedModel,
    metrics: &[Box<dyn Evaluation>],
    split: &DataSplit,
) -> Result<EvaluationReport> {
    info!(model = model.get_name(), rows = split.x_test.n_rows(), "evaluating model");
    model
        .predict(&split.x_test)
        .and_then(|predictions| {
            ModelEvaluator::evaluate(model.get_name(), metrics, &split.y_test, &predictions)
        })
        .inspect_err(|err| {
            error!(step = "evaluate_model", error = %err, "error while evaluating model");
        })
}

/// Pošle každú metriku z reportu do sinku, v poradí výpočtu
pub fn log_scores(sink: &mut dyn MetricSink, report: &EvaluationReport) -> Result<()> {
    for (name, value) in report.get_all_metrics() {
        sink.log_metric(name, *value).inspect_err(|err| {
            error!(step = "log_scores", sink = sink.get_name(), metric = %name, error = %err, "error while logging metric");
        })?;
    }
    Ok(())
}
