use super::MetricSink;
use crate::error::{PipelineError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// Jeden riadok v súbore metrík
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub experiment: String,
    pub run_id: Uuid,
    pub metric: String,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
}

/// Zapisuje každú metriku ako jeden JSON objekt na riadok (append)
pub struct JsonlMetricSink {
    path: PathBuf,
    experiment: String,
    run_id: Uuid,
    writer: File,
}

impl JsonlMetricSink {
    /// Otvorí (alebo vytvorí) súbor metrík aj s nadradeným adresárom
    pub fn new(path: impl Into<PathBuf>, experiment: &str) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| {
                PipelineError::Tracking(format!(
                    "creating metrics dir {}: {}",
                    parent.display(),
                    err
                ))
            })?;
        }
        let writer = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|err| {
                PipelineError::Tracking(format!("opening metrics file {}: {}", path.display(), err))
            })?;

        let run_id = Uuid::new_v4();
        info!(path = %path.display(), experiment, run_id = %run_id, "metric tracking enabled");
        Ok(Self {
            path,
            experiment: experiment.to_string(),
            run_id,
            writer,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Načíta všetky záznamy zo súboru metrík
    pub fn read_records(path: &Path) -> Result<Vec<MetricRecord>> {
        let text = fs::read_to_string(path).map_err(|err| {
            PipelineError::Tracking(format!("reading metrics file {}: {}", path.display(), err))
        })?;
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .map_err(|err| PipelineError::Tracking(format!("malformed metric record: {}", err)))
            })
            .collect()
    }
}

impl MetricSink for JsonlMetricSink {
    fn get_name(&self) -> &str {
        "jsonl"
    }

    fn log_metric(&mut self, name: &str, value: f64) -> Result<()> {
        // JSON nemá NaN ani nekonečno, serde_json by zapísal null
        if !value.is_finite() {
            return Err(PipelineError::Tracking(format!(
                "metric {} has non-finite value {}",
                name, value
            )));
        }
        let record = MetricRecord {
            experiment: self.experiment.clone(),
            run_id: self.run_id,
            metric: name.to_string(),
            value,
            timestamp: Utc::now(),
        };
        let mut line = serde_json::to_vec(&record)
            .map_err(|err| PipelineError::Tracking(err.to_string()))?;
        line.push(b'\n');
        self.writer
            .write_all(&line)
            .and_then(|_| self.writer.flush())
            .map_err(|err| {
                PipelineError::Tracking(format!("writing to {}: {}", self.path.display(), err))
            })?;
        debug!(metric = name, value, "metric logged");
        Ok(())
    }
}
