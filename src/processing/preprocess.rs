use super::{CleaningOutput, DataStrategy};
use crate::config::PreprocessConfig;
use crate::data_loading::{Column, Table};
use crate::error::{PipelineError, Result};
use tracing::{debug, error, info};

/// Preprocess stratégia: zahodí nepotrebné stĺpce, doplní chýbajúce hodnoty
/// a ponechá len číselné prediktory.
pub struct DataPreProcessStrategy {
    config: PreprocessConfig,
}

impl DataPreProcessStrategy {
    pub fn new(config: PreprocessConfig) -> Self {
        Self { config }
    }

    fn preprocess(&self, mut data: Table) -> Result<Table> {
        data.drop_columns(self.config.drop_columns.as_slice())?;

        // Mediány sa počítajú naraz zo stavu po zahodení stĺpcov
        let medians = self
            .config
            .median_fill_columns
            .iter()
            .map(|name| Ok((name, calculate_column_median(&data, name)?)))
            .collect::<Result<Vec<_>>>()?;

        for (name, median) in medians {
            debug!(column = %name, median, "filling missing values with median");
            fill_numeric(&mut data, name, median)?;
        }

        fill_text(
            &mut data,
            &self.config.text_fill_column,
            &self.config.text_placeholder,
        )?;

        let mut data = data.select_numeric();
        data.drop_columns(self.config.identifier_columns.as_slice())?;
        Ok(data)
    }
}

impl Default for DataPreProcessStrategy {
    fn default() -> Self {
        Self::new(PreprocessConfig::default())
    }
}

impl DataStrategy for DataPreProcessStrategy {
    fn get_name(&self) -> &str {
        "preprocess"
    }

    fn handle_data(&self, data: Table) -> Result<CleaningOutput> {
        let (rows, cols) = data.shape();
        let cleaned = self.preprocess(data).inspect_err(|err| {
            error!(strategy = self.get_name(), error = %err, "error in preprocessing data");
        })?;
        info!(
            rows,
            columns_before = cols,
            columns_after = cleaned.n_cols(),
            "data preprocessing finished"
        );
        Ok(CleaningOutput::Table(cleaned))
    }
}

/// Medián nechýbajúcich hodnôt; pri párnom počte priemer dvoch stredných
fn calculate_column_median(data: &Table, name: &str) -> Result<f64> {
    let values = match data.require(name)? {
        Column::Numeric(values) => values,
        Column::Text(_) => {
            return Err(PipelineError::Schema(format!(
                "column '{}' is text, cannot compute a median",
                name
            )))
        }
    };

    let mut present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return Err(PipelineError::Schema(format!(
            "column '{}' has no values to compute a median",
            name
        )));
    }

    present.sort_by(f64::total_cmp);
    let mid = present.len() / 2;
    if present.len() % 2 == 0 {
        Ok((present[mid - 1] + present[mid]) / 2.0)
    } else {
        Ok(present[mid])
    }
}

fn fill_numeric(data: &mut Table, name: &str, value: f64) -> Result<()> {
    let filled = match data.require(name)? {
        Column::Numeric(values) => values.iter().map(|v| Some(v.unwrap_or(value))).collect(),
        Column::Text(_) => {
            return Err(PipelineError::Schema(format!(
                "column '{}' is text, expected numeric",
                name
            )))
        }
    };
    data.replace_column(name, Column::Numeric(filled))
}

/// Doplní placeholder do textového stĺpca. Stĺpec odvodený ako číselný
/// (napr. úplne prázdny) sa najprv prevedie na text.
fn fill_text(data: &mut Table, name: &str, placeholder: &str) -> Result<()> {
    let filled = match data.require(name)? {
        Column::Text(values) => values
            .iter()
            .map(|v| Some(v.clone().unwrap_or_else(|| placeholder.to_string())))
            .collect(),
        Column::Numeric(values) => values
            .iter()
            .map(|v| Some(v.map_or_else(|| placeholder.to_string(), |n| n.to_string())))
            .collect(),
    };
    data.replace_column(name, Column::Text(filled))
}
