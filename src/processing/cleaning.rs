use super::{CleaningOutput, DataSplit, DataStrategy};
use crate::data_loading::Table;
use crate::error::{PipelineError, Result};
use tracing::{error, info};

/// Reťazec stratégií čistenia, ktoré sa aplikujú v danom poradí.
///
/// Každá stratégia dostane výstup predchádzajúcej. Stratégia, ktorá vracia
/// split, môže byť len posledná.
pub struct DataCleaning {
    strategies: Vec<Box<dyn DataStrategy>>,
}

impl DataCleaning {
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    pub fn add(mut self, strategy: Box<dyn DataStrategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    pub fn add_mut(&mut self, strategy: Box<dyn DataStrategy>) {
        self.strategies.push(strategy);
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.get_name()).collect()
    }

    /// Overí, že reťazec končí splitom a split nie je nikde inde
    pub fn validate(&self) -> Result<()> {
        let last = self.strategies.last().ok_or_else(|| {
            PipelineError::InvalidConfig("cleaning chain is empty".to_string())
        })?;
        if !last.produces_split() {
            return Err(PipelineError::InvalidConfig(format!(
                "cleaning chain must end with a split step, ends with '{}'",
                last.get_name()
            )));
        }
        if let Some(early) = self.strategies[..self.len() - 1]
            .iter()
            .find(|s| s.produces_split())
        {
            return Err(PipelineError::InvalidConfig(format!(
                "split step '{}' must be the last cleaning step",
                early.get_name()
            )));
        }
        Ok(())
    }

    /// Spustí všetky kroky; `observer` dostane názov a výstup každého kroku
    pub fn handle_data_with<F>(&self, data: Table, mut observer: F) -> Result<CleaningOutput>
    where
        F: FnMut(&str, &CleaningOutput),
    {
        let mut current = CleaningOutput::Table(data);
        for strategy in &self.strategies {
            let input = current.into_table().inspect_err(|err| {
                error!(step = strategy.get_name(), error = %err, "cleaning step received split data");
            })?;
            current = strategy.handle_data(input)?;
            observer(strategy.get_name(), &current);
        }
        Ok(current)
    }

    pub fn handle_data(&self, data: Table) -> Result<CleaningOutput> {
        self.handle_data_with(data, |_, _| {})
    }

    /// Spustí reťazec a vráti výsledný split
    pub fn split(&self, data: Table) -> Result<DataSplit> {
        self.validate()?;
        let split = self.handle_data(data)?.into_split()?;
        info!(steps = ?self.step_names(), "data cleaning completed");
        Ok(split)
    }
}

impl Default for DataCleaning {
    fn default() -> Self {
        Self::new()
    }
}
