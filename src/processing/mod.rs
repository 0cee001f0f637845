use crate::data_loading::Table;
use crate::error::{PipelineError, Result};

/// Stratégia čistenia dát: z tabuľky spraví vyčistenú tabuľku alebo train/test split.
///
/// Stratégia si medzi volaniami nedrží žiadny stav.
pub trait DataStrategy {
    fn get_name(&self) -> &str;

    fn handle_data(&self, data: Table) -> Result<CleaningOutput>;

    /// `true`, ak výsledkom je `CleaningOutput::Split`
    fn produces_split(&self) -> bool {
        false
    }
}

/// Výsledok jedného kroku čistenia
#[derive(Debug, Clone)]
pub enum CleaningOutput {
    Table(Table),
    Split(DataSplit),
}

impl CleaningOutput {
    pub fn into_table(self) -> Result<Table> {
        match self {
            CleaningOutput::Table(table) => Ok(table),
            CleaningOutput::Split(_) => Err(PipelineError::InvalidConfig(
                "expected a cleaned table, got a train/test split".to_string(),
            )),
        }
    }

    pub fn into_split(self) -> Result<DataSplit> {
        match self {
            CleaningOutput::Split(split) => Ok(split),
            CleaningOutput::Table(_) => Err(PipelineError::InvalidConfig(
                "cleaning chain did not produce a train/test split".to_string(),
            )),
        }
    }
}

pub mod preprocess;
pub mod split;
pub mod cleaning;
pub mod factory;

pub use preprocess::DataPreProcessStrategy;
pub use split::{DataSplit, DataSplitStrategy};
pub use cleaning::DataCleaning;
pub use factory::ProcessorFactory;
