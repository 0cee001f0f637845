use super::{DataCleaning, DataPreProcessStrategy, DataSplitStrategy, DataStrategy};
use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};

/// Factory pre vytváranie stratégií čistenia podľa názvu
pub struct ProcessorFactory;

impl ProcessorFactory {
    /// Vytvorí stratégiu na základe názvu
    pub fn create(strategy_type: &str, config: &PipelineConfig) -> Result<Box<dyn DataStrategy>> {
        match strategy_type {
            "preprocess" => Ok(Box::new(DataPreProcessStrategy::new(config.preprocess.clone()))),
            "split" => Ok(Box::new(DataSplitStrategy::new(config.split.clone()))),
            _ => Err(PipelineError::InvalidConfig(format!(
                "unknown cleaning strategy: {}",
                strategy_type
            ))),
        }
    }

    /// Vytvorí reťazec stratégií z viacerých názvov
    pub fn create_chain(strategy_types: &[&str], config: &PipelineConfig) -> Result<DataCleaning> {
        let mut chain = DataCleaning::new();
        for strategy_type in strategy_types {
            chain.add_mut(Self::create(strategy_type, config)?);
        }
        chain.validate()?;
        Ok(chain)
    }

    /// Vráti zoznam všetkých dostupných stratégií
    pub fn available() -> Vec<&'static str> {
        vec!["preprocess", "split"]
    }

    /// Vráti popis stratégie
    pub fn get_description(strategy_type: &str) -> Option<&'static str> {
        match strategy_type {
            "preprocess" => Some("Preprocess - drop timestamps, fill missing values, keep numeric predictors"),
            "split" => Some("Split - separate the label and partition rows into train/test"),
            _ => None,
        }
    }
}
