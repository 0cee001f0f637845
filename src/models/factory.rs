use super::{IModel, LinRegWrapper};
use crate::config::{ModelNameConfig, LINEAR_REGRESSION};
use crate::error::{PipelineError, Result};

/// Factory pre vytváranie modelov podľa názvu
pub struct ModelFactory;

impl ModelFactory {
    /// Vytvorí model na základe názvu
    pub fn create(model_type: &str) -> Result<Box<dyn IModel>> {
        match model_type {
            LINEAR_REGRESSION => Ok(Box::new(LinRegWrapper::new())),
            _ => Err(PipelineError::UnsupportedModel(model_type.to_string())),
        }
    }

    /// Vytvorí model z konfigurácie a nastaví jeho parametre
    pub fn from_config(config: &ModelNameConfig) -> Result<Box<dyn IModel>> {
        let mut model = Self::create(&config.model_name)?;
        model.set_param("solver", &config.solver)?;
        Ok(model)
    }

    /// Vráti zoznam všetkých dostupných modelov
    pub fn available_models() -> Vec<&'static str> {
        vec![LINEAR_REGRESSION]
    }

    /// Vráti popis modelu
    pub fn get_model_description(model_type: &str) -> Option<&'static str> {
        match model_type {
            LINEAR_REGRESSION => Some("Linear Regression - ordinary least squares with intercept"),
            _ => None,
        }
    }
}
