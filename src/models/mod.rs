use crate::data_loading::Table;
use crate::error::Result;

/// Stratégia modelu: z trénovacích dát vyrobí natrénovaný model
pub trait IModel {
    fn get_name(&self) -> &str;

    fn get_supported_params(&self) -> Vec<&str>;

    fn set_param(&mut self, key: &str, value: &str) -> Result<()>;

    /// Natrénuje nový model; stratégia sa tým nemení
    fn train(&self, x_train: &Table, y_train: &[f64]) -> Result<Box<dyn FittedModel>>;
}

/// Natrénovaný model, po vytvorení sa už nemení
pub trait FittedModel {
    fn get_name(&self) -> &str;

    /// Stĺpce, na ktorých bol model natrénovaný (v poradí)
    fn feature_names(&self) -> &[String];

    fn predict(&self, x: &Table) -> Result<Vec<f64>>;
}

pub mod linreg;
pub mod factory;

pub use linreg::{LinRegWrapper, LinearRegressionModel};
pub use factory::ModelFactory;
