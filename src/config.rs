use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Jediný podporovaný model
pub const LINEAR_REGRESSION: &str = "LinearRegression";

/// Výber modelu podľa názvu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelNameConfig {
    pub model_name: String,
    /// Solver pre lineárnu regresiu: "qr" alebo "svd"
    pub solver: String,
}

impl Default for ModelNameConfig {
    fn default() -> Self {
        Self {
            model_name: LINEAR_REGRESSION.to_string(),
            solver: "qr".to_string(),
        }
    }
}

/// Nastavenia pre preprocess stratégiu.
///
/// Predvolené hodnoty zodpovedajú datasetu objednávok (Olist).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Časové stĺpce, ktoré sa nepoužívajú pri predikcii
    pub drop_columns: Vec<String>,
    /// Číselné stĺpce, kde sa chýbajúce hodnoty nahradia mediánom
    pub median_fill_columns: Vec<String>,
    /// Textový stĺpec, kde sa chýbajúce hodnoty nahradia placeholderom
    pub text_fill_column: String,
    pub text_placeholder: String,
    /// Číselné identifikátory, ktoré sa zahodia po výbere číselných stĺpcov
    pub identifier_columns: Vec<String>,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            drop_columns: strings(&[
                "order_approved_at",
                "order_delivered_carrier_date",
                "order_delivered_customer_date",
                "order_estimated_delivery_date",
                "order_purchase_timestamp",
            ]),
            median_fill_columns: strings(&[
                "product_weight_g",
                "product_length_cm",
                "product_height_cm",
                "product_width_cm",
            ]),
            text_fill_column: "review_comment_message".to_string(),
            text_placeholder: "No review".to_string(),
            identifier_columns: strings(&["customer_zip_code_prefix", "order_item_id"]),
        }
    }
}

/// Nastavenia pre train/test split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    pub label_column: String,
    pub test_size: f64,
    pub random_state: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            label_column: "review_score".to_string(),
            test_size: 0.2,
            random_state: 42,
        }
    }
}

/// Nastavenia pre zápis metrík
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub enabled: bool,
    pub metrics_path: PathBuf,
    pub experiment: String,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            metrics_path: PathBuf::from("mlruns/metrics.jsonl"),
            experiment: "customer_satisfaction".to_string(),
        }
    }
}

/// Kompletná konfigurácia jedného behu pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PipelineConfig {
    pub model: ModelNameConfig,
    pub preprocess: PreprocessConfig,
    pub split: SplitConfig,
    pub tracking: TrackingConfig,
    /// Oddeľovač stĺpcov; `None` znamená odvodiť z prípony súboru
    pub delimiter: Option<char>,
}

impl PipelineConfig {
    /// Načíta konfiguráciu z JSON súboru a overí ju
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => {
                PipelineError::NotFound(format!("config file {}", path.display()))
            }
            _ => PipelineError::Io(err),
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: PipelineConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Skontroluje hodnoty, ktoré serde nevie overiť
    pub fn validate(&self) -> Result<()> {
        let test_size = self.split.test_size;
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(PipelineError::InvalidConfig(format!(
                "test_size must be in (0, 1), got {}",
                test_size
            )));
        }
        if self.split.label_column.trim().is_empty() {
            return Err(PipelineError::InvalidConfig(
                "label_column must not be empty".to_string(),
            ));
        }
        if self.model.solver != "qr" && self.model.solver != "svd" {
            return Err(PipelineError::InvalidConfig(format!(
                "unknown solver '{}', supported: qr, svd",
                self.model.solver
            )));
        }
        if let Some(delimiter) = self.delimiter {
            if !delimiter.is_ascii() {
                return Err(PipelineError::InvalidConfig(format!(
                    "delimiter must be a single ASCII character, got '{}'",
                    delimiter
                )));
            }
        }
        Ok(())
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
