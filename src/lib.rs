//! Tréningový pipeline pre predikciu hodnotenia objednávok (review score):
//! načítanie CSV, čistenie, lineárna regresia a evaluácia.

pub mod config;
pub mod error;
pub mod data_loading;
pub mod processing;
pub mod models;
pub mod evaluation;
pub mod tracking;
pub mod pipeline;

pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use pipeline::{
    PipelineOutcome, PipelineState, TrainingPipeline, TrainingPipelineBuilder,
    TrainingPipelineDirector,
};
