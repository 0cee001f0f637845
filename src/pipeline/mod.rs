pub mod steps;
pub mod pipeline;
pub mod builder;
pub mod director;

#[cfg(test)]
pub(crate) mod fixtures;

pub use steps::{clean_data, evaluate_model, ingest_data, log_scores, train_model};
pub use pipeline::{PipelineInfo, PipelineOutcome, PipelineState, TrainingPipeline};
pub use builder::TrainingPipelineBuilder;
pub use director::{PresetInfo, TrainingPipelineDirector};
