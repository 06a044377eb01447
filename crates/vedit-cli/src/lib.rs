//! AI-assisted video enhancement pipeline.
//!
//! Library surface for the `vedit` binary: configuration, the pipeline
//! processor, and the pipeline error type.

pub mod config;
pub mod error;
pub mod processor;

pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use processor::Processor;
