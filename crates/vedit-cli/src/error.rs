//! Pipeline error types.

use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("AI analysis failed: {0}")]
    Analysis(#[from] vedit_ai::AiError),

    #[error("Media error: {0}")]
    Media(#[from] vedit_media::MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
