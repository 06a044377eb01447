//! AI client error types.
//!
//! Transport failures, API rejections, empty replies and parse failures are
//! distinct outcomes; this client never substitutes fallback data itself,
//! the caller chooses what each failure class means for the pipeline.

use thiserror::Error;

pub type AiResult<T> = Result<T, AiError>;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("AI transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("AI endpoint returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("No content in AI response")]
    EmptyResponse,

    #[error("Failed to parse AI reply as JSON: {source}")]
    Parse {
        source: serde_json::Error,
        /// The raw reply text, preserved for diagnostics
        raw: String,
    },

    #[error("Inline payload too large: {size} bytes (limit {limit})")]
    PayloadTooLarge { size: u64, limit: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AiError {
    /// True for failures of the endpoint or the wire, where a caller may
    /// reasonably substitute a fallback analysis and continue.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Api { .. } | Self::EmptyResponse | Self::Io(_)
        )
    }

    /// True when the model replied but the reply was not usable JSON.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}
