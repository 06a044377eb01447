//! Client for the AI completion endpoint.
//!
//! This crate provides:
//! - Prompt construction with the fixed analysis reply schema
//! - Multimodal payload assembly (referenced video, inline frame stills)
//! - Fence-tolerant JSON reply parsing
//! - A typed failure taxonomy (transport vs. API vs. parse) so callers
//!   choose their own degradation policy
//! - The fixed fallback analysis for degraded/demo mode

pub mod client;
pub mod error;
pub mod fallback;
pub mod payload;
pub mod prompt;
pub mod types;

pub use client::{
    parse_analysis_reply, AiClient, AiClientConfig, AnalysisOptions, Attachment, FrameAttachment,
    DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
pub use error::{AiError, AiResult};
pub use fallback::fallback_analysis;
pub use payload::MAX_INLINE_PAYLOAD_BYTES;
