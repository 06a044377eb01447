//! Shared data models for the vedit pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - The AI analysis schema (edit segments, overlay and effect suggestions)
//! - Analysis reports with mock/real provenance
//! - The terminal per-run processing result

pub mod analysis;
pub mod result;

// Re-export common types
pub use analysis::{
    AnalysisReport, EditKind, EditSegment, EffectKind, EffectSuggestion, OverlayPosition,
    TextOverlay, VideoAnalysis, DEFAULT_EDIT_WINDOW_SECS,
};
pub use result::ProcessingResult;
