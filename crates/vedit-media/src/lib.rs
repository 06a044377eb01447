#![deny(unreachable_patterns)]
//! FFmpeg CLI wrapper for the vedit pipeline.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building with stderr capture
//! - FFprobe duration probing
//! - Single-frame and interval frame extraction
//! - Edit-plan compilation into escaped filter-graph expressions
//! - Enhanced-video rendering with verbatim-copy fallback

pub mod command;
pub mod error;
pub mod filters;
pub mod frames;
pub mod probe;
pub mod render;

pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use filters::{build_filter_graph, compile_directives, escape_drawtext, FilterDirective};
pub use frames::{
    extract_analysis_frames, extract_frame_at, sample_timestamps, AnalysisFrame, FrameExtractor,
};
pub use probe::probe_duration;
pub use render::{render_enhanced, render_enhanced_with, RenderOutcome};
