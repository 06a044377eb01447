//! Pipeline configuration.

use std::path::PathBuf;

use vedit_ai::{DEFAULT_MODEL, DEFAULT_TEMPERATURE};

/// Configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// AI model identifier
    pub model: String,
    /// Sampling temperature for the analysis request
    pub temperature: f64,
    /// Seconds between consecutive frames within a flagged segment
    pub frame_interval_secs: f64,
    /// Hard cap on frames per segment
    pub max_frames: usize,
    /// Container extension for the rendered output
    pub output_format: String,
    /// Root directory for rendered output and extracted frames
    pub output_dir: PathBuf,
    /// Attach the video itself to the analysis request
    pub attach_video: bool,
    /// Number of evenly spaced stills to attach instead (0 = none)
    pub analysis_frames: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            frame_interval_secs: 1.0,
            max_frames: 5000,
            output_format: "mp4".to_string(),
            output_dir: PathBuf::from("./output"),
            attach_video: false,
            analysis_frames: 0,
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            model: std::env::var("VEDIT_MODEL").unwrap_or(defaults.model),
            temperature: std::env::var("VEDIT_TEMPERATURE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.temperature),
            frame_interval_secs: std::env::var("VEDIT_FRAME_INTERVAL")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.frame_interval_secs),
            max_frames: std::env::var("VEDIT_MAX_FRAMES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_frames),
            output_format: std::env::var("VEDIT_OUTPUT_FORMAT").unwrap_or(defaults.output_format),
            output_dir: std::env::var("VEDIT_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            attach_video: defaults.attach_video,
            analysis_frames: defaults.analysis_frames,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.frame_interval_secs, 1.0);
        assert_eq!(config.max_frames, 5000);
        assert_eq!(config.output_format, "mp4");
        assert_eq!(config.output_dir, PathBuf::from("./output"));
        assert!(!config.attach_video);
    }
}
