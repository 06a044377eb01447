//! Frame extraction at AI-flagged timestamps.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};
use crate::probe::probe_duration;

/// JPEG quality used for extracted stills (`-q:v`, lower is better).
const FRAME_JPEG_QUALITY: u8 = 2;

/// Compute `n` evenly spaced timestamps across a duration.
///
/// `interval = duration / (n + 1)`, `ts_i = interval * (i + 1)`, so the
/// samples are strictly increasing and never touch either endpoint.
pub fn sample_timestamps(duration: f64, n: usize) -> Vec<f64> {
    if duration <= 0.0 || n == 0 {
        return Vec::new();
    }

    let interval = duration / (n as f64 + 1.0);
    (0..n).map(|i| interval * (i as f64 + 1.0)).collect()
}

/// Extract a single frame at a timestamp.
pub async fn extract_frame_at(
    input: impl AsRef<Path>,
    timestamp: f64,
    output: impl AsRef<Path>,
) -> MediaResult<()> {
    let cmd = FfmpegCommand::new(input.as_ref(), output.as_ref())
        .seek(timestamp.max(0.0))
        .single_frame()
        .quality(FRAME_JPEG_QUALITY);

    FfmpegRunner::new().run(&cmd).await
}

/// A still extracted for AI analysis, with the timestamp it was taken at.
#[derive(Debug, Clone)]
pub struct AnalysisFrame {
    pub path: PathBuf,
    pub timestamp: f64,
}

/// Extract `n` evenly spaced stills for AI analysis.
///
/// Returns the frames that were produced; individual extraction failures are
/// logged and skipped.
pub async fn extract_analysis_frames(
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    n: usize,
) -> MediaResult<Vec<AnalysisFrame>> {
    let input = input.as_ref();
    let output_dir = output_dir.as_ref();

    let duration = probe_duration(input).await?;
    let timestamps = sample_timestamps(duration, n);

    fs::create_dir_all(output_dir).await?;

    let mut frames = Vec::new();
    for (i, ts) in timestamps.iter().enumerate() {
        let frame_path = output_dir.join(format!("frame_{:03}_{:.1}s.jpg", i, ts));
        match extract_frame_at(input, *ts, &frame_path).await {
            Ok(()) => {
                info!("Extracted analysis frame {}/{} at {:.1}s", i + 1, n, ts);
                frames.push(AnalysisFrame {
                    path: frame_path,
                    timestamp: *ts,
                });
            }
            Err(e) => warn!("Failed to extract frame at {:.1}s: {}", ts, e),
        }
    }

    Ok(frames)
}

/// Interval-based frame extractor for flagged segments.
///
/// Returns frame counts; the pipeline only needs to know how much material
/// each segment produced.
#[derive(Debug, Clone)]
pub struct FrameExtractor {
    /// Seconds between consecutive frames
    frame_interval_secs: f64,
    /// Hard cap on frames per extraction window
    max_frames: usize,
}

impl FrameExtractor {
    /// Create an extractor.
    pub fn new(frame_interval_secs: f64, max_frames: usize) -> Self {
        Self {
            frame_interval_secs: frame_interval_secs.max(0.001),
            max_frames,
        }
    }

    /// Timestamps covered by a `[start, end]` window at the configured
    /// interval, capped at `max_frames`.
    pub fn window_timestamps(&self, start: f64, end: f64) -> Vec<f64> {
        let start = start.max(0.0);
        if end < start || self.max_frames == 0 {
            return Vec::new();
        }

        let mut timestamps = Vec::new();
        let mut ts = start;
        while ts <= end + 1e-9 && timestamps.len() < self.max_frames {
            timestamps.push(ts);
            ts += self.frame_interval_secs;
        }
        timestamps
    }

    /// Extract frames for one window into `output_dir`, returning how many
    /// frames were written. Individual frame failures are logged and skipped.
    pub async fn extract_frames(
        &self,
        input: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
        start: f64,
        end: f64,
    ) -> MediaResult<usize> {
        let input = input.as_ref();
        let output_dir = output_dir.as_ref();

        if !input.exists() {
            return Err(MediaError::FileNotFound(input.to_path_buf()));
        }

        fs::create_dir_all(output_dir).await?;

        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "video".to_string());

        let mut count = 0;
        for (i, ts) in self.window_timestamps(start, end).iter().enumerate() {
            let frame_path = output_dir.join(format!("{}_frame{}.jpg", stem, i + 1));
            match extract_frame_at(input, *ts, &frame_path).await {
                Ok(()) => count += 1,
                Err(e) => warn!("Failed to extract frame at {:.1}s: {}", ts, e),
            }
        }

        info!(
            "Extracted {} frames for {:.1}s-{:.1}s into {}",
            count,
            start,
            end,
            output_dir.display()
        );
        Ok(count)
    }
}
