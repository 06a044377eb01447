//! The main processing pipeline.
//!
//! Orchestrates analyze → targeted frame extraction → render. Everything
//! past a present input file degrades instead of aborting: AI transport
//! failures substitute the fixed fallback analysis, per-segment extraction
//! failures skip the segment, and render failures fall back to a verbatim
//! copy of the input.

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use vedit_ai::{
    fallback_analysis, AiClient, AiError, AnalysisOptions, Attachment, FrameAttachment,
};
use vedit_media::{
    extract_analysis_frames, render_enhanced_with, FfmpegRunner, FrameExtractor, RenderOutcome,
};
use vedit_models::{AnalysisReport, ProcessingResult, VideoAnalysis};

use crate::config::PipelineConfig;
use crate::error::PipelineResult;

/// Pipeline orchestrator for one or more runs.
pub struct Processor {
    config: PipelineConfig,
    ai: AiClient,
    runner: FfmpegRunner,
}

impl Processor {
    /// Create a processor with an environment-configured AI client.
    pub fn new(config: PipelineConfig) -> PipelineResult<Self> {
        let ai = AiClient::from_env()?;
        Ok(Self::with_client(config, ai))
    }

    /// Create a processor with an explicit AI client.
    pub fn with_client(config: PipelineConfig, ai: AiClient) -> Self {
        Self {
            config,
            ai,
            runner: FfmpegRunner::new(),
        }
    }

    /// Override the FFmpeg runner.
    pub fn with_runner(mut self, runner: FfmpegRunner) -> Self {
        self.runner = runner;
        self
    }

    /// Run the full pipeline for one input video.
    ///
    /// Never panics and never returns early with partial state on disk: a
    /// missing input fails before any directory is created.
    pub async fn process(&self, input: &Path, output: Option<&Path>) -> ProcessingResult {
        info!("Starting video processing pipeline for: {}", input.display());

        if !input.exists() {
            let msg = format!("Input video file not found: {}", input.display());
            error!("{}", msg);
            return ProcessingResult::failed(input, msg);
        }

        info!("Phase 1: starting AI analysis");
        let report = match self.analyze(input).await {
            Ok(report) => report,
            Err(msg) => {
                error!("{}", msg);
                return ProcessingResult::failed(input, msg);
            }
        };

        info!("Phase 2: starting targeted frame extraction");
        let segments_processed = self.extract_targeted_frames(input, &report.analysis).await;

        info!("Phase 3: rendering enhanced output");
        let output_path = match output {
            Some(path) => path.to_path_buf(),
            None => self.default_output_path(input),
        };

        match render_enhanced_with(&self.runner, input, &output_path, &report.analysis).await {
            Ok(outcome) => {
                match &outcome {
                    RenderOutcome::Rendered { directive_count } => {
                        info!("Applied {} edits to output", directive_count)
                    }
                    RenderOutcome::CopiedNoEdits => {
                        warn!("No edits to apply, output is a copy of the input")
                    }
                    RenderOutcome::CopiedAfterError { error } => {
                        warn!("Render degraded to a copy of the input: {}", error)
                    }
                }
                ProcessingResult::ok(input, output_path, segments_processed, report)
            }
            Err(e) => {
                let msg = format!("Video processing failed: {}", e);
                error!("{}", msg);
                ProcessingResult::failed(input, msg).with_analysis(report)
            }
        }
    }

    /// Run the analysis phase, applying the degradation policy.
    ///
    /// Transport/API failures substitute the fixed fallback analysis
    /// (flagged mocked); a reply that would not parse halts the run.
    async fn analyze(&self, input: &Path) -> Result<AnalysisReport, String> {
        // Holds extracted stills alive until the request has been sent
        let mut _scratch: Option<tempfile::TempDir> = None;

        let attachment = if self.config.attach_video {
            Attachment::Video
        } else if self.config.analysis_frames > 0 {
            match self.prepare_frame_attachment(input).await {
                Ok((scratch, frames)) => {
                    _scratch = Some(scratch);
                    Attachment::Frames(frames)
                }
                Err(e) => {
                    warn!("Could not sample analysis frames: {}; sending prompt only", e);
                    Attachment::None
                }
            }
        } else {
            Attachment::None
        };

        let options = AnalysisOptions {
            model: self.config.model.clone(),
            temperature: self.config.temperature,
            attachment,
        };

        match self.ai.analyze_video(input, &options).await {
            Ok(analysis) => {
                info!(
                    "AI analysis completed with {} frames to edit",
                    analysis.frames_to_edit.len()
                );
                Ok(AnalysisReport::real(analysis))
            }
            Err(AiError::Parse { source, raw }) => Err(format!(
                "AI analysis failed: invalid JSON response: {}; raw reply: {}",
                source, raw
            )),
            Err(e) if e.is_transport() => {
                warn!("AI analysis failed: {}; using mock analysis", e);
                Ok(AnalysisReport::mocked(fallback_analysis()))
            }
            Err(e) => Err(format!("AI analysis failed: {}", e)),
        }
    }

    /// Sample evenly spaced stills into a scratch directory.
    async fn prepare_frame_attachment(
        &self,
        input: &Path,
    ) -> PipelineResult<(tempfile::TempDir, Vec<FrameAttachment>)> {
        let scratch = tempfile::tempdir()?;
        let frames = extract_analysis_frames(input, scratch.path(), self.config.analysis_frames)
            .await?
            .into_iter()
            .map(|f| FrameAttachment {
                path: f.path,
                timestamp: f.timestamp,
            })
            .collect();
        Ok((scratch, frames))
    }

    /// Extract frames for each flagged segment, skipping failures.
    ///
    /// Returns the number of segments that yielded frames.
    async fn extract_targeted_frames(&self, input: &Path, analysis: &VideoAnalysis) -> usize {
        let segments = &analysis.frames_to_edit;
        if segments.is_empty() {
            warn!("No frames identified for editing by AI");
            return 0;
        }

        let frames_root = self
            .config
            .output_dir
            .join("frames")
            .join(file_stem(input));
        let extractor = FrameExtractor::new(self.config.frame_interval_secs, self.config.max_frames);

        let mut processed = 0;
        let mut total_frames = 0;

        for (i, segment) in segments.iter().enumerate() {
            let segment_dir = frames_root.join(format!("segment_{}_{}", i, segment.kind));
            info!(
                "Extracting frames for segment {}: {}s-{}s ({})",
                i,
                segment.start_secs(),
                segment.end_secs(),
                segment.kind
            );

            match extractor
                .extract_frames(input, &segment_dir, segment.start_secs(), segment.end_secs())
                .await
            {
                Ok(count) if count > 0 => {
                    info!("Extracted {} frames for segment {}", count, i);
                    processed += 1;
                    total_frames += count;
                }
                Ok(_) => warn!("No frames extracted for segment {}", i),
                Err(e) => error!("Failed to extract frames for segment {}: {}", i, e),
            }
        }

        info!(
            "Total frames extracted: {} across {} segments",
            total_frames, processed
        );
        processed
    }

    /// Default output path: `<output_dir>/enhanced_<stem>.<format>`.
    fn default_output_path(&self, input: &Path) -> PathBuf {
        self.config.output_dir.join(format!(
            "enhanced_{}.{}",
            file_stem(input),
            self.config.output_format
        ))
    }
}

/// Input file stem for naming output artifacts.
fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "video".to_string())
}
