//! Enhanced-video rendering with copy fallback.

use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

use vedit_models::VideoAnalysis;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};
use crate::filters::{build_filter_graph, compile_directives};

/// Encoder preset for the single render pass.
const RENDER_PRESET: &str = "fast";

/// How the output file came to exist.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    /// FFmpeg applied the compiled filter graph
    Rendered { directive_count: usize },
    /// The analysis had nothing to apply; input copied verbatim
    CopiedNoEdits,
    /// FFmpeg failed; input copied verbatim so an output still exists
    CopiedAfterError { error: String },
}

impl RenderOutcome {
    /// True when the output carries actual edits.
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }
}

/// Render an enhanced copy of `input` at `output`.
///
/// All directives compile into one filter-graph expression and FFmpeg runs
/// once, re-encoding video and passing audio through. An empty edit plan or
/// a failed invocation degrades to a verbatim copy; the output file exists
/// in every non-error return.
pub async fn render_enhanced(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    analysis: &VideoAnalysis,
) -> MediaResult<RenderOutcome> {
    render_enhanced_with(&FfmpegRunner::new(), input, output, analysis).await
}

/// [`render_enhanced`] with an explicit runner.
pub async fn render_enhanced_with(
    runner: &FfmpegRunner,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    analysis: &VideoAnalysis,
) -> MediaResult<RenderOutcome> {
    let input = input.as_ref();
    let output = output.as_ref();

    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let directives = compile_directives(analysis);
    if directives.is_empty() {
        warn!("No edits to apply, copying original video");
        fs::copy(input, output).await?;
        return Ok(RenderOutcome::CopiedNoEdits);
    }

    let graph = build_filter_graph(&directives);
    info!(
        "Applying {} edits to {}",
        directives.len(),
        input.display()
    );

    let cmd = FfmpegCommand::new(input, output)
        .video_filter(graph)
        .audio_copy()
        .preset(RENDER_PRESET);

    match runner.run(&cmd).await {
        Ok(()) => {
            info!("Enhanced video created: {}", output.display());
            Ok(RenderOutcome::Rendered {
                directive_count: directives.len(),
            })
        }
        Err(e) => {
            warn!("Render failed, falling back to copy: {}", e);
            fs::copy(input, output).await?;
            Ok(RenderOutcome::CopiedAfterError {
                error: e.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vedit_models::{OverlayPosition, TextOverlay};

    fn overlay_analysis() -> VideoAnalysis {
        VideoAnalysis {
            text_overlay_suggestions: vec![TextOverlay::new(
                2.0,
                "Key moment",
                OverlayPosition::Center,
            )],
            ..VideoAnalysis::default()
        }
    }

    #[tokio::test]
    async fn test_empty_plan_copies_input_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.mp4");
        let output = dir.path().join("out").join("enhanced_in.mp4");
        fs::write(&input, b"not really a video").await.unwrap();

        let outcome = render_enhanced(&input, &output, &VideoAnalysis::default())
            .await
            .unwrap();

        assert_eq!(outcome, RenderOutcome::CopiedNoEdits);
        assert!(!outcome.is_rendered());
        assert_eq!(
            fs::read(&input).await.unwrap(),
            fs::read(&output).await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_failed_transcoder_copies_input_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.mp4");
        let output = dir.path().join("enhanced_in.mp4");
        fs::write(&input, b"payload bytes").await.unwrap();

        // `false` accepts any arguments and always exits non-zero
        let runner = FfmpegRunner::new().with_program("false");
        let outcome = render_enhanced_with(&runner, &input, &output, &overlay_analysis())
            .await
            .unwrap();

        assert!(matches!(outcome, RenderOutcome::CopiedAfterError { .. }));
        assert!(output.exists());
        assert_eq!(
            fs::read(&input).await.unwrap(),
            fs::read(&output).await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_missing_transcoder_copies_input_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.mp4");
        let output = dir.path().join("enhanced_in.mp4");
        fs::write(&input, b"payload").await.unwrap();

        let runner = FfmpegRunner::new().with_program("ffmpeg-not-installed-here");
        let outcome = render_enhanced_with(&runner, &input, &output, &overlay_analysis())
            .await
            .unwrap();

        assert!(matches!(outcome, RenderOutcome::CopiedAfterError { .. }));
        assert!(output.exists());
    }

    #[tokio::test]
    async fn test_missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = render_enhanced(
            dir.path().join("absent.mp4"),
            dir.path().join("out.mp4"),
            &overlay_analysis(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound(_)));
    }
}
