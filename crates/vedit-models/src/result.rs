//! Terminal per-run processing result.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisReport;

/// Outcome of one pipeline run. Constructed once, never mutated after.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingResult {
    /// Whether the run produced a usable output
    pub success: bool,

    /// The input video that was processed
    pub input_path: PathBuf,

    /// The rendered (or copied) output, when one was produced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,

    /// Number of flagged segments whose frames were extracted
    pub segments_processed: usize,

    /// The analysis the edits were derived from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisReport>,

    /// Sanitized error message when the run failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ProcessingResult {
    /// Successful run.
    pub fn ok(
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        segments_processed: usize,
        analysis: AnalysisReport,
    ) -> Self {
        Self {
            success: true,
            input_path: input_path.into(),
            output_path: Some(output_path.into()),
            segments_processed,
            analysis: Some(analysis),
            error_message: None,
        }
    }

    /// Failed run; no output is promised.
    pub fn failed(input_path: impl Into<PathBuf>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            input_path: input_path.into(),
            output_path: None,
            segments_processed: 0,
            analysis: None,
            error_message: Some(error.into()),
        }
    }

    /// Attach the analysis to a failure result (e.g. parse errors keep the
    /// report absent, but downstream failures after analysis keep it).
    pub fn with_analysis(mut self, analysis: AnalysisReport) -> Self {
        self.analysis = Some(analysis);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::VideoAnalysis;

    #[test]
    fn test_ok_result() {
        let report = AnalysisReport::real(VideoAnalysis::default());
        let result = ProcessingResult::ok("in.mp4", "out/enhanced_in.mp4", 2, report);
        assert!(result.success);
        assert_eq!(result.segments_processed, 2);
        assert!(result.output_path.is_some());
        assert!(result.error_message.is_none());
    }

    #[test]
    fn test_failed_result() {
        let result = ProcessingResult::failed("missing.mp4", "Input video file not found");
        assert!(!result.success);
        assert!(result.output_path.is_none());
        assert_eq!(result.segments_processed, 0);
        assert!(result
            .error_message
            .as_deref()
            .unwrap()
            .contains("not found"));
    }
}
