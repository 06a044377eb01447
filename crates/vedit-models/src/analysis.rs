//! AI analysis data models.
//!
//! These types mirror the JSON schema the analysis prompt asks the model to
//! return. Everything the model may omit carries a serde default, and the
//! kind enums tolerate unrecognized wire values so a creative reply degrades
//! to skipped directives instead of a parse failure.

use serde::{Deserialize, Serialize};

/// Default time window (seconds) an overlay or effect stays active when the
/// suggestion carries no duration of its own.
pub const DEFAULT_EDIT_WINDOW_SECS: f64 = 2.0;

/// Kind of edit the AI flagged for a timestamp range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditKind {
    TextOverlay,
    EffectEnhancement,
    SceneTransition,
    #[serde(other)]
    Unknown,
}

impl EditKind {
    /// Returns the kind as a string for display and directory naming.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TextOverlay => "text_overlay",
            Self::EffectEnhancement => "effect_enhancement",
            Self::SceneTransition => "scene_transition",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for EditKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A timestamp range the AI flagged for a specific kind of edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditSegment {
    /// Start of the range in seconds
    #[serde(default)]
    pub start: f64,

    /// End of the range in seconds; defaults to one second past start
    #[serde(default)]
    pub end: Option<f64>,

    /// Kind of edit to apply within the range
    #[serde(rename = "type", default = "default_edit_kind")]
    pub kind: EditKind,
}

fn default_edit_kind() -> EditKind {
    EditKind::Unknown
}

impl EditSegment {
    /// Create a segment with an explicit end.
    pub fn new(start: f64, end: f64, kind: EditKind) -> Self {
        Self {
            start,
            end: Some(end),
            kind,
        }
    }

    /// Effective start, clamped to zero.
    pub fn start_secs(&self) -> f64 {
        self.start.max(0.0)
    }

    /// Effective end; a missing end means a one-second window.
    pub fn end_secs(&self) -> f64 {
        self.end.unwrap_or(self.start + 1.0).max(self.start_secs())
    }

    /// Window length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.end_secs() - self.start_secs()
    }
}

/// Screen position for a text overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverlayPosition {
    #[default]
    Center,
    Top,
    Bottom,
    /// Anything the model invents maps to center coordinates.
    #[serde(other)]
    Unknown,
}

/// A text overlay suggestion at a single timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextOverlay {
    /// When the overlay appears, in seconds
    #[serde(default)]
    pub timestamp: f64,

    /// Overlay text; empty text falls back to a default caption at render
    #[serde(default)]
    pub text: String,

    /// Where on screen to draw the text
    #[serde(default)]
    pub position: OverlayPosition,
}

impl TextOverlay {
    pub fn new(timestamp: f64, text: impl Into<String>, position: OverlayPosition) -> Self {
        Self {
            timestamp,
            text: text.into(),
            position,
        }
    }

    /// Timestamp clamped to zero.
    pub fn timestamp_secs(&self) -> f64 {
        self.timestamp.max(0.0)
    }
}

/// Effect the AI recommended at a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Highlight,
    Zoom,
    Blur,
    Brightness,
    Contrast,
    #[serde(other)]
    Unknown,
}

impl EffectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Highlight => "highlight",
            Self::Zoom => "zoom",
            Self::Blur => "blur",
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Unknown => "unknown",
        }
    }
}

/// An effect recommendation at a single timestamp.
///
/// The model emits either `intensity` (blur, brightness, highlight) or
/// `factor` (zoom, contrast) depending on the effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectSuggestion {
    /// When the effect starts, in seconds
    #[serde(default)]
    pub timestamp: f64,

    /// Which effect to apply
    pub effect: EffectKind,

    /// Strength for additive effects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f64>,

    /// Multiplier for scaling effects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor: Option<f64>,
}

impl EffectSuggestion {
    /// Timestamp clamped to zero.
    pub fn timestamp_secs(&self) -> f64 {
        self.timestamp.max(0.0)
    }
}

/// Parsed AI analysis of a video.
///
/// All collections default to empty so a partial reply still parses; an
/// entirely empty analysis is valid and renders as a verbatim copy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoAnalysis {
    /// Timestamp ranges flagged for editing
    #[serde(default)]
    pub frames_to_edit: Vec<EditSegment>,

    /// Free-form list of enhancement kinds the model considered
    #[serde(default)]
    pub enhancement_types: Vec<String>,

    /// Text overlays to draw
    #[serde(default)]
    pub text_overlay_suggestions: Vec<TextOverlay>,

    /// Effects to apply
    #[serde(default)]
    pub effect_recommendations: Vec<EffectSuggestion>,

    /// Free-form priority scores, one per flagged moment
    #[serde(default)]
    pub priority_scores: Vec<f64>,
}

impl VideoAnalysis {
    /// True when the analysis contains nothing to act on.
    pub fn is_empty(&self) -> bool {
        self.frames_to_edit.is_empty()
            && self.text_overlay_suggestions.is_empty()
            && self.effect_recommendations.is_empty()
    }
}

/// A `VideoAnalysis` together with its provenance.
///
/// `mocked` is set when the pipeline substituted the fixed fallback analysis
/// after an AI transport failure, so callers can tell degraded demo output
/// from a real analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analysis: VideoAnalysis,

    /// True when this is the hard-coded fallback, not a model reply
    #[serde(default)]
    pub mocked: bool,
}

impl AnalysisReport {
    /// Wrap a real model analysis.
    pub fn real(analysis: VideoAnalysis) -> Self {
        Self {
            analysis,
            mocked: false,
        }
    }

    /// Wrap the fallback analysis substituted after a transport failure.
    pub fn mocked(analysis: VideoAnalysis) -> Self {
        Self {
            analysis,
            mocked: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analysis_wire_shape() {
        let json = r#"{
            "frames_to_edit": [
                {"start": 1.0, "end": 3.0, "type": "text_overlay"},
                {"start": 5.5, "end": 7.0, "type": "effect_enhancement"}
            ],
            "enhancement_types": ["text_overlay", "effect_enhancement"],
            "text_overlay_suggestions": [
                {"timestamp": 2.0, "text": "Key moment", "position": "center"}
            ],
            "effect_recommendations": [
                {"timestamp": 1.5, "effect": "highlight", "intensity": 0.7},
                {"timestamp": 6.5, "effect": "zoom", "factor": 1.2}
            ],
            "priority_scores": [8, 6]
        }"#;

        let analysis: VideoAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.frames_to_edit.len(), 2);
        assert_eq!(analysis.frames_to_edit[0].kind, EditKind::TextOverlay);
        assert_eq!(analysis.text_overlay_suggestions.len(), 1);
        assert_eq!(
            analysis.text_overlay_suggestions[0].position,
            OverlayPosition::Center
        );
        assert_eq!(analysis.effect_recommendations.len(), 2);
        assert_eq!(
            analysis.effect_recommendations[1].effect,
            EffectKind::Zoom
        );
        assert_eq!(analysis.effect_recommendations[1].factor, Some(1.2));
        assert_eq!(analysis.priority_scores, vec![8.0, 6.0]);
    }

    #[test]
    fn test_unknown_kinds_parse_instead_of_failing() {
        let json = r#"{
            "frames_to_edit": [{"start": 0.0, "end": 1.0, "type": "hologram"}],
            "text_overlay_suggestions": [
                {"timestamp": 1.0, "text": "hi", "position": "upper_left"}
            ],
            "effect_recommendations": [{"timestamp": 2.0, "effect": "sparkle"}]
        }"#;

        let analysis: VideoAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.frames_to_edit[0].kind, EditKind::Unknown);
        assert_eq!(
            analysis.text_overlay_suggestions[0].position,
            OverlayPosition::Unknown
        );
        assert_eq!(
            analysis.effect_recommendations[0].effect,
            EffectKind::Unknown
        );
    }

    #[test]
    fn test_missing_collections_default_empty() {
        let analysis: VideoAnalysis = serde_json::from_str("{}").unwrap();
        assert!(analysis.is_empty());
        assert!(analysis.enhancement_types.is_empty());
        assert!(analysis.priority_scores.is_empty());
    }

    #[test]
    fn test_segment_window_defaults() {
        let json = r#"{"start": 4.0, "type": "scene_transition"}"#;
        let segment: EditSegment = serde_json::from_str(json).unwrap();
        assert_eq!(segment.start_secs(), 4.0);
        assert_eq!(segment.end_secs(), 5.0);
        assert_eq!(segment.duration_secs(), 1.0);
    }

    #[test]
    fn test_negative_timestamps_clamped() {
        let overlay = TextOverlay::new(-1.5, "late", OverlayPosition::Top);
        assert_eq!(overlay.timestamp_secs(), 0.0);

        let segment = EditSegment::new(-2.0, 1.0, EditKind::EffectEnhancement);
        assert_eq!(segment.start_secs(), 0.0);
        assert_eq!(segment.end_secs(), 1.0);
    }

    #[test]
    fn test_kind_display_names() {
        assert_eq!(EditKind::TextOverlay.to_string(), "text_overlay");
        assert_eq!(EditKind::SceneTransition.as_str(), "scene_transition");
        assert_eq!(EffectKind::Brightness.as_str(), "brightness");
    }
}
