//! Fixed fallback analysis for degraded/demo mode.

use vedit_models::{
    EditKind, EditSegment, EffectKind, EffectSuggestion, OverlayPosition, TextOverlay,
    VideoAnalysis,
};

/// The hard-coded analysis substituted when the AI endpoint is unreachable,
/// letting the pipeline complete in degraded mode. Callers must flag the
/// substitution so real and mocked analyses stay distinguishable.
pub fn fallback_analysis() -> VideoAnalysis {
    VideoAnalysis {
        frames_to_edit: vec![
            EditSegment::new(1.0, 3.0, EditKind::TextOverlay),
            EditSegment::new(5.0, 7.0, EditKind::EffectEnhancement),
            EditSegment::new(8.0, 9.5, EditKind::SceneTransition),
        ],
        enhancement_types: vec![
            "text_overlay".to_string(),
            "effect_enhancement".to_string(),
            "scene_transition".to_string(),
        ],
        text_overlay_suggestions: vec![
            TextOverlay::new(2.0, "Test Video Content", OverlayPosition::Center),
            TextOverlay::new(6.0, "Enhanced Scene", OverlayPosition::Bottom),
        ],
        effect_recommendations: vec![
            EffectSuggestion {
                timestamp: 2.5,
                effect: EffectKind::Highlight,
                intensity: Some(0.8),
                factor: None,
            },
            EffectSuggestion {
                timestamp: 6.5,
                effect: EffectKind::Zoom,
                intensity: None,
                factor: Some(1.3),
            },
        ],
        priority_scores: vec![9.0, 7.0, 8.0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_actionable() {
        let analysis = fallback_analysis();
        assert!(!analysis.is_empty());
        assert_eq!(analysis.frames_to_edit.len(), 3);
        assert_eq!(analysis.text_overlay_suggestions.len(), 2);
        assert_eq!(analysis.effect_recommendations.len(), 2);
        assert_eq!(analysis.priority_scores, vec![9.0, 7.0, 8.0]);
    }

    #[test]
    fn test_fallback_round_trips_through_wire_shape() {
        let json = serde_json::to_string(&fallback_analysis()).unwrap();
        let parsed: VideoAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.frames_to_edit[2].kind, EditKind::SceneTransition);
        assert_eq!(parsed.frames_to_edit[2].end, Some(9.5));
    }
}
