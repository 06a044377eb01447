//! Prompt construction for video analysis.

use std::path::Path;

/// Build the analysis prompt with the fixed reply schema.
pub fn build_analysis_prompt(video_path: &Path) -> String {
    format!(
        r#"Analyze this video for AI-powered editing opportunities. The video is located at: {}

Identify key moments that would benefit from enhancement:
1. Key moments that would benefit from text overlays
2. Objects or scenes that could be enhanced with effects
3. Optimal timestamps for commentary or annotations
4. Scene transitions and key moments for enhancement

Provide your analysis in JSON format with this exact structure:
{{
    "frames_to_edit": [
        {{"start": 0.0, "end": 2.0, "type": "text_overlay"}},
        {{"start": 5.5, "end": 7.0, "type": "effect_enhancement"}}
    ],
    "enhancement_types": ["text_overlay", "effect_enhancement", "scene_transition"],
    "text_overlay_suggestions": [
        {{"timestamp": 1.0, "text": "Key moment", "position": "center"}},
        {{"timestamp": 6.0, "text": "Important scene", "position": "bottom"}}
    ],
    "effect_recommendations": [
        {{"timestamp": 1.5, "effect": "highlight", "intensity": 0.7}},
        {{"timestamp": 6.5, "effect": "zoom", "factor": 1.2}}
    ],
    "priority_scores": [8, 6, 9, 7]
}}

Return ONLY valid JSON, no additional text or formatting."#,
        video_path.display()
    )
}

/// Label preceding an attached frame image.
pub fn frame_label(index: usize, timestamp: f64) -> String {
    format!("Frame {} at {:.1} seconds:", index + 1, timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_the_video_and_schema() {
        let prompt = build_analysis_prompt(Path::new("clips/demo.mp4"));
        assert!(prompt.contains("clips/demo.mp4"));
        assert!(prompt.contains("\"frames_to_edit\""));
        assert!(prompt.contains("\"text_overlay_suggestions\""));
        assert!(prompt.contains("\"effect_recommendations\""));
        assert!(prompt.contains("ONLY valid JSON"));
    }

    #[test]
    fn test_frame_label() {
        assert_eq!(frame_label(0, 2.5), "Frame 1 at 2.5 seconds:");
        assert_eq!(frame_label(4, 10.0), "Frame 5 at 10.0 seconds:");
    }
}
