//! Edit-plan compilation into FFmpeg filter-graph expressions.
//!
//! The AI analysis is compiled into an explicit list of [`FilterDirective`]s
//! and only the serializer turns those into filter text. All interpolated
//! text passes through [`escape_drawtext`], so suggestion text can never
//! alter the graph grammar.

use vedit_models::{
    EditKind, EffectKind, OverlayPosition, VideoAnalysis, DEFAULT_EDIT_WINDOW_SECS,
};

/// Font size for overlay text.
const DRAWTEXT_FONT_SIZE: u32 = 48;

/// Caption used when a suggestion arrives with empty text.
const DEFAULT_OVERLAY_TEXT: &str = "Sample Text";

/// Brightness delta applied to `effect_enhancement` segments.
const SEGMENT_BRIGHTNESS_DELTA: f64 = 0.1;

/// Fade-in length for `scene_transition` segments.
const SCENE_FADE_DURATION_SECS: f64 = 0.5;

/// One video-processing directive, applied in listed order.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterDirective {
    /// Boxed white text over a semi-transparent background
    DrawText {
        text: String,
        position: OverlayPosition,
        start: f64,
        end: f64,
    },
    /// Box blur active within a window
    BoxBlur { radius: u32, start: f64, end: f64 },
    /// Brightness delta active within a window
    Brightness { delta: f64, start: f64, end: f64 },
    /// Contrast multiplier active within a window
    Contrast { factor: f64, start: f64, end: f64 },
    /// Gradual zoom ramp capped at a factor
    ZoomRamp { cap: f64, start: f64, end: f64 },
    /// Fade-in starting at a timestamp
    FadeIn { start: f64, duration: f64 },
}

impl FilterDirective {
    /// True for overlay-drawing directives.
    pub fn is_drawtext(&self) -> bool {
        matches!(self, Self::DrawText { .. })
    }

    /// Serialize into one filter expression.
    fn serialize(&self) -> String {
        match self {
            Self::DrawText {
                text,
                position,
                start,
                end,
            } => {
                let (x, y) = position_coords(*position);
                format!(
                    "drawtext=text='{}':fontsize={}:fontcolor=white:\
                     box=1:boxcolor=black@0.5:boxborderw=5:\
                     x={}:y={}:enable='between(t,{},{})'",
                    escape_drawtext(text),
                    DRAWTEXT_FONT_SIZE,
                    x,
                    y,
                    start,
                    end
                )
            }
            Self::BoxBlur { radius, start, end } => {
                format!("boxblur={}:enable='between(t,{},{})'", radius, start, end)
            }
            Self::Brightness { delta, start, end } => {
                format!(
                    "eq=brightness={}:enable='between(t,{},{})'",
                    delta, start, end
                )
            }
            Self::Contrast { factor, start, end } => {
                format!(
                    "eq=contrast={}:enable='between(t,{},{})'",
                    factor, start, end
                )
            }
            Self::ZoomRamp { cap, start, end } => {
                format!(
                    "zoompan=z='if(between(t,{},{}),min(zoom+0.01,{}),1)':d=1:s=640x480",
                    start, end, cap
                )
            }
            Self::FadeIn { start, duration } => {
                format!("fade=t=in:st={}:d={}", start, duration)
            }
        }
    }
}

impl std::fmt::Display for FilterDirective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.serialize())
    }
}

/// Map an overlay position to drawtext coordinates.
fn position_coords(position: OverlayPosition) -> (&'static str, &'static str) {
    match position {
        OverlayPosition::Center | OverlayPosition::Unknown => {
            ("(w-text_w)/2", "(h-text_h)/2")
        }
        OverlayPosition::Bottom => ("(w-text_w)/2", "h-text_h-50"),
        OverlayPosition::Top => ("(w-text_w)/2", "50"),
    }
}

/// Escape text for interpolation into a drawtext option value.
///
/// Covers the filter-option separators (`:` `,` `;`), quoting (`'` `\`),
/// stream labels (`[` `]`) and drawtext's own `%` expansion.
pub fn escape_drawtext(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '\'' | ':' | ',' | ';' | '[' | ']' | '%' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Compile an analysis into the directive list for one render pass.
///
/// Directives come out in the order the analysis lists them: overlays first,
/// then per-segment edits, then effect recommendations. Unknown kinds are
/// silently skipped; overlapping windows are allowed and compose in FFmpeg's
/// own filter-chain order.
pub fn compile_directives(analysis: &VideoAnalysis) -> Vec<FilterDirective> {
    let mut directives = Vec::new();

    for overlay in &analysis.text_overlay_suggestions {
        let start = overlay.timestamp_secs();
        let text = if overlay.text.is_empty() {
            DEFAULT_OVERLAY_TEXT.to_string()
        } else {
            overlay.text.clone()
        };
        directives.push(FilterDirective::DrawText {
            text,
            position: overlay.position,
            start,
            end: start + DEFAULT_EDIT_WINDOW_SECS,
        });
    }

    for segment in &analysis.frames_to_edit {
        let start = segment.start_secs();
        let end = segment.end_secs();
        match segment.kind {
            EditKind::EffectEnhancement => directives.push(FilterDirective::Brightness {
                delta: SEGMENT_BRIGHTNESS_DELTA,
                start,
                end,
            }),
            EditKind::SceneTransition => directives.push(FilterDirective::FadeIn {
                start,
                duration: SCENE_FADE_DURATION_SECS,
            }),
            // Overlay text is carried by text_overlay_suggestions
            EditKind::TextOverlay | EditKind::Unknown => {}
        }
    }

    for effect in &analysis.effect_recommendations {
        let start = effect.timestamp_secs();
        let end = start + DEFAULT_EDIT_WINDOW_SECS;
        let directive = match effect.effect {
            EffectKind::Blur => Some(FilterDirective::BoxBlur {
                radius: blur_radius(effect.intensity),
                start,
                end,
            }),
            EffectKind::Brightness => Some(FilterDirective::Brightness {
                delta: effect.intensity.unwrap_or(0.3).clamp(-1.0, 1.0),
                start,
                end,
            }),
            EffectKind::Contrast => Some(FilterDirective::Contrast {
                factor: effect.factor.unwrap_or(1.5),
                start,
                end,
            }),
            EffectKind::Zoom => Some(FilterDirective::ZoomRamp {
                cap: effect.factor.unwrap_or(1.5),
                start,
                end,
            }),
            // No filter template for highlight; skipped like unknown kinds
            EffectKind::Highlight | EffectKind::Unknown => None,
        };
        if let Some(d) = directive {
            directives.push(d);
        }
    }

    directives
}

/// Blur radius from a 0..1 intensity, defaulting to the fixed radius 5.
fn blur_radius(intensity: Option<f64>) -> u32 {
    match intensity {
        Some(i) => ((i * 10.0).round() as i64).clamp(1, 20) as u32,
        None => 5,
    }
}

/// Join directives into a single filter-graph expression.
pub fn build_filter_graph(directives: &[FilterDirective]) -> String {
    directives
        .iter()
        .map(FilterDirective::serialize)
        .collect::<Vec<_>>()
        .join(",")
}
