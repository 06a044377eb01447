//! AI completion endpoint client.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use vedit_models::VideoAnalysis;

use crate::error::{AiError, AiResult};
use crate::payload::{image_part, video_part, MAX_INLINE_PAYLOAD_BYTES};
use crate::prompt::{build_analysis_prompt, frame_label};
use crate::types::{
    CompletionRequest, CompletionResponse, ContentPart, Message, MessageContent, ResponseFormat,
};

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Configuration for the AI client.
#[derive(Debug, Clone)]
pub struct AiClientConfig {
    /// Base URL of the completion endpoint
    pub base_url: String,
    /// Bearer token, when the endpoint requires one
    pub api_key: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Ceiling for inline media payloads
    pub max_payload_bytes: u64,
}

impl Default for AiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_key: None,
            timeout: Duration::from_secs(120),
            max_payload_bytes: MAX_INLINE_PAYLOAD_BYTES,
        }
    }
}

impl AiClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("VEDIT_AI_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            api_key: std::env::var("VEDIT_AI_API_KEY").ok(),
            timeout: Duration::from_secs(
                std::env::var("VEDIT_AI_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(120),
            ),
            max_payload_bytes: MAX_INLINE_PAYLOAD_BYTES,
        }
    }
}

/// A pre-extracted still attached to the analysis request.
#[derive(Debug, Clone)]
pub struct FrameAttachment {
    pub path: PathBuf,
    pub timestamp: f64,
}

/// What media, if any, travels with the analysis prompt.
#[derive(Debug, Clone, Default)]
pub enum Attachment {
    /// Prompt only
    #[default]
    None,
    /// Reference the video file itself (subject to the payload ceiling)
    Video,
    /// Inline base64 stills sampled from the video
    Frames(Vec<FrameAttachment>),
}

/// Per-request analysis options.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub model: String,
    pub temperature: f64,
    pub attachment: Attachment,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            attachment: Attachment::None,
        }
    }
}

/// Client for the completion endpoint.
pub struct AiClient {
    http: Client,
    config: AiClientConfig,
}

impl AiClient {
    /// Create a new client.
    pub fn new(config: AiClientConfig) -> AiResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(AiError::Transport)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> AiResult<Self> {
        Self::new(AiClientConfig::from_env())
    }

    /// Ask the model where the video needs editing.
    ///
    /// Returns the parsed analysis; transport, API, and parse failures come
    /// back as their own [`AiError`] variants and are never substituted here.
    pub async fn analyze_video(
        &self,
        video_path: &Path,
        options: &AnalysisOptions,
    ) -> AiResult<VideoAnalysis> {
        let prompt = build_analysis_prompt(video_path);
        let content = self.build_content(video_path, prompt, &options.attachment).await?;

        let request = CompletionRequest {
            model: options.model.clone(),
            temperature: options.temperature,
            messages: vec![Message::user(content)],
            response_format: Some(ResponseFormat::json_object()),
        };

        let url = format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        debug!("Sending analysis request to {} (model {})", url, options.model);

        let mut builder = self.http.post(&url).json(&request);
        if let Some(ref key) = self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Api { status, body });
        }

        let completion: CompletionResponse = response.json().await?;
        let text = completion
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or(AiError::EmptyResponse)?;

        let analysis = parse_analysis_reply(text)?;
        info!(
            "AI analysis parsed: {} segments, {} overlays, {} effects",
            analysis.frames_to_edit.len(),
            analysis.text_overlay_suggestions.len(),
            analysis.effect_recommendations.len()
        );
        Ok(analysis)
    }

    /// Assemble the message content for the chosen attachment mode.
    async fn build_content(
        &self,
        video_path: &Path,
        prompt: String,
        attachment: &Attachment,
    ) -> AiResult<MessageContent> {
        match attachment {
            Attachment::None => Ok(MessageContent::Text(prompt)),
            Attachment::Video => {
                let video = video_part(video_path, self.config.max_payload_bytes).await?;
                Ok(MessageContent::Parts(vec![
                    ContentPart::Text { text: prompt },
                    video,
                ]))
            }
            Attachment::Frames(frames) => {
                let mut parts = vec![ContentPart::Text { text: prompt }];
                for (i, frame) in frames.iter().enumerate() {
                    parts.push(ContentPart::Text {
                        text: frame_label(i, frame.timestamp),
                    });
                    parts.push(image_part(&frame.path).await?);
                }
                Ok(MessageContent::Parts(parts))
            }
        }
    }
}

/// Parse the model's textual reply into a [`VideoAnalysis`].
///
/// Tolerates a single markdown code fence around the JSON. A reply that is
/// still not valid JSON yields [`AiError::Parse`] carrying the raw text.
pub fn parse_analysis_reply(text: &str) -> AiResult<VideoAnalysis> {
    let stripped = strip_code_fence(text);

    serde_json::from_str(stripped).map_err(|source| AiError::Parse {
        source,
        raw: text.to_string(),
    })
}

/// Strip a wrapping ``` / ```json fence, if present.
fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let text = if let Some(rest) = text.strip_prefix("```json") {
        rest
    } else if let Some(rest) = text.strip_prefix("```") {
        rest
    } else {
        text
    };
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn envelope(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{"message": {"content": content}}]
        })
    }

    async fn client_for(server: &MockServer) -> AiClient {
        AiClient::new(AiClientConfig {
            base_url: server.uri(),
            ..AiClientConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_strip_code_fence_variants() {
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn test_parse_reply_fenced() {
        let reply = "```json\n{\"frames_to_edit\":[{\"start\":1.0,\"end\":3.0,\"type\":\"text_overlay\"}]}\n```";
        let analysis = parse_analysis_reply(reply).unwrap();
        assert_eq!(analysis.frames_to_edit.len(), 1);
    }

    #[test]
    fn test_parse_reply_failure_carries_raw_text() {
        let reply = "I think the video is great!";
        let err = parse_analysis_reply(reply).unwrap_err();
        match err {
            AiError::Parse { raw, .. } => assert_eq!(raw, reply),
            other => panic!("expected parse error, got {:?}", other),
        }
        assert!(parse_analysis_reply(reply).unwrap_err().is_parse());
    }

    #[tokio::test]
    async fn test_analyze_video_success() {
        let server = MockServer::start().await;
        let content = r#"{"frames_to_edit":[{"start":1.0,"end":3.0,"type":"text_overlay"}],
            "text_overlay_suggestions":[{"timestamp":2.0,"text":"Key moment","position":"center"}]}"#;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "model": "gemini-1.5-flash",
                "response_format": {"type": "json_object"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(content)))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let analysis = client
            .analyze_video(Path::new("demo.mp4"), &AnalysisOptions::default())
            .await
            .unwrap();

        assert_eq!(analysis.frames_to_edit.len(), 1);
        assert_eq!(analysis.text_overlay_suggestions[0].text, "Key moment");
    }

    #[tokio::test]
    async fn test_analyze_video_malformed_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope("not json at all")))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .analyze_video(Path::new("demo.mp4"), &AnalysisOptions::default())
            .await
            .unwrap_err();

        match err {
            AiError::Parse { raw, .. } => assert_eq!(raw, "not json at all"),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_analyze_video_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .analyze_video(Path::new("demo.mp4"), &AnalysisOptions::default())
            .await
            .unwrap_err();

        assert!(err.is_transport());
        match err {
            AiError::Api { status, body } => {
                assert_eq!(status, 500);
                assert!(body.contains("exploded"));
            }
            other => panic!("expected api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_analyze_video_empty_choices() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .analyze_video(Path::new("demo.mp4"), &AnalysisOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AiError::EmptyResponse));
    }
}
