//! Wire types for the completion endpoint.
//!
//! Request: `{model, temperature, messages: [{role, content}], response_format?}`
//! where content is plain text or a multimodal part list. Response:
//! `{choices: [{message: {content}}]}` with JSON text in `content`.

use serde::{Deserialize, Serialize};

/// Completion request.
#[derive(Debug, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub temperature: f64,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

/// Response-format hint.
#[derive(Debug, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format: String,
}

impl ResponseFormat {
    /// Ask the endpoint for a JSON object reply.
    pub fn json_object() -> Self {
        Self {
            format: "json_object".to_string(),
        }
    }
}

/// One chat message.
#[derive(Debug, Serialize)]
pub struct Message {
    pub role: String,
    pub content: MessageContent,
}

impl Message {
    pub fn user(content: MessageContent) -> Self {
        Self {
            role: "user".to_string(),
            content,
        }
    }
}

/// Message content: plain text or a multimodal part list.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// One multimodal content part.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
    Video { video: VideoRef },
}

/// Inline image as a data URL.
#[derive(Debug, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

/// Referenced video file.
#[derive(Debug, Serialize)]
pub struct VideoRef {
    pub file_path: String,
}

/// Completion response envelope.
#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: String,
}
