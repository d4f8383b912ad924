//! Extraction of generated text from completion responses.

use serde::de::IgnoredAny;
use serde::Deserialize;

/// One element of a multi-part response.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ContentPart {
    Text { text: String },
    Other(IgnoredAny),
}

#[derive(Debug, Deserialize)]
pub struct NestedContent {
    pub parts: Vec<ContentPart>,
}

/// Response shapes returned by the completion providers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CompletionResponse {
    /// `{"content": "..."}`
    Text { content: String },
    /// `{"content": [{"text": "..."}, ...]}`
    Parts { content: Vec<ContentPart> },
    /// `{"content": {"parts": [{"text": "..."}, ...]}}`
    Nested { content: NestedContent },
    Unknown(IgnoredAny),
}

impl CompletionResponse {
    pub fn decode(response: &serde_json::Value) -> Self {
        Self::deserialize(response).unwrap_or(CompletionResponse::Unknown(IgnoredAny))
    }

    pub fn into_text(self) -> String {
        match self {
            CompletionResponse::Text { content } => content,
            CompletionResponse::Parts { content } => join_parts(content),
            CompletionResponse::Nested { content } => join_parts(content.parts),
            CompletionResponse::Unknown(_) => String::new(),
        }
    }
}

fn join_parts(parts: Vec<ContentPart>) -> String {
    parts
        .into_iter()
        .filter_map(|part| match part {
            ContentPart::Text { text } if !text.is_empty() => Some(text),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Returns the generated text of `response`, or an empty string when the
/// shape is not recognized. Never fails.
pub fn extract(response: &serde_json::Value) -> String {
    CompletionResponse::decode(response).into_text()
}
