//! Responses wire payloads and request/response mapping.

use serde::{Deserialize, Serialize};

use crate::{FileReference, Role, SamplingParams, TokenUsage, Turn};

/// Responses request body.
///
/// Instructions travel as a dedicated field instead of a synthetic system
/// message. The schema rejects unknown parameters, so `frequency_penalty`
/// and `stop` are never part of this type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponsesRequest {
    pub model: String,
    pub input: Vec<ResponsesInputItem>,
    pub instructions: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponsesInputItem {
    pub role: String,
    pub content: ResponsesContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponsesContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentPart {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
}

impl ContentPart {
    pub fn input_text(text: impl Into<String>) -> Self {
        Self {
            kind: "input_text".to_string(),
            text: Some(text.into()),
            file_id: None,
        }
    }

    pub fn input_file(file: &FileReference) -> Self {
        Self {
            kind: "input_file".to_string(),
            text: None,
            file_id: Some(file.as_str().to_string()),
        }
    }
}

/// Text-only input list: replayed history with instruction-role and blank
/// turns dropped, then the new user prompt.
pub(crate) fn build_request(
    model: &str,
    sampling: &SamplingParams,
    instructions: &str,
    history: &[Turn],
    prompt: &str,
) -> ResponsesRequest {
    let mut input = Vec::with_capacity(history.len() + 1);

    for turn in history {
        if turn.role.is_instruction_role() || turn.content.trim().is_empty() {
            continue;
        }

        input.push(ResponsesInputItem {
            role: turn.role.as_str().to_string(),
            content: ResponsesContent::Text(turn.content.clone()),
        });
    }

    input.push(ResponsesInputItem {
        role: "user".to_string(),
        content: ResponsesContent::Text(prompt.to_string()),
    });

    ResponsesRequest {
        model: model.to_string(),
        input,
        instructions: instructions.to_string(),
        max_output_tokens: sampling.max_output_tokens,
        temperature: sampling.temperature,
        top_p: sampling.top_p,
    }
}

/// File-carrying input list.
///
/// Replay policy: only prior `user` turns are kept, each as a single
/// `input_text` part; assistant and instruction-role turns are dropped from
/// the replay entirely. The final item is a user message whose parts are one
/// `input_file` per attached reference followed by the prompt text.
pub(crate) fn build_file_request(
    model: &str,
    sampling: &SamplingParams,
    instructions: &str,
    history: &[Turn],
    prompt: &str,
    files: &[FileReference],
) -> ResponsesRequest {
    let mut input = Vec::new();

    for turn in history {
        if turn.role != Role::User || turn.content.trim().is_empty() {
            continue;
        }

        input.push(ResponsesInputItem {
            role: "user".to_string(),
            content: ResponsesContent::Parts(vec![ContentPart::input_text(turn.content.clone())]),
        });
    }

    let mut parts = Vec::with_capacity(files.len() + 1);
    for file in files {
        if file.as_str().trim().is_empty() {
            continue;
        }

        parts.push(ContentPart::input_file(file));
    }

    parts.push(ContentPart::input_text(prompt));

    input.push(ResponsesInputItem {
        role: "user".to_string(),
        content: ResponsesContent::Parts(parts),
    });

    ResponsesRequest {
        model: model.to_string(),
        input,
        instructions: instructions.to_string(),
        max_output_tokens: sampling.max_output_tokens,
        temperature: sampling.temperature,
        top_p: sampling.top_p,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponsesReply {
    #[serde(default)]
    pub output: Vec<ResponsesOutputItem>,
    #[serde(default)]
    pub usage: Option<ResponsesUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponsesOutputItem {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub content: Vec<ResponsesOutputContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponsesOutputContent {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponsesUsage {
    #[serde(default)]
    pub input_tokens: u32,
    #[serde(default)]
    pub input_tokens_details: Option<InputTokensDetails>,
    #[serde(default)]
    pub output_tokens: u32,
    #[serde(default)]
    pub output_tokens_details: Option<OutputTokensDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputTokensDetails {
    #[serde(default)]
    pub cached_tokens: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputTokensDetails {
    #[serde(default)]
    pub reasoning_tokens: u32,
}

/// First `output_text` part of the first `message` output item, or `None`
/// when the reply shape carries no extractable text.
pub(crate) fn extract_text(reply: &ResponsesReply) -> Option<String> {
    for item in &reply.output {
        if !item.kind.eq_ignore_ascii_case("message") {
            continue;
        }

        let part = item.content.iter().find(|content| {
            content.kind.eq_ignore_ascii_case("output_text") && !content.text.trim().is_empty()
        });

        if let Some(part) = part {
            return Some(part.text.clone());
        }
    }

    None
}

pub(crate) fn extract_usage(reply: &ResponsesReply) -> TokenUsage {
    let usage = reply.usage.clone().unwrap_or_default();

    TokenUsage {
        input_tokens: usage.input_tokens,
        cached_input_tokens: usage
            .input_tokens_details
            .map(|details| details.cached_tokens)
            .unwrap_or(0),
        output_tokens: usage.output_tokens,
        reasoning_tokens: usage
            .output_tokens_details
            .map(|details| details.reasoning_tokens)
            .unwrap_or(0),
    }
    .clamped()
}
