//! Chat Completions wire payloads and request/response mapping.

use serde::{Deserialize, Serialize};

use crate::{SamplingParams, TokenUsage, Turn};

/// Chat Completions request body.
///
/// This dialect accepts the full sampling surface: `frequency_penalty` is
/// always present and `stop` is serialized whenever stop sequences are
/// configured (and omitted entirely when the list is empty).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub temperature: f32,
    pub max_completion_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Assembles the ordered message list: instructions as a leading system
/// message, replayed history with instruction-role and blank turns dropped,
/// then the new user prompt.
pub(crate) fn build_request(
    model: &str,
    sampling: &SamplingParams,
    instructions: &str,
    history: &[Turn],
    prompt: &str,
) -> ChatRequest {
    let mut messages = vec![ChatMessage {
        role: "system".to_string(),
        content: instructions.to_string(),
    }];

    for turn in history {
        if turn.role.is_instruction_role() || turn.content.trim().is_empty() {
            continue;
        }

        messages.push(ChatMessage {
            role: turn.role.as_str().to_string(),
            content: turn.content.clone(),
        });
    }

    messages.push(ChatMessage {
        role: "user".to_string(),
        content: prompt.to_string(),
    });

    ChatRequest {
        model: model.to_string(),
        temperature: sampling.temperature,
        max_completion_tokens: sampling.max_output_tokens,
        top_p: sampling.top_p,
        frequency_penalty: sampling.frequency_penalty,
        stop: if sampling.stop_sequences.is_empty() {
            None
        } else {
            Some(sampling.stop_sequences.clone())
        },
        messages,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub usage: Option<ChatUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatReplyMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatReplyMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub prompt_tokens_details: Option<PromptTokensDetails>,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub completion_tokens_details: Option<CompletionTokensDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PromptTokensDetails {
    #[serde(default)]
    pub cached_tokens: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionTokensDetails {
    #[serde(default)]
    pub reasoning_tokens: u32,
}

pub(crate) fn extract_text(reply: &ChatReply) -> Option<String> {
    reply
        .choices
        .first()
        .and_then(|choice| choice.message.content.clone())
}

pub(crate) fn extract_usage(reply: &ChatReply) -> TokenUsage {
    let usage = reply.usage.clone().unwrap_or_default();

    TokenUsage {
        input_tokens: usage.prompt_tokens,
        cached_input_tokens: usage
            .prompt_tokens_details
            .map(|details| details.cached_tokens)
            .unwrap_or(0),
        output_tokens: usage.completion_tokens,
        reasoning_tokens: usage
            .completion_tokens_details
            .map(|details| details.reasoning_tokens)
            .unwrap_or(0),
    }
    .clamped()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    fn sampling() -> SamplingParams {
        SamplingParams::default()
            .with_temperature(0.7)
            .with_frequency_penalty(0.5)
            .with_max_output_tokens(128)
    }

    #[test]
    fn build_request_orders_system_history_prompt() {
        let history = vec![
            Turn::new(Role::System, "stale instructions"),
            Turn::user("first question"),
            Turn::assistant("first answer"),
            Turn::new(Role::Developer, "debug note"),
            Turn::user("   "),
        ];

        let request = build_request("gpt-5.2", &sampling(), "be brief", &history, "second question");

        let roles: Vec<&str> = request.messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, ["system", "user", "assistant", "user"]);
        assert_eq!(request.messages[0].content, "be brief");
        assert_eq!(request.messages[3].content, "second question");
    }

    #[test]
    fn stop_is_omitted_when_no_sequences_configured() {
        let request = build_request("gpt-5.2", &sampling(), "", &[], "hi");
        let body = serde_json::to_value(&request).expect("request serializes");

        assert!(body.get("stop").is_none());
        assert!(body.get("frequency_penalty").is_some());
        assert_eq!(body["max_completion_tokens"], 128);
    }

    #[test]
    fn stop_is_serialized_when_sequences_configured() {
        let sampling = sampling().with_stop_sequences(vec!["END".to_string()]);
        let request = build_request("gpt-5.2", &sampling, "", &[], "hi");
        let body = serde_json::to_value(&request).expect("request serializes");

        assert_eq!(body["stop"], serde_json::json!(["END"]));
    }

    #[test]
    fn extract_usage_defaults_missing_details_to_zero() {
        let reply: ChatReply = serde_json::from_str(
            r#"{"choices":[{"message":{"content":"hi"}}],"usage":{"prompt_tokens":9,"completion_tokens":4}}"#,
        )
        .expect("reply decodes");

        let usage = extract_usage(&reply);
        assert_eq!(usage.input_tokens, 9);
        assert_eq!(usage.cached_input_tokens, 0);
        assert_eq!(usage.output_tokens, 4);
        assert_eq!(usage.reasoning_tokens, 0);
    }

    #[test]
    fn extract_usage_clamps_cached_to_input() {
        let reply: ChatReply = serde_json::from_str(
            r#"{"choices":[],"usage":{"prompt_tokens":5,"prompt_tokens_details":{"cached_tokens":12},"completion_tokens":1}}"#,
        )
        .expect("reply decodes");

        assert_eq!(extract_usage(&reply).cached_input_tokens, 5);
    }

    #[test]
    fn extract_text_takes_first_choice_content() {
        let reply: ChatReply = serde_json::from_str(
            r#"{"choices":[{"message":{"content":"pong"}},{"message":{"content":"other"}}]}"#,
        )
        .expect("reply decodes");

        assert_eq!(extract_text(&reply).as_deref(), Some("pong"));

        let empty: ChatReply =
            serde_json::from_str(r#"{"choices":[{"message":{}}]}"#).expect("reply decodes");
        assert_eq!(extract_text(&empty), None);
    }
}
