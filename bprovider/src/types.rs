//! Conversation, sampling, and completion result types shared across dialects.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The two wire shapes a completion request can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireDialect {
    #[default]
    ChatCompletions,
    Responses,
}

impl WireDialect {
    /// Smallest `max_output_tokens` the dialect accepts.
    ///
    /// The Responses endpoint rejects values below 16.
    pub fn min_output_tokens(self) -> u32 {
        match self {
            Self::ChatCompletions => 1,
            Self::Responses => 16,
        }
    }
}

impl Display for WireDialect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ChatCompletions => "chat-completions",
            Self::Responses => "responses",
        };

        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    System,
    User,
    Assistant,
    Developer,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Developer => "developer",
        }
    }

    /// Roles the dialects refuse to replay from history (instructions travel
    /// out-of-band instead).
    pub fn is_instruction_role(self) -> bool {
        matches!(self, Self::System | Self::Developer)
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One role-tagged message unit in a conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Sampling parameters carried by a client and applied per request.
///
/// Each dialect serializes only the subset its schema accepts; see the
/// dialect modules for the field restrictions.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub max_output_tokens: u32,
    pub stop_sequences: Vec<String>,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            top_p: 1.0,
            frequency_penalty: 0.0,
            max_output_tokens: 200,
            stop_sequences: Vec::new(),
        }
    }
}

impl SamplingParams {
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }

    pub fn with_frequency_penalty(mut self, frequency_penalty: f32) -> Self {
        self.frequency_penalty = frequency_penalty;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn with_stop_sequences(mut self, stop_sequences: Vec<String>) -> Self {
        self.stop_sequences = stop_sequences;
        self
    }
}

/// Normalized token counters reported by either dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub cached_input_tokens: u32,
    pub output_tokens: u32,
    pub reasoning_tokens: u32,
}

impl TokenUsage {
    /// Clamps `cached_input_tokens` so it never exceeds `input_tokens`.
    pub fn clamped(mut self) -> Self {
        if self.cached_input_tokens > self.input_tokens {
            self.cached_input_tokens = self.input_tokens;
        }

        self
    }
}

/// Whether the service call itself succeeded, independent of whether any
/// text could be extracted from the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStatus {
    Succeeded,
    Failed,
}

/// Caller-facing outcome of one completion call.
///
/// A `Succeeded` result with `output_text: None` means the service answered
/// but the reply carried no extractable text; `Failed` means the call never
/// produced a usable reply (transport error, non-2xx status, undecodable
/// body) and the usage counters are all zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResult {
    pub status: CallStatus,
    pub output_text: Option<String>,
    pub usage: TokenUsage,
}

impl CompletionResult {
    pub fn success(output_text: Option<String>, usage: TokenUsage) -> Self {
        Self {
            status: CallStatus::Succeeded,
            output_text,
            usage: usage.clamped(),
        }
    }

    pub fn failure() -> Self {
        Self {
            status: CallStatus::Failed,
            output_text: None,
            usage: TokenUsage::default(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == CallStatus::Succeeded
    }
}

/// Opaque reference to a previously-uploaded binary resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileReference(String);

impl FileReference {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for FileReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for FileReference {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for FileReference {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUploadResult {
    pub file: FileReference,
    pub filename: String,
    pub bytes: u64,
}

/// Bearer credential wrapper that never leaks through `Debug` output and
/// zeroes its buffer on drop.
#[derive(PartialEq, Eq)]
pub struct SecretString {
    value: String,
}

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn expose(&self) -> &str {
        self.value.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        unsafe {
            self.value.as_mut_vec().fill(0);
        }
    }
}
