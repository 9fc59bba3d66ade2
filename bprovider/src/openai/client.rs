//! OpenAI completion client over the transport seam.

use std::path::Path;
use std::sync::Arc;

use crate::{
    CompletionClient, CompletionResult, FileCompletionCapability, FileReference,
    FileUploadCapability, FileUploadResult, ProviderError, ProviderFuture, Role, SamplingParams,
    Turn, WireDialect,
};

use super::chat_api;
use super::responses_api;
use super::transport::{FileUploadRequest, OpenAiTransport};

/// Completion client speaking one of the two OpenAI wire dialects.
///
/// The client owns its conversation history: successful calls append the new
/// user and assistant turns, failed calls leave the history untouched.
#[derive(Debug)]
pub struct OpenAiClient {
    transport: Arc<dyn OpenAiTransport>,
    dialect: WireDialect,
    model: String,
    sampling: SamplingParams,
    system_instructions: String,
    history: Vec<Turn>,
}

impl OpenAiClient {
    pub fn new(
        transport: Arc<dyn OpenAiTransport>,
        dialect: WireDialect,
        model: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            dialect,
            model: model.into(),
            sampling: SamplingParams::default(),
            system_instructions: "You are a helpful assistant.".to_string(),
            history: Vec::new(),
        }
    }

    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn with_system_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.system_instructions = instructions.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn system_instructions(&self) -> &str {
        &self.system_instructions
    }

    pub fn set_system_instructions(&mut self, instructions: impl Into<String>) {
        self.system_instructions = instructions.into();
    }

    pub fn push_turn(&mut self, role: Role, content: impl Into<String>) {
        self.history.push(Turn::new(role, content));
    }

    /// History as plain `(role, content)` pairs for display surfaces.
    pub fn formatted_history(&self) -> Vec<(String, String)> {
        self.history
            .iter()
            .map(|turn| (turn.role.to_string(), turn.content.clone()))
            .collect()
    }

    fn effective_instructions(&self, instructions: Option<&str>) -> String {
        instructions
            .map(str::to_string)
            .unwrap_or_else(|| self.system_instructions.clone())
    }

    fn commit_turns(&mut self, prompt: &str, reply_text: Option<&str>) {
        self.history.push(Turn::user(prompt));
        self.history.push(Turn::assistant(reply_text.unwrap_or_default()));
    }

    async fn run_chat_completion(
        &mut self,
        prompt: &str,
        instructions: Option<&str>,
    ) -> CompletionResult {
        let instructions = self.effective_instructions(instructions);
        let request = chat_api::build_request(
            &self.model,
            &self.sampling,
            &instructions,
            &self.history,
            prompt,
        );

        let outcome = self.transport.chat_completion(request).await;
        match outcome {
            Ok(reply) => {
                let text = chat_api::extract_text(&reply);
                let usage = chat_api::extract_usage(&reply);
                self.commit_turns(prompt, text.as_deref());
                CompletionResult::success(text, usage)
            }
            Err(err) => {
                tracing::error!(
                    event = "completion_failed",
                    dialect = %WireDialect::ChatCompletions,
                    error = %err,
                    "chat completion request failed"
                );
                CompletionResult::failure()
            }
        }
    }

    async fn run_responses_completion(
        &mut self,
        prompt: &str,
        instructions: Option<&str>,
    ) -> CompletionResult {
        let instructions = self.effective_instructions(instructions);
        let request = responses_api::build_request(
            &self.model,
            &self.sampling,
            &instructions,
            &self.history,
            prompt,
        );

        let outcome = self.transport.response(request).await;
        match outcome {
            Ok(reply) => {
                let text = responses_api::extract_text(&reply);
                let usage = responses_api::extract_usage(&reply);
                self.commit_turns(prompt, text.as_deref());
                CompletionResult::success(text, usage)
            }
            Err(err) => {
                tracing::error!(
                    event = "completion_failed",
                    dialect = %WireDialect::Responses,
                    error = %err,
                    "responses request failed"
                );
                CompletionResult::failure()
            }
        }
    }

    async fn run_file_completion(
        &mut self,
        prompt: &str,
        instructions: Option<&str>,
        files: &[FileReference],
    ) -> CompletionResult {
        let instructions = self.effective_instructions(instructions);
        let request = responses_api::build_file_request(
            &self.model,
            &self.sampling,
            &instructions,
            &self.history,
            prompt,
            files,
        );

        let outcome = self.transport.response(request).await;
        match outcome {
            Ok(reply) => {
                let text = responses_api::extract_text(&reply);
                let usage = responses_api::extract_usage(&reply);
                // File references are request-scoped: only the text prompt
                // and the assistant reply enter the durable history.
                self.commit_turns(prompt, text.as_deref());
                CompletionResult::success(text, usage)
            }
            Err(err) => {
                tracing::error!(
                    event = "completion_failed",
                    dialect = %WireDialect::Responses,
                    attachments = files.len(),
                    error = %err,
                    "responses file request failed"
                );
                CompletionResult::failure()
            }
        }
    }
}

impl CompletionClient for OpenAiClient {
    fn dialect(&self) -> WireDialect {
        self.dialect
    }

    fn history(&self) -> &[Turn] {
        &self.history
    }

    fn replace_history(&mut self, history: Vec<Turn>) -> Vec<Turn> {
        std::mem::replace(&mut self.history, history)
    }

    fn extend_history(&mut self, turns: Vec<Turn>) {
        self.history.extend(turns);
    }

    fn clear_history(&mut self) {
        self.history.clear();
    }

    fn sampling(&self) -> &SamplingParams {
        &self.sampling
    }

    fn set_sampling(&mut self, sampling: SamplingParams) {
        self.sampling = sampling;
    }

    fn complete<'a>(
        &'a mut self,
        prompt: &'a str,
        instructions: Option<&'a str>,
    ) -> ProviderFuture<'a, CompletionResult> {
        Box::pin(async move {
            match self.dialect {
                WireDialect::ChatCompletions => self.run_chat_completion(prompt, instructions).await,
                WireDialect::Responses => self.run_responses_completion(prompt, instructions).await,
            }
        })
    }

    fn file_completions(&mut self) -> Option<&mut dyn FileCompletionCapability> {
        match self.dialect {
            WireDialect::Responses => Some(self),
            WireDialect::ChatCompletions => None,
        }
    }
}

impl FileCompletionCapability for OpenAiClient {
    fn complete_with_files<'a>(
        &'a mut self,
        prompt: &'a str,
        instructions: Option<&'a str>,
        files: &'a [FileReference],
    ) -> ProviderFuture<'a, CompletionResult> {
        Box::pin(async move {
            if files.is_empty() {
                return self.complete(prompt, instructions).await;
            }

            self.run_file_completion(prompt, instructions, files).await
        })
    }
}

impl FileUploadCapability for OpenAiClient {
    fn upload_file<'a>(
        &'a self,
        path: &'a Path,
        purpose: &'a str,
    ) -> ProviderFuture<'a, Result<FileUploadResult, ProviderError>> {
        Box::pin(async move {
            if path.as_os_str().is_empty() {
                return Err(ProviderError::invalid_request(
                    "upload path must not be empty",
                ));
            }

            let metadata = tokio::fs::metadata(path).await.map_err(|_| {
                ProviderError::invalid_request(format!(
                    "upload file not found: {}",
                    path.display()
                ))
            })?;

            if !metadata.is_file() {
                return Err(ProviderError::invalid_request(format!(
                    "upload path is not a file: {}",
                    path.display()
                )));
            }

            let is_pdf = path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false);
            if !is_pdf {
                return Err(ProviderError::invalid_request(
                    "only PDF files are supported for upload",
                ));
            }

            let bytes = tokio::fs::read(path).await.map_err(|err| {
                ProviderError::other(format!("failed to read {}: {err}", path.display()))
            })?;
            let byte_len = bytes.len() as u64;

            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload.pdf".to_string());

            let purpose = if purpose.trim().is_empty() {
                "user_data".to_string()
            } else {
                purpose.trim().to_string()
            };

            let reply = self
                .transport
                .upload(FileUploadRequest {
                    purpose,
                    filename: filename.clone(),
                    bytes,
                })
                .await
                .inspect_err(|err| {
                    tracing::error!(event = "upload_failed", error = %err, "file upload failed");
                })?;

            let id = reply
                .id
                .filter(|id| !id.trim().is_empty())
                .ok_or_else(|| ProviderError::other("file upload returned no file id"))?;

            Ok(FileUploadResult {
                file: FileReference::new(id),
                filename: reply.filename.unwrap_or(filename),
                bytes: reply.bytes.unwrap_or(byte_len),
            })
        })
    }
}
