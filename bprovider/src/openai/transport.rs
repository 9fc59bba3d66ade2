//! OpenAI transport trait and reqwest-based HTTP implementation.

use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::{ProviderError, ProviderFuture, SecretString};

use super::chat_api::{ChatReply, ChatRequest};
use super::responses_api::{ResponsesReply, ResponsesRequest};

/// Typed wire operations against the completion service.
///
/// One method per endpoint so fakes can capture exactly what the adapter
/// sent; the HTTP implementation owns status mapping and body decoding.
pub trait OpenAiTransport: Send + Sync + std::fmt::Debug {
    fn chat_completion<'a>(
        &'a self,
        request: ChatRequest,
    ) -> ProviderFuture<'a, Result<ChatReply, ProviderError>>;

    fn response<'a>(
        &'a self,
        request: ResponsesRequest,
    ) -> ProviderFuture<'a, Result<ResponsesReply, ProviderError>>;

    fn upload<'a>(
        &'a self,
        request: FileUploadRequest,
    ) -> ProviderFuture<'a, Result<UploadReply, ProviderError>>;
}

/// Multipart upload payload: a `purpose` field plus the binary body.
#[derive(Clone, PartialEq, Eq)]
pub struct FileUploadRequest {
    pub purpose: String,
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for FileUploadRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileUploadRequest")
            .field("purpose", &self.purpose)
            .field("filename", &self.filename)
            .field("byte_len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadReply {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub bytes: Option<u64>,
}

#[derive(Debug)]
pub struct OpenAiHttpTransport {
    client: Client,
    credential: SecretString,
    base_url: String,
    chat_path: String,
    responses_path: String,
    files_path: String,
}

impl OpenAiHttpTransport {
    pub fn new(client: Client, credential: SecretString) -> Self {
        Self {
            client,
            credential,
            base_url: "https://api.openai.com/".to_string(),
            chat_path: "/v1/chat/completions".to_string(),
            responses_path: "/v1/responses".to_string(),
            files_path: "/v1/files".to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(&base_url.into());
        self
    }

    pub fn with_chat_path(mut self, path: impl Into<String>) -> Self {
        self.chat_path = normalize_path(&path.into(), "/v1/chat/completions");
        self
    }

    pub fn with_responses_path(mut self, path: impl Into<String>) -> Self {
        self.responses_path = normalize_path(&path.into(), "/v1/responses");
        self
    }

    pub fn with_files_path(mut self, path: impl Into<String>) -> Self {
        self.files_path = normalize_path(&path.into(), "/v1/files");
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, ProviderError> {
        let response = self
            .client
            .post(self.endpoint(path))
            .bearer_auth(self.credential.expose())
            .json(body)
            .send()
            .await
            .map_err(send_error)?;

        if !response.status().is_success() {
            return Err(Self::parse_error(response).await);
        }

        Ok(response)
    }

    async fn parse_error(response: Response) -> ProviderError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let detail = extract_error_message(&body).unwrap_or(body);
        let message = if detail.trim().is_empty() {
            format!("request failed with status {status}")
        } else {
            format!("{status} - {detail}")
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ProviderError::authentication(message)
            }
            StatusCode::TOO_MANY_REQUESTS => ProviderError::rate_limited(message),
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
                ProviderError::timeout(message)
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ProviderError::invalid_request(message)
            }
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
                ProviderError::unavailable(message)
            }
            _ => ProviderError::transport(message),
        }
    }
}

impl OpenAiTransport for OpenAiHttpTransport {
    fn chat_completion<'a>(
        &'a self,
        request: ChatRequest,
    ) -> ProviderFuture<'a, Result<ChatReply, ProviderError>> {
        Box::pin(async move {
            let response = self.post_json(&self.chat_path, &request).await?;
            response
                .json::<ChatReply>()
                .await
                .map_err(|err| ProviderError::transport(err.to_string()))
        })
    }

    fn response<'a>(
        &'a self,
        request: ResponsesRequest,
    ) -> ProviderFuture<'a, Result<ResponsesReply, ProviderError>> {
        Box::pin(async move {
            let response = self.post_json(&self.responses_path, &request).await?;
            response
                .json::<ResponsesReply>()
                .await
                .map_err(|err| ProviderError::transport(err.to_string()))
        })
    }

    fn upload<'a>(
        &'a self,
        request: FileUploadRequest,
    ) -> ProviderFuture<'a, Result<UploadReply, ProviderError>> {
        Box::pin(async move {
            let part = reqwest::multipart::Part::bytes(request.bytes)
                .file_name(request.filename)
                .mime_str("application/pdf")
                .map_err(|err| ProviderError::invalid_request(err.to_string()))?;

            let form = reqwest::multipart::Form::new()
                .text("purpose", request.purpose)
                .part("file", part);

            let response = self
                .client
                .post(self.endpoint(&self.files_path))
                .bearer_auth(self.credential.expose())
                .multipart(form)
                .send()
                .await
                .map_err(send_error)?;

            if !response.status().is_success() {
                return Err(Self::parse_error(response).await);
            }

            response
                .json::<UploadReply>()
                .await
                .map_err(|err| ProviderError::transport(err.to_string()))
        })
    }
}

fn send_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::timeout(err.to_string())
    } else {
        ProviderError::transport(err.to_string())
    }
}

fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return "https://api.openai.com/".to_string();
    }

    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    }
}

fn normalize_path(path: &str, fallback: &str) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return fallback.to_string();
    }

    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ApiErrorEnvelope>(body).ok()?;
    Some(parsed.error.message)
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_normalization_defaults_and_appends_slash() {
        assert_eq!(normalize_base_url("   "), "https://api.openai.com/");
        assert_eq!(normalize_base_url("https://proxy.local"), "https://proxy.local/");
        assert_eq!(normalize_base_url("https://proxy.local/"), "https://proxy.local/");
    }

    #[test]
    fn path_normalization_defaults_and_prefixes_slash() {
        assert_eq!(normalize_path("", "/v1/responses"), "/v1/responses");
        assert_eq!(normalize_path("v2/chat", "/v1/chat/completions"), "/v2/chat");
        assert_eq!(normalize_path("/v2/chat", "/v1/chat/completions"), "/v2/chat");
    }

    #[test]
    fn endpoint_joins_without_duplicate_slash() {
        let client = Client::new();
        let transport = OpenAiHttpTransport::new(client, SecretString::new("sk-test"))
            .with_base_url("https://proxy.local/");

        assert_eq!(
            transport.endpoint("/v1/responses"),
            "https://proxy.local/v1/responses"
        );
    }

    #[test]
    fn error_envelope_message_is_extracted() {
        let body = r#"{"error":{"message":"model not found","type":"invalid_request_error"}}"#;
        assert_eq!(extract_error_message(body).as_deref(), Some("model not found"));
        assert_eq!(extract_error_message("not json"), None);
    }
}
