//! Client construction from injected configuration values.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use bprovider::openai::{OpenAiClient, OpenAiHttpTransport};
use bprovider::SecretString;

use crate::{ClientConfig, ProviderKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientUnavailableKind {
    MissingCredential,
    UnsupportedProvider,
    Http,
}

/// Degraded "no client" state for configuration problems.
///
/// Callers surface this instead of panicking so interactive surfaces can
/// stay up with completions disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientUnavailable {
    pub kind: ClientUnavailableKind,
    pub message: String,
}

impl ClientUnavailable {
    pub fn new(kind: ClientUnavailableKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn missing_credential(message: impl Into<String>) -> Self {
        Self::new(ClientUnavailableKind::MissingCredential, message)
    }

    pub fn unsupported_provider(message: impl Into<String>) -> Self {
        Self::new(ClientUnavailableKind::UnsupportedProvider, message)
    }

    pub fn http(message: impl Into<String>) -> Self {
        Self::new(ClientUnavailableKind::Http, message)
    }
}

impl Display for ClientUnavailable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ClientUnavailable {}

/// Builds a ready-to-use client from plain configuration values.
///
/// The configuration is normalized first, so the adapter below never sees
/// out-of-range sampling parameters.
pub fn build_client(config: ClientConfig) -> Result<OpenAiClient, ClientUnavailable> {
    let config = config.normalized();

    match config.provider {
        ProviderKind::OpenAi => {}
        other => {
            tracing::warn!(
                event = "client_unavailable",
                provider = %other,
                "requested provider has no client implementation"
            );
            return Err(ClientUnavailable::unsupported_provider(format!(
                "unsupported provider: {other}"
            )));
        }
    }

    let api_key = config.api_key.trim();
    if api_key.is_empty() {
        tracing::warn!(
            event = "client_unavailable",
            provider = %config.provider,
            "credential is missing; requests would fail until it is set"
        );
        return Err(ClientUnavailable::missing_credential(
            "bearer credential must not be empty",
        ));
    }

    let http = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .map_err(|err| ClientUnavailable::http(err.to_string()))?;

    let transport = OpenAiHttpTransport::new(http, SecretString::new(api_key))
        .with_base_url(config.base_url)
        .with_chat_path(config.chat_path)
        .with_responses_path(config.responses_path)
        .with_files_path(config.files_path);

    Ok(
        OpenAiClient::new(Arc::new(transport), config.dialect, config.model)
            .with_sampling(config.sampling)
            .with_system_instructions(config.system_instructions),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bprovider::{CompletionClient, WireDialect};

    #[test]
    fn blank_credential_yields_missing_credential_state() {
        let error = build_client(ClientConfig::new("   ")).expect_err("must be unavailable");
        assert_eq!(error.kind, ClientUnavailableKind::MissingCredential);
    }

    #[test]
    fn unsupported_provider_yields_unavailable_state() {
        let mut config = ClientConfig::new("sk-test");
        config.provider = ProviderKind::Gemini;

        let error = build_client(config).expect_err("must be unavailable");
        assert_eq!(error.kind, ClientUnavailableKind::UnsupportedProvider);
        assert!(error.message.contains("gemini"));
    }

    #[test]
    fn openai_config_builds_a_client_with_its_settings() {
        let config = ClientConfig::new("sk-test")
            .with_dialect(WireDialect::Responses)
            .with_model("gpt-4o-mini")
            .with_system_instructions("be terse");

        let client = build_client(config).expect("client builds");
        assert_eq!(client.dialect(), WireDialect::Responses);
        assert_eq!(client.model(), "gpt-4o-mini");
        assert_eq!(client.system_instructions(), "be terse");
        assert!(client.history().is_empty());
    }
}
