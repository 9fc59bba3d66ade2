//! Plain configuration values injected into the client factory.

use std::fmt::{Display, Formatter};
use std::time::Duration;

use bpricing::FallbackRates;
use bprovider::{SamplingParams, WireDialect};

use crate::KnownModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    OpenAi,
    Gemini,
    Azure,
}

impl Display for ProviderKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
            Self::Azure => "azure",
        };

        f.write_str(name)
    }
}

/// Everything the factory needs to build a client, as opaque values.
///
/// The core has no ambient configuration: whoever owns persistence
/// (settings files, environment, a UI) resolves these values and hands them
/// over here. Blank URL/path fields fall back to the service defaults at
/// construction time.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub provider: ProviderKind,
    pub model: String,
    pub dialect: WireDialect,
    pub sampling: SamplingParams,
    pub system_instructions: String,
    pub base_url: String,
    pub chat_path: String,
    pub responses_path: String,
    pub files_path: String,
    pub api_key: String,
    pub fallback_rates: FallbackRates,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::OpenAi,
            model: KnownModel::default().wire_id().to_string(),
            dialect: WireDialect::ChatCompletions,
            sampling: SamplingParams::default(),
            system_instructions: "You are a helpful assistant.".to_string(),
            base_url: String::new(),
            chat_path: String::new(),
            responses_path: String::new(),
            files_path: String::new(),
            api_key: String::new(),
            fallback_rates: FallbackRates::default(),
            request_timeout: Duration::from_secs(90),
        }
    }
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_known_model(mut self, model: KnownModel) -> Self {
        self.model = model.wire_id().to_string();
        self
    }

    pub fn with_dialect(mut self, dialect: WireDialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn with_system_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.system_instructions = instructions.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_fallback_rates(mut self, rates: FallbackRates) -> Self {
        self.fallback_rates = rates;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Applies the numeric clamps the configuration layer owns, so the
    /// adapter below never sees out-of-range sampling values.
    pub fn normalized(mut self) -> Self {
        self.sampling.temperature = self.sampling.temperature.clamp(0.0, 2.0);
        self.sampling.top_p = self.sampling.top_p.clamp(0.0, 1.0);
        self.sampling.frequency_penalty = self.sampling.frequency_penalty.clamp(-2.0, 2.0);
        self.sampling.max_output_tokens = self.sampling.max_output_tokens.max(1);
        self
    }
}
