//! Unified facade over the banter conversation toolkit crates.
//!
//! This crate is designed to be the single dependency for most applications.
//! It re-exports the core toolkit crates and owns the configuration and
//! construction surface: plain config values in, a ready client out.
//!
//! ```rust
//! use banter::prelude::*;
//! use banter::build_client;
//!
//! let config = ClientConfig::new("sk-example")
//!     .with_known_model(KnownModel::Gpt4oMini)
//!     .with_dialect(WireDialect::Responses);
//!
//! let client = build_client(config).expect("client builds");
//! assert_eq!(client.model(), "gpt-4o-mini");
//! assert!(client.history().is_empty());
//! ```
//!
//! Cost estimation is independent of the client and works on plain values:
//!
//! ```rust
//! use banter::{estimate, UsageBreakdown};
//!
//! let cost = estimate(UsageBreakdown::new(1_000_000, 0, 0, 0), 1.25, 0.125, 10.0, true);
//! assert!((cost.total_usd() - 1.25).abs() < 1e-9);
//! ```

mod config;
mod factory;
mod models;
mod util;

pub mod prelude;

pub use bchat;
pub use bpricing;
pub use bprovider;

pub use bchat::{probe, HistoryPolicy, ProbeOutcome};
pub use bpricing::{
    apply_openai_standard_text_defaults, estimate, estimate_with_rates, format_usd, resolve_rates,
    tokens_to_usd, CostBreakdown, FallbackRates, PricingError, PricingErrorKind, RateCatalog,
    RateEntry, RateSource, ResolvedRates, ServiceTier, UsageBreakdown,
};
pub use bprovider::{
    CallStatus, CompletionClient, CompletionResult, FileCompletionCapability, FileReference,
    FileUploadCapability, FileUploadResult, ProviderError, ProviderErrorKind, ProviderFuture,
    Role, SamplingParams, SecretString, TokenUsage, Turn, WireDialect,
};

pub use config::{ClientConfig, ProviderKind};
pub use factory::{build_client, ClientUnavailable, ClientUnavailableKind};
pub use models::KnownModel;
pub use util::{assistant_turn, system_turn, usage_breakdown, user_turn};
