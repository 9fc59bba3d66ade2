//! Convenience re-exports for the common request/estimate flow.

pub use bchat::{probe, HistoryPolicy, ProbeOutcome};
pub use bpricing::{
    estimate, resolve_rates, FallbackRates, RateCatalog, RateEntry, ServiceTier, UsageBreakdown,
};
pub use bprovider::{
    CallStatus, CompletionClient, CompletionResult, FileCompletionCapability, FileReference,
    FileUploadCapability, Role, SamplingParams, Turn, WireDialect,
};

pub use crate::{
    build_client, usage_breakdown, ClientConfig, ClientUnavailable, KnownModel, ProviderKind,
};
