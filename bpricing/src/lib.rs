//! Token pricing catalog and cost estimation for the banter conversation
//! toolkit.
//!
//! This crate is deliberately independent of the client crates: it consumes
//! a plain usage breakdown and a rate source and produces a USD cost
//! breakdown. Rates are USD per one million tokens throughout.

mod catalog;
mod defaults;
mod error;
mod estimator;
mod resolver;

pub use catalog::{RateCatalog, RateEntry, ServiceTier};
pub use defaults::apply_openai_standard_text_defaults;
pub use error::{PricingError, PricingErrorKind};
pub use estimator::{estimate, format_usd, tokens_to_usd, CostBreakdown, UsageBreakdown};
pub use resolver::{estimate_with_rates, resolve_rates, FallbackRates, RateSource, ResolvedRates};
