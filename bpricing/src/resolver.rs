//! Two-tier rate resolution: catalog first, per-client fallback second.

use crate::{estimate, CostBreakdown, RateCatalog, ServiceTier, UsageBreakdown};

/// Per-client fallback rates used when the catalog has no usable entry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FallbackRates {
    pub input_usd_per_1m: f64,
    pub cached_input_usd_per_1m: f64,
    pub output_usd_per_1m: f64,
}

impl FallbackRates {
    pub fn new(input: f64, cached_input: f64, output: f64) -> Self {
        Self {
            input_usd_per_1m: input,
            cached_input_usd_per_1m: cached_input,
            output_usd_per_1m: output,
        }
    }

    fn clamped(self) -> Self {
        Self {
            input_usd_per_1m: self.input_usd_per_1m.max(0.0),
            cached_input_usd_per_1m: self.cached_input_usd_per_1m.max(0.0),
            output_usd_per_1m: self.output_usd_per_1m.max(0.0),
        }
    }

    pub fn has_any_rate(&self) -> bool {
        self.input_usd_per_1m > 0.0
            || self.cached_input_usd_per_1m > 0.0
            || self.output_usd_per_1m > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    Catalog,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRates {
    pub input_usd_per_1m: f64,
    pub cached_input_usd_per_1m: f64,
    pub output_usd_per_1m: f64,
    pub source: RateSource,
}

/// Resolves rates for `(provider, model, tier)`.
///
/// A catalog entry only counts as found when at least one of its three rates
/// is non-zero; an all-zero entry falls through to the fallback, and a
/// fallback with no non-zero rate resolves to `None` so callers report "no
/// pricing available" instead of a spurious zero-cost estimate.
pub fn resolve_rates(
    catalog: Option<&RateCatalog>,
    provider_id: &str,
    model_id: &str,
    tier: ServiceTier,
    fallback: FallbackRates,
) -> Option<ResolvedRates> {
    if let Some(entry) = catalog.and_then(|catalog| catalog.get(provider_id, model_id, tier)) {
        if entry.has_any_rate() {
            return Some(ResolvedRates {
                input_usd_per_1m: entry.input_usd_per_1m,
                cached_input_usd_per_1m: entry.cached_input_usd_per_1m,
                output_usd_per_1m: entry.output_usd_per_1m,
                source: RateSource::Catalog,
            });
        }
    }

    let fallback = fallback.clamped();
    if fallback.has_any_rate() {
        return Some(ResolvedRates {
            input_usd_per_1m: fallback.input_usd_per_1m,
            cached_input_usd_per_1m: fallback.cached_input_usd_per_1m,
            output_usd_per_1m: fallback.output_usd_per_1m,
            source: RateSource::Fallback,
        });
    }

    None
}

pub fn estimate_with_rates(
    usage: UsageBreakdown,
    rates: &ResolvedRates,
    treat_reasoning_as_output: bool,
) -> CostBreakdown {
    estimate(
        usage,
        rates.input_usd_per_1m,
        rates.cached_input_usd_per_1m,
        rates.output_usd_per_1m,
        treat_reasoning_as_output,
    )
}
