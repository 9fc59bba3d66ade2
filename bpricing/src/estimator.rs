//! Pure cost estimation from token counts and USD/1M rates.

use std::fmt::{Display, Formatter};

/// Raw token counters for one request, as reported by a completion service.
///
/// Counters are signed so that out-of-range inputs reach the estimator and
/// get clamped there rather than silently wrapping at a conversion boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UsageBreakdown {
    pub input_tokens: i64,
    pub cached_input_tokens: i64,
    pub output_tokens: i64,
    /// Reasoning tokens reported separately by some models. Leave at 0 when
    /// the service already folds them into `output_tokens`.
    pub reasoning_tokens: i64,
}

impl UsageBreakdown {
    pub fn new(
        input_tokens: i64,
        cached_input_tokens: i64,
        output_tokens: i64,
        reasoning_tokens: i64,
    ) -> Self {
        Self {
            input_tokens,
            cached_input_tokens,
            output_tokens,
            reasoning_tokens,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CostBreakdown {
    pub non_cached_input_usd: f64,
    pub cached_input_usd: f64,
    pub output_usd: f64,
}

impl CostBreakdown {
    pub fn total_usd(&self) -> f64 {
        self.non_cached_input_usd + self.cached_input_usd + self.output_usd
    }
}

impl Display for CostBreakdown {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Total: {} (input: {}, cached: {}, output: {})",
            format_usd(self.total_usd(), 6),
            format_usd(self.non_cached_input_usd, 6),
            format_usd(self.cached_input_usd, 6),
            format_usd(self.output_usd, 6)
        )
    }
}

/// Estimates cost from explicit USD/1M rates.
///
/// All counters are clamped to ≥ 0 and cached input is clamped to the input
/// total before any arithmetic. With `treat_reasoning_as_output`, reasoning
/// tokens are billed at the output rate; turn it off when the service
/// already includes them in `output_tokens`.
pub fn estimate(
    usage: UsageBreakdown,
    input_usd_per_1m: f64,
    cached_input_usd_per_1m: f64,
    output_usd_per_1m: f64,
    treat_reasoning_as_output: bool,
) -> CostBreakdown {
    let input = usage.input_tokens.max(0);
    let mut cached = usage.cached_input_tokens.max(0);
    let mut output = usage.output_tokens.max(0);
    let reasoning = usage.reasoning_tokens.max(0);

    if cached > input {
        cached = input;
    }

    let non_cached = input - cached;

    if treat_reasoning_as_output && reasoning > 0 {
        output += reasoning;
    }

    CostBreakdown {
        non_cached_input_usd: tokens_to_usd(non_cached, input_usd_per_1m),
        cached_input_usd: tokens_to_usd(cached, cached_input_usd_per_1m),
        output_usd: tokens_to_usd(output, output_usd_per_1m),
    }
}

/// A zero-token or zero-rate bucket costs exactly 0.
pub fn tokens_to_usd(tokens: i64, usd_per_1m: f64) -> f64 {
    if tokens <= 0 || usd_per_1m <= 0.0 {
        return 0.0;
    }

    (tokens as f64 / 1_000_000.0) * usd_per_1m
}

/// Fixed-point USD rendering; `decimals` is clamped to 2..=10.
pub fn format_usd(usd: f64, decimals: usize) -> String {
    let decimals = decimals.clamp(2, 10);
    format!("{usd:.decimals$}")
}
