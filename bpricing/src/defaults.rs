//! Bundled OpenAI Standard-tier text-token pricing defaults.

use crate::{RateCatalog, RateEntry, ServiceTier};

const PRICING_SOURCE_URL: &str = "https://platform.openai.com/docs/pricing";

struct PriceRow {
    model_id: &'static str,
    input: f64,
    cached: f64,
    output: f64,
    notes: Option<&'static str>,
}

const fn row(model_id: &'static str, input: f64, cached: f64, output: f64) -> PriceRow {
    PriceRow {
        model_id,
        input,
        cached,
        output,
        notes: None,
    }
}

const fn noted_row(
    model_id: &'static str,
    input: f64,
    cached: f64,
    output: f64,
    notes: &'static str,
) -> PriceRow {
    PriceRow {
        model_id,
        input,
        cached,
        output,
        notes: Some(notes),
    }
}

// Standard tier, text tokens, per the published pricing page. Models with no
// listed cached-input rate carry 0 there.
const STANDARD_TEXT_DEFAULTS: &[PriceRow] = &[
    row("gpt-5.2", 1.75, 0.175, 14.00),
    row("gpt-5.1", 1.25, 0.125, 10.00),
    row("gpt-5", 1.25, 0.125, 10.00),
    row("gpt-5-mini", 0.25, 0.025, 2.00),
    row("gpt-5-nano", 0.05, 0.005, 0.40),
    row("gpt-5.2-chat-latest", 1.75, 0.175, 14.00),
    row("gpt-5.1-chat-latest", 1.25, 0.125, 10.00),
    row("gpt-5-chat-latest", 1.25, 0.125, 10.00),
    row("gpt-4.1", 2.00, 0.50, 8.00),
    row("gpt-4.1-mini", 0.40, 0.10, 1.60),
    row("gpt-4.1-nano", 0.10, 0.025, 0.40),
    row("gpt-4o", 2.50, 1.25, 10.00),
    row("gpt-4o-mini", 0.15, 0.075, 0.60),
    row("o1", 15.00, 7.50, 60.00),
    row("o1-mini", 1.10, 0.55, 4.40),
    noted_row("o1-pro", 150.00, 0.0, 600.00, "No cached-input rate listed on pricing page."),
    row("o3", 2.00, 0.50, 8.00),
    row("o3-mini", 1.10, 0.55, 4.40),
    noted_row("o3-pro", 20.00, 0.0, 80.00, "No cached-input rate listed on pricing page."),
    row("o4-mini", 1.10, 0.275, 4.40),
];

/// Upserts OpenAI's Standard-tier text-token defaults into the catalog.
///
/// With `overwrite_existing` the bundled rates replace whatever an existing
/// entry carries; without it only rates currently at 0 are filled, so
/// externally maintained numbers survive a refresh.
pub fn apply_openai_standard_text_defaults(catalog: &mut RateCatalog, overwrite_existing: bool) {
    for price_row in STANDARD_TEXT_DEFAULTS {
        let mut entry = RateEntry::new("OpenAI", price_row.model_id, ServiceTier::Standard)
            .with_rates(price_row.input, price_row.cached, price_row.output);
        if let Some(notes) = price_row.notes {
            entry = entry.with_notes(notes);
        }

        catalog.upsert(entry, overwrite_existing);
    }

    catalog.source = Some(PRICING_SOURCE_URL.to_string());
}
