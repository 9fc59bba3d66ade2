//! Externally authored catalog of per-model pricing rates.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::PricingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceTier {
    #[default]
    Standard,
    Flex,
    Priority,
}

impl Display for ServiceTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Standard => "standard",
            Self::Flex => "flex",
            Self::Priority => "priority",
        };

        f.write_str(name)
    }
}

/// One catalog row. Rates are USD per 1M tokens; 0 means "not priced".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateEntry {
    pub provider_id: String,
    pub model_id: String,
    #[serde(default)]
    pub tier: ServiceTier,
    #[serde(default)]
    pub input_usd_per_1m: f64,
    #[serde(default)]
    pub cached_input_usd_per_1m: f64,
    #[serde(default)]
    pub output_usd_per_1m: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl RateEntry {
    pub fn new(
        provider_id: impl Into<String>,
        model_id: impl Into<String>,
        tier: ServiceTier,
    ) -> Self {
        Self {
            provider_id: provider_id.into(),
            model_id: model_id.into(),
            tier,
            input_usd_per_1m: 0.0,
            cached_input_usd_per_1m: 0.0,
            output_usd_per_1m: 0.0,
            notes: None,
        }
    }

    pub fn with_rates(mut self, input: f64, cached_input: f64, output: f64) -> Self {
        self.input_usd_per_1m = input;
        self.cached_input_usd_per_1m = cached_input;
        self.output_usd_per_1m = output;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn has_any_rate(&self) -> bool {
        self.input_usd_per_1m != 0.0
            || self.cached_input_usd_per_1m != 0.0
            || self.output_usd_per_1m != 0.0
    }
}

/// Rate catalog with a rebuilt lookup index over its entries.
///
/// Lookup is case-insensitive on provider and model and exact on tier; when
/// duplicate keys exist the last entry wins, so an externally edited
/// document can simply append corrections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateCatalog {
    pub entries: Vec<RateEntry>,
    /// Where the numbers came from (pricing page URL, internal note).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// UTC ISO timestamp maintained by whoever edits the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl RateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<RateEntry>) -> Self {
        let mut catalog = Self {
            entries,
            ..Self::default()
        };
        catalog.rebuild_index();
        catalog
    }

    pub fn from_json_str(json: &str) -> Result<Self, PricingError> {
        let mut catalog: Self = serde_json::from_str(json)
            .map_err(|err| PricingError::decode(err.to_string()))?;
        catalog.rebuild_index();
        Ok(catalog)
    }

    pub fn to_json_string(&self) -> Result<String, PricingError> {
        serde_json::to_string_pretty(self).map_err(|err| PricingError::encode(err.to_string()))
    }

    pub fn rebuild_index(&mut self) {
        self.index.clear();
        for (position, entry) in self.entries.iter().enumerate() {
            let key = Self::key(&entry.provider_id, &entry.model_id, entry.tier);
            self.index.insert(key, position);
        }
    }

    pub fn get(&self, provider_id: &str, model_id: &str, tier: ServiceTier) -> Option<&RateEntry> {
        if provider_id.trim().is_empty() || model_id.trim().is_empty() {
            return None;
        }

        let key = Self::key(provider_id, model_id, tier);
        self.index.get(&key).map(|position| &self.entries[*position])
    }

    /// Inserts or updates the entry for `(provider, model, tier)` and keeps
    /// the index current.
    pub fn upsert(&mut self, entry: RateEntry, overwrite_existing: bool) {
        let key = Self::key(&entry.provider_id, &entry.model_id, entry.tier);

        match self.index.get(&key).copied() {
            Some(position) => {
                let existing = &mut self.entries[position];
                if overwrite_existing {
                    existing.input_usd_per_1m = entry.input_usd_per_1m;
                    existing.cached_input_usd_per_1m = entry.cached_input_usd_per_1m;
                    existing.output_usd_per_1m = entry.output_usd_per_1m;
                    if entry.notes.is_some() {
                        existing.notes = entry.notes;
                    }
                } else {
                    // Fill-mode: only rates still at 0 are touched.
                    if existing.input_usd_per_1m <= 0.0 {
                        existing.input_usd_per_1m = entry.input_usd_per_1m;
                    }
                    if existing.cached_input_usd_per_1m <= 0.0 {
                        existing.cached_input_usd_per_1m = entry.cached_input_usd_per_1m;
                    }
                    if existing.output_usd_per_1m <= 0.0 {
                        existing.output_usd_per_1m = entry.output_usd_per_1m;
                    }
                    if existing.notes.is_none() {
                        existing.notes = entry.notes;
                    }
                }
            }
            None => {
                self.entries.push(entry);
                self.index.insert(key, self.entries.len() - 1);
            }
        }
    }

    fn key(provider_id: &str, model_id: &str, tier: ServiceTier) -> String {
        format!(
            "{}::{}::{tier}",
            provider_id.trim().to_ascii_lowercase(),
            model_id.trim().to_ascii_lowercase()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PricingErrorKind;

    fn entry(provider: &str, model: &str, input: f64) -> RateEntry {
        RateEntry::new(provider, model, ServiceTier::Standard).with_rates(input, 0.0, 0.0)
    }

    #[test]
    fn lookup_is_case_insensitive_on_provider_and_model() {
        let catalog = RateCatalog::from_entries(vec![entry("OpenAI", "GPT-5.2", 1.75)]);

        let found = catalog
            .get("openai", "gpt-5.2", ServiceTier::Standard)
            .expect("entry resolves");
        assert_eq!(found.input_usd_per_1m, 1.75);

        assert!(catalog.get("openai", "gpt-5.2", ServiceTier::Flex).is_none());
    }

    #[test]
    fn duplicate_keys_resolve_last_write_wins() {
        let catalog = RateCatalog::from_entries(vec![
            entry("openai", "gpt-5.2", 1.0),
            entry("OpenAI", "gpt-5.2", 9.0),
        ]);

        let found = catalog
            .get("openai", "gpt-5.2", ServiceTier::Standard)
            .expect("entry resolves");
        assert_eq!(found.input_usd_per_1m, 9.0);
    }

    #[test]
    fn blank_provider_or_model_never_matches() {
        let catalog = RateCatalog::from_entries(vec![entry("", "", 1.0)]);

        assert!(catalog.get("", "", ServiceTier::Standard).is_none());
        assert!(catalog.get("  ", "gpt", ServiceTier::Standard).is_none());
    }

    #[test]
    fn upsert_appends_then_updates() {
        let mut catalog = RateCatalog::new();
        catalog.upsert(entry("openai", "o3", 2.0), false);
        assert_eq!(catalog.entries.len(), 1);

        catalog.upsert(
            RateEntry::new("openai", "o3", ServiceTier::Standard).with_rates(5.0, 1.0, 8.0),
            true,
        );
        assert_eq!(catalog.entries.len(), 1);

        let found = catalog
            .get("openai", "o3", ServiceTier::Standard)
            .expect("entry resolves");
        assert_eq!(found.input_usd_per_1m, 5.0);
        assert_eq!(found.output_usd_per_1m, 8.0);
    }

    #[test]
    fn json_round_trip_rebuilds_the_index() {
        let mut original = RateCatalog::from_entries(vec![entry("openai", "gpt-4o", 2.5)]);
        original.source = Some("https://platform.openai.com/docs/pricing".to_string());

        let json = original.to_json_string().expect("encodes");
        let decoded = RateCatalog::from_json_str(&json).expect("decodes");

        assert_eq!(decoded.entries, original.entries);
        assert_eq!(decoded.source, original.source);
        assert!(decoded
            .get("OPENAI", "gpt-4o", ServiceTier::Standard)
            .is_some());
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let error = RateCatalog::from_json_str("{not json").expect_err("must fail");
        assert_eq!(error.kind, PricingErrorKind::Decode);
    }

    #[test]
    fn tier_serializes_lowercase() {
        let json = serde_json::to_string(&ServiceTier::Priority).expect("encodes");
        assert_eq!(json, r#""priority""#);
    }
}
