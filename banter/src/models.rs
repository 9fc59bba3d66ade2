//! Well-known model choices and their wire identifiers.

use std::fmt::{Display, Formatter};

/// Models the toolkit knows wire ids for.
///
/// Custom model strings are always accepted by [`crate::ClientConfig`]; this
/// enum only exists so configuration surfaces can offer a typed choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KnownModel {
    // gpt-4.5-preview is deprecated upstream but kept for compatibility.
    Gpt45Preview,
    Gpt4Turbo,
    Gpt35Turbo,
    Gpt4o,
    Gpt4oMini,
    Gpt41,
    Gpt41Mini,
    Gpt41Nano,
    Gpt5,
    #[default]
    Gpt52,
    Gpt5Mini,
    Gpt5Nano,
    O1,
    O1Mini,
    O1Pro,
    O3,
    O3Mini,
    O4Mini,
}

impl KnownModel {
    /// The exact model id sent to the API.
    pub fn wire_id(self) -> &'static str {
        match self {
            Self::Gpt45Preview => "gpt-4.5-preview",
            Self::Gpt4Turbo => "gpt-4-turbo",
            Self::Gpt35Turbo => "gpt-3.5-turbo",
            Self::Gpt4o => "gpt-4o",
            Self::Gpt4oMini => "gpt-4o-mini",
            Self::Gpt41 => "gpt-4.1",
            Self::Gpt41Mini => "gpt-4.1-mini",
            Self::Gpt41Nano => "gpt-4.1-nano",
            Self::Gpt5 => "gpt-5",
            Self::Gpt52 => "gpt-5.2",
            Self::Gpt5Mini => "gpt-5-mini",
            Self::Gpt5Nano => "gpt-5-nano",
            Self::O1 => "o1",
            Self::O1Mini => "o1-mini",
            Self::O1Pro => "o1-pro",
            Self::O3 => "o3",
            Self::O3Mini => "o3-mini",
            Self::O4Mini => "o4-mini",
        }
    }
}

impl Display for KnownModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_model_is_current_flagship() {
        assert_eq!(KnownModel::default().wire_id(), "gpt-5.2");
    }

    #[test]
    fn wire_ids_match_api_model_strings() {
        assert_eq!(KnownModel::Gpt4oMini.wire_id(), "gpt-4o-mini");
        assert_eq!(KnownModel::O4Mini.wire_id(), "o4-mini");
        assert_eq!(KnownModel::Gpt41Nano.to_string(), "gpt-4.1-nano");
    }
}
