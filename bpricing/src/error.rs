//! Pricing-layer errors.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingErrorKind {
    Decode,
    Encode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingError {
    pub kind: PricingErrorKind,
    pub message: String,
}

impl PricingError {
    pub fn new(kind: PricingErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(PricingErrorKind::Decode, message)
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Self::new(PricingErrorKind::Encode, message)
    }
}

impl Display for PricingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for PricingError {}
