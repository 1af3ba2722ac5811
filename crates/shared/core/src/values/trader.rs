use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a simulated market participant.
///
/// Dataset records carry no owner at all (`Option<TraderId>::None`); the
/// matcher and the ledger are handed the trader's identity explicitly
/// instead of comparing magic strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraderId(String);

impl TraderId {
    pub fn new(value: impl Into<String>) -> Self {
        TraderId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TraderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TraderId {
    fn from(value: &str) -> Self {
        TraderId::new(value)
    }
}
