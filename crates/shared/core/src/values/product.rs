use serde::{Deserialize, Serialize};
use std::fmt;

/// A traded pair in `"BASE/QUOTE"` form, e.g. `"ETH/USDT"`.
///
/// The engine treats products as opaque keys and does not check that BASE
/// or QUOTE are known symbols; only the ledger needs the two halves, via
/// [`Product::split`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Product(String);

impl Product {
    pub fn new(value: impl Into<String>) -> Self {
        Product(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into `(BASE, QUOTE)` at the first `/`, or `None` when the
    /// product is not in pair form.
    pub fn split(&self) -> Option<(&str, &str)> {
        self.0.split_once('/')
    }

    pub fn base(&self) -> Option<&str> {
        self.split().map(|(base, _)| base)
    }

    pub fn quote(&self) -> Option<&str> {
        self.split().map(|(_, quote)| quote)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Product {
    fn from(value: &str) -> Self {
        Product::new(value)
    }
}

impl From<String> for Product {
    fn from(value: String) -> Self {
        Product(value)
    }
}
