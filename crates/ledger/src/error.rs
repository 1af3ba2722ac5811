use thiserror::Error;

/// Domain-level errors for ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("cannot deposit a negative amount of {0}")]
    NegativeDeposit(String),

    #[error("product `{0}` is not in BASE/QUOTE form")]
    MalformedProduct(String),
}
