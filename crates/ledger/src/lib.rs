//! Hermes Ledger
//!
//! The simulated trader's balance ledger: holdings per currency, funding
//! checks for new orders, and settlement of matched trades. The engine
//! itself never rejects an insertion; the funding decision happens here,
//! before the driver hands an order to the book.

mod error;
mod wallet;

pub use error::LedgerError;
pub use wallet::Wallet;
