//! Hermes Core Domain
//!
//! Pure domain types for the Hermes market replay engine.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{Candle, Order, OrderId, Side, Trade, TradeId, TradeSide};
pub use values::{Price, Product, Quantity, Timestamp, TimestampError, TraderId};
