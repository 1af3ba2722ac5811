mod product;
mod timestamp;
mod trader;

pub use product::Product;
pub use timestamp::{Timestamp, TimestampError};
pub use trader::TraderId;

use rust_decimal::Decimal;

/// Price value - uses Decimal for precision
/// Future: could become a newtype with validation (non-negative, tick size)
pub type Price = Decimal;

/// Quantity value - uses Decimal for precision
/// Future: could become a newtype with validation (non-negative, lot size)
pub type Quantity = Decimal;
