mod candle;
mod order;
mod side;
mod trade;

pub use candle::Candle;
pub use order::{Order, OrderId};
pub use side::Side;
pub use trade::{Trade, TradeId, TradeSide};
