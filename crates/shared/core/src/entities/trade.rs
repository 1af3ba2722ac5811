use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::OrderId;
use crate::values::{Price, Product, Quantity, Timestamp, TraderId};

/// Unique identifier for a trade
pub type TradeId = Uuid;

/// Which resting side of the pairing a trade settles for its owner.
///
/// `AskSale`: the owner's ask was consumed (they sold BASE).
/// `BidSale`: the owner's bid was consumed (they bought BASE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeSide {
    AskSale,
    BidSale,
}

/// Trade produced by pairing one ask against one bid at a single instant.
///
/// Trades exist only as matching output; they are never inserted back into
/// the book, and the ledger is the sole consumer of their settlement tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    pub product: Product,
    /// Execution price - always the matched ask's price
    pub price: Price,
    pub amount: Quantity,
    pub timestamp: Timestamp,
    pub side: TradeSide,
    /// Set when one side of the pairing belonged to a simulated trader
    pub owner: Option<TraderId>,
    pub ask_order_id: OrderId,
    pub bid_order_id: OrderId,
}

impl Trade {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        product: Product,
        price: Price,
        amount: Quantity,
        timestamp: Timestamp,
        side: TradeSide,
        owner: Option<TraderId>,
        ask_order_id: OrderId,
        bid_order_id: OrderId,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            product,
            price,
            amount,
            timestamp,
            side,
            owner,
            ask_order_id,
            bid_order_id,
        }
    }

    pub fn is_owned_by(&self, trader: &TraderId) -> bool {
        self.owner.as_ref() == Some(trader)
    }

    /// Returns the notional value of the trade (price * amount)
    pub fn notional(&self) -> Decimal {
        self.price * self.amount
    }
}
