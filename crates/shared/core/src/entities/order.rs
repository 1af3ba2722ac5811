use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Side;
use crate::values::{Price, Product, Quantity, Timestamp, TraderId};

/// Unique identifier for an order
pub type OrderId = Uuid;

/// One raw bid or ask resting on the replay timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub product: Product,
    pub side: Side,
    pub price: Price,
    pub amount: Quantity,
    pub timestamp: Timestamp,
    /// `None` for records that came from the historical dataset
    pub owner: Option<TraderId>,
}

impl Order {
    /// Create an order originating from the historical dataset
    pub fn from_dataset(
        product: impl Into<Product>,
        side: Side,
        price: Price,
        amount: Quantity,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            product: product.into(),
            side,
            price,
            amount,
            timestamp,
            owner: None,
        }
    }

    /// Create an order placed by a simulated trader
    pub fn placed_by(
        owner: TraderId,
        product: impl Into<Product>,
        side: Side,
        price: Price,
        amount: Quantity,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            owner: Some(owner),
            ..Self::from_dataset(product, side, price, amount, timestamp)
        }
    }

    pub fn is_owned_by(&self, trader: &TraderId) -> bool {
        self.owner.as_ref() == Some(trader)
    }

    /// Notional value of the order (price * amount)
    pub fn notional(&self) -> Decimal {
        self.price * self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ts() -> Timestamp {
        Timestamp::parse("2020/03/17 17:01:24.884492").unwrap()
    }

    #[test]
    fn dataset_orders_have_no_owner() {
        let order = Order::from_dataset("ETH/USDT", Side::Ask, dec!(200), dec!(0.5), ts());
        assert_eq!(order.owner, None);
        assert!(!order.is_owned_by(&TraderId::new("alice")));
    }

    #[test]
    fn trader_orders_carry_their_identity() {
        let alice = TraderId::new("alice");
        let order = Order::placed_by(
            alice.clone(),
            "ETH/USDT",
            Side::Bid,
            dec!(200),
            dec!(0.5),
            ts(),
        );
        assert!(order.is_owned_by(&alice));
        assert!(!order.is_owned_by(&TraderId::new("bob")));
    }

    #[test]
    fn notional_is_price_times_amount() {
        let order = Order::from_dataset("ETH/USDT", Side::Bid, dec!(200), dec!(0.5), ts());
        assert_eq!(order.notional(), dec!(100.0));
    }
}
