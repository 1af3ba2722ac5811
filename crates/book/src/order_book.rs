use std::collections::BTreeSet;

use log::debug;

use hermes_core::{Order, Price, Product, Side, Timestamp, Trade};
use hermes_matching::BatchAuction;

use crate::error::BookError;

/// The full order history, sorted non-decreasingly by timestamp.
///
/// The backing vector is re-sorted after every mutation, so every
/// time-based query can rely on chronological order. Re-sorting the whole
/// collection is O(n log n) per insertion, which is acceptable here:
/// insertions happen at interactive rate while the dataset itself is
/// loaded once up front.
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    orders: Vec<Order>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self { orders: Vec::new() }
    }

    /// Build a book from pre-loaded orders (they arrive in file order and
    /// are sorted here once).
    pub fn from_orders(mut orders: Vec<Order>) -> Self {
        orders.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Self { orders }
    }

    /// Insert one order and restore the timestamp ordering.
    pub fn insert(&mut self, order: Order) {
        self.orders.push(order);
        self.orders.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Every stored order whose side, product, and timestamp all match
    /// exactly, cloned in storage order.
    ///
    /// Callers receive independent copies: pairing mutates its working set
    /// freely and the persisted entries stay untouched.
    pub fn orders_matching(
        &self,
        side: Side,
        product: &Product,
        timestamp: &Timestamp,
    ) -> Vec<Order> {
        self.orders
            .iter()
            .filter(|o| o.side == side && &o.product == product && &o.timestamp == timestamp)
            .cloned()
            .collect()
    }

    /// Distinct products across the whole history.
    pub fn known_products(&self) -> BTreeSet<Product> {
        self.orders.iter().map(|o| o.product.clone()).collect()
    }

    /// Timestamp of the oldest stored order.
    pub fn earliest_time(&self) -> Result<Timestamp, BookError> {
        self.orders
            .first()
            .map(|o| o.timestamp.clone())
            .ok_or(BookError::EmptyBook)
    }

    /// The smallest stored timestamp strictly greater than `current`,
    /// wrapping to [`Self::earliest_time`] when `current` is at or past the
    /// end. Together with the sorted store this realizes a circular
    /// discrete clock over the instants actually present in the data.
    pub fn next_time(&self, current: &Timestamp) -> Result<Timestamp, BookError> {
        match self.orders.iter().find(|o| &o.timestamp > current) {
            Some(order) => Ok(order.timestamp.clone()),
            None => self.earliest_time(),
        }
    }

    /// Highest price over a selection of orders.
    ///
    /// The selection must be non-empty; an empty one is a caller-contract
    /// violation reported as [`BookError::EmptySelection`].
    pub fn high_price(orders: &[Order]) -> Result<Price, BookError> {
        orders
            .iter()
            .map(|o| o.price)
            .max()
            .ok_or(BookError::EmptySelection)
    }

    /// Lowest price over a selection of orders. Same contract as
    /// [`Self::high_price`].
    pub fn low_price(orders: &[Order]) -> Result<Price, BookError> {
        orders
            .iter()
            .map(|o| o.price)
            .min()
            .ok_or(BookError::EmptySelection)
    }

    /// Pair the asks resting at `timestamp` against the bids resting there,
    /// for one product. The auction works on copies; the store is never
    /// edited by a match.
    pub fn match_asks_to_bids(
        &self,
        product: &Product,
        timestamp: &Timestamp,
        auction: &BatchAuction,
    ) -> Vec<Trade> {
        let asks = self.orders_matching(Side::Ask, product, timestamp);
        let bids = self.orders_matching(Side::Bid, product, timestamp);

        if asks.is_empty() || bids.is_empty() {
            debug!("{product} @ {timestamp}: no asks or no bids, nothing to match");
            return Vec::new();
        }

        auction.run(asks, bids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hermes_core::TraderId;
    use rust_decimal_macros::dec;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    fn order(side: Side, product: &str, stamp: &str, price: Price) -> Order {
        Order::from_dataset(product, side, price, dec!(1.0), ts(stamp))
    }

    #[test]
    fn stays_sorted_after_out_of_order_inserts() {
        let mut book = OrderBook::new();
        book.insert(order(Side::Ask, "ETH/USDT", "2020/06/01 12:00:00", dec!(3)));
        book.insert(order(Side::Ask, "ETH/USDT", "2020/03/17 09:00:00", dec!(1)));
        book.insert(order(Side::Bid, "BTC/USDT", "2020/03/17 17:00:00", dec!(2)));

        let stamps: Vec<&str> = book.orders().iter().map(|o| o.timestamp.as_str()).collect();
        let mut sorted = stamps.clone();
        sorted.sort();
        assert_eq!(stamps, sorted);
    }

    #[test]
    fn orders_matching_filters_on_all_three_keys() {
        let book = OrderBook::from_orders(vec![
            order(Side::Ask, "ETH/USDT", "2020/03/17 09:00:00", dec!(1)),
            order(Side::Bid, "ETH/USDT", "2020/03/17 09:00:00", dec!(2)),
            order(Side::Ask, "BTC/USDT", "2020/03/17 09:00:00", dec!(3)),
            order(Side::Ask, "ETH/USDT", "2020/03/17 09:00:01", dec!(4)),
        ]);

        let hits = book.orders_matching(
            Side::Ask,
            &Product::new("ETH/USDT"),
            &ts("2020/03/17 09:00:00"),
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].price, dec!(1));
    }

    #[test]
    fn known_products_is_insertion_order_invariant() {
        let forward = OrderBook::from_orders(vec![
            order(Side::Ask, "ETH/USDT", "2020/03/17 09:00:00", dec!(1)),
            order(Side::Bid, "BTC/USDT", "2020/03/17 09:00:01", dec!(2)),
        ]);
        let mut backward = OrderBook::new();
        backward.insert(order(Side::Bid, "BTC/USDT", "2020/03/17 09:00:01", dec!(2)));
        backward.insert(order(Side::Ask, "ETH/USDT", "2020/03/17 09:00:00", dec!(1)));

        assert_eq!(forward.known_products(), backward.known_products());
        assert_eq!(forward.known_products().len(), 2);
    }

    #[test]
    fn clock_wraps_around_the_distinct_timestamps() {
        let book = OrderBook::from_orders(vec![
            order(Side::Ask, "ETH/USDT", "2020/03/17 09:00:00", dec!(1)),
            order(Side::Ask, "ETH/USDT", "2020/03/17 09:00:05", dec!(1)),
            order(Side::Ask, "ETH/USDT", "2020/03/17 09:00:10", dec!(1)),
        ]);

        let t1 = ts("2020/03/17 09:00:00");
        let t2 = ts("2020/03/17 09:00:05");
        let t3 = ts("2020/03/17 09:00:10");

        assert_eq!(book.earliest_time().unwrap(), t1);
        assert_eq!(book.next_time(&t1).unwrap(), t2);
        assert_eq!(book.next_time(&t2).unwrap(), t3);
        assert_eq!(book.next_time(&t3).unwrap(), t1);
    }

    #[test]
    fn empty_book_has_no_time() {
        let book = OrderBook::new();
        assert_eq!(book.earliest_time(), Err(BookError::EmptyBook));
        assert_eq!(
            book.next_time(&ts("2020/03/17 09:00:00")),
            Err(BookError::EmptyBook)
        );
    }

    #[test]
    fn high_and_low_over_a_selection() {
        let sel = vec![
            order(Side::Ask, "ETH/USDT", "2020/03/17 09:00:00", dec!(3.5)),
            order(Side::Ask, "ETH/USDT", "2020/03/17 09:00:00", dec!(1.25)),
            order(Side::Ask, "ETH/USDT", "2020/03/17 09:00:00", dec!(2)),
        ];
        assert_eq!(OrderBook::high_price(&sel).unwrap(), dec!(3.5));
        assert_eq!(OrderBook::low_price(&sel).unwrap(), dec!(1.25));
    }

    #[test]
    fn price_queries_reject_an_empty_selection() {
        assert_eq!(OrderBook::high_price(&[]), Err(BookError::EmptySelection));
        assert_eq!(OrderBook::low_price(&[]), Err(BookError::EmptySelection));
    }

    #[test]
    fn matching_leaves_the_store_untouched() {
        let stamp = "2020/06/01 12:00:00";
        let book = OrderBook::from_orders(vec![
            order(Side::Ask, "ETH/USDT", stamp, dec!(200)),
            order(Side::Bid, "ETH/USDT", stamp, dec!(205)),
        ]);
        let auction = BatchAuction::new(TraderId::new("sim-1"));

        let trades = book.match_asks_to_bids(&Product::new("ETH/USDT"), &ts(stamp), &auction);

        assert_eq!(trades.len(), 1);
        // The persisted copies keep their full amounts
        assert!(book.orders().iter().all(|o| o.amount == dec!(1.0)));
    }

    #[test]
    fn one_sided_market_matches_nothing() {
        let stamp = "2020/06/01 12:00:00";
        let book = OrderBook::from_orders(vec![order(Side::Ask, "ETH/USDT", stamp, dec!(200))]);
        let auction = BatchAuction::new(TraderId::new("sim-1"));

        let trades = book.match_asks_to_bids(&Product::new("ETH/USDT"), &ts(stamp), &auction);
        assert!(trades.is_empty());
    }
}
