use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};

use hermes_core::{Candle, Order, Price, Product, Quantity, Side, Timestamp};

use crate::order_book::OrderBook;

/// Chart-ready series derived from the book.
///
/// The builder iterates an externally supplied timeline: the sorted,
/// de-duplicated set of every timestamp across all configured data sources.
/// The timeline may hold instants with no orders for a given side/product;
/// each series documents whether such instants are skipped or emitted as
/// zeroes.
pub struct SeriesBuilder<'a> {
    book: &'a OrderBook,
    timeline: &'a [Timestamp],
}

impl<'a> SeriesBuilder<'a> {
    pub fn new(book: &'a OrderBook, timeline: &'a [Timestamp]) -> Self {
        Self { book, timeline }
    }

    /// OHLC candlesticks for one side of one product, sparse over the
    /// timeline: instants with no matching orders emit no candle.
    ///
    /// `close` is the amount-weighted average price of the instant's
    /// orders. `open` is the previous emitted candle's close (the very
    /// first candle opens at its own close), so the open/close chain is
    /// continuous and gaps are compressed away.
    pub fn candlesticks(&self, side: Side, product: &Product) -> Vec<Candle> {
        let mut candles = Vec::new();
        let mut prev_close = Decimal::ZERO;

        for ts in self.timeline {
            let entries = self.book.orders_matching(side, product, ts);
            if entries.is_empty() {
                continue;
            }

            let Ok(high) = OrderBook::high_price(&entries) else {
                continue;
            };
            let Ok(low) = OrderBook::low_price(&entries) else {
                continue;
            };

            let total_value: Decimal = entries.iter().map(Order::notional).sum();
            let total_amount: Decimal = entries.iter().map(|o| o.amount).sum();
            if total_amount.is_zero() {
                // cannot price an instant whose orders carry no amount
                continue;
            }
            let close = total_value / total_amount;

            let open = if candles.is_empty() { close } else { prev_close };
            candles.push(Candle::new(ts.clone(), open, high, low, close));
            prev_close = close;
        }

        candles
    }

    /// Total traded-side volume per timeline instant. Every instant emits a
    /// point; instants with no matching orders emit zero.
    pub fn volume_series(&self, side: Side, product: &Product) -> Vec<(Timestamp, Quantity)> {
        self.timeline
            .iter()
            .map(|ts| {
                let total: Decimal = self
                    .book
                    .orders_matching(side, product, ts)
                    .iter()
                    .map(|o| o.amount)
                    .sum();
                (ts.clone(), total)
            })
            .collect()
    }

    /// Count of stored raw orders per product, across all sides and
    /// timestamps. This counts book entries, not executed trades.
    pub fn trade_counts_by_product(&self) -> BTreeMap<Product, u64> {
        let mut counts = BTreeMap::new();
        for order in self.book.orders() {
            *counts.entry(order.product.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Arithmetic mean price per `"HH:MM"` minute bucket for one side of
    /// one product, in ascending bucket order.
    ///
    /// Means are rounded to 6 decimal places, half away from zero.
    pub fn mean_price_by_minute(&self, side: Side, product: &Product) -> Vec<(String, Price)> {
        let mut by_minute: BTreeMap<String, Vec<Price>> = BTreeMap::new();
        for order in self.book.orders() {
            if order.side == side && &order.product == product {
                by_minute
                    .entry(order.timestamp.minute().to_string())
                    .or_default()
                    .push(order.price);
            }
        }

        by_minute
            .into_iter()
            .map(|(minute, prices)| {
                let sum: Decimal = prices.iter().copied().sum();
                let mean = (sum / Decimal::from(prices.len() as u64))
                    .round_dp_with_strategy(6, RoundingStrategy::MidpointAwayFromZero);
                (minute, mean)
            })
            .collect()
    }
}
