use log::debug;
use rust_decimal::Decimal;

use hermes_core::{Order, Quantity, Trade, TradeSide, TraderId};

/// Batch double auction over one instant of the timeline.
///
/// The auction is handed independent copies of the resting asks and bids;
/// partial-fill bookkeeping mutates those copies only, so the book's
/// persisted entries are never edited by a match.
///
/// Pairing rules:
/// - asks are visited cheapest first, bids richest first; price ties keep
///   insertion order (stable sort)
/// - a pair trades when `bid.price >= ask.price`, always at the ask's price
/// - the traded quantity is `min(ask.amount, bid.amount)`; whichever side
///   reaches zero drops out, and equal amounts consume both
pub struct BatchAuction {
    trader: TraderId,
}

impl BatchAuction {
    pub fn new(trader: TraderId) -> Self {
        Self { trader }
    }

    pub fn trader(&self) -> &TraderId {
        &self.trader
    }

    /// Cross `asks` against `bids` and return the trades in the order they
    /// were struck (ask-major, bid-minor).
    ///
    /// An empty result is the normal outcome for a thin or one-sided
    /// market, never an error.
    pub fn run(&self, mut asks: Vec<Order>, mut bids: Vec<Order>) -> Vec<Trade> {
        let mut trades = Vec::new();

        if asks.is_empty() || bids.is_empty() {
            debug!("batch auction skipped: one-sided market");
            return trades;
        }

        // Stable sorts keep insertion order among equal prices
        asks.sort_by(|a, b| a.price.cmp(&b.price));
        bids.sort_by(|a, b| b.price.cmp(&a.price));

        for ask in asks.iter_mut() {
            for bid in bids.iter_mut() {
                if bid.amount <= Decimal::ZERO {
                    // consumed by an earlier ask
                    continue;
                }
                if bid.price < ask.price {
                    continue;
                }

                if bid.amount == ask.amount {
                    // Both sides fully consumed; next ask
                    let filled = ask.amount;
                    trades.push(self.record(ask, bid, filled));
                    bid.amount = Decimal::ZERO;
                    break;
                } else if bid.amount > ask.amount {
                    // Ask exhausted; the bid keeps its remainder
                    let filled = ask.amount;
                    trades.push(self.record(ask, bid, filled));
                    bid.amount -= filled;
                    break;
                } else {
                    // Bid exhausted; keep scanning bids with the reduced ask
                    let filled = bid.amount;
                    trades.push(self.record(ask, bid, filled));
                    ask.amount -= filled;
                    bid.amount = Decimal::ZERO;
                }
            }
        }

        trades
    }

    /// Build the trade record for one fill.
    ///
    /// The settlement tag defaults to an unowned `AskSale`. The bid side is
    /// checked first, then the ask side; when both belong to the trader the
    /// ask check wins. That precedence is long-standing replay behavior and
    /// is pinned by test rather than changed.
    fn record(&self, ask: &Order, bid: &Order, amount: Quantity) -> Trade {
        let mut side = TradeSide::AskSale;
        let mut owner = None;

        if bid.is_owned_by(&self.trader) {
            side = TradeSide::BidSale;
            owner = Some(self.trader.clone());
        }
        if ask.is_owned_by(&self.trader) {
            side = TradeSide::AskSale;
            owner = Some(self.trader.clone());
        }

        Trade::new(
            ask.product.clone(),
            ask.price,
            amount,
            ask.timestamp.clone(),
            side,
            owner,
            ask.id,
            bid.id,
        )
    }
}
