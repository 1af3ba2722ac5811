use std::path::PathBuf;

use log::info;
use rust_decimal::Decimal;
use thiserror::Error;

use hermes_book::{BookError, OrderBook, SeriesBuilder};
use hermes_core::{Order, Price, Product, Quantity, Side, Timestamp, Trade, TraderId};
use hermes_ingest::{IngestError, all_timestamps, read_orders};
use hermes_ledger::{LedgerError, Wallet};
use hermes_matching::BatchAuction;

/// Errors raised while opening or driving a replay session
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Book(#[from] BookError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Everything needed to open a session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// CSV data sources, replayed as one merged timeline
    pub sources: Vec<PathBuf>,
    /// Identity attached to orders placed from the console
    pub trader: TraderId,
    /// Products to drive through matching; empty means every product
    /// present in the data
    pub products: Vec<Product>,
    /// Initial wallet holdings, `(currency, amount)`
    pub deposits: Vec<(String, Decimal)>,
}

/// Outcome of an order placement attempt.
///
/// A rejection is a ledger decision, not an engine error: the book itself
/// accepts any well-formed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceOutcome {
    Accepted,
    InsufficientFunds,
}

/// Ask/bid summary for one product at one instant
#[derive(Debug, Clone)]
pub struct MarketStats {
    pub product: Product,
    pub ask_count: usize,
    pub bid_count: usize,
    pub ask_high: Option<Price>,
    pub ask_low: Option<Price>,
    pub bid_high: Option<Price>,
    pub bid_low: Option<Price>,
}

/// One replay run: the order history, the global timeline, the trader's
/// wallet, and the clock cursor.
///
/// The session is the single logical actor the engine is documented for -
/// it alone mutates the book and the wallet, strictly between clock ticks.
pub struct Session {
    book: OrderBook,
    timeline: Vec<Timestamp>,
    wallet: Wallet,
    auction: BatchAuction,
    products: Vec<Product>,
    current_time: Timestamp,
}

impl Session {
    /// Load every configured source, seed the wallet, and park the clock
    /// at the earliest instant in the data.
    pub fn open(config: SessionConfig) -> Result<Self, SessionError> {
        let mut orders = Vec::new();
        for path in &config.sources {
            orders.extend(read_orders(path)?);
        }
        let timeline = all_timestamps(&config.sources)?;
        let book = OrderBook::from_orders(orders);
        let current_time = book.earliest_time()?;

        let mut wallet = Wallet::new();
        for (currency, amount) in &config.deposits {
            wallet.deposit(currency.clone(), *amount)?;
        }

        let products: Vec<Product> = if config.products.is_empty() {
            book.known_products().into_iter().collect()
        } else {
            config.products
        };

        info!(
            "session open: {} orders, {} instants, {} products, clock at {}",
            book.len(),
            timeline.len(),
            products.len(),
            current_time
        );

        Ok(Self {
            book,
            timeline,
            wallet,
            auction: BatchAuction::new(config.trader),
            products,
            current_time,
        })
    }

    pub fn current_time(&self) -> &Timestamp {
        &self.current_time
    }

    pub fn trader(&self) -> &TraderId {
        self.auction.trader()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// Series aggregation over the session's book and timeline
    pub fn series(&self) -> SeriesBuilder<'_> {
        SeriesBuilder::new(&self.book, &self.timeline)
    }

    /// Place a trader order at the current instant, gated by the wallet.
    pub fn place_order(
        &mut self,
        side: Side,
        product: Product,
        price: Price,
        amount: Quantity,
    ) -> PlaceOutcome {
        let order = Order::placed_by(
            self.trader().clone(),
            product,
            side,
            price,
            amount,
            self.current_time.clone(),
        );

        if !self.wallet.can_fund(&order) {
            info!(
                "order rejected for {}: wallet cannot fund {} {} @ {}",
                order.product,
                order.amount,
                order.side.as_str(),
                order.price
            );
            return PlaceOutcome::InsufficientFunds;
        }

        self.book.insert(order);
        PlaceOutcome::Accepted
    }

    /// Run one clock tick: match every driven product at the current
    /// instant, settle the trader's own trades, then step the cursor to
    /// the next instant (wrapping at the end of the timeline).
    ///
    /// Returns every trade struck this tick, the trader's and the
    /// dataset's alike.
    pub fn advance(&mut self) -> Result<Vec<Trade>, SessionError> {
        let mut all_trades = Vec::new();

        for product in &self.products {
            let trades = self
                .book
                .match_asks_to_bids(product, &self.current_time, &self.auction);
            for trade in &trades {
                if trade.is_owned_by(self.auction.trader()) {
                    self.wallet.apply_trade(trade)?;
                }
            }
            all_trades.extend(trades);
        }

        self.current_time = self.book.next_time(&self.current_time)?;
        Ok(all_trades)
    }

    /// Ask/bid summary for one product at the current instant.
    pub fn market_stats(&self, product: &Product) -> MarketStats {
        let asks = self
            .book
            .orders_matching(Side::Ask, product, &self.current_time);
        let bids = self
            .book
            .orders_matching(Side::Bid, product, &self.current_time);

        MarketStats {
            product: product.clone(),
            ask_count: asks.len(),
            bid_count: bids.len(),
            ask_high: OrderBook::high_price(&asks).ok(),
            ask_low: OrderBook::low_price(&asks).ok(),
            bid_high: OrderBook::high_price(&bids).ok(),
            bid_low: OrderBook::low_price(&bids).ok(),
        }
    }
}
