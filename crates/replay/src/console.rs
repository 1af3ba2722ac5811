//! Interactive replay console.
//!
//! Generic over its input and output streams so the menu loop can be
//! driven from tests with scripted input.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;

use hermes_core::{Price, Product, Side};

use crate::charts;
use crate::export::write_candles_json;
use crate::session::{PlaceOutcome, Session};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run the menu loop until the user quits or input ends.
    pub fn run(&mut self, session: &mut Session, export_path: &Path) -> io::Result<()> {
        loop {
            self.print_menu(session)?;
            let Some(line) = self.read_line()? else {
                break;
            };
            match line.trim() {
                "0" => break,
                "1" => self.print_help()?,
                "2" => self.print_market_stats(session)?,
                "3" => self.enter_order(session, Side::Ask)?,
                "4" => self.enter_order(session, Side::Bid)?,
                "5" => write!(self.output, "{}", session.wallet())?,
                "6" => self.advance(session)?,
                "7" => self.print_candlesticks(session)?,
                "8" => self.print_volumes(session)?,
                "9" => self.print_mean_prices(session)?,
                "10" => self.print_trade_counts(session)?,
                "11" => self.export_candles(session, export_path)?,
                other => writeln!(self.output, "invalid choice: {other}")?,
            }
        }
        Ok(())
    }

    fn print_menu(&mut self, session: &Session) -> io::Result<()> {
        writeln!(self.output, "\n==== {} ====", session.current_time())?;
        writeln!(self.output, "1: Print help")?;
        writeln!(self.output, "2: Print market stats")?;
        writeln!(self.output, "3: Make an ask")?;
        writeln!(self.output, "4: Make a bid")?;
        writeln!(self.output, "5: Print wallet")?;
        writeln!(self.output, "6: Continue to next timeframe")?;
        writeln!(self.output, "7: Candlestick chart")?;
        writeln!(self.output, "8: Volume chart")?;
        writeln!(self.output, "9: Mean price chart")?;
        writeln!(self.output, "10: Orders per product")?;
        writeln!(self.output, "11: Export candles to JSON")?;
        writeln!(self.output, "0: Quit")?;
        write!(self.output, "> ")?;
        self.output.flush()
    }

    fn print_help(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "Your aim is to make money. Analyse the market, place asks and \
             bids, and advance the clock to see them matched."
        )
    }

    fn print_market_stats(&mut self, session: &Session) -> io::Result<()> {
        for product in session.products() {
            let stats = session.market_stats(product);
            writeln!(self.output, "{} @ {}", stats.product, session.current_time())?;
            writeln!(
                self.output,
                "  asks: {} (min {}, max {})",
                stats.ask_count,
                fmt_price(stats.ask_low),
                fmt_price(stats.ask_high)
            )?;
            writeln!(
                self.output,
                "  bids: {} (min {}, max {})",
                stats.bid_count,
                fmt_price(stats.bid_low),
                fmt_price(stats.bid_high)
            )?;
        }
        Ok(())
    }

    fn enter_order(&mut self, session: &mut Session, side: Side) -> io::Result<()> {
        write!(
            self.output,
            "make {}: product,price,amount (e.g. ETH/USDT,200,0.5)\n> ",
            side.as_str()
        )?;
        self.output.flush()?;
        let Some(line) = self.read_line()? else {
            return Ok(());
        };

        let fields: Vec<&str> = line.trim().split(',').collect();
        let [product, price, amount] = fields.as_slice() else {
            writeln!(self.output, "bad input: expected 3 comma-separated fields")?;
            return Ok(());
        };
        let (Ok(price), Ok(amount)) = (Decimal::from_str(price), Decimal::from_str(amount)) else {
            writeln!(self.output, "bad input: price and amount must be decimals")?;
            return Ok(());
        };

        match session.place_order(side, Product::new(*product), price, amount) {
            PlaceOutcome::Accepted => writeln!(self.output, "order placed")?,
            PlaceOutcome::InsufficientFunds => {
                writeln!(self.output, "wallet has insufficient funds")?
            }
        }
        Ok(())
    }

    fn advance(&mut self, session: &mut Session) -> io::Result<()> {
        match session.advance() {
            Ok(trades) => {
                let settled = trades
                    .iter()
                    .filter(|t| t.is_owned_by(session.trader()))
                    .count();
                writeln!(
                    self.output,
                    "{} trades struck, {} settled for {}",
                    trades.len(),
                    settled,
                    session.trader()
                )?;
                writeln!(self.output, "clock is now at {}", session.current_time())?;
            }
            Err(err) => writeln!(self.output, "tick failed: {err}")?,
        }
        Ok(())
    }

    fn print_candlesticks(&mut self, session: &Session) -> io::Result<()> {
        let Some((product, side)) = self.prompt_product_and_side()? else {
            return Ok(());
        };
        let candles = session.series().candlesticks(side, &product);
        write!(self.output, "{}", charts::candlestick_chart(&candles))
    }

    fn print_volumes(&mut self, session: &Session) -> io::Result<()> {
        let Some((product, side)) = self.prompt_product_and_side()? else {
            return Ok(());
        };
        let volumes = session.series().volume_series(side, &product);
        write!(self.output, "{}", charts::volume_chart(&volumes))
    }

    fn print_mean_prices(&mut self, session: &Session) -> io::Result<()> {
        let Some((product, side)) = self.prompt_product_and_side()? else {
            return Ok(());
        };
        let means = session.series().mean_price_by_minute(side, &product);
        write!(self.output, "{}", charts::mean_price_chart(&means))
    }

    fn print_trade_counts(&mut self, session: &Session) -> io::Result<()> {
        for (product, count) in session.series().trade_counts_by_product() {
            writeln!(self.output, "{product} : {count}")?;
        }
        Ok(())
    }

    fn export_candles(&mut self, session: &Session, path: &Path) -> io::Result<()> {
        let Some((product, side)) = self.prompt_product_and_side()? else {
            return Ok(());
        };
        let candles = session.series().candlesticks(side, &product);
        match write_candles_json(&candles, path) {
            Ok(()) => writeln!(
                self.output,
                "{} candles written to {}",
                candles.len(),
                path.display()
            ),
            Err(err) => writeln!(self.output, "export failed: {err}"),
        }
    }

    fn prompt_product_and_side(&mut self) -> io::Result<Option<(Product, Side)>> {
        write!(self.output, "product,side (e.g. ETH/USDT,ask)\n> ")?;
        self.output.flush()?;
        let Some(line) = self.read_line()? else {
            return Ok(None);
        };

        let Some((product, side)) = line.trim().split_once(',') else {
            writeln!(self.output, "bad input: expected product,side")?;
            return Ok(None);
        };
        let side = match side.trim() {
            "ask" => Side::Ask,
            "bid" => Side::Bid,
            other => {
                writeln!(self.output, "bad input: unknown side `{other}`")?;
                return Ok(None);
            }
        };
        Ok(Some((Product::new(product.trim()), side)))
    }

    /// `None` means end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

fn fmt_price(price: Option<Price>) -> String {
    match price {
        Some(p) => p.to_string(),
        None => "-".to_string(),
    }
}
