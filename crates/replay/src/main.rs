use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::Parser;
use rust_decimal::Decimal;

use hermes_core::{Product, TraderId};
use hermes_replay::{Console, Session, SessionConfig};

/// Replay historical order data on a discrete clock and trade against it.
#[derive(Parser, Debug)]
#[command(name = "hermes-replay", version, about)]
struct Cli {
    /// CSV data source; repeat for multiple files
    #[arg(long = "data", required = true)]
    data: Vec<PathBuf>,

    /// Product to drive through matching; repeat for multiple, default all
    #[arg(long = "product")]
    products: Vec<String>,

    /// Initial deposit as CUR=AMOUNT; repeat for multiple
    #[arg(long = "deposit", value_parser = parse_deposit)]
    deposits: Vec<(String, Decimal)>,

    /// Identity attached to orders placed from the console
    #[arg(long, default_value = "sim-1")]
    trader: String,

    /// Where the candle JSON export goes
    #[arg(long, default_value = "candles.json")]
    export: PathBuf,
}

fn parse_deposit(arg: &str) -> Result<(String, Decimal), String> {
    let Some((currency, amount)) = arg.split_once('=') else {
        return Err(format!("`{arg}` is not CUR=AMOUNT"));
    };
    let amount =
        Decimal::from_str(amount).map_err(|_| format!("`{amount}` is not a decimal amount"))?;
    Ok((currency.to_string(), amount))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = SessionConfig {
        sources: cli.data,
        trader: TraderId::new(cli.trader),
        products: cli.products.into_iter().map(Product::new).collect(),
        deposits: cli.deposits,
    };
    let mut session = Session::open(config).context("could not open replay session")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    Console::new(stdin.lock(), stdout.lock())
        .run(&mut session, &cli.export)
        .context("console loop failed")?;

    Ok(())
}
