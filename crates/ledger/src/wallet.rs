use std::collections::BTreeMap;
use std::fmt;

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hermes_core::{Order, Side, Trade, TradeSide};

use crate::error::LedgerError;

/// Per-currency holdings of one simulated trader.
///
/// Balances live in a sorted map so display order is deterministic.
/// Funding checks gate order placement; settlement adjusts balances
/// unconditionally, because the funding decision was already made when the
/// order entered the book.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wallet {
    balances: BTreeMap<String, Decimal>,
}

impl Wallet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` of `currency`. Negative deposits are rejected.
    pub fn deposit(
        &mut self,
        currency: impl Into<String>,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        let currency = currency.into();
        if amount < Decimal::ZERO {
            return Err(LedgerError::NegativeDeposit(currency));
        }
        *self.balances.entry(currency).or_insert(Decimal::ZERO) += amount;
        Ok(())
    }

    /// Remove `amount` of `currency` if the balance covers it.
    /// Returns whether the withdrawal happened; balances never go negative
    /// through this path.
    pub fn withdraw(&mut self, currency: &str, amount: Decimal) -> bool {
        if amount < Decimal::ZERO || !self.has_at_least(currency, amount) {
            return false;
        }
        if let Some(balance) = self.balances.get_mut(currency) {
            *balance -= amount;
            return true;
        }
        false
    }

    pub fn balance(&self, currency: &str) -> Decimal {
        self.balances
            .get(currency)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn has_at_least(&self, currency: &str, amount: Decimal) -> bool {
        self.balance(currency) >= amount
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Whether the wallet covers a new order: an ask needs `amount` of
    /// BASE, a bid needs `amount * price` of QUOTE.
    pub fn can_fund(&self, order: &Order) -> bool {
        let Some((base, quote)) = order.product.split() else {
            debug!("cannot fund {}: product has no BASE/QUOTE form", order.product);
            return false;
        };
        match order.side {
            Side::Ask => self.has_at_least(base, order.amount),
            Side::Bid => self.has_at_least(quote, order.notional()),
        }
    }

    /// Settle one matched trade against the holdings.
    ///
    /// `AskSale`: the trader sold BASE - QUOTE grows by the notional, BASE
    /// shrinks by the amount. `BidSale`: the trader bought BASE - the
    /// adjustments run the other way.
    pub fn apply_trade(&mut self, trade: &Trade) -> Result<(), LedgerError> {
        let Some((base, quote)) = trade.product.split() else {
            return Err(LedgerError::MalformedProduct(trade.product.to_string()));
        };
        let (base, quote) = (base.to_string(), quote.to_string());

        match trade.side {
            TradeSide::AskSale => {
                *self.balances.entry(quote).or_insert(Decimal::ZERO) += trade.notional();
                *self.balances.entry(base).or_insert(Decimal::ZERO) -= trade.amount;
            }
            TradeSide::BidSale => {
                *self.balances.entry(base).or_insert(Decimal::ZERO) += trade.amount;
                *self.balances.entry(quote).or_insert(Decimal::ZERO) -= trade.notional();
            }
        }
        Ok(())
    }
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (currency, balance) in &self.balances {
            writeln!(f, "{currency} : {balance}")?;
        }
        Ok(())
    }
}
