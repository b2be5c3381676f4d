//! Portfolio ledger: cash, holdings and trade accounting.
//!
//! The ledger is the only mutable aggregate in the engine. `apply_buy` and
//! `apply_sell` are its only mutators; every other component reads it
//! through `&Ledger`. Both operations are all-or-nothing: a rejected trade
//! leaves the ledger untouched.

use std::collections::HashMap;

use crate::domain::error::CrosstraderError;
use crate::domain::holding::Holding;

/// Positions at or below this amount are treated as fully liquidated.
const AMOUNT_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    InsufficientFunds,
    InsufficientHoldings,
}

/// Result of a ledger mutation. Rejections are expected outcomes, not
/// errors; the trade policy should rarely produce intents that trigger
/// them, but the ledger enforces its preconditions independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeOutcome {
    Applied,
    Rejected(RejectReason),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    pub cash_balance: f64,
    pub initial_cash: f64,
    pub holdings: HashMap<String, Holding>,
    pub trade_count: u64,
    pub successful_trade_count: u64,
}

impl Ledger {
    pub fn new(initial_cash: f64) -> Self {
        Ledger {
            cash_balance: initial_cash,
            initial_cash,
            holdings: HashMap::new(),
            trade_count: 0,
            successful_trade_count: 0,
        }
    }

    pub fn holding(&self, instrument: &str) -> Option<&Holding> {
        self.holdings.get(instrument)
    }

    pub fn has_holding(&self, instrument: &str) -> bool {
        self.holdings.contains_key(instrument)
    }

    /// cash + Σ(amount × avg_cost). Conserved across successful
    /// buy/sell pairs with no external deposits.
    pub fn book_value(&self) -> f64 {
        let basis: f64 = self.holdings.values().map(Holding::cost_basis).sum();
        self.cash_balance + basis
    }

    /// Buy `quantity` of `instrument` at `price`.
    ///
    /// Repeated buys recompute the holding's average cost as the
    /// quantity-weighted average of the existing basis and the new lot.
    pub fn apply_buy(
        &mut self,
        instrument: &str,
        quantity: f64,
        price: f64,
    ) -> Result<TradeOutcome, CrosstraderError> {
        validate_order(quantity, price)?;

        let cost = quantity * price;
        if self.cash_balance < cost {
            return Ok(TradeOutcome::Rejected(RejectReason::InsufficientFunds));
        }

        self.cash_balance -= cost;

        match self.holdings.get_mut(instrument) {
            Some(holding) => {
                let total = holding.amount + quantity;
                holding.avg_cost = (holding.cost_basis() + cost) / total;
                holding.amount = total;
            }
            None => {
                self.holdings.insert(
                    instrument.to_string(),
                    Holding {
                        amount: quantity,
                        avg_cost: price,
                    },
                );
            }
        }

        self.trade_count += 1;
        self.successful_trade_count += 1;
        Ok(TradeOutcome::Applied)
    }

    /// Sell `quantity` of `instrument` at `price`.
    ///
    /// A holding whose amount reaches zero is removed outright; an average
    /// cost is meaningless for an empty position.
    pub fn apply_sell(
        &mut self,
        instrument: &str,
        quantity: f64,
        price: f64,
    ) -> Result<TradeOutcome, CrosstraderError> {
        validate_order(quantity, price)?;

        let Some(holding) = self.holdings.get_mut(instrument) else {
            return Ok(TradeOutcome::Rejected(RejectReason::InsufficientHoldings));
        };
        if holding.amount < quantity {
            return Ok(TradeOutcome::Rejected(RejectReason::InsufficientHoldings));
        }

        holding.amount -= quantity;
        self.cash_balance += quantity * price;

        if holding.amount <= AMOUNT_EPSILON {
            self.holdings.remove(instrument);
        }

        self.trade_count += 1;
        self.successful_trade_count += 1;
        Ok(TradeOutcome::Applied)
    }
}

fn validate_order(quantity: f64, price: f64) -> Result<(), CrosstraderError> {
    if !(quantity > 0.0) {
        return Err(CrosstraderError::InvalidInput {
            reason: format!("non-positive trade quantity {quantity}"),
        });
    }
    if !(price > 0.0) {
        return Err(CrosstraderError::InvalidInput {
            reason: format!("non-positive trade price {price}"),
        });
    }
    Ok(())
}
