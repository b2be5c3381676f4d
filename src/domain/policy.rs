//! Trade policy: turns a signal plus ledger state into a trade intent.
//!
//! Deliberately simple and sequential: at most one open position per
//! instrument, fixed-notional entries, full liquidation on exit. No
//! averaging in, no partial exits, no other sizing logic.

use std::fmt;

use crate::domain::ledger::Ledger;
use crate::domain::signal::{Signal, SignalKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// A proposed trade, not yet applied to the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeIntent {
    pub instrument: String,
    pub side: Side,
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TradePolicy {
    /// Cash value committed to each entry (quantity × price).
    pub trade_notional: f64,
}

impl TradePolicy {
    pub fn new(trade_notional: f64) -> Self {
        TradePolicy { trade_notional }
    }

    /// Decide whether a signal should become a trade.
    ///
    /// `None` means no action: duplicate entries, unaffordable entries and
    /// exits without a position are silently skipped, not errors.
    pub fn decide(&self, signal: &Signal, ledger: &Ledger) -> Option<TradeIntent> {
        match signal.kind {
            SignalKind::Buy => {
                if ledger.has_holding(&signal.instrument) {
                    return None;
                }
                if ledger.cash_balance < self.trade_notional {
                    return None;
                }
                Some(TradeIntent {
                    instrument: signal.instrument.clone(),
                    side: Side::Buy,
                    quantity: self.trade_notional / signal.reference_price,
                })
            }
            SignalKind::Sell => {
                let holding = ledger.holding(&signal.instrument)?;
                Some(TradeIntent {
                    instrument: signal.instrument.clone(),
                    side: Side::Sell,
                    quantity: holding.amount,
                })
            }
            SignalKind::Hold => None,
        }
    }
}
