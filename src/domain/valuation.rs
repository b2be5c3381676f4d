//! Read-only portfolio valuation against current market prices.

use std::collections::HashMap;

use crate::domain::ledger::Ledger;

#[derive(Debug, Clone, PartialEq)]
pub struct HoldingValuation {
    pub instrument: String,
    pub amount: f64,
    pub avg_cost: f64,
    pub market_value: f64,
    pub unrealized_pnl: f64,
    pub unrealized_pnl_pct: f64,
    /// False when no current price was available and the holding was
    /// valued at its average cost instead.
    pub priced: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioValuation {
    pub cash_balance: f64,
    pub holdings_value: f64,
    pub total_value: f64,
    pub per_holding: Vec<HoldingValuation>,
}

/// Value every holding at the prices in `price_map`.
///
/// An instrument missing from the map is valued at its average cost with
/// zero unrealized P&L (stale-but-safe) rather than failing the whole
/// valuation. Holdings are reported in instrument order for stable output.
pub fn value_portfolio(ledger: &Ledger, price_map: &HashMap<String, f64>) -> PortfolioValuation {
    let mut per_holding: Vec<HoldingValuation> = ledger
        .holdings
        .iter()
        .map(|(instrument, holding)| match price_map.get(instrument) {
            Some(&price) => HoldingValuation {
                instrument: instrument.clone(),
                amount: holding.amount,
                avg_cost: holding.avg_cost,
                market_value: holding.market_value(price),
                unrealized_pnl: holding.unrealized_pnl(price),
                unrealized_pnl_pct: holding.unrealized_pnl_pct(price),
                priced: true,
            },
            None => HoldingValuation {
                instrument: instrument.clone(),
                amount: holding.amount,
                avg_cost: holding.avg_cost,
                market_value: holding.cost_basis(),
                unrealized_pnl: 0.0,
                unrealized_pnl_pct: 0.0,
                priced: false,
            },
        })
        .collect();

    per_holding.sort_by(|a, b| a.instrument.cmp(&b.instrument));

    let holdings_value: f64 = per_holding.iter().map(|h| h.market_value).sum();

    PortfolioValuation {
        cash_balance: ledger.cash_balance,
        holdings_value,
        total_value: ledger.cash_balance + holdings_value,
        per_holding,
    }
}
