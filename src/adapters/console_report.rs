//! Console portfolio summary adapter.
//!
//! Writes human-readable cycle summaries to stderr, keeping stdout free
//! for machine-readable output.

use crate::domain::error::CrosstraderError;
use crate::domain::ledger::Ledger;
use crate::domain::valuation::PortfolioValuation;
use crate::ports::report_port::ReportPort;

/// Optional second currency for display purposes only. The rate is
/// injected configuration, not a live lookup; the ledger itself is
/// single-currency.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayCurrency {
    pub code: String,
    pub rate: f64,
}

pub struct ConsoleReport {
    display: Option<DisplayCurrency>,
    trade_notional: f64,
}

impl ConsoleReport {
    pub fn new(display: Option<DisplayCurrency>, trade_notional: f64) -> Self {
        Self {
            display,
            trade_notional,
        }
    }

    fn format_amount(&self, amount: f64) -> String {
        match &self.display {
            Some(dc) => format!("${:.2} ({} {:.2})", amount, dc.code, amount * dc.rate),
            None => format!("${amount:.2}"),
        }
    }

    /// Whether the current cash balance still covers new entries, and how
    /// many fixed-notional entries it covers.
    fn capacity_line(&self, cash_balance: f64) -> String {
        if cash_balance < self.trade_notional {
            format!(
                "sell-only (cash below {} notional)",
                self.format_amount(self.trade_notional)
            )
        } else {
            let remaining = (cash_balance / self.trade_notional).floor() as u64;
            format!("buy+sell (trades remaining: {remaining})")
        }
    }
}

impl ReportPort for ConsoleReport {
    fn cycle_summary(
        &self,
        cycle: u64,
        valuation: &PortfolioValuation,
        ledger: &Ledger,
    ) -> Result<(), CrosstraderError> {
        eprintln!("\n=== Portfolio Summary (cycle {cycle}) ===");
        eprintln!("Cash:             {}", self.format_amount(valuation.cash_balance));

        if valuation.per_holding.is_empty() {
            eprintln!("Open positions:   none");
        } else {
            eprintln!("Open positions:");
            for h in &valuation.per_holding {
                if h.priced {
                    eprintln!(
                        "  {}: {:.6} @ {} | value {} | P&L {} ({:+.2}%)",
                        h.instrument,
                        h.amount,
                        self.format_amount(h.avg_cost),
                        self.format_amount(h.market_value),
                        self.format_amount(h.unrealized_pnl),
                        h.unrealized_pnl_pct,
                    );
                } else {
                    eprintln!(
                        "  {}: {:.6} @ {} | value {} (stale, at cost)",
                        h.instrument,
                        h.amount,
                        self.format_amount(h.avg_cost),
                        self.format_amount(h.market_value),
                    );
                }
            }
            eprintln!("Positions value:  {}", self.format_amount(valuation.holdings_value));
        }

        let total_pnl = valuation.total_value - ledger.initial_cash;
        let total_pnl_pct = total_pnl / ledger.initial_cash * 100.0;
        eprintln!("Initial cash:     {}", self.format_amount(ledger.initial_cash));
        eprintln!(
            "Total value:      {} | P&L {} ({:+.2}%)",
            self.format_amount(valuation.total_value),
            self.format_amount(total_pnl),
            total_pnl_pct,
        );

        let success_rate = if ledger.trade_count > 0 {
            ledger.successful_trade_count as f64 / ledger.trade_count as f64 * 100.0
        } else {
            0.0
        };
        eprintln!(
            "Trades:           {} total, {} successful ({:.1}%)",
            ledger.trade_count, ledger.successful_trade_count, success_rate,
        );
        eprintln!(
            "Mode:             {}",
            self.capacity_line(valuation.cash_balance)
        );

        Ok(())
    }
}
