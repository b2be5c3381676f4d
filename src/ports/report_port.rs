//! Cycle reporting port trait.

use crate::domain::error::CrosstraderError;
use crate::domain::ledger::Ledger;
use crate::domain::valuation::PortfolioValuation;

pub trait ReportPort {
    /// Write an end-of-cycle portfolio summary.
    fn cycle_summary(
        &self,
        cycle: u64,
        valuation: &PortfolioValuation,
        ledger: &Ledger,
    ) -> Result<(), CrosstraderError>;
}
