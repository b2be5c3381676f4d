//! Open position in one instrument with weighted-average cost basis.

/// Owned exclusively by the ledger; exists only while `amount` > 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    pub amount: f64,
    pub avg_cost: f64,
}

impl Holding {
    /// amount × avg_cost
    pub fn cost_basis(&self) -> f64 {
        self.amount * self.avg_cost
    }

    /// amount × current price
    pub fn market_value(&self, price: f64) -> f64 {
        self.amount * price
    }

    /// (price − avg_cost) × amount
    pub fn unrealized_pnl(&self, price: f64) -> f64 {
        (price - self.avg_cost) * self.amount
    }

    /// Unrealized P&L as a percentage of the cost basis.
    pub fn unrealized_pnl_pct(&self, price: f64) -> f64 {
        self.unrealized_pnl(price) / self.cost_basis() * 100.0
    }
}
