//! Paper execution adapter: acknowledges orders without touching an
//! exchange. The ledger remains the authoritative record of simulated
//! fills; this adapter only hands out order identifiers and logs them.

use crate::domain::error::CrosstraderError;
use crate::domain::policy::TradeIntent;
use crate::ports::execution_port::ExecutionPort;

#[derive(Debug, Default)]
pub struct PaperExecution {
    next_order_id: u64,
}

impl PaperExecution {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExecutionPort for PaperExecution {
    fn submit(&mut self, intent: &TradeIntent, price: f64) -> Result<String, CrosstraderError> {
        self.next_order_id += 1;
        let order_id = format!("PAPER-{}", self.next_order_id);
        eprintln!(
            "[order {}] {} {:.6} {} @ ${:.2}",
            order_id, intent.side, intent.quantity, intent.instrument, price,
        );
        Ok(order_id)
    }
}
