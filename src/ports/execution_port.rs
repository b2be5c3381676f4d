//! Order submission port trait.
//!
//! The core only decides *what* to submit; where the order goes (paper
//! record, live exchange) is an adapter concern.

use crate::domain::error::CrosstraderError;
use crate::domain::policy::TradeIntent;

pub trait ExecutionPort {
    /// Submit an order for `intent` at the given reference price.
    /// Returns an order identifier.
    fn submit(&mut self, intent: &TradeIntent, price: f64) -> Result<String, CrosstraderError>;
}
