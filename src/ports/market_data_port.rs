//! Market data port trait: candle history and live price lookup.

use crate::domain::candle::Candle;
use crate::domain::error::CrosstraderError;

pub trait MarketDataPort {
    /// The most recent `limit` candles for `instrument`, oldest first.
    fn fetch_candles(
        &self,
        instrument: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, CrosstraderError>;

    /// The latest traded price for `instrument`.
    fn latest_price(&self, instrument: &str) -> Result<f64, CrosstraderError>;

    /// All instruments this source can serve, sorted.
    fn list_instruments(&self) -> Result<Vec<String>, CrosstraderError>;
}
