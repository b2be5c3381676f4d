//! Candle (OHLCV) representation.

use chrono::NaiveDateTime;

#[derive(Debug, Clone)]
pub struct Candle {
    pub instrument: String,
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Extract the closing prices of a candle sequence, oldest first.
pub fn closing_prices(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}
