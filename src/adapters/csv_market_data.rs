//! CSV candle file market-data adapter.
//!
//! One file per instrument (`<INSTRUMENT>.csv`) with a header row and
//! columns `timestamp,open,high,low,close,volume`. Timestamps are
//! `YYYY-MM-DDTHH:MM:SS`. Rows may arrive out of order; candles are
//! sorted by timestamp before the tail window is taken.

use chrono::NaiveDateTime;
use std::fs;
use std::path::PathBuf;

use crate::domain::candle::Candle;
use crate::domain::error::CrosstraderError;
use crate::ports::market_data_port::MarketDataPort;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub struct CsvMarketData {
    data_dir: PathBuf,
}

impl CsvMarketData {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn csv_path(&self, instrument: &str) -> PathBuf {
        // Instruments like BTC/USD map to BTC-USD.csv.
        self.data_dir
            .join(format!("{}.csv", instrument.replace('/', "-")))
    }

    fn unavailable(instrument: &str, reason: impl ToString) -> CrosstraderError {
        CrosstraderError::DataUnavailable {
            instrument: instrument.to_string(),
            reason: reason.to_string(),
        }
    }

    fn parse_field(
        record: &csv::StringRecord,
        index: usize,
        name: &str,
        instrument: &str,
    ) -> Result<f64, CrosstraderError> {
        record
            .get(index)
            .ok_or_else(|| Self::unavailable(instrument, format!("missing {name} column")))?
            .parse()
            .map_err(|e| Self::unavailable(instrument, format!("invalid {name} value: {e}")))
    }

    fn read_all_candles(&self, instrument: &str) -> Result<Vec<Candle>, CrosstraderError> {
        let path = self.csv_path(instrument);
        let content = fs::read_to_string(&path).map_err(|e| {
            Self::unavailable(instrument, format!("failed to read {}: {}", path.display(), e))
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut candles = Vec::new();

        for result in rdr.records() {
            let record =
                result.map_err(|e| Self::unavailable(instrument, format!("CSV parse error: {e}")))?;

            let ts_str = record
                .get(0)
                .ok_or_else(|| Self::unavailable(instrument, "missing timestamp column"))?;
            let timestamp = NaiveDateTime::parse_from_str(ts_str, TIMESTAMP_FORMAT)
                .map_err(|e| Self::unavailable(instrument, format!("invalid timestamp: {e}")))?;

            candles.push(Candle {
                instrument: instrument.to_string(),
                timestamp,
                open: Self::parse_field(&record, 1, "open", instrument)?,
                high: Self::parse_field(&record, 2, "high", instrument)?,
                low: Self::parse_field(&record, 3, "low", instrument)?,
                close: Self::parse_field(&record, 4, "close", instrument)?,
                volume: Self::parse_field(&record, 5, "volume", instrument)?,
            });
        }

        candles.sort_by_key(|c| c.timestamp);
        Ok(candles)
    }
}

impl MarketDataPort for CsvMarketData {
    fn fetch_candles(
        &self,
        instrument: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, CrosstraderError> {
        let mut candles = self.read_all_candles(instrument)?;
        if candles.len() > limit {
            candles.drain(..candles.len() - limit);
        }
        Ok(candles)
    }

    fn latest_price(&self, instrument: &str) -> Result<f64, CrosstraderError> {
        let candles = self.read_all_candles(instrument)?;
        candles
            .last()
            .map(|c| c.close)
            .ok_or_else(|| CrosstraderError::PriceUnavailable {
                instrument: instrument.to_string(),
            })
    }

    fn list_instruments(&self) -> Result<Vec<String>, CrosstraderError> {
        let entries = fs::read_dir(&self.data_dir)?;

        let mut instruments = Vec::new();
        for entry in entries {
            let name = entry?.file_name();
            let name = name.to_string_lossy();
            if let Some(stem) = name.strip_suffix(".csv") {
                instruments.push(stem.to_string());
            }
        }

        instruments.sort();
        Ok(instruments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const HEADER: &str = "timestamp,open,high,low,close,volume\n";

    fn write_csv(dir: &TempDir, name: &str, rows: &[&str]) {
        let path = dir.path().join(name);
        let mut file = fs::File::create(path).unwrap();
        write!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
    }

    fn sample_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        write_csv(
            &dir,
            "BTC-USD.csv",
            &[
                "2024-01-15T00:00:00,100.0,105.0,99.0,101.0,10.0",
                "2024-01-15T01:00:00,101.0,106.0,100.0,102.5,11.0",
                "2024-01-15T02:00:00,102.5,108.0,102.0,107.0,12.0",
            ],
        );
        dir
    }

    #[test]
    fn fetch_candles_reads_and_orders() {
        let dir = sample_dir();
        let port = CsvMarketData::new(dir.path().to_path_buf());

        let candles = port.fetch_candles("BTC-USD", 10).unwrap();
        assert_eq!(candles.len(), 3);
        assert!((candles[0].close - 101.0).abs() < f64::EPSILON);
        assert!((candles[2].close - 107.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fetch_candles_keeps_most_recent_tail() {
        let dir = sample_dir();
        let port = CsvMarketData::new(dir.path().to_path_buf());

        let candles = port.fetch_candles("BTC-USD", 2).unwrap();
        assert_eq!(candles.len(), 2);
        assert!((candles[0].close - 102.5).abs() < f64::EPSILON);
        assert!((candles[1].close - 107.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fetch_candles_sorts_unordered_rows() {
        let dir = TempDir::new().unwrap();
        write_csv(
            &dir,
            "ETH-USD.csv",
            &[
                "2024-01-15T02:00:00,1.0,1.0,1.0,30.0,1.0",
                "2024-01-15T00:00:00,1.0,1.0,1.0,10.0,1.0",
                "2024-01-15T01:00:00,1.0,1.0,1.0,20.0,1.0",
            ],
        );
        let port = CsvMarketData::new(dir.path().to_path_buf());

        let candles = port.fetch_candles("ETH-USD", 10).unwrap();
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        assert_eq!(closes, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn slash_instrument_maps_to_dashed_file() {
        let dir = sample_dir();
        let port = CsvMarketData::new(dir.path().to_path_buf());

        let candles = port.fetch_candles("BTC/USD", 10).unwrap();
        assert_eq!(candles.len(), 3);
    }

    #[test]
    fn missing_file_is_data_unavailable() {
        let dir = TempDir::new().unwrap();
        let port = CsvMarketData::new(dir.path().to_path_buf());

        let err = port.fetch_candles("XRP-USD", 10).unwrap_err();
        assert!(matches!(err, CrosstraderError::DataUnavailable { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn malformed_close_is_data_unavailable() {
        let dir = TempDir::new().unwrap();
        write_csv(
            &dir,
            "BAD-USD.csv",
            &["2024-01-15T00:00:00,1.0,1.0,1.0,not_a_price,1.0"],
        );
        let port = CsvMarketData::new(dir.path().to_path_buf());

        assert!(matches!(
            port.fetch_candles("BAD-USD", 10),
            Err(CrosstraderError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn latest_price_is_last_close() {
        let dir = sample_dir();
        let port = CsvMarketData::new(dir.path().to_path_buf());

        let price = port.latest_price("BTC-USD").unwrap();
        assert!((price - 107.0).abs() < f64::EPSILON);
    }

    #[test]
    fn latest_price_empty_file_is_price_unavailable() {
        let dir = TempDir::new().unwrap();
        write_csv(&dir, "EMPTY-USD.csv", &[]);
        let port = CsvMarketData::new(dir.path().to_path_buf());

        assert!(matches!(
            port.latest_price("EMPTY-USD"),
            Err(CrosstraderError::PriceUnavailable { .. })
        ));
    }

    #[test]
    fn list_instruments_sorted() {
        let dir = TempDir::new().unwrap();
        write_csv(&dir, "ETH-USD.csv", &[]);
        write_csv(&dir, "BTC-USD.csv", &[]);
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        let port = CsvMarketData::new(dir.path().to_path_buf());

        assert_eq!(
            port.list_instruments().unwrap(),
            vec!["BTC-USD".to_string(), "ETH-USD".to_string()]
        );
    }
}
