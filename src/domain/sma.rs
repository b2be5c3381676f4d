//! Simple moving average over the tail of a price series.

use crate::domain::error::CrosstraderError;

/// Arithmetic mean of the most recent `period` closes.
///
/// Returns `InsufficientData` when the series is shorter than the window;
/// callers treat that as "no signal yet", not a failure.
pub fn moving_average(closes: &[f64], period: usize) -> Result<f64, CrosstraderError> {
    if period == 0 {
        return Err(CrosstraderError::InvalidInput {
            reason: "moving average period must be positive".into(),
        });
    }
    if closes.len() < period {
        return Err(CrosstraderError::InsufficientData {
            have: closes.len(),
            need: period,
        });
    }

    let window = &closes[closes.len() - period..];
    Ok(window.iter().sum::<f64>() / period as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_of_full_series() {
        let closes = [10.0, 20.0, 30.0];
        let avg = moving_average(&closes, 3).unwrap();
        assert!((avg - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn average_uses_most_recent_window() {
        let closes = [100.0, 10.0, 20.0, 30.0];
        let avg = moving_average(&closes, 3).unwrap();
        assert!((avg - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn period_one_is_last_close() {
        let closes = [10.0, 20.0, 42.5];
        let avg = moving_average(&closes, 1).unwrap();
        assert!((avg - 42.5).abs() < f64::EPSILON);
    }

    #[test]
    fn short_series_is_insufficient_data() {
        let closes = [10.0, 20.0];
        let err = moving_average(&closes, 3).unwrap_err();
        match err {
            CrosstraderError::InsufficientData { have, need } => {
                assert_eq!(have, 2);
                assert_eq!(need, 3);
            }
            other => panic!("expected InsufficientData, got {other:?}"),
        }
    }

    #[test]
    fn empty_series_is_insufficient_data() {
        let closes: [f64; 0] = [];
        assert!(matches!(
            moving_average(&closes, 5),
            Err(CrosstraderError::InsufficientData { have: 0, need: 5 })
        ));
    }

    #[test]
    fn zero_period_is_invalid_input() {
        let closes = [10.0, 20.0];
        assert!(matches!(
            moving_average(&closes, 0),
            Err(CrosstraderError::InvalidInput { .. })
        ));
    }

    #[test]
    fn deterministic() {
        let closes = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let a = moving_average(&closes, 4).unwrap();
        let b = moving_average(&closes, 4).unwrap();
        assert_eq!(a, b);
    }
}
