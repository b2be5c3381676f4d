//! Crossover signal classification.

use std::fmt;

use crate::domain::error::CrosstraderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalKind::Buy => write!(f, "BUY"),
            SignalKind::Sell => write!(f, "SELL"),
            SignalKind::Hold => write!(f, "HOLD"),
        }
    }
}

/// A directional trade recommendation for one instrument.
///
/// `strength` is the crossover spread as a non-negative percentage of the
/// long average; it is a magnitude, not a signed value.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub instrument: String,
    pub kind: SignalKind,
    pub strength: f64,
    pub short_avg: f64,
    pub long_avg: f64,
    pub reference_price: f64,
}

/// Compare short and long moving averages and classify the result.
///
/// The long average must be strictly positive; prices are positive by
/// definition, so a non-positive average indicates a collaborator bug and
/// is surfaced as `InvalidInput`.
pub fn classify(
    instrument: &str,
    short_avg: f64,
    long_avg: f64,
    reference_price: f64,
) -> Result<Signal, CrosstraderError> {
    if long_avg <= 0.0 {
        return Err(CrosstraderError::InvalidInput {
            reason: format!("non-positive long average {long_avg} for {instrument}"),
        });
    }

    let (kind, strength) = if short_avg > long_avg {
        (SignalKind::Buy, (short_avg - long_avg) / long_avg * 100.0)
    } else if short_avg < long_avg {
        (SignalKind::Sell, (long_avg - short_avg) / long_avg * 100.0)
    } else {
        (SignalKind::Hold, 0.0)
    };

    Ok(Signal {
        instrument: instrument.to_string(),
        kind,
        strength,
        short_avg,
        long_avg,
        reference_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_above_long_is_buy() {
        let signal = classify("BTC-USD", 105.0, 100.0, 104.0).unwrap();
        assert_eq!(signal.kind, SignalKind::Buy);
        assert!((signal.strength - 5.0).abs() < f64::EPSILON);
        assert!((signal.reference_price - 104.0).abs() < f64::EPSILON);
    }

    #[test]
    fn short_below_long_is_sell() {
        let signal = classify("ETH-USD", 95.0, 100.0, 96.0).unwrap();
        assert_eq!(signal.kind, SignalKind::Sell);
        assert!((signal.strength - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn equal_averages_is_hold() {
        let signal = classify("BTC-USD", 100.0, 100.0, 100.0).unwrap();
        assert_eq!(signal.kind, SignalKind::Hold);
        assert!((signal.strength - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn strength_is_never_negative() {
        for (short, long) in [(110.0, 100.0), (90.0, 100.0), (100.0, 100.0), (0.5, 2.0)] {
            let signal = classify("X", short, long, long).unwrap();
            assert!(signal.strength >= 0.0, "strength for {short}/{long}");
        }
    }

    #[test]
    fn sell_strength_relative_to_long_average() {
        // (100 - 80) / 100 * 100 = 20%
        let signal = classify("X", 80.0, 100.0, 85.0).unwrap();
        assert_eq!(signal.kind, SignalKind::Sell);
        assert!((signal.strength - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn non_positive_long_average_is_invalid() {
        assert!(matches!(
            classify("X", 10.0, 0.0, 10.0),
            Err(CrosstraderError::InvalidInput { .. })
        ));
        assert!(matches!(
            classify("X", 10.0, -1.0, 10.0),
            Err(CrosstraderError::InvalidInput { .. })
        ));
    }

    #[test]
    fn kind_display() {
        assert_eq!(SignalKind::Buy.to_string(), "BUY");
        assert_eq!(SignalKind::Sell.to_string(), "SELL");
        assert_eq!(SignalKind::Hold.to_string(), "HOLD");
    }
}
