//! Per-instrument evaluation pipeline: averages → signal → intent → ledger.

use crate::domain::error::CrosstraderError;
use crate::domain::ledger::{Ledger, TradeOutcome};
use crate::domain::policy::{Side, TradeIntent, TradePolicy};
use crate::domain::signal::{classify, Signal};
use crate::domain::sma::moving_average;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub short_window: usize,
    pub long_window: usize,
}

/// Outcome of evaluating one instrument against one price series.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub signal: Signal,
    pub intent: Option<TradeIntent>,
    pub outcome: Option<TradeOutcome>,
}

/// Run the full pipeline for one instrument.
///
/// The ledger is mutated only when the policy produces an intent; a
/// `Hold` signal or a skipped trade leaves it untouched. Errors propagate
/// so the caller can decide to skip the cycle (`InsufficientData`) or
/// surface a collaborator bug (`InvalidInput`).
pub fn evaluate(
    instrument: &str,
    closes: &[f64],
    config: &EngineConfig,
    policy: &TradePolicy,
    ledger: &mut Ledger,
) -> Result<Evaluation, CrosstraderError> {
    let short_avg = moving_average(closes, config.short_window)?;
    let long_avg = moving_average(closes, config.long_window)?;
    // Non-empty: moving_average succeeded for a positive window.
    let reference_price = closes[closes.len() - 1];

    let signal = classify(instrument, short_avg, long_avg, reference_price)?;
    let intent = policy.decide(&signal, ledger);

    let outcome = match &intent {
        Some(intent) => Some(match intent.side {
            Side::Buy => ledger.apply_buy(&intent.instrument, intent.quantity, reference_price)?,
            Side::Sell => ledger.apply_sell(&intent.instrument, intent.quantity, reference_price)?,
        }),
        None => None,
    };

    Ok(Evaluation {
        signal,
        intent,
        outcome,
    })
}
