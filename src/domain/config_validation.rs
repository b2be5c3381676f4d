//! Configuration validation.
//!
//! Validates every config field before a run starts so that bad values
//! fail fast with a precise message instead of mid-cycle.

use crate::domain::error::CrosstraderError;
use crate::ports::config_port::ConfigPort;

pub fn validate_run_config(config: &dyn ConfigPort) -> Result<(), CrosstraderError> {
    validate_windows(config)?;
    validate_initial_cash(config)?;
    validate_trade_notional(config)?;
    validate_instruments(config)?;
    validate_data_dir(config)?;
    validate_check_interval(config)?;
    validate_display_rate(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: &str) -> CrosstraderError {
    CrosstraderError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_windows(config: &dyn ConfigPort) -> Result<(), CrosstraderError> {
    let short = config.get_int("strategy", "short_window", 0);
    let long = config.get_int("strategy", "long_window", 0);

    if short <= 0 {
        return Err(invalid(
            "strategy",
            "short_window",
            "short_window must be a positive integer",
        ));
    }
    if long <= 0 {
        return Err(invalid(
            "strategy",
            "long_window",
            "long_window must be a positive integer",
        ));
    }
    if short >= long {
        return Err(invalid(
            "strategy",
            "short_window",
            "short_window must be less than long_window",
        ));
    }
    Ok(())
}

fn validate_initial_cash(config: &dyn ConfigPort) -> Result<(), CrosstraderError> {
    let value = config.get_double("portfolio", "initial_cash", 0.0);
    if value <= 0.0 {
        return Err(invalid(
            "portfolio",
            "initial_cash",
            "initial_cash must be positive",
        ));
    }
    Ok(())
}

fn validate_trade_notional(config: &dyn ConfigPort) -> Result<(), CrosstraderError> {
    let value = config.get_double("portfolio", "trade_notional", 0.0);
    if value <= 0.0 {
        return Err(invalid(
            "portfolio",
            "trade_notional",
            "trade_notional must be positive",
        ));
    }
    Ok(())
}

fn validate_instruments(config: &dyn ConfigPort) -> Result<(), CrosstraderError> {
    match config.get_string("engine", "instruments") {
        None => Err(CrosstraderError::ConfigMissing {
            section: "engine".to_string(),
            key: "instruments".to_string(),
        }),
        Some(s) if parse_instruments(&s).is_empty() => Err(invalid(
            "engine",
            "instruments",
            "instruments must be a non-empty comma-separated list",
        )),
        Some(_) => Ok(()),
    }
}

fn validate_data_dir(config: &dyn ConfigPort) -> Result<(), CrosstraderError> {
    match config.get_string("engine", "data_dir") {
        None => Err(CrosstraderError::ConfigMissing {
            section: "engine".to_string(),
            key: "data_dir".to_string(),
        }),
        Some(s) if s.trim().is_empty() => {
            Err(invalid("engine", "data_dir", "data_dir must not be empty"))
        }
        Some(_) => Ok(()),
    }
}

fn validate_check_interval(config: &dyn ConfigPort) -> Result<(), CrosstraderError> {
    let value = config.get_int("engine", "check_interval_secs", 60);
    if value <= 0 {
        return Err(invalid(
            "engine",
            "check_interval_secs",
            "check_interval_secs must be positive",
        ));
    }
    Ok(())
}

fn validate_display_rate(config: &dyn ConfigPort) -> Result<(), CrosstraderError> {
    // Display conversion is optional; when a currency is named, the rate
    // must be usable.
    if config.get_string("report", "display_currency").is_none() {
        return Ok(());
    }
    let rate = config.get_double("report", "display_rate", 0.0);
    if rate <= 0.0 {
        return Err(invalid(
            "report",
            "display_rate",
            "display_rate must be positive when display_currency is set",
        ));
    }
    Ok(())
}

/// Split a comma-separated instrument list, dropping blanks.
pub fn parse_instruments(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}
