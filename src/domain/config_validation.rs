//! Configuration validation.
//!
//! Validates all config fields before any run starts.

use crate::domain::error::SigtraderError;
use crate::domain::strategy::STRATEGY_NAMES;
use crate::ports::config_port::ConfigPort;

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), SigtraderError> {
    validate_starting_cash(config)?;
    validate_periods_per_year(config)?;
    validate_symbols(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), SigtraderError> {
    let name = match config.get_string("strategy", "name") {
        Some(n) if !n.trim().is_empty() => n.trim().to_string(),
        _ => {
            return Err(SigtraderError::ConfigMissing {
                section: "strategy".to_string(),
                key: "name".to_string(),
            })
        }
    };

    if !STRATEGY_NAMES.contains(&name.as_str()) {
        return Err(SigtraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "name".to_string(),
            reason: format!(
                "unknown strategy '{}' (expected one of: {})",
                name,
                STRATEGY_NAMES.join(", ")
            ),
        });
    }

    match name.as_str() {
        "sma_crossover" => validate_sma_windows(config),
        "rsi" => validate_rsi_params(config),
        _ => unreachable!("name checked against STRATEGY_NAMES"),
    }
}

fn validate_starting_cash(config: &dyn ConfigPort) -> Result<(), SigtraderError> {
    let value = config.get_double("backtest", "starting_cash", 10_000.0);
    if !value.is_finite() || value <= 0.0 {
        return Err(SigtraderError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "starting_cash".to_string(),
            reason: "starting_cash must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_periods_per_year(config: &dyn ConfigPort) -> Result<(), SigtraderError> {
    let value = config.get_double("backtest", "periods_per_year", 252.0);
    if !value.is_finite() || value <= 0.0 {
        return Err(SigtraderError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "periods_per_year".to_string(),
            reason: "periods_per_year must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_symbols(config: &dyn ConfigPort) -> Result<(), SigtraderError> {
    let symbols = config.get_string("backtest", "symbols");
    let symbol = config.get_string("backtest", "symbol");

    match (symbols, symbol) {
        (Some(s), _) if !s.trim().is_empty() => Ok(()),
        (None, Some(s)) if !s.trim().is_empty() => Ok(()),
        _ => Err(SigtraderError::ConfigMissing {
            section: "backtest".to_string(),
            key: "symbol".to_string(),
        }),
    }
}

fn validate_sma_windows(config: &dyn ConfigPort) -> Result<(), SigtraderError> {
    let short = config.get_int("strategy", "short", 5);
    let long = config.get_int("strategy", "long", 20);

    if short < 1 {
        return Err(SigtraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "short".to_string(),
            reason: "short window must be at least 1".to_string(),
        });
    }
    if long <= short {
        return Err(SigtraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "long".to_string(),
            reason: "long window must exceed the short window".to_string(),
        });
    }
    Ok(())
}

fn validate_rsi_params(config: &dyn ConfigPort) -> Result<(), SigtraderError> {
    let period = config.get_int("strategy", "period", 14);
    if period < 1 {
        return Err(SigtraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "period".to_string(),
            reason: "period must be at least 1".to_string(),
        });
    }

    let lower = config.get_double("strategy", "lower", 30.0);
    let upper = config.get_double("strategy", "upper", 70.0);
    if !(0.0..=100.0).contains(&lower) || !(0.0..=100.0).contains(&upper) {
        return Err(SigtraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "lower".to_string(),
            reason: "thresholds must lie between 0 and 100".to_string(),
        });
    }
    if lower >= upper {
        return Err(SigtraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "upper".to_string(),
            reason: "upper threshold must exceed the lower threshold".to_string(),
        });
    }
    Ok(())
}
