//! Signal-generating strategies.
//!
//! A strategy turns a close-price series into one advisory [`Signal`] per
//! bar. Strategies emit level-style signals (a run of Buys while their
//! condition holds); the simulator's position gating collapses those into
//! single entries and exits.

pub mod rsi;
pub mod sma_crossover;

use crate::domain::error::SigtraderError;
use crate::domain::series::{PriceBar, Signal};
use crate::ports::config_port::ConfigPort;

pub const STRATEGY_NAMES: [&str; 2] = ["sma_crossover", "rsi"];

#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    SmaCrossover { short: usize, long: usize },
    Rsi { period: usize, lower: f64, upper: f64 },
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::SmaCrossover { .. } => "sma_crossover",
            Strategy::Rsi { .. } => "rsi",
        }
    }

    /// Build the strategy named by `[strategy] name` with its parameters.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, SigtraderError> {
        let name = config
            .get_string("strategy", "name")
            .ok_or_else(|| SigtraderError::ConfigMissing {
                section: "strategy".to_string(),
                key: "name".to_string(),
            })?;
        Self::from_name(&name, config)
    }

    /// Build a named strategy, reading its parameters (with defaults) from
    /// the `[strategy]` section.
    pub fn from_name(name: &str, config: &dyn ConfigPort) -> Result<Self, SigtraderError> {
        match name.trim() {
            "sma_crossover" => Ok(Strategy::SmaCrossover {
                short: config.get_int("strategy", "short", 5) as usize,
                long: config.get_int("strategy", "long", 20) as usize,
            }),
            "rsi" => Ok(Strategy::Rsi {
                period: config.get_int("strategy", "period", 14) as usize,
                lower: config.get_double("strategy", "lower", 30.0),
                upper: config.get_double("strategy", "upper", 70.0),
            }),
            other => Err(SigtraderError::ConfigInvalid {
                section: "strategy".to_string(),
                key: "name".to_string(),
                reason: format!(
                    "unknown strategy '{}' (expected one of: {})",
                    other,
                    STRATEGY_NAMES.join(", ")
                ),
            }),
        }
    }

    /// One signal per input bar.
    pub fn signals(&self, bars: &[PriceBar]) -> Vec<Signal> {
        match self {
            Strategy::SmaCrossover { short, long } => sma_crossover::signals(bars, *short, *long),
            Strategy::Rsi {
                period,
                lower,
                upper,
            } => rsi::signals(bars, *period, *lower, *upper),
        }
    }
}
