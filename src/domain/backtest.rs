//! Backtest configuration and the simulate-then-measure glue.

use super::error::ValidationError;
use super::metrics::{Metrics, TRADING_DAYS_PER_YEAR};
use super::series::PriceSignalRecord;
use super::simulator::{simulate, EquityPoint, TradeEvent};

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub starting_cash: f64,
    /// Sharpe annualization factor: observations per year for the bar
    /// interval being simulated (252 for daily bars).
    pub periods_per_year: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        BacktestConfig {
            starting_cash: 10_000.0,
            periods_per_year: TRADING_DAYS_PER_YEAR,
        }
    }
}

/// Everything a reporting or orchestration layer needs from one run.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub equity_curve: Vec<EquityPoint>,
    pub trades: Vec<TradeEvent>,
    pub metrics: Metrics,
}

/// Simulate a signal series and derive its metrics in one pass.
pub fn run_backtest(
    records: &[PriceSignalRecord],
    config: &BacktestConfig,
) -> Result<BacktestResult, ValidationError> {
    let output = simulate(records, config.starting_cash)?;
    let metrics = Metrics::compute(
        &output.equity_curve,
        &output.trades,
        config.starting_cash,
        config.periods_per_year,
    );

    Ok(BacktestResult {
        equity_curve: output.equity_curve,
        trades: output.trades,
        metrics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::series::Signal;
    use chrono::NaiveDate;

    fn record(day: u32, close: f64, signal: Signal) -> PriceSignalRecord {
        PriceSignalRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            close,
            signal,
        }
    }

    #[test]
    fn default_config() {
        let config = BacktestConfig::default();
        assert!((config.starting_cash - 10_000.0).abs() < f64::EPSILON);
        assert!((config.periods_per_year - 252.0).abs() < f64::EPSILON);
    }

    #[test]
    fn run_backtest_bundles_curve_trades_and_metrics() {
        let records = vec![
            record(1, 100.0, Signal::Hold),
            record(2, 100.0, Signal::Buy),
            record(3, 200.0, Signal::Sell),
        ];
        let config = BacktestConfig {
            starting_cash: 1000.0,
            ..Default::default()
        };

        let result = run_backtest(&records, &config).unwrap();

        assert_eq!(result.equity_curve.len(), 2);
        assert_eq!(result.trades.len(), 2);
        assert!((result.metrics.end_equity - 2000.0).abs() < f64::EPSILON);
        assert!((result.metrics.percent_return - 100.0).abs() < f64::EPSILON);
        assert_eq!(result.metrics.total_trades, 1);
        assert!((result.metrics.win_rate - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn run_backtest_propagates_validation_failure() {
        let records = vec![record(1, 100.0, Signal::Hold)];
        let err = run_backtest(&records, &BacktestConfig::default()).unwrap_err();
        assert_eq!(err, ValidationError::TooFewRecords { got: 1 });
    }
}
