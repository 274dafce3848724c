//! Report persistence port trait.

use crate::domain::error::SigtraderError;
use crate::domain::metrics::Metrics;
use crate::domain::simulator::EquityPoint;

/// One summary line of a batch run: the metrics of a single
/// (symbol, strategy) combination.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub symbol: String,
    pub strategy: String,
    pub metrics: Metrics,
}

/// A (symbol, strategy) unit that failed, with the error it failed on.
#[derive(Debug, Clone, PartialEq)]
pub struct FailureRow {
    pub symbol: String,
    pub strategy: String,
    pub error: String,
}

/// Port for persisting backtest artifacts.
pub trait ReportPort {
    /// Persist one run's equity curve as a Date/Equity table.
    fn write_equity_curve(
        &self,
        strategy: &str,
        symbol: &str,
        curve: &[EquityPoint],
    ) -> Result<(), SigtraderError>;

    /// Persist a summary table under the given name (e.g. `all` or a
    /// strategy name).
    fn write_summary(&self, name: &str, rows: &[SummaryRow]) -> Result<(), SigtraderError>;

    /// Persist the failure log for a batch run.
    fn write_failures(&self, rows: &[FailureRow]) -> Result<(), SigtraderError>;
}
