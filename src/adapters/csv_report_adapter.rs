//! CSV report adapter.
//!
//! Persists backtest artifacts under a results directory:
//! `equity_curves/{strategy}/{SYMBOL}.csv`, `summary_{name}.csv` and
//! `failures.csv`.

use crate::adapters::csv_adapter::CsvAdapter;
use crate::domain::error::SigtraderError;
use crate::domain::simulator::EquityPoint;
use crate::ports::report_port::{FailureRow, ReportPort, SummaryRow};
use std::fs;
use std::path::{Path, PathBuf};

pub struct CsvReportAdapter {
    results_dir: PathBuf,
}

impl CsvReportAdapter {
    pub fn new(results_dir: PathBuf) -> Self {
        Self { results_dir }
    }

    fn writer(path: &Path) -> Result<csv::Writer<fs::File>, SigtraderError> {
        csv::Writer::from_path(path).map_err(|e| SigtraderError::Data {
            reason: format!("failed to open {}: {}", path.display(), e),
        })
    }

    fn flush_err(path: &Path, e: impl std::fmt::Display) -> SigtraderError {
        SigtraderError::Data {
            reason: format!("failed to write {}: {}", path.display(), e),
        }
    }
}

impl ReportPort for CsvReportAdapter {
    fn write_equity_curve(
        &self,
        strategy: &str,
        symbol: &str,
        curve: &[EquityPoint],
    ) -> Result<(), SigtraderError> {
        let dir = self.results_dir.join("equity_curves").join(strategy);
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{}.csv", CsvAdapter::sanitize_symbol(symbol)));

        let mut wtr = Self::writer(&path)?;
        wtr.write_record(["Date", "Equity"])
            .map_err(|e| Self::flush_err(&path, e))?;
        for point in curve {
            wtr.write_record([
                point.date.format("%Y-%m-%d").to_string(),
                point.value.to_string(),
            ])
            .map_err(|e| Self::flush_err(&path, e))?;
        }
        wtr.flush().map_err(|e| Self::flush_err(&path, e))?;
        Ok(())
    }

    fn write_summary(&self, name: &str, rows: &[SummaryRow]) -> Result<(), SigtraderError> {
        fs::create_dir_all(&self.results_dir)?;
        let path = self.results_dir.join(format!("summary_{}.csv", name));

        let mut wtr = Self::writer(&path)?;
        wtr.write_record([
            "Symbol",
            "Strategy",
            "Start Equity",
            "End Equity",
            "Percent Return",
            "Total Trades",
            "Win Rate",
            "Sharpe Ratio",
            "Max Drawdown",
        ])
        .map_err(|e| Self::flush_err(&path, e))?;

        for row in rows {
            let m = &row.metrics;
            wtr.write_record([
                row.symbol.clone(),
                row.strategy.clone(),
                m.start_equity.to_string(),
                m.end_equity.to_string(),
                m.percent_return.to_string(),
                m.total_trades.to_string(),
                m.win_rate.to_string(),
                m.sharpe_ratio.to_string(),
                m.max_drawdown.to_string(),
            ])
            .map_err(|e| Self::flush_err(&path, e))?;
        }
        wtr.flush().map_err(|e| Self::flush_err(&path, e))?;
        Ok(())
    }

    fn write_failures(&self, rows: &[FailureRow]) -> Result<(), SigtraderError> {
        fs::create_dir_all(&self.results_dir)?;
        let path = self.results_dir.join("failures.csv");

        let mut wtr = Self::writer(&path)?;
        wtr.write_record(["Symbol", "Strategy", "Error"])
            .map_err(|e| Self::flush_err(&path, e))?;
        for row in rows {
            wtr.write_record([row.symbol.clone(), row.strategy.clone(), row.error.clone()])
                .map_err(|e| Self::flush_err(&path, e))?;
        }
        wtr.flush().map_err(|e| Self::flush_err(&path, e))?;
        Ok(())
    }
}
