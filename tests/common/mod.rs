#![allow(dead_code)]

use chrono::NaiveDate;
use sigtrader::domain::error::SigtraderError;
use sigtrader::domain::simulator::EquityPoint;
pub use sigtrader::domain::series::{PriceBar, PriceSignalRecord, Signal};
use sigtrader::ports::data_port::DataPort;
use sigtrader::ports::report_port::{FailureRow, ReportPort, SummaryRow};
use std::cell::RefCell;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<PriceBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<PriceBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_closes(&self, symbol: &str) -> Result<Vec<PriceBar>, SigtraderError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(SigtraderError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(symbol).cloned().unwrap_or_default())
    }

    fn list_symbols(&self) -> Result<Vec<String>, SigtraderError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

/// A report port that records every call instead of touching the
/// filesystem.
pub struct RecordingReportPort {
    pub curves: RefCell<Vec<(String, String, Vec<EquityPoint>)>>,
    pub summaries: RefCell<Vec<(String, Vec<SummaryRow>)>>,
    pub failures: RefCell<Vec<Vec<FailureRow>>>,
}

impl RecordingReportPort {
    pub fn new() -> Self {
        Self {
            curves: RefCell::new(Vec::new()),
            summaries: RefCell::new(Vec::new()),
            failures: RefCell::new(Vec::new()),
        }
    }
}

impl ReportPort for RecordingReportPort {
    fn write_equity_curve(
        &self,
        strategy: &str,
        symbol: &str,
        curve: &[EquityPoint],
    ) -> Result<(), SigtraderError> {
        self.curves
            .borrow_mut()
            .push((strategy.to_string(), symbol.to_string(), curve.to_vec()));
        Ok(())
    }

    fn write_summary(&self, name: &str, rows: &[SummaryRow]) -> Result<(), SigtraderError> {
        self.summaries
            .borrow_mut()
            .push((name.to_string(), rows.to_vec()));
        Ok(())
    }

    fn write_failures(&self, rows: &[FailureRow]) -> Result<(), SigtraderError> {
        self.failures.borrow_mut().push(rows.to_vec());
        Ok(())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Bars with the given closes on consecutive days from 2024-01-01.
pub fn make_bars(closes: &[f64]) -> Vec<PriceBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PriceBar {
            date: date(2024, 1, 1) + chrono::Duration::days(i as i64),
            close,
        })
        .collect()
}

/// Records with the given (close, signal) pairs on consecutive days.
pub fn make_records(closes_signals: &[(f64, Signal)]) -> Vec<PriceSignalRecord> {
    closes_signals
        .iter()
        .enumerate()
        .map(|(i, &(close, signal))| PriceSignalRecord {
            date: date(2024, 1, 1) + chrono::Duration::days(i as i64),
            close,
            signal,
        })
        .collect()
}
