//! Price/signal time series representation and input validation.

use chrono::NaiveDate;

use super::error::ValidationError;

/// Per-bar directive produced by a strategy: desired position direction.
///
/// Wire values follow the usual convention: `Buy = 1`, `Hold = 0`,
/// `Sell = -1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Hold,
    Sell,
}

impl Signal {
    pub fn from_wire(value: i64, index: usize) -> Result<Self, ValidationError> {
        match value {
            1 => Ok(Signal::Buy),
            0 => Ok(Signal::Hold),
            -1 => Ok(Signal::Sell),
            _ => Err(ValidationError::SignalOutOfDomain { index, value }),
        }
    }

    pub fn as_wire(self) -> i64 {
        match self {
            Signal::Buy => 1,
            Signal::Hold => 0,
            Signal::Sell => -1,
        }
    }
}

/// One raw price observation as loaded from a data source, before any
/// signal exists for it.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: f64,
}

/// One engine input observation: a price bar with its strategy signal.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSignalRecord {
    pub date: NaiveDate,
    pub close: f64,
    pub signal: Signal,
}

/// Zip a bar series with a same-length signal sequence.
///
/// Panics if the lengths differ; strategies produce one signal per bar, so
/// a mismatch is a programming error, not an input error.
pub fn attach_signals(bars: &[PriceBar], signals: &[Signal]) -> Vec<PriceSignalRecord> {
    assert_eq!(
        bars.len(),
        signals.len(),
        "signal sequence length must match bar series length"
    );
    bars.iter()
        .zip(signals)
        .map(|(bar, &signal)| PriceSignalRecord {
            date: bar.date,
            close: bar.close,
            signal,
        })
        .collect()
}

/// Validate a record series for simulation: at least two records, every
/// close positive and finite, timestamps strictly increasing.
pub fn validate_records(records: &[PriceSignalRecord]) -> Result<(), ValidationError> {
    if records.len() < 2 {
        return Err(ValidationError::TooFewRecords { got: records.len() });
    }

    for (index, record) in records.iter().enumerate() {
        if !record.close.is_finite() || record.close <= 0.0 {
            return Err(ValidationError::BadPrice {
                index,
                close: record.close,
            });
        }
        if index > 0 {
            let prev = records[index - 1].date;
            if record.date <= prev {
                return Err(ValidationError::NonIncreasingTimestamp {
                    index,
                    date: record.date,
                    prev,
                });
            }
        }
    }

    Ok(())
}
