//! CSV file data adapter.
//!
//! Reads `historical_{SYMBOL}.csv` files as produced by the usual daily
//! download tools. Columns are located by header name, so a plain
//! Date/Close table and a full OHLCV dump both load.

use crate::domain::error::SigtraderError;
use crate::domain::series::PriceBar;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

const FILE_PREFIX: &str = "historical_";
const FILE_SUFFIX: &str = ".csv";

pub struct CsvAdapter {
    data_dir: PathBuf,
}

impl CsvAdapter {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// File-system-safe form of a symbol: `SOL-USD` → `SOL_USD`.
    pub fn sanitize_symbol(symbol: &str) -> String {
        symbol.replace(['-', '/'], "_")
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.data_dir.join(format!(
            "{}{}{}",
            FILE_PREFIX,
            Self::sanitize_symbol(symbol),
            FILE_SUFFIX
        ))
    }
}

impl DataPort for CsvAdapter {
    fn fetch_closes(&self, symbol: &str) -> Result<Vec<PriceBar>, SigtraderError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| SigtraderError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());

        let headers = rdr
            .headers()
            .map_err(|e| SigtraderError::Data {
                reason: format!("CSV header error: {}", e),
            })?
            .clone();
        let date_col = headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case("date"))
            .ok_or_else(|| SigtraderError::Data {
                reason: format!("{}: missing Date column", path.display()),
            })?;
        let close_col = headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case("close"))
            .ok_or_else(|| SigtraderError::Data {
                reason: format!("{}: missing Close column", path.display()),
            })?;

        let mut bars = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| SigtraderError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(date_col).ok_or_else(|| SigtraderError::Data {
                reason: "missing date field".into(),
            })?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                SigtraderError::Data {
                    reason: format!("invalid date '{}': {}", date_str, e),
                }
            })?;

            let close: f64 = record
                .get(close_col)
                .ok_or_else(|| SigtraderError::Data {
                    reason: "missing close field".into(),
                })?
                .parse()
                .map_err(|e| SigtraderError::Data {
                    reason: format!("invalid close value: {}", e),
                })?;

            bars.push(PriceBar { date, close });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, SigtraderError> {
        let entries = fs::read_dir(&self.data_dir).map_err(|e| SigtraderError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.data_dir.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SigtraderError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if name_str.starts_with(FILE_PREFIX) && name_str.ends_with(FILE_SUFFIX) {
                let symbol = &name_str[FILE_PREFIX.len()..name_str.len() - FILE_SUFFIX.len()];
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}
