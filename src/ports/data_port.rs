//! Data access port trait.

use crate::domain::error::SigtraderError;
use crate::domain::series::PriceBar;

pub trait DataPort {
    /// Fetch the close-price history for a symbol, ordered by date.
    fn fetch_closes(&self, symbol: &str) -> Result<Vec<PriceBar>, SigtraderError>;

    /// List the symbols this source has data for.
    fn list_symbols(&self) -> Result<Vec<String>, SigtraderError>;
}
