//! Simple moving average crossover signals.
//!
//! Buy while the short SMA sits strictly above the long SMA, Sell while
//! strictly below, Hold during warmup (either window not yet full) or at
//! equality.

use crate::domain::series::{PriceBar, Signal};

pub fn signals(bars: &[PriceBar], short: usize, long: usize) -> Vec<Signal> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let short_sma = rolling_mean(&closes, short);
    let long_sma = rolling_mean(&closes, long);

    closes
        .iter()
        .enumerate()
        .map(|(i, _)| match (short_sma[i], long_sma[i]) {
            (Some(s), Some(l)) if s > l => Signal::Buy,
            (Some(s), Some(l)) if s < l => Signal::Sell,
            _ => Signal::Hold,
        })
        .collect()
}

/// Rolling simple mean; `None` until the window is full.
fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }

    let mut sum: f64 = values[..window].iter().sum();
    out[window - 1] = Some(sum / window as f64);
    for i in window..values.len() {
        sum += values[i] - values[i - window];
        out[i] = Some(sum / window as f64);
    }
    out
}
