//! RSI threshold signals.
//!
//! Gains and losses are rolling simple means over the last `period` price
//! changes, so the index is defined from bar `period` onward. Buy below the
//! lower threshold, Sell above the upper one. A window with zero losses
//! reads as RSI 100; a window with no movement at all has no defined RSI
//! and stays Hold.

use crate::domain::series::{PriceBar, Signal};

pub fn signals(bars: &[PriceBar], period: usize, lower: f64, upper: f64) -> Vec<Signal> {
    let mut out = vec![Signal::Hold; bars.len()];
    if period == 0 || bars.len() <= period {
        return out;
    }

    let mut gains = Vec::with_capacity(bars.len() - 1);
    let mut losses = Vec::with_capacity(bars.len() - 1);
    for w in bars.windows(2) {
        let change = w[1].close - w[0].close;
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    for i in period..bars.len() {
        // The window of `period` changes ending at bar i.
        let avg_gain = gains[i - period..i].iter().sum::<f64>() / period as f64;
        let avg_loss = losses[i - period..i].iter().sum::<f64>() / period as f64;

        let rsi = if avg_loss > 0.0 {
            100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
        } else if avg_gain > 0.0 {
            100.0
        } else {
            continue;
        };

        if rsi < lower {
            out[i] = Signal::Buy;
        } else if rsi > upper {
            out[i] = Signal::Sell;
        }
    }

    out
}
