//! Performance metrics and statistics.

use super::simulator::{EquityPoint, TradeEvent};

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Summary statistics for one simulation run. Percentages and ratios are
/// rounded to 2 decimal places; degenerate inputs (no trades, flat curve,
/// zero starting equity) resolve to 0 rather than an error, so a Metrics
/// record exists for every structurally valid run.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub start_equity: f64,
    pub end_equity: f64,
    pub percent_return: f64,
    pub total_trades: usize,
    pub win_rate: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown: f64,
}

impl Metrics {
    /// Compute metrics from an equity curve and trade log.
    ///
    /// Pure function of its inputs. `starting_cash` is only the fallback
    /// equity for an empty curve; `periods_per_year` annualizes the Sharpe
    /// ratio (252 for daily bars, see [`TRADING_DAYS_PER_YEAR`]).
    pub fn compute(
        curve: &[EquityPoint],
        trades: &[TradeEvent],
        starting_cash: f64,
        periods_per_year: f64,
    ) -> Self {
        let start_equity = curve.first().map(|p| p.value).unwrap_or(starting_cash);
        let end_equity = curve.last().map(|p| p.value).unwrap_or(starting_cash);

        let percent_return = if start_equity > 0.0 {
            (end_equity - start_equity) / start_equity * 100.0
        } else {
            0.0
        };

        let returns = period_returns(curve);
        let sharpe_ratio = sharpe(&returns, periods_per_year);
        let max_drawdown = max_drawdown(curve);

        // Completed trades are adjacent (Buy, Sell) event pairs; a trailing
        // unmatched Buy falls outside the last full pair and is not counted.
        let pairs: Vec<_> = trades.chunks_exact(2).collect();
        let total_trades = pairs.len();
        let wins = pairs
            .iter()
            .filter(|pair| pair[1].price > pair[0].price)
            .count();
        let win_rate = wins as f64 / total_trades.max(1) as f64 * 100.0;

        Metrics {
            start_equity: round2(start_equity),
            end_equity: round2(end_equity),
            percent_return: round2(percent_return),
            total_trades,
            win_rate: round2(win_rate),
            sharpe_ratio: round2(sharpe_ratio),
            max_drawdown: round2(max_drawdown),
        }
    }

    /// The flat label/value view consumed by summary reporting.
    pub fn as_pairs(&self) -> [(&'static str, f64); 7] {
        [
            ("Start Equity", self.start_equity),
            ("End Equity", self.end_equity),
            ("Percent Return", self.percent_return),
            ("Total Trades", self.total_trades as f64),
            ("Win Rate", self.win_rate),
            ("Sharpe Ratio", self.sharpe_ratio),
            ("Max Drawdown", self.max_drawdown),
        ]
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Fractional period-over-period changes of the curve. The undefined first
/// difference never materializes; a non-positive predecessor contributes 0.
fn period_returns(curve: &[EquityPoint]) -> Vec<f64> {
    curve
        .windows(2)
        .map(|w| {
            let prev = w[0].value;
            if prev > 0.0 {
                (w[1].value - prev) / prev
            } else {
                0.0
            }
        })
        .collect()
}

/// Annualized mean-to-volatility ratio over population standard deviation.
/// Zero when there are no returns or no variance.
fn sharpe(returns: &[f64], periods_per_year: f64) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let stddev = variance.sqrt();

    if stddev > 0.0 {
        mean / stddev * periods_per_year.sqrt()
    } else {
        0.0
    }
}

/// Most negative percentage decline from the running peak. Zero for a
/// non-decreasing curve.
fn max_drawdown(curve: &[EquityPoint]) -> f64 {
    let mut peak = f64::MIN;
    let mut worst = 0.0_f64;

    for point in curve {
        if point.value > peak {
            peak = point.value;
        }
        if peak > 0.0 {
            let dd = (point.value - peak) / peak * 100.0;
            if dd < worst {
                worst = dd;
            }
        }
    }

    worst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::simulator::TradeSide;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn make_curve(values: &[f64]) -> Vec<EquityPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| EquityPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Duration::days(i as i64),
                value,
            })
            .collect()
    }

    fn event(side: TradeSide, price: f64, day: u32) -> TradeEvent {
        TradeEvent {
            side,
            price,
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        }
    }

    fn round_trip(buy: f64, sell: f64, day: u32) -> Vec<TradeEvent> {
        vec![
            event(TradeSide::Buy, buy, day),
            event(TradeSide::Sell, sell, day + 1),
        ]
    }

    #[test]
    fn percent_return_of_doubled_equity() {
        let curve = make_curve(&[1000.0, 2000.0]);
        let trades = round_trip(100.0, 200.0, 2);
        let m = Metrics::compute(&curve, &trades, 1000.0, TRADING_DAYS_PER_YEAR);

        assert_relative_eq!(m.start_equity, 1000.0);
        assert_relative_eq!(m.end_equity, 2000.0);
        assert_relative_eq!(m.percent_return, 100.0);
        assert_eq!(m.total_trades, 1);
        assert_relative_eq!(m.win_rate, 100.0);
    }

    #[test]
    fn flat_curve_yields_all_zero_ratios() {
        let curve = make_curve(&[1000.0, 1000.0, 1000.0, 1000.0]);
        let m = Metrics::compute(&curve, &[], 1000.0, TRADING_DAYS_PER_YEAR);

        assert_relative_eq!(m.percent_return, 0.0);
        assert_relative_eq!(m.sharpe_ratio, 0.0);
        assert_relative_eq!(m.max_drawdown, 0.0);
        assert_eq!(m.total_trades, 0);
        assert_relative_eq!(m.win_rate, 0.0);
    }

    #[test]
    fn max_drawdown_on_crafted_curve() {
        // Rolling max [100, 120, 120, 120]; drawdowns [0, 0, -25, -8.33].
        let curve = make_curve(&[100.0, 120.0, 90.0, 110.0]);
        let m = Metrics::compute(&curve, &[], 100.0, TRADING_DAYS_PER_YEAR);

        assert_relative_eq!(m.max_drawdown, -25.0);
    }

    #[test]
    fn max_drawdown_zero_for_monotonic_curve() {
        let curve = make_curve(&[100.0, 100.0, 105.0, 120.0]);
        let m = Metrics::compute(&curve, &[], 100.0, TRADING_DAYS_PER_YEAR);

        assert_eq!(m.max_drawdown, 0.0);
    }

    #[test]
    fn drawdown_rounds_to_two_decimals() {
        // Single dip of 1/3: -33.333...% rounds to -33.33.
        let curve = make_curve(&[300.0, 200.0, 300.0]);
        let m = Metrics::compute(&curve, &[], 300.0, TRADING_DAYS_PER_YEAR);

        assert_relative_eq!(m.max_drawdown, -33.33);
    }

    #[test]
    fn sharpe_positive_for_steady_gains() {
        let values: Vec<f64> = (0..20).map(|i| 1000.0 * 1.01f64.powi(i)).collect();
        let curve = make_curve(&values);
        let m = Metrics::compute(&curve, &[], 1000.0, TRADING_DAYS_PER_YEAR);

        assert!(m.sharpe_ratio > 0.0);
    }

    #[test]
    fn sharpe_scales_with_annualization_factor() {
        let curve = make_curve(&[100.0, 102.0, 101.0, 104.0, 103.0, 107.0]);
        let daily = Metrics::compute(&curve, &[], 100.0, 252.0);
        let hourly = Metrics::compute(&curve, &[], 100.0, 252.0 * 6.5);

        assert!(hourly.sharpe_ratio > daily.sharpe_ratio);
    }

    #[test]
    fn trailing_open_buy_excluded_from_trade_counts() {
        let curve = make_curve(&[1000.0, 1100.0, 1200.0]);
        let trades = vec![
            event(TradeSide::Buy, 100.0, 2),
            event(TradeSide::Sell, 110.0, 3),
            event(TradeSide::Buy, 105.0, 4),
        ];
        let m = Metrics::compute(&curve, &trades, 1000.0, TRADING_DAYS_PER_YEAR);

        assert_eq!(m.total_trades, 1);
        assert_relative_eq!(m.win_rate, 100.0);
    }

    #[test]
    fn equal_entry_and_exit_price_is_not_a_win() {
        let curve = make_curve(&[1000.0, 1000.0]);
        let trades = round_trip(100.0, 100.0, 2);
        let m = Metrics::compute(&curve, &trades, 1000.0, TRADING_DAYS_PER_YEAR);

        assert_eq!(m.total_trades, 1);
        assert_relative_eq!(m.win_rate, 0.0);
    }

    #[test]
    fn mixed_wins_and_losses() {
        let curve = make_curve(&[1000.0, 1200.0, 1100.0, 1300.0]);
        let trades: Vec<TradeEvent> = round_trip(100.0, 120.0, 2)
            .into_iter()
            .chain(round_trip(115.0, 110.0, 4))
            .chain(round_trip(108.0, 130.0, 6))
            .collect();
        let m = Metrics::compute(&curve, &trades, 1000.0, TRADING_DAYS_PER_YEAR);

        assert_eq!(m.total_trades, 3);
        assert_relative_eq!(m.win_rate, 66.67);
    }

    #[test]
    fn empty_curve_falls_back_to_starting_cash() {
        let m = Metrics::compute(&[], &[], 1000.0, TRADING_DAYS_PER_YEAR);

        assert_relative_eq!(m.start_equity, 1000.0);
        assert_relative_eq!(m.end_equity, 1000.0);
        assert_relative_eq!(m.percent_return, 0.0);
        assert_relative_eq!(m.sharpe_ratio, 0.0);
    }

    #[test]
    fn zero_start_equity_guarded_to_zero_return() {
        let curve = vec![
            EquityPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                value: 0.0,
            },
            EquityPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                value: 100.0,
            },
        ];
        let m = Metrics::compute(&curve, &[], 0.0, TRADING_DAYS_PER_YEAR);

        assert_relative_eq!(m.percent_return, 0.0);
    }

    #[test]
    fn as_pairs_exposes_the_full_label_set() {
        let curve = make_curve(&[1000.0, 1100.0]);
        let m = Metrics::compute(&curve, &[], 1000.0, TRADING_DAYS_PER_YEAR);
        let labels: Vec<&str> = m.as_pairs().iter().map(|(label, _)| *label).collect();

        assert_eq!(
            labels,
            vec![
                "Start Equity",
                "End Equity",
                "Percent Return",
                "Total Trades",
                "Win Rate",
                "Sharpe Ratio",
                "Max Drawdown",
            ]
        );
    }
}
