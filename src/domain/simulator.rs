//! Signal simulation engine: converts a price/signal series into an equity
//! curve and a trade log.
//!
//! The walk is a single deterministic pass. The first record is a seed
//! observation: it anchors the series but emits no equity point and its
//! signal is never evaluated; signal handling and equity recording begin at
//! the second record. The curve therefore always has one point fewer than
//! the input has records.

use chrono::NaiveDate;

use super::error::ValidationError;
use super::series::{validate_records, PriceSignalRecord};
use super::sizing::{AllInAllOut, SizingPolicy};

/// Mutable simulation state; exactly one instance per run, owned by the
/// walk and discarded when it finishes.
///
/// `entry_price` is `None` exactly when `quantity == 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionState {
    pub cash: f64,
    pub quantity: f64,
    pub entry_price: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    Buy,
    Sell,
}

/// An executed entry or exit. A completed trade is a (Buy, Sell) pair of
/// adjacent events in log order; a trailing unmatched Buy is an open
/// position, not a completed trade.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeEvent {
    pub side: TradeSide,
    pub price: f64,
    pub date: NaiveDate,
}

/// Total portfolio value at one bar: cash plus the position marked to that
/// bar's close.
#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutput {
    pub equity_curve: Vec<EquityPoint>,
    pub trades: Vec<TradeEvent>,
}

/// Run a simulation with the default all-in/all-out sizing policy.
pub fn simulate(
    records: &[PriceSignalRecord],
    starting_cash: f64,
) -> Result<SimulationOutput, ValidationError> {
    simulate_with_policy(records, starting_cash, &AllInAllOut)
}

/// Run a simulation with an explicit sizing policy.
///
/// Validates the whole input before mutating any state; after validation the
/// walk cannot fail. Deltas from the policy are clamped to available cash
/// and position, so `cash >= 0` and `quantity >= 0` hold at every step.
pub fn simulate_with_policy(
    records: &[PriceSignalRecord],
    starting_cash: f64,
    policy: &dyn SizingPolicy,
) -> Result<SimulationOutput, ValidationError> {
    if !starting_cash.is_finite() || starting_cash <= 0.0 {
        return Err(ValidationError::BadStartingCash(starting_cash));
    }
    validate_records(records)?;

    let mut state = PositionState {
        cash: starting_cash,
        quantity: 0.0,
        entry_price: None,
    };
    let mut equity_curve = Vec::with_capacity(records.len() - 1);
    let mut trades = Vec::new();

    for record in &records[1..] {
        let price = record.close;
        let delta = policy.desired_delta(record.signal, price, &state);

        if delta > 0.0 && state.cash > 0.0 {
            let spend = (delta * price).min(state.cash);
            state.quantity += spend / price;
            state.cash -= spend;
            if state.entry_price.is_none() {
                state.entry_price = Some(price);
            }
            trades.push(TradeEvent {
                side: TradeSide::Buy,
                price,
                date: record.date,
            });
        } else if delta < 0.0 && state.quantity > 0.0 {
            let sold = (-delta).min(state.quantity);
            state.cash += sold * price;
            state.quantity -= sold;
            if state.quantity == 0.0 {
                state.entry_price = None;
            }
            trades.push(TradeEvent {
                side: TradeSide::Sell,
                price,
                date: record.date,
            });
        }

        equity_curve.push(EquityPoint {
            date: record.date,
            value: state.cash + state.quantity * price,
        });
    }

    Ok(SimulationOutput {
        equity_curve,
        trades,
    })
}
