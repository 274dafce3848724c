//! Position sizing policy.

use super::series::Signal;
use super::simulator::PositionState;

/// Decides how much of the asset to buy or sell for a given bar.
///
/// Given the advisory signal, the bar's close and the current position
/// state, a policy returns the desired change in held quantity: positive to
/// buy with available cash, negative to sell from the open position, zero to
/// do nothing. The simulator clamps the delta to what cash and position
/// actually allow, so a policy cannot drive either negative.
pub trait SizingPolicy {
    fn desired_delta(&self, signal: Signal, price: f64, state: &PositionState) -> f64;
}

/// The default policy: commit all cash on entry, liquidate the whole
/// position on exit, at most one open position at a time.
///
/// A Buy signal is honored only on a flat book and a Sell only against an
/// open position; everything else is ignored. This gating is what makes
/// level-style signals (a run of Buys while a condition holds) safe to feed
/// straight into the engine.
pub struct AllInAllOut;

impl SizingPolicy for AllInAllOut {
    fn desired_delta(&self, signal: Signal, price: f64, state: &PositionState) -> f64 {
        match signal {
            Signal::Buy if state.quantity == 0.0 => state.cash / price,
            Signal::Sell if state.quantity > 0.0 => -state.quantity,
            _ => 0.0,
        }
    }
}
