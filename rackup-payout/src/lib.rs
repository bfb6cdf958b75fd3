//! # rackup-payout
//!
//! Pure, stateless money arithmetic consumed alongside the bracket engine:
//! entry-fee payout splits and Calcutta pot distribution. The engine supplies
//! entrant counts and finishing places; this crate never touches bracket
//! state and performs no settlement of any kind.
//!
//! All amounts are rounded to cents and any rounding drift is folded into
//! first place so the allocated total always equals the pool.

mod calcutta;
mod payout;

pub use calcutta::{
    compute_calcutta, Bid, CalcuttaConfig, CalcuttaResult, OwnerPayout, PlayerPayout,
};
pub use payout::{compute_payouts, PayoutInput, PayoutResult, PayoutSplit};

/// Rounds a dollar amount to whole cents.
#[inline]
pub(crate) fn to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
