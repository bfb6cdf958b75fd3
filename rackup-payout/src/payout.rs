//! Entry-fee payout splits.

use serde::{Deserialize, Serialize};

use crate::to_cents;

/// Inputs for a payout computation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PayoutInput {
    pub entrants: u32,
    pub entry_fee: f64,
    /// Per-entrant table-time fee deducted from the pool before splitting.
    pub green_fee: f64,
    /// House or sponsor money added on top of the net entry pool.
    #[serde(default)]
    pub sponsor_add: f64,
    /// Per-place shares, expected to sum to 1.0.
    pub template: Vec<f64>,
}

/// One place of a payout split.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PayoutSplit {
    /// 1-based finishing place.
    pub place: u32,
    pub share: f64,
    pub amount: f64,
}

/// The result of a payout computation. The split amounts sum to
/// `payout_total` exactly; rounding drift is folded into first place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PayoutResult {
    pub entry_pool: f64,
    pub greens_total: f64,
    pub payout_total: f64,
    pub splits: Vec<PayoutSplit>,
}

/// Computes the payout split for a tournament.
///
/// The distributable pool is the gross entry money minus green fees (floored
/// at zero) plus sponsor money.
pub fn compute_payouts(input: &PayoutInput) -> PayoutResult {
    let gross = f64::from(input.entrants) * input.entry_fee;
    let greens_total = f64::from(input.entrants) * input.green_fee;
    let net = (gross - greens_total).max(0.0) + input.sponsor_add;

    let mut splits: Vec<PayoutSplit> = input
        .template
        .iter()
        .enumerate()
        .map(|(index, &share)| PayoutSplit {
            place: index as u32 + 1,
            share,
            amount: to_cents(net * share),
        })
        .collect();

    let allocated: f64 = splits.iter().map(|split| split.amount).sum();
    let drift = to_cents(net - allocated);
    if drift.abs() >= 0.01 {
        if let Some(first) = splits.first_mut() {
            log::debug!("Folding rounding drift of {} into first place", drift);
            first.amount = to_cents(first.amount + drift);
        }
    }

    PayoutResult {
        entry_pool: to_cents(gross),
        greens_total: to_cents(greens_total),
        payout_total: to_cents(net),
        splits,
    }
}

#[cfg(test)]
mod tests {
    use super::{compute_payouts, PayoutInput};

    #[test]
    fn test_deducts_green_fees_and_applies_template() {
        let res = compute_payouts(&PayoutInput {
            entrants: 16,
            entry_fee: 20.0,
            green_fee: 5.0,
            sponsor_add: 100.0,
            template: vec![0.6, 0.3, 0.1],
        });

        assert_eq!(res.entry_pool, 320.0);
        assert_eq!(res.greens_total, 80.0);
        assert_eq!(res.payout_total, 340.0);

        let amounts: Vec<f64> = res.splits.iter().map(|s| s.amount).collect();
        assert_eq!(amounts, vec![204.0, 102.0, 34.0]);
    }

    #[test]
    fn test_split_sum_equals_pool() {
        let res = compute_payouts(&PayoutInput {
            entrants: 7,
            entry_fee: 10.0,
            green_fee: 3.0,
            sponsor_add: 0.0,
            template: vec![0.5, 0.3, 0.2],
        });

        let total: f64 = res.splits.iter().map(|s| s.amount).sum();
        assert!((total - res.payout_total).abs() < 0.005);
    }

    #[test]
    fn test_greens_exceeding_entries_floor_at_zero() {
        let res = compute_payouts(&PayoutInput {
            entrants: 4,
            entry_fee: 2.0,
            green_fee: 5.0,
            sponsor_add: 50.0,
            template: vec![1.0],
        });

        // Net entry money floors at zero; only sponsor money is paid out.
        assert_eq!(res.payout_total, 50.0);
        assert_eq!(res.splits[0].amount, 50.0);
    }

    #[test]
    fn test_drift_folds_into_first_place() {
        let res = compute_payouts(&PayoutInput {
            entrants: 10,
            entry_fee: 10.0,
            green_fee: 0.0,
            sponsor_add: 0.0,
            template: vec![1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0],
        });

        // Each third rounds to 33.33; the missing cent lands on first place.
        assert_eq!(res.payout_total, 100.0);
        assert_eq!(res.splits[0].amount, 33.34);
        assert_eq!(res.splits[1].amount, 33.33);
        assert_eq!(res.splits[2].amount, 33.33);
    }
}
