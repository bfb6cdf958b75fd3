//! Calcutta pot distribution.
//!
//! In a Calcutta, third parties bid at auction to "own" a share of a
//! competitor's potential winnings. The winning bids form the pot; the house
//! takes a rake and the remainder is split over the finishing places by a
//! share template. Owners are resolved by player name from the bid list.

use serde::{Deserialize, Serialize};

use crate::to_cents;

/// A winning auction bid: `owner` paid `amount` for `player`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    pub player: String,
    pub owner: String,
    pub amount: f64,
}

/// Calcutta pool settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalcuttaConfig {
    /// House rake as a percentage of the pot, e.g. `10.0` for 10%.
    #[serde(default)]
    pub rake_pct: f64,
    /// Per-place shares of the distributable pot.
    pub template: Vec<f64>,
}

/// The payout attributed to one finishing place.
///
/// `player` and `owner` stay `None` while the place is undecided or no bid
/// covered the player; the amount is still reserved for that place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerPayout {
    pub place: u32,
    pub player: Option<String>,
    pub owner: Option<String>,
    pub share: f64,
    pub amount: f64,
}

/// The total payout owed to one owner across all of their players' places.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OwnerPayout {
    pub owner: String,
    pub amount: f64,
}

/// The result of a Calcutta distribution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalcuttaResult {
    pub pot: f64,
    pub rake: f64,
    pub distributable: f64,
    pub player_payouts: Vec<PlayerPayout>,
    pub owner_payouts: Vec<OwnerPayout>,
}

/// Distributes a Calcutta pot over `placements`.
///
/// `placements` lists the finishing places the engine has decided so far
/// (first, second, third, ...), with `None` for places still undecided.
/// Rounding drift is folded into the first place before owner totals are
/// summed.
pub fn compute_calcutta(
    bids: &[Bid],
    config: &CalcuttaConfig,
    placements: &[Option<String>],
) -> CalcuttaResult {
    let pot = to_cents(bids.iter().map(|bid| bid.amount).sum());
    let rake = to_cents(pot * config.rake_pct / 100.0);
    let distributable = to_cents(pot - rake);

    let mut player_payouts: Vec<PlayerPayout> = config
        .template
        .iter()
        .enumerate()
        .map(|(index, &share)| {
            let player = placements
                .get(index)
                .and_then(|p| p.as_deref())
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_owned);

            let owner = player.as_deref().and_then(|name| owner_of(bids, name));

            PlayerPayout {
                place: index as u32 + 1,
                player,
                owner,
                share,
                amount: to_cents(distributable * share),
            }
        })
        .collect();

    let allocated: f64 = player_payouts.iter().map(|p| p.amount).sum();
    let drift = to_cents(distributable - allocated);
    if drift.abs() >= 0.01 {
        if let Some(first) = player_payouts.first_mut() {
            log::debug!("Folding rounding drift of {} into first place", drift);
            first.amount = to_cents(first.amount + drift);
        }
    }

    let mut owner_payouts: Vec<OwnerPayout> = Vec::new();
    for payout in &player_payouts {
        let Some(owner) = &payout.owner else { continue };

        match owner_payouts.iter_mut().find(|o| o.owner == *owner) {
            Some(entry) => entry.amount = to_cents(entry.amount + payout.amount),
            None => owner_payouts.push(OwnerPayout {
                owner: owner.clone(),
                amount: payout.amount,
            }),
        }
    }

    CalcuttaResult {
        pot,
        rake,
        distributable,
        player_payouts,
        owner_payouts,
    }
}

/// Resolves the owner of `player` from the bid list by trimmed-name match.
/// A later bid for the same player overrides an earlier one.
fn owner_of(bids: &[Bid], player: &str) -> Option<String> {
    bids.iter()
        .rev()
        .find(|bid| bid.player.trim() == player)
        .map(|bid| bid.owner.trim().to_owned())
}
