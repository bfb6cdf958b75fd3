//! # Bracket Builder
//!
//! Turns an entrant list into the full bracket skeleton: every winners-side
//! match for every round, and, for double elimination, the losers-side
//! topology with cross-reference placeholders. The builder renders the full
//! future shape before any result exists; byes are placed here but resolved by
//! the engine's auto-bye pass (see [`TournamentEngine`]).
//!
//! [`TournamentEngine`]: crate::TournamentEngine

use serde::{Deserialize, Serialize};

use crate::ident::{MatchId, Side};
use crate::rng;
use crate::{Bracket, DrawMeta, Format, Match, Slot};

/// Options for a tournament draw.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawOptions {
    /// Seed for the entrant shuffle. If absent the draw uses a time-based
    /// seed and is not reproducible.
    pub seed: Option<u32>,
    /// Reserve one slot per losers round-1 match for a paid re-entry instead
    /// of a second round-1 loser.
    pub buybacks_enabled: bool,
    /// Re-entry price in dollars.
    pub buyback_fee: Option<f64>,
}

/// Builds a [`Bracket`] for `entrants` in the given `format`.
///
/// Entrant names are trimmed and empty names are discarded; the remaining
/// list is shuffled, padded with byes to the next power of two and paired
/// consecutively into round 1. Zero entrants yield a size-1 bracket with a
/// single all-bye match.
pub fn build<I, S>(entrants: I, format: Format, options: &DrawOptions) -> Bracket
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut names: Vec<String> = entrants
        .into_iter()
        .map(|name| name.as_ref().trim().to_owned())
        .filter(|name| !name.is_empty())
        .collect();

    let seed = options.seed.unwrap_or_else(rng::seed_from_time);
    rng::shuffle(&mut names, seed);

    let size = names.len().next_power_of_two().max(1);
    let byes = size - names.len();
    let rounds_winners = size.ilog2().max(1);

    log::debug!(
        "Creating a new {:?} bracket with {} entrants (size {}, {} byes)",
        format,
        names.len(),
        size,
        byes
    );

    let initial_matches = (size / 2).max(1);
    let mut winners = Vec::with_capacity(size.max(2) - 1);

    // Round 1: pair consecutive padded spots. A missing spot is a bye.
    for index in 0..initial_matches {
        let slot_a = spot(&names, index * 2);
        let slot_b = spot(&names, index * 2 + 1);

        let id = MatchId::new(Side::Winners, 1, index as u32 + 1);
        winners.push(Match::new(id, slot_a, slot_b));
    }

    // Rounds 2..=R are empty shells so the full shape renders up front.
    for round in 2..=rounds_winners {
        for slot in 1..=(size >> round).max(1) {
            let id = MatchId::new(Side::Winners, round, slot as u32);
            winners.push(Match::new(id, Slot::Tbd, Slot::Tbd));
        }
    }

    let (losers, rounds_losers) = match format {
        Format::Single => (Vec::new(), 0),
        Format::Double => build_losers(initial_matches, rounds_winners, options),
    };

    log::debug!(
        "Created a new {:?} bracket with {} winners and {} losers matches",
        format,
        winners.len(),
        losers.len()
    );

    Bracket {
        format,
        winners,
        losers,
        meta: DrawMeta {
            rounds_winners,
            rounds_losers,
            byes: byes as u32,
            buybacks_enabled: options.buybacks_enabled,
            buyback_fee: options.buyback_fee,
        },
    }
}

#[inline]
fn spot(names: &[String], index: usize) -> Slot {
    match names.get(index) {
        Some(name) => Slot::Entrant(name.clone()),
        None => Slot::Bye,
    }
}

/// Builds the losers-side topology: round 1 collects the winners round-1
/// losers via [`Slot::LoserOf`] placeholders, the remaining rounds are shells
/// sized by halving the previous round (minimum 1), mirroring the standard
/// drop schedule where winners-round losers interleave with losers-bracket
/// advancement rounds.
fn build_losers(
    round1_matches: usize,
    rounds_winners: u32,
    options: &DrawOptions,
) -> (Vec<Match>, u32) {
    let rounds_losers = (2 * rounds_winners).saturating_sub(1).max(1);
    let mut losers = Vec::new();

    for index in 0..round1_matches {
        let source_a = MatchId::new(Side::Winners, 1, index as u32 * 2 + 1);
        let slot_a = Slot::LoserOf(source_a);

        let slot_b = if options.buybacks_enabled {
            Slot::Buyback
        } else {
            Slot::LoserOf(MatchId::new(Side::Winners, 1, index as u32 * 2 + 2))
        };

        let id = MatchId::new(Side::Losers, 1, index as u32 + 1);
        losers.push(Match::new(id, slot_a, slot_b));
    }

    let mut previous = round1_matches;
    for round in 2..=rounds_losers {
        let count = previous.div_ceil(2).max(1);

        for slot in 1..=count {
            let id = MatchId::new(Side::Losers, round, slot as u32);
            losers.push(Match::new(id, Slot::Tbd, Slot::Tbd));
        }

        previous = count;
    }

    (losers, rounds_losers)
}

#[cfg(test)]
mod tests {
    use super::{build, DrawOptions};
    use crate::ident::{MatchId, Side};
    use crate::{Format, Slot};

    fn options(seed: u32) -> DrawOptions {
        DrawOptions {
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_eight_entrants_single() {
        let entrants = [
            "Alice", "Bob", "Charlie", "Derek", "Erin", "Frank", "Gina", "Hank",
        ];
        let bracket = build(entrants, Format::Single, &options(1));

        assert_eq!(bracket.meta.byes, 0);
        assert_eq!(bracket.meta.rounds_winners, 3);
        assert_eq!(bracket.meta.rounds_losers, 0);
        assert!(bracket.losers.is_empty());

        let round1: Vec<_> = bracket.winners.iter().filter(|m| m.round == 1).collect();
        assert_eq!(round1.len(), 4);
        assert!(round1.iter().all(|m| m.slot_a.is_entrant() && m.slot_b.is_entrant()));

        // Rounds 2 and 3 are TBD shells.
        assert_eq!(bracket.winners.len(), 7);
        for m in bracket.winners.iter().filter(|m| m.round > 1) {
            assert_eq!(m.slot_a, Slot::Tbd);
            assert_eq!(m.slot_b, Slot::Tbd);
        }
    }

    #[test]
    fn test_build_three_entrants_has_one_bye() {
        let bracket = build(["Alice", "Bob", "Charlie"], Format::Single, &options(9));

        assert_eq!(bracket.meta.byes, 1);
        assert_eq!(bracket.meta.rounds_winners, 2);

        let byes = bracket
            .winners
            .iter()
            .filter(|m| m.round == 1 && (m.slot_a.is_bye() || m.slot_b.is_bye()))
            .count();
        assert_eq!(byes, 1);

        // The padded spot is always the last one, so the bye sits in W1-M2.
        let m = bracket.get(MatchId::new(Side::Winners, 1, 2)).unwrap();
        assert!(m.slot_a.is_entrant());
        assert_eq!(m.slot_b, Slot::Bye);
    }

    #[test]
    fn test_build_trims_and_drops_empty_names() {
        let bracket = build(["  Alice ", "", "   ", "Bob"], Format::Single, &options(3));

        assert_eq!(bracket.meta.byes, 0);
        assert_eq!(bracket.winners.len(), 1);

        let m = &bracket.winners[0];
        let mut names = vec![
            m.slot_a.entrant().unwrap().to_owned(),
            m.slot_b.entrant().unwrap().to_owned(),
        ];
        names.sort();
        assert_eq!(names, ["Alice", "Bob"]);
    }

    #[test]
    fn test_build_sizing_for_any_entrant_count() {
        for n in 0..=33usize {
            let entrants: Vec<String> = (0..n).map(|i| format!("p{}", i)).collect();
            let bracket = build(&entrants, Format::Single, &options(7));

            // Bracket size is the entrant count padded by the bye count.
            let size = n + bracket.meta.byes as usize;
            assert!(size.is_power_of_two(), "n = {}", n);
            assert!(size >= n, "n = {}", n);

            let round1 = bracket.winners.iter().filter(|m| m.round == 1).count();
            assert_eq!(round1, (size / 2).max(1), "n = {}", n);
            assert_eq!(bracket.winners.len(), size.max(2) - 1, "n = {}", n);

            // Every entrant occupies exactly one round-1 slot.
            let filled = bracket
                .winners
                .iter()
                .filter(|m| m.round == 1)
                .flat_map(|m| [&m.slot_a, &m.slot_b])
                .filter(|slot| slot.is_entrant())
                .count();
            assert_eq!(filled, n, "n = {}", n);
        }
    }

    #[test]
    fn test_build_deterministic_for_seed() {
        let entrants = ["a", "b", "c", "d", "e"];
        let first = build(entrants, Format::Double, &options(77));
        let second = build(entrants, Format::Double, &options(77));

        assert_eq!(first, second);
    }

    #[test]
    fn test_build_zero_entrants() {
        let bracket = build::<_, &str>([], Format::Single, &options(1));

        assert_eq!(bracket.meta.byes, 1);
        assert_eq!(bracket.winners.len(), 1);
        assert_eq!(bracket.winners[0].slot_a, Slot::Bye);
        assert_eq!(bracket.winners[0].slot_b, Slot::Bye);
    }

    #[test]
    fn test_build_single_entrant() {
        let bracket = build(["Alice"], Format::Single, &options(1));

        assert_eq!(bracket.winners.len(), 1);
        assert_eq!(bracket.winners[0].slot_a, Slot::Entrant("Alice".into()));
        assert_eq!(bracket.winners[0].slot_b, Slot::Bye);
        assert!(!bracket.winners[0].is_locked());
    }

    #[test]
    fn test_build_double_losers_topology() {
        let bracket = build(["a", "b", "c", "d"], Format::Double, &options(5));

        // R = 2, so the losers side has max(1, 2R - 1) = 3 rounds.
        assert_eq!(bracket.meta.rounds_losers, 3);

        let l1: Vec<_> = bracket.losers.iter().filter(|m| m.round == 1).collect();
        assert_eq!(l1.len(), 2);
        assert_eq!(
            l1[0].slot_a,
            Slot::LoserOf(MatchId::new(Side::Winners, 1, 1))
        );
        assert_eq!(
            l1[0].slot_b,
            Slot::LoserOf(MatchId::new(Side::Winners, 1, 2))
        );

        assert_eq!(bracket.losers.iter().filter(|m| m.round == 2).count(), 1);
        assert_eq!(bracket.losers.iter().filter(|m| m.round == 3).count(), 1);
    }

    #[test]
    fn test_build_double_buybacks() {
        let opts = DrawOptions {
            seed: Some(5),
            buybacks_enabled: true,
            buyback_fee: Some(10.0),
        };
        let bracket = build(["a", "b", "c", "d"], Format::Double, &opts);

        for m in bracket.losers.iter().filter(|m| m.round == 1) {
            assert!(matches!(m.slot_a, Slot::LoserOf(_)));
            assert_eq!(m.slot_b, Slot::Buyback);
        }
        assert_eq!(bracket.meta.buyback_fee, Some(10.0));
    }
}
