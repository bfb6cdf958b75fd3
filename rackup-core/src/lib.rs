//! # rackup-core
//!
//! This crate contains the bracket topology and match-progression engine for
//! single and double elimination tournaments.
//!
//! Important types:
//! - [`Bracket`]: The full bracket skeleton, winners and losers sides.
//! - [`Match`]: A *match* or *heat* of two parties.
//! - [`Slot`]: A spot within a match, holding an entrant, a bye, a
//!   to-be-determined marker or a cross-bracket placeholder.
//! - [`MatchId`]: The canonical address of a match, encoding side, round and
//!   slot index. All intra-bracket advancement is derived from it.
//! - [`TournamentEngine`]: The advancement state machine. Consumes recorded
//!   results, owns the undo history and the grand-final sequencing.
//! - [`Snapshot`]: The complete externally persisted state value.
//!
//! The engine is synchronous and single-writer: every operation runs to
//! completion in the calling context and either succeeds or is a no-op.

pub mod builder;
pub mod ident;
pub mod rng;
pub mod standings;
pub mod store;

mod engine;
mod finals;
mod snapshot;

pub use builder::{build, DrawOptions};
pub use engine::TournamentEngine;
pub use finals::{Finals, FinalsMode, FinalsStage};
pub use ident::{MatchId, ParseMatchIdError, Side, SlotIndex};
pub use snapshot::Snapshot;

use serde::{Deserialize, Serialize};

/// The bracket format of a tournament.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// A single loss eliminates an entrant.
    Single,
    /// A first loss drops an entrant into the losers bracket; a second loss
    /// eliminates them.
    Double,
}

/// A spot for an entrant within a [`Match`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// A concrete entrant, identified only by their current display name.
    Entrant(String),
    /// A permanently empty spot caused by a non-power-of-two entrant count.
    Bye,
    /// A spot that will be filled by a future result.
    Tbd,
    /// Losers-side only: filled by the loser of the referenced winners-side
    /// match once that match is decided.
    LoserOf(MatchId),
    /// Losers-side only: reserved for a re-entry when buybacks are enabled.
    Buyback,
}

impl Slot {
    /// Returns the entrant name if the slot holds a concrete entrant.
    #[inline]
    pub fn entrant(&self) -> Option<&str> {
        match self {
            Slot::Entrant(name) => Some(name),
            _ => None,
        }
    }

    /// Returns `true` if the slot holds a concrete entrant.
    #[inline]
    pub fn is_entrant(&self) -> bool {
        matches!(self, Slot::Entrant(_))
    }

    /// Returns `true` if the slot is a bye.
    #[inline]
    pub fn is_bye(&self) -> bool {
        matches!(self, Slot::Bye)
    }
}

/// A match of two parties.
///
/// A `Match` is locked if and only if `decided_slot` is set. A locked match
/// never accepts another result; its winner has already been propagated
/// downstream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// 1-based round, duplicated from `id` for convenience.
    pub round: u32,
    pub side: Side,
    pub slot_a: Slot,
    pub slot_b: Slot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_slot: Option<SlotIndex>,
}

impl Match {
    /// Creates a new undecided `Match` with the given slots.
    pub fn new(id: MatchId, slot_a: Slot, slot_b: Slot) -> Self {
        Self {
            id,
            round: id.round,
            side: id.side,
            slot_a,
            slot_b,
            decided_slot: None,
        }
    }

    /// Returns a reference to the slot at `index`.
    #[inline]
    pub fn slot(&self, index: SlotIndex) -> &Slot {
        match index {
            SlotIndex::A => &self.slot_a,
            SlotIndex::B => &self.slot_b,
        }
    }

    /// Returns a mutable reference to the slot at `index`.
    #[inline]
    pub fn slot_mut(&mut self, index: SlotIndex) -> &mut Slot {
        match index {
            SlotIndex::A => &mut self.slot_a,
            SlotIndex::B => &mut self.slot_b,
        }
    }

    /// Returns `true` once a result has been recorded against this match.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.decided_slot.is_some()
    }

    /// Returns the winner's name, or `None` while the match is undecided.
    pub fn winner(&self) -> Option<&str> {
        self.decided_slot.and_then(|index| self.slot(index).entrant())
    }

    /// Returns the loser's name, or `None` while the match is undecided or
    /// the losing slot holds no concrete entrant (e.g. a bye).
    pub fn loser(&self) -> Option<&str> {
        self.decided_slot
            .and_then(|index| self.slot(index.other()).entrant())
    }
}

/// Draw-time facts about a bracket, fixed once it is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawMeta {
    /// Number of winners-side rounds.
    pub rounds_winners: u32,
    /// Number of losers-side rounds. `0` for [`Format::Single`].
    pub rounds_losers: u32,
    /// Number of empty round-1 spots.
    pub byes: u32,
    pub buybacks_enabled: bool,
    /// Re-entry price in dollars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyback_fee: Option<f64>,
}

/// A full tournament bracket.
///
/// `winners` contains exactly one match per `(round, slot)` pair for rounds
/// `1..=R` where the bracket size is the smallest power of two that fits the
/// entrant count. `losers` is empty for [`Format::Single`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub format: Format,
    pub winners: Vec<Match>,
    pub losers: Vec<Match>,
    pub meta: DrawMeta,
}

impl Bracket {
    /// Returns a reference to the match with the given `id`, searching the
    /// side encoded in the id.
    pub fn get(&self, id: MatchId) -> Option<&Match> {
        self.side(id.side).iter().find(|m| m.id == id)
    }

    /// Returns a mutable reference to the match with the given `id`.
    pub fn get_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        self.side_mut(id.side).iter_mut().find(|m| m.id == id)
    }

    /// Returns the matches of the given `side`.
    #[inline]
    pub fn side(&self, side: Side) -> &[Match] {
        match side {
            Side::Winners => &self.winners,
            Side::Losers => &self.losers,
        }
    }

    #[inline]
    fn side_mut(&mut self, side: Side) -> &mut Vec<Match> {
        match side {
            Side::Winners => &mut self.winners,
            Side::Losers => &mut self.losers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_winner_loser() {
        let id = MatchId::new(Side::Winners, 1, 1);
        let mut m = Match::new(
            id,
            Slot::Entrant("Alice".into()),
            Slot::Entrant("Bob".into()),
        );

        assert!(!m.is_locked());
        assert_eq!(m.winner(), None);
        assert_eq!(m.loser(), None);

        m.decided_slot = Some(SlotIndex::B);

        assert!(m.is_locked());
        assert_eq!(m.winner(), Some("Bob"));
        assert_eq!(m.loser(), Some("Alice"));
    }

    #[test]
    fn test_match_loser_bye() {
        let id = MatchId::new(Side::Winners, 1, 2);
        let mut m = Match::new(id, Slot::Entrant("Alice".into()), Slot::Bye);
        m.decided_slot = Some(SlotIndex::A);

        assert_eq!(m.winner(), Some("Alice"));
        assert_eq!(m.loser(), None);
    }

    #[test]
    fn test_slot_serialize() {
        let slot = Slot::Entrant("Alice".into());
        assert_eq!(
            serde_json::to_string(&slot).unwrap(),
            r#"{"entrant":"Alice"}"#
        );

        let slot = Slot::LoserOf(MatchId::new(Side::Winners, 1, 2));
        assert_eq!(
            serde_json::to_string(&slot).unwrap(),
            r#"{"loser_of":"W1-M2"}"#
        );

        assert_eq!(serde_json::to_string(&Slot::Bye).unwrap(), r#""bye""#);
        assert_eq!(serde_json::to_string(&Slot::Tbd).unwrap(), r#""tbd""#);
    }
}
