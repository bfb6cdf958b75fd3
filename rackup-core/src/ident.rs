//! # Match Identifier Scheme
//!
//! Every match is addressed by a [`MatchId`] encoding its side, 1-based round
//! and 1-based slot index within that round, rendered as `"W1-M3"` or
//! `"L2-M1"`.
//!
//! The id is not just a name: the winner's destination is always derived from
//! it. A match at `(side, round r, slot k)` feeds `(side, round r + 1, slot
//! ceil(k / 2))`, taking slot A if `k` is odd and slot B if `k` is even. This
//! single rule drives all winners-side and losers-side advancement without any
//! per-match lookup table. The only relationship not covered by it is the
//! cross-bracket drop of a winners-side loser, which is resolved by
//! placeholder matching at mutation time (see [`TournamentEngine`]).
//!
//! [`TournamentEngine`]: crate::TournamentEngine

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// The side of a bracket a match belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "W")]
    Winners,
    #[serde(rename = "L")]
    Losers,
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Side::Winners => f.write_str("W"),
            Side::Losers => f.write_str("L"),
        }
    }
}

/// One of the two slots of a match.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotIndex {
    A,
    B,
}

impl SlotIndex {
    /// Returns the opposite slot.
    #[inline]
    pub fn other(self) -> Self {
        match self {
            SlotIndex::A => SlotIndex::B,
            SlotIndex::B => SlotIndex::A,
        }
    }
}

/// The canonical address of a match: `(side, round, slot)`.
///
/// `round` and `slot` are both 1-based; `slot` is unique within a
/// `(side, round)` pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MatchId {
    pub side: Side,
    pub round: u32,
    pub slot: u32,
}

impl MatchId {
    /// Creates a new `MatchId`.
    #[inline]
    pub fn new(side: Side, round: u32, slot: u32) -> Self {
        Self { side, round, slot }
    }

    /// Returns the id of the match the winner advances into.
    ///
    /// The destination always exists arithmetically; whether a match with that
    /// id exists in the bracket is up to the caller (the final match of a side
    /// has no successor).
    #[inline]
    pub fn next(self) -> MatchId {
        MatchId {
            side: self.side,
            round: self.round + 1,
            slot: self.slot.div_ceil(2),
        }
    }

    /// Returns the destination of this match's winner: the next match id and
    /// the slot the winner occupies there. Slot A for an odd slot index, slot
    /// B for an even one.
    #[inline]
    pub fn destination(self) -> (MatchId, SlotIndex) {
        let slot = if self.slot % 2 == 1 {
            SlotIndex::A
        } else {
            SlotIndex::B
        };

        (self.next(), slot)
    }
}

impl Display for MatchId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}-M{}", self.side, self.round, self.slot)
    }
}

/// The error returned when parsing a [`MatchId`] from a string fails.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseMatchIdError {
    #[error("invalid side: expected 'W' or 'L', found {0:?}")]
    InvalidSide(char),
    #[error("invalid match id format: expected '<side><round>-M<slot>'")]
    InvalidFormat,
    #[error("round and slot must be 1-based")]
    Zero,
}

impl FromStr for MatchId {
    type Err = ParseMatchIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();

        let side = match chars.next() {
            Some('W' | 'w') => Side::Winners,
            Some('L' | 'l') => Side::Losers,
            Some(c) => return Err(ParseMatchIdError::InvalidSide(c)),
            None => return Err(ParseMatchIdError::InvalidFormat),
        };

        let rest = chars.as_str();
        let (round, slot) = rest
            .split_once("-M")
            .ok_or(ParseMatchIdError::InvalidFormat)?;

        let round: u32 = round.parse().map_err(|_| ParseMatchIdError::InvalidFormat)?;
        let slot: u32 = slot.parse().map_err(|_| ParseMatchIdError::InvalidFormat)?;

        if round == 0 || slot == 0 {
            return Err(ParseMatchIdError::Zero);
        }

        Ok(Self { side, round, slot })
    }
}

impl Serialize for MatchId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MatchId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MatchIdVisitor;

        impl Visitor<'_> for MatchIdVisitor {
            type Value = MatchId;

            fn expecting(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
                formatter.write_str("a match id string like \"W1-M3\"")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                value.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(MatchIdVisitor)
    }
}
