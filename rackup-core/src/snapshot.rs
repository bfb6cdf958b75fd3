//! The externally persisted state value.

use serde::{Deserialize, Serialize};

use crate::{Finals, Match};

/// The complete restorable state of a tournament.
///
/// A `Snapshot` has immutable value semantics: every engine mutation produces
/// a new one and prior snapshots are retained on the undo stack. A storage
/// collaborator must round-trip this shape losslessly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub winners: Vec<Match>,
    pub losers: Vec<Match>,
    pub finals: Finals,
}

impl Snapshot {
    /// Encodes the snapshot as JSON.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decodes a snapshot from JSON.
    pub fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
