//! Snapshot persistence.
//!
//! The engine itself holds no knowledge of where or how snapshots are made
//! durable. A storage collaborator implements [`SnapshotStore`] behind this
//! narrow interface, letting any backend be substituted.

use std::collections::HashMap;

use crate::Snapshot;

/// A keyed store of tournament snapshots.
pub trait SnapshotStore {
    /// Loads the snapshot stored under `key`.
    ///
    /// Returns `None` for a missing key and also for a stored value that no
    /// longer decodes as a valid snapshot; corrupt state is recovered by
    /// falling back to a fresh draw, never raised to the caller.
    fn load(&self, key: &str) -> Option<Snapshot>;

    /// Stores `snapshot` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, snapshot: &Snapshot);

    /// Removes the snapshot stored under `key`.
    fn clear(&mut self, key: &str);
}

/// An in-memory [`SnapshotStore`] keeping snapshots as JSON strings.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates a new empty `MemoryStore`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a raw value, bypassing encoding. Useful for seeding a store
    /// with externally produced data.
    pub fn insert_raw(&mut self, key: &str, raw: String) {
        self.entries.insert(key.to_owned(), raw);
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: &str) -> Option<Snapshot> {
        let raw = self.entries.get(key)?;

        match Snapshot::decode(raw) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                log::warn!("Discarding corrupt snapshot under {:?}: {}", key, err);
                None
            }
        }
    }

    fn save(&mut self, key: &str, snapshot: &Snapshot) {
        match snapshot.encode() {
            Ok(raw) => {
                self.entries.insert(key.to_owned(), raw);
            }
            Err(err) => log::warn!("Failed to encode snapshot under {:?}: {}", key, err),
        }
    }

    fn clear(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryStore, SnapshotStore};
    use crate::builder::{build, DrawOptions};
    use crate::{FinalsMode, Format, TournamentEngine};

    fn snapshot() -> crate::Snapshot {
        let options = DrawOptions {
            seed: Some(3),
            ..Default::default()
        };
        let bracket = build(["Alice", "Bob", "Charlie"], Format::Double, &options);
        TournamentEngine::new(bracket, FinalsMode::SingleDecisive).snapshot()
    }

    #[test]
    fn test_store_round_trip() {
        let mut store = MemoryStore::new();
        let snapshot = snapshot();

        assert_eq!(store.load("table-1"), None);

        store.save("table-1", &snapshot);
        assert_eq!(store.load("table-1"), Some(snapshot));

        store.clear("table-1");
        assert_eq!(store.load("table-1"), None);
    }

    #[test]
    fn test_store_recovers_from_corrupt_state() {
        let mut store = MemoryStore::new();
        store.insert_raw("table-1", "{\"winners\": oops".to_owned());

        assert_eq!(store.load("table-1"), None);
    }
}
