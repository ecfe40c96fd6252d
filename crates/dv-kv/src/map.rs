use std::collections::BTreeMap;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::checksum::Checksum;

/// An immutable, checksummed key-value snapshot.
///
/// A snapshot wraps an ordered map from string keys to JSON values together
/// with a [`Checksum`] computed eagerly at construction. There is no
/// mutation API: a new state of the world is a new `Snapshot`. Two
/// snapshots with identical key/value sets always carry identical checksums
/// regardless of how they were built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    entries: BTreeMap<String, Value>,
    checksum: Checksum,
}

impl Snapshot {
    /// Construct a snapshot from a map, computing its checksum.
    pub fn new(entries: BTreeMap<String, Value>) -> Self {
        let checksum = Checksum::compute(&entries);
        Self { entries, checksum }
    }

    /// The empty snapshot.
    pub fn empty() -> Self {
        Self::new(BTreeMap::new())
    }

    /// The content checksum of this snapshot.
    pub fn checksum(&self) -> Checksum {
        self.checksum
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns `true` if the snapshot contains `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the snapshot has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// The underlying ordered map.
    pub fn entries(&self) -> &BTreeMap<String, Value> {
        &self.entries
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<BTreeMap<String, Value>> for Snapshot {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self::new(entries)
    }
}

// On the wire a snapshot is just its map; the checksum is recomputed on
// decode, which keeps stored commits honest about their content.
impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = BTreeMap::<String, Value>::deserialize(deserializer)?;
        Ok(Self::new(entries))
    }
}
