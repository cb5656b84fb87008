//! Scanner output models: ordered frequency tables, vector subtree
//! records, and layout-technique counters.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::HashMap;

/// String-to-count table that iterates in first-insertion order.
///
/// Rendering "most common" subsets from an insertion-ordered table keeps
/// report output deterministic across runs.
#[derive(Default, Clone, Debug)]
pub struct CountMap {
    counts: HashMap<String, usize>,
    order: Vec<String>,
}

impl CountMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bump(&mut self, key: &str) {
        match self.counts.get_mut(key) {
            Some(n) => *n += 1,
            None => {
                self.counts.insert(key.to_string(), 1);
                self.order.push(key.to_string());
            }
        }
    }

    pub fn get(&self, key: &str) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.order.iter().map(|k| (k.as_str(), self.counts[k]))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|k| k.as_str())
    }
}

impl Serialize for CountMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.order.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, &v)?;
        }
        map.end()
    }
}

/// Design-token table: name to declared raw value, first-declaration
/// order, last-write-wins on duplicates.
#[derive(Default, Clone, Debug)]
pub struct TokenMap {
    values: HashMap<String, String>,
    order: Vec<String>,
}

impl TokenMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        if self.values.insert(name.to_string(), value.to_string()).is_none() {
            self.order.push(name.to_string());
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|v| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order
            .iter()
            .map(|k| (k.as_str(), self.values[k].as_str()))
    }

    /// True when any token name starts with the given category prefix.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.order.iter().any(|k| k.starts_with(prefix))
    }
}

impl Serialize for TokenMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.order.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[derive(Serialize, Clone, Debug)]
/// One distinct vector-graphic subtree, keyed by its normalized
/// fingerprint, with every source line where it closed.
pub struct SubtreeRecord {
    pub fingerprint: String,
    pub count: usize,
    pub lines: Vec<usize>,
}

#[derive(Serialize, Clone, Copy, Default, Debug)]
/// Occurrence counters for the three layout techniques observed in
/// inline and block style text.
pub struct StyleSignal {
    pub absolute: usize,
    pub flex: usize,
    pub grid: usize,
}

#[derive(Serialize, Default, Debug)]
/// Everything one scan pass produces. Read-only once the scan returns.
pub struct ScanOutcome {
    pub tags: CountMap,
    pub classes: CountMap,
    /// `data-component` attribute values.
    pub markers: CountMap,
    pub style: StyleSignal,
    /// Distinct vector subtrees in first-seen order.
    pub subtrees: Vec<SubtreeRecord>,
}

impl ScanOutcome {
    /// Subtree records seen more than once.
    pub fn duplicates(&self) -> impl Iterator<Item = &SubtreeRecord> {
        self.subtrees.iter().filter(|r| r.count > 1)
    }

    pub fn duplicate_kinds(&self) -> usize {
        self.duplicates().count()
    }
}
