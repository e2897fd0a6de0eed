//! The ordered associative container backing mappings and scopes.
//!
//! Keys are arbitrary values compared by structural (deep) equality, not
//! identity, and enumeration preserves insertion order. Scope chaining is
//! [`PsMap::concat`]: overlay entries shadow base entries with equal keys
//! without mutating either input.
//!
//! Implemented as an ordered list of pairs plus the deep-equality predicate
//! on [`Value`] — hashing arbitrary recursive mappings would require a
//! canonical encoding of every variant, which nothing here needs.

use crate::{PsResult, Value, ValueKind};
use futures::future::BoxFuture;

/// An ordered mapping from PS values to PS values.
#[derive(Debug, Clone, Default)]
pub struct PsMap {
    entries: Vec<(Value, Value)>,
}

impl PsMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a value by structurally-equal key.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Look up by plain string key — the common case for scope bindings.
    ///
    /// Matches holeless string keys only.
    pub fn get_str(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }

    /// Look up an entry whose key is the single-segment reference `$name`.
    ///
    /// Special forms use this to find their sibling entries (`$do`, `$let`)
    /// among a call's trailing entries.
    pub fn get_ref(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| match &k.kind {
                ValueKind::Ref(r) => r.path.len() == 1 && r.path[0] == name,
                _ => false,
            })
            .map(|(_, v)| v)
    }

    /// Insert an entry. A duplicate-equal key overwrites in place, keeping
    /// the position of first insertion for iteration purposes.
    pub fn insert(&mut self, key: Value, value: Value) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Layer `overlay` over `self` without mutating either: overlay entries
    /// shadow base entries with equal keys, new entries are appended in the
    /// overlay's order. This is how scopes chain.
    pub fn concat(&self, overlay: &PsMap) -> PsMap {
        let mut out = self.clone();
        for (k, v) in overlay.iter() {
            out.insert(k.clone(), v.clone());
        }
        out
    }

    /// Apply a (possibly suspending) transform to every value, preserving
    /// keys and order. Entries are transformed strictly in insertion order.
    pub async fn map_values<'a, F>(&'a self, mut f: F) -> PsResult<PsMap>
    where
        F: FnMut(&'a Value, &'a Value) -> BoxFuture<'a, PsResult<Value>> + Send,
    {
        let mut out = PsMap::new();
        for (k, v) in self.iter() {
            let mapped = f(k, v).await?;
            out.insert(k.clone(), mapped);
        }
        Ok(out)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, (Value, Value)> {
        self.entries.iter()
    }

    /// The first entry in insertion order.
    pub fn first(&self) -> Option<&(Value, Value)> {
        self.entries.first()
    }

    /// Everything but the first entry, as a new map.
    pub fn rest(&self) -> PsMap {
        PsMap {
            entries: self.entries.iter().skip(1).cloned().collect(),
        }
    }
}

// Two mappings are equal iff they hold the same entries in the structural
// sense; entry order does not participate in equality.
impl PartialEq for PsMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|ov| ov == v))
    }
}

impl FromIterator<(Value, Value)> for PsMap {
    fn from_iter<T: IntoIterator<Item = (Value, Value)>>(iter: T) -> Self {
        let mut map = PsMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<'a> IntoIterator for &'a PsMap {
    type Item = &'a (Value, Value);
    type IntoIter = std::slice::Iter<'a, (Value, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
