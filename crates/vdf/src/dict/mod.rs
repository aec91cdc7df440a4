//! Ordered, duplicate-key-preserving associative container.
//!
//! [`OrderedMultiMap`] keeps every inserted `(key, value)` pair in insertion
//! order, even when keys repeat. Unqualified lookups resolve to the first
//! entry for a key; [`OrderedMultiMap::get_nth`] and [`EntryId`] reach the
//! others.
//!
//! Entries live in an arena of slots tagged with ascending serial numbers.
//! Removal leaves a tombstone; once tombstones make up more than half of the
//! arena it is compacted. An [`EntryId`] is the serial, not the slot
//! position, so it stays valid across compaction. A per-key index lists the
//! serials of each key in insertion order.

mod error;
mod iter;

use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;
use std::ops::Index;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

pub use error::DictError;
pub use iter::{GetAll, Ids, IntoIter, Iter, IterMut, Keys, Values};

/// Positional identity of one entry in an [`OrderedMultiMap`].
///
/// Identities are never reused while the map lives; they are reset by
/// [`OrderedMultiMap::clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(usize);

#[derive(Clone)]
pub(crate) struct Slot<V> {
    key: String,
    value: V,
}

/// Ordered multi-map keyed by string.
///
/// ```
/// use vdf::OrderedMultiMap;
///
/// let mut map = OrderedMultiMap::new();
/// map.insert("a", 1);
/// map.insert("b", 2);
/// map.insert("a", 3);
///
/// assert_eq!(map.get("a"), Some(&1));
/// assert_eq!(map.get_all("a").copied().collect::<Vec<_>>(), vec![1, 3]);
///
/// map.remove("a").unwrap();
/// assert_eq!(map.iter().collect::<Vec<_>>(), vec![("b", &2), ("a", &3)]);
/// ```
#[derive(Clone)]
pub struct OrderedMultiMap<V> {
    slots: Vec<Option<Slot<V>>>,
    /// Serial of each slot, ascending.
    serials: Vec<usize>,
    index: HashMap<String, Vec<usize>>,
    len: usize,
    next_serial: usize,
}

impl<V> Default for OrderedMultiMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> OrderedMultiMap<V> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            serials: Vec::new(),
            index: HashMap::new(),
            len: 0,
            next_serial: 0,
        }
    }

    fn slot(&self, serial: usize) -> Option<&Slot<V>> {
        let pos = self.serials.binary_search(&serial).ok()?;
        self.slots[pos].as_ref()
    }

    fn slot_mut(&mut self, serial: usize) -> Option<&mut Slot<V>> {
        let pos = self.serials.binary_search(&serial).ok()?;
        self.slots[pos].as_mut()
    }

    /// Drops tombstones once they outnumber live entries.
    fn compact(&mut self) {
        if (self.slots.len() - self.len) * 2 <= self.slots.len() {
            return;
        }
        let (serials, slots): (Vec<usize>, Vec<Option<Slot<V>>>) =
            std::mem::take(&mut self.serials)
                .into_iter()
                .zip(std::mem::take(&mut self.slots))
                .filter(|(_, slot)| slot.is_some())
                .unzip();
        self.serials = serials;
        self.slots = slots;
    }

    /// Number of live entries, counting duplicates.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends a new entry. Existing entries with the same key are kept.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> EntryId {
        let key = key.into();
        let serial = self.next_serial;
        self.next_serial += 1;
        self.index.entry(key.clone()).or_default().push(serial);
        self.slots.push(Some(Slot { key, value }));
        self.serials.push(serial);
        self.len += 1;
        EntryId(serial)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Number of entries bound to `key`.
    pub fn count(&self, key: &str) -> usize {
        self.index.get(key).map_or(0, Vec::len)
    }

    /// Returns the first value inserted under `key`.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.get_nth(key, 0)
    }

    /// Like [`get`](Self::get), but reports a missing key as an error.
    pub fn try_get(&self, key: &str) -> Result<&V, DictError> {
        self.get(key)
            .ok_or_else(|| DictError::KeyNotFound(key.to_owned()))
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let serial = *self.index.get(key)?.first()?;
        self.slot_mut(serial).map(|slot| &mut slot.value)
    }

    /// Returns the `n`-th value (zero-based) inserted under `key`.
    pub fn get_nth(&self, key: &str, n: usize) -> Option<&V> {
        let serial = *self.index.get(key)?.get(n)?;
        self.slot(serial).map(|slot| &slot.value)
    }

    /// Returns every value bound to `key` in insertion order.
    pub fn get_all<'a>(&'a self, key: &str) -> GetAll<'a, V> {
        let serials: &'a [usize] = self.index.get(key).map(Vec::as_slice).unwrap_or(&[]);
        GetAll {
            map: self,
            serials: serials.iter(),
        }
    }

    /// Identity of the `n`-th entry (zero-based) bound to `key`.
    pub fn id_of(&self, key: &str, n: usize) -> Option<EntryId> {
        self.index.get(key)?.get(n).copied().map(EntryId)
    }

    pub fn get_by_id(&self, id: EntryId) -> Option<(&str, &V)> {
        self.slot(id.0)
            .map(|slot| (slot.key.as_str(), &slot.value))
    }

    pub fn get_by_id_mut(&mut self, id: EntryId) -> Option<&mut V> {
        self.slot_mut(id.0).map(|slot| &mut slot.value)
    }

    /// Overwrites the value of an existing entry in place and returns the
    /// previous value.
    pub fn replace(&mut self, id: EntryId, value: V) -> Result<V, DictError> {
        let slot = self.get_by_id_mut(id).ok_or(DictError::StaleEntry)?;
        Ok(std::mem::replace(slot, value))
    }

    /// Removes the first entry bound to `key`.
    pub fn remove(&mut self, key: &str) -> Result<V, DictError> {
        let id = self
            .id_of(key, 0)
            .ok_or_else(|| DictError::KeyNotFound(key.to_owned()))?;
        self.remove_by_id(id).map(|(_, value)| value)
    }

    /// Removes exactly the entry identified by `id`.
    pub fn remove_by_id(&mut self, id: EntryId) -> Result<(String, V), DictError> {
        let slot = self
            .serials
            .binary_search(&id.0)
            .ok()
            .and_then(|pos| self.slots[pos].take())
            .ok_or(DictError::StaleEntry)?;
        if let Some(serials) = self.index.get_mut(&slot.key) {
            if let Ok(at) = serials.binary_search(&id.0) {
                serials.remove(at);
            }
            if serials.is_empty() {
                self.index.remove(&slot.key);
            }
        }
        self.len -= 1;
        self.compact();
        Ok((slot.key, slot.value))
    }

    /// Removes every entry bound to `key` and returns how many were removed.
    pub fn remove_all(&mut self, key: &str) -> usize {
        let Some(serials) = self.index.remove(key) else {
            return 0;
        };
        for serial in &serials {
            if let Ok(pos) = self.serials.binary_search(serial) {
                self.slots[pos] = None;
            }
        }
        self.len -= serials.len();
        self.compact();
        serials.len()
    }

    /// Removes every entry and resets entry identities.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.serials.clear();
        self.index.clear();
        self.len = 0;
        self.next_serial = 0;
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: self.serials.iter().zip(self.slots.iter()),
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            slots: self.slots.iter_mut(),
            remaining: self.len,
        }
    }

    pub fn keys(&self) -> Keys<'_, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, V> {
        Values { inner: self.iter() }
    }

    pub fn ids(&self) -> Ids<'_, V> {
        Ids { inner: self.iter() }
    }
}

impl<V> Index<&str> for OrderedMultiMap<V> {
    type Output = V;

    /// # Panics
    ///
    /// Panics if `key` is not present.
    fn index(&self, key: &str) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("key not found: {key:?}"),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for OrderedMultiMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V, W> PartialEq<OrderedMultiMap<W>> for OrderedMultiMap<V>
where
    V: PartialEq<W>,
{
    fn eq(&self, other: &OrderedMultiMap<W>) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((ka, va), (kb, vb))| ka == kb && va == vb)
    }
}

impl<V, W, S> PartialEq<IndexMap<String, W, S>> for OrderedMultiMap<V>
where
    V: PartialEq<W>,
    S: BuildHasher,
{
    fn eq(&self, other: &IndexMap<String, W, S>) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((ka, va), (kb, vb))| ka == kb && va == vb)
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMultiMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V> Extend<(K, V)> for OrderedMultiMap<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<V> IntoIterator for OrderedMultiMap<V> {
    type Item = (String, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            remaining: self.len,
            slots: self.slots.into_iter(),
        }
    }
}

impl<'a, V> IntoIterator for &'a OrderedMultiMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Serializes as a map that repeats duplicated keys in insertion order.
impl<V: Serialize> Serialize for OrderedMultiMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
