//! The [`Mapping`] contract the codecs build trees with, and its two
//! implementations.
//!
//! - [`Dict`]: plain ordered map; inserting an existing key replaces its
//!   value in place.
//! - [`VdfDict`]: duplicate-preserving; every insert appends a new entry.

use std::fmt;
use std::ops::{Deref, DerefMut};

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::dict::{self, OrderedMultiMap};
use crate::value::Value;

/// A string-keyed, ordered associative container used at every nesting
/// level of a decoded tree.
///
/// `Default` is the factory: decoders call `M::default()` whenever they open
/// a nested level.
pub trait Mapping: Default {
    type Iter<'a>: Iterator<Item = (&'a str, &'a Value<Self>)>
    where
        Self: 'a;

    /// Binds `value` under `key` following the container's own policy for
    /// keys that are already present.
    fn insert(&mut self, key: String, value: Value<Self>);

    /// First value bound to `key`.
    fn get(&self, key: &str) -> Option<&Value<Self>>;

    fn get_mut(&mut self, key: &str) -> Option<&mut Value<Self>>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries in iteration order.
    fn iter(&self) -> Self::Iter<'_>;
}

/// Sequence equality over two mappings, possibly of different types.
pub(crate) fn entries_eq<A: Mapping, B: Mapping>(a: &A, b: &B) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b.iter())
            .all(|((ka, va), (kb, vb))| ka == kb && va == vb)
}

fn serialize_entries<M, S>(map: &M, serializer: S) -> Result<S::Ok, S::Error>
where
    M: Mapping + Serialize,
    S: Serializer,
{
    let mut out = serializer.serialize_map(Some(map.len()))?;
    for (key, value) in map.iter() {
        out.serialize_entry(key, value)?;
    }
    out.end()
}

// ---------------------------------------------------------------------------
// Dict
// ---------------------------------------------------------------------------

/// Plain ordered map. Keys are unique.
#[derive(Clone, Default)]
pub struct Dict(IndexMap<String, Value<Dict>>);

impl Dict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_inner(self) -> IndexMap<String, Value<Dict>> {
        self.0
    }
}

/// Iterator over the entries of a [`Dict`].
pub struct DictIter<'a>(indexmap::map::Iter<'a, String, Value<Dict>>);

impl<'a> Iterator for DictIter<'a> {
    type Item = (&'a str, &'a Value<Dict>);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, value)| (key.as_str(), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl Mapping for Dict {
    type Iter<'a> = DictIter<'a>;

    fn insert(&mut self, key: String, value: Value<Self>) {
        self.0.insert(key, value);
    }

    fn get(&self, key: &str) -> Option<&Value<Self>> {
        self.0.get(key)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut Value<Self>> {
        self.0.get_mut(key)
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn iter(&self) -> Self::Iter<'_> {
        DictIter(self.0.iter())
    }
}

impl Deref for Dict {
    type Target = IndexMap<String, Value<Dict>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Dict {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<IndexMap<String, Value<Dict>>> for Dict {
    fn from(map: IndexMap<String, Value<Dict>>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value<Dict>>> FromIterator<(K, V)> for Dict {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl fmt::Debug for Dict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

impl<M: Mapping> PartialEq<M> for Dict {
    fn eq(&self, other: &M) -> bool {
        entries_eq(self, other)
    }
}

impl Serialize for Dict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_entries(self, serializer)
    }
}

// ---------------------------------------------------------------------------
// VdfDict
// ---------------------------------------------------------------------------

/// Duplicate-preserving ordered map, backed by [`OrderedMultiMap`].
///
/// All multi-map operations (`get_all`, `remove_all`, `get_nth`, entry
/// identities, ...) are reachable through `Deref`.
#[derive(Clone, Default)]
pub struct VdfDict(OrderedMultiMap<Value<VdfDict>>);

impl VdfDict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_inner(self) -> OrderedMultiMap<Value<VdfDict>> {
        self.0
    }
}

impl Mapping for VdfDict {
    type Iter<'a> = dict::Iter<'a, Value<VdfDict>>;

    fn insert(&mut self, key: String, value: Value<Self>) {
        self.0.insert(key, value);
    }

    fn get(&self, key: &str) -> Option<&Value<Self>> {
        self.0.get(key)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut Value<Self>> {
        self.0.get_mut(key)
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.0.iter()
    }
}

impl Deref for VdfDict {
    type Target = OrderedMultiMap<Value<VdfDict>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for VdfDict {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<OrderedMultiMap<Value<VdfDict>>> for VdfDict {
    fn from(map: OrderedMultiMap<Value<VdfDict>>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value<VdfDict>>> FromIterator<(K, V)> for VdfDict {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key, value.into()))
                .collect(),
        )
    }
}

impl fmt::Debug for VdfDict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<M: Mapping> PartialEq<M> for VdfDict {
    fn eq(&self, other: &M) -> bool {
        entries_eq(self, other)
    }
}

impl Serialize for VdfDict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_entries(self, serializer)
    }
}
