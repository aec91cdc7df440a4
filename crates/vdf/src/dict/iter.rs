//! Iterators over [`OrderedMultiMap`](super::OrderedMultiMap) entries.

use std::iter::FusedIterator;

use super::{EntryId, OrderedMultiMap, Slot};

/// Iterator over `(key, value)` pairs in insertion order.
pub struct Iter<'a, V> {
    pub(super) slots:
        std::iter::Zip<std::slice::Iter<'a, usize>, std::slice::Iter<'a, Option<Slot<V>>>>,
    pub(super) remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    fn next_entry(&mut self) -> Option<(EntryId, &'a Slot<V>)> {
        for (&serial, slot) in self.slots.by_ref() {
            if let Some(slot) = slot {
                self.remaining -= 1;
                return Some((EntryId(serial), slot));
            }
        }
        None
    }
}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry()
            .map(|(_, slot)| (slot.key.as_str(), &slot.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
impl<V> FusedIterator for Iter<'_, V> {}

/// Iterator over `(key, &mut value)` pairs in insertion order.
pub struct IterMut<'a, V> {
    pub(super) slots: std::slice::IterMut<'a, Option<Slot<V>>>,
    pub(super) remaining: usize,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (&'a str, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Some(slot) = slot {
                self.remaining -= 1;
                return Some((slot.key.as_str(), &mut slot.value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}

/// Iterator over keys in insertion order, repeating duplicated keys.
pub struct Keys<'a, V> {
    pub(super) inner: Iter<'a, V>,
}

impl<V> Clone for Keys<'_, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, V> Iterator for Keys<'a, V> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {}

/// Iterator over values in insertion order.
pub struct Values<'a, V> {
    pub(super) inner: Iter<'a, V>,
}

impl<V> Clone for Values<'_, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {}

/// Iterator over entry identities in insertion order.
pub struct Ids<'a, V> {
    pub(super) inner: Iter<'a, V>,
}

impl<V> Clone for Ids<'_, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<V> Iterator for Ids<'_, V> {
    type Item = EntryId;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next_entry().map(|(id, _)| id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Iterator over every value bound to one key, in insertion order.
///
/// Clone it before consuming, or call
/// [`OrderedMultiMap::get_all`](super::OrderedMultiMap::get_all) again, to
/// walk the values a second time.
pub struct GetAll<'a, V> {
    pub(super) map: &'a OrderedMultiMap<V>,
    pub(super) serials: std::slice::Iter<'a, usize>,
}

impl<V> Clone for GetAll<'_, V> {
    fn clone(&self) -> Self {
        Self {
            map: self.map,
            serials: self.serials.clone(),
        }
    }
}

impl<'a, V> Iterator for GetAll<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        let serial = *self.serials.next()?;
        self.map.slot(serial).map(|slot| &slot.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.serials.size_hint()
    }
}

impl<V> ExactSizeIterator for GetAll<'_, V> {}

/// Owning iterator over `(key, value)` pairs in insertion order.
pub struct IntoIter<V> {
    pub(super) slots: std::vec::IntoIter<Option<Slot<V>>>,
    pub(super) remaining: usize,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Some(slot) = slot {
                self.remaining -= 1;
                return Some((slot.key, slot.value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}
