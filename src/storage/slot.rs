//! Fixed-capacity slot array backing the open-addressing table.
//!
//! Each slot is in exactly one of three states:
//!
//! ```text
//!            fill               vacate
//!   Empty ──────────► Filled ──────────► Deleted
//!                        ▲                  │
//!                        └──────────────────┘
//!                               fill
//! ```
//!
//! There is no `Deleted -> Empty` transition. Tombstones stay until the whole
//! store is replaced (see [`SlotStore::take_filled`]).

use std::mem;

/// The payload-free state of a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotState {
    /// Never written since the store was created.
    Empty,
    /// Holds a live element.
    Filled,
    /// Held an element that has since been removed.
    Deleted,
}

/// A slot and its content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Slot<T> {
    Empty,
    Filled(T),
    Deleted,
}

impl<T> Slot<T> {
    #[inline]
    const fn state(&self) -> SlotState {
        match self {
            Self::Empty => SlotState::Empty,
            Self::Filled(_) => SlotState::Filled,
            Self::Deleted => SlotState::Deleted,
        }
    }
}

/// A fixed-length array of slots with live and tombstone counters.
///
/// Invariants:
/// - `slots.len()` never changes after construction.
/// - exactly `filled` slots are `Filled` and exactly `tombstones` are `Deleted`.
#[derive(Clone, Debug)]
pub(crate) struct SlotStore<T> {
    slots: Box<[Slot<T>]>,
    filled: usize,
    tombstones: usize,
}

impl<T> SlotStore<T> {
    /// Creates a store of `capacity` empty slots.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: std::iter::repeat_with(|| Slot::Empty).take(capacity).collect(),
            filled: 0,
            tombstones: 0,
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) const fn filled(&self) -> usize {
        self.filled
    }

    #[inline]
    pub(crate) const fn tombstones(&self) -> usize {
        self.tombstones
    }

    #[inline]
    pub(crate) fn state(&self, index: usize) -> SlotState {
        self.slots[index].state()
    }

    #[inline]
    pub(crate) fn slot(&self, index: usize) -> &Slot<T> {
        &self.slots[index]
    }

    /// Returns the element stored at `index` if the slot is filled.
    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        match &self.slots[index] {
            Slot::Filled(element) => Some(element),
            Slot::Empty | Slot::Deleted => None,
        }
    }

    /// Stores `element` at `index`, which must not be filled.
    pub(crate) fn fill(&mut self, index: usize, element: T) {
        let previous = mem::replace(&mut self.slots[index], Slot::Filled(element));
        match previous {
            Slot::Empty => {}
            Slot::Deleted => self.tombstones -= 1,
            Slot::Filled(_) => unreachable!("slot {index} filled twice"),
        }
        self.filled += 1;
    }

    /// Turns the filled slot at `index` into a tombstone and returns its content.
    ///
    /// Returns `None`, leaving the slot untouched, if it was not filled.
    pub(crate) fn vacate(&mut self, index: usize) -> Option<T> {
        if self.slots[index].state() != SlotState::Filled {
            return None;
        }
        match mem::replace(&mut self.slots[index], Slot::Deleted) {
            Slot::Filled(element) => {
                self.filled -= 1;
                self.tombstones += 1;
                Some(element)
            }
            Slot::Empty | Slot::Deleted => None,
        }
    }

    /// Iterates over the live elements in physical order.
    pub(crate) fn iter(&self) -> SlotIter<'_, T> {
        SlotIter {
            slots: self.slots.iter(),
            remaining: self.filled,
        }
    }

    /// Moves every live element out, leaving an all-empty store of the same
    /// capacity behind.
    pub(crate) fn take_filled(&mut self) -> Vec<T> {
        let capacity = self.capacity();
        let old = mem::replace(self, Self::with_capacity(capacity));
        old.slots
            .into_vec()
            .into_iter()
            .filter_map(|slot| match slot {
                Slot::Filled(element) => Some(element),
                Slot::Empty | Slot::Deleted => None,
            })
            .collect()
    }
}

/// Physical-order iterator over the filled slots of a [`SlotStore`].
pub struct SlotIter<'a, T> {
    slots: std::slice::Iter<'a, Slot<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for SlotIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Slot::Filled(element) = slot {
                self.remaining -= 1;
                return Some(element);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for SlotIter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_new_store_is_all_empty() {
        let store: SlotStore<i32> = SlotStore::with_capacity(4);
        assert_eq!(store.capacity(), 4);
        assert_eq!(store.filled(), 0);
        assert!((0..4).all(|index| store.state(index) == SlotState::Empty));
    }

    #[rstest]
    fn test_fill_then_vacate() {
        let mut store = SlotStore::with_capacity(3);
        store.fill(1, "x");
        assert_eq!(store.state(1), SlotState::Filled);
        assert_eq!(store.get(1), Some(&"x"));

        assert_eq!(store.vacate(1), Some("x"));
        assert_eq!(store.state(1), SlotState::Deleted);
        assert_eq!(store.get(1), None);
        assert_eq!(store.filled(), 0);
        assert_eq!(store.tombstones(), 1);
    }

    #[rstest]
    fn test_vacate_non_filled_is_noop() {
        let mut store: SlotStore<i32> = SlotStore::with_capacity(2);
        assert_eq!(store.vacate(0), None);
        assert_eq!(store.state(0), SlotState::Empty);
        assert_eq!(store.tombstones(), 0);
    }

    #[rstest]
    fn test_refill_tombstone() {
        let mut store = SlotStore::with_capacity(2);
        store.fill(0, 1);
        store.vacate(0);
        store.fill(0, 2);
        assert_eq!(store.tombstones(), 0);
        assert_eq!(store.filled(), 1);
        assert_eq!(store.get(0), Some(&2));
    }

    #[rstest]
    fn test_iter_physical_order() {
        let mut store = SlotStore::with_capacity(5);
        store.fill(4, 'a');
        store.fill(0, 'b');
        store.fill(2, 'c');
        store.vacate(2);

        let iterator = store.iter();
        assert_eq!(iterator.len(), 2);
        assert_eq!(iterator.collect::<Vec<_>>(), vec![&'b', &'a']);
    }

    #[rstest]
    fn test_take_filled_clears_tombstones() {
        let mut store = SlotStore::with_capacity(4);
        store.fill(0, 10);
        store.fill(1, 20);
        store.fill(2, 30);
        store.vacate(1);

        let live = store.take_filled();
        assert_eq!(live, vec![10, 30]);
        assert_eq!(store.capacity(), 4);
        assert_eq!(store.filled(), 0);
        assert_eq!(store.tombstones(), 0);
        assert!((0..4).all(|index| store.state(index) == SlotState::Empty));
    }
}
