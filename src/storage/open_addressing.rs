//! Open-addressing hash table with tombstoned deletion.
//!
//! # Probing
//!
//! An element's probe sequence starts at `hash(element) % capacity` and steps
//! by one slot, wrapping around, for at most `capacity` slots:
//!
//! - `Empty`: the element is absent. Its insertion point is the first
//!   tombstone seen on the way, or this slot if none was seen.
//! - `Deleted`: remember the first one as a candidate insertion point and keep
//!   going, since the element may sit further along the chain.
//! - `Filled` and equal: the element is present here.
//!
//! If the whole table is walked without meeting an `Empty` slot, the first
//! tombstone is the insertion point; with no tombstone either the table is
//! [`Location::Full`].
//!
//! # Tombstones
//!
//! Removal marks a slot `Deleted` rather than `Empty` so that chains passing
//! through it stay intact. Tombstones are reused by later insertions but are
//! never turned back into `Empty` slots, except by an explicit
//! [`HashTable::rebuild`], or automatically when a rebuild threshold has been
//! configured with [`HashTable::with_rebuild_threshold`].

use std::borrow::Borrow;
use std::fmt;

use super::slot::{Slot, SlotStore};
use super::{
    Location, Lookup, SlotIter, SlotState, Storage, capacity_exceeded, check_capacity,
    quicksort_by,
};
use crate::element::{Comparator, ElementHasher};
use crate::error::{Result, SetError};

/// A bounded hash set store using linear probing.
///
/// The capacity is fixed at construction and the table never grows.
///
/// # Time Complexity
///
/// | Operation  | Average  | Worst          |
/// |------------|----------|----------------|
/// | `locate`   | O(1)     | O(capacity)    |
/// | `insert`   | O(1)     | O(capacity)    |
/// | `remove`   | O(1)     | O(capacity)    |
/// | `len`      | O(1)     | O(1)           |
/// | `snapshot` | O(m + n log n) | O(m + n²) |
///
/// where `m` is the capacity and `n` the number of live elements.
///
/// # Examples
///
/// ```rust
/// use slotset::element::{NaturalOrder, StringHash};
/// use slotset::storage::{HashTable, Lookup, Storage};
///
/// let mut table = HashTable::new(5, NaturalOrder, StringHash).unwrap();
/// for word in ["a", "b", "c"] {
///     table.insert(word).unwrap();
/// }
/// table.remove(&"b");
/// table.insert("d").unwrap();
///
/// assert_eq!(table.len(), 3);
/// assert_eq!(table.tombstones(), 1);
/// assert_eq!(table.snapshot(), vec![&"a", &"c", &"d"]);
/// ```
#[derive(Clone)]
pub struct HashTable<T, C, H> {
    slots: SlotStore<T>,
    compare: C,
    hash: H,
    rebuild_threshold: Option<f64>,
}

impl<T, C, H> HashTable<T, C, H> {
    /// Creates an empty table of `capacity` slots.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize, compare: C, hash: H) -> Result<Self> {
        let capacity = check_capacity(capacity)?;
        tracing::debug!(capacity, "creating open-addressing table");
        Ok(Self {
            slots: SlotStore::with_capacity(capacity),
            compare,
            hash,
            rebuild_threshold: None,
        })
    }

    /// Enables automatic rebuilding.
    ///
    /// After a removal, if `(len + tombstones) / capacity` exceeds `threshold`,
    /// the table is rebuilt in place and all tombstones are cleared.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::InvalidRebuildThreshold`] unless `0 < threshold <= 1`.
    pub fn with_rebuild_threshold(mut self, threshold: f64) -> Result<Self> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(SetError::InvalidRebuildThreshold { threshold });
        }
        self.rebuild_threshold = Some(threshold);
        Ok(self)
    }

    /// Returns the configured rebuild threshold.
    #[inline]
    pub const fn rebuild_threshold(&self) -> Option<f64> {
        self.rebuild_threshold
    }

    /// Returns the number of `Deleted` slots.
    #[inline]
    pub const fn tombstones(&self) -> usize {
        self.slots.tombstones()
    }

    /// Returns the state of the slot at `index`, or `None` if out of range.
    #[inline]
    pub fn slot_state(&self, index: usize) -> Option<SlotState> {
        (index < self.slots.capacity()).then(|| self.slots.state(index))
    }

    /// Returns the comparator.
    #[inline]
    pub const fn comparator(&self) -> &C {
        &self.compare
    }

    /// Returns the element hasher.
    #[inline]
    pub const fn hasher(&self) -> &H {
        &self.hash
    }

    #[inline]
    fn home<Q: ?Sized>(&self, element: &Q) -> usize
    where
        H: ElementHasher<Q>,
    {
        self.hash.hash_element(element) as usize % self.slots.capacity()
    }
}

impl<T, C, H> HashTable<T, C, H>
where
    H: ElementHasher<T>,
{
    /// Re-places every live element into a fresh table of the same capacity,
    /// discarding all tombstones.
    pub fn rebuild(&mut self) {
        let tombstones = self.slots.tombstones();
        let live = self.slots.take_filled();
        tracing::debug!(
            live = live.len(),
            tombstones,
            capacity = self.slots.capacity(),
            "rebuilding open-addressing table"
        );
        for element in live {
            self.place_distinct(element);
        }
    }

    /// Stores an element known to differ from every stored one into the first
    /// empty slot of its probe sequence.
    fn place_distinct(&mut self, element: T) {
        let capacity = self.slots.capacity();
        let start = self.home(&element);
        let index = (0..capacity)
            .map(|offset| (start + offset) % capacity)
            .find(|&index| self.slots.state(index) == SlotState::Empty);
        if let Some(index) = index {
            self.slots.fill(index, element);
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn rebuild_if_worn(&mut self) {
        let Some(threshold) = self.rebuild_threshold else {
            return;
        };
        let used = (self.slots.filled() + self.slots.tombstones()) as f64;
        if used / self.slots.capacity() as f64 > threshold {
            self.rebuild();
        }
    }
}

impl<T, C, H> Storage for HashTable<T, C, H>
where
    C: Comparator<T>,
    H: ElementHasher<T>,
{
    type Element = T;
    type Iter<'a>
        = SlotIter<'a, T>
    where
        Self: 'a;

    #[inline]
    fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    #[inline]
    fn len(&self) -> usize {
        self.slots.filled()
    }

    fn insert(&mut self, element: T) -> Result<bool> {
        match self.locate(&element) {
            Location::Present(_) => Ok(false),
            Location::Vacant(_) | Location::Full if self.len() == self.capacity() => {
                Err(capacity_exceeded(self.capacity()))
            }
            Location::Vacant(index) => {
                if self.slots.state(index) == SlotState::Deleted {
                    tracing::trace!(index, "reusing tombstone");
                }
                self.slots.fill(index, element);
                Ok(true)
            }
            Location::Full => Err(capacity_exceeded(self.capacity())),
        }
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.slots.iter()
    }

    fn snapshot(&self) -> Vec<&T> {
        let mut elements: Vec<&T> = self.slots.iter().collect();
        quicksort_by(&mut elements, |left, right| self.compare.compare(*left, *right));
        elements
    }
}

impl<T, C, H, Q> Lookup<Q> for HashTable<T, C, H>
where
    T: Borrow<Q>,
    C: Comparator<Q> + Comparator<T>,
    H: ElementHasher<Q> + ElementHasher<T>,
    Q: ?Sized,
{
    type Position = usize;

    fn locate(&self, element: &Q) -> Location<usize> {
        let capacity = self.slots.capacity();
        let start = self.home(element);
        let mut tombstone = None;

        for offset in 0..capacity {
            let index = (start + offset) % capacity;
            match self.slots.slot(index) {
                Slot::Empty => return Location::Vacant(tombstone.unwrap_or(index)),
                Slot::Deleted => {
                    tombstone.get_or_insert(index);
                }
                Slot::Filled(stored)
                    if <C as Comparator<Q>>::equivalent(&self.compare, stored.borrow(), element) =>
                {
                    return Location::Present(index);
                }
                Slot::Filled(_) => {}
            }
        }

        tombstone.map_or(Location::Full, Location::Vacant)
    }

    fn find(&self, element: &Q) -> Option<&T> {
        self.locate(element)
            .present()
            .and_then(|index| self.slots.get(index))
    }

    fn remove(&mut self, element: &Q) -> Option<T> {
        let index = self.locate(element).present()?;
        let removed = self.slots.vacate(index);
        self.rebuild_if_worn();
        removed
    }
}

impl<T: fmt::Debug, C, H> fmt::Debug for HashTable<T, C, H> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("HashTable")
            .field("capacity", &self.slots.capacity())
            .field("len", &self.slots.filled())
            .field("tombstones", &self.slots.tombstones())
            .field("elements", &self.slots.iter().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{DefaultHash, NaturalOrder, StringHash};
    use rstest::rstest;

    /// Every element hashes to slot zero, forcing one long probe chain.
    fn colliding(_: &u32) -> u32 {
        0
    }

    /// Each element hashes to its own value.
    fn identity(element: &u32) -> u32 {
        *element
    }

    type CollidingTable = HashTable<u32, NaturalOrder, fn(&u32) -> u32>;

    fn colliding_table(capacity: usize) -> CollidingTable {
        HashTable::new(capacity, NaturalOrder, colliding as fn(&u32) -> u32).unwrap()
    }

    #[rstest]
    fn test_zero_capacity_rejected() {
        let result: Result<HashTable<u32, _, _>> = HashTable::new(0, NaturalOrder, DefaultHash);
        assert_eq!(result.err(), Some(SetError::InvalidCapacity { capacity: 0 }));
    }

    #[rstest]
    fn test_element_lands_in_home_slot() {
        let mut table = HashTable::new(8, NaturalOrder, identity as fn(&u32) -> u32).unwrap();
        table.insert(13).unwrap();
        assert_eq!(table.locate(&13), Location::Present(5));
        assert_eq!(table.slot_state(5), Some(SlotState::Filled));
        assert_eq!(table.slot_state(8), None);
    }

    #[rstest]
    fn test_collisions_probe_forward_and_wrap() {
        let mut table = HashTable::new(4, NaturalOrder, identity as fn(&u32) -> u32).unwrap();
        table.insert(3).unwrap();
        table.insert(7).unwrap();
        assert_eq!(table.locate(&3), Location::Present(3));
        assert_eq!(table.locate(&7), Location::Present(0));
    }

    #[rstest]
    fn test_locate_prefers_first_tombstone() {
        let mut table = colliding_table(6);
        for value in [1, 2, 3, 4] {
            table.insert(value).unwrap();
        }
        table.remove(&2);
        table.remove(&3);

        assert_eq!(table.locate(&9), Location::Vacant(1));
        assert_eq!(table.locate(&4), Location::Present(3));
    }

    #[rstest]
    fn test_match_beyond_tombstone_wins() {
        let mut table = colliding_table(4);
        table.insert(1).unwrap();
        table.insert(2).unwrap();
        table.remove(&1);

        assert_eq!(table.insert(2), Ok(false));
        assert_eq!(table.len(), 1);
        assert_eq!(table.slot_state(0), Some(SlotState::Deleted));
    }

    #[rstest]
    fn test_full_walk_returns_tombstone_or_full() {
        let mut table = colliding_table(3);
        for value in [1, 2, 3] {
            table.insert(value).unwrap();
        }
        assert_eq!(table.locate(&9), Location::Full);

        table.remove(&2);
        assert_eq!(table.locate(&9), Location::Vacant(1));
        assert_eq!(table.insert(9), Ok(true));
        assert_eq!(table.locate(&9), Location::Present(1));
    }

    #[rstest]
    fn test_full_table_rejects_new_element() {
        let mut table = colliding_table(2);
        table.insert(1).unwrap();
        table.insert(2).unwrap();

        assert_eq!(table.insert(3), Err(SetError::CapacityExceeded { capacity: 2 }));
        assert_eq!(table.insert(1), Ok(false));
        assert_eq!(table.len(), 2);
    }

    #[rstest]
    fn test_remove_leaves_tombstone() {
        let mut table = colliding_table(4);
        table.insert(1).unwrap();
        assert_eq!(table.remove(&1), Some(1));
        assert_eq!(table.slot_state(0), Some(SlotState::Deleted));
        assert_eq!(table.tombstones(), 1);
        assert_eq!(table.remove(&1), None);
        assert_eq!(table.tombstones(), 1);
    }

    #[rstest]
    fn test_probe_termination_across_tombstones() {
        let mut table = colliding_table(8);
        let first: Vec<u32> = (10..17).collect();
        for &value in &first {
            table.insert(value).unwrap();
        }
        for value in first.iter().step_by(2) {
            assert_eq!(table.remove(value), Some(*value));
        }
        for value in [20, 21, 22] {
            assert_eq!(table.insert(value), Ok(true));
        }

        assert_eq!(table.len(), 6);
        for value in [11, 13, 15, 20, 21, 22] {
            assert_eq!(table.find(&value), Some(&value));
        }
        for value in [10, 12, 14, 16] {
            assert_eq!(table.find(&value), None);
        }
    }

    #[rstest]
    fn test_snapshot_is_sorted() {
        let mut table = HashTable::new(16, NaturalOrder, DefaultHash).unwrap();
        for value in [42, 7, 19, 3, 28, 11] {
            table.insert(value).unwrap();
        }
        assert_eq!(table.snapshot(), vec![&3, &7, &11, &19, &28, &42]);
    }

    #[rstest]
    fn test_string_scenario() {
        let mut table = HashTable::new(5, NaturalOrder, StringHash).unwrap();
        for word in ["a", "b", "c"] {
            table.insert(word.to_string()).unwrap();
        }
        table.remove("b");
        table.insert("d".to_string()).unwrap();

        assert_eq!(table.len(), 3);
        assert!(table.find("b").is_none());
        assert!(table.contains("a"));
        assert!(table.contains("c"));
        assert!(table.contains("d"));
        let snapshot: Vec<&str> = table.snapshot().into_iter().map(String::as_str).collect();
        assert_eq!(snapshot, vec!["a", "c", "d"]);
    }

    #[rstest]
    fn test_rebuild_clears_tombstones() {
        let mut table = colliding_table(4);
        for value in [1, 2, 3] {
            table.insert(value).unwrap();
        }
        table.remove(&1);
        table.remove(&2);
        assert_eq!(table.tombstones(), 2);

        table.rebuild();
        assert_eq!(table.tombstones(), 0);
        assert_eq!(table.locate(&3), Location::Present(0));
        assert_eq!(table.slot_state(1), Some(SlotState::Empty));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-0.5)]
    #[case(1.5)]
    #[case(f64::NAN)]
    fn test_invalid_rebuild_threshold(#[case] threshold: f64) {
        let result = colliding_table(4).with_rebuild_threshold(threshold);
        assert!(matches!(result, Err(SetError::InvalidRebuildThreshold { .. })));
    }

    #[rstest]
    fn test_rebuild_threshold_triggers_on_remove() {
        let mut table = colliding_table(4).with_rebuild_threshold(0.5).unwrap();
        for value in [1, 2, 3] {
            table.insert(value).unwrap();
        }
        table.remove(&1);
        assert_eq!(table.tombstones(), 0);
        assert_eq!(table.len(), 2);
        assert_eq!(table.find(&3), Some(&3));
    }

    #[rstest]
    fn test_without_threshold_tombstones_accumulate() {
        let mut table = colliding_table(4);
        for round in 0..3 {
            table.insert(round).unwrap();
            table.remove(&round);
        }
        assert_eq!(table.len(), 0);
        assert_eq!(table.tombstones(), 1);
    }
}
