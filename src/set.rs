//! The bounded, mutable set.
//!
//! [`Set`] is a single façade over the four storage strategies in
//! [`storage`](crate::storage). The strategy is chosen at construction and
//! every operation is routed to it; callers see the same contract whichever
//! one is in use:
//!
//! - duplicates are silently ignored,
//! - a new element arriving at full capacity is rejected with
//!   [`SetError::CapacityExceeded`](crate::SetError::CapacityExceeded),
//! - looking up or removing a non-member is a no-op.
//!
//! # Ownership
//!
//! A set owns exactly what it stores. To keep elements owned by the caller,
//! store references (`Set<&'a E>`): the set then never drops an `E`. To have
//! the set own its elements, store owned values, as
//! [`StringSet`](crate::StringSet) does with duplicated strings.
//!
//! # Examples
//!
//! ```rust
//! use slotset::{Set, Strategy};
//!
//! let mut set = Set::with_natural_order(Strategy::OpenAddressing, 8).unwrap();
//! assert_eq!(set.add(5), Ok(true));
//! assert_eq!(set.add(5), Ok(false));
//! assert_eq!(set.add(1), Ok(true));
//!
//! assert_eq!(set.count(), 2);
//! assert_eq!(set.find(&5), Some(&5));
//! assert_eq!(set.snapshot(), vec![&1, &5]);
//!
//! assert_eq!(set.remove(&5), Some(5));
//! assert_eq!(set.find(&5), None);
//! ```
//!
//! Borrowed elements with a caller-supplied comparator and hash:
//!
//! ```rust
//! use std::cmp::Ordering;
//! use slotset::{Set, Strategy};
//!
//! #[derive(Debug)]
//! struct Account {
//!     id: u32,
//!     owner: &'static str,
//! }
//!
//! let accounts = [
//!     Account { id: 7, owner: "ada" },
//!     Account { id: 3, owner: "grace" },
//! ];
//! let query = Account { id: 3, owner: "" };
//!
//! let by_id = |left: &&Account, right: &&Account| left.id.cmp(&right.id);
//! let hash_id = |account: &&Account| account.id;
//!
//! let mut set = Set::new(Strategy::Chained, 10, by_id, hash_id).unwrap();
//! for account in &accounts {
//!     set.add(account).unwrap();
//! }
//!
//! assert_eq!(set.find(&&query).map(|account| account.owner), Some("grace"));
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use crate::config::{SetConfig, Strategy};
use crate::element::{Comparator, DefaultHash, ElementHasher, NaturalOrder};
use crate::error::Result;
use crate::storage::{
    ChainedTable, ChainedTableIter, HashTable, Lookup, SlotIter, SortedArray, Storage,
    UnsortedArray,
};

/// Routes `$body` to whichever store backs `$backing`, binding it to `$store`.
macro_rules! dispatch {
    ($backing:expr, $store:ident => $body:expr) => {
        match $backing {
            Backing::Unsorted($store) => $body,
            Backing::Sorted($store) => $body,
            Backing::OpenAddressing($store) => $body,
            Backing::Chained($store) => $body,
        }
    };
}

#[derive(Clone)]
enum Backing<T, C, H> {
    Unsorted(UnsortedArray<T, C>),
    Sorted(SortedArray<T, C>),
    OpenAddressing(HashTable<T, C, H>),
    Chained(ChainedTable<T, C, H>),
}

/// A bounded set of unique elements backed by a chosen storage strategy.
///
/// # Type Parameters
///
/// * `T` - The element type.
/// * `C` - The [`Comparator`] deciding equality (and order, for the ordered
///   strategies).
/// * `H` - The [`ElementHasher`] used by the hashing strategies. Strategies
///   that do not hash simply drop it.
///
/// # Time Complexity
///
/// | Operation  | Unsorted | Sorted   | OpenAddressing | Chained    |
/// |------------|----------|----------|----------------|------------|
/// | `add`      | O(n)     | O(n)     | O(1) avg       | O(n / b)   |
/// | `remove`   | O(n)     | O(n)     | O(1) avg       | O(n / b)   |
/// | `find`     | O(n)     | O(log n) | O(1) avg       | O(n / b)   |
/// | `count`    | O(1)     | O(1)     | O(1)           | O(1)       |
/// | `snapshot` | O(n)     | O(n)     | O(m + n log n) | O(b + n)   |
#[derive(Clone)]
pub struct Set<T, C = NaturalOrder, H = DefaultHash> {
    backing: Backing<T, C, H>,
}

impl<T, C, H> Set<T, C, H> {
    /// Creates an empty set.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::InvalidCapacity`](crate::SetError::InvalidCapacity)
    /// if `capacity` is zero.
    pub fn new(strategy: Strategy, capacity: usize, compare: C, hash: H) -> Result<Self> {
        Self::from_config(&SetConfig::new(strategy, capacity), compare, hash)
    }

    /// Creates an empty set from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by [`SetConfig::validate`].
    pub fn from_config(config: &SetConfig, compare: C, hash: H) -> Result<Self> {
        config.validate()?;
        let backing = match config.strategy {
            Strategy::Unsorted => Backing::Unsorted(UnsortedArray::new(config.capacity, compare)?),
            Strategy::Sorted => Backing::Sorted(SortedArray::new(config.capacity, compare)?),
            Strategy::OpenAddressing => {
                let table = HashTable::new(config.capacity, compare, hash)?;
                match config.rebuild_threshold {
                    Some(threshold) => Backing::OpenAddressing(table.with_rebuild_threshold(threshold)?),
                    None => Backing::OpenAddressing(table),
                }
            }
            Strategy::Chained => Backing::Chained(ChainedTable::with_load_factor(
                config.capacity,
                config.load_factor,
                compare,
                hash,
            )?),
        };
        Ok(Self { backing })
    }

    /// Returns the strategy backing this set.
    #[inline]
    pub const fn strategy(&self) -> Strategy {
        match self.backing {
            Backing::Unsorted(_) => Strategy::Unsorted,
            Backing::Sorted(_) => Strategy::Sorted,
            Backing::OpenAddressing(_) => Strategy::OpenAddressing,
            Backing::Chained(_) => Strategy::Chained,
        }
    }

    /// Returns the number of tombstoned slots.
    ///
    /// Always zero except for [`Strategy::OpenAddressing`].
    #[inline]
    pub const fn tombstones(&self) -> usize {
        match &self.backing {
            Backing::OpenAddressing(table) => table.tombstones(),
            Backing::Unsorted(_) | Backing::Sorted(_) | Backing::Chained(_) => 0,
        }
    }

    /// Releases the set and everything it owns.
    ///
    /// Equivalent to dropping it. Elements stored by reference are untouched.
    #[inline]
    pub fn destroy(self) {
        drop(self);
    }
}

impl<T: Ord + Hash> Set<T> {
    /// Creates an empty set ordered by [`Ord`] and hashed by [`Hash`].
    ///
    /// # Errors
    ///
    /// Returns [`SetError::InvalidCapacity`](crate::SetError::InvalidCapacity)
    /// if `capacity` is zero.
    pub fn with_natural_order(strategy: Strategy, capacity: usize) -> Result<Self> {
        Self::new(strategy, capacity, NaturalOrder, DefaultHash)
    }
}

impl<T, C, H> Set<T, C, H>
where
    C: Comparator<T>,
    H: ElementHasher<T>,
{
    /// Returns the fixed maximum number of elements.
    #[inline]
    pub fn capacity(&self) -> usize {
        dispatch!(&self.backing, store => store.capacity())
    }

    /// Returns the number of elements.
    #[inline]
    pub fn count(&self) -> usize {
        dispatch!(&self.backing, store => store.len())
    }

    /// Alias of [`count`](Self::count).
    #[inline]
    pub fn len(&self) -> usize {
        self.count()
    }

    /// Returns `true` if the set holds no element.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Adds `element` unless an equal element is already present.
    ///
    /// Returns `Ok(true)` if the element was added and `Ok(false)` if an equal
    /// one was already stored; in that case the argument is dropped and the
    /// stored element is kept.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::CapacityExceeded`](crate::SetError::CapacityExceeded)
    /// if the element is new and the set already holds `capacity` elements.
    /// The set is left unchanged.
    pub fn add(&mut self, element: T) -> Result<bool> {
        dispatch!(&mut self.backing, store => store.insert(element))
    }

    /// Adds every element of `elements`, stopping at the first error.
    ///
    /// Returns how many elements were new.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::CapacityExceeded`](crate::SetError::CapacityExceeded)
    /// when the set fills up. Elements added before the failure stay added.
    pub fn try_extend<I>(&mut self, elements: I) -> Result<usize>
    where
        I: IntoIterator<Item = T>,
    {
        elements.into_iter().try_fold(0, |added, element| {
            self.add(element).map(|inserted| added + usize::from(inserted))
        })
    }

    /// Returns a freshly allocated vector referencing every element.
    ///
    /// For [`Strategy::Sorted`] and [`Strategy::OpenAddressing`] the elements
    /// are in comparator order; for the other strategies the order is
    /// unspecified.
    pub fn snapshot(&self) -> Vec<&T> {
        dispatch!(&self.backing, store => store.snapshot())
    }

    /// Iterates over the elements in storage order.
    pub fn iter(&self) -> Iter<'_, T> {
        let inner = match &self.backing {
            Backing::Unsorted(store) => IterInner::Array(store.iter()),
            Backing::Sorted(store) => IterInner::Array(store.iter()),
            Backing::OpenAddressing(store) => IterInner::Slots(store.iter()),
            Backing::Chained(store) => IterInner::Chained(store.iter()),
        };
        Iter { inner }
    }

    /// Clears every tombstone by re-placing the live elements.
    ///
    /// A no-op for strategies without tombstones.
    pub fn rebuild(&mut self) {
        if let Backing::OpenAddressing(table) = &mut self.backing {
            table.rebuild();
        }
    }

    /// Returns the stored element comparing equal to `element`.
    ///
    /// The returned reference is to the stored instance, which may differ
    /// from the query in fields the comparator ignores.
    pub fn find<Q>(&self, element: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        H: ElementHasher<Q>,
        Q: ?Sized,
    {
        dispatch!(&self.backing, store => Lookup::<Q>::find(store, element))
    }

    /// Returns `true` if an element comparing equal to `element` is stored.
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        H: ElementHasher<Q>,
        Q: ?Sized,
    {
        self.find(element).is_some()
    }

    /// Removes and returns the stored element comparing equal to `element`.
    ///
    /// Removing a non-member is a no-op returning `None`.
    pub fn remove<Q>(&mut self, element: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        H: ElementHasher<Q>,
        Q: ?Sized,
    {
        dispatch!(&mut self.backing, store => Lookup::<Q>::remove(store, element))
    }
}

impl<'a, T, C, H> IntoIterator for &'a Set<T, C, H>
where
    C: Comparator<T>,
    H: ElementHasher<T>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C, H> fmt::Debug for Set<T, C, H>
where
    T: fmt::Debug,
    C: Comparator<T>,
    H: ElementHasher<T>,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.snapshot()).finish()
    }
}

impl<T, C, H> fmt::Display for Set<T, C, H>
where
    T: fmt::Display,
    C: Comparator<T>,
    H: ElementHasher<T>,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        for (index, element) in self.snapshot().into_iter().enumerate() {
            if index > 0 {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "}}")
    }
}

static_assertions::assert_impl_all!(Set<i32>: Send, Sync, Clone);
static_assertions::assert_impl_all!(Set<&'static str>: Send, Sync);

// =============================================================================
// Iterator
// =============================================================================

enum IterInner<'a, T> {
    Array(std::slice::Iter<'a, T>),
    Slots(SlotIter<'a, T>),
    Chained(ChainedTableIter<'a, T>),
}

/// Storage-order iterator over a [`Set`].
pub struct Iter<'a, T> {
    inner: IterInner<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            IterInner::Array(iterator) => iterator.next(),
            IterInner::Slots(iterator) => iterator.next(),
            IterInner::Chained(iterator) => iterator.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            IterInner::Array(iterator) => iterator.size_hint(),
            IterInner::Slots(iterator) => iterator.size_hint(),
            IterInner::Chained(iterator) => iterator.size_hint(),
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
