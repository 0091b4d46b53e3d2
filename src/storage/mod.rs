//! Backing stores for a set.
//!
//! Every store implements the same two traits:
//!
//! - [`Storage`]: capacity, cardinality, insertion, iteration and snapshots.
//! - [`Lookup`]: locating, finding and removing by any borrowed form `Q` of
//!   the element type.
//!
//! Four stores are provided, each with its own placement rule:
//!
//! | Store            | `locate`                 | insert         | remove          | snapshot order |
//! |------------------|--------------------------|----------------|-----------------|----------------|
//! | [`UnsortedArray`]| linear scan, O(n)        | append, O(1)   | swap-remove, O(n) | unspecified  |
//! | [`SortedArray`]  | binary search, O(log n)  | shift, O(n)    | shift, O(n)     | comparator     |
//! | [`HashTable`]    | linear probing, O(1) avg | O(1) avg       | tombstone, O(1) avg | comparator (quicksort) |
//! | [`ChainedTable`] | bucket scan, O(n / b)    | head insert    | unlink          | unspecified    |
//!
//! All stores have a fixed capacity chosen at construction. Inserting a new
//! element into a store holding `capacity` elements fails with
//! [`SetError::CapacityExceeded`](crate::SetError::CapacityExceeded); inserting
//! a duplicate is always a silent no-op.
//!
//! # Examples
//!
//! ```rust
//! use slotset::element::{DefaultHash, NaturalOrder};
//! use slotset::storage::{HashTable, Location, Lookup, Storage};
//!
//! let mut table = HashTable::new(8, NaturalOrder, DefaultHash).unwrap();
//! assert_eq!(table.insert(3), Ok(true));
//! assert_eq!(table.insert(3), Ok(false));
//!
//! assert!(matches!(table.locate(&3), Location::Present(_)));
//! assert_eq!(table.remove(&3), Some(3));
//! assert_eq!(table.len(), 0);
//! ```

mod bucket_list;
mod chained;
mod open_addressing;
mod quicksort;
mod slot;
mod sorted;
mod unsorted;

pub use bucket_list::BucketList;
pub use bucket_list::BucketListIter;
pub use chained::ChainedTable;
pub use chained::ChainedTableIter;
pub use chained::DEFAULT_LOAD_FACTOR;
pub use open_addressing::HashTable;
pub use quicksort::quicksort_by;
pub use slot::SlotIter;
pub use slot::SlotState;
pub use sorted::SortedArray;
pub use unsorted::UnsortedArray;

use crate::error::{Result, SetError};

// =============================================================================
// Location
// =============================================================================

/// The outcome of locating an element in a store.
///
/// `P` is the store's position type: a slot index for the array and
/// open-addressing stores, a `(bucket, node)` pair for the chained store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Location<P> {
    /// An equal element is stored at this position.
    Present(P),
    /// The element is absent; this is where it would be inserted.
    Vacant(P),
    /// The element is absent and no position is available for it.
    Full,
}

impl<P> Location<P> {
    /// Returns `true` if the element was found.
    #[inline]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Returns the position of a present element.
    #[inline]
    pub const fn present(self) -> Option<P>
    where
        P: Copy,
    {
        match self {
            Self::Present(position) => Some(position),
            Self::Vacant(_) | Self::Full => None,
        }
    }
}

// =============================================================================
// Storage traits
// =============================================================================

/// Capacity, cardinality, insertion and enumeration of a backing store.
pub trait Storage {
    /// The stored element type.
    type Element;

    /// Physical-order iterator over the live elements.
    type Iter<'a>: Iterator<Item = &'a Self::Element>
    where
        Self: 'a;

    /// The fixed maximum number of live elements.
    fn capacity(&self) -> usize;

    /// The number of live elements.
    fn len(&self) -> usize;

    /// Returns `true` if no element is stored.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts `element` unless an equal element is already stored.
    ///
    /// Returns `Ok(true)` if the element was inserted and `Ok(false)` if an
    /// equal element was already present (the argument is dropped).
    ///
    /// # Errors
    ///
    /// Returns [`SetError::CapacityExceeded`] if the element is new and the
    /// store already holds `capacity` elements. The store is left unchanged.
    fn insert(&mut self, element: Self::Element) -> Result<bool>;

    /// Iterates over the live elements in physical order.
    fn iter(&self) -> Self::Iter<'_>;

    /// Returns a freshly allocated vector referencing every live element.
    ///
    /// Ordered stores return the elements in comparator order; the others
    /// return them in physical order.
    fn snapshot(&self) -> Vec<&Self::Element>;
}

/// Lookup and removal by a borrowed form `Q` of the element type.
pub trait Lookup<Q: ?Sized>: Storage {
    /// Where an element sits, or would be inserted.
    type Position: Copy;

    /// Locates `element`.
    fn locate(&self, element: &Q) -> Location<Self::Position>;

    /// Returns the stored element comparing equal to `element`.
    fn find(&self, element: &Q) -> Option<&Self::Element>;

    /// Removes and returns the stored element comparing equal to `element`.
    ///
    /// Removing an absent element is a no-op returning `None`.
    fn remove(&mut self, element: &Q) -> Option<Self::Element>;

    /// Returns `true` if an element comparing equal to `element` is stored.
    #[inline]
    fn contains(&self, element: &Q) -> bool {
        self.find(element).is_some()
    }
}

/// Validates a requested capacity.
pub(crate) const fn check_capacity(capacity: usize) -> Result<usize> {
    if capacity == 0 {
        Err(SetError::InvalidCapacity { capacity })
    } else {
        Ok(capacity)
    }
}

/// Logs and builds the error returned when a new element meets a full store.
pub(crate) fn capacity_exceeded(capacity: usize) -> SetError {
    tracing::warn!(capacity, "insertion rejected: set is at capacity");
    SetError::CapacityExceeded { capacity }
}
