//! Sorted array store.
//!
//! Live elements occupy the prefix `0..len` in strictly ascending comparator
//! order at all times. Lookup is a binary search; insertion and removal shift
//! the tail of the prefix by one to open or close a gap.

use std::borrow::Borrow;
use std::fmt;

use super::{Location, Lookup, Storage, capacity_exceeded, check_capacity};
use crate::element::Comparator;
use crate::error::Result;

/// A bounded set store backed by a sorted array.
///
/// # Time Complexity
///
/// | Operation  | Complexity |
/// |------------|------------|
/// | `locate`   | O(log n)   |
/// | `insert`   | O(n)       |
/// | `remove`   | O(n)       |
/// | `len`      | O(1)       |
/// | `snapshot` | O(n)       |
///
/// # Examples
///
/// ```rust
/// use slotset::element::NaturalOrder;
/// use slotset::storage::{Location, Lookup, SortedArray, Storage};
///
/// let mut array = SortedArray::new(4, NaturalOrder).unwrap();
/// array.insert(30).unwrap();
/// array.insert(10).unwrap();
/// array.insert(20).unwrap();
///
/// assert_eq!(array.snapshot(), vec![&10, &20, &30]);
/// assert_eq!(array.locate(&20), Location::Present(1));
/// assert_eq!(array.locate(&25), Location::Vacant(2));
/// ```
#[derive(Clone)]
pub struct SortedArray<T, C> {
    elements: Vec<T>,
    capacity: usize,
    compare: C,
}

impl<T, C> SortedArray<T, C> {
    /// Creates an empty store holding at most `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::InvalidCapacity`](crate::SetError::InvalidCapacity)
    /// if `capacity` is zero.
    pub fn new(capacity: usize, compare: C) -> Result<Self> {
        let capacity = check_capacity(capacity)?;
        tracing::debug!(capacity, "creating sorted array");
        Ok(Self {
            elements: Vec::with_capacity(capacity),
            capacity,
            compare,
        })
    }

    /// Returns the comparator.
    #[inline]
    pub const fn comparator(&self) -> &C {
        &self.compare
    }

    /// Returns the live elements in ascending order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }
}

impl<T, C: Comparator<T>> Storage for SortedArray<T, C> {
    type Element = T;
    type Iter<'a>
        = std::slice::Iter<'a, T>
    where
        Self: 'a;

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    fn len(&self) -> usize {
        self.elements.len()
    }

    fn insert(&mut self, element: T) -> Result<bool> {
        match self.locate(&element) {
            Location::Present(_) => Ok(false),
            Location::Vacant(_) | Location::Full if self.elements.len() == self.capacity => {
                Err(capacity_exceeded(self.capacity))
            }
            Location::Vacant(index) => {
                self.elements.insert(index, element);
                debug_assert!(self.is_strictly_sorted());
                Ok(true)
            }
            Location::Full => Err(capacity_exceeded(self.capacity)),
        }
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.elements.iter()
    }

    fn snapshot(&self) -> Vec<&T> {
        self.elements.iter().collect()
    }
}

impl<T, C: Comparator<T>> SortedArray<T, C> {
    fn is_strictly_sorted(&self) -> bool {
        self.elements
            .windows(2)
            .all(|pair| self.compare.compare(&pair[0], &pair[1]).is_lt())
    }
}

impl<T, C, Q> Lookup<Q> for SortedArray<T, C>
where
    T: Borrow<Q>,
    C: Comparator<Q> + Comparator<T>,
    Q: ?Sized,
{
    type Position = usize;

    fn locate(&self, element: &Q) -> Location<usize> {
        match self.elements.binary_search_by(|stored| {
            <C as Comparator<Q>>::compare(&self.compare, stored.borrow(), element)
        }) {
            Ok(index) => Location::Present(index),
            Err(index) => Location::Vacant(index),
        }
    }

    fn find(&self, element: &Q) -> Option<&T> {
        self.locate(element)
            .present()
            .map(|index| &self.elements[index])
    }

    fn remove(&mut self, element: &Q) -> Option<T> {
        self.locate(element)
            .present()
            .map(|index| self.elements.remove(index))
    }
}

impl<T: fmt::Debug, C> fmt::Debug for SortedArray<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SortedArray")
            .field("capacity", &self.capacity)
            .field("elements", &self.elements)
            .finish()
    }
}
