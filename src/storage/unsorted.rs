//! Unsorted array store.
//!
//! Live elements occupy the prefix `0..len` of a vector that never grows
//! past its capacity. Lookup is a linear scan, insertion appends, and removal
//! moves the last live element into the hole, so physical order is not stable
//! across removals.

use std::borrow::Borrow;
use std::fmt;

use super::{Location, Lookup, Storage, capacity_exceeded, check_capacity};
use crate::element::Comparator;
use crate::error::Result;

/// A bounded set store backed by an unsorted array.
///
/// # Time Complexity
///
/// | Operation  | Complexity |
/// |------------|------------|
/// | `locate`   | O(n)       |
/// | `insert`   | O(n)       |
/// | `remove`   | O(n)       |
/// | `len`      | O(1)       |
/// | `snapshot` | O(n)       |
///
/// # Examples
///
/// ```rust
/// use slotset::element::NaturalOrder;
/// use slotset::storage::{Lookup, Storage, UnsortedArray};
///
/// let mut array = UnsortedArray::new(4, NaturalOrder).unwrap();
/// array.insert("b").unwrap();
/// array.insert("a").unwrap();
/// assert_eq!(array.find(&"a"), Some(&"a"));
/// assert_eq!(array.snapshot(), vec![&"b", &"a"]);
/// ```
#[derive(Clone)]
pub struct UnsortedArray<T, C> {
    elements: Vec<T>,
    capacity: usize,
    compare: C,
}

impl<T, C> UnsortedArray<T, C> {
    /// Creates an empty store holding at most `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::InvalidCapacity`](crate::SetError::InvalidCapacity)
    /// if `capacity` is zero.
    pub fn new(capacity: usize, compare: C) -> Result<Self> {
        let capacity = check_capacity(capacity)?;
        tracing::debug!(capacity, "creating unsorted array");
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
}

impl<T, C: Comparator<T>> Storage for UnsortedArray<T, C> {
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
            Location::Vacant(_) | Location::Full => {
                self.elements.push(element);
                Ok(true)
            }
        }
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.elements.iter()
    }

    fn snapshot(&self) -> Vec<&T> {
        self.elements.iter().collect()
    }
}

impl<T, C, Q> Lookup<Q> for UnsortedArray<T, C>
where
    T: Borrow<Q>,
    C: Comparator<Q> + Comparator<T>,
    Q: ?Sized,
{
    type Position = usize;

    fn locate(&self, element: &Q) -> Location<usize> {
        self.elements
            .iter()
            .position(|stored| {
                <C as Comparator<Q>>::equivalent(&self.compare, stored.borrow(), element)
            })
            .map_or(Location::Vacant(self.elements.len()), Location::Present)
    }

    fn find(&self, element: &Q) -> Option<&T> {
        self.locate(element)
            .present()
            .map(|index| &self.elements[index])
    }

    fn remove(&mut self, element: &Q) -> Option<T> {
        self.locate(element)
            .present()
            .map(|index| self.elements.swap_remove(index))
    }
}

impl<T: fmt::Debug, C> fmt::Debug for UnsortedArray<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("UnsortedArray")
            .field("capacity", &self.capacity)
            .field("elements", &self.elements)
            .finish()
    }
}
