//! Hash table with chained bucket lists.
//!
//! Elements hash into one of `max(1, capacity / load_factor)` buckets; each
//! bucket is an independent [`BucketList`]. New elements go to the head of
//! their bucket, and lookup or removal scans that bucket only.

use std::borrow::Borrow;
use std::fmt;

use super::bucket_list::{BucketList, BucketListIter, SENTINEL};
use super::{Location, Lookup, Storage, capacity_exceeded, check_capacity};
use crate::element::{Comparator, ElementHasher};
use crate::error::{Result, SetError};

/// Default ratio between capacity and bucket count: chains average 20
/// elements when the table is full.
pub const DEFAULT_LOAD_FACTOR: usize = 20;

/// A bounded hash set store resolving collisions with per-bucket lists.
///
/// Positions are `(bucket, node)` pairs. A [`Location::Vacant`] position names
/// the bucket's sentinel node (`0`), meaning "insert at the head".
///
/// # Time Complexity
///
/// | Operation  | Average         |
/// |------------|-----------------|
/// | `locate`   | O(n / buckets)  |
/// | `insert`   | O(n / buckets)  |
/// | `remove`   | O(n / buckets)  |
/// | `len`      | O(1)            |
/// | `snapshot` | O(buckets + n)  |
///
/// # Examples
///
/// ```rust
/// use slotset::element::{DefaultHash, NaturalOrder};
/// use slotset::storage::{ChainedTable, Lookup, Storage};
///
/// let mut table = ChainedTable::new(100, NaturalOrder, DefaultHash).unwrap();
/// assert_eq!(table.bucket_count(), 5);
///
/// table.insert("x").unwrap();
/// assert!(table.contains(&"x"));
/// assert_eq!(table.remove(&"x"), Some("x"));
/// ```
#[derive(Clone)]
pub struct ChainedTable<T, C, H> {
    buckets: Box<[BucketList<T>]>,
    len: usize,
    capacity: usize,
    compare: C,
    hash: H,
}

impl<T, C, H> ChainedTable<T, C, H> {
    /// Creates an empty table holding at most `capacity` elements, with the
    /// [`DEFAULT_LOAD_FACTOR`].
    ///
    /// # Errors
    ///
    /// Returns [`SetError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize, compare: C, hash: H) -> Result<Self> {
        Self::with_load_factor(capacity, DEFAULT_LOAD_FACTOR, compare, hash)
    }

    /// Creates an empty table with `max(1, capacity / load_factor)` buckets.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::InvalidCapacity`] if `capacity` is zero and
    /// [`SetError::InvalidLoadFactor`] if `load_factor` is zero.
    pub fn with_load_factor(
        capacity: usize,
        load_factor: usize,
        compare: C,
        hash: H,
    ) -> Result<Self> {
        let capacity = check_capacity(capacity)?;
        if load_factor == 0 {
            return Err(SetError::InvalidLoadFactor { load_factor });
        }
        let bucket_count = (capacity / load_factor).max(1);
        tracing::debug!(capacity, load_factor, bucket_count, "creating chained table");
        Ok(Self {
            buckets: std::iter::repeat_with(BucketList::new)
                .take(bucket_count)
                .collect(),
            len: 0,
            capacity,
            compare,
            hash,
        })
    }

    /// Returns the number of buckets.
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the bucket at `index`.
    #[inline]
    pub fn bucket(&self, index: usize) -> Option<&BucketList<T>> {
        self.buckets.get(index)
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
    fn bucket_of<Q: ?Sized>(&self, element: &Q) -> usize
    where
        H: ElementHasher<Q>,
    {
        self.hash.hash_element(element) as usize % self.buckets.len()
    }
}

impl<T, C, H> Storage for ChainedTable<T, C, H>
where
    C: Comparator<T>,
    H: ElementHasher<T>,
{
    type Element = T;
    type Iter<'a>
        = ChainedTableIter<'a, T>
    where
        Self: 'a;

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    fn insert(&mut self, element: T) -> Result<bool> {
        match self.locate(&element) {
            Location::Present(_) => Ok(false),
            Location::Vacant(_) | Location::Full if self.len == self.capacity => {
                Err(capacity_exceeded(self.capacity))
            }
            Location::Vacant((bucket, _)) => {
                self.buckets[bucket].add_first(element);
                self.len += 1;
                Ok(true)
            }
            Location::Full => Err(capacity_exceeded(self.capacity)),
        }
    }

    fn iter(&self) -> Self::Iter<'_> {
        ChainedTableIter {
            buckets: self.buckets.iter(),
            current: None,
            remaining: self.len,
        }
    }

    fn snapshot(&self) -> Vec<&T> {
        self.iter().collect()
    }
}

impl<T, C, H, Q> Lookup<Q> for ChainedTable<T, C, H>
where
    T: Borrow<Q>,
    C: Comparator<Q> + Comparator<T>,
    H: ElementHasher<Q> + ElementHasher<T>,
    Q: ?Sized,
{
    type Position = (usize, usize);

    fn locate(&self, element: &Q) -> Location<(usize, usize)> {
        let bucket = self.bucket_of(element);
        self.buckets[bucket]
            .position_by(|stored| {
                <C as Comparator<Q>>::equivalent(&self.compare, stored.borrow(), element)
            })
            .map_or(Location::Vacant((bucket, SENTINEL)), |node| {
                Location::Present((bucket, node))
            })
    }

    fn find(&self, element: &Q) -> Option<&T> {
        self.locate(element)
            .present()
            .and_then(|(bucket, node)| self.buckets[bucket].get(node))
    }

    fn remove(&mut self, element: &Q) -> Option<T> {
        let (bucket, node) = self.locate(element).present()?;
        let removed = self.buckets[bucket].remove_node(node)?;
        self.len -= 1;
        Some(removed)
    }
}

impl<T: fmt::Debug, C, H> fmt::Debug for ChainedTable<T, C, H> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ChainedTable")
            .field("capacity", &self.capacity)
            .field("len", &self.len)
            .field("buckets", &self.buckets)
            .finish()
    }
}

/// Bucket-by-bucket iterator over a [`ChainedTable`].
pub struct ChainedTableIter<'a, T> {
    buckets: std::slice::Iter<'a, BucketList<T>>,
    current: Option<BucketListIter<'a, T>>,
    remaining: usize,
}

impl<'a, T> Iterator for ChainedTableIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(element) = self.current.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(element);
            }
            self.current = Some(self.buckets.next()?.iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for ChainedTableIter<'_, T> {}
