//! Circular doubly linked list with a sentinel node.
//!
//! Nodes live in an arena (`Vec`) and link to each other by index, which keeps
//! the structure free of `unsafe` code and of reference-counting cycles.
//! Node `0` is the sentinel: its `next` is the head of the list and its
//! `previous` is the tail, so every insertion and removal at either end is a
//! constant number of link updates with no special case for an empty list.
//!
//! ```text
//!        ┌──────────────────────────────────────────┐
//!        ▼                                          │
//!   [sentinel] ⇄ [node a] ⇄ [node b] ⇄ [node c] ────┘
//! ```
//!
//! Freed nodes are recycled through a free list.

use std::fmt;

/// Index of the sentinel node.
pub(crate) const SENTINEL: usize = 0;

#[derive(Clone)]
struct Node<T> {
    element: Option<T>,
    next: usize,
    previous: usize,
}

/// An unordered doubly linked sequence used as one hash bucket.
///
/// # Time Complexity
///
/// | Operation                      | Complexity |
/// |--------------------------------|------------|
/// | `add_first` / `add_last`       | O(1)       |
/// | `remove_first` / `remove_last` | O(1)       |
/// | `first` / `last`               | O(1)       |
/// | `find_by` / `remove_by`        | O(n)       |
/// | `len`                          | O(1)       |
///
/// # Examples
///
/// ```rust
/// use slotset::storage::BucketList;
///
/// let mut list = BucketList::new();
/// list.add_first(2);
/// list.add_first(1);
/// list.add_last(3);
///
/// assert_eq!(list.iter().collect::<Vec<_>>(), vec![&1, &2, &3]);
/// assert_eq!(list.remove_by(|&value| value == 2), Some(2));
/// assert_eq!(list.len(), 2);
/// ```
#[derive(Clone)]
pub struct BucketList<T> {
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> BucketList<T> {
    /// Creates an empty list holding only its sentinel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                element: None,
                next: SENTINEL,
                previous: SENTINEL,
            }],
            free: Vec::new(),
            len: 0,
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no element.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts `element` at the head and returns its node index.
    pub fn add_first(&mut self, element: T) -> usize {
        self.link_after(SENTINEL, element)
    }

    /// Inserts `element` at the tail and returns its node index.
    pub fn add_last(&mut self, element: T) -> usize {
        let tail = self.nodes[SENTINEL].previous;
        self.link_after(tail, element)
    }

    /// Removes and returns the head element.
    pub fn remove_first(&mut self) -> Option<T> {
        let head = self.nodes[SENTINEL].next;
        self.unlink(head)
    }

    /// Removes and returns the tail element.
    pub fn remove_last(&mut self) -> Option<T> {
        let tail = self.nodes[SENTINEL].previous;
        self.unlink(tail)
    }

    /// Returns the head element.
    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.get(self.nodes[SENTINEL].next)
    }

    /// Returns the tail element.
    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.get(self.nodes[SENTINEL].previous)
    }

    /// Returns the element stored in node `index`.
    ///
    /// The sentinel and freed nodes hold no element.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.nodes.get(index).and_then(|node| node.element.as_ref())
    }

    /// Returns the node index of the first element, from the head, matching
    /// `predicate`.
    pub fn position_by<P>(&self, mut predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        let mut current = self.nodes[SENTINEL].next;
        while current != SENTINEL {
            let node = &self.nodes[current];
            if node.element.as_ref().is_some_and(&mut predicate) {
                return Some(current);
            }
            current = node.next;
        }
        None
    }

    /// Returns the first element, from the head, matching `predicate`.
    pub fn find_by<P>(&self, predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.position_by(predicate).and_then(|index| self.get(index))
    }

    /// Removes and returns the first element, from the head, matching
    /// `predicate`. The list is unchanged if nothing matches.
    pub fn remove_by<P>(&mut self, predicate: P) -> Option<T>
    where
        P: FnMut(&T) -> bool,
    {
        self.position_by(predicate)
            .and_then(|index| self.unlink(index))
    }

    /// Removes and returns the element stored in node `index`.
    ///
    /// Returns `None` for the sentinel, freed nodes and out-of-range indices.
    pub fn remove_node(&mut self, index: usize) -> Option<T> {
        self.unlink(index)
    }

    /// Iterates from head to tail.
    pub fn iter(&self) -> BucketListIter<'_, T> {
        BucketListIter {
            list: self,
            current: self.nodes[SENTINEL].next,
            remaining: self.len,
        }
    }

    fn link_after(&mut self, previous: usize, element: T) -> usize {
        let next = self.nodes[previous].next;
        let node = Node {
            element: Some(element),
            next,
            previous,
        };
        let index = match self.free.pop() {
            Some(index) => {
                self.nodes[index] = node;
                index
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        self.nodes[previous].next = index;
        self.nodes[next].previous = index;
        self.len += 1;
        index
    }

    fn unlink(&mut self, index: usize) -> Option<T> {
        if index == SENTINEL {
            return None;
        }
        let node = self.nodes.get_mut(index)?;
        let element = node.element.take()?;
        let (previous, next) = (node.previous, node.next);
        self.nodes[previous].next = next;
        self.nodes[next].previous = previous;
        self.free.push(index);
        self.len -= 1;
        Some(element)
    }
}

impl<T> Default for BucketList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for BucketList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a BucketList<T> {
    type Item = &'a T;
    type IntoIter = BucketListIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Head-to-tail iterator over a [`BucketList`].
pub struct BucketListIter<'a, T> {
    list: &'a BucketList<T>,
    current: usize,
    remaining: usize,
}

impl<'a, T> Iterator for BucketListIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == SENTINEL {
            return None;
        }
        let node = &self.list.nodes[self.current];
        self.current = node.next;
        self.remaining -= 1;
        node.element.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for BucketListIter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn list_of(values: &[i32]) -> BucketList<i32> {
        let mut list = BucketList::new();
        for &value in values {
            list.add_last(value);
        }
        list
    }

    #[rstest]
    fn test_new_is_empty() {
        let list: BucketList<i32> = BucketList::new();
        assert!(list.is_empty());
        assert_eq!(list.first(), None);
        assert_eq!(list.last(), None);
        assert_eq!(list.iter().count(), 0);
    }

    #[rstest]
    fn test_add_first_and_last() {
        let mut list = BucketList::new();
        list.add_first(2);
        list.add_first(1);
        list.add_last(3);

        assert_eq!(list.len(), 3);
        assert_eq!(list.first(), Some(&1));
        assert_eq!(list.last(), Some(&3));
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[rstest]
    fn test_remove_first_and_last() {
        let mut list = list_of(&[1, 2, 3]);
        assert_eq!(list.remove_first(), Some(1));
        assert_eq!(list.remove_last(), Some(3));
        assert_eq!(list.remove_last(), Some(2));
        assert_eq!(list.remove_first(), None);
        assert!(list.is_empty());
    }

    #[rstest]
    fn test_remove_by_unlinks_middle() {
        let mut list = list_of(&[1, 2, 3, 4]);
        assert_eq!(list.remove_by(|&value| value == 3), Some(3));
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 4]);
        assert_eq!(list.remove_by(|&value| value == 3), None);
    }

    #[rstest]
    fn test_find_by() {
        let list = list_of(&[5, 10, 15]);
        assert_eq!(list.find_by(|&value| value > 6), Some(&10));
        assert_eq!(list.find_by(|&value| value > 50), None);
    }

    #[rstest]
    fn test_freed_nodes_are_recycled() {
        let mut list = list_of(&[1, 2]);
        let index = list.position_by(|&value| value == 1).unwrap();
        list.remove_node(index);
        let reused = list.add_first(9);
        assert_eq!(reused, index);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![9, 2]);
    }

    #[rstest]
    fn test_remove_node_rejects_sentinel_and_stale_indices() {
        let mut list = list_of(&[1]);
        assert_eq!(list.remove_node(SENTINEL), None);
        assert_eq!(list.remove_node(42), None);
        let index = list.position_by(|&value| value == 1).unwrap();
        assert_eq!(list.remove_node(index), Some(1));
        assert_eq!(list.remove_node(index), None);
        assert!(list.is_empty());
    }

    #[rstest]
    fn test_debug_lists_elements() {
        let list = list_of(&[1, 2]);
        assert_eq!(format!("{list:?}"), "[1, 2]");
    }
}
