//! A set of owned strings.
//!
//! [`StringSet`] copies every string it accepts and releases the copy when
//! the string is removed or the set is dropped, so callers can add words
//! straight out of a reusable line buffer. Strings compare in lexical byte
//! order and hash with [`StringHash`].
//!
//! # Examples
//!
//! ```rust
//! use slotset::{StringSet, Strategy};
//!
//! let mut words = StringSet::new(Strategy::OpenAddressing, 16).unwrap();
//! let mut line = String::from("to be or not to be");
//! for word in line.split_whitespace() {
//!     words.add(word).unwrap();
//! }
//! line.clear();
//!
//! assert_eq!(words.count(), 4);
//! assert_eq!(words.snapshot(), vec!["be", "not", "or", "to"]);
//! assert!(words.remove("or"));
//! assert!(!words.remove("or"));
//! ```

use std::fmt;

use crate::config::{SetConfig, Strategy};
use crate::element::{NaturalOrder, StringHash};
use crate::error::Result;
use crate::set::Set;

/// A bounded set of owned strings.
#[derive(Clone)]
pub struct StringSet {
    inner: Set<Box<str>, NaturalOrder, StringHash>,
}

impl StringSet {
    /// Creates an empty string set.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::InvalidCapacity`](crate::SetError::InvalidCapacity)
    /// if `capacity` is zero.
    pub fn new(strategy: Strategy, capacity: usize) -> Result<Self> {
        Self::from_config(&SetConfig::new(strategy, capacity))
    }

    /// Creates an empty string set from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by [`SetConfig::validate`].
    pub fn from_config(config: &SetConfig) -> Result<Self> {
        Set::from_config(config, NaturalOrder, StringHash).map(|inner| Self { inner })
    }

    /// Returns the strategy backing this set.
    #[inline]
    pub const fn strategy(&self) -> Strategy {
        self.inner.strategy()
    }

    /// Returns the fixed maximum number of strings.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// Returns the number of strings.
    #[inline]
    pub fn count(&self) -> usize {
        self.inner.count()
    }

    /// Returns `true` if the set holds no string.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Adds a copy of `word` unless it is already present.
    ///
    /// Nothing is allocated when `word` is already a member.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::CapacityExceeded`](crate::SetError::CapacityExceeded)
    /// if `word` is new and the set is full.
    pub fn add(&mut self, word: &str) -> Result<bool> {
        if self.inner.contains(word) {
            return Ok(false);
        }
        self.inner.add(Box::from(word))
    }

    /// Removes `word`, releasing the stored copy. Returns `true` if it was
    /// present.
    pub fn remove(&mut self, word: &str) -> bool {
        self.inner.remove(word).is_some()
    }

    /// Returns the stored copy of `word`.
    pub fn find(&self, word: &str) -> Option<&str> {
        self.inner.find(word).map(|word| &**word)
    }

    /// Returns `true` if `word` is a member.
    pub fn contains(&self, word: &str) -> bool {
        self.inner.contains(word)
    }

    /// Returns every string, sorted for the ordered strategies.
    pub fn snapshot(&self) -> Vec<&str> {
        self.inner
            .snapshot()
            .into_iter()
            .map(|word| &**word)
            .collect()
    }

    /// Iterates over the strings in storage order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.inner.iter().map(|word| &**word)
    }
}

impl fmt::Debug for StringSet {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.snapshot()).finish()
    }
}
