//! # slotset
//!
//! Bounded, mutable sets with interchangeable storage strategies.
//!
//! ## Overview
//!
//! A [`Set`] holds unique elements up to a fixed capacity chosen at
//! construction. Equality (and order, where needed) comes from a caller
//! supplied [`Comparator`](element::Comparator); the hashing strategies also
//! take an [`ElementHasher`](element::ElementHasher). Four strategies share
//! one contract:
//!
//! - **Unsorted**: an array scanned linearly.
//! - **Sorted**: an array kept in comparator order and binary searched.
//! - **Open addressing**: a hash table with linear probing and tombstones.
//! - **Chained**: a hash table whose buckets are doubly linked lists.
//!
//! [`Set::snapshot`] returns references to every element; the sorted and
//! open-addressing strategies return them in comparator order.
//!
//! [`StringSet`] is a ready-made set of owned strings.
//!
//! ## Feature Flags
//!
//! - `fxhash`: [`DefaultHash`](element::DefaultHash) uses `rustc-hash`.
//! - `ahash`: [`DefaultHash`](element::DefaultHash) uses `ahash`.
//!
//! Without either, `DefaultHash` uses the standard library hasher.
//!
//! ## Example
//!
//! ```rust
//! use slotset::prelude::*;
//!
//! let mut set = Set::with_natural_order(Strategy::Sorted, 4).unwrap();
//! set.try_extend([30, 10, 20]).unwrap();
//!
//! assert_eq!(set.snapshot(), vec![&10, &20, &30]);
//! assert_eq!(set.add(40), Ok(true));
//! assert_eq!(set.add(50), Err(SetError::CapacityExceeded { capacity: 4 }));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use slotset::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{SetConfig, Strategy};
    pub use crate::element::{
        Comparator, DefaultHash, ElementHasher, NaturalOrder, StringHash,
    };
    pub use crate::error::{Result, SetError};
    pub use crate::set::Set;
    pub use crate::string_set::StringSet;
}

pub mod config;
pub mod element;
pub mod error;
pub mod set;
pub mod storage;
pub mod string_set;

pub use config::{ParseStrategyError, SetConfig, Strategy};
pub use error::{Result, SetError};
pub use set::Set;
pub use string_set::StringSet;
