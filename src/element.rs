//! Comparison and hashing strategies injected into a set at construction.
//!
//! A set never asks its elements how to compare or hash themselves directly.
//! Instead it holds a [`Comparator`] and an [`ElementHasher`], chosen by the
//! caller. Closures implement both traits, so the classic
//! "pass a compare function and a hash function" style works unchanged:
//!
//! ```rust
//! use std::cmp::Ordering;
//! use slotset::element::{Comparator, ElementHasher};
//!
//! let by_length = |left: &&str, right: &&str| left.len().cmp(&right.len());
//! assert_eq!(by_length.compare(&"ab", &"cd"), Ordering::Equal);
//!
//! let by_first_byte = |element: &&str| u32::from(element.as_bytes()[0]);
//! assert_eq!(by_first_byte.hash_element(&"a"), 97);
//! ```
//!
//! The stock strategies cover the common cases:
//!
//! - [`NaturalOrder`]: delegates to [`Ord`].
//! - [`DefaultHash`]: delegates to [`Hash`] through the crate's hasher
//!   (`std`, `fxhash` or `ahash` depending on enabled features).
//! - [`StringHash`]: the multiplicative string hash `h = 31 * h + byte`.
//!
//! # Contract
//!
//! Two elements that compare [`Ordering::Equal`] must hash to the same value.
//! Strategies that only need equality (unsorted array, chained buckets) still
//! receive a total order; they only inspect whether the result is `Equal`.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

// =============================================================================
// Comparator
// =============================================================================

/// A three-way comparison between two elements.
pub trait Comparator<T: ?Sized> {
    /// Compares `left` with `right`.
    fn compare(&self, left: &T, right: &T) -> Ordering;

    /// Returns `true` when `left` and `right` compare equal.
    #[inline]
    fn equivalent(&self, left: &T, right: &T) -> bool {
        self.compare(left, right) == Ordering::Equal
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self(left, right)
    }
}

/// Compares elements by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }
}

// =============================================================================
// ElementHasher
// =============================================================================

/// Maps an element to an unsigned hash value.
pub trait ElementHasher<T: ?Sized> {
    /// Hashes `element`.
    fn hash_element(&self, element: &T) -> u32;
}

impl<T: ?Sized, F> ElementHasher<T> for F
where
    F: Fn(&T) -> u32,
{
    #[inline]
    fn hash_element(&self, element: &T) -> u32 {
        self(element)
    }
}

/// Hashes elements through their [`Hash`] implementation.
///
/// The underlying hasher is deterministic: `std`'s `DefaultHasher` by default,
/// `FxHasher` with the `fxhash` feature, and `AHasher` with fixed keys with the
/// `ahash` feature.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DefaultHash;

impl<T: Hash + ?Sized> ElementHasher<T> for DefaultHash {
    #[inline]
    fn hash_element(&self, element: &T) -> u32 {
        let mut hasher = new_hasher();
        element.hash(&mut hasher);
        fold_to_u32(hasher.finish())
    }
}

#[cfg(feature = "fxhash")]
fn new_hasher() -> rustc_hash::FxHasher {
    rustc_hash::FxHasher::default()
}

#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
fn new_hasher() -> ahash::AHasher {
    ahash::AHasher::default()
}

#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
fn new_hasher() -> std::hash::DefaultHasher {
    std::hash::DefaultHasher::new()
}

#[inline]
#[allow(clippy::cast_possible_truncation)]
const fn fold_to_u32(hash: u64) -> u32 {
    (hash ^ (hash >> 32)) as u32
}

/// The multiplicative string hash `h = 31 * h + byte`, wrapping on overflow.
///
/// # Examples
///
/// ```rust
/// use slotset::element::{ElementHasher, StringHash};
///
/// assert_eq!(StringHash.hash_element("a"), 97);
/// assert_eq!(StringHash.hash_element("ab"), 31 * 97 + 98);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StringHash;

impl<T: AsRef<str> + ?Sized> ElementHasher<T> for StringHash {
    fn hash_element(&self, element: &T) -> u32 {
        element
            .as_ref()
            .bytes()
            .fold(0u32, |hash, byte| {
                hash.wrapping_mul(31).wrapping_add(u32::from(byte))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 2, Ordering::Less)]
    #[case(2, 2, Ordering::Equal)]
    #[case(3, 2, Ordering::Greater)]
    fn test_natural_order(#[case] left: i32, #[case] right: i32, #[case] expected: Ordering) {
        assert_eq!(NaturalOrder.compare(&left, &right), expected);
    }

    #[rstest]
    fn test_natural_order_on_unsized() {
        assert_eq!(NaturalOrder.compare("apple", "banana"), Ordering::Less);
        assert!(NaturalOrder.equivalent("pear", "pear"));
    }

    #[rstest]
    fn test_closure_comparator() {
        let reversed = |left: &i32, right: &i32| right.cmp(left);
        assert_eq!(reversed.compare(&1, &2), Ordering::Greater);
        assert!(!reversed.equivalent(&1, &2));
    }

    #[rstest]
    fn test_default_hash_is_deterministic() {
        assert_eq!(DefaultHash.hash_element(&42), DefaultHash.hash_element(&42));
        assert_eq!(
            DefaultHash.hash_element("key"),
            DefaultHash.hash_element(&"key".to_string())
        );
    }

    #[rstest]
    #[case("", 0)]
    #[case("a", 97)]
    #[case("abc", (97 * 31 + 98) * 31 + 99)]
    fn test_string_hash(#[case] input: &str, #[case] expected: u32) {
        assert_eq!(StringHash.hash_element(input), expected);
    }

    #[rstest]
    fn test_string_hash_wraps() {
        let long = "z".repeat(64);
        let _ = StringHash.hash_element(long.as_str());
    }

    #[rstest]
    fn test_string_hash_agrees_across_string_types() {
        let owned: Box<str> = "word".into();
        assert_eq!(StringHash.hash_element(&owned), StringHash.hash_element("word"));
    }

    #[rstest]
    fn test_closure_hasher() {
        let identity = |element: &u32| *element;
        assert_eq!(identity.hash_element(&7), 7);
    }

    #[rstest]
    fn test_fold_to_u32_mixes_high_bits() {
        assert_eq!(fold_to_u32(1 << 32), 1);
        assert_eq!(fold_to_u32(0xFFFF_FFFF), 0xFFFF_FFFF);
    }
}
