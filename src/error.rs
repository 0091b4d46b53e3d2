//! Error types for set construction and insertion.
//!
//! Absence is never an error: `find` and `remove` on a non-member return
//! `None`. Only caller mistakes are reported through [`SetError`], and a
//! failed operation always leaves the set exactly as it was.

use thiserror::Error;

/// Represents the ways a caller can misuse a set.
///
/// # Examples
///
/// ```rust
/// use slotset::SetError;
///
/// let error = SetError::CapacityExceeded { capacity: 4 };
/// assert_eq!(error.to_string(), "set is full: capacity of 4 elements reached");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SetError {
    /// A set was requested with a capacity of zero.
    #[error("capacity must be positive, got {capacity}")]
    InvalidCapacity {
        /// The rejected capacity.
        capacity: usize,
    },

    /// A chained set was requested with a load factor of zero.
    #[error("load factor must be positive, got {load_factor}")]
    InvalidLoadFactor {
        /// The rejected load factor.
        load_factor: usize,
    },

    /// A rebuild threshold outside `(0, 1]` was requested.
    #[error("rebuild threshold must lie in (0, 1], got {threshold}")]
    InvalidRebuildThreshold {
        /// The rejected threshold.
        threshold: f64,
    },

    /// A new element was added to a set already holding `capacity` elements.
    #[error("set is full: capacity of {capacity} elements reached")]
    CapacityExceeded {
        /// The fixed capacity of the set.
        capacity: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SetError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SetError::InvalidCapacity { capacity: 0 }, "capacity must be positive, got 0")]
    #[case(SetError::InvalidLoadFactor { load_factor: 0 }, "load factor must be positive, got 0")]
    #[case(
        SetError::InvalidRebuildThreshold { threshold: 1.5 },
        "rebuild threshold must lie in (0, 1], got 1.5"
    )]
    #[case(
        SetError::CapacityExceeded { capacity: 8 },
        "set is full: capacity of 8 elements reached"
    )]
    fn test_display(#[case] error: SetError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn test_error_trait() {
        let error = SetError::CapacityExceeded { capacity: 1 };
        let _: &dyn std::error::Error = &error;
    }
}
