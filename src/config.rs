//! Construction parameters for a [`Set`](crate::Set).
//!
//! A [`SetConfig`] gathers everything a set needs besides its comparator and
//! hasher: which storage strategy to use, the fixed capacity, and the
//! strategy-specific tuning knobs. Values are validated once, by
//! [`SetConfig::validate`], before any storage is allocated.
//!
//! # Example
//!
//! ```rust
//! use slotset::{SetConfig, Strategy};
//!
//! let config = SetConfig::new(Strategy::Chained, 1000).with_load_factor(10);
//! assert!(config.validate().is_ok());
//! assert_eq!(config.load_factor, 10);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SetError};
use crate::storage::DEFAULT_LOAD_FACTOR;

/// The storage strategy backing a set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Unsorted array: linear scan, append, swap-remove.
    Unsorted,
    /// Sorted array: binary search, shifting insert and remove.
    Sorted,
    /// Open-addressing hash table with linear probing and tombstones.
    #[default]
    OpenAddressing,
    /// Hash table of chained bucket lists.
    Chained,
}

impl Strategy {
    /// All strategies, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Unsorted,
        Self::Sorted,
        Self::OpenAddressing,
        Self::Chained,
    ];

    /// The strategy's canonical name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unsorted => "unsorted",
            Self::Sorted => "sorted",
            Self::OpenAddressing => "open-addressing",
            Self::Chained => "chained",
        }
    }

    /// Returns `true` if snapshots come out in comparator order.
    #[must_use]
    pub const fn is_ordered(self) -> bool {
        matches!(self, Self::Sorted | Self::OpenAddressing)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Error returned when parsing an unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy `{0}`: expected one of unsorted, sorted, open-addressing, chained")]
pub struct ParseStrategyError(pub String);

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(name: &str) -> std::result::Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "unsorted" => Ok(Self::Unsorted),
            "sorted" => Ok(Self::Sorted),
            "open-addressing" | "hash" | "table" => Ok(Self::OpenAddressing),
            "chained" | "chain" => Ok(Self::Chained),
            _ => Err(ParseStrategyError(name.to_string())),
        }
    }
}

/// Construction parameters for a set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SetConfig {
    /// The storage strategy.
    pub strategy: Strategy,
    /// The maximum number of live elements.
    pub capacity: usize,
    /// Capacity-to-bucket ratio (`Chained` only).
    pub load_factor: usize,
    /// Rebuild once `(len + tombstones) / capacity` exceeds this value
    /// (`OpenAddressing` only). `None` never rebuilds.
    pub rebuild_threshold: Option<f64>,
}

impl SetConfig {
    /// Creates a configuration with default tuning for `strategy`.
    #[must_use]
    pub const fn new(strategy: Strategy, capacity: usize) -> Self {
        Self {
            strategy,
            capacity,
            load_factor: DEFAULT_LOAD_FACTOR,
            rebuild_threshold: None,
        }
    }

    /// Sets the chained load factor.
    #[must_use]
    pub const fn with_load_factor(mut self, load_factor: usize) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Sets the open-addressing rebuild threshold.
    #[must_use]
    pub const fn with_rebuild_threshold(mut self, threshold: f64) -> Self {
        self.rebuild_threshold = Some(threshold);
        self
    }

    /// Checks every parameter.
    ///
    /// # Errors
    ///
    /// - [`SetError::InvalidCapacity`] if `capacity` is zero.
    /// - [`SetError::InvalidLoadFactor`] if `load_factor` is zero.
    /// - [`SetError::InvalidRebuildThreshold`] if the threshold is outside `(0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(SetError::InvalidCapacity {
                capacity: self.capacity,
            });
        }
        if self.load_factor == 0 {
            return Err(SetError::InvalidLoadFactor {
                load_factor: self.load_factor,
            });
        }
        if let Some(threshold) = self.rebuild_threshold
            && !(threshold > 0.0 && threshold <= 1.0)
        {
            return Err(SetError::InvalidRebuildThreshold { threshold });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("unsorted", Strategy::Unsorted)]
    #[case("sorted", Strategy::Sorted)]
    #[case("open-addressing", Strategy::OpenAddressing)]
    #[case("hash", Strategy::OpenAddressing)]
    #[case("Chained", Strategy::Chained)]
    #[case(" chain ", Strategy::Chained)]
    fn test_parse_strategy(#[case] name: &str, #[case] expected: Strategy) {
        assert_eq!(name.parse::<Strategy>(), Ok(expected));
    }

    #[rstest]
    fn test_parse_unknown_strategy() {
        let error = "btree".parse::<Strategy>().unwrap_err();
        assert_eq!(error, ParseStrategyError("btree".to_string()));
        assert!(error.to_string().contains("btree"));
    }

    #[rstest]
    fn test_display_round_trips_through_parse() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.to_string().parse::<Strategy>(), Ok(strategy));
        }
    }

    #[rstest]
    fn test_ordered_strategies() {
        assert!(Strategy::Sorted.is_ordered());
        assert!(Strategy::OpenAddressing.is_ordered());
        assert!(!Strategy::Unsorted.is_ordered());
        assert!(!Strategy::Chained.is_ordered());
    }

    #[rstest]
    fn test_defaults() {
        let config = SetConfig::new(Strategy::default(), 16);
        assert_eq!(config.strategy, Strategy::OpenAddressing);
        assert_eq!(config.load_factor, DEFAULT_LOAD_FACTOR);
        assert_eq!(config.rebuild_threshold, None);
        assert_eq!(config.validate(), Ok(()));
    }

    #[rstest]
    #[case(SetConfig::new(Strategy::Sorted, 0), SetError::InvalidCapacity { capacity: 0 })]
    #[case(
        SetConfig::new(Strategy::Chained, 10).with_load_factor(0),
        SetError::InvalidLoadFactor { load_factor: 0 }
    )]
    #[case(
        SetConfig::new(Strategy::OpenAddressing, 10).with_rebuild_threshold(2.0),
        SetError::InvalidRebuildThreshold { threshold: 2.0 }
    )]
    fn test_validate_rejects(#[case] config: SetConfig, #[case] expected: SetError) {
        assert_eq!(config.validate(), Err(expected));
    }
}
