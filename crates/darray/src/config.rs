//! # Array Configuration
//!
//! Initial capacity and growth factor, loadable from TOML at startup.
//!
//! ```toml
//! initial_capacity = 32
//! growth_factor = 2
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{DArrayError, DArrayResult};

/// Capacity of an array created without a reserve size.
pub const DEFAULT_CAPACITY: usize = 1;

/// Capacity multiplier applied when an insertion finds the array full.
pub const DEFAULT_GROWTH_FACTOR: usize = 2;

/// Largest accepted growth factor.
///
/// Larger multipliers exhaust the address space within a handful of
/// growths.
pub const MAX_GROWTH_FACTOR: usize = 16;

/// Sizing policy for a dynamic array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DArrayConfig {
    /// Number of element slots allocated at creation.
    pub initial_capacity: usize,
    /// Capacity multiplier used when the array is full.
    pub growth_factor: usize,
}

impl Default for DArrayConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        }
    }
}

impl DArrayConfig {
    /// Config reserving `capacity` slots up front with the default growth factor.
    ///
    /// Saves the repeated reallocations of growing from a single slot when the
    /// final size is roughly known.
    #[must_use]
    pub const fn reserved(capacity: usize) -> Self {
        Self {
            initial_capacity: capacity,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        }
    }

    /// Parses and validates a config from TOML text.
    ///
    /// Missing keys fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DArrayError::InvalidConfig`] if the text is not valid TOML for
    /// this struct or fails [`validate`](Self::validate).
    pub fn from_toml_str(text: &str) -> DArrayResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| DArrayError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the policy can actually grow an array.
    ///
    /// # Errors
    ///
    /// Returns [`DArrayError::InvalidConfig`] if `initial_capacity` is zero or
    /// `growth_factor` is outside `2..=MAX_GROWTH_FACTOR`.
    pub fn validate(&self) -> DArrayResult<()> {
        if self.initial_capacity == 0 {
            return Err(DArrayError::InvalidConfig(
                "initial_capacity must be at least 1".to_string(),
            ));
        }
        if !(2..=MAX_GROWTH_FACTOR).contains(&self.growth_factor) {
            return Err(DArrayError::InvalidConfig(format!(
                "growth_factor must be in 2..={MAX_GROWTH_FACTOR}, got {}",
                self.growth_factor
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let config = DArrayConfig::default();
        assert_eq!(config.initial_capacity, 1);
        assert_eq!(config.growth_factor, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = DArrayConfig::from_toml_str("initial_capacity = 32").unwrap();
        assert_eq!(config, DArrayConfig::reserved(32));
    }

    #[test]
    fn test_from_toml_full() {
        let config =
            DArrayConfig::from_toml_str("initial_capacity = 4\ngrowth_factor = 3").unwrap();
        assert_eq!(config.initial_capacity, 4);
        assert_eq!(config.growth_factor, 3);
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let err = DArrayConfig::from_toml_str("initial_capacity = 0").unwrap_err();
        assert!(matches!(err, DArrayError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_growth_factor_one() {
        let config = DArrayConfig {
            initial_capacity: 8,
            growth_factor: 1,
        };
        assert!(matches!(
            config.validate(),
            Err(DArrayError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_growth_factor() {
        let err =
            DArrayConfig::from_toml_str("growth_factor = 9223372036854775807").unwrap_err();
        assert!(matches!(err, DArrayError::InvalidConfig(_)));
        assert!(DArrayConfig::from_toml_str("growth_factor = 17").is_err());
        let config = DArrayConfig::from_toml_str("growth_factor = 16").unwrap();
        assert_eq!(config.growth_factor, MAX_GROWTH_FACTOR);
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = DArrayConfig::from_toml_str("growth_factor = \"two\"").unwrap_err();
        assert!(matches!(err, DArrayError::InvalidConfig(_)));
    }
}
