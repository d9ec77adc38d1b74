//! Configuration types for controlling collection sizes, nesting depth and seeding.

use thiserror::Error;

/// Default upper bound (inclusive) for generated collection lengths
pub const DEFAULT_MAX_COLLECTION_SIZE: usize = 3;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Invalid maximum collection size (must be > 0)
    #[error("Invalid max collection size: {0} (must be > 0)")]
    InvalidMaxCollectionSize(usize),
}

/// Configuration for a populate call.
///
/// Set before a call and read-only while it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulateConfig {
    /// Maximum number of elements generated for arrays, lists and sets
    pub max_collection_size: usize,
    /// Maximum nesting depth of composite instances; `None` means unbounded
    pub max_depth: Option<usize>,
    /// Optional seed for reproducible generation
    pub seed: Option<u64>,
}

impl Default for PopulateConfig {
    fn default() -> Self {
        Self {
            max_collection_size: DEFAULT_MAX_COLLECTION_SIZE,
            max_depth: None,
            seed: None,
        }
    }
}

impl PopulateConfig {
    /// Create a new populate configuration with validation
    pub fn new(
        max_collection_size: usize,
        max_depth: Option<usize>,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            max_collection_size,
            max_depth,
            seed,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the populate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_collection_size == 0 {
            return Err(ConfigError::InvalidMaxCollectionSize(
                self.max_collection_size,
            ));
        }
        Ok(())
    }

    /// Whether a composite at `depth` lies beyond the configured maximum
    pub fn exceeds_max_depth(&self, depth: usize) -> bool {
        self.max_depth.is_some_and(|max| depth > max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_populate_config_defaults() {
        let config = PopulateConfig::default();
        assert_eq!(config.max_collection_size, 3);
        assert!(config.max_depth.is_none());
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_populate_config_validation() {
        assert_eq!(
            PopulateConfig::new(0, None, None),
            Err(ConfigError::InvalidMaxCollectionSize(0))
        );
        // Nothing below the root is built at depth zero
        let shallow = PopulateConfig::new(3, Some(0), None).unwrap();
        assert!(shallow.exceeds_max_depth(1));

        let config = PopulateConfig::new(1, Some(4), Some(7)).unwrap();
        assert_eq!(config.max_collection_size, 1);
        assert_eq!(config.max_depth, Some(4));
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_exceeds_max_depth() {
        let unbounded = PopulateConfig::default();
        assert!(!unbounded.exceeds_max_depth(1_000));

        let bounded = PopulateConfig::new(3, Some(2), None).unwrap();
        assert!(!bounded.exceeds_max_depth(1));
        assert!(!bounded.exceeds_max_depth(2));
        assert!(bounded.exceeds_max_depth(3));
    }

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            ConfigError::InvalidMaxCollectionSize(0).to_string(),
            "Invalid max collection size: 0 (must be > 0)"
        );
    }
}
