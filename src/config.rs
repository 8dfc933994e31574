//! # Configuration Module
//!
//! Construction-time configuration for a voxel world. Every field is fixed
//! once a [`World`](crate::World) has been built from it; there is no
//! runtime reconfiguration.
//!
//! Configurations can be built in code or loaded from JSON, with per-field
//! defaults so partial documents work:
//!
//! ```
//! use voxel_world::WorldConfig;
//!
//! let config = WorldConfig::from_json(r#"{ "chunk_size": 16 }"#).unwrap();
//! assert_eq!(config.chunk_size, 16);
//! assert_eq!(config.chunk_distance, 2);
//! ```
//!
//! Validation is fail-fast: a configuration that would silently miscompute
//! voxel indices (a `chunk_size` that is not a positive power of two) is
//! rejected at construction time, never at lookup time.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default streaming radius, in chunks, around an observer.
pub const DEFAULT_CHUNK_DISTANCE: i32 = 2;
/// Default edge length of a chunk, in voxels. Must stay a power of two.
pub const DEFAULT_CHUNK_SIZE: i32 = 32;
/// Default world-space edge length represented by one voxel.
pub const DEFAULT_CUBE_SIZE: f64 = 25.0;

/// Configuration for a voxel world, fixed at construction.
///
/// # Fields
///
/// * `chunk_distance` - Streaming radius in chunks; the missing-chunk scan
///   covers a cube of side `2 * chunk_distance` around the observer.
/// * `chunk_size` - Edge length of a chunk in voxels. The addressing
///   arithmetic shifts and masks, so this must be a positive power of two.
/// * `cube_size` - World-space edge length of a single voxel, used to
///   quantize floating-point positions onto the integer voxel grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Streaming radius in chunks (default 2).
    pub chunk_distance: i32,
    /// Chunk edge length in voxels, a positive power of two (default 32).
    pub chunk_size: i32,
    /// World-space edge length of one voxel (default 25.0).
    pub cube_size: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            chunk_distance: DEFAULT_CHUNK_DISTANCE,
            chunk_size: DEFAULT_CHUNK_SIZE,
            cube_size: DEFAULT_CUBE_SIZE,
        }
    }
}

impl WorldConfig {
    /// Loads a configuration from a JSON document and validates it.
    ///
    /// Missing fields take their defaults, so `{}` yields
    /// [`WorldConfig::default`].
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the document is malformed or the resulting
    /// configuration fails [`WorldConfig::validate`].
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every construction invariant.
    ///
    /// `chunk_size` must be a positive power of two — the test is
    /// `n > 0 && n & (n - 1) == 0`; anything weaker (parity, divisibility)
    /// accepts sizes that corrupt the index arithmetic. `cube_size` must be
    /// finite and positive, and `chunk_distance` must not be negative.
    ///
    /// # Errors
    /// Returns the first violated invariant as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size <= 0 || self.chunk_size & (self.chunk_size - 1) != 0 {
            return Err(ConfigError::ChunkSizeNotPowerOfTwo(self.chunk_size));
        }
        if self.chunk_distance < 0 {
            return Err(ConfigError::NegativeChunkDistance(self.chunk_distance));
        }
        if !self.cube_size.is_finite() || self.cube_size <= 0.0 {
            return Err(ConfigError::InvalidCubeSize(self.cube_size));
        }
        Ok(())
    }
}

/// Errors raised while building or validating a [`WorldConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `chunk_size` was zero, negative, or not a power of two.
    #[error("chunk_size must be a positive power of two, got {0}")]
    ChunkSizeNotPowerOfTwo(i32),

    /// `chunk_distance` was negative.
    #[error("chunk_distance must not be negative, got {0}")]
    NegativeChunkDistance(i32),

    /// `cube_size` was non-finite, zero, or negative.
    #[error("cube_size must be finite and positive, got {0}")]
    InvalidCubeSize(f64),

    /// The JSON document could not be parsed.
    #[error("malformed world configuration: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WorldConfig::default();
        assert_eq!(config.chunk_distance, 2);
        assert_eq!(config.chunk_size, 32);
        assert_eq!(config.cube_size, 25.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_power_of_two_enforced() {
        for bad in [0, -4, 3, 12, 33, 100] {
            let config = WorldConfig {
                chunk_size: bad,
                ..WorldConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::ChunkSizeNotPowerOfTwo(n)) if n == bad),
                "chunk_size {bad} should be rejected"
            );
        }
        for good in [1, 2, 4, 32, 128] {
            let config = WorldConfig {
                chunk_size: good,
                ..WorldConfig::default()
            };
            assert!(config.validate().is_ok(), "chunk_size {good} should pass");
        }
    }

    #[test]
    fn test_cube_size_must_be_finite_and_positive() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = WorldConfig {
                cube_size: bad,
                ..WorldConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidCubeSize(_))
            ));
        }
    }

    #[test]
    fn test_negative_distance_rejected() {
        let config = WorldConfig {
            chunk_distance: -1,
            ..WorldConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativeChunkDistance(-1))
        ));
    }

    #[test]
    fn test_from_json_applies_defaults() {
        let config = WorldConfig::from_json("{}").unwrap();
        assert_eq!(config, WorldConfig::default());

        let config = WorldConfig::from_json(r#"{ "chunk_size": 8, "cube_size": 1.0 }"#).unwrap();
        assert_eq!(config.chunk_size, 8);
        assert_eq!(config.cube_size, 1.0);
        assert_eq!(config.chunk_distance, 2);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(WorldConfig::from_json("not json").is_err());
        assert!(matches!(
            WorldConfig::from_json(r#"{ "chunk_size": 12 }"#),
            Err(ConfigError::ChunkSizeNotPowerOfTwo(12))
        ));
    }
}
