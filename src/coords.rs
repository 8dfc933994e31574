//! # Coordinate Module
//!
//! Stateless transforms between the four address spaces of the world:
//!
//! * **World position** - floating-point `Point3<f64>`, the space observers
//!   and physics live in.
//! * **Voxel grid** - integer `Point3<i32>`, world position quantized by
//!   `cube_size`. This is the unit the generation callback receives.
//! * **Chunk coordinate** - integer `Point3<i32>` identifying a chunk,
//!   voxel grid divided by `chunk_size`.
//! * **Local voxel coordinate / flat index** - a voxel's position inside
//!   its owning chunk, and its offset into the chunk's dense buffer.
//!
//! ## Addressing Strategy
//!
//! All integer arithmetic uses shifts and masks: `chunk_bits` and
//! `chunk_mask` are fixed when the [`ChunkSpace`] is built, which is why
//! `chunk_size` must be a power of two. Arithmetic right shift floors
//! toward negative infinity and two's-complement masking keeps local
//! coordinates in `[0, chunk_size)`, so negative addresses need no special
//! cases anywhere.
//!
//! The floating-point calling convention quantizes onto the voxel grid
//! first and then routes through the same integer transforms as callers who
//! already hold grid coordinates. There is exactly one code path per
//! transform; the two conventions cannot drift apart.
//!
//! ## The Buffer Layout Contract
//!
//! [`ChunkSpace::flat_index`] defines the dense buffer layout:
//! `x + y * chunk_size + z * chunk_size²`, x fastest. Any mesher or other
//! consumer of a chunk's buffer must decode with the identical formula
//! ([`ChunkSpace::local_at_index`] is that decode). Changing this layout is
//! a breaking change for every consumer at once.

use cgmath::{Point3, Vector3};

use crate::config::{ConfigError, WorldConfig};

/// The coordinate arithmetic of one world, parameterized by its
/// configuration and shared by every component that addresses voxels.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_world::{ChunkSpace, WorldConfig};
///
/// let space = ChunkSpace::new(&WorldConfig {
///     chunk_size: 32,
///     cube_size: 1.0,
///     ..WorldConfig::default()
/// }).unwrap();
///
/// // Negative positions floor toward negative infinity:
/// let position = Point3::new(-1.0, -1.0, -1.0);
/// assert_eq!(space.chunk_at_position(position), Point3::new(-1, -1, -1));
/// assert_eq!(space.local_at_position(position), Point3::new(31, 31, 31));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ChunkSpace {
    chunk_size: i32,
    chunk_bits: u32,
    chunk_mask: i32,
    cube_size: f64,
}

impl ChunkSpace {
    /// Builds the coordinate arithmetic for a configuration.
    ///
    /// # Errors
    /// Fails with [`ConfigError`] when the configuration does not validate;
    /// in particular a `chunk_size` that is not a positive power of two is
    /// rejected here rather than left to corrupt index math later.
    pub fn new(config: &WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(ChunkSpace {
            chunk_size: config.chunk_size,
            chunk_bits: config.chunk_size.trailing_zeros(),
            chunk_mask: config.chunk_size - 1,
            cube_size: config.cube_size,
        })
    }

    /// Edge length of a chunk, in voxels.
    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    /// World-space edge length of one voxel.
    pub fn cube_size(&self) -> f64 {
        self.cube_size
    }

    /// Number of voxels in one chunk (`chunk_size³`), the length of every
    /// chunk buffer.
    pub fn chunk_volume(&self) -> usize {
        (self.chunk_size as usize).pow(3)
    }

    /// Quantizes a world position onto the integer voxel grid, flooring
    /// toward negative infinity on each axis.
    pub fn grid_at_position(&self, position: Point3<f64>) -> Point3<i32> {
        Point3::new(
            (position.x / self.cube_size).floor() as i32,
            (position.y / self.cube_size).floor() as i32,
            (position.z / self.cube_size).floor() as i32,
        )
    }

    /// Maps a voxel-grid coordinate to the coordinate of its owning chunk.
    ///
    /// Arithmetic right shift floors toward negative infinity, so grid
    /// coordinate `-1` lands in chunk `-1`, not chunk `0`.
    pub fn chunk_at_grid(&self, grid: Point3<i32>) -> Point3<i32> {
        Point3::new(
            grid.x >> self.chunk_bits,
            grid.y >> self.chunk_bits,
            grid.z >> self.chunk_bits,
        )
    }

    /// Maps a floating world position to the coordinate of its owning chunk.
    pub fn chunk_at_position(&self, position: Point3<f64>) -> Point3<i32> {
        self.chunk_at_grid(self.grid_at_position(position))
    }

    /// Bounds of a chunk in voxel-grid units: the half-open box
    /// `[low, high)` with `low = chunk * chunk_size` and
    /// `high = low + chunk_size` on each axis.
    ///
    /// These are the `(low, high)` values handed to the generation callback.
    pub fn bounds_of(&self, chunk: Point3<i32>) -> (Point3<i32>, Point3<i32>) {
        let low = Point3::new(
            chunk.x << self.chunk_bits,
            chunk.y << self.chunk_bits,
            chunk.z << self.chunk_bits,
        );
        let high = low + Vector3::new(self.chunk_size, self.chunk_size, self.chunk_size);
        (low, high)
    }

    /// Reduces a voxel-grid coordinate to the local coordinate inside its
    /// owning chunk; every component is in `[0, chunk_size)`, including for
    /// negative grid coordinates.
    pub fn local_at_grid(&self, grid: Point3<i32>) -> Point3<i32> {
        Point3::new(
            grid.x & self.chunk_mask,
            grid.y & self.chunk_mask,
            grid.z & self.chunk_mask,
        )
    }

    /// Local coordinate of the voxel containing a floating world position.
    pub fn local_at_position(&self, position: Point3<f64>) -> Point3<i32> {
        self.local_at_grid(self.grid_at_position(position))
    }

    /// Encodes a local voxel coordinate into its offset in the chunk's
    /// dense buffer: `x + y * chunk_size + z * chunk_size²`.
    ///
    /// This formula is the buffer layout contract shared with every mesher;
    /// see the module documentation.
    ///
    /// # Arguments
    /// * `local` - A local voxel coordinate with every component in
    ///   `[0, chunk_size)`, as produced by [`ChunkSpace::local_at_grid`].
    pub fn flat_index(&self, local: Point3<i32>) -> usize {
        debug_assert!(
            (local.x & !self.chunk_mask) == 0
                && (local.y & !self.chunk_mask) == 0
                && (local.z & !self.chunk_mask) == 0,
            "local coordinate {local:?} out of range for chunk_size {}",
            self.chunk_size,
        );
        (local.x | (local.y << self.chunk_bits) | (local.z << (2 * self.chunk_bits))) as usize
    }

    /// Decodes a buffer offset back into a local voxel coordinate; the
    /// inverse of [`ChunkSpace::flat_index`].
    pub fn local_at_index(&self, index: usize) -> Point3<i32> {
        let index = index as i32;
        Point3::new(
            index & self.chunk_mask,
            (index >> self.chunk_bits) & self.chunk_mask,
            index >> (2 * self.chunk_bits),
        )
    }
}
