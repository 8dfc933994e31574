//! # Generation Module
//!
//! The producer contract between the world and pluggable content
//! generation. A generator is handed the half-open voxel-grid bounds of one
//! chunk plus the chunk coordinate, and returns a dense volume of material
//! identifiers; the world validates the volume's shape before it ever
//! indexes into it, stamps it with the chunk coordinate, and stores it.
//!
//! Generators are trusted to be deterministic for identical inputs unless
//! deliberately randomized; the randomized generators shipped in
//! [`generators`] take an explicit seed so identical seeds reproduce
//! identical worlds.
//!
//! ```
//! use cgmath::Point3;
//! use voxel_world::voxels::generation::fill_volume;
//!
//! // A 2×2×2 volume of solid material 1.
//! let volume = fill_volume(Point3::new(0, 0, 0), Point3::new(2, 2, 2), |_, _, _| 1);
//! assert_eq!(volume.voxels.len(), 8);
//! ```

use cgmath::{Point3, Vector3};

use super::MaterialId;

pub mod generators;

/// A producer of chunk content.
///
/// `low`/`high` are the chunk's half-open bounds in voxel-grid units and
/// `chunk` is its chunk coordinate; `high - low` is the expected volume
/// shape on every axis. Implementations take `&mut self` so stateful
/// (seeded) generators can carry their own randomness.
///
/// Any `FnMut(Point3<i32>, Point3<i32>, Point3<i32>) -> VoxelVolume`
/// closure is a generator; [`from_fn`] and [`from_material`] build common
/// shapes of closure without type annotations.
pub trait ChunkGenerator {
    /// Produces the voxel volume for the chunk spanning `[low, high)`.
    fn generate(
        &mut self,
        low: Point3<i32>,
        high: Point3<i32>,
        chunk: Point3<i32>,
    ) -> VoxelVolume;
}

impl<F> ChunkGenerator for F
where
    F: FnMut(Point3<i32>, Point3<i32>, Point3<i32>) -> VoxelVolume,
{
    fn generate(
        &mut self,
        low: Point3<i32>,
        high: Point3<i32>,
        chunk: Point3<i32>,
    ) -> VoxelVolume {
        self(low, high, chunk)
    }
}

/// A dense block of generated voxels and the dimensions it claims to have.
///
/// The world cross-checks `dims` against the requested bounds and
/// `voxels.len()` against `dims` before accepting a volume, so a
/// misbehaving generator surfaces as an error instead of an out-of-range
/// buffer access.
pub struct VoxelVolume {
    /// Material identifiers in x-fastest order.
    pub voxels: Vec<MaterialId>,
    /// Extent of the volume on each axis.
    pub dims: Vector3<i32>,
}

impl VoxelVolume {
    /// The buffer length `dims` implies (`dx·dy·dz`), zero if any axis is
    /// non-positive.
    pub fn expected_len(&self) -> usize {
        (self.dims.x.max(0) as usize)
            * (self.dims.y.max(0) as usize)
            * (self.dims.z.max(0) as usize)
    }
}

/// Builds a volume for `[low, high)` by sampling a per-cell material
/// function at every voxel-grid coordinate, x varying fastest — the same
/// layout chunk buffers use.
pub fn fill_volume<F>(low: Point3<i32>, high: Point3<i32>, mut material: F) -> VoxelVolume
where
    F: FnMut(i32, i32, i32) -> MaterialId,
{
    let dims = high - low;
    let mut voxels = Vec::with_capacity(
        (dims.x.max(0) as usize) * (dims.y.max(0) as usize) * (dims.z.max(0) as usize),
    );
    for k in low.z..high.z {
        for j in low.y..high.y {
            for i in low.x..high.x {
                voxels.push(material(i, j, k));
            }
        }
    }
    VoxelVolume { voxels, dims }
}

/// Pins the closure signature of a generator written inline, in the manner
/// of `std::iter::from_fn`.
///
/// ```
/// use voxel_world::voxels::generation::{fill_volume, from_fn};
///
/// let generator = from_fn(|low, high, _chunk| fill_volume(low, high, |_, _, _| 1));
/// # let _ = generator;
/// ```
pub fn from_fn<F>(generate: F) -> F
where
    F: FnMut(Point3<i32>, Point3<i32>, Point3<i32>) -> VoxelVolume,
{
    generate
}

/// Lifts a per-cell material function into a [`ChunkGenerator`] that fills
/// each requested chunk with [`fill_volume`].
pub fn from_material<F>(mut material: F) -> impl ChunkGenerator
where
    F: FnMut(i32, i32, i32) -> MaterialId,
{
    move |low: Point3<i32>, high: Point3<i32>, _chunk: Point3<i32>| {
        fill_volume(low, high, &mut material)
    }
}
