//! # Chunk Module
//!
//! A chunk is the unit of storage and generation: a fixed-size cube of
//! voxels with a dense material buffer. Chunks are created exactly once by
//! the generation step and keep their buffer length for life; individual
//! voxels stay mutable in place.
//!
//! The buffer is laid out x-fastest (`x + y * size + z * size²`). Offsets
//! are produced and decoded by [`ChunkSpace`](crate::ChunkSpace); meshers
//! walk [`Chunk::voxels`] with that same formula.

use cgmath::Point3;

use super::MaterialId;

/// A cube of `size³` voxels at a fixed chunk coordinate.
///
/// The coordinate is stamped at creation by the generation step and always
/// equals the key the chunk is stored under. The chunk's world-space bounds
/// are not stored; derive them with
/// [`ChunkSpace::bounds_of`](crate::ChunkSpace::bounds_of) when needed.
pub struct Chunk {
    position: Point3<i32>,
    size: i32,
    voxels: Vec<MaterialId>,
}

impl Chunk {
    /// Assembles a chunk from a generated buffer. Only the generation path
    /// constructs chunks, which is what keeps the stamped coordinate and
    /// the store key in agreement.
    pub(crate) fn new(position: Point3<i32>, size: i32, voxels: Vec<MaterialId>) -> Self {
        debug_assert_eq!(voxels.len(), (size as usize).pow(3));
        Chunk {
            position,
            size,
            voxels,
        }
    }

    /// The chunk coordinate this chunk was generated for.
    pub fn position(&self) -> Point3<i32> {
        self.position
    }

    /// Edge length of the chunk, in voxels.
    pub fn size(&self) -> i32 {
        self.size
    }

    /// The dense material buffer, length `size³`, x-fastest layout.
    ///
    /// This is the mesher boundary: consumers index it with the flat-index
    /// formula documented on [`ChunkSpace`](crate::ChunkSpace).
    pub fn voxels(&self) -> &[MaterialId] {
        &self.voxels
    }

    /// Reads the voxel at a flat buffer offset.
    ///
    /// # Panics
    /// Panics if `index` is not below `size³`. Offsets produced by
    /// [`ChunkSpace::flat_index`](crate::ChunkSpace::flat_index) from
    /// masked local coordinates are always in range.
    pub fn voxel(&self, index: usize) -> MaterialId {
        self.voxels[index]
    }

    /// Writes the voxel at a flat buffer offset, returning the previous
    /// material.
    ///
    /// # Panics
    /// Panics if `index` is not below `size³`.
    pub fn replace_voxel(&mut self, index: usize, material: MaterialId) -> MaterialId {
        std::mem::replace(&mut self.voxels[index], material)
    }
}
