//! # Chunk Store Module
//!
//! Sparse storage for chunks: a hash map keyed by chunk coordinate. Only
//! generated chunks occupy memory, so the world has no intrinsic bounds.
//! There is no removal — eviction policy belongs to whatever manages the
//! world's lifetime, not to the store.

use std::collections::hash_map::{Entry, HashMap};

use cgmath::Point3;

use super::chunk::Chunk;

/// Sparse mapping from chunk coordinate to [`Chunk`].
///
/// Keys are unique and compared by value; iteration order is unspecified.
/// A chunk is stored under a key if and only if the generation step created
/// it for exactly that coordinate — insertion is crate-private so the
/// generation path stays the only way in.
#[derive(Default)]
pub struct ChunkStore {
    chunks: HashMap<Point3<i32>, Chunk>,
}

impl ChunkStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        ChunkStore {
            chunks: HashMap::new(),
        }
    }

    /// Looks up the chunk at a coordinate.
    pub fn get(&self, coord: Point3<i32>) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Looks up the chunk at a coordinate for mutation of its voxels.
    pub fn get_mut(&mut self, coord: Point3<i32>) -> Option<&mut Chunk> {
        self.chunks.get_mut(&coord)
    }

    /// Whether a chunk exists at a coordinate.
    pub fn contains(&self, coord: Point3<i32>) -> bool {
        self.chunks.contains_key(&coord)
    }

    /// Number of stored chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether no chunks have been generated yet.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Iterates over every stored chunk in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (Point3<i32>, &Chunk)> {
        self.chunks.iter().map(|(&coord, chunk)| (coord, chunk))
    }

    /// Inserts a chunk, overwriting any chunk already stored at the
    /// coordinate, and returns the stored slot. The sole mutator; callers
    /// guarantee `chunk.position() == coord`.
    pub(crate) fn put(&mut self, coord: Point3<i32>, chunk: Chunk) -> &mut Chunk {
        debug_assert_eq!(chunk.position(), coord);
        match self.chunks.entry(coord) {
            Entry::Occupied(mut slot) => {
                slot.insert(chunk);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(chunk),
        }
    }
}
