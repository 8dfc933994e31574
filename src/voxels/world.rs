//! # World Module
//!
//! The `World` struct coordinates the sparse chunk store, the coordinate
//! arithmetic, and the generation callback. It is the central access point
//! for everything the crate does: voxel reads and writes, demand-driven
//! chunk generation, and the missing-chunk streaming protocol.
//!
//! ## Architecture
//!
//! The world is sparse: a chunk occupies memory only once generated, so the
//! addressable space is effectively unbounded. Chunk creation has exactly
//! one path — [`World::generate_chunk`] — which computes the chunk's
//! bounds, invokes the generation callback, validates the returned volume,
//! stamps it with the chunk coordinate, and stores it. That single path is
//! what keeps a chunk's stamped coordinate and its store key in agreement
//! forever.
//!
//! ## Streaming
//!
//! [`World::request_missing_chunks`] scans the cube of chunks around an
//! observer and pushes every absent coordinate onto the queues handed out
//! by [`World::subscribe_missing_chunks`]. It never generates anything
//! itself: *what is missing* is decoupled from *how and when to fill it*,
//! so a caller can generate synchronously, on worker threads, or over the
//! network, at whatever rate it likes. A request carries no handle and is
//! never cancelled; a stale coordinate is simply not re-issued once the
//! observer has moved on. [`World::generate_missing_chunks`] is the
//! synchronous alternative that fills the same set inline.

use std::sync::mpsc::{channel, Receiver, Sender};

use cgmath::{Point3, Vector3};
use log::{debug, info, warn};
use thiserror::Error;

use super::chunk::Chunk;
use super::generation::ChunkGenerator;
use super::store::ChunkStore;
use super::streaming::nearby_chunks;
use super::MaterialId;
use crate::config::{ConfigError, WorldConfig};
use crate::coords::ChunkSpace;

/// A sparse voxel world: chunk storage, coordinate arithmetic, and
/// demand-driven generation behind one interface.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_world::voxels::generation::{self, generators};
/// use voxel_world::{World, WorldConfig};
///
/// let generator = generation::from_material(generators::valley);
/// let mut world = World::new(WorldConfig::default(), generator).unwrap();
///
/// let chunk = world.generate_chunk(Point3::new(0, 0, 0)).unwrap();
/// assert_eq!(chunk.position(), Point3::new(0, 0, 0));
/// ```
pub struct World {
    space: ChunkSpace,
    chunk_distance: i32,
    chunks: ChunkStore,
    generator: Box<dyn ChunkGenerator>,
    chunk_requests: Vec<Sender<Point3<i32>>>,
}

impl World {
    /// Builds a world from a configuration and a generation callback.
    ///
    /// # Arguments
    /// * `config` - Validated at construction; fixed for the world's life.
    /// * `generator` - The callback invoked by [`World::generate_chunk`]
    ///   for every chunk this world ever creates.
    ///
    /// # Errors
    /// Fails fast with [`ConfigError`] when the configuration does not
    /// validate (see [`WorldConfig::validate`]); no partially constructed
    /// world escapes.
    pub fn new<G>(config: WorldConfig, generator: G) -> Result<Self, ConfigError>
    where
        G: ChunkGenerator + 'static,
    {
        let space = ChunkSpace::new(&config)?;
        info!(
            "world created: chunk_size={}, cube_size={}, chunk_distance={}",
            config.chunk_size, config.cube_size, config.chunk_distance
        );
        Ok(World {
            space,
            chunk_distance: config.chunk_distance,
            chunks: ChunkStore::new(),
            generator: Box::new(generator),
            chunk_requests: Vec::new(),
        })
    }

    /// The coordinate arithmetic this world was built with.
    pub fn space(&self) -> &ChunkSpace {
        &self.space
    }

    /// The configured streaming radius, in chunks.
    pub fn chunk_distance(&self) -> i32 {
        self.chunk_distance
    }

    /// The sparse chunk store, for iteration and direct chunk access.
    pub fn chunks(&self) -> &ChunkStore {
        &self.chunks
    }

    /// Looks up the chunk at a chunk coordinate.
    pub fn chunk_at(&self, coord: Point3<i32>) -> Option<&Chunk> {
        self.chunks.get(coord)
    }

    /// Generates the chunk at a coordinate and stores it, overwriting any
    /// chunk already there. This is the only path that creates chunks.
    ///
    /// The generation callback receives the chunk's half-open voxel-grid
    /// bounds and its coordinate; the returned volume is validated against
    /// those bounds before a single element of it is indexed.
    ///
    /// # Errors
    /// Returns [`GenerationError`] when the callback's volume does not have
    /// the requested shape. The store is left untouched in that case.
    pub fn generate_chunk(&mut self, chunk: Point3<i32>) -> Result<&Chunk, GenerationError> {
        let (low, high) = self.space.bounds_of(chunk);
        let volume = self.generator.generate(low, high, chunk);

        let expected_dims = high - low;
        if volume.dims != expected_dims {
            warn!(
                "rejecting volume for chunk ({}, {}, {}): dims {:?}, expected {:?}",
                chunk.x, chunk.y, chunk.z, volume.dims, expected_dims
            );
            return Err(GenerationError::VolumeDimsMismatch {
                chunk,
                expected: expected_dims,
                actual: volume.dims,
            });
        }
        let expected_len = self.space.chunk_volume();
        if volume.voxels.len() != expected_len {
            warn!(
                "rejecting volume for chunk ({}, {}, {}): {} voxels, expected {}",
                chunk.x,
                chunk.y,
                chunk.z,
                volume.voxels.len(),
                expected_len
            );
            return Err(GenerationError::VolumeLenMismatch {
                chunk,
                expected: expected_len,
                actual: volume.voxels.len(),
            });
        }

        debug!("generated chunk ({}, {}, {})", chunk.x, chunk.y, chunk.z);
        let stored = self
            .chunks
            .put(chunk, Chunk::new(chunk, self.space.chunk_size(), volume.voxels));
        Ok(stored)
    }

    /// The cube of chunk coordinates near a world position at an explicit
    /// radius, centered on the chunk containing the position. See
    /// [`nearby_chunks`](crate::voxels::streaming::nearby_chunks) for the
    /// enumeration policy, including its negative-side bias.
    pub fn nearby_chunks(&self, position: Point3<f64>, distance: i32) -> Vec<Point3<i32>> {
        nearby_chunks(self.space.chunk_at_position(position), distance)
    }

    /// The chunk coordinates near a world position that have no chunk yet,
    /// scanned at the configured streaming radius.
    pub fn missing_chunks(&self, position: Point3<f64>) -> Vec<Point3<i32>> {
        let center = self.space.chunk_at_position(position);
        nearby_chunks(center, self.chunk_distance)
            .into_iter()
            .filter(|&coord| !self.chunks.contains(coord))
            .collect()
    }

    /// Opens a missing-chunk queue. Every subsequent
    /// [`World::request_missing_chunks`] call pushes each absent coordinate
    /// onto the returned receiver; drop the receiver to unsubscribe.
    pub fn subscribe_missing_chunks(&mut self) -> Receiver<Point3<i32>> {
        let (sender, receiver) = channel();
        self.chunk_requests.push(sender);
        receiver
    }

    /// Reports every chunk missing near a world position to the subscribed
    /// missing-chunk queues, one message per absent coordinate. Never
    /// generates a chunk itself.
    ///
    /// Subscribers whose receiver has been dropped are discarded here.
    pub fn request_missing_chunks(&mut self, position: Point3<f64>) {
        let missing = self.missing_chunks(position);
        if missing.is_empty() {
            return;
        }
        debug!("requesting {} missing chunks", missing.len());
        self.chunk_requests.retain(|requests| {
            missing.iter().all(|&coord| requests.send(coord).is_ok())
        });
    }

    /// Synchronously generates every chunk missing near a world position
    /// and returns how many were created.
    ///
    /// # Errors
    /// Stops at the first [`GenerationError`]; chunks generated before the
    /// failure remain stored.
    pub fn generate_missing_chunks(
        &mut self,
        position: Point3<f64>,
    ) -> Result<usize, GenerationError> {
        let missing = self.missing_chunks(position);
        let generated = missing.len();
        for coord in missing {
            self.generate_chunk(coord)?;
        }
        Ok(generated)
    }

    /// Reads the voxel containing a floating world position, or `None` if
    /// no chunk covers it. Absence is an answer, not a fault.
    pub fn voxel_at(&self, position: Point3<f64>) -> Option<MaterialId> {
        self.voxel_at_grid(self.space.grid_at_position(position))
    }

    /// Reads the voxel at an integer voxel-grid coordinate, or `None` if no
    /// chunk covers it.
    pub fn voxel_at_grid(&self, grid: Point3<i32>) -> Option<MaterialId> {
        let chunk = self.chunks.get(self.space.chunk_at_grid(grid))?;
        let index = self.space.flat_index(self.space.local_at_grid(grid));
        Some(chunk.voxel(index))
    }

    /// Writes the voxel containing a floating world position and returns
    /// the previous material. When no chunk covers the position nothing is
    /// written and `None` is returned — writes never grow the world.
    pub fn set_voxel_at(
        &mut self,
        position: Point3<f64>,
        material: MaterialId,
    ) -> Option<MaterialId> {
        self.set_voxel_at_grid(self.space.grid_at_position(position), material)
    }

    /// Writes the voxel at an integer voxel-grid coordinate and returns the
    /// previous material, or `None` (writing nothing) when no chunk covers
    /// it.
    pub fn set_voxel_at_grid(
        &mut self,
        grid: Point3<i32>,
        material: MaterialId,
    ) -> Option<MaterialId> {
        let coord = self.space.chunk_at_grid(grid);
        let index = self.space.flat_index(self.space.local_at_grid(grid));
        let chunk = self.chunks.get_mut(coord)?;
        Some(chunk.replace_voxel(index, material))
    }
}

/// Errors raised when a generation callback misbehaves.
///
/// Both variants mean the callback broke its contract; they surface before
/// any out-of-range buffer access can happen.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The volume's claimed dimensions differ from the requested bounds.
    #[error("generator returned dims {actual:?} for chunk {chunk:?}, expected {expected:?}")]
    VolumeDimsMismatch {
        /// Chunk coordinate the volume was requested for.
        chunk: Point3<i32>,
        /// Extent implied by the requested bounds.
        expected: Vector3<i32>,
        /// Extent the generator claimed.
        actual: Vector3<i32>,
    },

    /// The volume's buffer length does not match its dimensions.
    #[error("generator returned {actual} voxels for chunk {chunk:?}, expected {expected}")]
    VolumeLenMismatch {
        /// Chunk coordinate the volume was requested for.
        chunk: Point3<i32>,
        /// Required buffer length for one chunk.
        expected: usize,
        /// Length of the buffer actually returned.
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::generation::{fill_volume, from_fn, from_material, VoxelVolume};
    use crate::voxels::AIR;

    fn tiny_world(material: MaterialId) -> World {
        let config = WorldConfig {
            chunk_size: 2,
            cube_size: 1.0,
            ..WorldConfig::default()
        };
        World::new(config, from_material(move |_, _, _| material)).unwrap()
    }

    #[test]
    fn test_end_to_end_generate_then_read() {
        let mut world = tiny_world(1);
        world.generate_chunk(Point3::new(0, 0, 0)).unwrap();
        assert_eq!(world.voxel_at(Point3::new(0.0, 0.0, 0.0)), Some(1));
        assert_eq!(world.voxel_at(Point3::new(1.5, 1.5, 1.5)), Some(1));
        // Outside the one generated chunk: absent, not a fault.
        assert_eq!(world.voxel_at(Point3::new(5.0, 5.0, 5.0)), None);
    }

    #[test]
    fn test_generate_chunk_is_idempotent_by_coordinate() {
        let mut world = tiny_world(1);
        world.generate_chunk(Point3::new(0, 0, 0)).unwrap();
        world.generate_chunk(Point3::new(0, 0, 0)).unwrap();
        assert_eq!(world.chunks().len(), 1);

        for x in 0..3 {
            world.generate_chunk(Point3::new(x, 1, 0)).unwrap();
        }
        assert_eq!(world.chunks().len(), 4);
    }

    #[test]
    fn test_generated_chunk_is_stamped_with_its_key() {
        let mut world = tiny_world(1);
        let coord = Point3::new(-3, 2, 14);
        let chunk = world.generate_chunk(coord).unwrap();
        assert_eq!(chunk.position(), coord);
        assert_eq!(world.chunk_at(coord).unwrap().position(), coord);
    }

    #[test]
    fn test_generator_receives_chunk_bounds() {
        let config = WorldConfig {
            chunk_size: 4,
            cube_size: 1.0,
            ..WorldConfig::default()
        };
        // Record the material from the low corner so the bounds are visible
        // in the stored buffer.
        let mut world = World::new(
            config,
            from_material(|i, j, k| (i.abs() + j.abs() + k.abs()) as MaterialId),
        )
        .unwrap();
        world.generate_chunk(Point3::new(-1, 0, 0)).unwrap();
        // Grid (-4, 0, 0) is the low corner of chunk (-1, 0, 0).
        assert_eq!(world.voxel_at_grid(Point3::new(-4, 0, 0)), Some(4));
        assert_eq!(world.voxel_at_grid(Point3::new(-1, 3, 3)), Some(7));
    }

    #[test]
    fn test_reads_and_writes_on_missing_chunks_are_absent_safe() {
        let mut world = tiny_world(1);
        assert_eq!(world.voxel_at(Point3::new(0.0, 0.0, 0.0)), None);
        assert_eq!(world.voxel_at(Point3::new(-1e9, 2.5, 1e12)), None);
        assert_eq!(world.set_voxel_at(Point3::new(0.0, 0.0, 0.0), 9), None);
        // The write above must not have created anything.
        assert!(world.chunks().is_empty());
    }

    #[test]
    fn test_write_returns_previous_and_sticks() {
        let mut world = tiny_world(7);
        world.generate_chunk(Point3::new(0, 0, 0)).unwrap();
        assert_eq!(world.set_voxel_at_grid(Point3::new(1, 0, 1), AIR), Some(7));
        assert_eq!(world.voxel_at_grid(Point3::new(1, 0, 1)), Some(AIR));
        // Reading air is still "present": distinct from the absent None.
        assert_eq!(world.voxel_at_grid(Point3::new(0, 0, 0)), Some(7));
    }

    #[test]
    fn test_negative_addresses_resolve_into_negative_chunks() {
        let config = WorldConfig {
            chunk_size: 32,
            cube_size: 1.0,
            ..WorldConfig::default()
        };
        let mut world = World::new(config, from_material(|_, _, _| 3)).unwrap();
        world.generate_chunk(Point3::new(-1, -1, -1)).unwrap();
        assert_eq!(world.voxel_at(Point3::new(-1.0, -1.0, -1.0)), Some(3));
        assert_eq!(world.voxel_at(Point3::new(0.0, 0.0, 0.0)), None);
    }

    #[test]
    fn test_missing_chunks_shrink_as_chunks_generate() {
        let mut world = tiny_world(1);
        let origin = Point3::new(0.0, 0.0, 0.0);
        let missing = world.missing_chunks(origin);
        assert_eq!(missing.len(), 64); // (2 * distance)³ with distance 2
        assert_eq!(world.nearby_chunks(origin, 1).len(), 8);

        world.generate_chunk(Point3::new(0, 0, 0)).unwrap();
        assert_eq!(world.missing_chunks(origin).len(), 63);

        let generated = world.generate_missing_chunks(origin).unwrap();
        assert_eq!(generated, 63);
        assert_eq!(world.chunks().len(), 64);
        assert!(world.missing_chunks(origin).is_empty());
    }

    #[test]
    fn test_request_missing_chunks_signals_every_subscriber() {
        let mut world = tiny_world(1);
        let origin = Point3::new(0.0, 0.0, 0.0);
        let first = world.subscribe_missing_chunks();
        let second = world.subscribe_missing_chunks();

        world.request_missing_chunks(origin);
        let coords: Vec<_> = first.try_iter().collect();
        assert_eq!(coords.len(), 64);
        assert!(coords.contains(&Point3::new(-2, -2, -2)));
        assert!(!coords.contains(&Point3::new(2, 0, 0)));
        assert_eq!(second.try_iter().count(), 64);

        // Requesting never generates; the store is still empty.
        assert!(world.chunks().is_empty());

        // Once everything nearby exists there is nothing left to request.
        world.generate_missing_chunks(origin).unwrap();
        world.request_missing_chunks(origin);
        assert_eq!(first.try_iter().count(), 0);
    }

    #[test]
    fn test_dropped_subscribers_are_discarded() {
        let mut world = tiny_world(1);
        let origin = Point3::new(0.0, 0.0, 0.0);
        let kept = world.subscribe_missing_chunks();
        drop(world.subscribe_missing_chunks());

        world.request_missing_chunks(origin);
        assert_eq!(kept.try_iter().count(), 64);
    }

    #[test]
    fn test_volume_validation_rejects_wrong_shapes() {
        let config = WorldConfig {
            chunk_size: 2,
            cube_size: 1.0,
            ..WorldConfig::default()
        };
        let mut world = World::new(
            config.clone(),
            from_fn(|low, high, _chunk| {
                // Claims the right dims but under-fills the buffer.
                let mut volume = fill_volume(low, high, |_, _, _| 1);
                volume.voxels.pop();
                volume
            }),
        )
        .unwrap();
        assert!(matches!(
            world.generate_chunk(Point3::new(0, 0, 0)),
            Err(GenerationError::VolumeLenMismatch {
                expected: 8,
                actual: 7,
                ..
            })
        ));
        assert!(world.chunks().is_empty());

        let mut world = World::new(
            config,
            from_fn(|_, _, _| VoxelVolume {
                voxels: vec![1; 27],
                dims: Vector3::new(3, 3, 3),
            }),
        )
        .unwrap();
        assert!(matches!(
            world.generate_chunk(Point3::new(0, 0, 0)),
            Err(GenerationError::VolumeDimsMismatch { .. })
        ));
        assert!(world.chunks().is_empty());
    }
}
