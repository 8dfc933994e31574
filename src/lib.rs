#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! A sparse, effectively unbounded 3D voxel world partitioned into fixed-size
//! cubic chunks, with demand-driven chunk generation and a streaming protocol
//! for filling the space around a moving observer.
//!
//! This crate provides the chunk-management core of a voxel engine: the
//! coordinate arithmetic, the sparse chunk storage, and the producer contract
//! for pluggable terrain generation. It deliberately contains no rendering,
//! input, or networking code — meshers and renderers are pure consumers of
//! the chunk buffers exposed here.
//!
//! ## Key Modules
//!
//! * `config` - Construction-time configuration and validation
//! * `coords` - Transforms between world, chunk, and chunk-local voxel space
//! * `voxels` - Chunk records, sparse storage, generation, and streaming
//!
//! ## Architecture
//!
//! The world is a sparse mapping from chunk coordinates to chunks. Only
//! chunks that have been generated occupy memory, which allows effectively
//! infinite world sizes. Chunks are created exactly once, by the generation
//! step; a streaming pass reports which chunks near an observer are missing
//! so the caller can fill them either synchronously or from its own worker
//! infrastructure.
//!
//! ## Usage
//!
//! ```
//! use cgmath::Point3;
//! use voxel_world::voxels::generation;
//! use voxel_world::{World, WorldConfig};
//!
//! let config = WorldConfig {
//!     chunk_size: 2,
//!     cube_size: 1.0,
//!     ..WorldConfig::default()
//! };
//! let mut world = World::new(config, generation::from_material(|_, _, _| 1)).unwrap();
//!
//! world.generate_chunk(Point3::new(0, 0, 0)).unwrap();
//! assert_eq!(world.voxel_at(Point3::new(0.0, 0.0, 0.0)), Some(1));
//!
//! // Addresses outside every generated chunk resolve to `None`, never a fault.
//! assert_eq!(world.voxel_at(Point3::new(5.0, 5.0, 5.0)), None);
//! ```
//!
//! ## Concurrency
//!
//! The core is single-threaded and synchronous: every operation is a plain
//! function over owned state. Chunk insertion requires `&mut World`, so
//! writers are serialized by the borrow checker, and a chunk only becomes
//! observable after its buffer is fully populated. Callers that want
//! background generation subscribe to the missing-chunk queue and perform
//! the generation on infrastructure of their choosing.

pub mod config;
pub mod coords;
pub mod voxels;

pub use config::{ConfigError, WorldConfig};
pub use coords::ChunkSpace;
pub use voxels::chunk::Chunk;
pub use voxels::store::ChunkStore;
pub use voxels::world::{GenerationError, World};
pub use voxels::{MaterialId, AIR};
