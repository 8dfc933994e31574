//! # Voxel World Demo
//!
//! A small console driver for the library: builds a world with the valley
//! terrain, streams the chunks around the origin through the missing-chunk
//! queue, and samples a few voxels.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release
//! ```

use cgmath::Point3;
use log::info;

use voxel_world::voxels::generation::{self, generators};
use voxel_world::{World, WorldConfig};

fn main() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    let config = WorldConfig::default();
    let valley = generators::material("valley").expect("valley ships with the generator library");
    let mut world =
        World::new(config, generation::from_material(valley)).expect("default configuration is valid");

    let requests = world.subscribe_missing_chunks();
    let origin = Point3::new(0.0, 0.0, 0.0);
    world.request_missing_chunks(origin);

    let mut generated = 0usize;
    while let Ok(coord) = requests.try_recv() {
        world
            .generate_chunk(coord)
            .expect("library generators fill exact chunk volumes");
        generated += 1;
    }

    info!("generated {} chunks around the origin", generated);
    info!(
        "voxel at the origin: {:?}, voxel far outside the streamed cube: {:?}",
        world.voxel_at(origin),
        world.voxel_at(Point3::new(1e7, 1e7, 1e7)),
    );
}
