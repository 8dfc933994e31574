//! # Generator Library
//!
//! Ready-made shape and terrain functions for filling chunks, usable
//! directly or through [`from_material`](super::from_material). The pure
//! shapes live in a static name registry so configuration layers can select
//! one by string; the randomized and noise-based terrains are built through
//! seeded constructors and are reproducible for a given seed.

use std::f64::consts::PI;

use noise::{NoiseFn, Perlin};
use phf::phf_map;

use super::MaterialId;
use crate::voxels::AIR;

/// A pure per-cell material function, sampled at absolute voxel-grid
/// coordinates.
pub type MaterialFn = fn(i32, i32, i32) -> MaterialId;

/// Name registry of the pure shape functions.
pub static MATERIALS: phf::Map<&'static str, MaterialFn> = phf_map! {
    "sphere" => sphere,
    "checker" => checker,
    "hill" => hill,
    "valley" => valley,
};

/// Looks up a pure shape function by name.
pub fn material(name: &str) -> Option<MaterialFn> {
    MATERIALS.get(name).copied()
}

/// A solid ball of radius 16 voxels around the grid origin.
pub fn sphere(i: i32, j: i32, k: i32) -> MaterialId {
    if i * i + j * j + k * k <= 16 * 16 {
        1
    } else {
        AIR
    }
}

/// A two-material 3D checkerboard, half the cells empty.
pub fn checker(i: i32, j: i32, k: i32) -> MaterialId {
    if (i + j + k) & 1 != 0 {
        if (i ^ j ^ k) & 2 != 0 {
            1
        } else {
            0xffffff
        }
    } else {
        AIR
    }
}

/// A single gaussian hill centered on the vertical axis.
pub fn hill(i: i32, j: i32, k: i32) -> MaterialId {
    if f64::from(j) <= 16.0 * (-f64::from(i * i + k * k) / 64.0).exp() {
        1
    } else {
        AIR
    }
}

/// A parabolic valley rising away from the vertical axis.
pub fn valley(i: i32, j: i32, k: i32) -> MaterialId {
    if j <= (i * i + k * k) * 31 / (32 * 32 * 2) + 1 {
        1
    } else {
        AIR
    }
}

/// Sparse random speckle: roughly one cell in ten gets a random material.
/// Reproducible for a given seed.
pub fn noise(seed: u64) -> impl FnMut(i32, i32, i32) -> MaterialId {
    let mut rng = fastrand::Rng::with_seed(seed);
    move |_, _, _| {
        if rng.f64() < 0.1 {
            (rng.f64() * f64::from(0xffffffu32)) as MaterialId
        } else {
            AIR
        }
    }
}

/// Every cell a random material. Reproducible for a given seed.
pub fn dense_noise(seed: u64) -> impl FnMut(i32, i32, i32) -> MaterialId {
    let mut rng = fastrand::Rng::with_seed(seed);
    move |_, _, _| (rng.f64() * f64::from(0xffffffu32)).round() as MaterialId
}

/// Rolling sine-wave hills with layered strata and a speckled rock band.
/// The speckle is the only random part; it is reproducible for a given
/// seed.
pub fn hilly_terrain(seed: u64) -> impl FnMut(i32, i32, i32) -> MaterialId {
    let mut rng = fastrand::Rng::with_seed(seed);
    move |i, j, k| {
        let j = f64::from(j);
        let h0 = 3.0 * (PI * f64::from(i) / 12.0 - PI * f64::from(k) * 0.1).sin() + 27.0;
        if j > h0 + 1.0 {
            return AIR;
        }
        if h0 <= j {
            return 1;
        }
        let h1 = 2.0 * (PI * f64::from(i) * 0.25 - PI * f64::from(k) * 0.3).sin() + 20.0;
        if h1 <= j {
            return 2;
        }
        if j > 2.0 {
            return if rng.f64() < 0.1 { 0x222222 } else { 0xaaaaaa };
        }
        3
    }
}

/// Scale applied to grid coordinates before sampling Perlin noise.
pub const PERLIN_SCALE_FACTOR: f64 = 0.02;
/// Samples above this threshold become the primary solid material.
pub const PERLIN_POSITIVE_THRESHOLD: f64 = 0.2;
/// Samples below the negated threshold become the secondary material.
pub const PERLIN_NEGATIVE_THRESHOLD: f64 = -0.2;

/// Cave-riddled terrain from 3D Perlin noise: samples inside the
/// `[-0.2, 0.2]` band are empty, the rest split into two materials by
/// sign. Fully deterministic for a given seed.
pub fn perlin(seed: u32) -> impl Fn(i32, i32, i32) -> MaterialId {
    let perlin = Perlin::new(seed);
    move |i, j, k| {
        let sample = perlin.get([
            f64::from(i) * PERLIN_SCALE_FACTOR,
            f64::from(j) * PERLIN_SCALE_FACTOR,
            f64::from(k) * PERLIN_SCALE_FACTOR,
        ]);
        if sample > PERLIN_POSITIVE_THRESHOLD {
            1
        } else if sample < PERLIN_NEGATIVE_THRESHOLD {
            2
        } else {
            AIR
        }
    }
}
