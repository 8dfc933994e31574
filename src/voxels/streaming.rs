//! # Streaming Module
//!
//! Enumeration of the chunk coordinates "near" an observer — the scan the
//! world runs to decide which chunks to report missing or to generate.

use cgmath::Point3;

/// Enumerates the cube of chunk coordinates around `center` at the given
/// radius: the half-open range `[center - distance, center + distance)` on
/// each axis, `(2 * distance)³` coordinates in total.
///
/// Note the asymmetry: each axis extends one chunk further on the negative
/// side than on the positive side. Long-standing consumers depend on
/// exactly this enumeration, so it is kept as-is rather than widened to a
/// symmetric cube.
///
/// ```
/// use cgmath::Point3;
/// use voxel_world::voxels::streaming::nearby_chunks;
///
/// let near = nearby_chunks(Point3::new(0, 0, 0), 1);
/// assert_eq!(near.len(), 8);
/// assert!(near.contains(&Point3::new(-1, -1, -1)));
/// assert!(!near.contains(&Point3::new(1, 1, 1)));
/// ```
pub fn nearby_chunks(center: Point3<i32>, distance: i32) -> Vec<Point3<i32>> {
    let side = (2 * distance).max(0) as usize;
    let mut coords = Vec::with_capacity(side * side * side);
    for x in (center.x - distance)..(center.x + distance) {
        for y in (center.y - distance)..(center.y + distance) {
            for z in (center.z - distance)..(center.z + distance) {
                coords.push(Point3::new(x, y, z));
            }
        }
    }
    coords
}
