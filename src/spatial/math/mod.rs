pub mod vector;

pub use crate::spatial::math::vector::V3c;

///####################################################################################
/// Octant
///####################################################################################
/// Offset of each child's minimum corner inside its parent, in units of the child size.
/// Index is the slot inside a node record of the octree buffer.
/// The order is not a bit interleaving; buffers built with it depend on it exactly.
pub(crate) const OCTANT_OFFSET_LUT: [V3c<u8>; 8] = [
    V3c { x: 1, y: 1, z: 1 },
    V3c { x: 1, y: 1, z: 0 },
    V3c { x: 0, y: 1, z: 0 },
    V3c { x: 0, y: 1, z: 1 },
    V3c { x: 1, y: 0, z: 1 },
    V3c { x: 1, y: 0, z: 0 },
    V3c { x: 0, y: 0, z: 0 },
    V3c { x: 0, y: 0, z: 1 },
];

/// Inverse of OCTANT_OFFSET_LUT, indexed by `x + 2 * y + 4 * z` of the offset
const OFFSET_OCTANT_LUT: [u8; 8] = [6, 5, 2, 1, 7, 4, 3, 0];

/// Offset of the given octant inside its parent, in units of the child size
pub fn offset_region(octant: u8) -> V3c<f32> {
    match OCTANT_OFFSET_LUT.get(octant as usize) {
        Some(offset) => V3c::new(offset.x as f32, offset.y as f32, offset.z as f32),
        None => panic!("Invalid octant {octant} provided for spatial reference!"),
    }
}

/// Minimum corner of the child cube in the given octant
/// * `octant` - slot index inside the parent node record
/// * `parent_min` - minimum corner of the parent cube
/// * `half_edge` - edge length of the child cube
pub fn child_origin(octant: u8, parent_min: V3c<f32>, half_edge: f32) -> V3c<f32> {
    parent_min + offset_region(octant) * half_edge
}

/// Provides the octant whose child lies in the upper half of the parent on the flagged axes
pub(crate) fn octant_for_offset(upper_x: bool, upper_y: bool, upper_z: bool) -> u8 {
    OFFSET_OCTANT_LUT[upper_x as usize + (upper_y as usize) * 2 + (upper_z as usize) * 4]
}
