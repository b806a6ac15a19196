pub mod math;
pub mod raytracing;

use crate::spatial::math::{child_origin, octant_for_offset, V3c};

pub(crate) const FLOAT_ERROR_TOLERANCE: f32 = 0.00001;

/// An axis aligned cube in world space
#[derive(Default, Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Cube {
    pub min_position: V3c<f32>,
    pub size: f32,
}

impl Cube {
    pub fn max_position(&self) -> V3c<f32> {
        self.min_position + V3c::unit(self.size)
    }

    /// Creates a bounding box within an area described by the min_position and size, for the given octant
    pub fn child_bounds_for(&self, octant: u8) -> Cube {
        let child_size = self.size / 2.;
        Cube {
            min_position: child_origin(octant, self.min_position, child_size),
            size: child_size,
        }
    }

    /// True if the given point is inside the cube, with coordinates in inclusive, exclusive range
    pub fn contains_point(&self, point: &V3c<f32>) -> bool {
        (point.x >= self.min_position.x - FLOAT_ERROR_TOLERANCE)
            && (point.x < self.min_position.x + self.size + FLOAT_ERROR_TOLERANCE)
            && (point.y >= self.min_position.y - FLOAT_ERROR_TOLERANCE)
            && (point.y < self.min_position.y + self.size + FLOAT_ERROR_TOLERANCE)
            && (point.z >= self.min_position.z - FLOAT_ERROR_TOLERANCE)
            && (point.z < self.min_position.z + self.size + FLOAT_ERROR_TOLERANCE)
    }
}

/// An axis aligned cube on the integer voxel grid, used while building octrees
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct VoxelBounds {
    pub min_position: V3c<i32>,
    pub size: u32,
}

impl VoxelBounds {
    /// True if the voxel at the given position is inside, coordinates in inclusive, exclusive range
    pub fn contains(&self, position: &V3c<i32>) -> bool {
        (0..3).all(|axis| {
            position[axis] >= self.min_position[axis]
                && (position[axis] as i64) < self.min_position[axis] as i64 + self.size as i64
        })
    }

    /// The bounds twice the size, grown on every axis in the direction of the given position
    /// The given position is expected to be outside of the current bounds
    pub fn expand_towards(&self, target: &V3c<i32>) -> VoxelBounds {
        debug_assert!(!self.contains(target));
        let mut expanded = VoxelBounds {
            min_position: self.min_position,
            size: self.size * 2,
        };
        for axis in 0..3 {
            if target[axis] < self.min_position[axis] {
                expanded.min_position[axis] -= self.size as i32;
            }
        }
        expanded
    }

    /// The octant of these bounds the given position falls into
    pub fn octant_for(&self, position: &V3c<i32>) -> u8 {
        debug_assert!(self.contains(position));
        let half_size = (self.size / 2) as i32;
        octant_for_offset(
            position.x >= self.min_position.x + half_size,
            position.y >= self.min_position.y + half_size,
            position.z >= self.min_position.z + half_size,
        )
    }

    /// Bounds of the child in the given octant
    pub fn child_bounds_for(&self, octant: u8) -> VoxelBounds {
        let half_size = self.size / 2;
        let offset = math::OCTANT_OFFSET_LUT[octant as usize];
        VoxelBounds {
            min_position: self.min_position + V3c::<i32>::from(offset) * half_size as i32,
            size: half_size,
        }
    }
}

impl From<VoxelBounds> for Cube {
    fn from(bounds: VoxelBounds) -> Cube {
        Cube {
            min_position: bounds.min_position.into(),
            size: bounds.size as f32,
        }
    }
}
