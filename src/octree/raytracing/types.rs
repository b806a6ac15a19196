use crate::spatial::{
    math::V3c,
    raytracing::{Axis, CubeRayIntersection},
    Cube,
};

/// Deepest level the traversal descends to; a root of edge length 2^16 resolves within it
pub const MAX_TRAVERSAL_DEPTH: usize = 16;

/// Per level state of one ray traversal, indexed by level, level 0 is unused.
/// Replaces the call stack of a recursive descent.
pub(crate) struct TraversalStack {
    /// Distance of the child last accepted at the level, -1 if there is none yet
    pub(crate) best_distance: [f32; MAX_TRAVERSAL_DEPTH + 1],
    /// Minimum corner of the parent cube of the node at the level
    pub(crate) parent_min: [V3c<f32>; MAX_TRAVERSAL_DEPTH + 1],
    /// Record index of the parent node of the node at the level
    pub(crate) parent_index: [usize; MAX_TRAVERSAL_DEPTH + 1],
}

impl TraversalStack {
    pub(crate) fn new() -> Self {
        Self {
            best_distance: [-1.; MAX_TRAVERSAL_DEPTH + 1],
            parent_min: [V3c::unit(0.); MAX_TRAVERSAL_DEPTH + 1],
            parent_index: [0; MAX_TRAVERSAL_DEPTH + 1],
        }
    }
}

/// An occupied child of a node which intersects the ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ChildCandidate {
    /// Record index or material id, depending on the level
    pub(crate) slot: i32,
    pub(crate) bounds: Cube,
    pub(crate) intersection: CubeRayIntersection,
}

/// The voxel a ray resolved to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxelHit {
    pub material: u32,
    /// Bounds of the unit voxel which was hit
    pub bounds: Cube,
    /// Axis of the face plane the ray entered the voxel through
    pub axis: Axis,
    pub impact_point: V3c<f32>,
    /// Squared distance from the ray origin
    pub impact_distance: f32,
    pub iterations: u32,
}

/// Result of casting a ray into the octree
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraceOutcome {
    Hit(VoxelHit),
    /// Every occupied voxel is out of the way of the ray
    Miss { iterations: u32 },
    /// The ray was terminated because the octree is deeper than supported.
    /// Never happens with well formed buffers, so it signals corrupted data.
    DepthExceeded { iterations: u32 },
}

impl TraceOutcome {
    pub fn hit(&self) -> Option<&VoxelHit> {
        match self {
            TraceOutcome::Hit(hit) => Some(hit),
            _ => None,
        }
    }
}
