pub mod build;
pub mod raytracing;
pub mod types;


pub use crate::octree::build::OctreeBuilder;
pub use crate::octree::raytracing::{TraceOutcome, VoxelHit, MAX_TRAVERSAL_DEPTH};
pub use crate::octree::types::{Albedo, OctreeBuffer, OctreeError};
pub use crate::spatial::{math::vector::V3c, Cube};

/// Number of header values preceding the node records
pub const HEADER_SIZE: usize = 4;

/// Number of slots in one node record
pub const NODE_RECORD_SIZE: usize = 8;

/// Index of the root node record inside the buffer
pub const ROOT_NODE_INDEX: usize = HEADER_SIZE;

/// Slot value of empty octants
pub const EMPTY_SLOT: i32 = 0;

impl OctreeBuffer {
    /// Wraps the given buffer after checking its header
    /// The root edge length must be a power of two of at least 2, and resolvable
    /// within the supported traversal depth.
    /// Node records are not validated.
    pub fn new(data: Vec<i32>) -> Result<Self, OctreeError> {
        let buffer = Self::new_unchecked(data)?;
        let size = buffer.data[0];
        if size < 2 || !(size as u32).is_power_of_two() {
            return Err(OctreeError::InvalidSize(size as u32));
        }
        if Self::levels_for(size as u32) > MAX_TRAVERSAL_DEPTH {
            return Err(OctreeError::InvalidSize(size as u32));
        }
        Ok(buffer)
    }

    /// Wraps the given buffer only checking that the header and root record can be read
    pub fn new_unchecked(data: Vec<i32>) -> Result<Self, OctreeError> {
        if data.len() < HEADER_SIZE + NODE_RECORD_SIZE {
            return Err(OctreeError::InvalidBufferLength(data.len()));
        }
        Ok(Self { data })
    }

    /// Number of levels from a root of the given size down to the nodes of edge length 2
    pub(crate) fn levels_for(root_size: u32) -> usize {
        root_size.max(2).trailing_zeros() as usize
    }

    /// Edge length of the root cube
    pub fn root_size(&self) -> u32 {
        self.data[0] as u32
    }

    /// Minimum corner of the root cube
    pub fn root_min_position(&self) -> V3c<i32> {
        V3c::new(self.data[1], self.data[2], self.data[3])
    }

    pub fn root_bounds(&self) -> Cube {
        Cube {
            min_position: self.root_min_position().into(),
            size: self.data[0] as f32,
        }
    }

    /// The 8 slots of the node record starting at the given index,
    /// or None if the record is not inside the buffer
    pub fn node(&self, index: usize) -> Option<&[i32]> {
        if index < HEADER_SIZE {
            return None;
        }
        self.data.get(index..index.checked_add(NODE_RECORD_SIZE)?)
    }
}
