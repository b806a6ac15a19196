use crate::octree::{
    raytracing::MAX_TRAVERSAL_DEPTH, OctreeBuffer, OctreeError, EMPTY_SLOT, HEADER_SIZE,
    NODE_RECORD_SIZE, ROOT_NODE_INDEX,
};
use crate::spatial::{math::V3c, VoxelBounds};

/// Largest absolute voxel coordinate, so every position stays exact in f32
pub const MAX_COORDINATE: i32 = 1 << 24;

/// Largest root edge length the traversal can resolve
pub const MAX_ROOT_SIZE: u32 = 1 << MAX_TRAVERSAL_DEPTH;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Slot {
    #[default]
    Empty,
    Node(usize),
    Voxel(u32),
}

/// Collects voxels into a pointer based octree, which can then be serialized
/// into the flat buffer layout the raytracing works on.
/// The root grows towards inserted positions outside of it, so the covered area
/// does not need to be known in advance.
#[derive(Debug, Default, Clone)]
pub struct OctreeBuilder {
    root: Option<(usize, VoxelBounds)>,
    nodes: Vec<[Slot; 8]>,
    voxel_count: usize,
}

impl OctreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The area covered by the root node, if there is one yet
    pub fn bounds(&self) -> Option<VoxelBounds> {
        self.root.map(|(_, bounds)| bounds)
    }

    /// Number of occupied voxels
    pub fn voxel_count(&self) -> usize {
        self.voxel_count
    }

    fn push_node(&mut self) -> usize {
        self.nodes.push([Slot::Empty; 8]);
        self.nodes.len() - 1
    }

    /// Sets the voxel at the given position to the given material.
    /// Material 0 marks empty octants inside the buffer, so it can not be inserted.
    pub fn insert(&mut self, position: &V3c<i32>, material: u32) -> Result<(), OctreeError> {
        if 0 == material || material > i32::MAX as u32 {
            return Err(OctreeError::InvalidMaterial(material));
        }
        let out_of_range = OctreeError::InvalidPosition {
            x: position.x,
            y: position.y,
            z: position.z,
        };
        if (0..3).any(|axis| position[axis].unsigned_abs() > MAX_COORDINATE as u32) {
            return Err(out_of_range);
        }

        let current_root = self.root.map(|(_, bounds)| bounds).unwrap_or(VoxelBounds {
            min_position: *position - position.rem_euclid(&2),
            size: 2,
        });

        // Find the root size required before changing anything
        let mut required_root = current_root;
        while !required_root.contains(position) {
            required_root = required_root.expand_towards(position);
            if required_root.size > MAX_ROOT_SIZE {
                return Err(out_of_range);
            }
        }

        let (mut root_key, mut root_bounds) = match self.root {
            Some(root) => root,
            None => (self.push_node(), current_root),
        };
        while root_bounds != required_root {
            let expanded = root_bounds.expand_towards(position);
            let parent_key = self.push_node();
            let previous_root_octant = expanded.octant_for(&root_bounds.min_position);
            self.nodes[parent_key][previous_root_octant as usize] = Slot::Node(root_key);
            root_key = parent_key;
            root_bounds = expanded;
        }
        self.root = Some((root_key, root_bounds));

        let mut node_key = root_key;
        let mut node_bounds = root_bounds;
        while node_bounds.size > 2 {
            let octant = node_bounds.octant_for(position);
            node_key = match self.nodes[node_key][octant as usize] {
                Slot::Node(child_key) => child_key,
                _ => {
                    let child_key = self.push_node();
                    self.nodes[node_key][octant as usize] = Slot::Node(child_key);
                    child_key
                }
            };
            node_bounds = node_bounds.child_bounds_for(octant);
        }

        let octant = node_bounds.octant_for(position) as usize;
        if Slot::Empty == self.nodes[node_key][octant] {
            self.voxel_count += 1;
        }
        self.nodes[node_key][octant] = Slot::Voxel(material);
        Ok(())
    }

    /// The material of the voxel at the given position, if it is occupied
    pub fn get(&self, position: &V3c<i32>) -> Option<u32> {
        let (mut node_key, mut node_bounds) = self.root?;
        if !node_bounds.contains(position) {
            return None;
        }
        loop {
            let octant = node_bounds.octant_for(position);
            match self.nodes[node_key][octant as usize] {
                Slot::Empty => return None,
                Slot::Voxel(material) => return Some(material),
                Slot::Node(child_key) => {
                    node_key = child_key;
                    node_bounds = node_bounds.child_bounds_for(octant);
                }
            }
        }
    }

    /// Flattens the octree into the buffer layout of OctreeBuffer.
    /// The root record is at ROOT_NODE_INDEX, the other records follow in depth-first order,
    /// numbered when their parent is visited: all children of a node get consecutive records.
    pub fn serialize(&self) -> Result<Vec<i32>, OctreeError> {
        let (root_key, root_bounds) = self.root.ok_or(OctreeError::EmptyOctree)?;

        let mut record_index = vec![None; self.nodes.len()];
        let mut record_order = vec![root_key];
        record_index[root_key] = Some(ROOT_NODE_INDEX);
        let mut node_stack = vec![root_key];
        while let Some(node_key) = node_stack.pop() {
            for slot in self.nodes[node_key].iter() {
                if let Slot::Node(child_key) = slot {
                    record_index[*child_key] =
                        Some(HEADER_SIZE + record_order.len() * NODE_RECORD_SIZE);
                    record_order.push(*child_key);
                    node_stack.push(*child_key);
                }
            }
        }

        let buffer_length = HEADER_SIZE + record_order.len() * NODE_RECORD_SIZE;
        if buffer_length > i32::MAX as usize {
            return Err(OctreeError::InvalidBufferLength(buffer_length));
        }

        let mut data = Vec::with_capacity(buffer_length);
        data.push(root_bounds.size as i32);
        data.push(root_bounds.min_position.x);
        data.push(root_bounds.min_position.y);
        data.push(root_bounds.min_position.z);
        for node_key in record_order {
            data.extend(self.nodes[node_key].iter().map(|slot| match slot {
                Slot::Empty => EMPTY_SLOT,
                Slot::Voxel(material) => *material as i32,
                Slot::Node(child_key) => record_index[*child_key].map_or(EMPTY_SLOT, |i| i as i32),
            }));
        }
        Ok(data)
    }

    /// Serializes the collected voxels into an octree buffer
    pub fn build(&self) -> Result<OctreeBuffer, OctreeError> {
        OctreeBuffer::new(self.serialize()?)
    }
}
