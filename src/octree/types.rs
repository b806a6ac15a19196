use std::fmt;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// error types during usage or creation of the octree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OctreeError {
    /// Root edge length is not a power of two, or needs more levels than the traversal supports
    InvalidSize(u32),
    /// The buffer can not hold the header and the root node record
    InvalidBufferLength(usize),
    /// Material id 0 is reserved for empty octants
    InvalidMaterial(u32),
    /// The position can not be covered by a root of a supported size
    InvalidPosition { x: i32, y: i32, z: i32 },
    /// Nothing was inserted, so there is no root to serialize
    EmptyOctree,
}

impl fmt::Display for OctreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OctreeError::InvalidSize(size) => write!(f, "invalid octree size: {size}"),
            OctreeError::InvalidBufferLength(length) => {
                write!(f, "octree buffer of length {length} is too short")
            }
            OctreeError::InvalidMaterial(material) => {
                write!(f, "invalid material id: {material}")
            }
            OctreeError::InvalidPosition { x, y, z } => {
                write!(f, "position ({x}, {y}, {z}) is out of the supported range")
            }
            OctreeError::EmptyOctree => write!(f, "octree contains no voxels"),
        }
    }
}

impl std::error::Error for OctreeError {}

/// Flat, read-only representation of a sparse voxel octree.
/// Layout:
/// - index 0: edge length of the root cube, a power of two
/// - index 1..4: minimum corner of the root cube
/// - from index 4: node records of 8 slots, one for each octant.
///   A slot is 0 if the octant is empty, otherwise it is the index of the child
///   node record, or the material id of the voxel in nodes of edge length 2.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct OctreeBuffer {
    pub(crate) data: Vec<i32>,
}

/// Color in 0-255 RGBA
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Albedo {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Albedo {
    pub const BLACK: Albedo = Albedo {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };
}

/// Parses colors in 0xRRGGBBAA format
impl From<u32> for Albedo {
    fn from(value: u32) -> Self {
        let [r, g, b, a] = value.to_be_bytes();
        Albedo { r, g, b, a }
    }
}

impl From<image::Rgba<u8>> for Albedo {
    fn from(pixel: image::Rgba<u8>) -> Self {
        let [r, g, b, a] = pixel.0;
        Albedo { r, g, b, a }
    }
}

impl From<Albedo> for image::Rgba<u8> {
    fn from(albedo: Albedo) -> Self {
        image::Rgba([albedo.r, albedo.g, albedo.b, albedo.a])
    }
}
