// TODO:
// - Bilinear filtering for texture layers with a resolution above 1
// - Reuse TraversalStack across the rays of one tile instead of creating it per ray

pub mod octree;
pub mod render;
pub mod spatial;
pub mod texture;
