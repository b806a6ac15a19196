pub mod raytracing_on_cpu;
pub mod types;

pub use crate::octree::raytracing::types::{TraceOutcome, VoxelHit, MAX_TRAVERSAL_DEPTH};
pub use crate::spatial::raytracing::{Axis, Ray};
