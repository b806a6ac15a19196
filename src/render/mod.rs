pub mod camera;
mod tests;

pub use crate::render::camera::Camera;

use crate::octree::{raytracing::MAX_TRAVERSAL_DEPTH, Albedo, OctreeBuffer, TraceOutcome};
use crate::texture::LayeredTexture;
use image::RgbaImage;
use log::{debug, warn};
use rayon::prelude::*;
use std::time::Instant;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Edge length of the square pixel tiles the image is rendered in
pub const TILE_SIZE: usize = 8;

const BYTES_PER_PIXEL: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Color of pixels whose ray hits nothing
    pub background: Albedo,
    /// Rays are terminated below this level of the octree
    pub max_depth: usize,
    /// Brighten missed pixels by the number of traversal iterations spent on them
    pub iteration_heatmap: bool,
    /// Brightness added for each iteration in heatmap mode
    pub heatmap_step: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            background: Albedo::BLACK,
            max_depth: MAX_TRAVERSAL_DEPTH,
            iteration_heatmap: false,
            heatmap_step: 8,
        }
    }
}

impl RenderConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_background(mut self, background: Albedo) -> Self {
        self.background = background;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.clamp(1, MAX_TRAVERSAL_DEPTH);
        self
    }

    pub fn with_iteration_heatmap(mut self, enabled: bool) -> Self {
        self.iteration_heatmap = enabled;
        self
    }

    pub fn with_heatmap_step(mut self, step: u32) -> Self {
        self.heatmap_step = step;
        self
    }
}

/// Renders the octree as seen through the camera.
/// The image is processed in bands of TILE_SIZE rows in parallel, each band tile by tile.
/// Every pixel is written once by the band owning it; the octree and the textures are only read.
pub fn render<T: LayeredTexture + Sync + ?Sized>(
    octree: &OctreeBuffer,
    textures: &T,
    camera: &Camera,
    config: &RenderConfig,
) -> RgbaImage {
    let started = Instant::now();
    let width = config.width as usize;
    let mut image = RgbaImage::new(config.width, config.height);
    if 0 == config.width || 0 == config.height {
        return image;
    }

    let pixels: &mut [u8] = &mut image;
    let band_length = TILE_SIZE * width * BYTES_PER_PIXEL;
    let depth_exceeded: usize = pixels
        .par_chunks_mut(band_length)
        .enumerate()
        .map(|(band_index, band)| {
            let band_y = band_index * TILE_SIZE;
            let band_height = band.len() / (width * BYTES_PER_PIXEL);
            let mut depth_exceeded = 0;
            for tile_x in (0..width).step_by(TILE_SIZE) {
                for y in 0..band_height {
                    for x in tile_x..(tile_x + TILE_SIZE).min(width) {
                        let ray = camera.ray_for_pixel(
                            x as u32,
                            (band_y + y) as u32,
                            config.width,
                            config.height,
                        );
                        let outcome = octree.get_by_ray_within(&ray, config.max_depth);
                        if matches!(outcome, TraceOutcome::DepthExceeded { .. }) {
                            depth_exceeded += 1;
                        }
                        let color = outcome.shade(textures, config);
                        let offset = (y * width + x) * BYTES_PER_PIXEL;
                        band[offset..offset + BYTES_PER_PIXEL]
                            .copy_from_slice(&[color.r, color.g, color.b, color.a]);
                    }
                }
            }
            depth_exceeded
        })
        .sum();

    if 0 < depth_exceeded {
        warn!(
            "{depth_exceeded} rays exceeded the maximum traversal depth of {}; the octree buffer is likely corrupted",
            config.max_depth
        );
    }
    debug!(
        "rendered {}x{} pixels in {:?}",
        config.width,
        config.height,
        started.elapsed()
    );
    image
}
