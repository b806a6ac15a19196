use crate::spatial::{math::V3c, raytracing::Ray};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

const WORLD_UP: V3c<f32> = V3c {
    x: 0.,
    y: 1.,
    z: 0.,
};

/// Pinhole camera generating one ray for each pixel of the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Camera {
    pub eye: V3c<f32>,
    pub target: V3c<f32>,
    /// Vertical field of view in radians
    pub fov: f32,
}

impl Camera {
    pub fn new(eye: V3c<f32>, target: V3c<f32>, fov: f32) -> Self {
        Self { eye, target, fov }
    }

    /// The ray through the center of the given pixel, row 0 being the top of the image.
    /// The result is undefined when the eye is at the target, or looks straight up or down.
    pub fn ray_for_pixel(&self, x: u32, y: u32, width: u32, height: u32) -> Ray {
        let forward = (self.target - self.eye).normalized();
        let right = forward.cross(WORLD_UP).normalized();
        let up = right.cross(forward);

        let half_height = (self.fov / 2.).tan();
        let half_width = half_height * width as f32 / height as f32;
        let screen_x = ((x as f32 + 0.5) / width as f32) * 2. - 1.;
        let screen_y = 1. - ((y as f32 + 0.5) / height as f32) * 2.;

        Ray {
            origin: self.eye,
            direction: (forward + right * (screen_x * half_width) + up * (screen_y * half_height))
                .normalized(),
        }
    }
}
