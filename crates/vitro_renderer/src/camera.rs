//! Pinhole camera for primary ray generation.

use vitro_math::{Ray, Vec3};

/// Pinhole camera looking down -Z.
///
/// Pixel `(0, 0)` is the bottom-left corner of the image; `y` grows upwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub width: u32,
    pub height: u32,
}

impl Camera {
    /// Create a camera at the origin with a 60 degree field of view.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Vec3::ZERO,
            fov: 60.0,
            width,
            height,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }

    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Ray through the center of pixel `(x, y)`.
    pub fn primary_ray(&self, x: u32, y: u32) -> Ray {
        let scale = (self.fov.to_radians() / 2.0).tan();
        let width = self.width.max(1) as f32;
        let height = self.height.max(1) as f32;

        let px = (2.0 * (x as f32 + 0.5) / width - 1.0) * scale * self.aspect_ratio();
        let py = (2.0 * (y as f32 + 0.5) / height - 1.0) * scale;

        Ray::new(self.position, Vec3::new(px, py, -1.0).normalize_or_zero())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(512, 512)
    }
}
