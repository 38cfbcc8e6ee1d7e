//! Vector math for the Vitro ray tracer.
//!
//! Vectors, points, normals and colors all share glam's `Vec3`.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod optics;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use optics::{fresnel, reflect, refract};
pub use ray::Ray;

/// Color type alias.
///
/// Channels are stored in RGB order (`x` = red, `y` = green, `z` = blue),
/// nominally in [0, 1]. Only the image encoder deals with byte order.
pub type Color = Vec3;
