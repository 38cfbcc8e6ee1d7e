use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// Intersection code assumes `direction` is unit length. Reflection and
/// refraction already return normalized vectors; camera rays are normalized
/// when they are generated.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
