//! Primitive trait and Intersection for ray-object intersection.

use crate::Material;
use vitro_math::{Ray, Vec2, Vec3};

/// Record of a ray-primitive intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Distance along the ray (always > 0)
    pub distance: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Unit surface normal as the primitive defines it.
    ///
    /// Not flipped towards the ray: spheres and boxes report the outward
    /// normal, planes their configured normal.
    pub normal: Vec3,
    /// Texture coordinates, if the primitive has a parameterization
    pub uv: Option<Vec2>,
}

/// Trait for scene objects that can be hit by rays.
pub trait Primitive: Send + Sync {
    /// Nearest intersection in front of the ray origin, if any.
    fn intersect(&self, ray: &Ray) -> Option<Intersection>;

    /// Material shared by the whole primitive.
    fn material(&self) -> &Material;
}
