//! Infinite plane primitive.

use std::sync::Arc;

use crate::{Intersection, Material, Primitive};
use vitro_math::{Ray, Vec3};

/// Denominators below this count as a ray parallel to the plane.
const PARALLEL_EPSILON: f32 = 1e-4;

/// An infinite plane through `position` with unit `normal`.
pub struct Plane {
    position: Vec3,
    normal: Vec3,
    material: Arc<Material>,
}

impl Plane {
    /// Create a new plane; `normal` is normalized here.
    pub fn new(position: Vec3, normal: Vec3, material: Arc<Material>) -> Self {
        Self {
            position,
            normal: normal.normalize_or_zero(),
            material,
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

/// Ray-plane intersection shared with the box faces.
///
/// `t = n·(p - o) / n·d`, rejected when the ray is (nearly) parallel or the
/// plane is not strictly in front of the origin.
pub(crate) fn intersect_plane(ray: &Ray, position: Vec3, normal: Vec3) -> Option<Intersection> {
    let denom = ray.direction.dot(normal);
    if denom.abs() <= PARALLEL_EPSILON {
        return None;
    }

    let t = normal.dot(position - ray.origin) / denom;
    if t <= 0.0 {
        return None;
    }

    Some(Intersection {
        distance: t,
        point: ray.at(t),
        normal,
        uv: None,
    })
}

impl Primitive for Plane {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        intersect_plane(ray, self.position, self.normal)
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
