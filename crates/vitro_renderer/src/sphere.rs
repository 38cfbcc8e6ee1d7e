//! Sphere primitive for ray tracing.

use std::f32::consts::PI;
use std::sync::Arc;

use crate::{Intersection, Material, Primitive};
use vitro_math::{Ray, Vec2, Vec3};

/// A sphere primitive.
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Arc<Material>) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Get the UV coordinates for a unit normal.
    fn get_sphere_uv(n: Vec3) -> Vec2 {
        let u = 1.0 - (n.z.atan2(n.x) / (2.0 * PI) + 0.5);
        let v = (-n.y).clamp(-1.0, 1.0).acos() / PI;
        Vec2::new(u, v)
    }
}

impl Primitive for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        // Project the center onto the ray
        let l = self.center - ray.origin;
        let tca = l.dot(ray.direction);
        let d2 = (l.length_squared() - tca * tca).max(0.0);
        let r2 = self.radius * self.radius;

        if d2 > r2 {
            return None;
        }

        let thc = (r2 - d2).sqrt();
        let mut t = tca - thc;
        if t <= 0.0 {
            // Origin is inside the sphere (or past it)
            t = tca + thc;
        }
        if t <= 0.0 {
            return None;
        }

        let point = ray.at(t);
        let normal = (point - self.center).normalize_or_zero();

        Some(Intersection {
            distance: t,
            point,
            normal,
            uv: Some(Self::get_sphere_uv(normal)),
        })
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
