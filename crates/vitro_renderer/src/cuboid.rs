//! Axis-aligned box primitive.
//!
//! The box is six face planes with outward normals. A plane hit counts when
//! it lands inside the box bounds grown by a small margin, which keeps hits
//! on edges and corners from slipping through rounding.

use std::sync::Arc;

use crate::plane::intersect_plane;
use crate::{Intersection, Material, Primitive};
use vitro_math::{Aabb, Ray, Vec2, Vec3};

/// Margin added to the bounds on every side.
const BOUNDS_EPSILON: f32 = 1e-3;

#[derive(Debug, Clone, Copy)]
struct Face {
    position: Vec3,
    normal: Vec3,
    /// Axes spanning the face, used for UVs
    uv_axes: (usize, usize),
}

/// An axis-aligned box.
pub struct Cuboid {
    center: Vec3,
    half_extents: Vec3,
    faces: [Face; 6],
    bounds: Aabb,
    material: Arc<Material>,
}

impl Cuboid {
    /// Create a box centered at `center` with full edge lengths `size`.
    pub fn new(center: Vec3, size: Vec3, material: Arc<Material>) -> Self {
        let half_extents = size.abs() / 2.0;
        let face = |axis: usize, sign: f32| {
            let mut normal = Vec3::ZERO;
            normal[axis] = sign;
            let uv_axes = match axis {
                0 => (1, 2),
                1 => (0, 2),
                _ => (0, 1),
            };
            Face {
                position: center + normal * half_extents,
                normal,
                uv_axes,
            }
        };

        Self {
            center,
            half_extents,
            faces: [
                face(0, 1.0),
                face(0, -1.0),
                face(1, 1.0),
                face(1, -1.0),
                face(2, 1.0),
                face(2, -1.0),
            ],
            bounds: Aabb::from_center_half_extents(center, half_extents).expand(BOUNDS_EPSILON),
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// Padded bounds used for the inside test and UVs.
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// UV from the two axes spanning the face, as fractions of the bounds.
    fn face_uv(&self, face: &Face, point: Vec3) -> Vec2 {
        let (a, b) = face.uv_axes;
        Vec2::new(
            self.bounds.axis_interval(a).fraction(point[a]),
            self.bounds.axis_interval(b).fraction(point[b]),
        )
    }
}

impl Primitive for Cuboid {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let mut nearest: Option<Intersection> = None;

        for face in &self.faces {
            let Some(hit) = intersect_plane(ray, face.position, face.normal) else {
                continue;
            };
            if !self.bounds.contains_point(hit.point) {
                continue;
            }
            // Strict: equal distances keep the earlier face
            if nearest.map_or(true, |n| hit.distance < n.distance) {
                nearest = Some(Intersection {
                    uv: Some(self.face_uv(face, hit.point)),
                    ..hit
                });
            }
        }

        nearest
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
