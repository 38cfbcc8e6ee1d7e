//! Scene container and nearest-hit queries.

use std::sync::Arc;

use crate::{Intersection, Lights, Material, Primitive};
use vitro_core::EnvironmentSampler;
use vitro_math::{Color, Ray, Vec3};

/// Index of a primitive within its scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub usize);

/// Nearest intersection found by [`Scene::nearest_hit`].
#[derive(Debug, Clone, Copy)]
pub struct SceneHit<'a> {
    pub object: ObjectId,
    pub material: &'a Material,
    pub intersection: Intersection,
}

/// Everything a ray can see. Read-only while rendering.
pub struct Scene {
    objects: Vec<Box<dyn Primitive>>,
    pub lights: Lights,
    /// Sampled by rays that leave the scene, in place of `background`
    pub environment: Option<Arc<dyn EnvironmentSampler>>,
    pub background: Color,
    /// Viewer position used for specular highlights
    pub eye: Vec3,
}

impl Scene {
    /// Create an empty scene with a black background.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            lights: Lights::default(),
            environment: None,
            background: Color::ZERO,
            eye: Vec3::ZERO,
        }
    }

    pub fn with_lights(mut self, lights: Lights) -> Self {
        self.lights = lights;
        self
    }

    pub fn with_environment(mut self, environment: Arc<dyn EnvironmentSampler>) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_eye(mut self, eye: Vec3) -> Self {
        self.eye = eye;
        self
    }

    /// Add a primitive, returning its id.
    pub fn add(&mut self, object: impl Primitive + 'static) -> ObjectId {
        self.objects.push(Box::new(object));
        ObjectId(self.objects.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, id: ObjectId) -> Option<&dyn Primitive> {
        self.objects.get(id.0).map(|object| object.as_ref())
    }

    /// Color seen by a ray that hits nothing.
    pub fn escape_color(&self, direction: Vec3) -> Color {
        match &self.environment {
            Some(environment) => environment.sample(direction),
            None => self.background,
        }
    }

    /// Find the closest object along a ray, skipping `exclude`.
    ///
    /// Every object is tested. Ties keep the object added first.
    pub fn nearest_hit(&self, origin: Vec3, direction: Vec3, exclude: Option<ObjectId>) -> Option<SceneHit<'_>> {
        let ray = Ray::new(origin, direction);
        let mut nearest: Option<SceneHit<'_>> = None;

        for (index, object) in self.objects.iter().enumerate() {
            let id = ObjectId(index);
            if exclude == Some(id) {
                continue;
            }

            let Some(intersection) = object.intersect(&ray) else {
                continue;
            };

            if nearest.map_or(true, |n| intersection.distance < n.intersection.distance) {
                nearest = Some(SceneHit {
                    object: id,
                    material: object.material(),
                    intersection,
                });
            }
        }

        nearest
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
