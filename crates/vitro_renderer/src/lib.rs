//! Vitro Renderer - Whitted-style recursive ray tracing
//!
//! Spheres, infinite planes and axis-aligned boxes, lit by ambient,
//! directional and point lights with hard shadows. Mirrors and glass are
//! handled by recursive reflection and refraction rays.
//!
//! Scenes are assembled either by hand through [`Scene::add`] or from a
//! scene file with [`load_scene_file`].

mod camera;
mod cuboid;
mod integrator;
mod light;
mod loader;
mod material;
mod plane;
mod primitive;
mod renderer;
mod scene;
mod sphere;

pub use camera::Camera;
pub use cuboid::Cuboid;
pub use integrator::{cast_ray, direct_lighting, shade_light, LightSample, BIAS, MAX_RECURSION_DEPTH};
pub use light::{AmbientLight, DirectionalLight, Lights, PointLight};
pub use loader::{build_scene, load_scene_file, LoadError, LoadResult};
pub use material::{Material, MaterialKind};
pub use plane::Plane;
pub use primitive::{Intersection, Primitive};
pub use renderer::{
    color_to_rgb8, render, render_image, render_pixel, FrameSink, ImageBuffer, OutputError, OutputResult,
    RenderConfig, RenderStats,
};
pub use scene::{ObjectId, Scene, SceneHit};
pub use sphere::Sphere;

/// Re-export common math types from vitro_math
pub use vitro_math::{Color, Ray, Vec2, Vec3};
