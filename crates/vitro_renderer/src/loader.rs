//! Build a renderable scene from a scene description.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::{
    AmbientLight, Camera, Cuboid, DirectionalLight, Lights, Material, MaterialKind, Plane, PointLight,
    Scene, Sphere,
};
use thiserror::Error;
use vitro_core::scene::{LightsDesc, MaterialDesc, MaterialKindDesc, ObjectDesc};
use vitro_core::{EnvironmentMap, SceneDescription, SceneError, TextureCache, TextureError, TextureSampler};
use vitro_math::{Color, Vec3};

/// Errors from assembling a scene.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Texture(#[from] TextureError),

    #[error("Object {index} references unknown material '{material}'")]
    UnknownMaterial { index: usize, material: String },
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Read, validate and assemble a scene file.
///
/// Texture and environment paths are resolved against the file's directory.
pub fn load_scene_file(path: impl AsRef<Path>) -> LoadResult<(Scene, Camera)> {
    let path = path.as_ref();
    let desc = SceneDescription::from_file(path)?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut cache = TextureCache::with_base_dir(base_dir);
    build_scene(&desc, &mut cache)
}

/// Assemble a validated description into a scene and camera.
///
/// Each material is built once and shared by every object naming it.
pub fn build_scene(desc: &SceneDescription, cache: &mut TextureCache) -> LoadResult<(Scene, Camera)> {
    let mut materials = HashMap::with_capacity(desc.materials.len());
    for (name, material) in &desc.materials {
        materials.insert(name.as_str(), Arc::new(build_material(material, cache)?));
    }

    let eye = Vec3::from(desc.camera.position);
    let mut scene = Scene::new()
        .with_background(Color::from(desc.background))
        .with_lights(build_lights(&desc.lights))
        .with_eye(eye);

    if let Some(path) = &desc.environment {
        let texture = cache.load(path)?;
        scene = scene.with_environment(Arc::new(EnvironmentMap::new(texture)));
    }

    for (index, object) in desc.objects.iter().enumerate() {
        let material = materials
            .get(object.material())
            .cloned()
            .ok_or_else(|| LoadError::UnknownMaterial {
                index,
                material: object.material().to_string(),
            })?;

        match object {
            ObjectDesc::Sphere { center, radius, .. } => {
                scene.add(Sphere::new(Vec3::from(*center), *radius, material));
            }
            ObjectDesc::Plane { position, normal, .. } => {
                scene.add(Plane::new(Vec3::from(*position), Vec3::from(*normal), material));
            }
            ObjectDesc::Cube { position, size, .. } => {
                scene.add(Cuboid::new(Vec3::from(*position), Vec3::from(*size), material));
            }
        }
    }

    let camera = Camera::new(desc.image.width, desc.image.height)
        .with_position(eye)
        .with_fov(desc.camera.fov);

    log::info!(
        "Built scene: {} objects, {} lights, {} textures",
        scene.len(),
        scene.lights.len(),
        cache.len()
    );

    Ok((scene, camera))
}

fn build_material(desc: &MaterialDesc, cache: &mut TextureCache) -> LoadResult<Material> {
    let kind = match desc.kind {
        MaterialKindDesc::Opaque => MaterialKind::Opaque,
        MaterialKindDesc::Reflective => MaterialKind::Reflective,
        MaterialKindDesc::Transparent => MaterialKind::Transparent,
    };

    let texture: Option<Arc<dyn TextureSampler>> = match &desc.texture {
        Some(path) => Some(cache.load(path)?),
        None => None,
    };

    Ok(Material {
        diffuse: Color::from(desc.diffuse),
        specular: desc.spec,
        ior: desc.ior,
        kind,
        texture,
    })
}

fn build_lights(desc: &LightsDesc) -> Lights {
    Lights {
        ambient: desc
            .ambient
            .map(|light| AmbientLight::new(light.strength, Color::from(light.color))),
        directional: desc.directional.map(|light| {
            DirectionalLight::new(Vec3::from(light.direction), light.intensity, Color::from(light.color))
        }),
        points: desc
            .points
            .iter()
            .map(|light| PointLight::new(Vec3::from(light.position), light.intensity, Color::from(light.color)))
            .collect(),
    }
}
