//! Scene description types.
//!
//! This module defines the on-disk (JSON) form of a scene: image size,
//! camera, materials, objects and lights. It is renderer-agnostic; the
//! renderer assembles its own scene from a validated description.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while reading or validating a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid image size {width}x{height}")]
    InvalidImageSize { width: u32, height: u32 },

    #[error("Invalid field of view {0} (expected 0 < fov < 180)")]
    InvalidFov(f32),

    #[error("Invalid material '{name}': {reason}")]
    InvalidMaterial { name: String, reason: String },

    #[error("Object {index} references unknown material '{material}'")]
    UnknownMaterial { index: usize, material: String },

    #[error("Invalid object {index}: {reason}")]
    InvalidObject { index: usize, reason: String },

    #[error("Invalid light: {0}")]
    InvalidLight(String),
}

/// Result type for scene description operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Output image size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageDesc {
    pub width: u32,
    pub height: u32,
}

impl Default for ImageDesc {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
        }
    }
}

/// Pinhole camera looking down -Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDesc {
    pub position: [f32; 3],

    /// Vertical field of view in degrees
    pub fov: f32,
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            fov: 60.0,
        }
    }
}

/// How a surface treats incoming rays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKindDesc {
    #[default]
    Opaque,
    Reflective,
    Transparent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialDesc {
    /// Base color (RGB, 0-1)
    pub diffuse: [f32; 3],

    /// Specular exponent
    pub spec: f32,

    /// Index of refraction (transparent materials only)
    pub ior: f32,

    pub kind: MaterialKindDesc,

    /// Path to a texture image
    pub texture: Option<String>,
}

impl Default for MaterialDesc {
    fn default() -> Self {
        Self {
            diffuse: [1.0, 1.0, 1.0],
            spec: 0.0,
            ior: 1.0,
            kind: MaterialKindDesc::Opaque,
            texture: None,
        }
    }
}

/// A primitive and the name of its material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectDesc {
    Sphere {
        center: [f32; 3],
        radius: f32,
        material: String,
    },
    Plane {
        position: [f32; 3],
        normal: [f32; 3],
        material: String,
    },
    /// Axis-aligned box; `size` is the full edge length per axis.
    Cube {
        position: [f32; 3],
        size: [f32; 3],
        material: String,
    },
}

impl ObjectDesc {
    /// Name of the material this object uses.
    pub fn material(&self) -> &str {
        match self {
            ObjectDesc::Sphere { material, .. }
            | ObjectDesc::Plane { material, .. }
            | ObjectDesc::Cube { material, .. } => material,
        }
    }

    fn check(&self) -> Result<(), String> {
        match self {
            ObjectDesc::Sphere { radius, .. } if !(*radius > 0.0) => {
                Err(format!("sphere radius must be positive, got {radius}"))
            }
            ObjectDesc::Plane { normal, .. } if normal.iter().all(|c| *c == 0.0) => {
                Err("plane normal must not be zero".to_string())
            }
            ObjectDesc::Cube { size, .. } if size.iter().any(|c| !(*c > 0.0)) => {
                Err(format!("cube size must be positive on every axis, got {size:?}"))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientLightDesc {
    pub strength: f32,
    pub color: [f32; 3],
}

impl Default for AmbientLightDesc {
    fn default() -> Self {
        Self {
            strength: 0.0,
            color: [1.0, 1.0, 1.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionalLightDesc {
    pub direction: [f32; 3],
    pub intensity: f32,
    pub color: [f32; 3],
}

impl Default for DirectionalLightDesc {
    fn default() -> Self {
        Self {
            direction: [0.0, -1.0, 0.0],
            intensity: 1.0,
            color: [1.0, 1.0, 1.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointLightDesc {
    pub position: [f32; 3],
    pub intensity: f32,
    pub color: [f32; 3],
}

impl Default for PointLightDesc {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            intensity: 1.0,
            color: [1.0, 1.0, 1.0],
        }
    }
}

/// At most one ambient and one directional light, any number of point lights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightsDesc {
    pub ambient: Option<AmbientLightDesc>,
    pub directional: Option<DirectionalLightDesc>,
    pub points: Vec<PointLightDesc>,
}

/// A complete scene as read from a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub image: ImageDesc,
    pub camera: CameraDesc,

    /// Color of rays that escape the scene when there is no environment map
    pub background: [f32; 3],

    /// Path to an equirectangular environment image
    pub environment: Option<String>,

    pub materials: BTreeMap<String, MaterialDesc>,
    pub objects: Vec<ObjectDesc>,
    pub lights: LightsDesc,
}

impl Default for SceneDescription {
    fn default() -> Self {
        Self {
            image: ImageDesc::default(),
            camera: CameraDesc::default(),
            background: [0.0, 0.0, 0.0],
            environment: None,
            materials: BTreeMap::new(),
            objects: Vec::new(),
            lights: LightsDesc::default(),
        }
    }
}

impl SceneDescription {
    /// Parse a scene from JSON text and validate it.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        let desc: SceneDescription = serde_json::from_str(json)?;
        desc.validate()?;
        Ok(desc)
    }

    /// Read, parse and validate a scene file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> SceneResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let desc = Self::from_json_str(&text)?;

        log::info!(
            "Loaded scene {}: {} materials, {} objects, {} point lights",
            path.as_ref().display(),
            desc.materials.len(),
            desc.objects.len(),
            desc.lights.points.len()
        );

        Ok(desc)
    }

    /// Serialize the scene to pretty-printed JSON.
    pub fn to_json_string(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check everything the renderer relies on without re-checking.
    ///
    /// An empty scene is valid; it renders as background.
    pub fn validate(&self) -> SceneResult<()> {
        let ImageDesc { width, height } = self.image;
        if width == 0 || height == 0 {
            return Err(SceneError::InvalidImageSize { width, height });
        }

        let fov = self.camera.fov;
        if !(fov > 0.0 && fov < 180.0) {
            return Err(SceneError::InvalidFov(fov));
        }

        for (name, material) in &self.materials {
            let reason = if !(material.ior > 0.0) {
                Some(format!("ior must be positive, got {}", material.ior))
            } else if !(material.spec >= 0.0) {
                Some(format!("spec must not be negative, got {}", material.spec))
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(SceneError::InvalidMaterial {
                    name: name.clone(),
                    reason,
                });
            }
        }

        for (index, object) in self.objects.iter().enumerate() {
            if !self.materials.contains_key(object.material()) {
                return Err(SceneError::UnknownMaterial {
                    index,
                    material: object.material().to_string(),
                });
            }
            object
                .check()
                .map_err(|reason| SceneError::InvalidObject { index, reason })?;
        }

        if let Some(directional) = &self.lights.directional {
            if directional.direction.iter().all(|c| *c == 0.0) {
                return Err(SceneError::InvalidLight(
                    "directional light direction must not be zero".to_string(),
                ));
            }
        }

        Ok(())
    }
}
