//! Surface materials.

use std::fmt;
use std::sync::Arc;

use vitro_core::TextureSampler;
use vitro_math::{Color, Vec2};

/// How a surface treats an incoming ray.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MaterialKind {
    /// Lit directly by the scene lights
    #[default]
    Opaque,
    /// Perfect mirror
    Reflective,
    /// Glass-like: Fresnel blend of reflection and refraction
    Transparent,
}

/// Surface appearance, shared by reference between primitives.
#[derive(Clone)]
pub struct Material {
    /// Base color (RGB, 0-1), applied to every shaded result
    pub diffuse: Color,
    /// Specular (Phong) exponent
    pub specular: f32,
    /// Index of refraction, used by transparent materials
    pub ior: f32,
    pub kind: MaterialKind,
    pub texture: Option<Arc<dyn TextureSampler>>,
}

impl Material {
    /// An opaque material with the given base color.
    pub fn opaque(diffuse: Color) -> Self {
        Self {
            diffuse,
            ..Default::default()
        }
    }

    /// A mirror.
    pub fn reflective() -> Self {
        Self {
            kind: MaterialKind::Reflective,
            ..Default::default()
        }
    }

    /// A transparent material with the given index of refraction.
    pub fn transparent(ior: f32) -> Self {
        Self {
            kind: MaterialKind::Transparent,
            ior,
            ..Default::default()
        }
    }

    pub fn with_diffuse(mut self, diffuse: Color) -> Self {
        self.diffuse = diffuse;
        self
    }

    pub fn with_specular(mut self, specular: f32) -> Self {
        self.specular = specular;
        self
    }

    pub fn with_texture(mut self, texture: Arc<dyn TextureSampler>) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Texture color at `uv`.
    ///
    /// `None` unless the material has a texture and the hit has UVs.
    pub fn surface_color(&self, uv: Option<Vec2>) -> Option<Color> {
        match (&self.texture, uv) {
            (Some(texture), Some(uv)) => Some(texture.sample(uv.x, uv.y)),
            _ => None,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: Color::ONE,
            specular: 0.0,
            ior: 1.0,
            kind: MaterialKind::Opaque,
            texture: None,
        }
    }
}

impl fmt::Debug for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Material")
            .field("diffuse", &self.diffuse)
            .field("specular", &self.specular)
            .field("ior", &self.ior)
            .field("kind", &self.kind)
            .field("textured", &self.texture.is_some())
            .finish()
    }
}
