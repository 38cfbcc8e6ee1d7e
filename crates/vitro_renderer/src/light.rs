//! Light sources.

use vitro_math::{Color, Vec3};

/// Constant light added to every opaque surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub strength: f32,
    pub color: Color,
}

impl AmbientLight {
    pub fn new(strength: f32, color: Color) -> Self {
        Self { strength, color }
    }

    /// strength * color
    pub fn contribution(&self) -> Color {
        self.strength * self.color
    }
}

/// Infinitely distant light shining along a fixed direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Direction the light travels in (unit length)
    direction: Vec3,
    pub intensity: f32,
    pub color: Color,
}

impl DirectionalLight {
    /// Create a directional light; `direction` is normalized here.
    pub fn new(direction: Vec3, intensity: f32, color: Color) -> Self {
        Self {
            direction: direction.normalize_or_zero(),
            intensity,
            color,
        }
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }
}

/// Light at a position. No distance falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: f32,
    pub color: Color,
}

impl PointLight {
    pub fn new(position: Vec3, intensity: f32, color: Color) -> Self {
        Self {
            position,
            intensity,
            color,
        }
    }
}

/// The lights of a scene.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lights {
    pub ambient: Option<AmbientLight>,
    pub directional: Option<DirectionalLight>,
    pub points: Vec<PointLight>,
}

impl Lights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of configured lights.
    pub fn len(&self) -> usize {
        self.ambient.is_some() as usize + self.directional.is_some() as usize + self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
