//! Texture sampling for materials and environment lookups.
//!
//! The renderer only sees the [`TextureSampler`] and [`EnvironmentSampler`]
//! contracts. [`Texture`], [`EnvironmentMap`] and [`TextureCache`] are the
//! image-backed implementations used when scenes are loaded from disk.

use std::collections::HashMap;
use std::f32::consts::PI;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use vitro_math::{Color, Vec3};

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture: {0}")]
    LoadError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Pixel data does not match {width}x{height}: got {len} bytes")]
    SizeMismatch { width: u32, height: u32, len: usize },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// Surface color lookup by UV coordinates.
///
/// Must be total over the unit square; wrapping outside of it is up to the
/// implementation.
pub trait TextureSampler: Send + Sync {
    fn sample(&self, u: f32, v: f32) -> Color;
}

/// Background color lookup for rays that leave the scene.
///
/// Must be total over all unit directions.
pub trait EnvironmentSampler: Send + Sync {
    fn sample(&self, direction: Vec3) -> Color;
}

/// A loaded texture with pixel data.
///
/// Pixels are RGB in [0, 1], stored row-major from the top row down. Values
/// are plain byte / 255 with no gamma conversion, so what is read from disk
/// is what ends up in the output image.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    pub pixels: Vec<Color>,

    /// Original file path (for debugging)
    pub path: String,
}

impl Texture {
    /// Create a new texture from pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<Color>, path: impl Into<String>) -> Self {
        Self {
            width,
            height,
            pixels,
            path: path.into(),
        }
    }

    /// Create a solid color texture (1x1).
    pub fn solid_color(color: Color) -> Self {
        Self::new(1, 1, vec![color], "<solid>")
    }

    /// Create a texture from packed 8-bit RGB bytes, top row first.
    pub fn from_rgb8(
        width: u32,
        height: u32,
        bytes: &[u8],
        path: impl Into<String>,
    ) -> TextureResult<Self> {
        if bytes.len() != width as usize * height as usize * 3 {
            return Err(TextureError::SizeMismatch {
                width,
                height,
                len: bytes.len(),
            });
        }

        let pixels = bytes
            .chunks_exact(3)
            .map(|p| Color::new(p[0] as f32, p[1] as f32, p[2] as f32) / 255.0)
            .collect();

        Ok(Self::new(width, height, pixels, path))
    }

    /// Sample the texture at UV coordinates (nearest pixel).
    ///
    /// (0, 0) is the bottom-left corner. Coordinates outside [0, 1] wrap.
    pub fn sample(&self, u: f32, v: f32) -> Color {
        if self.width == 0 || self.height == 0 {
            return Color::ZERO;
        }

        let u = wrap_unit(u);
        let v = wrap_unit(v);

        // Flip V for image coordinates
        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = (((1.0 - v) * self.height as f32) as u32).min(self.height - 1);

        self.get_pixel(x, y)
    }

    /// Get pixel at integer coordinates.
    fn get_pixel(&self, x: u32, y: u32) -> Color {
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels.get(idx).copied().unwrap_or(Color::ZERO)
    }

    /// Get total size in bytes (approximate).
    pub fn size_bytes(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<Color>()
    }
}

impl TextureSampler for Texture {
    fn sample(&self, u: f32, v: f32) -> Color {
        Texture::sample(self, u, v)
    }
}

/// Keep [0, 1] as is (so 1.0 stays on the far edge) and wrap anything else.
fn wrap_unit(t: f32) -> f32 {
    if (0.0..=1.0).contains(&t) {
        t
    } else if t.is_finite() {
        t.rem_euclid(1.0)
    } else {
        0.0
    }
}

/// Equirectangular environment map.
#[derive(Clone, Debug)]
pub struct EnvironmentMap {
    texture: Arc<Texture>,
}

impl EnvironmentMap {
    pub fn new(texture: Arc<Texture>) -> Self {
        Self { texture }
    }

    /// Map a direction to texture coordinates.
    ///
    /// Straight down is the bottom row, straight up the top row.
    pub fn direction_to_uv(direction: Vec3) -> (f32, f32) {
        let d = direction.normalize_or_zero();
        if d == Vec3::ZERO {
            return (0.5, 0.5);
        }

        let u = d.z.atan2(d.x) / (2.0 * PI) + 0.5;
        let v = (-d.y).clamp(-1.0, 1.0).acos() / PI;
        (u, v)
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }
}

impl EnvironmentSampler for EnvironmentMap {
    fn sample(&self, direction: Vec3) -> Color {
        let (u, v) = Self::direction_to_uv(direction);
        self.texture.sample(u, v)
    }
}

/// Cache for loaded textures.
///
/// Textures are loaded on-demand and cached for reuse, so many materials can
/// share one image.
pub struct TextureCache {
    /// Cached textures by file path
    textures: HashMap<String, Arc<Texture>>,

    /// Base directory for resolving relative paths
    base_dir: Option<PathBuf>,
}

impl TextureCache {
    /// Create a new empty texture cache.
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: None,
        }
    }

    /// Create a texture cache with a base directory for relative paths.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: Some(base_dir.into()),
        }
    }

    /// Load a texture from file, using cache if available.
    pub fn load(&mut self, path: &str) -> TextureResult<Arc<Texture>> {
        if let Some(texture) = self.textures.get(path) {
            return Ok(texture.clone());
        }

        let full_path = self.resolve_path(path);
        let texture = Arc::new(load_texture_file(&full_path)?);
        self.textures.insert(path.to_string(), texture.clone());

        log::debug!(
            "Loaded texture: {} ({}x{}, {:.1} KB)",
            path,
            texture.width,
            texture.height,
            texture.size_bytes() as f32 / 1024.0
        );

        Ok(texture)
    }

    /// Insert an already decoded texture under `path`.
    pub fn insert(&mut self, path: impl Into<String>, texture: Texture) -> Arc<Texture> {
        let texture = Arc::new(texture);
        self.textures.insert(path.into(), texture.clone());
        texture
    }

    /// Get a cached texture without loading.
    pub fn get(&self, path: &str) -> Option<Arc<Texture>> {
        self.textures.get(path).cloned()
    }

    /// Get the number of cached textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Resolve a path relative to the base directory.
    fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);

        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(base) = &self.base_dir {
            base.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a texture from a file path.
fn load_texture_file(path: &Path) -> TextureResult<Texture> {
    let img = image::open(path).map_err(|e| {
        TextureError::LoadError(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    Texture::from_rgb8(width, height, rgb.as_raw(), path.to_string_lossy())
}
