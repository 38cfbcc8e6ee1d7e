//! Vitro Core - scene description and texture collaborators.
//!
//! This crate provides:
//!
//! - **Scene description**: the serde model of a JSON scene file, with
//!   validation of everything the renderer takes on trust
//! - **Textures**: the sampling contracts the renderer shades through,
//!   plus image-backed textures, environment maps and a texture cache
//!
//! # Example
//!
//! ```ignore
//! use vitro_core::scene::SceneDescription;
//!
//! let desc = SceneDescription::from_file("scenes/blocks.json")?;
//! println!("{} objects, {} point lights",
//!     desc.objects.len(),
//!     desc.lights.points.len());
//! ```

pub mod scene;
pub mod texture;

// Re-export commonly used types
pub use scene::{SceneDescription, SceneError, SceneResult};
pub use texture::{
    EnvironmentMap, EnvironmentSampler, Texture, TextureCache, TextureError, TextureResult,
    TextureSampler,
};
