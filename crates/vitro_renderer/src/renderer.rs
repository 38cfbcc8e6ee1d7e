//! Render driver and image output.
//!
//! The driver walks the image one pixel at a time, bottom row first, and
//! hands each color to a [`FrameSink`]. [`ImageBuffer`] is the in-memory sink
//! used for writing BMP files.

use std::path::Path;
use std::time::{Duration, Instant};

use crate::{cast_ray, Camera, Scene};
use image::{ImageFormat, RgbImage};
use log::{info, warn};
use thiserror::Error;
use vitro_math::Color;

/// Errors from writing rendered images.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Pixel buffer does not match {width}x{height}")]
    BufferSize { width: u32, height: u32 },
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Receives finished pixels.
pub trait FrameSink {
    fn write_pixel(&mut self, x: u32, y: u32, color: Color);
}

/// Render configuration.
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Stop rendering once this much time has passed
    pub deadline: Option<Duration>,
}

impl RenderConfig {
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Summary of a finished (or interrupted) render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStats {
    /// Pixels handed to the sink
    pub pixels: u64,
    pub elapsed: Duration,
    /// False when the deadline cut the render short
    pub completed: bool,
}

/// Color of a single pixel, one sample through its center.
pub fn render_pixel(scene: &Scene, camera: &Camera, x: u32, y: u32) -> Color {
    let ray = camera.primary_ray(x, y);
    cast_ray(scene, ray.origin, ray.direction, None, 0)
}

/// Render every pixel of `camera` into `sink`.
///
/// Rows are visited from `y = 0` upwards. The deadline is checked before
/// each pixel; pixels written before it expires are kept.
pub fn render(scene: &Scene, camera: &Camera, config: &RenderConfig, sink: &mut dyn FrameSink) -> RenderStats {
    info!(
        "Rendering {}x{} ({} objects, {} lights)",
        camera.width,
        camera.height,
        scene.len(),
        scene.lights.len()
    );

    let start = Instant::now();
    let mut pixels = 0u64;
    let mut completed = true;

    'rows: for y in 0..camera.height {
        for x in 0..camera.width {
            if let Some(deadline) = config.deadline {
                if start.elapsed() >= deadline {
                    warn!(
                        "Render deadline of {:?} reached after {} of {} pixels",
                        deadline,
                        pixels,
                        camera.width as u64 * camera.height as u64
                    );
                    completed = false;
                    break 'rows;
                }
            }

            sink.write_pixel(x, y, render_pixel(scene, camera, x, y));
            pixels += 1;
        }
    }

    let elapsed = start.elapsed();
    info!("Rendered {} pixels in {:.2?}", pixels, elapsed);

    RenderStats {
        pixels,
        elapsed,
        completed,
    }
}

/// Render into a new image buffer sized to the camera.
pub fn render_image(scene: &Scene, camera: &Camera, config: &RenderConfig) -> (ImageBuffer, RenderStats) {
    let mut image = ImageBuffer::new(camera.width, camera.height);
    let stats = render(scene, camera, config, &mut image);
    (image, stats)
}

/// Pack a color into 8-bit RGB, clamping each channel to [0, 1].
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let pack = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    [pack(color.x), pack(color.y), pack(color.z)]
}

/// Simple image buffer for storing render output.
///
/// Row 0 is the bottom of the picture.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Color::ZERO)
    }

    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Get the pixel at (x, y), `None` outside the image.
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set the pixel at (x, y). Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// RGB bytes, top row first.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let width = self.width as usize;
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        if width == 0 {
            return bytes;
        }
        for row in self.pixels.chunks(width).rev() {
            for color in row {
                bytes.extend_from_slice(&color_to_rgb8(*color));
            }
        }
        bytes
    }

    /// Write the image to `path`.
    ///
    /// The format follows the file extension, falling back to 24-bit BMP.
    pub fn save(&self, path: impl AsRef<Path>) -> OutputResult<()> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Bmp);

        let image = RgbImage::from_raw(self.width, self.height, self.to_rgb8()).ok_or(OutputError::BufferSize {
            width: self.width,
            height: self.height,
        })?;
        image.save_with_format(path, format)?;

        info!("Wrote {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

impl FrameSink for ImageBuffer {
    fn write_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.set(x, y, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AmbientLight, Lights, Material, Sphere};
    use std::sync::Arc;
    use vitro_math::Vec3;

    struct CountingSink {
        order: Vec<(u32, u32)>,
    }

    impl FrameSink for CountingSink {
        fn write_pixel(&mut self, x: u32, y: u32, _color: Color) {
            self.order.push((x, y));
        }
    }

    fn lit_sphere_scene() -> Scene {
        let mut scene = Scene::new()
            .with_background(Color::new(0.0, 0.0, 0.5))
            .with_lights(Lights {
                ambient: Some(AmbientLight::new(1.0, Color::ONE)),
                ..Default::default()
            });
        scene.add(Sphere::new(
            Vec3::new(0.0, 0.0, -5.0),
            1.0,
            Arc::new(Material::opaque(Color::new(1.0, 0.0, 0.0))),
        ));
        scene
    }

    #[test]
    fn test_color_to_rgb8() {
        assert_eq!(color_to_rgb8(Color::new(0.0, 0.5, 1.0)), [0, 128, 255]);
        assert_eq!(color_to_rgb8(Color::new(-1.0, 2.0, 0.2)), [0, 255, 51]);
    }

    #[test]
    fn test_render_visits_rows_bottom_up() {
        let scene = Scene::new();
        let camera = Camera::new(2, 2);
        let mut sink = CountingSink { order: Vec::new() };

        let stats = render(&scene, &camera, &RenderConfig::default(), &mut sink);

        assert!(stats.completed);
        assert_eq!(stats.pixels, 4);
        assert_eq!(sink.order, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn test_render_sphere_center() {
        let scene = lit_sphere_scene();
        let camera = Camera::new(9, 9);
        let (image, stats) = render_image(&scene, &camera, &RenderConfig::default());

        assert!(stats.completed);
        assert_eq!(image.get(4, 4), Some(Color::new(1.0, 0.0, 0.0)));
        assert_eq!(image.get(0, 0), Some(Color::new(0.0, 0.0, 0.5)));
    }

    #[test]
    fn test_expired_deadline_stops_render() {
        let scene = lit_sphere_scene();
        let camera = Camera::new(4, 4);
        let config = RenderConfig::default().with_deadline(Duration::ZERO);
        let mut image = ImageBuffer::filled(4, 4, Color::ONE);

        let stats = render(&scene, &camera, &config, &mut image);

        assert!(!stats.completed);
        assert_eq!(stats.pixels, 0);
        assert!(image.pixels.iter().all(|c| *c == Color::ONE));
    }

    #[test]
    fn test_image_buffer_bounds() {
        let mut image = ImageBuffer::new(2, 3);
        image.set(1, 2, Color::ONE);
        image.set(5, 5, Color::ONE);

        assert_eq!(image.get(1, 2), Some(Color::ONE));
        assert_eq!(image.get(2, 0), None);
        assert_eq!(image.pixels.iter().filter(|c| **c == Color::ONE).count(), 1);
    }

    #[test]
    fn test_to_rgb8_flips_rows() {
        let mut image = ImageBuffer::new(1, 2);
        image.set(0, 0, Color::new(1.0, 0.0, 0.0));
        image.set(0, 1, Color::new(0.0, 0.0, 1.0));

        assert_eq!(image.to_rgb8(), vec![0, 0, 255, 255, 0, 0]);
    }

    #[test]
    fn test_save_bmp() {
        let dir = std::env::temp_dir().join("vitro_renderer_save_bmp");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("out.bmp");

        let mut image = ImageBuffer::new(3, 2);
        image.set(0, 0, Color::new(1.0, 0.0, 0.0));
        image.set(2, 1, Color::new(0.0, 1.0, 0.0));
        image.save(&path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"BM");

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (3, 2));
        // Buffer row 0 is the bottom of the picture
        assert_eq!(decoded.get_pixel(0, 1).0, [255, 0, 0]);
        assert_eq!(decoded.get_pixel(2, 0).0, [0, 255, 0]);
        assert_eq!(decoded.get_pixel(1, 0).0, [0, 0, 0]);

        std::fs::remove_dir_all(&dir).ok();
    }
}
