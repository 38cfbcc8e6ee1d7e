//! Built-in demo: a small block terrain with a mirror ball and a glass ball.

use std::sync::Arc;

use vitro_math::{Color, Vec3};
use vitro_renderer::{AmbientLight, Camera, Cuboid, Lights, Material, Plane, PointLight, Scene, Sphere};

pub const DEMO_WIDTH: u32 = 512;
pub const DEMO_HEIGHT: u32 = 512;

pub fn demo_scene() -> (Scene, Camera) {
    let stone = Arc::new(Material::opaque(Color::new(0.45, 0.45, 0.47)).with_specular(4.0));
    let dirt = Arc::new(Material::opaque(Color::new(0.45, 0.3, 0.18)).with_specular(2.0));
    let grass = Arc::new(Material::opaque(Color::new(0.3, 0.55, 0.2)));
    let mirror = Arc::new(Material::reflective().with_specular(64.0));
    let glass = Arc::new(Material::transparent(1.5).with_specular(64.0));

    let lights = Lights {
        ambient: Some(AmbientLight::new(0.5, Color::ONE)),
        directional: None,
        points: vec![PointLight::new(Vec3::new(2.0, 3.0, -5.0), 0.5, Color::splat(0.5))],
    };

    let mut scene = Scene::new()
        .with_background(Color::new(0.55, 0.7, 0.9))
        .with_lights(lights);

    let block = Vec3::ONE;

    // Back wall, two blocks high
    for y in [-1, 0] {
        for x in -4..=4 {
            scene.add(Cuboid::new(Vec3::new(x as f32, y as f32, -9.0), block, stone.clone()));
        }
    }

    // Terrain floor: stone at the back, dirt towards the camera
    for z in -8..=-5 {
        for x in -4..=4 {
            if (x + z) % 4 == 0 {
                continue;
            }
            let material = if z <= -8 { stone.clone() } else { dirt.clone() };
            scene.add(Cuboid::new(Vec3::new(x as f32, -2.0, z as f32), block, material));
        }
    }

    scene.add(Plane::new(Vec3::new(0.0, -2.5, 0.0), Vec3::Y, grass));
    scene.add(Sphere::new(Vec3::new(-1.5, -0.75, -6.5), 0.75, mirror));
    scene.add(Sphere::new(Vec3::new(1.5, -0.75, -6.0), 0.75, glass));

    let camera = Camera::new(DEMO_WIDTH, DEMO_HEIGHT);
    (scene, camera)
}
