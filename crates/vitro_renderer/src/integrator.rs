//! Whitted-style recursive shading.
//!
//! Opaque surfaces are lit directly by the scene lights with hard shadows.
//! Mirrors and glass spawn secondary rays until the recursion limit, where
//! the ray is treated as escaping the scene.

use crate::{MaterialKind, ObjectId, Scene, SceneHit};
use vitro_math::{fresnel, reflect, refract, Color, Vec3};

/// Rays at this depth are not traced further.
pub const MAX_RECURSION_DEPTH: u32 = 3;

/// Offset along the normal for secondary rays leaving a transparent surface.
pub const BIAS: f32 = 1e-3;

/// Contribution of a single light at a surface point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSample {
    pub diffuse: Color,
    pub specular: Color,
    /// Something blocks the path to the light
    pub shadowed: bool,
}

impl LightSample {
    /// `diffuse + specular`, or black when shadowed.
    pub fn contribution(&self) -> Color {
        if self.shadowed {
            Color::ZERO
        } else {
            self.diffuse + self.specular
        }
    }
}

/// Color seen along a ray.
///
/// `exclude` skips one object, typically the surface the ray leaves.
/// Misses and rays past the recursion limit return the environment sample
/// (or the background) unchanged.
pub fn cast_ray(scene: &Scene, origin: Vec3, direction: Vec3, exclude: Option<ObjectId>, depth: u32) -> Color {
    if depth >= MAX_RECURSION_DEPTH {
        return scene.escape_color(direction);
    }

    let Some(hit) = scene.nearest_hit(origin, direction, exclude) else {
        return scene.escape_color(direction);
    };

    let material = hit.material;
    let point = hit.intersection.point;
    let normal = hit.intersection.normal;

    let shaded = match material.kind {
        MaterialKind::Opaque => {
            let view = (scene.eye - point).normalize_or_zero();
            let lit = direct_lighting(scene, &hit, view);
            match material.surface_color(hit.intersection.uv) {
                Some(texel) => lit * texel,
                None => lit,
            }
        }
        MaterialKind::Reflective => {
            cast_ray(scene, point, reflect(normal, -direction), Some(hit.object), depth + 1)
        }
        MaterialKind::Transparent => transmit(scene, &hit, direction, depth),
    };

    (shaded * material.diffuse).clamp(Color::ZERO, Color::ONE)
}

/// Ambient light plus the unshadowed diffuse and specular terms of every
/// directional and point light.
pub fn direct_lighting(scene: &Scene, hit: &SceneHit<'_>, view: Vec3) -> Color {
    let lights = &scene.lights;
    let mut color = lights.ambient.map_or(Color::ZERO, |ambient| ambient.contribution());

    if let Some(light) = &lights.directional {
        let to_light = -light.direction();
        color += shade_light(scene, hit, view, to_light, f32::INFINITY, light.intensity * light.color).contribution();
    }

    for light in &lights.points {
        let offset = light.position - hit.intersection.point;
        let sample = shade_light(
            scene,
            hit,
            view,
            offset.normalize_or_zero(),
            offset.length(),
            light.intensity * light.color,
        );
        color += sample.contribution();
    }

    color
}

/// Phong terms for one light, plus a shadow test.
///
/// `to_light` is the unit direction from the hit point to the light and
/// `light_distance` how far along it the light sits (infinite for
/// directional lights). Only hits closer than the light cast shadows.
pub fn shade_light(
    scene: &Scene,
    hit: &SceneHit<'_>,
    view: Vec3,
    to_light: Vec3,
    light_distance: f32,
    radiance: Color,
) -> LightSample {
    let normal = hit.intersection.normal;
    let material = hit.material;

    let diffuse = to_light.dot(normal).max(0.0) * radiance;
    let highlight = view.dot(reflect(normal, to_light)).max(0.0).powf(material.specular);
    let specular = highlight * radiance;

    let shadowed = scene
        .nearest_hit(hit.intersection.point, to_light, Some(hit.object))
        .is_some_and(|blocker| blocker.intersection.distance < light_distance);

    LightSample {
        diffuse,
        specular,
        shadowed,
    }
}

/// Fresnel blend of the reflected and refracted rays at a transparent hit.
fn transmit(scene: &Scene, hit: &SceneHit<'_>, direction: Vec3, depth: u32) -> Color {
    let point = hit.intersection.point;
    let normal = hit.intersection.normal;
    let ior = hit.material.ior;

    let kr = fresnel(normal, direction, ior);
    let outside = direction.dot(normal) < 0.0;
    let bias = BIAS * normal;

    let reflect_origin = if outside { point + bias } else { point - bias };
    let reflected = cast_ray(scene, reflect_origin, reflect(normal, -direction), None, depth + 1);

    if kr < 1.0 {
        if let Some(refracted_dir) = refract(normal, direction, ior) {
            let refract_origin = if outside { point - bias } else { point + bias };
            let refracted = cast_ray(scene, refract_origin, refracted_dir, None, depth + 1);
            return kr * reflected + (1.0 - kr) * refracted;
        }
    }

    reflected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AmbientLight, DirectionalLight, Lights, Material, Plane, PointLight, Sphere};
    use std::sync::Arc;
    use vitro_core::{EnvironmentMap, EnvironmentSampler, Texture};

    fn ambient_only(strength: f32) -> Lights {
        Lights {
            ambient: Some(AmbientLight::new(strength, Color::ONE)),
            ..Default::default()
        }
    }

    fn sphere_ahead(material: Material) -> Sphere {
        Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, Arc::new(material))
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = Scene::new().with_background(Color::new(0.1, 0.2, 0.3));
        let color = cast_ray(&scene, Vec3::ZERO, Vec3::NEG_Z, None, 0);
        assert_eq!(color, Color::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_miss_samples_environment() {
        let sky = Color::new(0.3, 0.5, 0.8);
        let scene = Scene::new()
            .with_background(Color::ONE)
            .with_environment(Arc::new(EnvironmentMap::new(Arc::new(Texture::solid_color(sky)))));

        let color = cast_ray(&scene, Vec3::ZERO, Vec3::Y, None, 0);
        assert!((color - sky).length() < 1e-6);
    }

    #[test]
    fn test_depth_limit_returns_escape_color() {
        let mut scene = Scene::new().with_background(Color::splat(0.25)).with_lights(ambient_only(1.0));
        scene.add(sphere_ahead(Material::opaque(Color::X)));

        let color = cast_ray(&scene, Vec3::ZERO, Vec3::NEG_Z, None, MAX_RECURSION_DEPTH);
        assert_eq!(color, Color::splat(0.25));
    }

    #[test]
    fn test_opaque_diffuse_applied_once() {
        let diffuse = Color::new(0.5, 0.25, 1.0);
        let mut scene = Scene::new().with_lights(ambient_only(1.0));
        scene.add(sphere_ahead(Material::opaque(diffuse)));

        let color = cast_ray(&scene, Vec3::ZERO, Vec3::NEG_Z, None, 0);
        assert!((color - diffuse).length() < 1e-5);
    }

    #[test]
    fn test_result_is_clamped() {
        let mut scene = Scene::new().with_lights(ambient_only(3.0));
        scene.add(sphere_ahead(Material::opaque(Color::new(0.2, 1.0, 1.0))));

        let color = cast_ray(&scene, Vec3::ZERO, Vec3::NEG_Z, None, 0);
        assert!((color - Color::new(0.6, 1.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_texture_modulates_opaque() {
        let texture = Arc::new(Texture::solid_color(Color::splat(0.5)));
        let mut scene = Scene::new().with_lights(ambient_only(1.0));
        scene.add(sphere_ahead(Material::default().with_texture(texture)));

        let color = cast_ray(&scene, Vec3::ZERO, Vec3::NEG_Z, None, 0);
        assert!((color - Color::splat(0.5)).length() < 1e-5);
    }

    #[test]
    fn test_mirror_shows_object_behind_camera() {
        let red = Color::new(1.0, 0.0, 0.0);
        let mut scene = Scene::new().with_lights(ambient_only(1.0));
        scene.add(Plane::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, Arc::new(Material::reflective())));
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, Arc::new(Material::opaque(red))));

        let color = cast_ray(&scene, Vec3::ZERO, Vec3::NEG_Z, None, 0);
        assert!((color - red).length() < 1e-5);
    }

    #[test]
    fn test_mirrored_room_terminates() {
        let background = Color::new(0.2, 0.3, 0.4);
        let mirror = Arc::new(Material::reflective());
        let mut scene = Scene::new().with_background(background);
        for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
            scene.add(Plane::new(axis * 2.0, -axis, mirror.clone()));
            scene.add(Plane::new(axis * -2.0, axis, mirror.clone()));
        }

        let direction = Vec3::new(0.3, 0.2, -1.0).normalize();
        let color = cast_ray(&scene, Vec3::ZERO, direction, None, 0);

        assert!(color.is_finite());
        assert!((color - background).length() < 1e-5);
    }

    #[test]
    fn test_glass_with_unit_ior_is_invisible() {
        let background = Color::new(0.2, 0.4, 0.6);
        let mut scene = Scene::new().with_background(background);
        scene.add(sphere_ahead(Material::transparent(1.0)));

        let color = cast_ray(&scene, Vec3::ZERO, Vec3::NEG_Z, None, 0);
        assert!((color - background).length() < 1e-5);
    }

    /// Sky that is one color looking towards +Z and another elsewhere.
    struct SplitSky {
        forward: Color,
        backward: Color,
    }

    impl EnvironmentSampler for SplitSky {
        fn sample(&self, direction: Vec3) -> Color {
            if direction.z > 0.0 {
                self.forward
            } else {
                self.backward
            }
        }
    }

    #[test]
    fn test_glass_blends_reflection_and_refraction() {
        let red = Color::new(1.0, 0.0, 0.0);
        let blue = Color::new(0.0, 0.0, 1.0);
        let mut scene = Scene::new().with_environment(Arc::new(SplitSky {
            forward: red,
            backward: blue,
        }));
        scene.add(sphere_ahead(Material::transparent(1.5)));

        // kr = 0.04 at normal incidence on every surface. The reflection off
        // the front face sees +Z, the ray through the sphere sees -Z, and the
        // internal bounce is cut off at the depth limit.
        let color = cast_ray(&scene, Vec3::ZERO, Vec3::NEG_Z, None, 0);
        let expected = 0.076864 * red + 0.923136 * blue;
        assert!((color - expected).length() < 1e-5, "got {color:?}");
    }

    #[test]
    fn test_point_light_shadowed_by_occluder() {
        let mut scene = Scene::new().with_lights(Lights {
            points: vec![PointLight::new(Vec3::new(0.0, 3.0, 0.0), 1.0, Color::ONE)],
            ..Default::default()
        });
        scene.add(Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y, Arc::new(Material::default())));
        scene.add(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 0.5, Arc::new(Material::default())));

        let hit = scene.nearest_hit(Vec3::ZERO, Vec3::NEG_Y, None).expect("floor below");
        let view = (scene.eye - hit.intersection.point).normalize();

        assert_eq!(direct_lighting(&scene, &hit, view), Color::ZERO);
        assert_eq!(cast_ray(&scene, Vec3::ZERO, Vec3::NEG_Y, None, 0), Color::ZERO);
    }

    #[test]
    fn test_point_light_unoccluded_is_positive() {
        let mut scene = Scene::new().with_lights(Lights {
            points: vec![PointLight::new(Vec3::new(0.0, 3.0, 0.0), 1.0, Color::ONE)],
            ..Default::default()
        });
        scene.add(Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y, Arc::new(Material::default())));

        let color = cast_ray(&scene, Vec3::ZERO, Vec3::NEG_Y, None, 0);
        assert!(color.x > 0.0 && color.y > 0.0 && color.z > 0.0);
    }

    #[test]
    fn test_occluder_beyond_point_light_casts_no_shadow() {
        let mut scene = Scene::new().with_lights(Lights {
            points: vec![PointLight::new(Vec3::new(0.0, 1.0, 0.0), 1.0, Color::ONE)],
            ..Default::default()
        });
        scene.add(Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y, Arc::new(Material::default())));
        scene.add(Sphere::new(Vec3::new(0.0, 4.0, 0.0), 0.5, Arc::new(Material::default())));

        let hit = scene.nearest_hit(Vec3::ZERO, Vec3::NEG_Y, None).unwrap();
        let to_light = Vec3::Y;
        let sample = shade_light(&scene, &hit, Vec3::Y, to_light, 2.0, Color::ONE);
        assert!(!sample.shadowed);
    }

    #[test]
    fn test_directional_light_terms() {
        let mut scene = Scene::new().with_lights(Lights {
            directional: Some(DirectionalLight::new(Vec3::NEG_Y, 0.5, Color::ONE)),
            ..Default::default()
        });
        scene.add(Plane::new(
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::Y,
            Arc::new(Material::default().with_specular(8.0)),
        ));

        let hit = scene.nearest_hit(Vec3::ZERO, Vec3::NEG_Y, None).unwrap();
        let sample = shade_light(&scene, &hit, Vec3::Y, Vec3::Y, f32::INFINITY, Color::splat(0.5));
        assert!((sample.diffuse - Color::splat(0.5)).length() < 1e-5);
        assert!((sample.specular - Color::splat(0.5)).length() < 1e-5);
        assert!(!sample.shadowed);

        let color = cast_ray(&scene, Vec3::ZERO, Vec3::NEG_Y, None, 0);
        assert!((color - Color::ONE).length() < 1e-5);
    }

    #[test]
    fn test_lights_are_summed() {
        let lights = Lights {
            ambient: Some(AmbientLight::new(0.1, Color::ONE)),
            points: vec![
                PointLight::new(Vec3::new(0.0, 3.0, 0.0), 0.2, Color::ONE),
                PointLight::new(Vec3::new(0.0, 3.0, 0.0), 0.3, Color::ONE),
            ],
            ..Default::default()
        };
        let mut scene = Scene::new().with_lights(lights);
        scene.add(Plane::new(
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::Y,
            Arc::new(Material::default().with_specular(1.0)),
        ));

        let hit = scene.nearest_hit(Vec3::ZERO, Vec3::NEG_Y, None).unwrap();
        let view = (scene.eye - hit.intersection.point).normalize();
        // 0.1 ambient + (0.2 + 0.3) diffuse + (0.2 + 0.3) specular
        let color = direct_lighting(&scene, &hit, view);
        assert!((color - Color::splat(1.1)).length() < 1e-5);
    }
}
