//! Reflection, refraction and Fresnel reflectance.
//!
//! Conventions follow the shading code: `normal` is the surface normal as
//! stored by the primitive (not necessarily facing the ray), `incident` is the
//! ray direction travelling towards the surface. The side of the surface is
//! decided from the sign of `incident · normal`.

use crate::Vec3;

/// Reflect `incoming` about `normal`.
///
/// `incoming` points away from the surface (towards a light, or the negated
/// ray direction). Returns `normalize(2 (n·i) n - i)`.
#[inline]
pub fn reflect(normal: Vec3, incoming: Vec3) -> Vec3 {
    (2.0 * normal.dot(incoming) * normal - incoming).normalize_or_zero()
}

/// Refract `incident` through a surface with index of refraction `ior`.
///
/// Returns `None` on total internal reflection.
pub fn refract(normal: Vec3, incident: Vec3, ior: f32) -> Option<Vec3> {
    let mut cosi = incident.dot(normal).clamp(-1.0, 1.0);
    let mut etai = 1.0;
    let mut etat = ior;
    let mut n = normal;

    if cosi < 0.0 {
        // Entering the surface
        cosi = -cosi;
    } else {
        // Leaving it: swap media and face the normal against the ray
        std::mem::swap(&mut etai, &mut etat);
        n = -normal;
    }

    let eta = etai / etat;
    let k = 1.0 - eta * eta * (1.0 - cosi * cosi);
    if k < 0.0 {
        return None;
    }

    Some((eta * incident + (eta * cosi - k.sqrt()) * n).normalize_or_zero())
}

/// Fraction of light reflected at a dielectric interface, in [0, 1].
///
/// Returns 1 under total internal reflection.
pub fn fresnel(normal: Vec3, incident: Vec3, ior: f32) -> f32 {
    let cosi = incident.dot(normal).clamp(-1.0, 1.0);
    let (etai, etat) = if cosi > 0.0 { (ior, 1.0) } else { (1.0, ior) };

    let sint = etai / etat * (1.0 - cosi * cosi).max(0.0).sqrt();
    if sint >= 1.0 {
        return 1.0;
    }

    let cost = (1.0 - sint * sint).max(0.0).sqrt();
    let cosi = cosi.abs();
    let rs = (etat * cosi - etai * cost) / (etat * cosi + etai * cost);
    let rp = (etai * cosi - etat * cost) / (etai * cosi + etat * cost);

    ((rs * rs + rp * rp) / 2.0).clamp(0.0, 1.0)
}
