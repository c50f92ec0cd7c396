// src/math/geometry/sphere/picking.rs

use crate::math::types::*;

/// Schneidet einen Strahl mit der Kugel (Mittelpunkt im Ursprung).
///
/// Gedacht für Kameras *innerhalb* der Kugel: geliefert wird der weiter entfernte
/// Schnittpunkt vor dem Ursprung des Strahls, also die sichtbare Innenwand.
/// `None`, wenn die Richtung entartet ist oder die Kugel hinter dem Strahl liegt.
pub fn intersect_ray_with_sphere(origin: DVec3, direction: DVec3, radius: f64) -> Option<SpherePoint> {
    let direction = direction.try_normalize()?;

    // |o + t·d|² = R²  →  t² + 2bt + c = 0
    let b = origin.dot(direction);
    let c = origin.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let t = -b + discriminant.sqrt();
    if t < 0.0 {
        return None;
    }
    Some(origin + direction * t)
}
