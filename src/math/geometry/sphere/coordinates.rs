// src/math/geometry/sphere/coordinates.rs

use crate::math::{types::*, utils::*};

/// Horizontale Spiegelung des Panoramas: θ = (1 − u)·2π.
///
/// Das Panorama wird von *innen* betrachtet, ohne Spiegelung wäre es seitenverkehrt.
/// Der Laufzeit-Viewer benutzt dieselbe Konvention; eine Abweichung verschiebt jede
/// erfasste Region unbemerkt.
pub const HORIZONTAL_MIRROR: bool = true;

/// Azimut θ ∈ [0, 2π] zu einer horizontalen Texturkoordinate.
pub fn azimuth_from_u(u: f64) -> f64 {
    let turn = if HORIZONTAL_MIRROR { 1.0 - u } else { u };
    turn * constants::TAU
}

/// Umkehrung von [`azimuth_from_u`]. Liefert u ∈ (0, 1] für θ ∈ [0, 2π).
pub fn u_from_azimuth(azimuth: f64) -> f64 {
    let turn = azimuth / constants::TAU;
    if HORIZONTAL_MIRROR { 1.0 - turn } else { turn }
}

/// Bildet eine UV-Koordinate auf die Kugel mit Radius `radius` ab.
///
/// φ = v·π (Polarwinkel ab +Y), θ nach [`azimuth_from_u`].
/// An den Polen (v = 0 oder v = 1) fallen alle u auf denselben Punkt.
pub fn uv_to_sphere(uv: UvPoint, radius: f64) -> SpherePoint {
    let theta = azimuth_from_u(uv.u);
    let phi = uv.v * constants::PI;
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();

    SpherePoint::new(
        radius * sin_phi * sin_theta,
        radius * cos_phi,
        radius * sin_phi * cos_theta,
    )
}

/// Exakte Umkehrung von [`uv_to_sphere`].
///
/// Der Punkt wird zuerst normalisiert, der Radius spielt daher keine Rolle.
/// Auf der Naht (θ = 0) wird u = 1 geliefert; u = 0 beschreibt dieselbe Stelle.
/// Für den Nullvektor gibt es keine Richtung, dann wird (1, 0.5) zurückgegeben.
pub fn sphere_to_uv(point: SpherePoint) -> UvPoint {
    let length = point.length();
    if length < constants::EPSILON {
        return UvPoint::new(u_from_azimuth(0.0), 0.5);
    }

    let direction = point / length;
    let phi = direction.y.clamp(-1.0, 1.0).acos();
    let theta = angles::normalize_angle(direction.x.atan2(direction.z));

    UvPoint::new(u_from_azimuth(theta), phi / constants::PI)
}

/// Normale am Kugelpunkt, die zum Mittelpunkt zeigt (Blickrichtung von innen).
pub fn sphere_normal_inward(point: SpherePoint) -> DVec3 {
    -point.normalize_or_zero()
}

/// Verschiebt einen Kugelpunkt um `inset` entlang seiner eigenen Normale nach innen.
pub fn inset_point(point: SpherePoint, inset: f64) -> DVec3 {
    point + sphere_normal_inward(point) * inset
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const R: f64 = 500.0;

    #[test]
    fn test_round_trip_away_from_seam_and_poles() {
        for i in 1..100 {
            for j in 1..50 {
                let uv = UvPoint::new(i as f64 / 100.0, j as f64 / 50.0);
                let back = sphere_to_uv(uv_to_sphere(uv, R));
                assert!(
                    (back.u - uv.u).abs() < 1e-6 && (back.v - uv.v).abs() < 1e-6,
                    "round trip failed for {uv:?} -> {back:?}"
                );
            }
        }
    }

    #[test]
    fn test_seam_aliases_to_one() {
        let at_zero = sphere_to_uv(uv_to_sphere(UvPoint::new(0.0, 0.5), R));
        let at_one = sphere_to_uv(uv_to_sphere(UvPoint::new(1.0, 0.5), R));
        for back in [at_zero, at_one] {
            assert!(back.u.abs() < 1e-9 || (back.u - 1.0).abs() < 1e-9);
            assert_relative_eq!(back.v, 0.5, epsilon = 1e-9);
        }
        // Beide Nahtwerte landen auf demselben Punkt
        let a = uv_to_sphere(UvPoint::new(0.0, 0.3), R);
        let b = uv_to_sphere(UvPoint::new(1.0, 0.3), R);
        assert!(a.distance(b) < 1e-9);
    }

    #[test]
    fn test_points_lie_on_sphere() {
        for i in 0..=20 {
            for j in 0..=20 {
                let uv = UvPoint::new(i as f64 / 20.0, j as f64 / 20.0);
                assert_relative_eq!(uv_to_sphere(uv, R).length(), R, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_poles_collapse() {
        let north_a = uv_to_sphere(UvPoint::new(0.1, 0.0), R);
        let north_b = uv_to_sphere(UvPoint::new(0.8, 0.0), R);
        assert!(north_a.distance(north_b) < 1e-9);
        assert_relative_eq!(north_a.y, R, epsilon = 1e-9);

        let south = uv_to_sphere(UvPoint::new(0.4, 1.0), R);
        assert_relative_eq!(south.y, -R, epsilon = 1e-9);
        assert_relative_eq!(sphere_to_uv(south).v, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_mirror_convention() {
        // u = 0.25 → θ = 1.5π → Punkt auf der −X-Achse
        let p = uv_to_sphere(UvPoint::new(0.25, 0.5), R);
        assert_relative_eq!(p.x, -R, epsilon = 1e-9);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-9);
        // u = 0.5 blickt entlang −Z
        let q = uv_to_sphere(UvPoint::new(0.5, 0.5), R);
        assert_relative_eq!(q.z, -R, epsilon = 1e-9);
    }

    #[test]
    fn test_inverse_ignores_radius_and_zero_vector() {
        let uv = UvPoint::new(0.37, 0.61);
        let far = uv_to_sphere(uv, R) * 3.0;
        let back = sphere_to_uv(far);
        assert_relative_eq!(back.u, uv.u, epsilon = 1e-9);
        assert_relative_eq!(back.v, uv.v, epsilon = 1e-9);

        let fallback = sphere_to_uv(DVec3::ZERO);
        assert_eq!(fallback, UvPoint::new(1.0, 0.5));
    }

    #[test]
    fn test_inset_moves_towards_center() {
        let p = uv_to_sphere(UvPoint::new(0.7, 0.4), R);
        let inset = inset_point(p, 2.0);
        assert_relative_eq!(inset.length(), R - 2.0, epsilon = 1e-9);
        assert_relative_eq!(sphere_normal_inward(p).length(), 1.0, epsilon = 1e-12);
    }
}
