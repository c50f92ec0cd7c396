// src/math/utils.rs

/// Mathematische Konstanten
pub mod constants {
    pub const EPSILON: f64 = 1e-10;
    /// Toleranz für Kreuzprodukte im UV-Raum (Einheiten²)
    pub const AREA_EPSILON: f64 = 1e-12;
    pub const TAU: f64 = std::f64::consts::TAU;
    pub const PI: f64 = std::f64::consts::PI;
}

/// Winkel-Hilfsfunktionen
pub mod angles {
    use super::constants::TAU;

    /// Normalisiert einen Winkel auf [0, 2π)
    pub fn normalize_angle(angle: f64) -> f64 {
        let mut result = angle % TAU;
        if result < 0.0 {
            result += TAU;
        }
        // -0.0 % TAU + TAU kann durch Rundung genau TAU ergeben
        if result >= TAU { 0.0 } else { result }
    }
}

/// Einfache Geometrie auf Punktlisten
pub mod simple_geometry {
    use bevy::math::DVec2;

    /// Vorzeichenbehaftete Fläche nach der Gaußschen Trapezformel (Shoelace).
    /// Positiv für CCW (im mathematischen Sinn), negativ für CW.
    pub fn shoelace_signed_area(vertices: &[DVec2]) -> f64 {
        let n = vertices.len();
        if n < 3 {
            return 0.0;
        }
        let doubled: f64 = (0..n)
            .map(|i| vertices[i].perp_dot(vertices[(i + 1) % n]))
            .sum();
        doubled * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bevy::math::DVec2;

    #[test]
    fn test_normalize_angle_range() {
        assert_relative_eq!(angles::normalize_angle(-constants::PI), constants::PI);
        assert_relative_eq!(angles::normalize_angle(constants::TAU), 0.0, epsilon = 1e-12);
        let a = angles::normalize_angle(-1e-18);
        assert!((0.0..constants::TAU).contains(&a));
    }

    #[test]
    fn test_shoelace_sign_follows_winding() {
        let ccw = [
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 1.0),
        ];
        let mut cw = ccw;
        cw.reverse();
        assert_relative_eq!(simple_geometry::shoelace_signed_area(&ccw), 1.0);
        assert_relative_eq!(simple_geometry::shoelace_signed_area(&cw), -1.0);
        assert_eq!(simple_geometry::shoelace_signed_area(&ccw[..2]), 0.0);
    }
}
