// src/debug/visualization/sphere_grid.rs
use crate::editor::resources::EditorParameters;
use crate::math::{geometry::sphere::uv_to_sphere, types::UvPoint};
use bevy::prelude::*;

/// UV-Gitter auf der Kugelinnenseite: Linien konstanter `v` (Breiten) und konstanter `u`
/// (Meridiane). Die Naht u = 0 ≡ 1 wird hervorgehoben.
pub fn draw_uv_grid_system(mut gizmos: Gizmos, params: Res<EditorParameters>) {
    if !params.show_grid {
        return;
    }
    // Hinter Füllflächen und Umrissen
    let radius = params.grid_radius();

    let divisions = 20; // 0.05 UV pro Linie
    let segments = 64; // Auflösung jeder Linie

    let v_color = Color::rgba(0.0, 1.0, 0.0, 0.3);
    let u_color = Color::rgba(0.0, 0.5, 1.0, 0.3);
    let seam_color = Color::RED;

    let sample = |u: f64, v: f64| uv_to_sphere(UvPoint::new(u, v), radius).as_vec3();

    // --- Breiten (konstantes v, ohne Pole) ---
    for i in 1..divisions {
        let v = i as f64 / divisions as f64;
        let points = (0..=segments).map(|j| sample(j as f64 / segments as f64, v));
        gizmos.linestrip(points, v_color);
    }

    // --- Meridiane (konstantes u) ---
    for i in 0..divisions {
        let u = i as f64 / divisions as f64;
        let color = if i == 0 { seam_color } else { u_color };
        let points = (0..=segments).map(|j| sample(u, j as f64 / segments as f64));
        gizmos.linestrip(points, color);
    }
}
