// src/debug/visualization/overlay.rs
use crate::editor::{
    regions::{DRAFT_HIGHLIGHT_COLOR, RegionCatalog, RegionShape},
    resources::{ActiveSession, EditorParameters},
};
use crate::math::geometry::{
    polygon::{TriangleMesh, border_loop, bounds_outline, triangulate_uv},
    sphere::{inset_point, plane_from_bounds, uv_to_sphere},
};
use bevy::prelude::*;

/// Unterteilung der Hüllen-Kanten, damit sie der Krümmung folgen
const BOUNDS_OUTLINE_SEGMENTS: usize = 16;

/// Markiert gespawnte Füllflächen, damit sie gezielt neu aufgebaut werden können.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayFill {
    /// Regionen aus dem Katalog
    Committed,
    /// Live-Vorschau der laufenden Geste
    Preview,
}

/// `highlightColor` aus dem Katalog; ungültige Werte fallen auf die Entwurfsfarbe zurück.
pub fn parse_highlight_color(hex: &str, alpha: f32) -> Color {
    let color = Color::hex(hex).unwrap_or_else(|err| {
        warn!("Invalid highlight color '{}': {:?}", hex, err);
        Color::hex(DRAFT_HIGHLIGHT_COLOR).unwrap_or(Color::CYAN)
    });
    color.with_a(alpha)
}

fn overlay_material(color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

fn despawn_fills(commands: &mut Commands, fills: &Query<(Entity, &OverlayFill)>, kind: OverlayFill) {
    for (entity, fill) in fills.iter() {
        if *fill == kind {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Baut die Füllflächen aller Katalog-Regionen neu, wenn sich Katalog oder Parameter ändern.
pub fn rebuild_committed_overlay_system(
    mut commands: Commands,
    catalog: Res<RegionCatalog>,
    params: Res<EditorParameters>,
    fills: Query<(Entity, &OverlayFill)>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !catalog.is_changed() && !params.is_changed() {
        return;
    }
    despawn_fills(&mut commands, &fills, OverlayFill::Committed);
    if !params.show_committed {
        return;
    }

    for (region, shape) in catalog.shapes() {
        let material = materials.add(overlay_material(parse_highlight_color(
            &region.highlight_color,
            params.fill_alpha,
        )));
        match shape {
            RegionShape::Polygon(polygon) => {
                let triangulation = triangulate_uv(polygon.points());
                if triangulation.is_empty() {
                    continue;
                }
                let mesh = TriangleMesh::from_uv_polygon(
                    polygon.points(),
                    &triangulation,
                    params.overlay_radius(),
                );
                commands.spawn((
                    PbrBundle {
                        mesh: meshes.add(mesh.to_bevy_mesh()),
                        material,
                        ..default()
                    },
                    OverlayFill::Committed,
                ));
            }
            RegionShape::Bounds(bounds) => {
                let plane = plane_from_bounds(&bounds, params.sphere_radius, params.overlay_inset);
                commands.spawn((
                    PbrBundle {
                        mesh: meshes.add(Rectangle::new(plane.width as f32, plane.height as f32)),
                        material,
                        transform: plane.transform(),
                        ..default()
                    },
                    OverlayFill::Committed,
                ));
            }
        }
    }
}

/// Nur die Vorschau wird pro Klick neu gebaut.
pub fn rebuild_preview_overlay_system(
    mut commands: Commands,
    session: Res<ActiveSession>,
    params: Res<EditorParameters>,
    fills: Query<(Entity, &OverlayFill)>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !session.is_changed() && !params.is_changed() {
        return;
    }
    despawn_fills(&mut commands, &fills, OverlayFill::Preview);
    if !params.show_preview {
        return;
    }
    let Some(drawing) = session.drawing() else {
        return;
    };
    let Some(triangulation) = drawing.preview() else {
        return;
    };

    let mesh = TriangleMesh::from_uv_polygon(drawing.points(), triangulation, params.overlay_radius());
    debug!(
        "Preview rebuilt: {} points, {} triangles",
        drawing.points().len(),
        mesh.triangle_count()
    );
    commands.spawn((
        PbrBundle {
            mesh: meshes.add(mesh.to_bevy_mesh()),
            material: materials.add(overlay_material(params.preview_color.with_a(params.fill_alpha))),
            ..default()
        },
        OverlayFill::Preview,
    ));
}

/// Umrisse, Punktmarker und Live-Hülle als Gizmos (liegen vor den Füllflächen).
pub fn draw_region_outlines_system(
    mut gizmos: Gizmos,
    catalog: Res<RegionCatalog>,
    session: Res<ActiveSession>,
    params: Res<EditorParameters>,
) {
    let radius = params.sphere_radius;
    let inset = params.outline_inset();

    if params.show_committed {
        for (region, shape) in catalog.shapes() {
            let color = parse_highlight_color(&region.highlight_color, 1.0);
            match shape {
                RegionShape::Polygon(polygon) => {
                    let line = border_loop(polygon.points(), radius, inset);
                    gizmos.linestrip(line.into_iter().map(|p| p.as_vec3()), color);
                }
                RegionShape::Bounds(bounds) => {
                    let plane = plane_from_bounds(&bounds, radius, inset);
                    let [tl, tr, br, bl] = plane.corners().map(|c| c.as_vec3());
                    gizmos.linestrip([tl, tr, br, bl, tl], color);
                }
            }
        }
    }

    let Some(drawing) = session.drawing() else {
        return;
    };

    if params.show_preview {
        let points = drawing.points();
        let line: Vec<Vec3> = border_loop(points, radius, inset)
            .into_iter()
            .map(|p| p.as_vec3())
            .collect();
        // Offene Kette, solange noch kein Polygon entsteht
        let visible = if points.len() < 3 { points.len() } else { line.len() };
        gizmos.linestrip(line[..visible].iter().copied(), params.preview_color);

        for &point in points {
            let marker = inset_point(uv_to_sphere(point, radius), inset);
            gizmos.sphere(marker.as_vec3(), Quat::IDENTITY, params.marker_radius, params.preview_color);
        }
    }

    if params.show_bounds {
        let outline = bounds_outline(&drawing.bounds(), radius, inset, BOUNDS_OUTLINE_SEGMENTS);
        gizmos.linestrip(outline.into_iter().map(|p| p.as_vec3()), Color::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_highlight_color() {
        let color = parse_highlight_color("#ff8800", 0.5);
        assert_eq!(color.as_rgba_f32(), Color::rgba(1.0, 136.0 / 255.0, 0.0, 0.5).as_rgba_f32());
    }

    #[test]
    fn test_invalid_color_falls_back_to_draft_color() {
        let fallback = parse_highlight_color("not-a-color", 1.0);
        assert_eq!(fallback, parse_highlight_color(DRAFT_HIGHLIGHT_COLOR, 1.0));
    }

    #[test]
    fn test_overlay_material_is_translucent_and_double_sided() {
        let material = overlay_material(Color::RED.with_a(0.3));
        assert!(material.unlit);
        assert!(material.double_sided);
        assert_eq!(material.cull_mode, None);
        assert_eq!(material.alpha_mode, AlphaMode::Blend);
    }
}
