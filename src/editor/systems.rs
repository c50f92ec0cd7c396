use super::{
    events::{PointAddedEvent, RegionCommitted, SessionCancelled, SessionCommand},
    regions::{CommitPayload, RegionCatalog},
    resources::{ActiveSession, EditorParameters},
    session::SessionOutcome,
};
use crate::debug::visualization::svg::export_region_svg;
use crate::math::geometry::{polygon::triangulate_uv, sphere::intersect_ray_with_sphere};
use crate::setup::PanoramaCamera;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

/// Linksklick → Strahl aus der Kamera → Treffer auf der Kugelinnenseite → neuer Punkt.
/// Rechte/mittlere Maustaste gehören der Kamera.
pub fn pick_point_system(
    mouse: Res<ButtonInput<MouseButton>>,
    mut contexts: EguiContexts,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<PanoramaCamera>>,
    params: Res<EditorParameters>,
    mut session: ResMut<ActiveSession>,
    mut point_events: EventWriter<PointAddedEvent>,
) {
    if !mouse.just_pressed(MouseButton::Left) || contexts.ctx_mut().wants_pointer_input() {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.get_single() else {
        return;
    };
    let Some(ray) = camera.viewport_to_world(camera_transform, cursor) else {
        return;
    };

    let origin = ray.origin.as_dvec3();
    let direction = (*ray.direction).as_dvec3();
    match intersect_ray_with_sphere(origin, direction, params.sphere_radius) {
        Some(hit) => {
            let added = session.add_pick(hit);
            if let Some(preview) = session.drawing().and_then(|drawing| drawing.preview()) {
                if !preview.is_complete() {
                    warn!(
                        "Preview triangulation incomplete after {} points: {} triangles in {} iterations.",
                        added.point_count,
                        preview.triangle_count(),
                        preview.iterations()
                    );
                }
            }
            point_events.send(PointAddedEvent(added));
        }
        None => debug!("Pick ray missed the panorama sphere (origin {:?})", origin),
    }
}

/// Enter = übernehmen, Escape = verwerfen, Backspace = letzten Punkt entfernen
pub fn session_keyboard_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut commands: EventWriter<SessionCommand>,
) {
    if contexts.ctx_mut().wants_keyboard_input() {
        return;
    }
    if keys.just_pressed(KeyCode::Enter) {
        commands.send(SessionCommand::Commit);
    }
    if keys.just_pressed(KeyCode::Escape) {
        commands.send(SessionCommand::Cancel);
    }
    if keys.just_pressed(KeyCode::Backspace) {
        commands.send(SessionCommand::UndoLastPoint);
    }
}

pub fn apply_session_commands_system(
    mut commands: EventReader<SessionCommand>,
    mut session: ResMut<ActiveSession>,
    mut committed_events: EventWriter<RegionCommitted>,
    mut cancelled_events: EventWriter<SessionCancelled>,
) {
    for command in commands.read() {
        match command {
            SessionCommand::Commit => {
                if let Err(err) = session.commit() {
                    warn!("Commit rejected: {}", err);
                }
            }
            SessionCommand::Cancel => {
                if !session.cancel() {
                    debug!("Cancel ignored, no region is being drawn.");
                }
            }
            SessionCommand::UndoLastPoint => {
                if let Some(removed) = session.undo_last_point() {
                    debug!("Removed point ({:.4}, {:.4})", removed.u, removed.v);
                }
            }
            SessionCommand::ExportSvg => continue,
        }

        // Endzustände sofort zurück nach Idle, das Ergebnis geht als Event weiter
        match session.finish() {
            Some(SessionOutcome::Committed(polygon)) => {
                match CommitPayload::from_polygon(&polygon).to_json() {
                    Ok(payload_json) => {
                        committed_events.send(RegionCommitted {
                            polygon,
                            payload_json,
                        });
                    }
                    Err(err) => warn!("Commit payload could not be encoded: {}", err),
                }
            }
            Some(SessionOutcome::Cancelled) => {
                info!("Region drawing cancelled.");
                cancelled_events.send(SessionCancelled);
            }
            None => {}
        }
    }
}

/// Übergabe an die CRUD-Schicht (hier: Log) und Aufnahme in den Katalog
pub fn handle_region_committed_system(
    mut events: EventReader<RegionCommitted>,
    mut catalog: ResMut<RegionCatalog>,
) {
    for event in events.read() {
        info!(
            "Region committed ({} points, {}): {}",
            event.polygon.len(),
            event.polygon.bounds(),
            event.payload_json
        );
        let triangulation = triangulate_uv(event.polygon.points());
        if !triangulation.is_complete() {
            warn!(
                "Committed polygon triangulates only partially: {} triangles for {} points.",
                triangulation.triangle_count(),
                event.polygon.len()
            );
        }
        let draft = catalog.push_draft(&event.polygon);
        debug!("Added draft region {} to the catalog", draft.id);
    }
}

pub fn log_point_added_system(mut events: EventReader<PointAddedEvent>) {
    for PointAddedEvent(added) in events.read() {
        debug!(
            "Point {} at ({:.4}, {:.4}), bounds {}",
            added.point_count, added.point.u, added.point.v, added.bounds
        );
    }
}

/// Schreibt die laufende Geste als SVG; ohne Geste den zuletzt erfassten Polygon-Eintrag.
pub fn export_svg_system(
    mut commands: EventReader<SessionCommand>,
    session: Res<ActiveSession>,
    catalog: Res<RegionCatalog>,
    params: Res<EditorParameters>,
) {
    for command in commands.read() {
        if *command != SessionCommand::ExportSvg {
            continue;
        }
        let points = if session.points().is_empty() {
            catalog
                .regions()
                .iter()
                .rev()
                .find_map(|region| region.polygon_points.as_deref())
                .unwrap_or_default()
        } else {
            session.points()
        };
        if let Err(err) = export_region_svg(&params.svg_export_path, points) {
            warn!("SVG export to '{}' failed: {}", params.svg_export_path, err);
        }
    }
}
