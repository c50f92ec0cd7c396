// ./src/debug/ui.rs
use crate::editor::{
    events::SessionCommand,
    regions::{RegionCatalog, RegionShape},
    resources::{ActiveSession, EditorParameters},
};
use crate::math::geometry::polygon::{PolygonWinding, UvPolygon};
use bevy::prelude::*;
use bevy_egui::{
    EguiContexts,
    egui::{self, ScrollArea, Slider, Window},
};
use bevy_panorbit_camera::PanOrbitCamera;

pub fn region_editor_ui_system(
    mut contexts: EguiContexts,
    mut params: ResMut<EditorParameters>,
    session: Res<ActiveSession>,
    catalog: Res<RegionCatalog>,
    cameras: Query<&PanOrbitCamera>,
    mut commands: EventWriter<SessionCommand>,
) {
    // Widgets schreiben jeden Frame in die Parameter; als geändert gilt nur, was wirklich geändert wurde
    let mut params_changed = false;

    Window::new("Regionen-Editor")
        .default_width(320.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading("Erfassung");
            ui.label(format!("Zustand: {}", session.label()));
            ui.label(format!("Punkte: {}", session.points().len()));

            if let Some(drawing) = session.drawing() {
                ui.label(format!("Hülle: {}", drawing.bounds()));
                if let Ok(polygon) = UvPolygon::new(drawing.points().to_vec()) {
                    let winding = match polygon.winding() {
                        PolygonWinding::CounterClockwise => "gegen den Uhrzeigersinn",
                        PolygonWinding::Clockwise => "im Uhrzeigersinn",
                        PolygonWinding::Degenerate => "entartet",
                    };
                    ui.label(format!("Fläche (UV): {:.6}, {}", polygon.area(), winding));
                }
                match drawing.preview() {
                    Some(preview) if preview.is_complete() => {
                        ui.label(format!("Triangulation: {} Dreiecke", preview.triangle_count()));
                    }
                    Some(preview) => {
                        ui.colored_label(
                            egui::Color32::YELLOW,
                            format!(
                                "Triangulation unvollständig: {} Dreiecke nach {} Iterationen",
                                preview.triangle_count(),
                                preview.iterations()
                            ),
                        );
                    }
                    None => {
                        ui.label("Triangulation: ab 3 Punkten");
                    }
                }
            }

            ui.horizontal(|ui| {
                let can_commit = session.is_drawing() && session.points().len() >= 3;
                if ui
                    .add_enabled(can_commit, egui::Button::new("✔ Übernehmen"))
                    .clicked()
                {
                    commands.send(SessionCommand::Commit);
                }
                if ui
                    .add_enabled(session.is_drawing(), egui::Button::new("↩ Punkt zurück"))
                    .clicked()
                {
                    commands.send(SessionCommand::UndoLastPoint);
                }
                if ui
                    .add_enabled(session.is_drawing(), egui::Button::new("✖ Verwerfen"))
                    .clicked()
                {
                    commands.send(SessionCommand::Cancel);
                }
            });

            let params = params.bypass_change_detection();

            ui.collapsing("Darstellung", |ui| {
                params_changed |= ui
                    .add(Slider::new(&mut params.overlay_inset, 0.5..=10.0).text("Abstand Füllfläche"))
                    .changed();
                params_changed |= ui
                    .add(Slider::new(&mut params.border_inset, 0.1..=5.0).text("Abstand Umriss"))
                    .changed();
                params_changed |= ui
                    .add(Slider::new(&mut params.fill_alpha, 0.0..=1.0).text("Deckkraft"))
                    .changed();
                params_changed |= ui
                    .add(Slider::new(&mut params.marker_radius, 0.5..=10.0).text("Punktgröße"))
                    .changed();

                let mut preview_rgba = params.preview_color.as_rgba_f32();
                ui.horizontal(|ui| {
                    ui.label("Vorschaufarbe");
                    if ui.color_edit_button_rgba_unmultiplied(&mut preview_rgba).changed() {
                        params.preview_color = Color::rgba_from_array(preview_rgba);
                        params_changed = true;
                    }
                });

                ui.separator();
                params_changed |= ui.checkbox(&mut params.show_committed, "Erfasste Regionen").changed();
                params_changed |= ui.checkbox(&mut params.show_preview, "Vorschau").changed();
                params_changed |= ui.checkbox(&mut params.show_bounds, "Live-Hülle").changed();
                params_changed |= ui.checkbox(&mut params.show_grid, "UV-Gitter").changed();
            });

            ui.collapsing("Debug-Export", |ui| {
                ui.horizontal(|ui| {
                    ui.label("Datei:");
                    ui.text_edit_singleline(&mut params.svg_export_path);
                });
                if ui.button("SVG exportieren").clicked() {
                    commands.send(SessionCommand::ExportSvg);
                }
            });

            ui.collapsing(format!("Regionen ({})", catalog.len()), |ui| {
                ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                    for (region, shape) in catalog.shapes() {
                        let kind = match shape {
                            RegionShape::Polygon(polygon) => format!("Polygon, {} Punkte", polygon.len()),
                            RegionShape::Bounds(bounds) => format!("Box {}", bounds),
                        };
                        ui.label(format!("{} ({}) {}", region.id, region.highlight_color, kind));
                    }
                });
            });

            ui.collapsing("Kamerasteuerung Info", |ui| {
                ui.label("Linke Maustaste: Punkt setzen");
                ui.label("Enter: übernehmen, Esc: verwerfen, Backspace: letzten Punkt entfernen");
                ui.label("Rechte Maustaste + Ziehen: Umsehen");
                ui.label("Mausrad: Zoom");
                if let Ok(camera) = cameras.get_single() {
                    ui.separator();
                    ui.label(format!(
                        "Yaw {:.2} rad, Pitch {:.2} rad",
                        camera.yaw.unwrap_or_default(),
                        camera.pitch.unwrap_or_default()
                    ));
                }
            });
        });

    if params_changed {
        params.set_changed();
    }
}
