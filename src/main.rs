// ./src/main.rs
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use bevy_panorbit_camera::PanOrbitCameraPlugin;

// Eigene Module deklarieren
pub mod debug;
pub mod editor;
pub mod math;
pub mod setup; // Kamera im Kugelmittelpunkt und Demo-Regionen

use debug::{
    ui::region_editor_ui_system,
    visualization::{
        overlay::{
            draw_region_outlines_system, rebuild_committed_overlay_system,
            rebuild_preview_overlay_system,
        },
        sphere_grid::draw_uv_grid_system,
    },
};
use editor::{
    RegionEditorPlugin,
    systems::{apply_session_commands_system, handle_region_committed_system},
};
use setup::{seed_demo_regions, setup_scene};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(EguiPlugin)
        .add_plugins(PanOrbitCameraPlugin)
        .add_plugins(RegionEditorPlugin)
        .add_systems(Startup, (setup_scene, seed_demo_regions).chain())
        .add_systems(
            Update,
            region_editor_ui_system.before(apply_session_commands_system),
        )
        .add_systems(
            Update,
            (
                // Nach Sitzung und Katalog, damit ein Klick im selben Frame sichtbar wird
                rebuild_committed_overlay_system,
                rebuild_preview_overlay_system,
                draw_region_outlines_system,
                draw_uv_grid_system,
            )
                .after(handle_region_committed_system),
        )
        .run();
}
