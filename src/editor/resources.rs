use super::session::PickSession;
use bevy::prelude::*;

/// Mindestabstand zwischen Füllfläche und Umriss
pub const MIN_LAYER_GAP: f64 = 0.5;

#[derive(Resource, Debug)]
pub struct EditorParameters {
    // --- Panorama ---
    pub sphere_radius: f64,
    /// Abstand der Füllflächen zur Kugelwand (gegen Z-Fighting)
    pub overlay_inset: f64,
    /// Abstand der Umrisslinien und Marker; größer als `overlay_inset`, damit sie
    /// von der Kamera im Mittelpunkt aus vor der Füllfläche liegen
    pub border_inset: f64,

    // --- Darstellung ---
    pub marker_radius: f32,
    pub fill_alpha: f32,
    pub preview_color: Color,
    pub show_committed: bool,
    pub show_preview: bool,
    pub show_bounds: bool,
    pub show_grid: bool,

    // --- Debug ---
    pub svg_export_path: String,
}

impl Default for EditorParameters {
    fn default() -> Self {
        Self {
            // Panorama
            sphere_radius: 500.0,
            overlay_inset: 2.0,
            border_inset: 3.0,

            // Darstellung
            marker_radius: 2.5,
            fill_alpha: 0.35,
            preview_color: Color::rgb(1.0, 0.85, 0.2),
            show_committed: true,
            show_preview: true,
            show_bounds: false,
            show_grid: false,

            // Debug
            svg_export_path: "region_debug.svg".to_string(),
        }
    }
}

impl EditorParameters {
    pub fn overlay_radius(&self) -> f64 {
        self.sphere_radius - self.overlay_inset
    }

    /// Wirksamer Abstand der Umrisse. Liegt immer mindestens `MIN_LAYER_GAP` vor der Füllfläche,
    /// auch wenn die Regler anders stehen.
    pub fn outline_inset(&self) -> f64 {
        self.border_inset.max(self.overlay_inset + MIN_LAYER_GAP)
    }

    /// Das UV-Gitter liegt zwischen Kugelwand und Füllfläche.
    pub fn grid_radius(&self) -> f64 {
        self.sphere_radius - self.overlay_inset * 0.5
    }
}

/// Die eine laufende Erfassungsgeste
#[derive(Resource, Debug, Default, Deref, DerefMut)]
pub struct ActiveSession(pub PickSession);
