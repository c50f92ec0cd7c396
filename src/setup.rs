// ./src/setup.rs
use crate::editor::{regions::RegionCatalog, resources::EditorParameters};
use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;

/// Demo-Raum: eine Polygon-Region und eine Legacy-Box
const DEMO_REGIONS: &str = include_str!("../assets/demo_regions.json");

/// Kamera, von der aus gepickt wird
#[derive(Component, Debug)]
pub struct PanoramaCamera;

pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    params: Res<EditorParameters>,
) {
    // Kugel als Platzhalter für das Panorama (ohne Textur), von innen sichtbar
    commands.spawn(PbrBundle {
        mesh: meshes.add(Sphere::new(params.sphere_radius as f32).mesh().uv(64, 32)),
        material: materials.add(StandardMaterial {
            base_color: Color::rgb(0.55, 0.55, 0.6),
            unlit: true,
            double_sided: true,
            cull_mode: None,
            ..default()
        }),
        transform: Transform::from_xyz(0.0, 0.0, 0.0),
        ..default()
    });

    // Kamera im Mittelpunkt, Blick auf u = v = 0.5 (−Z)
    commands.spawn((
        Camera3dBundle {
            transform: Transform::from_xyz(0.0, 0.0, 0.1).looking_at(Vec3::ZERO, Vec3::Y),
            ..default()
        },
        PanOrbitCamera {
            button_orbit: MouseButton::Right,
            button_pan: MouseButton::Middle,
            pan_sensitivity: 0.0, // Fokus bleibt im Mittelpunkt
            radius: Some(0.1),
            zoom_upper_limit: Some((params.sphere_radius * 0.1) as f32),
            ..default()
        },
        PanoramaCamera,
    ));
}

pub fn seed_demo_regions(mut catalog: ResMut<RegionCatalog>) {
    match RegionCatalog::from_json(DEMO_REGIONS) {
        Ok(loaded) => {
            info!("Loaded {} demo regions.", loaded.len());
            *catalog = loaded;
        }
        Err(err) => warn!("Demo regions could not be loaded: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_regions_are_valid() {
        let catalog = RegionCatalog::from_json(DEMO_REGIONS).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.shapes().count(), 3);
    }
}
