// src/math/geometry/sphere/plane.rs

use super::coordinates::uv_to_sphere;
use crate::math::types::*;
use bevy::math::{DMat3, DQuat};
use bevy::prelude::Transform;

/// Flaches Rechteck, das eine UV-Box auf der Kugelinnenseite annähert.
///
/// Lokale Achsen: X = rechts, Y = oben, Z = Normale (zeigt zum Kugelmittelpunkt).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePlane {
    pub position: DVec3,
    pub orientation: DQuat,
    pub normal: DVec3,
    pub width: f64,
    pub height: f64,
}

impl SurfacePlane {
    /// Bevy-Transform für ein Rechteck-Mesh in der lokalen XY-Ebene
    pub fn transform(&self) -> Transform {
        Transform {
            translation: self.position.as_vec3(),
            rotation: self.orientation.as_f32(),
            ..Default::default()
        }
    }

    /// Eckpunkte in Weltkoordinaten (oben-links, oben-rechts, unten-rechts, unten-links)
    pub fn corners(&self) -> [DVec3; 4] {
        let right = self.orientation * DVec3::X * (self.width * 0.5);
        let up = self.orientation * DVec3::Y * (self.height * 0.5);
        [
            self.position - right + up,
            self.position + right + up,
            self.position + right - up,
            self.position - right - up,
        ]
    }
}

/// Baut die Tangentialebene für Legacy-Regionen, die nur als UV-Box vorliegen.
///
/// Für kleine Winkelspannen (Paneele, Wände, Arbeitsplatten) ist der Fehler gering,
/// große Spannen werden nur grob angenähert.
pub fn plane_from_bounds(bounds: &UvBounds, radius: f64, inset: f64) -> SurfacePlane {
    let [tl, tr, br, bl] = bounds.corners().map(|corner| uv_to_sphere(corner, radius));

    let centroid = (tl + tr + br + bl) * 0.25;
    let width = (tl.distance(tr) + bl.distance(br)) * 0.5;
    let height = (tl.distance(bl) + tr.distance(br)) * 0.5;

    // Zentroid im Ursprung (Box über die ganze Kugel): keine sinnvolle Richtung mehr
    let normal = (-centroid).try_normalize().unwrap_or(DVec3::NEG_Z);

    let top_center = (tl + tr) * 0.5;
    let bottom_center = (bl + br) * 0.5;
    let up = orthogonal_up(top_center - bottom_center, normal);
    let right = up.cross(normal);

    SurfacePlane {
        position: centroid + normal * inset,
        orientation: DQuat::from_mat3(&DMat3::from_cols(right, up, normal)),
        normal,
        width,
        height,
    }
}

/// Gram-Schmidt gegen die Normale. Fällt bei entarteten Boxen (Höhe 0, Pol) auf
/// Weltachsen zurück, die nicht parallel zur Normale sind.
fn orthogonal_up(raw_up: DVec3, normal: DVec3) -> DVec3 {
    let candidates = [raw_up, DVec3::Y, DVec3::X];
    candidates
        .into_iter()
        .find_map(|candidate| (candidate - normal * candidate.dot(normal)).try_normalize())
        .unwrap_or(DVec3::Y)
}
