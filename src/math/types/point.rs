// src/math/types/point.rs
use bevy::math::DVec2;
use serde::{Deserialize, Serialize};

/// Normalisierte Texturkoordinate auf dem Panorama.
///
/// `u` läuft horizontal und wickelt an der Naht (u=0 ≡ u=1) um,
/// `v` läuft von Pol zu Pol (v=0 oben, v=1 unten) und wickelt nicht.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct UvPoint {
    pub u: f64,
    pub v: f64,
}

impl UvPoint {
    pub fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }

    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.u, self.v)
    }
}

impl From<DVec2> for UvPoint {
    fn from(v: DVec2) -> Self {
        Self { u: v.x, v: v.y }
    }
}
