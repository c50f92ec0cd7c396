// src/math/types/bounds.rs

use crate::math::{error::*, types::*};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Achsenparalleles Rechteck im UV-Raum.
///
/// Legacy-Regionen werden direkt so erfasst, Polygon-Regionen liefern es als Hülle.
/// "Oben" ist `min_v` (Richtung Nordpol).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UvBounds {
    pub min_u: f64,
    pub max_u: f64,
    pub min_v: f64,
    pub max_v: f64,
}

impl UvBounds {
    /// Erstellt eine neue Bounding Box
    pub fn new(min_u: f64, max_u: f64, min_v: f64, max_v: f64) -> MathResult<Self> {
        if min_u > max_u || min_v > max_v {
            return Err(MathError::InvalidConfiguration {
                message: format!(
                    "Invalid UV bounds: u [{min_u}, {max_u}], v [{min_v}, {max_v}]"
                ),
            });
        }

        Ok(Self {
            min_u,
            max_u,
            min_v,
            max_v,
        })
    }

    /// Degenerierte Box um einen einzelnen Punkt
    pub fn from_point(point: UvPoint) -> Self {
        Self {
            min_u: point.u,
            max_u: point.u,
            min_v: point.v,
            max_v: point.v,
        }
    }

    /// Erstellt eine Bounding Box die alle Punkte umschließt
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = UvPoint>,
    {
        let mut points_iter = points.into_iter();
        let mut bounds = Self::from_point(points_iter.next()?);
        for point in points_iter {
            bounds.expand_to_include(point);
        }
        Some(bounds)
    }

    /// Erweitert die Box so, dass `point` enthalten ist
    pub fn expand_to_include(&mut self, point: UvPoint) {
        self.min_u = self.min_u.min(point.u);
        self.max_u = self.max_u.max(point.u);
        self.min_v = self.min_v.min(point.v);
        self.max_v = self.max_v.max(point.v);
    }

    pub fn width(&self) -> f64 {
        (self.max_u - self.min_u).max(0.0)
    }

    pub fn height(&self) -> f64 {
        (self.max_v - self.min_v).max(0.0)
    }

    /// Ecken in der Reihenfolge oben-links, oben-rechts, unten-rechts, unten-links
    pub fn corners(&self) -> [UvPoint; 4] {
        [
            UvPoint::new(self.min_u, self.min_v),
            UvPoint::new(self.max_u, self.min_v),
            UvPoint::new(self.max_u, self.max_v),
            UvPoint::new(self.min_u, self.max_v),
        ]
    }
}

impl fmt::Display for UvBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "u [{:.4}, {:.4}] v [{:.4}, {:.4}]",
            self.min_u, self.max_u, self.min_v, self.max_v
        )
    }
}
