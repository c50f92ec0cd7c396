// src/math/geometry/polygon/core.rs
use crate::math::{error::*, types::*, utils::*};
use serde::Serialize;

/// Orientierung eines Polygons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonWinding {
    /// Positive Shoelace-Fläche
    CounterClockwise,
    /// Negative Shoelace-Fläche
    Clockwise,
    /// Fläche (nahezu) null
    Degenerate,
}

/// Abgeschlossenes Polygon im UV-Raum, implizit geschlossen (letzter → erster Punkt).
///
/// Wird einmal erstellt und danach nicht mehr verändert. Darf konkav sein,
/// die Orientierung wird nicht vorausgesetzt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UvPolygon {
    points: Vec<UvPoint>,
}

impl UvPolygon {
    /// Erstellt ein Polygon aus mindestens drei Punkten
    pub fn new(points: Vec<UvPoint>) -> MathResult<Self> {
        if points.len() < 3 {
            return Err(MathError::InsufficientPoints {
                expected: 3,
                actual: points.len(),
            });
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[UvPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn vertices(&self) -> Vec<DVec2> {
        self.points.iter().map(UvPoint::as_dvec2).collect()
    }

    /// Vorzeichenbehaftete Fläche (Shoelace)
    pub fn signed_area(&self) -> f64 {
        simple_geometry::shoelace_signed_area(&self.vertices())
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn winding(&self) -> PolygonWinding {
        let area = self.signed_area();
        if area.abs() < constants::AREA_EPSILON {
            PolygonWinding::Degenerate
        } else if area > 0.0 {
            PolygonWinding::CounterClockwise
        } else {
            PolygonWinding::Clockwise
        }
    }

    /// Achsenparallele Hülle
    pub fn bounds(&self) -> UvBounds {
        let mut bounds = UvBounds::from_point(self.points[0]);
        for &point in &self.points[1..] {
            bounds.expand_to_include(point);
        }
        bounds
    }
}
