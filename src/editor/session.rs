//! Zustandsautomat für eine einzelne Erfassungsgeste.
//!
//! `Idle → Drawing → {Committed | Cancelled} → Idle`. Jeder Klick wird in UV
//! umgerechnet und angehängt; danach werden Hülle und Vorschau-Triangulation neu
//! berechnet. Doppelte Punkte oder Pol-Treffer werden nicht gefiltert,
//! der Triangulator kommt damit zurecht.

use crate::math::{
    error::{MathError, MathResult},
    geometry::{
        polygon::{Triangulation, UvPolygon, triangulate_uv},
        sphere::sphere_to_uv,
    },
    types::*,
};

/// Punkte der laufenden Geste samt abgeleiteter Hülle und Vorschau
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingState {
    points: Vec<UvPoint>,
    bounds: UvBounds,
    preview: Option<Triangulation>,
}

impl DrawingState {
    fn start(first: UvPoint) -> Self {
        Self {
            points: vec![first],
            bounds: UvBounds::from_point(first),
            preview: None,
        }
    }

    fn push(&mut self, point: UvPoint) -> PointAdded {
        self.points.push(point);
        self.bounds.expand_to_include(point);
        self.refresh_preview();
        self.last_added()
    }

    fn pop(&mut self) -> Option<UvPoint> {
        let removed = self.points.pop()?;
        if let Some(bounds) = UvBounds::from_points(self.points.iter().copied()) {
            self.bounds = bounds;
        }
        self.refresh_preview();
        Some(removed)
    }

    fn refresh_preview(&mut self) {
        self.preview = (self.points.len() >= 3).then(|| triangulate_uv(&self.points));
    }

    fn last_added(&self) -> PointAdded {
        PointAdded {
            point: self.points[self.points.len() - 1],
            bounds: self.bounds,
            point_count: self.points.len(),
        }
    }

    pub fn points(&self) -> &[UvPoint] {
        &self.points
    }

    /// Exakte Min/Max-Hülle aller bisherigen Punkte
    pub fn bounds(&self) -> UvBounds {
        self.bounds
    }

    /// Live-Triangulation, sobald mindestens drei Punkte existieren
    pub fn preview(&self) -> Option<&Triangulation> {
        self.preview.as_ref()
    }
}

/// Rückmeldung nach jedem angehängten Punkt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointAdded {
    pub point: UvPoint,
    pub bounds: UvBounds,
    pub point_count: usize,
}

/// Ergebnis einer abgeschlossenen Geste
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Committed(UvPolygon),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PickSession {
    /// Kein aktives Polygon
    #[default]
    Idle,
    Drawing(DrawingState),
    /// Übernommen, wartet auf [`PickSession::finish`]
    Committed(UvPolygon),
    /// Verworfen, wartet auf [`PickSession::finish`]
    Cancelled,
}

impl PickSession {
    pub fn is_drawing(&self) -> bool {
        matches!(self, PickSession::Drawing(_))
    }

    pub fn drawing(&self) -> Option<&DrawingState> {
        match self {
            PickSession::Drawing(drawing) => Some(drawing),
            _ => None,
        }
    }

    pub fn points(&self) -> &[UvPoint] {
        match self {
            PickSession::Drawing(drawing) => drawing.points(),
            PickSession::Committed(polygon) => polygon.points(),
            PickSession::Idle | PickSession::Cancelled => &[],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PickSession::Idle => "Idle",
            PickSession::Drawing(_) => "Drawing",
            PickSession::Committed(_) => "Committed",
            PickSession::Cancelled => "Cancelled",
        }
    }

    /// Hängt einen Treffer auf der Kugel an (Umrechnung nach UV).
    pub fn add_pick(&mut self, sphere_point: SpherePoint) -> PointAdded {
        self.add_point(sphere_to_uv(sphere_point))
    }

    /// Hängt einen UV-Punkt an. Außerhalb von `Drawing` beginnt eine neue Geste.
    pub fn add_point(&mut self, point: UvPoint) -> PointAdded {
        match self {
            PickSession::Drawing(drawing) => drawing.push(point),
            _ => {
                let drawing = DrawingState::start(point);
                let added = drawing.last_added();
                *self = PickSession::Drawing(drawing);
                added
            }
        }
    }

    /// Entfernt den zuletzt gesetzten Punkt. Ohne Punkte geht es zurück nach `Idle`.
    pub fn undo_last_point(&mut self) -> Option<UvPoint> {
        let PickSession::Drawing(drawing) = self else {
            return None;
        };
        let removed = drawing.pop();
        if drawing.points().is_empty() {
            *self = PickSession::Idle;
        }
        removed
    }

    /// Schließt die Geste als Polygon ab. Mit weniger als drei Punkten bleibt die
    /// Sitzung in `Drawing` und es wird ein Fehler geliefert.
    pub fn commit(&mut self) -> MathResult<UvPolygon> {
        let PickSession::Drawing(drawing) = self else {
            return Err(MathError::InvalidConfiguration {
                message: format!("no drawing in progress (state {})", self.label()),
            });
        };
        let polygon = UvPolygon::new(drawing.points().to_vec())?;
        *self = PickSession::Committed(polygon.clone());
        Ok(polygon)
    }

    /// Verwirft die laufende Geste. Liefert `false`, wenn nichts zu verwerfen war.
    pub fn cancel(&mut self) -> bool {
        if self.is_drawing() {
            *self = PickSession::Cancelled;
            true
        } else {
            false
        }
    }

    /// Überführt einen Endzustand zurück nach `Idle` und gibt sein Ergebnis heraus.
    pub fn finish(&mut self) -> Option<SessionOutcome> {
        match std::mem::take(self) {
            PickSession::Committed(polygon) => Some(SessionOutcome::Committed(polygon)),
            PickSession::Cancelled => Some(SessionOutcome::Cancelled),
            other => {
                *self = other;
                None
            }
        }
    }
}
