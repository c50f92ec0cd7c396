use super::session::PointAdded;
use crate::math::geometry::polygon::UvPolygon;
use bevy::prelude::*;

/// Nach jedem gesetzten Punkt: UV-Koordinate und aktuelle Hülle
#[derive(Event, Debug, Clone, Copy)]
pub struct PointAddedEvent(pub PointAdded);

/// Befehle aus Tastatur und UI an die Sitzung
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Commit,
    Cancel,
    UndoLastPoint,
    ExportSvg,
}

#[derive(Event, Debug, Clone)]
pub struct RegionCommitted {
    pub polygon: UvPolygon,
    /// `{polygonPoints, uvBounds}` als JSON für die CRUD-Schicht
    pub payload_json: String,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct SessionCancelled;
