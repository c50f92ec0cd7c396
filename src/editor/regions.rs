//! Bereits erfasste Regionen (aus der CRUD-Schicht) und das Übergabeformat beim Übernehmen.

use crate::math::{
    error::MathError,
    geometry::polygon::UvPolygon,
    types::*,
};
use bevy::log::warn;
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Farbe für Entwürfe, die in dieser Sitzung übernommen wurden
pub const DRAFT_HIGHLIGHT_COLOR: &str = "#3fa7ff";

fn default_highlight_color() -> String {
    DRAFT_HIGHLIGHT_COLOR.to_string()
}

#[derive(Error, Debug)]
pub enum RegionError {
    #[error("Region JSON could not be parsed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Region {id} has neither polygon points nor UV bounds")]
    MissingShape { id: RegionId },

    #[error("Region {id} has invalid geometry: {source}")]
    InvalidGeometry { id: RegionId, source: MathError },
}

/// Kennung aus der CRUD-API, numerisch oder als Text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RegionId {
    Number(u64),
    Text(String),
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionId::Number(id) => write!(f, "#{id}"),
            RegionId::Text(id) => write!(f, "'{id}'"),
        }
    }
}

/// Geometrie einer Region
#[derive(Debug, Clone, PartialEq)]
pub enum RegionShape {
    Polygon(UvPolygon),
    /// Legacy: nur ein UV-Rechteck
    Bounds(UvBounds),
}

/// Ein austauschbares Element `{id, uvBounds | polygonPoints, highlightColor}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwappableRegion {
    pub id: RegionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uv_bounds: Option<UvBounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polygon_points: Option<Vec<UvPoint>>,
    #[serde(default = "default_highlight_color")]
    pub highlight_color: String,
}

impl SwappableRegion {
    /// Polygon hat Vorrang, sofern es mindestens drei Punkte hat; sonst die UV-Box.
    pub fn shape(&self) -> Result<RegionShape, RegionError> {
        if let Some(points) = self.polygon_points.as_ref().filter(|points| points.len() >= 3) {
            return UvPolygon::new(points.clone())
                .map(RegionShape::Polygon)
                .map_err(|source| RegionError::InvalidGeometry {
                    id: self.id.clone(),
                    source,
                });
        }
        match self.uv_bounds {
            Some(bounds) => UvBounds::new(bounds.min_u, bounds.max_u, bounds.min_v, bounds.max_v)
                .map(RegionShape::Bounds)
                .map_err(|source| RegionError::InvalidGeometry {
                    id: self.id.clone(),
                    source,
                }),
            None => Err(RegionError::MissingShape { id: self.id.clone() }),
        }
    }
}

/// Alle Regionen des aktuellen Raums, nur zur Ansicht
#[derive(Resource, Debug, Clone, Default)]
pub struct RegionCatalog {
    regions: Vec<SwappableRegion>,
    drafts: u32,
}

impl RegionCatalog {
    /// Liest ein JSON-Array von Regionen. Einträge ohne gültige Geometrie werden
    /// übersprungen und protokolliert, statt den ganzen Raum abzulehnen.
    pub fn from_json(json: &str) -> Result<Self, RegionError> {
        let parsed: Vec<SwappableRegion> = serde_json::from_str(json)?;
        let regions = parsed
            .into_iter()
            .filter(|region| match region.shape() {
                Ok(_) => true,
                Err(err) => {
                    warn!("Skipping region: {}", err);
                    false
                }
            })
            .collect();
        Ok(Self { regions, drafts: 0 })
    }

    pub fn regions(&self) -> &[SwappableRegion] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Regionen mit ihrer bereits geprüften Geometrie
    pub fn shapes(&self) -> impl Iterator<Item = (&SwappableRegion, RegionShape)> {
        self.regions
            .iter()
            .filter_map(|region| region.shape().ok().map(|shape| (region, shape)))
    }

    /// Nimmt ein gerade übernommenes Polygon als Entwurf auf
    pub fn push_draft(&mut self, polygon: &UvPolygon) -> &SwappableRegion {
        self.drafts += 1;
        self.regions.push(SwappableRegion {
            id: RegionId::Text(format!("draft-{}", self.drafts)),
            uv_bounds: Some(polygon.bounds()),
            polygon_points: Some(polygon.points().to_vec()),
            highlight_color: default_highlight_color(),
        });
        &self.regions[self.regions.len() - 1]
    }
}

/// Was beim Übernehmen an die CRUD-Schicht geht
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitPayload {
    pub polygon_points: Vec<UvPoint>,
    pub uv_bounds: UvBounds,
}

impl CommitPayload {
    pub fn from_polygon(polygon: &UvPolygon) -> Self {
        Self {
            polygon_points: polygon.points().to_vec(),
            uv_bounds: polygon.bounds(),
        }
    }

    pub fn to_json(&self) -> Result<String, RegionError> {
        Ok(serde_json::to_string(self)?)
    }
}
