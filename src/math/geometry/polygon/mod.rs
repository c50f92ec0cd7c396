// src/math/geometry/polygon/mod.rs

// Deklaration der Untermodule für Polygon-spezifische Funktionalität
pub mod core; // Enthält die UvPolygon-Struktur selbst
pub mod mesh; // Polygon → Dreiecksnetz auf der Kugel
pub mod triangulation;

pub use self::core::{PolygonWinding, UvPolygon};
pub use self::mesh::{TriangleMesh, border_loop, bounds_outline};
pub use self::triangulation::{Triangulation, triangulate_uv};
