// src/math/geometry/mod.rs

// Deklaration der Haupt-Geometriemodule
pub mod polygon;
pub mod sphere;
