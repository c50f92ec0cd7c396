// src/math/types/mod.rs
pub mod bounds;
pub mod point;

pub use bounds::*;
pub use point::*;

// Re-export häufig verwendete externe Typen
pub use bevy::math::{DVec2, DVec3};

/// Punkt auf der Panorama-Kugel (|p| = R)
pub type SpherePoint = DVec3;
