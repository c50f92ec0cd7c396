pub mod overlay;
pub mod sphere_grid;
pub mod svg;
