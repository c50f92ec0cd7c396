// src/math/geometry/sphere/mod.rs

// Deklaration der Untermodule für Kugel-spezifische Funktionalität
pub mod coordinates;
pub mod picking;
pub mod plane;

pub use self::coordinates::{inset_point, sphere_normal_inward, sphere_to_uv, uv_to_sphere};
pub use self::picking::intersect_ray_with_sphere;
pub use self::plane::plane_from_bounds;
