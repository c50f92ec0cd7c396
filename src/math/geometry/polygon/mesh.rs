// src/math/geometry/polygon/mesh.rs
use super::triangulation::Triangulation;
use crate::math::{
    geometry::sphere::{inset_point, sphere_normal_inward, uv_to_sphere},
    types::*,
};
use bevy::render::{
    mesh::{Indices, Mesh, PrimitiveTopology},
    render_asset::RenderAssetUsages,
};

/// Indiziertes Dreiecksnetz auf der Kugelinnenseite.
///
/// Wird aus Polygon + Triangulation abgeleitet und nie an Ort und Stelle verändert.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TriangleMesh {
    pub positions: Vec<DVec3>,
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Ein Vertex pro Polygonpunkt, Indizes aus der Triangulation
    pub fn from_uv_polygon(points: &[UvPoint], triangulation: &Triangulation, radius: f64) -> Self {
        Self {
            positions: points.iter().map(|&point| uv_to_sphere(point, radius)).collect(),
            indices: triangulation.flat_indices(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Bevy-Mesh mit nach innen zeigenden Normalen
    pub fn to_bevy_mesh(&self) -> Mesh {
        let positions: Vec<[f32; 3]> = self
            .positions
            .iter()
            .map(|p| p.as_vec3().to_array())
            .collect();
        let normals: Vec<[f32; 3]> = self
            .positions
            .iter()
            .map(|&p| sphere_normal_inward(p).as_vec3().to_array())
            .collect();

        Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_indices(Indices::U32(self.indices.clone()))
    }
}

/// Geschlossener Linienzug entlang der Polygonkante; der erste Punkt wird am Ende wiederholt.
/// Jeder Punkt rückt um `inset` entlang seiner eigenen Normale nach innen.
pub fn border_loop(points: &[UvPoint], radius: f64, inset: f64) -> Vec<DVec3> {
    let mut line: Vec<DVec3> = points
        .iter()
        .map(|&point| inset_point(uv_to_sphere(point, radius), inset))
        .collect();
    if let Some(&first) = line.first() {
        line.push(first);
    }
    line
}

/// Umriss einer UV-Box auf der Kugel. Jede Kante wird in `segments_per_edge` Stücke
/// unterteilt, damit sie der Krümmung folgt.
pub fn bounds_outline(bounds: &UvBounds, radius: f64, inset: f64, segments_per_edge: usize) -> Vec<DVec3> {
    let segments = segments_per_edge.max(1);
    let corners = bounds.corners();
    let mut samples = Vec::with_capacity(4 * segments);
    for (i, start) in corners.iter().enumerate() {
        let end = corners[(i + 1) % corners.len()];
        for step in 0..segments {
            let t = step as f64 / segments as f64;
            samples.push(UvPoint::from(start.as_dvec2().lerp(end.as_dvec2(), t)));
        }
    }
    border_loop(&samples, radius, inset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::geometry::polygon::triangulation::triangulate_uv;
    use approx::assert_relative_eq;

    const R: f64 = 500.0;

    fn square() -> Vec<UvPoint> {
        vec![
            UvPoint::new(0.3, 0.3),
            UvPoint::new(0.7, 0.3),
            UvPoint::new(0.7, 0.7),
            UvPoint::new(0.3, 0.7),
        ]
    }

    #[test]
    fn test_square_mesh_on_sphere() {
        let points = square();
        let mesh = TriangleMesh::from_uv_polygon(&points, &triangulate_uv(&points), R);
        assert_eq!(mesh.positions.len(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        for p in &mesh.positions {
            assert_relative_eq!(p.length(), R, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_bevy_mesh_attributes() {
        let points = square();
        let mesh = TriangleMesh::from_uv_polygon(&points, &triangulate_uv(&points), R).to_bevy_mesh();
        assert_eq!(mesh.count_vertices(), 4);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(6));
        assert!(mesh.attribute(Mesh::ATTRIBUTE_NORMAL).is_some());
    }

    #[test]
    fn test_border_loop_closed_and_inset() {
        let points = square();
        let line = border_loop(&points, R, 1.0);
        assert_eq!(line.len(), points.len() + 1);
        assert_eq!(line.first(), line.last());
        for p in &line {
            assert_relative_eq!(p.length(), R - 1.0, epsilon = 1e-9);
        }
        assert!(border_loop(&[], R, 1.0).is_empty());
    }

    #[test]
    fn test_bounds_outline_samples_edges() {
        let bounds = UvBounds::new(0.2, 0.4, 0.3, 0.5).unwrap();
        let outline = bounds_outline(&bounds, R, 1.0, 8);
        assert_eq!(outline.len(), 4 * 8 + 1);
        let first = uv_to_sphere(UvPoint::new(0.2, 0.3), R - 1.0);
        assert!(outline[0].distance(first) < 1e-9);
    }
}
