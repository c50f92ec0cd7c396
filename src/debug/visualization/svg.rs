// src/debug/visualization/svg.rs
use crate::math::{
    error::MathError,
    geometry::polygon::{Triangulation, UvPolygon, triangulate_uv},
    types::*,
};
use bevy::log::info;
use std::path::Path;
use svg::Document;
use svg::node::element::{Circle, Group, Polygon, Rectangle, Style};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("SVG could not be written: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Math(#[from] MathError),
}

/// Kantenlänge der Zeichenfläche in SVG-Einheiten (UV [0,1]² wird darauf skaliert)
pub const SVG_CANVAS_SIZE: f64 = 1000.0;

const STYLE: &str = "
    .background { fill: #f0f0f0; }
    .bounds { fill: none; stroke: #888888; stroke-width: 1; stroke-dasharray: 6,4; }
    .triangle { fill: rgba(150, 200, 255, 0.4); stroke: #3366cc; stroke-width: 0.8; }
    .outline { fill: none; stroke: #cc3300; stroke-width: 2; }
    .vertex { fill: #ffffff; stroke: #cc3300; stroke-width: 1.5; }
    .incomplete { fill: none; stroke: #ff0000; stroke-width: 6; }
";

fn to_canvas(point: UvPoint, scale: f64) -> (f64, f64) {
    (point.u * scale, point.v * scale)
}

fn points_attribute(points: impl IntoIterator<Item = UvPoint>, scale: f64) -> String {
    points
        .into_iter()
        .map(|p| {
            let (x, y) = to_canvas(p, scale);
            format!("{x:.3},{y:.3}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Zeichnet Polygon, Triangulation und Hülle in UV-Koordinaten (y = v, also Nordpol oben).
/// Eine unvollständige Triangulation bekommt einen roten Rahmen.
pub fn render_region_svg(polygon: &UvPolygon, triangulation: &Triangulation, scale: f64) -> Document {
    let points = polygon.points();

    let triangles = triangulation
        .uv_triangles(points)
        .fold(Group::new().set("id", "triangles"), |group, triangle| {
            let corners = [triangle.a, triangle.b, triangle.c].map(UvPoint::from);
            group.add(
                Polygon::new()
                    .set("class", "triangle")
                    .set("points", points_attribute(corners, scale)),
            )
        });

    let bounds = polygon.bounds();
    let (bx, by) = to_canvas(UvPoint::new(bounds.min_u, bounds.min_v), scale);

    let vertices = points.iter().fold(Group::new().set("id", "vertices"), |group, &point| {
        let (cx, cy) = to_canvas(point, scale);
        group.add(
            Circle::new()
                .set("class", "vertex")
                .set("cx", cx)
                .set("cy", cy)
                .set("r", 3.0),
        )
    });

    let mut document = Document::new()
        .set("viewBox", (0.0, 0.0, scale, scale))
        .set("width", scale)
        .set("height", scale)
        .add(Style::new(STYLE))
        .add(
            Rectangle::new()
                .set("class", "background")
                .set("width", scale)
                .set("height", scale),
        )
        .add(
            Rectangle::new()
                .set("class", "bounds")
                .set("x", bx)
                .set("y", by)
                .set("width", bounds.width() * scale)
                .set("height", bounds.height() * scale),
        )
        .add(triangles)
        .add(
            Polygon::new()
                .set("class", "outline")
                .set("points", points_attribute(points.iter().copied(), scale)),
        )
        .add(vertices);

    if !triangulation.is_complete() {
        document = document.add(
            Rectangle::new()
                .set("class", "incomplete")
                .set("width", scale)
                .set("height", scale),
        );
    }

    document
}

/// Trianguliert die Punkte und schreibt das Debug-SVG nach `path`.
pub fn export_region_svg(path: impl AsRef<Path>, points: &[UvPoint]) -> Result<(), ExportError> {
    let polygon = UvPolygon::new(points.to_vec())?;
    let triangulation = triangulate_uv(polygon.points());
    let document = render_region_svg(&polygon, &triangulation, SVG_CANVAS_SIZE);
    svg::save(path.as_ref(), &document)?;
    info!(
        "Debug SVG '{}' wurde erstellt ({} Punkte, {} Dreiecke).",
        path.as_ref().display(),
        polygon.len(),
        triangulation.triangle_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l_shape() -> UvPolygon {
        UvPolygon::new(vec![
            UvPoint::new(0.1, 0.1),
            UvPoint::new(0.5, 0.1),
            UvPoint::new(0.5, 0.3),
            UvPoint::new(0.3, 0.3),
            UvPoint::new(0.3, 0.5),
            UvPoint::new(0.1, 0.5),
        ])
        .unwrap()
    }

    #[test]
    fn test_render_contains_every_triangle() {
        let polygon = l_shape();
        let triangulation = triangulate_uv(polygon.points());
        let svg = render_region_svg(&polygon, &triangulation, 1000.0).to_string();

        assert_eq!(svg.matches("class=\"triangle\"").count(), 4);
        assert_eq!(svg.matches("<circle").count(), 6);
        assert!(svg.contains("100.000,100.000 500.000,100.000"));
        assert!(!svg.contains("class=\"incomplete\""));
    }

    #[test]
    fn test_incomplete_triangulation_is_flagged() {
        let polygon = l_shape();
        let partial = triangulate_uv(&polygon.points()[..2]);
        let svg = render_region_svg(&polygon, &partial, 100.0).to_string();
        assert!(svg.contains("class=\"incomplete\""));
        assert_eq!(svg.matches("class=\"triangle\"").count(), 0);
    }

    #[test]
    fn test_export_rejects_too_few_points() {
        let path = std::env::temp_dir().join("showroom_regions_never_written.svg");
        let result = export_region_svg(&path, &[UvPoint::new(0.1, 0.1)]);
        assert!(matches!(
            result,
            Err(ExportError::Math(MathError::InsufficientPoints { .. }))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_export_writes_file() {
        let path = std::env::temp_dir().join("showroom_regions_export_test.svg");
        export_region_svg(&path, l_shape().points()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<svg"));
        let _ = std::fs::remove_file(&path);
    }
}
