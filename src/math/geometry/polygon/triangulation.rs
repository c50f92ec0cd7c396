// src/math/geometry/polygon/triangulation.rs
use crate::math::{types::*, utils::*};
use bevy::log::debug;

/// Obergrenze für Ear-Clipping-Durchläufe: `ITERATION_CAP_FACTOR × Punktanzahl`.
pub const ITERATION_CAP_FACTOR: usize = 2;

/// Dreieck im UV-Raum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvTriangle {
    pub a: DVec2,
    pub b: DVec2,
    pub c: DVec2,
}

impl UvTriangle {
    pub fn new(a: DVec2, b: DVec2, c: DVec2) -> Self {
        Self { a, b, c }
    }

    /// Doppelte, vorzeichenbehaftete Fläche (positiv für CCW)
    fn signed_area_doubled(&self) -> f64 {
        (self.b - self.a).perp_dot(self.c - self.a)
    }

    pub fn area(&self) -> f64 {
        0.5 * self.signed_area_doubled().abs()
    }

    /// Prüft ob ein Punkt im Dreieck liegt (Kanten inklusive).
    /// Baryzentrischer Vorzeichentest, unabhängig von der Orientierung; Vorzeichen mit
    /// `|d| <= tolerance` zählen als "auf der Kante". Rundungsrauschen bei kollinearen
    /// Punkten darf ein Ohr nicht freigeben.
    pub fn contains_point(&self, point: DVec2, tolerance: f64) -> bool {
        let sign = |p1: DVec2, p2: DVec2, p3: DVec2| -> f64 { (p1 - p3).perp_dot(p2 - p3) };

        let d1 = sign(point, self.a, self.b);
        let d2 = sign(point, self.b, self.c);
        let d3 = sign(point, self.c, self.a);

        let has_neg = (d1 < -tolerance) || (d2 < -tolerance) || (d3 < -tolerance);
        let has_pos = (d1 > tolerance) || (d2 > tolerance) || (d3 > tolerance);

        !(has_neg && has_pos)
    }
}

/// Ergebnis einer Triangulation: Indextripel in die Eingabepunkte.
///
/// `complete == false` heißt, der Algorithmus hat vorzeitig aufgegeben (kein Ohr
/// gefunden oder Iterationslimit). Die bis dahin erzeugten Dreiecke bleiben gültig
/// und können trotzdem gerendert werden.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Triangulation {
    triangles: Vec<[usize; 3]>,
    iterations: usize,
    complete: bool,
}

impl Triangulation {
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Anzahl der Ohr-Suchdurchläufe
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Flache Indexliste (Länge ist ein Vielfaches von 3), wie sie ein Index-Buffer erwartet
    pub fn flat_indices(&self) -> Vec<u32> {
        self.triangles
            .iter()
            .flat_map(|triangle| triangle.iter().map(|&index| index as u32))
            .collect()
    }

    /// Die Dreiecke mit ihren Koordinaten
    pub fn uv_triangles<'a>(&'a self, points: &'a [UvPoint]) -> impl Iterator<Item = UvTriangle> + 'a {
        self.triangles.iter().map(move |&[a, b, c]| {
            UvTriangle::new(points[a].as_dvec2(), points[b].as_dvec2(), points[c].as_dvec2())
        })
    }

    /// Summe der Dreiecksflächen im UV-Raum
    pub fn area_sum(&self, points: &[UvPoint]) -> f64 {
        self.uv_triangles(points).map(|triangle| triangle.area()).sum()
    }
}

/// Ear-Clipping-Triangulator für einfache (auch konkave) Polygone im UV-Raum.
///
/// Bei fehlerhafter Eingabe (Selbstüberschneidung, doppelte Punkte, Kollinearität)
/// wird nie abgebrochen: das Ergebnis ist dann eine unvollständige [`Triangulation`].
#[derive(Debug, Clone, Copy)]
pub struct PolygonTriangulator {
    tolerance: f64,
}

impl Default for PolygonTriangulator {
    fn default() -> Self {
        Self {
            tolerance: constants::AREA_EPSILON,
        }
    }
}

impl PolygonTriangulator {
    /// Trianguliert die Punkte als implizit geschlossenes Polygon.
    /// Der letzte Punkt sollte NICHT mit dem ersten identisch sein.
    pub fn triangulate(&self, points: &[UvPoint]) -> Triangulation {
        let n = points.len();
        if n < 3 {
            return Triangulation::default();
        }
        if n == 3 {
            return Triangulation {
                triangles: vec![[0, 1, 2]],
                iterations: 0,
                complete: true,
            };
        }

        let vertices: Vec<DVec2> = points.iter().map(UvPoint::as_dvec2).collect();
        // Negative Fläche → im Uhrzeigersinn
        let is_ccw = simple_geometry::shoelace_signed_area(&vertices) >= 0.0;

        let mut remaining: Vec<usize> = (0..n).collect();
        let mut triangles = Vec::with_capacity(n - 2);
        let max_iterations = ITERATION_CAP_FACTOR * n;
        let mut iterations = 0;

        while remaining.len() > 3 && iterations < max_iterations {
            iterations += 1;
            let Some(ear) = self.find_ear(&vertices, &remaining, is_ccw) else {
                break;
            };
            let m = remaining.len();
            triangles.push([remaining[(ear + m - 1) % m], remaining[ear], remaining[(ear + 1) % m]]);
            remaining.remove(ear);
        }

        let complete = remaining.len() == 3;
        if complete {
            triangles.push([remaining[0], remaining[1], remaining[2]]);
        } else {
            debug!(
                "Ear clipping gave up after {} iterations: {} of {} vertices left, {} triangles kept.",
                iterations,
                remaining.len(),
                n,
                triangles.len()
            );
        }

        Triangulation {
            triangles,
            iterations,
            complete,
        }
    }

    /// Sucht die erste Ecke in `remaining`, die ein Ohr bildet, und gibt ihre Position zurück.
    fn find_ear(&self, vertices: &[DVec2], remaining: &[usize], is_ccw: bool) -> Option<usize> {
        let m = remaining.len();
        (0..m).find(|&i| {
            let idx_prev = (i + m - 1) % m;
            let idx_next = (i + 1) % m;
            let p_prev = vertices[remaining[idx_prev]];
            let p_curr = vertices[remaining[i]];
            let p_next = vertices[remaining[idx_next]];

            // 1. Konvex bezüglich der Polygon-Orientierung?
            let cross_z = (p_curr - p_prev).perp_dot(p_next - p_prev);
            let is_convex_turn = if is_ccw {
                cross_z > self.tolerance
            } else {
                cross_z < -self.tolerance
            };
            if !is_convex_turn {
                return false;
            }

            // 2. Liegt kein anderer verbleibender Punkt im Kandidaten-Dreieck?
            let candidate = UvTriangle::new(p_prev, p_curr, p_next);
            remaining.iter().enumerate().all(|(k, &vertex_index)| {
                if k == idx_prev || k == i || k == idx_next {
                    return true;
                }
                let vertex = vertices[vertex_index];
                // Duplikate einer Ecke blockieren das Ohr nicht
                if vertex == p_prev || vertex == p_curr || vertex == p_next {
                    return true;
                }
                !candidate.contains_point(vertex, self.tolerance)
            })
        })
    }
}

/// Trianguliert mit den Standard-Einstellungen
pub fn triangulate_uv(points: &[UvPoint]) -> Triangulation {
    PolygonTriangulator::default().triangulate(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::geometry::polygon::core::UvPolygon;
    use approx::assert_relative_eq;
    use geo::{Area, Contains, LineString, Point, Polygon as GeoPolygon, Triangle as GeoTriangle, coord};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn uv(points: &[(f64, f64)]) -> Vec<UvPoint> {
        points.iter().map(|&(u, v)| UvPoint::new(u, v)).collect()
    }

    fn geo_polygon(points: &[UvPoint]) -> GeoPolygon<f64> {
        let ring: Vec<(f64, f64)> = points.iter().map(|p| (p.u, p.v)).collect();
        GeoPolygon::new(LineString::from(ring), vec![])
    }

    /// L-Form: Quadrat 0.2..0.6 ohne das obere rechte Viertel (0.4..0.6, 0.4..0.6)
    fn l_shape() -> Vec<UvPoint> {
        uv(&[
            (0.2, 0.2),
            (0.6, 0.2),
            (0.6, 0.4),
            (0.4, 0.4),
            (0.4, 0.6),
            (0.2, 0.6),
        ])
    }

    fn random_convex_polygon(rng: &mut StdRng, n: usize) -> Vec<UvPoint> {
        let center = UvPoint::new(rng.random_range(0.3..0.7), rng.random_range(0.3..0.7));
        let radius = rng.random_range(0.05..0.2);
        (0..n)
            .map(|i| {
                // Ein Winkel pro Sektor: die Punkte bleiben sortiert und auf dem Kreis
                let sector = std::f64::consts::TAU / n as f64;
                let angle = (i as f64 + rng.random_range(0.1..0.9)) * sector;
                UvPoint::new(
                    center.u + radius * angle.cos(),
                    center.v + radius * angle.sin(),
                )
            })
            .collect()
    }

    #[test]
    fn test_triangle_passes_through() {
        let points = uv(&[(0.1, 0.1), (0.2, 0.1), (0.1, 0.2)]);
        let result = triangulate_uv(&points);
        assert_eq!(result.flat_indices(), vec![0, 1, 2]);
        assert!(result.is_complete());
    }

    #[test]
    fn test_fewer_than_three_points_is_empty() {
        let result = triangulate_uv(&uv(&[(0.1, 0.1), (0.2, 0.2)]));
        assert!(result.is_empty());
        assert!(!result.is_complete());
        assert!(triangulate_uv(&[]).is_empty());
    }

    #[test]
    fn test_square_scenario() {
        let points = uv(&[(0.3, 0.3), (0.7, 0.3), (0.7, 0.7), (0.3, 0.7)]);
        let result = triangulate_uv(&points);
        assert_eq!(result.triangle_count(), 2);
        assert!(result.is_complete());
        assert_relative_eq!(result.area_sum(&points), 0.16, epsilon = 1e-12);
    }

    #[test]
    fn test_convex_polygons_give_n_minus_two_triangles() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 3..40 {
            let mut points = random_convex_polygon(&mut rng, n);
            if n % 2 == 0 {
                points.reverse(); // auch im Uhrzeigersinn
            }
            let result = triangulate_uv(&points);
            assert_eq!(result.triangle_count(), n - 2, "n = {n}");
            assert!(result.is_complete());

            let shoelace = UvPolygon::new(points.clone()).unwrap().area();
            assert_relative_eq!(result.area_sum(&points), shoelace, epsilon = 1e-9);
            assert_relative_eq!(geo_polygon(&points).unsigned_area(), shoelace, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_l_shape_avoids_notch() {
        for points in [l_shape(), l_shape().into_iter().rev().collect()] {
            let result = triangulate_uv(&points);
            assert_eq!(result.triangle_count(), 4);
            assert!(result.is_complete());
            assert_relative_eq!(result.area_sum(&points), 0.12, epsilon = 1e-12);

            // Stichproben in der Aussparung direkt am reflexen Eckpunkt (0.4, 0.4)
            let notch_samples = [
                DVec2::new(0.401, 0.401),
                DVec2::new(0.45, 0.41),
                DVec2::new(0.41, 0.45),
                DVec2::new(0.5, 0.5),
                DVec2::new(0.59, 0.59),
            ];
            for sample in notch_samples {
                assert!(
                    result.uv_triangles(&points).all(|t| {
                        let triangle = GeoTriangle::new(
                            coord! { x: t.a.x, y: t.a.y },
                            coord! { x: t.b.x, y: t.b.y },
                            coord! { x: t.c.x, y: t.c.y },
                        );
                        !triangle.contains(&Point::new(sample.x, sample.y))
                    }),
                    "notch sample {sample:?} covered"
                );
            }

            // Jedes Dreieck liegt innerhalb des L (Schwerpunkt-Test gegen geo)
            let l = geo_polygon(&points);
            for t in result.uv_triangles(&points) {
                let centroid = (t.a + t.b + t.c) / 3.0;
                assert!(l.contains(&Point::new(centroid.x, centroid.y)));
            }
        }
    }

    #[test]
    fn test_concave_comb() {
        // Kamm mit drei Zinken: stark konkav
        let points = uv(&[
            (0.1, 0.1),
            (0.7, 0.1),
            (0.7, 0.5),
            (0.6, 0.5),
            (0.6, 0.2),
            (0.5, 0.2),
            (0.5, 0.5),
            (0.4, 0.5),
            (0.4, 0.2),
            (0.3, 0.2),
            (0.3, 0.5),
            (0.1, 0.5),
        ]);
        let result = triangulate_uv(&points);
        assert!(result.is_complete());
        assert_eq!(result.triangle_count(), points.len() - 2);
        let expected = geo_polygon(&points).unsigned_area();
        assert_relative_eq!(result.area_sum(&points), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_self_intersecting_input_terminates() {
        let bowtie = uv(&[(0.1, 0.1), (0.5, 0.5), (0.5, 0.1), (0.1, 0.5)]);
        let result = triangulate_uv(&bowtie);
        assert!(result.iterations() <= 2 * bowtie.len());
        assert!(result.triangle_count() <= bowtie.len() - 2);
    }

    #[test]
    fn test_degenerate_inputs_soft_fail() {
        let same = vec![UvPoint::new(0.4, 0.4); 6];
        let result = triangulate_uv(&same);
        assert!(!result.is_complete());
        assert!(result.is_empty());

        let collinear = uv(&[(0.1, 0.1), (0.2, 0.1), (0.3, 0.1), (0.4, 0.1)]);
        let result = triangulate_uv(&collinear);
        assert!(result.iterations() <= 2 * collinear.len());
    }

    #[test]
    fn test_duplicate_points_still_triangulate() {
        // Doppelklick auf dieselbe Ecke
        let points = uv(&[(0.3, 0.3), (0.7, 0.3), (0.7, 0.3), (0.7, 0.7), (0.3, 0.7)]);
        let result = triangulate_uv(&points);
        assert!(result.iterations() <= 2 * points.len());
        assert_relative_eq!(result.area_sum(&points), 0.16, epsilon = 1e-12);
    }

    #[test]
    fn test_random_input_is_bounded() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let n = rng.random_range(3..30);
            let points: Vec<UvPoint> = (0..n)
                .map(|_| UvPoint::new(rng.random_range(0.0..1.0), rng.random_range(0.0..1.0)))
                .collect();
            let result = triangulate_uv(&points);
            assert!(result.iterations() <= ITERATION_CAP_FACTOR * n);
            assert!(result.triangle_count() <= n - 2);
            let flat = result.flat_indices();
            assert_eq!(flat.len() % 3, 0);
            assert!(flat.iter().all(|&i| (i as usize) < n));
        }
    }
}
