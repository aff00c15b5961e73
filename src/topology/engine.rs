//! `GeometryEngine` adapter over the `geo` crate for planar (projected,
//! metre-based) coordinates.

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{Area, BooleanOps, Coord, EuclideanDistance, Line, LineString};
use tracing::debug;

use crate::geom::{Point, Polygon, Ring};
use crate::topology::GeometryEngine;

/// Planar geometry engine. Coordinates are taken as metres, so geographic
/// polygons should be projected first (see `proj::utm::project_polygon`).
#[derive(Clone, Copy, Debug, Default)]
pub struct PlanarEngine;

impl PlanarEngine {
    pub fn new() -> Self {
        Self
    }
}

impl GeometryEngine for PlanarEngine {
    fn is_simple(&self, polygon: &Polygon) -> bool {
        polygon.rings().all(ring_is_simple)
    }

    fn signed_area(&self, polygon: &Polygon) -> f64 {
        // geo measures anti-clockwise as positive
        let exterior = geo::Polygon::new(to_line_string(&polygon.exterior), vec![]).signed_area();
        let holes: f64 = polygon
            .interiors
            .iter()
            .map(|r| geo::Polygon::new(to_line_string(r), vec![]).unsigned_area())
            .sum();
        let magnitude = (exterior.abs() - holes).max(0.0);
        if exterior > 0.0 {
            -magnitude
        } else {
            magnitude
        }
    }

    fn distance(&self, a: &Polygon, b: &Polygon) -> Option<f64> {
        if a.exterior.is_empty() || b.exterior.is_empty() {
            return None;
        }
        let d = to_geo(a).euclidean_distance(&to_geo(b));
        d.is_finite().then_some(d)
    }

    fn intersection(&self, a: &Polygon, b: &Polygon) -> Vec<Polygon> {
        if a.exterior.vertex_count() < 3 || b.exterior.vertex_count() < 3 {
            return Vec::new();
        }
        // Boolean ops expect valid input; self-intersections are reported separately
        if !self.is_simple(a) || !self.is_simple(b) {
            debug!("skipping intersection of non-simple polygons");
            return Vec::new();
        }
        // Shift to a local origin so UTM-sized coordinates keep their precision
        let origin = a.exterior.points()[0];
        let local = |p: &Polygon| to_geo(&translate(p, -origin.x, -origin.y));
        local(a)
            .intersection(&local(b))
            .into_iter()
            .map(|p| translate(&from_geo(&p), origin.x, origin.y))
            .collect()
    }
}

fn translate(polygon: &Polygon, dx: f64, dy: f64) -> Polygon {
    let shift = |r: &Ring| r.map_points(|p| Point::new(p.x + dx, p.y + dy));
    Polygon::new(shift(&polygon.exterior), polygon.interiors.iter().map(shift).collect())
}

fn to_line_string(ring: &Ring) -> LineString<f64> {
    ring.points()
        .iter()
        .map(|p| Coord { x: p.x, y: p.y })
        .collect::<Vec<_>>()
        .into()
}

fn to_geo(polygon: &Polygon) -> geo::Polygon<f64> {
    geo::Polygon::new(
        to_line_string(&polygon.exterior),
        polygon.interiors.iter().map(to_line_string).collect(),
    )
}

fn from_ring(ls: &LineString<f64>) -> Ring {
    ls.coords().map(|c| Point::new(c.x, c.y)).collect()
}

fn from_geo(polygon: &geo::Polygon<f64>) -> Polygon {
    Polygon::new(
        from_ring(polygon.exterior()),
        polygon.interiors().iter().map(from_ring).collect(),
    )
}

/// True when no two edges of the ring meet except neighbours at their
/// shared vertex. Repeated consecutive points are collapsed first.
fn ring_is_simple(ring: &Ring) -> bool {
    let mut coords: Vec<Coord<f64>> = Vec::with_capacity(ring.len() + 1);
    for p in ring.points() {
        let c = Coord { x: p.x, y: p.y };
        if coords.last() != Some(&c) {
            coords.push(c);
        }
    }
    if coords.len() > 1 && coords.first() != coords.last() {
        coords.push(coords[0]);
    }

    let edges: Vec<Line<f64>> = coords.windows(2).map(|w| Line::new(w[0], w[1])).collect();
    let n = edges.len();
    if n < 3 {
        return true;
    }

    for i in 0..n {
        for j in (i + 1)..n {
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            match line_intersection(edges[i], edges[j]) {
                None => {}
                Some(LineIntersection::SinglePoint { .. }) if adjacent => {}
                Some(_) => return false,
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(x0: f64, y0: f64, size: f64) -> Polygon {
        // Clockwise
        Ring::new(vec![
            Point::new(x0, y0),
            Point::new(x0, y0 + size),
            Point::new(x0 + size, y0 + size),
            Point::new(x0 + size, y0),
            Point::new(x0, y0),
        ])
        .into()
    }

    fn ring(coords: &[(f64, f64)]) -> Polygon {
        coords.iter().copied().collect::<Ring>().into()
    }

    #[test]
    fn test_signed_area_orientation() {
        let engine = PlanarEngine::new();
        assert_relative_eq!(engine.signed_area(&square(0.0, 0.0, 10.0)), 100.0);

        let ccw = ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]);
        assert_relative_eq!(engine.signed_area(&ccw), -100.0);
    }

    #[test]
    fn test_signed_area_subtracts_holes() {
        let mut polygon = square(0.0, 0.0, 10.0);
        polygon.interiors.push(Ring::new(vec![
            Point::new(2.0, 2.0),
            Point::new(4.0, 2.0),
            Point::new(4.0, 4.0),
            Point::new(2.0, 4.0),
            Point::new(2.0, 2.0),
        ]));
        assert_relative_eq!(PlanarEngine.signed_area(&polygon), 96.0);
    }

    #[test]
    fn test_simple_square() {
        assert!(PlanarEngine.is_simple(&square(0.0, 0.0, 10.0)));
    }

    #[test]
    fn test_bow_tie_is_not_simple() {
        let bow_tie = ring(&[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0), (0.0, 0.0)]);
        assert!(!PlanarEngine.is_simple(&bow_tie));
    }

    #[test]
    fn test_spike_is_not_simple() {
        // Edge doubles back over its predecessor
        let spike = ring(&[(0.0, 0.0), (0.0, 10.0), (0.0, 5.0), (10.0, 0.0), (0.0, 0.0)]);
        assert!(!PlanarEngine.is_simple(&spike));
    }

    #[test]
    fn test_duplicate_vertex_does_not_break_simplicity() {
        let dup = ring(&[
            (0.0, 0.0),
            (0.0, 10.0),
            (0.0, 10.0),
            (10.0, 10.0),
            (10.0, 0.0),
            (0.0, 0.0),
        ]);
        assert!(PlanarEngine.is_simple(&dup));
    }

    #[test]
    fn test_distance() {
        let a = square(0.0, 0.0, 10.0);
        assert_relative_eq!(PlanarEngine.distance(&a, &square(12.0, 0.0, 10.0)).unwrap(), 2.0);
        assert_relative_eq!(PlanarEngine.distance(&a, &square(5.0, 5.0, 10.0)).unwrap(), 0.0);
        assert_eq!(PlanarEngine.distance(&a, &Polygon::default()), None);
    }

    #[test]
    fn test_intersection_area() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(5.0, 5.0, 10.0);
        let pieces = PlanarEngine.intersection(&a, &b);
        let area: f64 = pieces.iter().map(|p| PlanarEngine.signed_area(p).abs()).sum();
        assert_relative_eq!(area, 25.0, epsilon = 1e-9);
    }

    #[test]
    fn test_intersection_of_triangles_at_utm_magnitude() {
        let a = ring(&[
            (500_009.1516, 8_000_008.768),
            (500_010.8723, 8_000_001.7673),
            (500_000.5795, 8_000_007.4884),
            (500_009.1516, 8_000_008.768),
        ]);
        let b = ring(&[
            (500_003.6716, 8_000_009.6722),
            (500_007.8035, 8_000_003.8305),
            (500_011.8916, 8_000_008.3159),
            (500_003.6716, 8_000_009.6722),
        ]);
        assert!(PlanarEngine.is_simple(&a));
        assert!(PlanarEngine.is_simple(&b));

        let pieces = PlanarEngine.intersection(&a, &b);
        let area: f64 = pieces.iter().map(|p| PlanarEngine.signed_area(p).abs()).sum();
        assert_relative_eq!(area, 13.8569, epsilon = 1e-3);
        for piece in &pieces {
            for p in piece.exterior.points() {
                assert!(p.x > 499_999.0 && p.x < 500_013.0, "x = {}", p.x);
                assert!(p.y > 8_000_001.0 && p.y < 8_000_010.0, "y = {}", p.y);
            }
        }
    }

    #[test]
    fn test_disjoint_intersection_is_empty() {
        let pieces = PlanarEngine.intersection(&square(0.0, 0.0, 10.0), &square(20.0, 0.0, 10.0));
        assert!(pieces.is_empty());
    }
}
