//! Rule evaluation: per-polygon checks, pairwise gap and overlap detection,
//! and the aggregate multi-polygon report.

use tracing::{debug, trace};

use crate::error::{GeomError, RingError};
use crate::geom::Polygon;
use crate::proj::utm::{project_polygon, UtmZone};
use crate::topology::{
    GeometryEngine, IssueKind, TopologyConfig, TopologyIssue, ValidationReport,
};

/// Minimum stored points of a usable ring: three distinct vertices plus the closing one.
pub const MIN_RING_POINTS: usize = 4;

/// Stateless rule evaluator over a [`GeometryEngine`].
pub struct TopologyValidator<E> {
    engine: E,
    config: TopologyConfig,
}

impl<E: GeometryEngine> TopologyValidator<E> {
    pub fn new(engine: E, config: TopologyConfig) -> Self {
        Self { engine, config }
    }

    pub fn with_default_config(engine: E) -> Self {
        Self::new(engine, TopologyConfig::default())
    }

    pub fn config(&self) -> &TopologyConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Validate a single polygon.
    pub fn validate_polygon(&self, polygon: &Polygon) -> ValidationReport {
        let issues = self.polygon_issues(polygon);
        let report = ValidationReport::from_issues(issues);
        debug!(
            valid = report.valid,
            errors = report.error_count(),
            warnings = report.warning_count(),
            "validated polygon"
        );
        report
    }

    /// Whether |area| falls below the configured sliver threshold.
    pub fn is_sliver(&self, polygon: &Polygon) -> bool {
        detect_sliver(&self.engine, polygon, self.config.sliver_max_area)
    }

    /// Pairs that are near each other without touching.
    ///
    /// Only distances strictly inside (gap_tolerance, gap_max_distance) are
    /// reported; far-apart neighbours are not a gap.
    pub fn detect_gaps(&self, polygons: &[Polygon]) -> Vec<TopologyIssue> {
        let mut gaps = Vec::new();
        for (i, a) in polygons.iter().enumerate() {
            for (j, b) in polygons.iter().enumerate().skip(i + 1) {
                let Some(distance) = self.engine.distance(a, b) else {
                    continue;
                };
                if distance > self.config.gap_tolerance && distance < self.config.gap_max_distance {
                    gaps.push(
                        TopologyIssue::warning(
                            IssueKind::Gap,
                            format!("Gap of {distance:.2} m between polygons {i} and {j}"),
                        )
                        .with_polygons(vec![i, j]),
                    );
                }
            }
        }
        gaps
    }

    /// Total area shared by two polygons.
    pub fn overlap_area(&self, a: &Polygon, b: &Polygon) -> f64 {
        self.engine
            .intersection(a, b)
            .iter()
            .map(|piece| self.engine.signed_area(piece).abs())
            .sum()
    }

    /// Overlap finding for a pair, if the shared area reaches the configured minimum.
    pub fn detect_overlap(&self, a: &Polygon, b: &Polygon) -> Option<TopologyIssue> {
        let area = self.overlap_area(a, b);
        (area >= self.config.min_overlap_area).then(|| {
            TopologyIssue::error(
                IssueKind::Overlap,
                format!("Overlap of {area:.2} m² detected"),
            )
        })
    }

    /// Validate a collection: every polygon on its own, then every pair for
    /// gaps and overlaps.
    pub fn validate_polygons(&self, polygons: &[Polygon]) -> ValidationReport {
        let mut issues = Vec::new();

        for (i, polygon) in polygons.iter().enumerate() {
            issues.extend(
                self.polygon_issues(polygon)
                    .into_iter()
                    .map(|issue| issue.with_polygons(vec![i])),
            );
        }

        issues.extend(self.detect_gaps(polygons));

        for (i, a) in polygons.iter().enumerate() {
            for (j, b) in polygons.iter().enumerate().skip(i + 1) {
                if let Some(overlap) = self.detect_overlap(a, b) {
                    issues.push(overlap.with_polygons(vec![i, j]));
                }
            }
        }

        for issue in &issues {
            trace!(kind = %issue.kind, severity = issue.severity.as_str(), "{}", issue.message);
        }

        let report = ValidationReport::from_issues(issues);
        debug!(
            polygons = polygons.len(),
            valid = report.valid,
            errors = report.error_count(),
            warnings = report.warning_count(),
            "validated polygon collection"
        );
        report
    }

    /// Validate lon/lat polygons by projecting them into one UTM zone first,
    /// so areas and distances are measured in metres.
    ///
    /// Without an explicit zone, the zone containing the first vertex is used.
    pub fn validate_geographic(
        &self,
        polygons: &[Polygon],
        zone: Option<UtmZone>,
    ) -> Result<ValidationReport, GeomError> {
        let zone = match zone {
            Some(zone) => zone,
            None => {
                let first = polygons
                    .iter()
                    .find_map(|p| p.exterior.points().first())
                    .ok_or(RingError::Empty)?;
                UtmZone::containing(first.x, first.y)
            }
        };
        debug!(zone = zone.number, southern = zone.southern, "projecting polygons");

        let projected = polygons
            .iter()
            .map(|p| project_polygon(p, zone))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.validate_polygons(&projected))
    }

    fn polygon_issues(&self, polygon: &Polygon) -> Vec<TopologyIssue> {
        let mut issues = Vec::new();
        let ring = &polygon.exterior;
        let points = ring.points();

        if !self.engine.is_simple(polygon) {
            issues.push(TopologyIssue::error(
                IssueKind::SelfIntersection,
                "Polygon has self-intersections",
            ));
        }

        let area = self.engine.signed_area(polygon);
        if area.abs() < self.config.sliver_max_area {
            issues.push(TopologyIssue::warning(
                IssueKind::Sliver,
                format!(
                    "Polygon too thin (sliver): area {:.2} m² < {} m²",
                    area.abs(),
                    self.config.sliver_max_area
                ),
            ));
        }

        if points.len() < MIN_RING_POINTS {
            issues.push(TopologyIssue::error(
                IssueKind::DegenerateRing,
                format!(
                    "Invalid polygon: {} points, fewer than 3 unique vertices",
                    points.len()
                ),
            ));
        }

        if !points.is_empty() && !ring.is_closed() {
            issues.push(TopologyIssue::error(
                IssueKind::UnclosedRing,
                "Ring is not closed: first and last points differ",
            ));
        }

        for (i, pair) in points.windows(2).enumerate() {
            if pair[0] == pair[1] {
                issues.push(
                    TopologyIssue::warning(
                        IssueKind::DuplicateVertex,
                        format!("Duplicate consecutive vertices at index {i}"),
                    )
                    .at_vertex(i, pair[0]),
                );
            }
        }

        if area < 0.0 {
            issues.push(TopologyIssue::warning(
                IssueKind::Orientation,
                "Exterior ring is anti-clockwise (should be clockwise)",
            ));
        }

        issues
    }
}

/// Whether |area| of `polygon` is below `max_area` (m²).
pub fn detect_sliver<E: GeometryEngine + ?Sized>(engine: &E, polygon: &Polygon, max_area: f64) -> bool {
    engine.signed_area(polygon).abs() < max_area
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Point, Ring};
    use crate::topology::{PlanarEngine, Severity};
    use approx::assert_relative_eq;

    fn square(x0: f64, y0: f64, size: f64) -> Polygon {
        Ring::new(vec![
            Point::new(x0, y0),
            Point::new(x0, y0 + size),
            Point::new(x0 + size, y0 + size),
            Point::new(x0 + size, y0),
            Point::new(x0, y0),
        ])
        .into()
    }

    fn polygon(coords: &[(f64, f64)]) -> Polygon {
        coords.iter().copied().collect::<Ring>().into()
    }

    fn validator() -> TopologyValidator<PlanarEngine> {
        TopologyValidator::with_default_config(PlanarEngine)
    }

    /// Planar engine with a fixed pairwise distance.
    struct FixedDistance(f64);

    impl GeometryEngine for FixedDistance {
        fn is_simple(&self, polygon: &Polygon) -> bool {
            PlanarEngine.is_simple(polygon)
        }
        fn signed_area(&self, polygon: &Polygon) -> f64 {
            PlanarEngine.signed_area(polygon)
        }
        fn distance(&self, _: &Polygon, _: &Polygon) -> Option<f64> {
            Some(self.0)
        }
        fn intersection(&self, a: &Polygon, b: &Polygon) -> Vec<Polygon> {
            PlanarEngine.intersection(a, b)
        }
    }

    #[test]
    fn test_clean_square_is_valid() {
        let report = validator().validate_polygon(&square(0.0, 0.0, 10.0));
        assert!(report.valid);
        assert!(report.issues.is_empty(), "{:?}", report.issues);
    }

    #[test]
    fn test_open_triangle_is_degenerate() {
        let report = validator().validate_polygon(&polygon(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0)]));
        assert!(!report.valid);
        let degenerate: Vec<_> = report.of_kind(IssueKind::DegenerateRing).collect();
        assert_eq!(degenerate.len(), 1);
        assert_eq!(degenerate[0].severity, Severity::Error);
        assert_eq!(report.of_kind(IssueKind::UnclosedRing).count(), 1);
    }

    #[test]
    fn test_closed_triangle_is_valid() {
        let report = validator().validate_polygon(&polygon(&[
            (0.0, 0.0),
            (0.0, 10.0),
            (10.0, 10.0),
            (0.0, 0.0),
        ]));
        assert!(report.valid, "{:?}", report.issues);
    }

    #[test]
    fn test_empty_ring_reported_not_panicking() {
        let report = validator().validate_polygon(&Polygon::default());
        assert!(!report.valid);
        assert_eq!(report.of_kind(IssueKind::DegenerateRing).count(), 1);
        assert_eq!(report.of_kind(IssueKind::UnclosedRing).count(), 0);
    }

    #[test]
    fn test_duplicate_vertex_index() {
        let report = validator().validate_polygon(&polygon(&[
            (0.0, 0.0),
            (0.0, 10.0),
            (10.0, 10.0),
            (10.0, 10.0),
            (10.0, 0.0),
            (0.0, 0.0),
        ]));
        assert!(report.valid);
        let dups: Vec<_> = report.of_kind(IssueKind::DuplicateVertex).collect();
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].severity, Severity::Warning);
        assert_eq!(dups[0].vertex_index, Some(2));
        assert_eq!(dups[0].location, Some(Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_self_intersection_is_error() {
        let report = validator().validate_polygon(&polygon(&[
            (0.0, 0.0),
            (10.0, 10.0),
            (10.0, 0.0),
            (0.0, 10.0),
            (0.0, 0.0),
        ]));
        assert!(!report.valid);
        assert_eq!(report.of_kind(IssueKind::SelfIntersection).count(), 1);
    }

    #[test]
    fn test_sliver_is_warning() {
        let thin = square(0.0, 0.0, 0.5);
        let report = validator().validate_polygon(&thin);
        assert!(report.valid);
        assert_eq!(report.of_kind(IssueKind::Sliver).count(), 1);
        assert!(validator().is_sliver(&thin));
        assert!(!validator().is_sliver(&square(0.0, 0.0, 2.0)));
    }

    #[test]
    fn test_sliver_threshold_is_configurable() {
        let config = TopologyConfig {
            sliver_max_area: 5.0,
            ..TopologyConfig::default()
        };
        let v = TopologyValidator::new(PlanarEngine, config);
        assert!(v.is_sliver(&square(0.0, 0.0, 2.0)));
    }

    #[test]
    fn test_anti_clockwise_ring_is_warning() {
        let report = validator().validate_polygon(&polygon(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (0.0, 10.0),
            (0.0, 0.0),
        ]));
        assert!(report.valid);
        assert_eq!(report.of_kind(IssueKind::Orientation).count(), 1);
    }

    #[test]
    fn test_overlapping_triangles_at_utm_magnitude() {
        let triangle = |c: [(f64, f64); 3]| -> Polygon {
            Ring::closed(c.iter().map(|&(x, y)| Point::new(x, y)).collect()).into()
        };
        let a = triangle([
            (500_009.1516, 8_000_008.768),
            (500_010.8723, 8_000_001.7673),
            (500_000.5795, 8_000_007.4884),
        ]);
        let b = triangle([
            (500_003.6716, 8_000_009.6722),
            (500_007.8035, 8_000_003.8305),
            (500_011.8916, 8_000_008.3159),
        ]);

        let report = validator().validate_polygons(&[a, b]);
        assert!(!report.valid);
        let overlaps: Vec<_> = report.of_kind(IssueKind::Overlap).collect();
        assert_eq!(overlaps.len(), 1);
        assert_eq!(overlaps[0].polygons, vec![0, 1]);
        assert_eq!(report.of_kind(IssueKind::SelfIntersection).count(), 0);
    }

    #[test]
    fn test_overlap_half_square_metre() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(9.95, 0.0, 10.0);
        let v = validator();
        assert_relative_eq!(v.overlap_area(&a, &b), 0.5, epsilon = 1e-6);

        let report = v.validate_polygons(&[a, b]);
        assert!(!report.valid);
        let overlaps: Vec<_> = report.of_kind(IssueKind::Overlap).collect();
        assert_eq!(overlaps.len(), 1);
        assert_eq!(overlaps[0].severity, Severity::Error);
        assert_eq!(overlaps[0].polygons, vec![0, 1]);
    }

    #[test]
    fn test_tiny_overlap_ignored() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(9.995, 0.0, 10.0);
        assert!(validator().detect_overlap(&a, &b).is_none());
    }

    #[test]
    fn test_gap_two_metres() {
        let report = validator().validate_polygons(&[square(0.0, 0.0, 10.0), square(12.0, 0.0, 10.0)]);
        assert!(report.valid);
        let gaps: Vec<_> = report.of_kind(IssueKind::Gap).collect();
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].severity, Severity::Warning);
        assert_eq!(gaps[0].polygons, vec![0, 1]);
    }

    #[test]
    fn test_far_apart_is_not_a_gap() {
        let report = validator().validate_polygons(&[square(0.0, 0.0, 10.0), square(60.0, 0.0, 10.0)]);
        assert_eq!(report.of_kind(IssueKind::Gap).count(), 0);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_touching_is_not_a_gap() {
        let report = validator().validate_polygons(&[square(0.0, 0.0, 10.0), square(10.0, 0.0, 10.0)]);
        assert!(report.issues.is_empty(), "{:?}", report.issues);
    }

    #[test]
    fn test_gap_bounds_are_exclusive() {
        let pair = [square(0.0, 0.0, 10.0), square(100.0, 0.0, 10.0)];
        for (distance, expected) in [(0.5, 0), (0.51, 1), (9.99, 1), (10.0, 0), (50.0, 0)] {
            let v = TopologyValidator::with_default_config(FixedDistance(distance));
            assert_eq!(v.detect_gaps(&pair).len(), expected, "distance = {distance}");
        }
    }

    #[test]
    fn test_gap_tolerance_from_config() {
        let config = TopologyConfig::default().with_gap_tolerance(3.0);
        let v = TopologyValidator::new(PlanarEngine, config);
        assert!(v.detect_gaps(&[square(0.0, 0.0, 10.0), square(12.0, 0.0, 10.0)]).is_empty());
    }

    #[test]
    fn test_collection_tags_polygon_index() {
        let report = validator().validate_polygons(&[
            square(0.0, 0.0, 10.0),
            polygon(&[(100.0, 0.0), (100.0, 10.0), (110.0, 10.0)]),
        ]);
        assert!(!report.valid);
        for issue in report.of_kind(IssueKind::DegenerateRing) {
            assert_eq!(issue.polygons, vec![1]);
        }
    }

    #[test]
    fn test_validator_by_reference() {
        let engine = PlanarEngine;
        let v = TopologyValidator::with_default_config(&engine);
        assert!(v.validate_polygon(&square(0.0, 0.0, 10.0)).valid);
    }

    #[test]
    fn test_validate_geographic_measures_in_metres() {
        // ~0.001 deg squares near Brasilia are roughly 110 m across
        let parcel = |lon0: f64| -> Polygon {
            Ring::new(vec![
                Point::new(lon0, -15.80),
                Point::new(lon0, -15.799),
                Point::new(lon0 + 0.001, -15.799),
                Point::new(lon0 + 0.001, -15.80),
                Point::new(lon0, -15.80),
            ])
            .into()
        };
        // Second parcel starts ~5 m east of the first
        let polygons = [parcel(-47.880), parcel(-47.87895)];
        let report = validator().validate_geographic(&polygons, None).unwrap();
        assert!(report.valid, "{:?}", report.issues);
        assert_eq!(report.of_kind(IssueKind::Gap).count(), 1);
        assert_eq!(report.of_kind(IssueKind::Sliver).count(), 0);
    }

    #[test]
    fn test_validate_geographic_requires_a_vertex() {
        let err = validator()
            .validate_geographic(&[Polygon::default()], None)
            .unwrap_err();
        assert!(matches!(err, GeomError::Ring(RingError::Empty)));
    }

    #[test]
    fn test_detect_sliver_free_function() {
        assert!(detect_sliver(&PlanarEngine, &square(0.0, 0.0, 0.9), 1.0));
        assert!(!detect_sliver(&PlanarEngine, &square(0.0, 0.0, 1.1), 1.0));
    }
}
