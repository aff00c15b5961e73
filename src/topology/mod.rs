//! Polygon topology checks layered over a pluggable geometry engine.
//!
//! Findings are data: every rule produces [`TopologyIssue`] records tagged
//! with a severity, and a report is valid when it holds no errors.

pub mod config;
pub mod engine;
pub mod rules;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geom::{Point, Polygon};

pub use config::TopologyConfig;
pub use engine::PlanarEngine;
pub use rules::TopologyValidator;

/// Geometry capabilities the rules rely on. Implemented by an adapter to
/// whichever geometry engine is in use.
pub trait GeometryEngine {
    /// False when any ring crosses or overlaps itself.
    fn is_simple(&self, polygon: &Polygon) -> bool;

    /// Planar area in square metres. Positive for a clockwise exterior ring,
    /// negative for an anti-clockwise one.
    fn signed_area(&self, polygon: &Polygon) -> f64;

    /// Shortest distance between two polygons in metres, zero when they touch
    /// or overlap. `None` when it cannot be measured.
    fn distance(&self, a: &Polygon, b: &Polygon) -> Option<f64>;

    /// Areal intersection of two polygons; empty when they do not overlap.
    fn intersection(&self, a: &Polygon, b: &Polygon) -> Vec<Polygon>;
}

impl<E: GeometryEngine + ?Sized> GeometryEngine for &E {
    fn is_simple(&self, polygon: &Polygon) -> bool {
        (**self).is_simple(polygon)
    }

    fn signed_area(&self, polygon: &Polygon) -> f64 {
        (**self).signed_area(polygon)
    }

    fn distance(&self, a: &Polygon, b: &Polygon) -> Option<f64> {
        (**self).distance(a, b)
    }

    fn intersection(&self, a: &Polygon, b: &Polygon) -> Vec<Polygon> {
        (**self).intersection(a, b)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    SelfIntersection,
    DuplicateVertex,
    Gap,
    Overlap,
    Sliver,
    DegenerateRing,
    Orientation,
    UnclosedRing,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SelfIntersection => "self-intersection",
            Self::DuplicateVertex => "duplicate-vertex",
            Self::Gap => "gap",
            Self::Overlap => "overlap",
            Self::Sliver => "sliver",
            Self::DegenerateRing => "degenerate-ring",
            Self::Orientation => "orientation",
            Self::UnclosedRing => "unclosed-ring",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// A single topology finding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TopologyIssue {
    pub kind: IssueKind,
    pub message: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Point>,
    /// Offending vertex within the exterior ring, for per-vertex rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertex_index: Option<usize>,
    /// Indices of the polygons involved when validating a collection.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub polygons: Vec<usize>,
}

impl TopologyIssue {
    pub fn new(kind: IssueKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            severity,
            location: None,
            vertex_index: None,
            polygons: Vec::new(),
        }
    }

    pub fn error(kind: IssueKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Error, message)
    }

    pub fn warning(kind: IssueKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Warning, message)
    }

    pub fn at_vertex(mut self, index: usize, location: Point) -> Self {
        self.vertex_index = Some(index);
        self.location = Some(location);
        self
    }

    pub fn with_polygons(mut self, polygons: Vec<usize>) -> Self {
        self.polygons = polygons;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Outcome of a validation run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub issues: Vec<TopologyIssue>,
}

impl ValidationReport {
    pub fn from_issues(issues: Vec<TopologyIssue>) -> Self {
        let valid = !issues.iter().any(TopologyIssue::is_error);
        Self { valid, issues }
    }

    pub fn error_count(&self) -> usize {
        self.issues.iter().filter(|i| i.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues.len() - self.error_count()
    }

    pub fn of_kind(&self, kind: IssueKind) -> impl Iterator<Item = &TopologyIssue> {
        self.issues.iter().filter(move |i| i.kind == kind)
    }
}
