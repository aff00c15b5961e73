//! PyO3 bindings for topology validation.
//!
//! Rings are lists of (x, y) tuples in projected metres. Reports come back as
//! plain dicts: {"valid": bool, "errors": [{"type", "message", "severity", ...}]}.

use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::geom::{Point, Polygon, Ring};
use crate::topology::{PlanarEngine, TopologyConfig, TopologyValidator, ValidationReport};

type PyRing = Vec<(f64, f64)>;

fn to_polygon(rings: Vec<PyRing>) -> Polygon {
    let mut rings = rings
        .into_iter()
        .map(|r| r.into_iter().map(Point::from).collect::<Ring>());
    let exterior = rings.next().unwrap_or_default();
    Polygon::new(exterior, rings.collect())
}

fn report_to_dict<'py>(py: Python<'py>, report: &ValidationReport) -> PyResult<Bound<'py, PyDict>> {
    let errors = report
        .issues
        .iter()
        .map(|issue| {
            let d = PyDict::new(py);
            d.set_item("type", issue.kind.as_str())?;
            d.set_item("message", &issue.message)?;
            d.set_item("severity", issue.severity.as_str())?;
            if let Some(p) = issue.location {
                d.set_item("location", (p.x, p.y))?;
            }
            if let Some(i) = issue.vertex_index {
                d.set_item("vertex_index", i)?;
            }
            if !issue.polygons.is_empty() {
                d.set_item("polygons", issue.polygons.clone())?;
            }
            Ok(d)
        })
        .collect::<PyResult<Vec<_>>>()?;

    let out = PyDict::new(py);
    out.set_item("valid", report.valid)?;
    out.set_item("errors", errors)?;
    Ok(out)
}

/// Validate one polygon given as a list of rings (exterior first).
#[pyfunction]
#[pyo3(signature = (rings, sliver_max_area=1.0))]
pub fn validate_polygon_topology<'py>(
    py: Python<'py>,
    rings: Vec<PyRing>,
    sliver_max_area: f64,
) -> PyResult<Bound<'py, PyDict>> {
    let polygon = to_polygon(rings);
    let config = TopologyConfig {
        sliver_max_area,
        ..TopologyConfig::default()
    };
    let report = py.allow_threads(move || {
        TopologyValidator::new(PlanarEngine, config).validate_polygon(&polygon)
    });
    report_to_dict(py, &report)
}

/// Validate several polygons, including pairwise gaps and overlaps.
#[pyfunction]
#[pyo3(signature = (polygons, gap_tolerance=0.5, gap_max_distance=10.0, min_overlap_area=0.1))]
pub fn validate_multi_polygon_topology<'py>(
    py: Python<'py>,
    polygons: Vec<Vec<PyRing>>,
    gap_tolerance: f64,
    gap_max_distance: f64,
    min_overlap_area: f64,
) -> PyResult<Bound<'py, PyDict>> {
    let polygons: Vec<Polygon> = polygons.into_iter().map(to_polygon).collect();
    let config = TopologyConfig {
        gap_tolerance,
        gap_max_distance,
        min_overlap_area,
        ..TopologyConfig::default()
    };
    config
        .validate()
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?;
    let report = py.allow_threads(move || {
        TopologyValidator::new(PlanarEngine, config).validate_polygons(&polygons)
    });
    report_to_dict(py, &report)
}
