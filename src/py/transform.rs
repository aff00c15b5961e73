//! PyO3 binding for batch conversion between geographic SIRGAS 2000 / WGS 84
//! and their UTM projections, with proj4rs handling any other CRS pair.

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::proj::pipeline::Pipeline;

/// Convert survey coordinates between CRSes in one call.
///
/// EPSG:4326, EPSG:4674, SIRGAS 2000 / UTM (3197x-3198x) and WGS 84 / UTM
/// (326xx, 327xx) run natively; other CRS strings go through proj4rs.
///
/// Args:
///     x: 1D array of longitudes (degrees) or eastings (metres).
///     y: 1D array of latitudes (degrees) or northings (metres).
///     src_crs: CRS the input is in, e.g. "EPSG:4674".
///     dst_crs: CRS to convert into, e.g. "EPSG:31983" (SIRGAS 2000 / UTM 23S).
///
/// Returns:
///     Tuple of (x_out, y_out) arrays in `dst_crs`.
///
/// Raises:
///     ValueError: on mismatched lengths, an unknown CRS or a failed point.
#[pyfunction]
#[pyo3(signature = (x, y, src_crs, dst_crs))]
#[allow(clippy::type_complexity)]
pub fn transform_points<'py>(
    py: Python<'py>,
    x: PyReadonlyArray1<'py, f64>,
    y: PyReadonlyArray1<'py, f64>,
    src_crs: &str,
    dst_crs: &str,
) -> PyResult<(Bound<'py, PyArray1<f64>>, Bound<'py, PyArray1<f64>>)> {
    let x_view = x.as_array();
    let y_view = y.as_array();

    if x_view.len() != y_view.len() {
        return Err(PyValueError::new_err(format!(
            "coordinate arrays differ in length: {} x values, {} y values",
            x_view.len(),
            y_view.len()
        )));
    }

    let mut coords: Vec<(f64, f64)> = x_view.iter().copied().zip(y_view.iter().copied()).collect();
    let (src_crs, dst_crs) = (src_crs.to_owned(), dst_crs.to_owned());

    let coords = py.allow_threads(move || -> PyResult<Vec<(f64, f64)>> {
        let pipeline = Pipeline::new(&src_crs, &dst_crs).map_err(|e| {
            PyValueError::new_err(format!("cannot convert {src_crs} -> {dst_crs}: {e}"))
        })?;
        pipeline.transform_batch(&mut coords).map_err(|e| {
            PyValueError::new_err(format!("conversion {src_crs} -> {dst_crs} failed: {e}"))
        })?;
        Ok(coords)
    })?;

    let (xs, ys): (Vec<f64>, Vec<f64>) = coords.into_iter().unzip();

    Ok((
        PyArray1::from_owned_array(py, ndarray::Array1::from(xs)),
        PyArray1::from_owned_array(py, ndarray::Array1::from(ys)),
    ))
}
