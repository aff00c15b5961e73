use pyo3::prelude::*;

mod topology;
mod transform;
mod utm;

/// Register all Python-visible functions and types.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(transform::transform_points, m)?)?;
    m.add_function(wrap_pyfunction!(utm::geographic_to_utm, m)?)?;
    m.add_function(wrap_pyfunction!(utm::utm_to_geographic, m)?)?;
    m.add_function(wrap_pyfunction!(utm::utm_zone, m)?)?;
    m.add_function(wrap_pyfunction!(utm::sirgas_epsg, m)?)?;
    m.add_function(wrap_pyfunction!(utm::to_dms, m)?)?;
    m.add_function(wrap_pyfunction!(utm::from_dms, m)?)?;
    m.add_function(wrap_pyfunction!(utm::angle_between, m)?)?;
    m.add_function(wrap_pyfunction!(utm::azimuth, m)?)?;
    m.add_function(wrap_pyfunction!(utm::internal_angle, m)?)?;
    m.add_function(wrap_pyfunction!(topology::validate_polygon_topology, m)?)?;
    m.add_function(wrap_pyfunction!(topology::validate_multi_polygon_topology, m)?)?;
    Ok(())
}
