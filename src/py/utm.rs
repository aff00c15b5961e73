//! PyO3 bindings for the scalar coordinate and angle helpers.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::angle;
use crate::geom::{Point, Ring};
use crate::proj::{dms, utm};

/// Geographic (lon, lat) to SIRGAS 2000 / UTM (easting, northing).
///
/// Args:
///     lon: Longitude in decimal degrees.
///     lat: Latitude in decimal degrees; negative applies the southern false northing.
///     zone: UTM zone 1-60. Derived from `lon` when omitted.
///
/// Returns:
///     Tuple of (easting, northing) in metres.
#[pyfunction]
#[pyo3(signature = (lon, lat, zone=None))]
pub fn geographic_to_utm(lon: f64, lat: f64, zone: Option<u8>) -> PyResult<(f64, f64)> {
    utm::geographic_to_utm(lon, lat, zone).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// SIRGAS 2000 / UTM (easting, northing) to geographic (lon, lat).
///
/// Args:
///     easting: Easting in metres.
///     northing: Northing in metres.
///     zone: UTM zone 1-60.
///     southern: Whether the northing carries the 10 000 km false northing.
///
/// Returns:
///     Tuple of (lon, lat) in decimal degrees.
#[pyfunction]
#[pyo3(signature = (easting, northing, zone, southern=true))]
pub fn utm_to_geographic(easting: f64, northing: f64, zone: u8, southern: bool) -> PyResult<(f64, f64)> {
    utm::utm_to_geographic(easting, northing, zone, southern)
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// UTM zone number for a longitude.
///
/// Args:
///     lon: Longitude in decimal degrees; wrapped into [-180, 180).
///
/// Returns:
///     Zone number 1-60.
#[pyfunction]
pub fn utm_zone(lon: f64) -> u8 {
    utm::utm_zone_of(lon)
}

/// SIRGAS 2000 / UTM EPSG code for a zone.
///
/// Args:
///     zone: UTM zone number.
///     southern: Southern hemisphere (31960 + zone) or northern (31954 + zone).
///
/// Returns:
///     EPSG code, e.g. 31983 for zone 23 south.
#[pyfunction]
#[pyo3(signature = (zone, southern=true))]
pub fn sirgas_epsg(zone: u8, southern: bool) -> u32 {
    utm::epsg_for(zone, southern)
}

/// Format decimal degrees as degrees-minutes-seconds.
///
/// Args:
///     decimal: Signed decimal degrees.
///     is_latitude: Picks N/S instead of E/W as the hemisphere letter.
///
/// Returns:
///     String such as `15°30'0.0000" S`.
#[pyfunction]
pub fn to_dms(decimal: f64, is_latitude: bool) -> String {
    dms::to_dms(decimal, is_latitude)
}

/// Parse the first degrees-minutes-seconds coordinate in a string.
///
/// Args:
///     s: Text such as `15°30'0" S`; typographic quote marks are accepted.
///
/// Returns:
///     Signed decimal degrees, or None when no DMS coordinate is found.
#[pyfunction]
pub fn from_dms(s: &str) -> Option<f64> {
    dms::from_dms(s)
}

/// Angle swept from `vertex -> p1` to `vertex -> p2`, counter-clockwise.
///
/// Args:
///     p1: First (x, y) point.
///     vertex: (x, y) point the angle is measured at.
///     p2: Second (x, y) point.
///
/// Returns:
///     Angle in degrees within [0, 360).
#[pyfunction]
pub fn angle_between(p1: (f64, f64), vertex: (f64, f64), p2: (f64, f64)) -> f64 {
    angle::angle_between(p1.into(), vertex.into(), p2.into())
}

/// Initial great-circle bearing between two geographic points.
///
/// Args:
///     p1: Start (lon, lat) in decimal degrees.
///     p2: End (lon, lat) in decimal degrees.
///
/// Returns:
///     Bearing in degrees within [0, 360), 0 = north, 90 = east.
#[pyfunction]
pub fn azimuth(p1: (f64, f64), p2: (f64, f64)) -> f64 {
    angle::azimuth(p1.into(), p2.into())
}

/// Internal angle of a closed ring at one vertex.
///
/// Args:
///     ring: Closed list of (x, y) points, first point repeated at the end.
///     index: Vertex index, excluding the closing duplicate.
///
/// Returns:
///     Angle in degrees within [0, 360).
///
/// Raises:
///     ValueError: if the ring has fewer than 4 points or `index` is out of range.
#[pyfunction]
pub fn internal_angle(ring: Vec<(f64, f64)>, index: usize) -> PyResult<f64> {
    let ring: Ring = ring.into_iter().map(Point::from).collect();
    angle::internal_angle_at(&ring, index).map_err(|e| PyValueError::new_err(e.to_string()))
}
