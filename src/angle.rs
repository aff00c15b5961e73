//! Planar angles, geographic azimuths and polygon internal angles.
//!
//! All results are in decimal degrees normalized into [0, 360).

use crate::error::RingError;
use crate::geom::{Point, Ring};

/// Mean Earth radius (metres) used by the haversine distance.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Angle swept from `vertex -> p1` to `vertex -> p2`, counter-clockwise positive.
pub fn angle_between(p1: Point, vertex: Point, p2: Point) -> f64 {
    let a1 = (p1.y - vertex.y).atan2(p1.x - vertex.x);
    let a2 = (p2.y - vertex.y).atan2(p2.x - vertex.x);

    let angle = (a2 - a1).to_degrees().rem_euclid(360.0);
    // A tiny negative difference rounds up to exactly 360
    if angle >= 360.0 {
        0.0
    } else {
        angle
    }
}

/// Initial great-circle bearing from `p1` to `p2` (lon/lat degrees), 0 = north.
pub fn azimuth(p1: Point, p2: Point) -> f64 {
    let d_lon = (p2.x - p1.x).to_radians();
    let lat1 = p1.y.to_radians();
    let lat2 = p2.y.to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

/// Internal angle of a closed ring at `index`.
///
/// The closing duplicate is not a vertex of its own, so neighbours wrap
/// around `ring.len() - 1`.
pub fn internal_angle_at(ring: &Ring, index: usize) -> Result<f64, RingError> {
    let points = ring.points();
    if points.is_empty() {
        return Err(RingError::Empty);
    }
    if points.len() < 4 {
        return Err(RingError::TooFewVertices {
            count: points.len(),
            minimum: 4,
        });
    }

    let n = points.len() - 1;
    if index >= n {
        return Err(RingError::IndexOutOfRange { index, count: n });
    }

    let prev = if index == 0 { n - 1 } else { index - 1 };
    let next = (index + 1) % n;

    Ok(angle_between(points[prev], points[index], points[next]))
}

/// Internal angles at every vertex of a closed ring.
pub fn internal_angles(ring: &Ring) -> Result<Vec<f64>, RingError> {
    if ring.is_empty() {
        return Err(RingError::Empty);
    }
    if ring.len() < 4 {
        return Err(RingError::TooFewVertices {
            count: ring.len(),
            minimum: 4,
        });
    }
    (0..ring.len() - 1).map(|i| internal_angle_at(ring, i)).collect()
}

/// Great-circle distance in metres between two lon/lat points (haversine).
pub fn haversine_distance(p1: Point, p2: Point) -> f64 {
    let phi1 = p1.y.to_radians();
    let phi2 = p2.y.to_radians();
    let d_phi = (p2.y - p1.y).to_radians();
    let d_lambda = (p2.x - p1.x).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}
