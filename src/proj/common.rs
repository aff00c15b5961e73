//! Common helpers for projection math (meridional arc, footpoint latitude).

use super::ellipsoid::Ellipsoid;

/// Leading coefficient of the meridional arc series: 1 - e²/4 - 3e⁴/64 - 5e⁶/256.
fn arc_scale(e2: f64) -> f64 {
    1.0 - e2 / 4.0 - 3.0 * e2 * e2 / 64.0 - 5.0 * e2 * e2 * e2 / 256.0
}

/// Compute the meridional arc length from the equator to latitude phi.
/// Uses the series expansion in powers of e² (to e⁶).
pub fn meridional_arc(ellipsoid: &Ellipsoid, phi: f64) -> f64 {
    let e2 = ellipsoid.e2;
    let e4 = e2 * e2;
    let e6 = e4 * e2;

    ellipsoid.a
        * (arc_scale(e2) * phi
            - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
            + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
            - (35.0 * e6 / 3072.0) * (6.0 * phi).sin())
}

/// Latitude whose meridional arc equals `m` (the footpoint latitude).
///
/// Goes through the rectifying latitude μ and the e₁ series.
pub fn footpoint_latitude(ellipsoid: &Ellipsoid, m: f64) -> f64 {
    let e1 = ellipsoid.e1();
    let e1_2 = e1 * e1;
    let e1_3 = e1_2 * e1;
    let e1_4 = e1_3 * e1;

    let mu = m / (ellipsoid.a * arc_scale(ellipsoid.e2));

    mu + (3.0 * e1 / 2.0 - 27.0 * e1_3 / 32.0) * (2.0 * mu).sin()
        + (21.0 * e1_2 / 16.0 - 55.0 * e1_4 / 32.0) * (4.0 * mu).sin()
        + (151.0 * e1_3 / 96.0) * (6.0 * mu).sin()
        + (1097.0 * e1_4 / 512.0) * (8.0 * mu).sin()
}
