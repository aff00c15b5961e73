//! Transverse Mercator projection — Snyder's e² power series.
//!
//! Forward: meridional arc plus easting/northing corrections in powers of
//! A = cos φ · (λ − λ₀) up to A⁶ (Snyder 1987, eqs. 8-9 to 8-13).
//! Inverse: footpoint latitude from the rectifying latitude, then the
//! D-series corrections (eqs. 8-17 to 8-25).
//!
//! Accurate to millimetres within a UTM zone; degrades away from the
//! central meridian and near the poles.

use crate::error::ProjError;
use crate::proj::common::{footpoint_latitude, meridional_arc};
use crate::proj::ellipsoid::{Ellipsoid, GRS80};
use crate::proj::utm::{UtmZone, FALSE_EASTING, SOUTHERN_FALSE_NORTHING, UTM_SCALE_FACTOR};
use crate::proj::Projection;

#[derive(Clone, Debug)]
pub struct TransverseMercator {
    ellipsoid: Ellipsoid,
    lon0: f64,
    k0: f64,
    false_easting: f64,
    false_northing: f64,
}

impl TransverseMercator {
    pub fn new(
        ellipsoid: Ellipsoid,
        lon0: f64,
        k0: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Self {
        Self {
            ellipsoid,
            lon0,
            k0,
            false_easting,
            false_northing,
        }
    }

    /// Create a Transverse Mercator for a UTM zone on GRS80 (SIRGAS 2000).
    pub fn utm(zone: UtmZone) -> Self {
        Self::utm_on(zone, GRS80)
    }

    /// Create a Transverse Mercator for a UTM zone on an arbitrary ellipsoid.
    pub fn utm_on(zone: UtmZone, ellipsoid: Ellipsoid) -> Self {
        let false_northing = if zone.southern {
            SOUTHERN_FALSE_NORTHING
        } else {
            0.0
        };
        Self::new(
            ellipsoid,
            zone.central_meridian().to_radians(),
            UTM_SCALE_FACTOR,
            FALSE_EASTING,
            false_northing,
        )
    }

    /// Central meridian in radians.
    pub fn lon0(&self) -> f64 {
        self.lon0
    }
}

impl Projection for TransverseMercator {
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        if !lon.is_finite() || !lat.is_finite() {
            return Err(ProjError::InvalidParameter(format!(
                "non-finite coordinate ({lon}, {lat})"
            )));
        }

        let ep2 = self.ellipsoid.ep2;
        let (sin_phi, cos_phi) = lat.sin_cos();
        let tan_phi = sin_phi / cos_phi;

        let n = self.ellipsoid.prime_vertical_radius(lat);
        let t = tan_phi * tan_phi;
        let c = ep2 * cos_phi * cos_phi;
        let a = cos_phi * (lon - self.lon0);
        let m = meridional_arc(&self.ellipsoid, lat);

        let a2 = a * a;
        let a3 = a2 * a;
        let a4 = a3 * a;
        let a5 = a4 * a;
        let a6 = a5 * a;

        let x = self.k0
            * n
            * (a + (1.0 - t + c) * a3 / 6.0
                + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a5 / 120.0)
            + self.false_easting;

        let y = self.k0
            * (m + n
                * tan_phi
                * (a2 / 2.0
                    + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
                    + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a6 / 720.0))
            + self.false_northing;

        Ok((x, y))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ProjError::InvalidParameter(format!(
                "non-finite coordinate ({x}, {y})"
            )));
        }

        let ep2 = self.ellipsoid.ep2;
        let x = x - self.false_easting;
        let y = y - self.false_northing;

        let phi1 = footpoint_latitude(&self.ellipsoid, y / self.k0);
        let (sin_phi1, cos_phi1) = phi1.sin_cos();
        let tan_phi1 = sin_phi1 / cos_phi1;

        let n1 = self.ellipsoid.prime_vertical_radius(phi1);
        let r1 = self.ellipsoid.meridian_radius(phi1);
        let t1 = tan_phi1 * tan_phi1;
        let c1 = ep2 * cos_phi1 * cos_phi1;
        let d = x / (n1 * self.k0);

        let d2 = d * d;
        let d3 = d2 * d;
        let d4 = d3 * d;
        let d5 = d4 * d;
        let d6 = d5 * d;

        let lat = phi1
            - (n1 * tan_phi1 / r1)
                * (d2 / 2.0
                    - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * ep2) * d4 / 24.0
                    + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1
                        - 252.0 * ep2
                        - 3.0 * c1 * c1)
                        * d6
                        / 720.0);

        let dlon = (d - (1.0 + 2.0 * t1 + c1) * d3 / 6.0
            + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * ep2 + 24.0 * t1 * t1) * d5
                / 120.0)
            / cos_phi1;

        Ok((self.lon0 + dlon, lat))
    }

    fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn zone(number: u8, southern: bool) -> UtmZone {
        UtmZone::new(number, southern).unwrap()
    }

    #[test]
    fn test_central_meridian_easting() {
        let tm = TransverseMercator::utm(zone(23, true));
        let (e, n) = tm
            .forward((-45.0_f64).to_radians(), (-10.0_f64).to_radians())
            .unwrap();
        assert_relative_eq!(e, 500_000.0, epsilon = 1e-6);
        assert_relative_eq!(n, 8_894_587.5087, epsilon = 1e-3);
    }

    #[test]
    fn test_brasilia_zone_23s() {
        let tm = TransverseMercator::utm(zone(23, true));
        let (e, n) = tm
            .forward((-47.8825_f64).to_radians(), (-15.7942_f64).to_radians())
            .unwrap();
        assert_relative_eq!(e, 191_171.3634, epsilon = 1e-3);
        assert_relative_eq!(n, 8_251_713.1268, epsilon = 1e-3);
    }

    #[test]
    fn test_northern_hemisphere_known_point() {
        let tm = TransverseMercator::utm(zone(33, false));
        let (e, n) = tm
            .forward(15.0_f64.to_radians(), 52.0_f64.to_radians())
            .unwrap();
        assert_relative_eq!(e, 500_000.0, epsilon = 1e-6);
        assert_relative_eq!(n, 5_761_038.2129, epsilon = 1e-3);
    }

    #[test]
    fn test_roundtrip_zone_23s() {
        let tm = TransverseMercator::utm(zone(23, true));
        let cases: &[(f64, f64)] = &[
            (-45.0, -10.0),
            (-47.8825, -15.7942),
            (-46.6333, -23.5505),
            (-43.1729, -22.9068),
            (-48.0, -30.0),
            (-42.5, -5.0),
        ];
        for &(lon_deg, lat_deg) in cases {
            let lon = lon_deg.to_radians();
            let lat = lat_deg.to_radians();
            let (x, y) = tm.forward(lon, lat).unwrap();
            let (lon2, lat2) = tm.inverse(x, y).unwrap();
            assert_relative_eq!(lon2, lon, epsilon = 1e-9);
            assert_relative_eq!(lat2, lat, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_utm_zone_central_meridian() {
        let tm1 = TransverseMercator::utm(zone(1, false));
        let tm23 = TransverseMercator::utm(zone(23, true));
        let tm60 = TransverseMercator::utm(zone(60, false));

        assert_relative_eq!(tm1.lon0(), (-177.0_f64).to_radians(), epsilon = 1e-12);
        assert_relative_eq!(tm23.lon0(), (-45.0_f64).to_radians(), epsilon = 1e-12);
        assert_relative_eq!(tm60.lon0(), 177.0_f64.to_radians(), epsilon = 1e-12);
    }

    #[test]
    fn test_batch_matches_single() {
        let tm = TransverseMercator::utm(zone(22, true));
        let mut coords = vec![
            ((-51.0_f64).to_radians(), (-20.0_f64).to_radians()),
            ((-52.5_f64).to_radians(), (-25.0_f64).to_radians()),
        ];
        let expected: Vec<_> = coords
            .iter()
            .map(|&(lon, lat)| tm.forward(lon, lat).unwrap())
            .collect();
        tm.forward_batch(&mut coords).unwrap();
        assert_eq!(coords, expected);

        tm.inverse_batch(&mut coords).unwrap();
        assert_relative_eq!(coords[1].0, (-52.5_f64).to_radians(), epsilon = 1e-9);
        assert_relative_eq!(coords[1].1, (-25.0_f64).to_radians(), epsilon = 1e-9);
    }

    #[test]
    fn test_non_finite_input_rejected() {
        let tm = TransverseMercator::utm(zone(23, true));
        assert!(matches!(
            tm.forward(f64::NAN, 0.0),
            Err(ProjError::InvalidParameter(_))
        ));
        assert!(tm.inverse(500_000.0, f64::INFINITY).is_err());
    }
}
