//! UTM zones on SIRGAS 2000 (GRS80): zone lookup, EPSG codes and the
//! degree-based geographic <-> UTM conversions used by the survey tools.

use crate::error::ProjError;
use crate::geom::{Point, Polygon, Ring};
use crate::proj::transverse_mercator::TransverseMercator;
use crate::proj::Projection;

pub const UTM_SCALE_FACTOR: f64 = 0.9996;
pub const FALSE_EASTING: f64 = 500_000.0;
pub const SOUTHERN_FALSE_NORTHING: f64 = 10_000_000.0;

/// A UTM zone number (1-60) paired with its hemisphere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UtmZone {
    pub number: u8,
    pub southern: bool,
}

impl UtmZone {
    pub fn new(number: u8, southern: bool) -> Result<Self, ProjError> {
        if !(1..=60).contains(&number) {
            return Err(ProjError::InvalidZone(number as i64));
        }
        Ok(Self { number, southern })
    }

    /// Zone containing `lon`, hemisphere taken from the sign of `lat`.
    pub fn containing(lon: f64, lat: f64) -> Self {
        Self {
            number: utm_zone_of(lon),
            southern: lat < 0.0,
        }
    }

    /// Central meridian in degrees.
    pub fn central_meridian(&self) -> f64 {
        (self.number as f64 - 1.0) * 6.0 - 180.0 + 3.0
    }

    /// SIRGAS 2000 / UTM EPSG code for this zone.
    pub fn epsg(&self) -> u32 {
        epsg_for(self.number, self.southern)
    }
}

/// UTM zone number for a longitude in degrees.
///
/// Longitudes outside [-180, 180) are wrapped first, so 180 lands in zone 1.
pub fn utm_zone_of(lon: f64) -> u8 {
    let shifted = (lon + 180.0).rem_euclid(360.0);
    ((shifted / 6.0).floor() as u8 + 1).min(60)
}

/// SIRGAS 2000 / UTM EPSG code: 31960 + zone (south), 31954 + zone (north).
pub fn epsg_for(zone: u8, southern: bool) -> u32 {
    if southern {
        31960 + zone as u32
    } else {
        31954 + zone as u32
    }
}

/// UTM zone behind an EPSG code.
///
/// SIRGAS 2000 / UTM is restricted to the published codes (zones 18N-22N and
/// 17S-25S), since the 31954/31960 formulas overlap outside that range.
/// WGS 84 / UTM covers 326xx (north) and 327xx (south) for zones 1-60.
pub fn zone_from_epsg(code: u32) -> Option<UtmZone> {
    let (number, southern) = match code {
        31972..=31976 => (code - 31954, false),
        31977..=31985 => (code - 31960, true),
        32601..=32660 => (code - 32600, false),
        32701..=32760 => (code - 32700, true),
        _ => return None,
    };
    Some(UtmZone {
        number: number as u8,
        southern,
    })
}

/// Whether `code` is a WGS 84 / UTM code rather than a SIRGAS 2000 one.
pub fn is_wgs84_utm_epsg(code: u32) -> bool {
    matches!(code, 32601..=32660 | 32701..=32760)
}

/// Geographic (lon, lat degrees) to SIRGAS 2000 / UTM (easting, northing).
///
/// The zone is derived from `lon` when not given. The 10 000 km false
/// northing is applied only when `lat < 0`.
pub fn geographic_to_utm(lon: f64, lat: f64, zone: Option<u8>) -> Result<(f64, f64), ProjError> {
    let number = zone.unwrap_or_else(|| utm_zone_of(lon));
    let zone = UtmZone::new(number, lat < 0.0)?;
    TransverseMercator::utm(zone).forward(lon.to_radians(), lat.to_radians())
}

/// SIRGAS 2000 / UTM (easting, northing) back to geographic (lon, lat degrees).
pub fn utm_to_geographic(
    easting: f64,
    northing: f64,
    zone: u8,
    southern: bool,
) -> Result<(f64, f64), ProjError> {
    let zone = UtmZone::new(zone, southern)?;
    let (lon, lat) = TransverseMercator::utm(zone).inverse(easting, northing)?;
    Ok((lon.to_degrees(), lat.to_degrees()))
}

/// Rough bounding box of the Brazilian territory.
pub fn is_within_brazil(lon: f64, lat: f64) -> bool {
    (-75.0..=-34.0).contains(&lon) && (-34.0..=6.0).contains(&lat)
}

/// Project every point of a geographic ring into a single UTM zone.
///
/// The zone's hemisphere decides the false northing for all points, so a
/// ring straddling the equator stays continuous.
pub fn project_ring(ring: &Ring, zone: UtmZone) -> Result<Ring, ProjError> {
    let tm = TransverseMercator::utm(zone);
    ring.points()
        .iter()
        .map(|p| {
            tm.forward(p.x.to_radians(), p.y.to_radians())
                .map(Point::from)
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Ring::new)
}

pub fn project_polygon(polygon: &Polygon, zone: UtmZone) -> Result<Polygon, ProjError> {
    let exterior = project_ring(&polygon.exterior, zone)?;
    let interiors = polygon
        .interiors
        .iter()
        .map(|r| project_ring(r, zone))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}
