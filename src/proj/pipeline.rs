//! Pipeline — CRS-to-CRS transform chain that dispatches between
//! native pure-Rust projections and proj4rs fallback.
//!
//! WGS 84 and SIRGAS 2000 coincide at the centimetre level, so the native
//! path treats EPSG:4326 and EPSG:4674 as the same geographic frame.

use tracing::debug;

use crate::error::ProjError;
use crate::proj::crs::CrsTransform;
use crate::proj::ellipsoid::{GRS80, WGS84};
use crate::proj::transverse_mercator::TransverseMercator;
use crate::proj::utm::{is_wgs84_utm_epsg, zone_from_epsg};
use crate::proj::Projection;

/// Describes a CRS endpoint in the pipeline.
enum CrsEndpoint {
    /// Geographic CRS — degrees externally, radians internally.
    Geographic,
    /// Projected CRS — coordinates are in metres.
    Projected(Box<dyn Projection>),
}

/// A CRS-to-CRS transform pipeline (source → destination).
///
/// For supported EPSG codes, uses native pure-Rust projection math.
/// Falls back to proj4rs for anything else.
pub enum Pipeline {
    /// Both src and dst are recognized native projections.
    #[allow(private_interfaces)]
    Native { src: CrsEndpoint, dst: CrsEndpoint },
    /// Fallback to proj4rs for unsupported CRSes.
    Proj4rs(Box<CrsTransform>),
}

impl Pipeline {
    /// Create a Pipeline from source and destination CRS strings.
    pub fn new(src_crs: &str, dst_crs: &str) -> Result<Self, ProjError> {
        if let (Some(src), Some(dst)) = (parse_epsg(src_crs), parse_epsg(dst_crs)) {
            debug!(src_crs, dst_crs, "native pipeline");
            Ok(Pipeline::Native { src, dst })
        } else {
            debug!(src_crs, dst_crs, "falling back to proj4rs");
            let ct = CrsTransform::new(src_crs, dst_crs)?;
            Ok(Pipeline::Proj4rs(Box::new(ct)))
        }
    }

    /// Transform a single point from source CRS to destination CRS.
    ///
    /// Input/output coordinates are in CRS native units (degrees for geographic,
    /// metres for projected).
    pub fn transform(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        match self {
            Pipeline::Native { src, dst } => transform_native(src, dst, x, y),
            Pipeline::Proj4rs(ct) => ct.transform(x, y),
        }
    }

    /// Batch transform from source CRS to destination CRS, in place.
    pub fn transform_batch(&self, coords: &mut [(f64, f64)]) -> Result<(), ProjError> {
        match self {
            Pipeline::Native { src, dst } => {
                for c in coords.iter_mut() {
                    *c = transform_native(src, dst, c.0, c.1)?;
                }
                Ok(())
            }
            Pipeline::Proj4rs(ct) => ct.transform_batch(coords),
        }
    }
}

fn transform_native(
    src: &CrsEndpoint,
    dst: &CrsEndpoint,
    x: f64,
    y: f64,
) -> Result<(f64, f64), ProjError> {
    // Step 1: src coords → (lon_rad, lat_rad)
    let (lon, lat) = match src {
        CrsEndpoint::Geographic => (x.to_radians(), y.to_radians()),
        CrsEndpoint::Projected(proj) => proj.inverse(x, y)?,
    };

    // Step 2: (lon_rad, lat_rad) → dst coords
    match dst {
        CrsEndpoint::Geographic => Ok((lon.to_degrees(), lat.to_degrees())),
        CrsEndpoint::Projected(proj) => proj.forward(lon, lat),
    }
}

/// Try to parse an EPSG code and return a `CrsEndpoint`.
fn parse_epsg(crs: &str) -> Option<CrsEndpoint> {
    let code = crs
        .strip_prefix("EPSG:")
        .or_else(|| crs.strip_prefix("epsg:"))?
        .parse::<u32>()
        .ok()?;

    match code {
        // WGS 84 and SIRGAS 2000 geographic
        4326 | 4674 => Some(CrsEndpoint::Geographic),

        // WGS 84 / UTM (326XX, 327XX) and SIRGAS 2000 / UTM
        _ => {
            let zone = zone_from_epsg(code)?;
            let ellipsoid = if is_wgs84_utm_epsg(code) { WGS84 } else { GRS80 };
            Some(CrsEndpoint::Projected(Box::new(TransverseMercator::utm_on(
                zone, ellipsoid,
            ))))
        }
    }
}
