use crate::error::ProjError;
use proj4rs::Proj;

/// Thin wrapper around proj4rs that handles radians/degrees conversion transparently.
///
/// proj4rs uses radians for geographic CRS while callers work in degrees.
pub struct CrsTransform {
    src: Proj,
    dst: Proj,
    src_is_geo: bool,
    dst_is_geo: bool,
}

impl CrsTransform {
    /// Create a new CRS transform from source and destination CRS strings.
    ///
    /// Accepts EPSG codes ("EPSG:4674") or PROJ strings ("+proj=utm +zone=23 +south ...").
    pub fn new(src_crs: &str, dst_crs: &str) -> Result<Self, ProjError> {
        let src = Proj::from_user_string(src_crs)
            .map_err(|e| ProjError::UnknownCrs(format!("{src_crs}: {e}")))?;
        let dst = Proj::from_user_string(dst_crs)
            .map_err(|e| ProjError::UnknownCrs(format!("{dst_crs}: {e}")))?;
        let src_is_geo = src.is_latlong();
        let dst_is_geo = dst.is_latlong();
        Ok(Self {
            src,
            dst,
            src_is_geo,
            dst_is_geo,
        })
    }

    /// Transform a single point from source CRS to destination CRS.
    ///
    /// Coordinates are in CRS native units (degrees for geographic,
    /// metres for projected).
    pub fn transform(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let mut point = if self.src_is_geo {
            (x.to_radians(), y.to_radians())
        } else {
            (x, y)
        };

        proj4rs::transform::transform(&self.src, &self.dst, &mut point)
            .map_err(|e| ProjError::TransformFailed(e.to_string()))?;

        if self.dst_is_geo {
            Ok((point.0.to_degrees(), point.1.to_degrees()))
        } else {
            Ok(point)
        }
    }

    /// Batch transform from source CRS to destination CRS, in place.
    pub fn transform_batch(&self, coords: &mut [(f64, f64)]) -> Result<(), ProjError> {
        if self.src_is_geo {
            for c in coords.iter_mut() {
                c.0 = c.0.to_radians();
                c.1 = c.1.to_radians();
            }
        }

        proj4rs::transform::transform(&self.src, &self.dst, coords)
            .map_err(|e| ProjError::TransformFailed(e.to_string()))?;

        if self.dst_is_geo {
            for c in coords.iter_mut() {
                c.0 = c.0.to_degrees();
                c.1 = c.1.to_degrees();
            }
        }
        Ok(())
    }
}
