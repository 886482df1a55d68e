use crate::error::{HarvestError, Result};
use crate::utils::coordinates::is_geographic_wgs84_wkt;
#[cfg(feature = "reproject")]
use crate::utils::constants::WGS84_EPSG;
#[cfg(feature = "reproject")]
use proj::Proj;

enum Transform {
    Identity,
    #[cfg(feature = "reproject")]
    Proj(Proj),
}

/// Converts dataset coordinates into WGS84 longitude/latitude.
///
/// Built once per run from the dataset's declared reference system and shared by every
/// per-point lookup.
pub struct Reprojector {
    transform: Transform,
    source_crs: Option<String>,
}

impl Reprojector {
    /// Coordinates are already WGS84 lon/lat
    pub fn identity() -> Self {
        Self {
            transform: Transform::Identity,
            source_crs: None,
        }
    }

    /// Build a transform from a WKT (or any PROJ-readable) definition.
    ///
    /// A missing definition, or one that already describes geographic WGS84, gives the
    /// identity transform.
    pub fn from_source_crs(source_crs: Option<&str>) -> Result<Self> {
        let definition = match source_crs.map(str::trim) {
            None | Some("") => return Ok(Self::identity()),
            Some(definition) if is_geographic_wgs84_wkt(definition) => {
                return Ok(Self {
                    transform: Transform::Identity,
                    source_crs: Some(definition.to_string()),
                })
            }
            Some(definition) => definition,
        };

        Ok(Self {
            transform: Self::build_transform(definition)?,
            source_crs: Some(definition.to_string()),
        })
    }

    #[cfg(feature = "reproject")]
    fn build_transform(definition: &str) -> Result<Transform> {
        let proj = Proj::new_known_crs(definition, WGS84_EPSG, None).map_err(|e| {
            HarvestError::Projection(format!("Failed to create transform to WGS84: {}", e))
        })?;
        Ok(Transform::Proj(proj))
    }

    #[cfg(not(feature = "reproject"))]
    fn build_transform(_definition: &str) -> Result<Transform> {
        Err(HarvestError::Dataset(
            "Dataset is not in WGS84 and reprojection support is not compiled in".to_string(),
        ))
    }

    /// Transform an (x, y) pair into (longitude, latitude)
    pub fn to_wgs84(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        match &self.transform {
            Transform::Identity => Ok((x, y)),
            #[cfg(feature = "reproject")]
            Transform::Proj(proj) => proj
                .convert((x, y))
                .map_err(|e| HarvestError::Projection(format!("Reprojection failed: {}", e))),
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self.transform, Transform::Identity)
    }

    pub fn source_crs(&self) -> Option<&str> {
        self.source_crs.as_deref()
    }
}
