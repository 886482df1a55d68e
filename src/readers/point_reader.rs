use crate::error::{HarvestError, Result};
use crate::models::SamplePoint;
use crate::readers::Reprojector;
use crate::utils::constants::PRJ_EXTENSION;
use shapefile::Shape;
use std::fs;
use std::path::Path;
use tracing::debug;
use validator::Validate;

/// Point features of a shapefile, held in feature order
pub struct PointSource {
    coordinates: Vec<(f64, f64)>,
    source_crs: Option<String>,
}

impl PointSource {
    /// Open the `.shp` file and its `.prj` sibling, if any
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(HarvestError::Dataset(format!(
                "Cannot open dataset '{}'",
                path.display()
            )));
        }

        let shapes = shapefile::read_shapes(path).map_err(|e| {
            HarvestError::Dataset(format!("Cannot read shapefile '{}': {}", path.display(), e))
        })?;

        let coordinates = shapes
            .iter()
            .enumerate()
            .map(|(index, shape)| point_coordinates(index, shape))
            .collect::<Result<Vec<_>>>()?;

        let source_crs = Self::read_projection(path)?;

        debug!(
            path = %path.display(),
            points = coordinates.len(),
            has_prj = source_crs.is_some(),
            "Opened point dataset"
        );

        Ok(Self {
            coordinates,
            source_crs,
        })
    }

    fn read_projection(path: &Path) -> Result<Option<String>> {
        let prj_path = path.with_extension(PRJ_EXTENSION);
        if !prj_path.exists() {
            return Ok(None);
        }

        let wkt = fs::read_to_string(&prj_path)?;
        let wkt = wkt.trim();
        Ok((!wkt.is_empty()).then(|| wkt.to_string()))
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Declared reference system (WKT from the `.prj` file)
    pub fn source_crs(&self) -> Option<&str> {
        self.source_crs.as_deref()
    }

    /// Build the transform matching this dataset's declared reference system
    pub fn reprojector(&self) -> Result<Reprojector> {
        Reprojector::from_source_crs(self.source_crs())
    }

    /// Coordinates as stored in the dataset
    pub fn raw_coordinates(&self, index: usize) -> Result<(f64, f64)> {
        self.coordinates.get(index).copied().ok_or_else(|| {
            HarvestError::Dataset(format!(
                "Feature {} out of range (dataset has {} points)",
                index,
                self.len()
            ))
        })
    }

    /// Point `index` in WGS84 degrees
    pub fn point(&self, index: usize, reprojector: &Reprojector) -> Result<SamplePoint> {
        let (x, y) = self.raw_coordinates(index)?;
        let (longitude, latitude) = reprojector.to_wgs84(x, y)?;

        let point = SamplePoint::new(index, longitude, latitude);
        point.validate().map_err(|e| {
            HarvestError::Dataset(format!(
                "Feature {} at ({}, {}) is not a valid WGS84 coordinate, check the dataset's .prj: {}",
                index, x, y, e
            ))
        })?;

        Ok(point)
    }
}

fn point_coordinates(index: usize, shape: &Shape) -> Result<(f64, f64)> {
    match shape {
        Shape::Point(p) => Ok((p.x, p.y)),
        Shape::PointM(p) => Ok((p.x, p.y)),
        Shape::PointZ(p) => Ok((p.x, p.y)),
        Shape::NullShape => Err(HarvestError::Dataset(format!(
            "Feature {} has no geometry",
            index
        ))),
        other => Err(HarvestError::Dataset(format!(
            "Feature {} is a {:?}, expected a point layer",
            index,
            other.shapetype()
        ))),
    }
}
