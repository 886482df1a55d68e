use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Metadata for one panorama returned by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanoramaRecord {
    pub pano_id: String,
    /// Capture date as reported, normally `YYYY-MM`
    pub capture_date: String,
    /// Degrees, written exactly as the provider reported them
    pub longitude: String,
    pub latitude: String,
}

impl PanoramaRecord {
    pub fn new(pano_id: String, capture_date: String, longitude: f64, latitude: f64) -> Self {
        Self {
            pano_id,
            capture_date,
            longitude: longitude.to_string(),
            latitude: latitude.to_string(),
        }
    }

    /// Keep the provider's coordinate text as is. `None` unless both values are numeric.
    pub fn from_reported(
        pano_id: String,
        capture_date: String,
        longitude: &str,
        latitude: &str,
    ) -> Option<Self> {
        let longitude = numeric_text(longitude)?;
        let latitude = numeric_text(latitude)?;
        Some(Self {
            pano_id,
            capture_date,
            longitude,
            latitude,
        })
    }

    /// First day of the capture month, when the date is in `YYYY-MM` form
    pub fn capture_month(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&format!("{}-01", self.capture_date.trim()), "%Y-%m-%d").ok()
    }

    /// Output line, newline included
    pub fn to_line(&self) -> String {
        format!("{}\n", self)
    }

    /// Read a record back from an output line.
    ///
    /// Returns `None` for lines that do not follow the
    /// `panoID: .. panoDate: .. longitude: .. latitude: ..` template.
    pub fn parse_line(line: &str) -> Option<Self> {
        let rest = line.trim_end_matches(['\r', '\n']).strip_prefix("panoID: ")?;
        let (pano_id, rest) = rest.split_once(" panoDate: ")?;
        let (capture_date, rest) = rest.split_once(" longitude: ")?;
        let (longitude, latitude) = rest.split_once(" latitude: ")?;

        Self::from_reported(
            pano_id.to_string(),
            capture_date.to_string(),
            longitude,
            latitude,
        )
    }
}

fn numeric_text(value: &str) -> Option<String> {
    let value = value.trim();
    value.parse::<f64>().ok()?;
    Some(value.to_string())
}

impl fmt::Display for PanoramaRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "panoID: {} panoDate: {} longitude: {} latitude: {}",
            self.pano_id, self.capture_date, self.longitude, self.latitude
        )
    }
}
