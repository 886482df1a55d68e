use serde::{Deserialize, Serialize};
use validator::Validate;

/// A sample location in WGS84 degrees, identified by its feature index in the dataset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct SamplePoint {
    pub index: usize,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
}

impl SamplePoint {
    pub fn new(index: usize, longitude: f64, latitude: f64) -> Self {
        Self {
            index,
            longitude,
            latitude,
        }
    }
}
