pub mod batch;
pub mod panorama;
pub mod point;

pub use batch::{Batch, BatchPlan, BatchRounding};
pub use panorama::PanoramaRecord;
pub use point::SamplePoint;
