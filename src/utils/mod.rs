pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod pacing;
pub mod progress;

pub use constants::*;
pub use coordinates::is_geographic_wgs84_wkt;
pub use filename::{batch_filename, batch_output_path, parse_batch_filename};
pub use pacing::Pacer;
pub use progress::ProgressReporter;
