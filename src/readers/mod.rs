pub mod point_reader;
pub mod reprojector;

pub use point_reader::PointSource;
pub use reprojector::Reprojector;
