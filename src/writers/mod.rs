pub mod line_writer;

pub use line_writer::{read_records, LineWriter};
