use crate::utils::constants::{BATCH_FILE_EXTENSION, BATCH_FILE_PREFIX};
use std::path::{Path, PathBuf};

/// Output file name for a batch: Pnt_start{start}_end{end}.txt
pub fn batch_filename(start: usize, end: usize) -> String {
    format!(
        "{}{}_end{}.{}",
        BATCH_FILE_PREFIX, start, end, BATCH_FILE_EXTENSION
    )
}

pub fn batch_output_path(output_dir: &Path, start: usize, end: usize) -> PathBuf {
    output_dir.join(batch_filename(start, end))
}

/// Recover the `(start, end)` range from a batch file name.
pub fn parse_batch_filename(name: &str) -> Option<(usize, usize)> {
    let stem = name
        .strip_prefix(BATCH_FILE_PREFIX)?
        .strip_suffix(BATCH_FILE_EXTENSION)?
        .strip_suffix('.')?;
    let (start, end) = stem.split_once("_end")?;
    Some((start.parse().ok()?, end.parse().ok()?))
}
