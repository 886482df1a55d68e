use crate::error::{HarvestError, Result};
use crate::utils::filename::batch_output_path;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// How the number of batches is derived from the point count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BatchRounding {
    /// `floor(N / num + 0.5)` batches; a short tail may be left out
    #[default]
    Nearest,
    /// `ceil(N / num)` batches; every point is covered
    Ceiling,
}

impl BatchRounding {
    pub fn batch_count(self, total: usize, batch_size: usize) -> usize {
        if batch_size == 0 {
            return 0;
        }
        match self {
            // Round half up without forming 2 * total
            BatchRounding::Nearest => {
                let remainder = total % batch_size;
                total / batch_size + usize::from(remainder >= batch_size - remainder)
            }
            BatchRounding::Ceiling => total.div_ceil(batch_size),
        }
    }
}

impl fmt::Display for BatchRounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchRounding::Nearest => write!(f, "nearest"),
            BatchRounding::Ceiling => write!(f, "ceiling"),
        }
    }
}

/// A contiguous slice of point indices and the file it is written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub start: usize,
    pub end: usize,
    pub output_path: PathBuf,
}

impl Batch {
    pub fn new(start: usize, end: usize, output_dir: &Path) -> Self {
        Self {
            start,
            end,
            output_path: batch_output_path(output_dir, start, end),
        }
    }

    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// A batch whose file exists is never reprocessed, even if the file is partial
    pub fn is_complete(&self) -> bool {
        self.output_path.exists()
    }
}

/// Ordered batches covering the dataset
#[derive(Debug, Clone)]
pub struct BatchPlan {
    total: usize,
    batch_size: usize,
    batches: Vec<Batch>,
}

impl BatchPlan {
    pub fn new(
        total: usize,
        batch_size: usize,
        rounding: BatchRounding,
        output_dir: &Path,
    ) -> Result<Self> {
        if batch_size == 0 {
            return Err(HarvestError::Config(
                "Batch size must be at least 1".to_string(),
            ));
        }

        let batches = (0..rounding.batch_count(total, batch_size))
            .map(|b| {
                let start = b * batch_size;
                let end = start.saturating_add(batch_size).min(total);
                Batch::new(start, end, output_dir)
            })
            .collect();

        Ok(Self {
            total,
            batch_size,
            batches,
        })
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    pub fn total_points(&self) -> usize {
        self.total
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of points that fall inside some batch
    pub fn covered_points(&self) -> usize {
        self.batches.last().map(|b| b.end).unwrap_or(0)
    }

    /// Indices no batch will ever visit
    pub fn uncovered(&self) -> Option<Range<usize>> {
        let covered = self.covered_points();
        (covered < self.total).then_some(covered..self.total)
    }

    /// Points in batches that still need to be fetched
    pub fn pending_points(&self) -> usize {
        self.batches
            .iter()
            .filter(|b| !b.is_complete())
            .map(Batch::len)
            .sum()
    }
}
