use crate::error::Result;
use crate::models::{Batch, BatchPlan};
use crate::utils::filename::parse_batch_filename;
use crate::writers::read_records;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct BatchStatus {
    pub batch: Batch,
    /// Records in the existing output file; `None` when the batch is still to be fetched
    pub existing_records: Option<usize>,
}

/// What a run would do, without touching the network
#[derive(Debug, Clone)]
pub struct PlanReport {
    pub total_points: usize,
    pub batch_size: usize,
    pub statuses: Vec<BatchStatus>,
    pub uncovered: Option<(usize, usize)>,
    /// Batch files in the output directory that this plan will never produce,
    /// usually left by a run with a different batch size
    pub stray_files: Vec<String>,
}

impl PlanReport {
    pub fn from_plan(plan: &BatchPlan, output_dir: &Path) -> Result<Self> {
        let statuses = plan
            .batches()
            .iter()
            .map(|batch| {
                let existing_records = if batch.is_complete() {
                    Some(read_records(&batch.output_path)?.len())
                } else {
                    None
                };
                Ok(BatchStatus {
                    batch: batch.clone(),
                    existing_records,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            total_points: plan.total_points(),
            batch_size: plan.batch_size(),
            statuses,
            uncovered: plan.uncovered().map(|r| (r.start, r.end)),
            stray_files: find_stray_files(plan, output_dir)?,
        })
    }

    pub fn pending_batches(&self) -> usize {
        self.statuses
            .iter()
            .filter(|s| s.existing_records.is_none())
            .count()
    }

    pub fn generate_summary(&self) -> String {
        let mut lines = vec![format!(
            "Points: {}, batch size: {}, batches: {} ({} pending)",
            self.total_points,
            self.batch_size,
            self.statuses.len(),
            self.pending_batches()
        )];

        for status in &self.statuses {
            let name = status
                .batch
                .output_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let state = match status.existing_records {
                Some(n) => format!("exists, {} records", n),
                None => "pending".to_string(),
            };
            lines.push(format!(
                "  [{}, {}) {} - {}",
                status.batch.start, status.batch.end, name, state
            ));
        }

        if let Some((start, end)) = self.uncovered {
            lines.push(format!(
                "  [{}, {}) not covered by any batch",
                start, end
            ));
        }

        for name in &self.stray_files {
            lines.push(format!("  {} does not match this plan and will be ignored", name));
        }

        lines.join("\n")
    }
}

fn find_stray_files(plan: &BatchPlan, output_dir: &Path) -> Result<Vec<String>> {
    if !output_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut stray = Vec::new();
    for entry in fs::read_dir(output_dir)? {
        let name = entry?.file_name().to_string_lossy().into_owned();
        if let Some((start, end)) = parse_batch_filename(&name) {
            let planned = plan
                .batches()
                .iter()
                .any(|b| b.start == start && b.end == end);
            if !planned {
                stray.push(name);
            }
        }
    }
    stray.sort();
    Ok(stray)
}
