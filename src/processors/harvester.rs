use crate::error::Result;
use crate::fetchers::{FetchOutcome, MetadataFetcher, Transport};
use crate::models::{Batch, BatchPlan, PanoramaRecord, SamplePoint};
use crate::readers::{PointSource, Reprojector};
use crate::utils::{Pacer, ProgressReporter};
use crate::writers::LineWriter;
use chrono::NaiveDate;
use tracing::{debug, info, warn};

/// Counts gathered over one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HarvestSummary {
    pub batches_written: usize,
    pub batches_skipped: usize,
    pub records_written: usize,
    pub no_panorama: usize,
    pub failed_points: usize,
    pub earliest_capture: Option<NaiveDate>,
    pub latest_capture: Option<NaiveDate>,
}

impl HarvestSummary {
    fn record_found(&mut self, record: &PanoramaRecord) {
        self.records_written += 1;
        if let Some(month) = record.capture_month() {
            self.earliest_capture = Some(self.earliest_capture.map_or(month, |d| d.min(month)));
            self.latest_capture = Some(self.latest_capture.map_or(month, |d| d.max(month)));
        }
    }

    pub fn points_visited(&self) -> usize {
        self.records_written + self.no_panorama + self.failed_points
    }

    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Batches written: {}\nBatches skipped (output exists): {}\nPoints queried: {}\n  Panoramas recorded: {}\n  No panorama: {}\n  Failed requests: {}",
            self.batches_written,
            self.batches_skipped,
            self.points_visited(),
            self.records_written,
            self.no_panorama,
            self.failed_points,
        );

        if let (Some(earliest), Some(latest)) = (self.earliest_capture, self.latest_capture) {
            summary.push_str(&format!(
                "\nCapture dates: {} to {}",
                earliest.format("%Y-%m"),
                latest.format("%Y-%m")
            ));
        }

        summary
    }
}

/// Walks a batch plan, querying every point of every missing batch file
pub struct Harvester<'a, T: Transport> {
    source: &'a PointSource,
    reprojector: Reprojector,
    fetcher: MetadataFetcher<T>,
    pacer: Pacer,
}

impl<'a, T: Transport> Harvester<'a, T> {
    pub fn new(
        source: &'a PointSource,
        reprojector: Reprojector,
        fetcher: MetadataFetcher<T>,
        pacer: Pacer,
    ) -> Self {
        Self {
            source,
            reprojector,
            fetcher,
            pacer,
        }
    }

    pub fn run(
        &self,
        plan: &BatchPlan,
        progress: Option<&ProgressReporter>,
    ) -> Result<HarvestSummary> {
        let mut summary = HarvestSummary::default();

        if let Some(range) = plan.uncovered() {
            warn!(
                start = range.start,
                end = range.end,
                "Batch count rounds down; points in this range will not be queried"
            );
        }

        // Input problems are fatal, so every pending point is resolved before any file exists
        let mut pending = Vec::new();
        for batch in plan.batches() {
            if batch.is_complete() {
                debug!(path = %batch.output_path.display(), "Output exists, skipping batch");
                summary.batches_skipped += 1;
                continue;
            }
            pending.push((batch, self.resolve_points(batch)?));
        }

        for (batch, points) in pending {
            self.run_batch(batch, &points, &mut summary, progress)?;
            summary.batches_written += 1;
        }

        Ok(summary)
    }

    fn resolve_points(&self, batch: &Batch) -> Result<Vec<SamplePoint>> {
        batch
            .indices()
            .map(|index| self.source.point(index, &self.reprojector))
            .collect()
    }

    fn run_batch(
        &self,
        batch: &Batch,
        points: &[SamplePoint],
        summary: &mut HarvestSummary,
        progress: Option<&ProgressReporter>,
    ) -> Result<()> {
        info!(
            start = batch.start,
            end = batch.end,
            path = %batch.output_path.display(),
            "Starting batch"
        );
        if let Some(p) = progress {
            p.set_message(&format!("Batch {}..{}", batch.start, batch.end));
        }

        self.pacer.before_batch();
        let mut writer = LineWriter::create(&batch.output_path)?;

        for point in points {
            let index = point.index;
            self.pacer.before_request();
            match self.fetcher.fetch(point) {
                Ok(FetchOutcome::Found(record)) => {
                    info!(
                        index,
                        longitude = %record.longitude,
                        latitude = %record.latitude,
                        pano_id = %record.pano_id,
                        date = %record.capture_date,
                        "Found panorama"
                    );
                    if let Some(p) = progress {
                        p.println(&record.to_string());
                    }
                    writer.write_record(&record)?;
                    summary.record_found(&record);
                }
                Ok(FetchOutcome::NoPanorama) => {
                    debug!(
                        index,
                        longitude = point.longitude,
                        latitude = point.latitude,
                        "No panorama"
                    );
                    summary.no_panorama += 1;
                }
                Err(e) if e.is_per_point() => {
                    warn!(
                        index,
                        longitude = point.longitude,
                        latitude = point.latitude,
                        error = %e,
                        "Metadata request failed, skipping point"
                    );
                    summary.failed_points += 1;
                }
                Err(e) => return Err(e),
            }

            if let Some(p) = progress {
                p.increment(1);
            }
        }

        let lines = writer.finish()?;
        info!(start = batch.start, end = batch.end, lines, "Finished batch");
        Ok(())
    }
}
