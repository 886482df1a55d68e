use crate::cli::args::Cli;
use crate::cli::logging::init_logging;
use crate::error::Result;
use crate::fetchers::{EndpointKind, MetadataFetcher};
use crate::models::BatchPlan;
use crate::processors::{Harvester, PlanReport};
use crate::readers::PointSource;
use crate::settings::{HarvestSettings, SettingsOverrides};
use crate::utils::progress::ProgressReporter;
use tracing::{info, warn};

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let settings = HarvestSettings::load(cli.config.as_deref())?.apply(SettingsOverrides {
        batch_size: cli.batch_size,
        batch_rounding: cli.rounding,
        endpoint: cli.endpoint,
        api_key: cli.key,
    })?;

    println!("Reading sample points from {}", cli.input_shp.display());
    let source = PointSource::open(&cli.input_shp)?;

    let plan = BatchPlan::new(
        source.len(),
        settings.batch_size,
        settings.batch_rounding,
        &cli.out_dir,
    )?;
    println!(
        "{} points, {} batches of up to {} -> {}",
        source.len(),
        plan.batches().len(),
        settings.batch_size,
        cli.out_dir.display()
    );

    if cli.plan_only {
        let report = PlanReport::from_plan(&plan, &cli.out_dir)?;
        println!("\n{}", report.generate_summary());
        println!("Plan only - no requests sent");
        return Ok(());
    }

    std::fs::create_dir_all(&cli.out_dir)?;

    let endpoint = settings.endpoint();
    if endpoint.kind() == EndpointKind::Json && !endpoint.has_api_key() {
        warn!("No API key configured; the JSON metadata endpoint is likely to refuse requests");
    }
    info!(
        endpoint = %endpoint.kind(),
        batch_size = settings.batch_size,
        rounding = %settings.batch_rounding,
        "Starting harvest"
    );

    let reprojector = source.reprojector()?;
    if !reprojector.is_identity() {
        println!("Reprojecting points from the dataset's .prj to WGS84");
    }

    let fetcher = MetadataFetcher::new(settings.transport(), endpoint);
    let harvester = Harvester::new(&source, reprojector, fetcher, settings.pacer());

    let progress = ProgressReporter::new(
        plan.pending_points() as u64,
        "Collecting panorama metadata...",
        cli.verbose,
    );

    let summary = harvester.run(&plan, Some(&progress))?;
    progress.finish_with_message(&format!(
        "Recorded {} panoramas",
        summary.records_written
    ));

    println!("\n{}", summary.summary());
    println!("Harvest complete!");

    Ok(())
}
