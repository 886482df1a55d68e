use panorama_harvester::cli::{run, Cli};
use panorama_harvester::fetchers::{Endpoint, EndpointKind, MetadataFetcher, Transport};
use panorama_harvester::models::{BatchPlan, BatchRounding, PanoramaRecord};
use panorama_harvester::processors::Harvester;
use panorama_harvester::readers::PointSource;
use panorama_harvester::utils::Pacer;
use panorama_harvester::writers::read_records;
use panorama_harvester::{HarvestError, Result};
use clap::Parser;
use pretty_assertions::assert_eq;
use shapefile::{Point, ShapeWriter};
use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// JSON provider stand-in: every point has a panorama at its own location
struct EchoProvider {
    calls: Cell<usize>,
}

impl EchoProvider {
    fn new() -> Self {
        Self {
            calls: Cell::new(0),
        }
    }
}

impl Transport for EchoProvider {
    fn get(&self, url: &str) -> Result<String> {
        self.calls.set(self.calls.get() + 1);
        let location = url
            .split("location=")
            .nth(1)
            .and_then(|rest| rest.split('&').next())
            .unwrap_or_default();
        let (lat, lng) = location.split_once(',').unwrap_or_default();
        Ok(format!(
            r#"{{"status":"OK","date":"2019-06","pano_id":"pano{}","location":{{"lat":{},"lng":{}}}}}"#,
            self.calls.get(),
            lat,
            lng
        ))
    }
}

/// Fails loudly if anything asks it for data
struct NoNetwork;

impl Transport for NoNetwork {
    fn get(&self, url: &str) -> Result<String> {
        panic!("unexpected request to {}", url);
    }
}

/// Serves canned bodies in order
struct Scripted {
    responses: Vec<std::result::Result<&'static str, &'static str>>,
    next: Cell<usize>,
}

impl Transport for Scripted {
    fn get(&self, url: &str) -> Result<String> {
        let i = self.next.get();
        self.next.set(i + 1);
        match self.responses[i] {
            Ok(body) => Ok(body.to_string()),
            Err(message) => Err(HarvestError::fetch(url, message)),
        }
    }
}

fn write_dataset(dir: &Path, count: usize) -> PathBuf {
    let path = dir.join("samples.shp");
    let points: Vec<Point> = (0..count)
        .map(|i| Point::new(-71.0 - i as f64 * 0.0001, 42.0 + i as f64 * 0.0001))
        .collect();
    ShapeWriter::from_path(&path)
        .expect("create shapefile")
        .write_shapes(&points)
        .expect("write shapefile");
    path
}

fn harvest<T: Transport>(
    source: &PointSource,
    transport: T,
    kind: EndpointKind,
    plan: &BatchPlan,
) -> Result<panorama_harvester::processors::HarvestSummary> {
    let harvester = Harvester::new(
        source,
        source.reprojector()?,
        MetadataFetcher::new(transport, Endpoint::new(kind, "http://stub/meta")),
        Pacer::disabled(),
    );
    harvester.run(plan, None)
}

fn batch_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_full_run_partitions_points_into_batch_files() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let shp = write_dataset(temp_dir.path(), 2500);
    let out = temp_dir.path().join("out");
    fs::create_dir_all(&out)?;

    let source = PointSource::open(&shp)?;
    let plan = BatchPlan::new(source.len(), 1000, BatchRounding::Nearest, &out)?;
    let provider = EchoProvider::new();
    let summary = harvest(&source, &provider, EndpointKind::Json, &plan)?;

    assert_eq!(
        batch_files(&out),
        vec![
            "Pnt_start0_end1000.txt",
            "Pnt_start1000_end2000.txt",
            "Pnt_start2000_end2500.txt",
        ]
    );
    assert_eq!(provider.calls.get(), 2500);
    assert_eq!(summary.records_written, 2500);
    assert_eq!(summary.batches_written, 3);

    let last = read_records(&out.join("Pnt_start2000_end2500.txt"))?;
    assert_eq!(last.len(), 500);
    assert_eq!(last[0].pano_id, "pano2001");
    Ok(())
}

#[test]
fn test_rerun_with_existing_outputs_changes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let shp = write_dataset(temp_dir.path(), 30);
    let out = temp_dir.path().join("out");
    fs::create_dir_all(&out)?;

    let source = PointSource::open(&shp)?;
    let plan = BatchPlan::new(source.len(), 10, BatchRounding::Nearest, &out)?;
    harvest(&source, EchoProvider::new(), EndpointKind::Json, &plan)?;

    let before: Vec<(String, String)> = batch_files(&out)
        .into_iter()
        .map(|name| {
            let content = fs::read_to_string(out.join(&name)).unwrap();
            (name, content)
        })
        .collect();

    let summary = harvest(&source, NoNetwork, EndpointKind::Json, &plan)?;
    assert_eq!(summary.batches_skipped, 3);
    assert_eq!(summary.batches_written, 0);

    let after: Vec<(String, String)> = batch_files(&out)
        .into_iter()
        .map(|name| {
            let content = fs::read_to_string(out.join(&name)).unwrap();
            (name, content)
        })
        .collect();
    assert_eq!(before, after);
    Ok(())
}

#[test]
fn test_interrupted_batch_is_skipped_not_resumed() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let shp = write_dataset(temp_dir.path(), 20);
    let out = temp_dir.path().join("out");
    fs::create_dir_all(&out)?;

    // What a killed run leaves behind: the first batch file with a single line
    let partial = "panoID: pano1 panoDate: 2019-06 longitude: -71 latitude: 42\n";
    fs::write(out.join("Pnt_start0_end10.txt"), partial)?;

    let source = PointSource::open(&shp)?;
    let plan = BatchPlan::new(source.len(), 10, BatchRounding::Nearest, &out)?;
    let provider = EchoProvider::new();
    let summary = harvest(&source, &provider, EndpointKind::Json, &plan)?;

    assert_eq!(summary.batches_skipped, 1);
    assert_eq!(provider.calls.get(), 10);
    assert_eq!(fs::read_to_string(out.join("Pnt_start0_end10.txt"))?, partial);
    assert_eq!(read_records(&out.join("Pnt_start10_end20.txt"))?.len(), 10);
    Ok(())
}

#[test]
fn test_failures_and_empty_answers_do_not_stop_the_batch() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let shp = write_dataset(temp_dir.path(), 5);
    let out = temp_dir.path().join("out");
    fs::create_dir_all(&out)?;

    let transport = Scripted {
        responses: vec![
            Ok(r#"{"date":"2019-06","pano_id":"abc123","location":{"lat":42.1,"lng":-71.2}}"#),
            Err("timed out"),
            Ok(r#"{"status":"ZERO_RESULTS"}"#),
            Ok("<html>Service Unavailable</html>"),
            Ok(r#"{"date":"2020-01","pano_id":"def456","location":{"lat":42.2,"lng":-71.3}}"#),
        ],
        next: Cell::new(0),
    };

    let source = PointSource::open(&shp)?;
    let plan = BatchPlan::new(source.len(), 5, BatchRounding::Nearest, &out)?;
    let summary = harvest(&source, transport, EndpointKind::Json, &plan)?;

    assert_eq!(summary.records_written, 2);
    assert_eq!(summary.no_panorama, 1);
    assert_eq!(summary.failed_points, 2);
    assert_eq!(
        fs::read_to_string(out.join("Pnt_start0_end5.txt"))?,
        "panoID: abc123 panoDate: 2019-06 longitude: -71.2 latitude: 42.1\n\
         panoID: def456 panoDate: 2020-01 longitude: -71.3 latitude: 42.2\n"
    );
    Ok(())
}

#[test]
fn test_projected_input_without_prj_leaves_no_batch_behind() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let shp = temp_dir.path().join("samples.shp");
    let metres = vec![
        Point::new(-7_915_000.0, 5_215_000.0),
        Point::new(-7_915_100.0, 5_215_100.0),
    ];
    ShapeWriter::from_path(&shp)
        .expect("create shapefile")
        .write_shapes(&metres)
        .expect("write shapefile");
    let out = temp_dir.path().join("out");
    fs::create_dir_all(&out)?;

    let source = PointSource::open(&shp)?;
    let plan = BatchPlan::new(source.len(), 2, BatchRounding::Nearest, &out)?;
    let failed = harvest(&source, NoNetwork, EndpointKind::Json, &plan);
    assert!(matches!(failed, Err(HarvestError::Dataset(_))));
    assert!(batch_files(&out).is_empty());

    // Once the input is fixed the same batch is fetched rather than skipped
    let shp = write_dataset(temp_dir.path(), 2);
    let source = PointSource::open(&shp)?;
    let summary = harvest(&source, EchoProvider::new(), EndpointKind::Json, &plan)?;
    assert_eq!(summary.batches_skipped, 0);
    assert_eq!(summary.records_written, 2);
    assert_eq!(batch_files(&out), vec!["Pnt_start0_end2.txt"]);
    Ok(())
}

#[test]
fn test_xml_endpoint_run() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let shp = write_dataset(temp_dir.path(), 2);
    let out = temp_dir.path().join("out");
    fs::create_dir_all(&out)?;

    let transport = Scripted {
        responses: vec![
            Ok("<panorama/>"),
            Ok(r#"<?xml version="1.0" encoding="UTF-8" ?><panorama><data_properties image_date="2011-07" pano_id="Kx3nO" lat="42.000105" lng="-71.000098"><copyright>© 2011</copyright></data_properties></panorama>"#),
        ],
        next: Cell::new(0),
    };

    let source = PointSource::open(&shp)?;
    let plan = BatchPlan::new(source.len(), 1000, BatchRounding::Ceiling, &out)?;
    harvest(&source, transport, EndpointKind::Xml, &plan)?;

    let records = read_records(&out.join("Pnt_start0_end2.txt"))?;
    assert_eq!(
        records,
        vec![PanoramaRecord::new(
            "Kx3nO".to_string(),
            "2011-07".to_string(),
            -71.000098,
            42.000105
        )]
    );
    Ok(())
}

#[test]
fn test_cli_plan_only_sends_no_requests() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let shp = write_dataset(temp_dir.path(), 25);
    let out = temp_dir.path().join("plan-out");

    let cli = Cli::try_parse_from([
        "panorama-harvester",
        "--inputshp",
        shp.to_str().unwrap(),
        "--outdir",
        out.to_str().unwrap(),
        "--num",
        "10",
        "--plan-only",
    ])
    .expect("valid arguments");
    run(cli)?;

    // Planning never creates the output directory or any batch file
    assert!(!out.exists());
    Ok(())
}
