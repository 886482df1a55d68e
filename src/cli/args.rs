use crate::fetchers::EndpointKind;
use crate::models::BatchRounding;
use crate::utils::constants::DEFAULT_OUTPUT_DIR;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "panorama-harvester")]
#[command(about = "Collect street-level panorama metadata for shapefile sample points")]
#[command(version)]
pub struct Cli {
    #[arg(long = "inputshp", help = "Input point shapefile (.shp)")]
    pub input_shp: PathBuf,

    #[arg(
        long = "outdir",
        default_value = DEFAULT_OUTPUT_DIR,
        help = "Output directory for the Pnt_start*_end*.txt batch files"
    )]
    pub out_dir: PathBuf,

    #[arg(long, help = "Provider API key for the JSON endpoint [default: empty]")]
    pub key: Option<String>,

    #[arg(long = "num", help = "Points per output file [default: 1000]")]
    pub batch_size: Option<usize>,

    #[arg(long, value_enum, help = "Metadata endpoint variant [default: json]")]
    pub endpoint: Option<EndpointKind>,

    #[arg(long, value_enum, help = "Batch count rounding [default: nearest]")]
    pub rounding: Option<BatchRounding>,

    #[arg(long, help = "Settings file (TOML, YAML, JSON, ...)")]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        default_value = "false",
        help = "Print the batch plan and exit without querying"
    )]
    pub plan_only: bool,

    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["panorama-harvester", "--inputshp", "samples.shp"]).unwrap();
        assert_eq!(cli.input_shp, PathBuf::from("samples.shp"));
        assert_eq!(cli.out_dir, PathBuf::from("mosaic-mrt.tif"));
        assert_eq!(cli.key, None);
        assert_eq!(cli.batch_size, None);
        assert!(!cli.plan_only);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "panorama-harvester",
            "--inputshp",
            "samples.shp",
            "--outdir",
            "meta",
            "--key",
            "ABC",
            "--num",
            "500",
            "--endpoint",
            "xml",
            "--rounding",
            "ceiling",
            "--plan-only",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.out_dir, PathBuf::from("meta"));
        assert_eq!(cli.key.as_deref(), Some("ABC"));
        assert_eq!(cli.batch_size, Some(500));
        assert_eq!(cli.endpoint, Some(EndpointKind::Xml));
        assert_eq!(cli.rounding, Some(BatchRounding::Ceiling));
        assert!(cli.plan_only);
        assert!(cli.verbose);
    }

    #[test]
    fn test_input_is_required() {
        assert!(Cli::try_parse_from(["panorama-harvester"]).is_err());
    }
}
