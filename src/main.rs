use clap::Parser;
use panorama_harvester::cli::{run, Cli};
use panorama_harvester::error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
