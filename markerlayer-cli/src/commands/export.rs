//! Write the aggregated markers as GeoJSON.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use markerlayer::map::NoOpViewport;

use super::common::MapArgs;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for `markerlayer export`.
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub map: MapArgs,

    /// Output file (stdout if omitted)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

/// Export the current feature collection.
pub fn run(runner: &CliRunner, args: &ExportArgs) -> Result<(), CliError> {
    runner.log_startup("export");

    let map = runner.create_map(Arc::new(NoOpViewport))?;
    args.map.apply(&map)?;

    let snapshot = map.snapshot();
    let geojson = snapshot
        .collection
        .to_geojson(!args.compact)
        .map_err(CliError::Export)?;

    match &args.output {
        Some(path) => {
            runner.write_output(path, &geojson)?;
            println!(
                "Exported {} features to {}",
                snapshot.collection.len(),
                path.display()
            );
        }
        None => println!("{}", geojson),
    }
    Ok(())
}
