//! MarkerLayer CLI - Command-line interface
//!
//! This binary hosts the MarkerLayer library from the terminal: it loads
//! marker records and config.ini, aggregates the markers, and runs searches
//! with a console viewport in place of an interactive map.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::common::MapArgs;
use commands::export::ExportArgs;
use commands::search::SearchArgs;
use error::CliError;
use runner::{CliRunner, GlobalOptions};

#[derive(Parser)]
#[command(name = "markerlayer")]
#[command(version)]
#[command(about = "Cluster, filter and search map markers", long_about = None)]
struct Cli {
    /// Config file (default: ~/.markerlayer/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON marker file, overriding [markers] file in config.ini
    #[arg(long, global = true)]
    markers: Option<PathBuf>,

    /// Enable debug logging, mirrored to stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config.ini
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// List configured base layers and their filters
    Layers,

    /// Aggregate markers and list the resulting points
    Summary(MapArgs),

    /// Write the aggregated markers as GeoJSON
    Export(ExportArgs),

    /// Find a marker by identifier, fly to it and show its popup
    Search(SearchArgs),
}

fn main() {
    let cli = Cli::parse();
    let options = GlobalOptions {
        config: cli.config,
        markers: cli.markers,
        debug: cli.debug,
    };

    if let Err(e) = run(cli.command, &options) {
        e.exit();
    }
}

fn run(command: Commands, options: &GlobalOptions) -> Result<(), CliError> {
    if let Commands::Init { force } = command {
        return commands::init::run(&options.config_path(), force);
    }

    let runner = CliRunner::new(options)?;
    match command {
        Commands::Init { .. } => Ok(()),
        Commands::Layers => commands::layers::run(&runner),
        Commands::Summary(args) => commands::summary::run(&runner, &args),
        Commands::Export(args) => commands::export::run(&runner, &args),
        Commands::Search(args) => commands::search::run(&runner, &args),
    }
}
