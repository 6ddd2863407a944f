//! Configuration initialization.

use std::path::Path;

use markerlayer::config::ConfigFile;

use crate::error::CliError;

/// Write a default config file at `path`.
///
/// An existing file is left alone unless `force` is set.
pub fn run(path: &Path, force: bool) -> Result<(), CliError> {
    if force {
        ConfigFile::default().save_to(path)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    if ConfigFile::ensure_exists_at(path)? {
        println!("Created configuration file at {}", path.display());
    } else {
        println!("Configuration file already exists at {}", path.display());
        println!("Use --force to overwrite it with defaults.");
    }
    Ok(())
}
