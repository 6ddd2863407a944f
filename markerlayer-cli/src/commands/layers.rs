//! List configured base layers and the filters each one offers.

use markerlayer::map::MapLayer;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Print the configured layers.
pub fn run(runner: &CliRunner) -> Result<(), CliError> {
    runner.log_startup("layers");

    let layers = &runner.config().layers;
    if layers.is_empty() {
        println!("No layers configured. Add [layer:<label>] sections to config.ini.");
        return Ok(());
    }

    for (position, layer) in layers.iter().enumerate() {
        for line in layer_lines(layer, position == 0) {
            println!("{}", line);
        }
    }
    Ok(())
}

/// Listing for one layer; the first configured layer is the default.
pub fn layer_lines(layer: &MapLayer, is_default: bool) -> Vec<String> {
    let mut header = layer.label.clone();
    if let Some(style) = &layer.style {
        header.push_str(&format!(" [{}]", style));
    }
    if is_default {
        header.push_str(" (default)");
    }

    let mut lines = vec![header];
    if layer.filters.is_empty() {
        lines.push("  no filters".to_string());
    }
    for filter in &layer.filters {
        lines.push(format!(
            "  - {} [{}]: {} = {}",
            filter.label, filter.color, filter.filter.field, filter.filter.value
        ));
    }
    lines
}
