//! Find a marker by identifier, fly to it and show its popup.

use std::sync::Arc;

use clap::Args;
use markerlayer::map::{FieldListPopup, PopupContent, PopupState};

use super::common::{ConsoleViewport, MapArgs};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for `markerlayer search`.
#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    #[command(flatten)]
    pub map: MapArgs,

    /// Identifier field to search
    #[arg(long)]
    pub field: String,

    /// Value to look up
    #[arg(long)]
    pub value: String,
}

/// Run one search the way a map host would.
pub fn run(runner: &CliRunner, args: &SearchArgs) -> Result<(), CliError> {
    runner.log_startup("search");

    let map = runner.create_map(Arc::new(ConsoleViewport::default()))?;
    args.map.apply(&map)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(CliError::Runtime)?;

    if !runtime.block_on(map.search_element(&args.field, &args.value)) {
        return Err(CliError::NotFound {
            field: args.field.clone(),
            value: args.value.clone(),
        });
    }

    match map.popup() {
        Some(popup) => {
            for line in popup_lines(&popup) {
                println!("{}", line);
            }
        }
        None => {
            if let Some(index) = map.selected_feature() {
                println!("Selected feature #{}", index);
            }
        }
    }
    Ok(())
}

/// Popup listing: position, selector options with the chosen one marked,
/// then the chosen record's fields.
pub fn popup_lines(popup: &PopupState) -> Vec<String> {
    let mut lines = vec![format!("Feature #{} at {}", popup.feature_index, popup.position())];

    let selected = popup.selected.as_deref();
    for option in popup.options() {
        let marker = if Some(option.value.as_str()) == selected {
            ">"
        } else {
            " "
        };
        lines.push(format!("{} {}", marker, option.label));
    }

    for record in popup.visible_records() {
        let content = FieldListPopup {
            fields: record.keys().cloned().collect(),
        };
        lines.push(String::new());
        lines.extend(content.render(record).lines().map(|l| format!("  {}", l)));
    }
    lines
}
