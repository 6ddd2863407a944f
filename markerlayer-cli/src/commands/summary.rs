//! Aggregate markers and list the resulting points.

use std::sync::Arc;

use markerlayer::map::{MarkerMap, NoOpViewport, DEFAULT_IDENTIFIER_FIELD};

use super::common::{MapArgs, TextRenderer};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Print record and feature counts, the fitted bounds, then every feature.
pub fn run(runner: &CliRunner, args: &MapArgs) -> Result<(), CliError> {
    runner.log_startup("summary");

    let map = runner.create_map(Arc::new(NoOpViewport))?;
    args.apply(&map)?;

    for line in header_lines(&map) {
        println!("{}", line);
    }
    println!();

    let identifier_field = map
        .identifier_fields()
        .first()
        .cloned()
        .unwrap_or_else(|| DEFAULT_IDENTIFIER_FIELD.to_string());
    map.render(&TextRenderer { identifier_field });
    Ok(())
}

/// Counts, bounds, clustering and searchable fields for the current map state.
pub fn header_lines(map: &MarkerMap) -> Vec<String> {
    let snapshot = map.snapshot();
    let bounds = map.bounds();
    let center = bounds.center();
    let mut searchable: Vec<String> = snapshot
        .index
        .fields()
        .map(|field| format!("{} ({} values)", field, snapshot.index.entry_count(field)))
        .collect();
    searchable.sort_unstable();
    let filter = map
        .active_filter()
        .map(|f| f.label)
        .unwrap_or_else(|| "(none)".to_string());

    vec![
        format!("Records:  {}", map.record_count()),
        format!(
            "Features: {} ({} records shown)",
            snapshot.collection.len(),
            snapshot.collection.record_count()
        ),
        format!(
            "Bounds:   south {} west {} north {} east {}",
            bounds.south, bounds.west, bounds.north, bounds.east
        ),
        format!("Center:   {}", center),
        format!("Filter:   {}", filter),
        format!(
            "Clustering below zoom {}",
            map.options().cluster_zoom_threshold
        ),
        format!("Search:   {}", searchable.join(", ")),
    ]
}
