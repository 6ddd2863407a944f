//! Common types and utilities shared across CLI commands.

use std::time::Duration;

use clap::Args;
use markerlayer::map::{
    BoxFuture, MapLayer, MapRenderer, MarkerMap, MarkerStyle, SimulatedViewport, Viewport,
};
use markerlayer::marker::{value_key, Coordinates, Feature, FeatureCollection};

use crate::error::CliError;

/// Layer and filter selection shared by map commands.
#[derive(Debug, Clone, Default, Args)]
pub struct MapArgs {
    /// Base layer to activate (defaults to the first configured layer)
    #[arg(long)]
    pub layer: Option<String>,

    /// Legend label of a filter offered by the active layer
    #[arg(long)]
    pub filter: Option<String>,
}

impl MapArgs {
    /// Activate the selected layer and filter on `map`.
    pub fn apply(&self, map: &MarkerMap) -> Result<(), CliError> {
        if let Some(layer) = &self.layer {
            map.set_active_layer(layer);
        }
        if let Some(label) = &self.filter {
            if !map.apply_filter_label(label) {
                return Err(CliError::UnknownFilter {
                    layer: map.active_layer().unwrap_or_default(),
                    label: label.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Viewport that reports each flight on stdout and waits out its duration.
#[derive(Debug, Default)]
pub struct ConsoleViewport {
    inner: SimulatedViewport,
}

impl Viewport for ConsoleViewport {
    fn fly_to(&self, target: Coordinates, duration: Duration) -> BoxFuture<'_, ()> {
        println!("Flying to {} ...", target);
        self.inner.fly_to(target, duration)
    }
}

/// Renderer that prints one line per feature.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    /// Field naming each record in the listing
    pub identifier_field: String,
}

impl MapRenderer for TextRenderer {
    fn render(&self, layer: Option<&MapLayer>, collection: &FeatureCollection, style: &MarkerStyle) {
        let layer = layer.map(|l| l.label.as_str()).unwrap_or("(none)");
        println!(
            "Layer: {}  |  markers: radius {} {} opacity {}",
            layer, style.radius, style.fill_color, style.opacity
        );
        for (index, feature) in collection.iter().enumerate() {
            println!("{}", describe_feature(index, feature, &self.identifier_field));
        }
    }
}

/// One-line description of a feature: index, position, record count and
/// the identifiers of its records.
pub fn describe_feature(index: usize, feature: &Feature, identifier_field: &str) -> String {
    let names: Vec<String> = feature
        .properties
        .iter()
        .filter_map(|r| r.get(identifier_field).and_then(value_key))
        .collect();
    let count = feature.properties.len();
    let noun = if count == 1 { "record" } else { "records" };

    if names.is_empty() {
        format!("#{:<4} {}  {} {}", index, feature.coordinates, count, noun)
    } else {
        format!(
            "#{:<4} {}  {} {}: {}",
            index,
            feature.coordinates,
            count,
            noun,
            names.join(", ")
        )
    }
}
