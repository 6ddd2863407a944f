//! Base layers and the filters each one offers.

use serde::{Deserialize, Serialize};

use crate::marker::FilterPredicate;

/// A filter button offered by a layer's legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerFilter {
    /// Legend label.
    pub label: String,
    /// Legend swatch color.
    pub color: String,
    pub filter: FilterPredicate,
}

impl LayerFilter {
    pub fn new(label: impl Into<String>, color: impl Into<String>, filter: FilterPredicate) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
            filter,
        }
    }
}

/// A selectable base layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLayer {
    pub label: String,
    /// Path color handed to the renderer, if any.
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub filters: Vec<LayerFilter>,
}

impl MapLayer {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            style: None,
            filters: Vec::new(),
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_filter(mut self, filter: LayerFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Find a filter by its legend label.
    pub fn filter(&self, label: &str) -> Option<&LayerFilter> {
        self.filters.iter().find(|f| f.label == label)
    }
}

/// Find a layer by label.
pub fn find_layer<'a>(layers: &'a [MapLayer], label: &str) -> Option<&'a MapLayer> {
    layers.iter().find(|l| l.label == label)
}
