//! Collaborator interfaces implemented by the host's map surface.
//!
//! The library never draws anything. A host supplies a [`MapRenderer`] that
//! turns the current collection into markers, a [`Viewport`] that can animate
//! to a coordinate, and optionally a [`PopupContent`] renderer for records.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::Value;

use super::layer::MapLayer;
use crate::marker::{Coordinates, FeatureCollection, Record};

/// Boxed future returned by object-safe async collaborator methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Circle marker appearance handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    /// Radius in pixels.
    pub radius: f64,
    pub fill_color: String,
    /// Fill opacity in `0.0..=1.0`.
    pub opacity: f64,
    pub stroke: bool,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: 8.0,
            fill_color: "#ff7800".to_string(),
            opacity: 1.0,
            stroke: false,
        }
    }
}

/// Draws a feature collection on the host's map.
///
/// Implementations convert each point to a marker themselves and report
/// clicks back through [`MarkerMap::select_feature`](super::MarkerMap::select_feature).
pub trait MapRenderer: Send + Sync {
    fn render(&self, layer: Option<&MapLayer>, collection: &FeatureCollection, style: &MarkerStyle);
}

/// Programmatic camera control.
pub trait Viewport: Send + Sync {
    /// Animate to `target` over `duration`, resolving when the animation ends.
    fn fly_to(&self, target: Coordinates, duration: Duration) -> BoxFuture<'_, ()>;
}

/// Viewport that arrives instantly.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpViewport;

impl Viewport for NoOpViewport {
    fn fly_to(&self, _target: Coordinates, _duration: Duration) -> BoxFuture<'_, ()> {
        Box::pin(async {})
    }
}

/// Headless viewport that takes the full animation time to arrive.
///
/// Tracks where the camera is, updating it when a flight completes.
#[derive(Debug, Default)]
pub struct SimulatedViewport {
    position: Mutex<Option<Coordinates>>,
}

impl SimulatedViewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where the last completed flight ended.
    pub fn position(&self) -> Option<Coordinates> {
        *self.position.lock()
    }
}

impl Viewport for SimulatedViewport {
    fn fly_to(&self, target: Coordinates, duration: Duration) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            tokio::time::sleep(duration).await;
            *self.position.lock() = Some(target);
        })
    }
}

/// Renders one record inside the popup.
pub trait PopupContent: Send + Sync {
    fn render(&self, record: &Record) -> String;
}

/// Placeholder content shown when the host supplies no renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPopupContent;

impl PopupContent for DefaultPopupContent {
    fn render(&self, _record: &Record) -> String {
        "- - -".to_string()
    }
}

/// Renders the listed fields as `field: value` lines.
#[derive(Debug, Clone, Default)]
pub struct FieldListPopup {
    pub fields: Vec<String>,
}

impl PopupContent for FieldListPopup {
    fn render(&self, record: &Record) -> String {
        self.fields
            .iter()
            .filter_map(|field| {
                record.get(field).map(|value| match value {
                    Value::String(s) => format!("{}: {}", field, s),
                    other => format!("{}: {}", field, other),
                })
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
