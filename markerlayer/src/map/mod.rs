//! Interactive map state over aggregated markers.
//!
//! [`MarkerMap`] ties the pieces together for a host application:
//!
//! ```text
//! records + layer/filter ──rebuild──▶ MapSnapshot { FeatureCollection, SearchIndex }
//!                                           │
//!        search_element(field, value) ──────┤──▶ Viewport::fly_to ──▶ PopupState
//!        select_feature(index) ─────────────┘
//! ```
//!
//! Rendering, camera animation and popup content are supplied by the host
//! through [`MapRenderer`], [`Viewport`] and [`PopupContent`].
//!
//! # Usage
//!
//! ```
//! use markerlayer::log::NoOpLogger;
//! use markerlayer::map::{MapOptions, MarkerMap, NoOpViewport};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let records = vec![
//!     json!({"name": "Depot", "lat": -29.8258, "lng": -51.1481}),
//!     json!({"name": "Yard", "lat": -29.8258, "lng": -51.1481}),
//! ]
//! .into_iter()
//! .map(|v| v.as_object().cloned().unwrap())
//! .collect();
//!
//! let map = MarkerMap::new(
//!     MapOptions::default(),
//!     records,
//!     Arc::new(NoOpViewport),
//!     Arc::new(NoOpLogger),
//! );
//! assert_eq!(map.snapshot().collection.len(), 1);
//!
//! let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! assert!(rt.block_on(map.search_element("name", "Yard")));
//! assert_eq!(map.popup().unwrap().selected.as_deref(), Some("Yard"));
//! ```

mod bounds;
mod layer;
mod options;
mod popup;
mod session;
mod surface;

pub use bounds::{Bounds, DEFAULT_CENTER_LAT, DEFAULT_CENTER_LON};
pub use layer::{find_layer, LayerFilter, MapLayer};
pub use options::{
    MapOptions, DEFAULT_CLUSTER_ZOOM_THRESHOLD, DEFAULT_FLY_TO_DURATION, DEFAULT_IDENTIFIER_FIELD,
    DEFAULT_TILE_ATTRIBUTION, DEFAULT_TILE_URL,
};
pub use popup::{PopupState, SelectOption};
pub use session::{MapSnapshot, MarkerMap};
pub use surface::{
    BoxFuture, DefaultPopupContent, FieldListPopup, MapRenderer, MarkerStyle, NoOpViewport,
    PopupContent, SimulatedViewport, Viewport,
};
