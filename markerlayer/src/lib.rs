//! MarkerLayer - clustered marker layers with search for slippy maps
//!
//! This library turns flat JSON records carrying a latitude and a longitude
//! into point features grouped by coordinate, keeps a search index over
//! configured identifier fields, and drives map navigation (fly-to and
//! popup selection) for a host renderer.
//!
//! # High-Level API
//!
//! For most use cases, the [`map`] module provides the facade:
//!
//! ```ignore
//! use markerlayer::config::ConfigFile;
//! use markerlayer::map::{MapOptions, MarkerMap};
//!
//! let config = ConfigFile::load()?;
//! let records = markerlayer::source::load_records("stops.json")?;
//! let map = MarkerMap::new(MapOptions::from_config(&config), records, viewport, logger);
//!
//! map.search_element("name", "Central").await;
//! ```

pub mod config;
pub mod log;
pub mod logging;
pub mod map;
pub mod marker;
pub mod search;
pub mod source;

/// Version of the MarkerLayer library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
