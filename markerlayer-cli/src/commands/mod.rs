//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`init`] - Configuration initialization
//! - [`layers`] - List configured base layers and their filters
//! - [`summary`] - Aggregate markers and list the resulting points
//! - [`export`] - Write the aggregated markers as GeoJSON
//! - [`search`] - Find a marker by identifier, fly to it and show its popup

pub mod common;
pub mod export;
pub mod init;
pub mod layers;
pub mod search;
pub mod summary;
