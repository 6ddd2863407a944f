//! Fast lookup of records by identifier value.
//!
//! A [`SearchIndex`] maps `(identifier field, value)` to the position of a
//! record inside a [`FeatureCollection`](crate::marker::FeatureCollection),
//! so host-driven navigation can jump straight to a marker.
//!
//! Lookups never fail hard. A miss comes back as `None`, or as a
//! [`LookupMiss`] reason from [`SearchIndex::try_lookup`] for logging.

mod index;

pub use index::{LookupMiss, RecordLocation, SearchIndex};
