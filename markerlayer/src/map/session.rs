//! MarkerMap: the state behind one interactive marker map.
//!
//! Owns the marker records, the active layer and filter, and the current
//! [`MapSnapshot`]. Any input change rebuilds the feature collection and the
//! search index together and swaps them in as one snapshot.
//!
//! # Consistency
//!
//! - Rebuilds run under the input lock, so they are serialized
//! - The snapshot is built outside the snapshot lock and swapped in with a
//!   brief write; readers hold an `Arc` and see either the old or the new
//!   snapshot, never a mix of collection and index from different builds
//! - Navigation is last-request-wins: a fly-to that finishes after a newer
//!   selection request leaves the selection alone. The epoch check and the
//!   popup write share the popup lock, as do the epoch bumps of clicks
//! - A search whose flight outlived a rebuild re-resolves its record in the
//!   new snapshot

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use super::bounds::Bounds;
use super::layer::{find_layer, LayerFilter, MapLayer};
use super::options::{MapOptions, DEFAULT_IDENTIFIER_FIELD};
use super::popup::PopupState;
use super::surface::{MapRenderer, Viewport};
use crate::log::Logger;
use crate::marker::{aggregate, CoordinateFields, FeatureCollection, Record};
use crate::search::{RecordLocation, SearchIndex};
use crate::{log_debug, log_info, log_warn};

/// Collection and index produced by one rebuild.
#[derive(Debug, Default)]
pub struct MapSnapshot {
    pub collection: FeatureCollection,
    pub index: SearchIndex,
    /// Number of rebuilds that produced this snapshot; 0 before the first.
    pub generation: u64,
}

/// Everything a rebuild reads.
struct MapInputs {
    records: Vec<Record>,
    fields: CoordinateFields,
    identifier_fields: Vec<String>,
    active_layer: Option<String>,
    active_filter: Option<LayerFilter>,
}

/// State and operations of one marker map.
pub struct MarkerMap {
    options: MapOptions,
    inputs: Mutex<MapInputs>,
    snapshot: RwLock<Arc<MapSnapshot>>,
    bounds: RwLock<Bounds>,
    popup: Mutex<Option<PopupState>>,
    /// Bumped by every selection request; a navigation applies its
    /// selection only if it still holds the latest value.
    selection_epoch: AtomicU64,
    viewport: Arc<dyn Viewport>,
    logger: Arc<dyn Logger>,
}

impl MarkerMap {
    /// Create a map over `records` and build the first snapshot.
    ///
    /// The first layer, if any, becomes the active layer.
    pub fn new(
        options: MapOptions,
        records: Vec<Record>,
        viewport: Arc<dyn Viewport>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let inputs = MapInputs {
            fields: options.fields.clone(),
            identifier_fields: options.identifier_fields.clone(),
            active_layer: options.layers.first().map(|l| l.label.clone()),
            active_filter: None,
            records,
        };
        let bounds = Bounds::from_records(&inputs.records, &inputs.fields);

        let map = Self {
            options,
            inputs: Mutex::new(inputs),
            snapshot: RwLock::new(Arc::new(MapSnapshot::default())),
            bounds: RwLock::new(bounds),
            popup: Mutex::new(None),
            selection_epoch: AtomicU64::new(0),
            viewport,
            logger,
        };

        {
            let inputs = map.inputs.lock();
            map.rebuild(&inputs);
        }
        map
    }

    /// Options the map was created with.
    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<MapSnapshot> {
        Arc::clone(&self.snapshot.read())
    }

    /// Bounds fitted to the records when the map was created or the
    /// coordinate fields last changed.
    pub fn bounds(&self) -> Bounds {
        self.bounds.read().clone()
    }

    pub fn clustering_enabled(&self, zoom: u8) -> bool {
        self.options.clustering_enabled(zoom)
    }

    pub fn record_count(&self) -> usize {
        self.inputs.lock().records.len()
    }

    /// Replace the marker records.
    ///
    /// An empty record list is stored but leaves the current snapshot in
    /// place. Returns whether a rebuild happened.
    pub fn set_records(&self, records: Vec<Record>) -> bool {
        let mut inputs = self.inputs.lock();
        inputs.records = records;
        self.rebuild(&inputs)
    }

    /// Change the latitude/longitude field names and refit the bounds.
    pub fn set_coordinate_fields(&self, fields: CoordinateFields) -> bool {
        let mut inputs = self.inputs.lock();
        inputs.fields = fields;
        *self.bounds.write() = Bounds::from_records(&inputs.records, &inputs.fields);
        self.rebuild(&inputs)
    }

    pub fn set_identifier_fields(&self, fields: Vec<String>) -> bool {
        let mut inputs = self.inputs.lock();
        inputs.identifier_fields = fields;
        self.rebuild(&inputs)
    }

    pub fn coordinate_fields(&self) -> CoordinateFields {
        self.inputs.lock().fields.clone()
    }

    pub fn identifier_fields(&self) -> Vec<String> {
        self.inputs.lock().identifier_fields.clone()
    }

    /// Label of the active base layer.
    pub fn active_layer(&self) -> Option<String> {
        self.inputs.lock().active_layer.clone()
    }

    /// Switch the base layer. Clears the active filter.
    ///
    /// Unknown labels are accepted; such a layer simply offers no filters.
    pub fn set_active_layer(&self, label: &str) -> bool {
        let mut inputs = self.inputs.lock();
        log_debug!(self.logger, "Switching base layer to '{}'", label);
        inputs.active_layer = Some(label.to_string());
        inputs.active_filter = None;
        self.rebuild(&inputs)
    }

    /// Filters offered by the active layer.
    pub fn filters(&self) -> Vec<LayerFilter> {
        self.layer_for(&self.inputs.lock())
            .map(|layer| layer.filters.clone())
            .unwrap_or_default()
    }

    /// Apply a filter and rebuild.
    pub fn apply_filter(&self, filter: LayerFilter) -> bool {
        let mut inputs = self.inputs.lock();
        log_debug!(
            self.logger,
            "Applying filter '{}' ({} = {})",
            filter.label,
            filter.filter.field,
            filter.filter.value
        );
        inputs.active_filter = Some(filter);
        self.rebuild(&inputs)
    }

    /// Apply the active layer's filter with this legend label.
    ///
    /// Returns false if the active layer has no such filter.
    pub fn apply_filter_label(&self, label: &str) -> bool {
        let filter = {
            let inputs = self.inputs.lock();
            self.layer_for(&inputs)
                .and_then(|layer| layer.filter(label))
                .cloned()
        };
        match filter {
            Some(filter) => {
                self.apply_filter(filter);
                true
            }
            None => {
                log_warn!(self.logger, "No filter labelled '{}' on the active layer", label);
                false
            }
        }
    }

    /// Remove the active filter and rebuild.
    pub fn clear_filter(&self) -> bool {
        let mut inputs = self.inputs.lock();
        inputs.active_filter = None;
        self.rebuild(&inputs)
    }

    pub fn active_filter(&self) -> Option<LayerFilter> {
        self.inputs.lock().active_filter.clone()
    }

    /// Whether `filter` is the one currently applied.
    pub fn is_filter_active(&self, filter: &LayerFilter) -> bool {
        self.inputs.lock().active_filter.as_ref() == Some(filter)
    }

    /// Hand the current collection to a renderer.
    pub fn render(&self, renderer: &dyn MapRenderer) {
        let snapshot = self.snapshot();
        let layer = self.layer_for(&self.inputs.lock());
        renderer.render(layer, &snapshot.collection, &self.options.marker_style);
    }

    /// Select a feature, as when its marker is clicked.
    ///
    /// Opens the popup on the feature's first record. Returns false if the
    /// index is out of range.
    pub fn select_feature(&self, feature_index: usize) -> bool {
        let snapshot = self.snapshot();
        let Some(feature) = snapshot.collection.get(feature_index) else {
            log_warn!(self.logger, "Feature {} does not exist", feature_index);
            return false;
        };

        let popup = PopupState::open(feature_index, feature.clone(), &self.popup_field());
        let mut current = self.popup.lock();
        self.selection_epoch.fetch_add(1, Ordering::SeqCst);
        *current = Some(popup);
        true
    }

    /// Index of the selected feature, whether or not popups are enabled.
    pub fn selected_feature(&self) -> Option<usize> {
        self.popup.lock().as_ref().map(|p| p.feature_index)
    }

    /// The open popup, or `None` when closed or popups are disabled.
    pub fn popup(&self) -> Option<PopupState> {
        if !self.options.enable_popup {
            return None;
        }
        self.popup.lock().clone()
    }

    /// Choose an option in the open popup's selector.
    pub fn choose_popup_option(&self, value: &str) -> bool {
        self.popup
            .lock()
            .as_mut()
            .is_some_and(|popup| popup.choose(value))
    }

    /// Close the popup and clear the selection.
    pub fn close_popup(&self) {
        let mut current = self.popup.lock();
        self.selection_epoch.fetch_add(1, Ordering::SeqCst);
        *current = None;
    }

    /// Find a record by identifier, fly to it and select it.
    ///
    /// Returns false, after logging why, when the lookup misses. The
    /// selection is applied once the viewport arrives, unless a newer
    /// selection request started in the meantime.
    pub async fn search_element(&self, field: &str, value: &str) -> bool {
        let snapshot = self.snapshot();

        let location = match snapshot.index.try_lookup(field, value) {
            Ok(location) => location,
            Err(miss) => {
                log_warn!(self.logger, "Search for {}={} found nothing: {}", field, value, miss);
                return false;
            }
        };
        let Some(feature) = snapshot.collection.get(location.feature) else {
            log_warn!(
                self.logger,
                "Search for {}={} resolved to missing feature {}",
                field,
                value,
                location.feature
            );
            return false;
        };

        let epoch = {
            let _current = self.popup.lock();
            self.selection_epoch.fetch_add(1, Ordering::SeqCst) + 1
        };
        log_info!(
            self.logger,
            "Flying to {}={} at {}",
            field,
            value,
            feature.coordinates
        );
        self.viewport
            .fly_to(feature.coordinates, self.options.fly_to_duration)
            .await;

        // A rebuild during the flight may have moved or dropped the record.
        let latest = self.snapshot();
        let (location, snapshot) = if latest.generation == snapshot.generation {
            (location, snapshot)
        } else {
            match latest.index.try_lookup(field, value) {
                Ok(location) => (location, latest),
                Err(miss) => {
                    log_warn!(
                        self.logger,
                        "Record {}={} left the map during navigation: {}",
                        field,
                        value,
                        miss
                    );
                    return true;
                }
            }
        };
        let popup = self.popup_at(location, &snapshot, field);

        let mut current = self.popup.lock();
        if self.selection_epoch.load(Ordering::SeqCst) != epoch {
            log_debug!(
                self.logger,
                "Navigation to {}={} superseded by a newer selection",
                field,
                value
            );
            return true;
        }
        if popup.is_some() {
            *current = popup;
        }
        true
    }

    /// Popup on the record at `location`, keyed by the configured popup
    /// field, or by `searched_field` when the record lacks it.
    fn popup_at(
        &self,
        location: RecordLocation,
        snapshot: &MapSnapshot,
        searched_field: &str,
    ) -> Option<PopupState> {
        let feature = snapshot.collection.get(location.feature)?;
        let mut popup = PopupState::open(location.feature, feature.clone(), &self.popup_field());
        if !popup.choose_record(location.record) {
            popup = PopupState::open(location.feature, feature.clone(), searched_field);
            popup.choose_record(location.record);
        }
        Some(popup)
    }

    fn popup_field(&self) -> String {
        self.inputs
            .lock()
            .identifier_fields
            .first()
            .cloned()
            .unwrap_or_else(|| DEFAULT_IDENTIFIER_FIELD.to_string())
    }

    fn layer_for<'a>(&'a self, inputs: &MapInputs) -> Option<&'a MapLayer> {
        let label = inputs.active_layer.as_deref()?;
        find_layer(&self.options.layers, label)
    }

    /// Rebuild collection and index from `inputs` and swap them in.
    fn rebuild(&self, inputs: &MapInputs) -> bool {
        if inputs.records.is_empty() {
            log_debug!(self.logger, "No marker records loaded; keeping current features");
            return false;
        }

        let filter = inputs.active_filter.as_ref().map(|f| &f.filter);
        let collection = aggregate(&inputs.records, &inputs.fields, filter);
        let index = SearchIndex::build(&collection, &inputs.identifier_fields);
        let generation = self.snapshot.read().generation + 1;

        log_info!(
            self.logger,
            "Rebuilt {} features from {} records (generation {})",
            collection.len(),
            inputs.records.len(),
            generation
        );

        *self.snapshot.write() = Arc::new(MapSnapshot {
            collection,
            index,
            generation,
        });
        true
    }
}
