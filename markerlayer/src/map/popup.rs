//! Popup state for a selected feature.
//!
//! A popup lists the records grouped at one coordinate through a searchable
//! selector. Only the record whose identifier matches the chosen option is
//! rendered.

use crate::marker::{value_key, Coordinates, Feature, Record};

use super::surface::PopupContent;

/// One entry in the popup's selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Currently open popup.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupState {
    /// Index of the selected feature in the collection it was opened from.
    pub feature_index: usize,
    pub feature: Feature,
    /// Field whose values populate the selector.
    pub identifier_field: String,
    pub selected: Option<String>,
}

impl PopupState {
    /// Open a popup on `feature`, selecting its first record.
    pub fn open(feature_index: usize, feature: Feature, identifier_field: &str) -> Self {
        let selected = feature
            .first_record()
            .and_then(|r| identifier_of(r, identifier_field));
        Self {
            feature_index,
            feature,
            identifier_field: identifier_field.to_string(),
            selected,
        }
    }

    /// Where the popup is anchored.
    pub fn position(&self) -> Coordinates {
        self.feature.coordinates
    }

    /// Selector options, one per record carrying the identifier field.
    pub fn options(&self) -> Vec<SelectOption> {
        self.feature
            .properties
            .iter()
            .filter_map(|r| identifier_of(r, &self.identifier_field))
            .map(|value| SelectOption {
                label: value.clone(),
                value,
            })
            .collect()
    }

    /// Change the selected option.
    ///
    /// Returns false, leaving the selection alone, if no option has `value`.
    pub fn choose(&mut self, value: &str) -> bool {
        let known = self.options().iter().any(|o| o.value == value);
        if known {
            self.selected = Some(value.to_string());
        }
        known
    }

    /// Select the record at `index` within the feature.
    pub fn choose_record(&mut self, index: usize) -> bool {
        match self
            .feature
            .record(index)
            .and_then(|r| identifier_of(r, &self.identifier_field))
        {
            Some(value) => {
                self.selected = Some(value);
                true
            }
            None => false,
        }
    }

    /// Records whose identifier equals the selected option.
    pub fn visible_records(&self) -> Vec<&Record> {
        let Some(selected) = self.selected.as_deref() else {
            return Vec::new();
        };
        self.feature
            .properties
            .iter()
            .filter(|r| identifier_of(r, &self.identifier_field).as_deref() == Some(selected))
            .collect()
    }

    /// Render the visible records with `content`.
    pub fn render(&self, content: &dyn PopupContent) -> Vec<String> {
        self.visible_records()
            .into_iter()
            .map(|r| content.render(r))
            .collect()
    }
}

fn identifier_of(record: &Record, field: &str) -> Option<String> {
    record.get(field).and_then(value_key)
}
