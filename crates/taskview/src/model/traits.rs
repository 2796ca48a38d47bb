//! Core traits for the Model/View architecture.
//!
//! This module defines the abstract item-model capability: row/column/
//! parent-indexed tree storage plus the change notifications views listen
//! to. Both the source model and the filter proxy implement [`ItemModel`].

use taskview_core::Signal;

use super::index::ModelIndex;
use super::role::{ItemData, ItemRole};

/// The core trait for item models.
///
/// `ItemModel` provides a uniform interface over hierarchical data. Views
/// use this interface to query and display data without knowing the
/// underlying storage.
///
/// # Implementation Requirements
///
/// At minimum, implement [`row_count`](ItemModel::row_count),
/// [`column_count`](ItemModel::column_count), [`data`](ItemModel::data),
/// [`index`](ItemModel::index), [`parent`](ItemModel::parent) and
/// [`signals`](ItemModel::signals). Editable models also implement
/// [`set_data`](ItemModel::set_data).
pub trait ItemModel: Send + Sync {
    /// Returns the number of rows under the given parent.
    ///
    /// Pass an invalid index for the top level.
    fn row_count(&self, parent: &ModelIndex) -> usize;

    /// Returns the number of columns for children of the given parent.
    fn column_count(&self, parent: &ModelIndex) -> usize;

    /// Returns the data stored under the given role for the item at index.
    ///
    /// Returns `ItemData::None` for invalid indices, unsupported roles,
    /// and empty cells.
    fn data(&self, index: &ModelIndex, role: ItemRole) -> ItemData;

    /// Creates a model index for the given row and column under parent.
    ///
    /// Returns `ModelIndex::invalid()` if the position is out of bounds.
    fn index(&self, row: usize, column: usize, parent: &ModelIndex) -> ModelIndex;

    /// Returns the parent of the given index.
    ///
    /// Returns `ModelIndex::invalid()` for root-level items and invalid
    /// indices.
    fn parent(&self, index: &ModelIndex) -> ModelIndex;

    /// Returns the signals for this model.
    ///
    /// Views connect to these to receive change notifications.
    fn signals(&self) -> &ModelSignals;

    /// Sets the data for the given index and role.
    ///
    /// Returns `true` if the data was successfully set. Implementations
    /// emit `data_changed` after modifying data. The default is read-only.
    fn set_data(&self, _index: &ModelIndex, _value: ItemData, _role: ItemRole) -> bool {
        false
    }

    /// Returns `true` if the item at parent has any children.
    ///
    /// Override if counting children is expensive.
    fn has_children(&self, parent: &ModelIndex) -> bool {
        self.row_count(parent) > 0
    }

    /// Returns the column header label for the given section.
    fn header_data(&self, _section: usize) -> ItemData {
        ItemData::None
    }
}

/// Collection of signals emitted by item models.
///
/// Models emit these when their data or structure changes; views and
/// controllers connect to stay synchronized. Emission order is the call
/// order: notifications fire synchronously before the mutating call
/// returns.
pub struct ModelSignals {
    /// Emitted after rows have been inserted.
    /// Args: (parent index, first row, last row)
    pub rows_inserted: Signal<(ModelIndex, usize, usize)>,

    /// Emitted just before rows are removed.
    /// Args: (parent index, first row, last row)
    pub rows_about_to_be_removed: Signal<(ModelIndex, usize, usize)>,

    /// Emitted after rows have been removed.
    /// Args: (parent index, first row, last row)
    pub rows_removed: Signal<(ModelIndex, usize, usize)>,

    /// Emitted when data in existing items changes.
    /// Args: (top-left index, bottom-right index, changed roles)
    pub data_changed: Signal<(ModelIndex, ModelIndex, Vec<ItemRole>)>,

    /// Emitted after a layout change (sorting, filtering, forced
    /// refresh).
    pub layout_changed: Signal<()>,

    /// Emitted after the model has been reset.
    pub model_reset: Signal<()>,
}

impl Default for ModelSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelSignals {
    /// Creates a new set of model signals.
    pub fn new() -> Self {
        Self {
            rows_inserted: Signal::new(),
            rows_about_to_be_removed: Signal::new(),
            rows_removed: Signal::new(),
            data_changed: Signal::new(),
            layout_changed: Signal::new(),
            model_reset: Signal::new(),
        }
    }

    /// Emits the data_changed signal for a single item.
    pub fn emit_data_changed_single(&self, index: ModelIndex, roles: Vec<ItemRole>) {
        self.data_changed.emit((index.clone(), index, roles));
    }

    /// Runs `change_fn` and emits `layout_changed` afterwards.
    pub fn emit_layout_changed<F>(&self, change_fn: F)
    where
        F: FnOnce(),
    {
        change_fn();
        self.layout_changed.emit(());
    }

    /// Runs `reset_fn` and emits `model_reset` afterwards.
    pub fn emit_reset<F>(&self, reset_fn: F)
    where
        F: FnOnce(),
    {
        reset_fn();
        self.model_reset.emit(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_model_signals_creation() {
        let signals = ModelSignals::new();
        assert_eq!(signals.rows_inserted.connection_count(), 0);
        assert_eq!(signals.data_changed.connection_count(), 0);
    }

    #[test]
    fn test_emit_data_changed_single() {
        let signals = ModelSignals::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let recv = received.clone();
        signals
            .data_changed
            .connect(move |(top_left, bottom_right, roles)| {
                recv.lock()
                    .push((top_left.row(), bottom_right.row(), roles.clone()));
            });

        let index = ModelIndex::new(
            crate::model::IndexSpace::Source,
            3,
            1,
            ModelIndex::invalid(),
        );
        signals.emit_data_changed_single(index, vec![ItemRole::Edit]);

        let events = received.lock();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], (3, 3, vec![ItemRole::Edit]));
    }

    #[test]
    fn test_emit_layout_changed_runs_change_first() {
        let signals = ModelSignals::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let l = log.clone();
        signals.layout_changed.connect(move |_| {
            l.lock().push("signal");
        });

        let l = log.clone();
        signals.emit_layout_changed(|| l.lock().push("change"));

        assert_eq!(*log.lock(), vec!["change", "signal"]);
    }
}
