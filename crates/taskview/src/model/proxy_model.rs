//! Row-filtering proxy for task trees.
//!
//! `TaskFilterProxyModel` layers a pattern filter (and optional column
//! sort) over a [`PropertyItemModel`]. Only top-level task-context rows are
//! matched against the pattern; everything else passes through. The proxy
//! presents its own row numbering — the view space — and owns the
//! translation between that space and the source model's.

use std::cmp::Ordering;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use taskview_core::ConnectionId;

use super::index::{IndexSpace, ModelIndex};
use super::item::ItemKind;
use super::role::{ItemData, ItemRole};
use super::traits::{ItemModel, ModelSignals};
use super::tree_model::PropertyItemModel;

/// Internal row mapping between the view and source spaces (top level
/// only; child rows keep their source numbering under a mapped parent).
#[derive(Default)]
struct RowMapping {
    /// View row index to source row index.
    view_to_source: Vec<usize>,
    /// Source row index to view row index (`None` if filtered out).
    source_to_view: Vec<Option<usize>>,
}

impl RowMapping {
    fn view_row_count(&self) -> usize {
        self.view_to_source.len()
    }

    fn source_row(&self, view_row: usize) -> Option<usize> {
        self.view_to_source.get(view_row).copied()
    }

    fn view_row(&self, source_row: usize) -> Option<usize> {
        self.source_to_view.get(source_row).and_then(|&r| r)
    }
}

/// A proxy model that filters top-level task rows by basename.
///
/// The filter pattern slot is regex-capable in principle, but acceptance
/// is a plain case-sensitive substring test on the task basename — no
/// pattern compilation happens. Rows that are not task contexts, and task
/// rows while no pattern is set, are always accepted.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use taskview::model::{ItemModel, ModelIndex, PropertyItemModel, TaskFilterProxyModel};
///
/// let source = Arc::new(PropertyItemModel::new());
/// let proxy = TaskFilterProxyModel::new(source);
/// proxy.set_filter_pattern(Some("nav".into()));
/// assert_eq!(proxy.row_count(&ModelIndex::invalid()), 0);
/// ```
pub struct TaskFilterProxyModel {
    source: Arc<PropertyItemModel>,
    /// Filter pattern; matched as a substring of the task basename.
    pattern: RwLock<Option<String>>,
    /// Column sort: (column, descending).
    sort: RwLock<Option<(usize, bool)>>,
    mapping: RwLock<RowMapping>,
    signals: ModelSignals,
    /// Subscriptions on the source model, released on drop.
    rows_inserted_sub: ConnectionId,
    rows_removed_sub: ConnectionId,
    model_reset_sub: ConnectionId,
}

impl TaskFilterProxyModel {
    /// Creates a proxy over the given source model.
    ///
    /// The proxy follows source row insertions/removals and resets by
    /// rebuilding its mapping.
    pub fn new(source: Arc<PropertyItemModel>) -> Arc<Self> {
        let proxy = Arc::new_cyclic(|weak: &Weak<Self>| {
            let signals = source.signals();
            let w = weak.clone();
            let rows_inserted_sub = signals.rows_inserted.connect(move |_| {
                if let Some(proxy) = w.upgrade() {
                    proxy.invalidate();
                }
            });
            let w = weak.clone();
            let rows_removed_sub = signals.rows_removed.connect(move |_| {
                if let Some(proxy) = w.upgrade() {
                    proxy.invalidate();
                }
            });
            let w = weak.clone();
            let model_reset_sub = signals.model_reset.connect(move |_| {
                if let Some(proxy) = w.upgrade() {
                    proxy.invalidate();
                }
            });

            Self {
                source: source.clone(),
                pattern: RwLock::new(None),
                sort: RwLock::new(None),
                mapping: RwLock::new(RowMapping::default()),
                signals: ModelSignals::new(),
                rows_inserted_sub,
                rows_removed_sub,
                model_reset_sub,
            }
        });
        proxy.rebuild_mapping();
        proxy
    }

    /// Returns the current filter pattern.
    pub fn filter_pattern(&self) -> Option<String> {
        self.pattern.read().clone()
    }

    /// Sets or clears the filter pattern and refreshes the view mapping.
    pub fn set_filter_pattern(&self, pattern: Option<String>) {
        *self.pattern.write() = pattern;
        self.invalidate();
    }

    /// Sets column-based sorting over the view rows.
    ///
    /// Rows compare by their Display data in `column`.
    pub fn sort_by_column(&self, column: usize, descending: bool) {
        *self.sort.write() = Some((column, descending));
        self.invalidate();
    }

    /// Clears sorting, restoring source order.
    pub fn clear_sort(&self) {
        *self.sort.write() = None;
        self.invalidate();
    }

    /// Rebuilds the mapping and announces the layout change.
    pub fn invalidate(&self) {
        self.signals.emit_layout_changed(|| {
            self.rebuild_mapping();
        });
    }

    /// Returns the source model.
    pub fn source(&self) -> &Arc<PropertyItemModel> {
        &self.source
    }

    /// Decides whether a source row is visible.
    ///
    /// Fails closed on unresolvable rows. Task-context rows match the
    /// pattern as a substring of their basename; all other rows are
    /// accepted.
    pub fn filter_accepts_row(&self, source_row: usize, source_parent: &ModelIndex) -> bool {
        let index = self.source.index(source_row, 0, source_parent);
        if !index.is_valid() {
            return false;
        }
        let Some(item) = self.source.item_from_index(&index) else {
            return true;
        };
        if let ItemKind::TaskContext { basename } = item.kind()
            && let Some(pattern) = self.pattern.read().as_deref()
        {
            return basename.contains(pattern);
        }
        true
    }

    /// Maps a view-space index to the source space.
    ///
    /// Total: source-space input is returned unchanged, invalid input stays
    /// invalid.
    pub fn map_to_source(&self, index: &ModelIndex) -> ModelIndex {
        if !index.is_valid() {
            return ModelIndex::invalid();
        }
        if index.space() == IndexSpace::Source {
            return index.clone();
        }

        let parent = index.parent();
        if parent.is_valid() {
            // Child rows keep their numbering; only the parent translates.
            let source_parent = self.map_to_source(&parent);
            self.source.index(index.row(), index.column(), &source_parent)
        } else {
            let Some(source_row) = self.mapping.read().source_row(index.row()) else {
                return ModelIndex::invalid();
            };
            self.source
                .index(source_row, index.column(), &ModelIndex::invalid())
        }
    }

    /// Maps a source-space index to the view space.
    ///
    /// Total: view-space input is returned unchanged; rows hidden by the
    /// filter map to an invalid index.
    pub fn map_from_source(&self, index: &ModelIndex) -> ModelIndex {
        if !index.is_valid() {
            return ModelIndex::invalid();
        }
        if index.space() == IndexSpace::View {
            return index.clone();
        }

        let parent = self.source.parent(index);
        if parent.is_valid() {
            let view_parent = self.map_from_source(&parent);
            if !view_parent.is_valid() {
                return ModelIndex::invalid();
            }
            ModelIndex::with_internal_id(
                IndexSpace::View,
                index.row(),
                index.column(),
                view_parent,
                index.internal_id(),
            )
        } else {
            let Some(view_row) = self.mapping.read().view_row(index.row()) else {
                return ModelIndex::invalid();
            };
            ModelIndex::with_internal_id(
                IndexSpace::View,
                view_row,
                index.column(),
                ModelIndex::invalid(),
                index.internal_id(),
            )
        }
    }

    /// Rebuilds the top-level row mapping from filter and sort state.
    fn rebuild_mapping(&self) {
        let root = ModelIndex::invalid();
        let source_count = self.source.row_count(&root);

        let mut visible: Vec<usize> = (0..source_count)
            .filter(|&row| self.filter_accepts_row(row, &root))
            .collect();

        if let Some((column, descending)) = *self.sort.read() {
            visible.sort_by(|&a, &b| {
                let index_a = self.source.index(a, column, &root);
                let index_b = self.source.index(b, column, &root);
                let data_a = self.source.data(&index_a, ItemRole::Display);
                let data_b = self.source.data(&index_b, ItemRole::Display);
                let cmp = compare_item_data(&data_a, &data_b);
                if descending { cmp.reverse() } else { cmp }
            });
        }

        let mut mapping = self.mapping.write();
        mapping.view_to_source.clear();
        mapping.source_to_view.clear();
        mapping.source_to_view.resize(source_count, None);
        for (view_row, &source_row) in visible.iter().enumerate() {
            mapping.view_to_source.push(source_row);
            mapping.source_to_view[source_row] = Some(view_row);
        }
    }
}

impl Drop for TaskFilterProxyModel {
    fn drop(&mut self) {
        let signals = self.source.signals();
        signals.rows_inserted.disconnect(self.rows_inserted_sub);
        signals.rows_removed.disconnect(self.rows_removed_sub);
        signals.model_reset.disconnect(self.model_reset_sub);
    }
}

/// Compares two data values for column sorting.
fn compare_item_data(a: &ItemData, b: &ItemData) -> Ordering {
    match (a, b) {
        (ItemData::String(sa), ItemData::String(sb)) => sa.cmp(sb),
        (ItemData::Int(ia), ItemData::Int(ib)) => ia.cmp(ib),
        (ItemData::Float(fa), ItemData::Float(fb)) => fa.partial_cmp(fb).unwrap_or(Ordering::Equal),
        (ItemData::Bool(ba), ItemData::Bool(bb)) => ba.cmp(bb),
        _ => Ordering::Equal,
    }
}

impl ItemModel for TaskFilterProxyModel {
    fn row_count(&self, parent: &ModelIndex) -> usize {
        if parent.is_valid() {
            self.source.row_count(&self.map_to_source(parent))
        } else {
            self.mapping.read().view_row_count()
        }
    }

    fn column_count(&self, parent: &ModelIndex) -> usize {
        self.source.column_count(parent)
    }

    fn data(&self, index: &ModelIndex, role: ItemRole) -> ItemData {
        self.source.data(&self.map_to_source(index), role)
    }

    fn index(&self, row: usize, column: usize, parent: &ModelIndex) -> ModelIndex {
        if column >= self.source.column_count(&ModelIndex::invalid()) {
            return ModelIndex::invalid();
        }

        if parent.is_valid() {
            let source_parent = self.map_to_source(parent);
            let source_index = self.source.index(row, column, &source_parent);
            if !source_index.is_valid() {
                return ModelIndex::invalid();
            }
            ModelIndex::with_internal_id(
                IndexSpace::View,
                row,
                column,
                parent.sibling_at_column(0),
                source_index.internal_id(),
            )
        } else {
            let Some(source_row) = self.mapping.read().source_row(row) else {
                return ModelIndex::invalid();
            };
            let source_index = self
                .source
                .index(source_row, column, &ModelIndex::invalid());
            if !source_index.is_valid() {
                return ModelIndex::invalid();
            }
            ModelIndex::with_internal_id(
                IndexSpace::View,
                row,
                column,
                ModelIndex::invalid(),
                source_index.internal_id(),
            )
        }
    }

    fn parent(&self, index: &ModelIndex) -> ModelIndex {
        let source_parent = self.source.parent(&self.map_to_source(index));
        self.map_from_source(&source_parent)
    }

    fn signals(&self) -> &ModelSignals {
        &self.signals
    }

    fn set_data(&self, index: &ModelIndex, value: ItemData, role: ItemRole) -> bool {
        self.source.set_data(&self.map_to_source(index), value, role)
    }

    fn header_data(&self, section: usize) -> ItemData {
        self.source.header_data(section)
    }
}
