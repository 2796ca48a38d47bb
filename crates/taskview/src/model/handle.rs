//! Direct-or-filtered access to the property tree.
//!
//! Views and controllers hold a `TreeModelHandle` instead of a bare model
//! reference. The handle knows whether a filter proxy sits between the
//! view and the source, and owns the total conversions between the two
//! index spaces — call sites never branch on "is this a proxy" themselves.
//! Constructing a handle requires a conforming model, so installing a
//! model of the wrong capability is a compile error rather than a runtime
//! fault.

use std::sync::Arc;

use super::index::{IndexSpace, ModelIndex};
use super::item::PropertyItem;
use super::proxy_model::TaskFilterProxyModel;
use super::role::{ItemData, ItemRole};
use super::traits::{ItemModel, ModelSignals};
use super::tree_model::PropertyItemModel;

/// A handle to the model a view displays.
///
/// `Direct` presents the source model as-is (view space == source space);
/// `Filtered` routes through a [`TaskFilterProxyModel`].
#[derive(Clone)]
pub enum TreeModelHandle {
    /// The view displays the source model directly.
    Direct(Arc<PropertyItemModel>),
    /// The view displays the source through a filter proxy.
    Filtered(Arc<TaskFilterProxyModel>),
}

impl TreeModelHandle {
    /// Returns the ultimate source model, unwrapping the proxy if present.
    pub fn real_model(&self) -> &Arc<PropertyItemModel> {
        match self {
            TreeModelHandle::Direct(model) => model,
            TreeModelHandle::Filtered(proxy) => proxy.source(),
        }
    }

    /// The model the view talks to: the proxy if present, else the source.
    pub fn view_model(&self) -> &dyn ItemModel {
        match self {
            TreeModelHandle::Direct(model) => model.as_ref(),
            TreeModelHandle::Filtered(proxy) => proxy.as_ref(),
        }
    }

    /// The index space the view-facing model produces.
    pub fn view_space(&self) -> IndexSpace {
        match self {
            TreeModelHandle::Direct(_) => IndexSpace::Source,
            TreeModelHandle::Filtered(_) => IndexSpace::View,
        }
    }

    /// Converts an index of either space to the source space.
    ///
    /// Total: source-space input passes through, invalid stays invalid.
    pub fn to_source(&self, index: &ModelIndex) -> ModelIndex {
        match self {
            TreeModelHandle::Direct(_) => index.clone(),
            TreeModelHandle::Filtered(proxy) => proxy.map_to_source(index),
        }
    }

    /// Converts an index of either space to the view space.
    ///
    /// Total: view-space input passes through; rows hidden by the filter
    /// map to an invalid index.
    pub fn from_source(&self, index: &ModelIndex) -> ModelIndex {
        match self {
            TreeModelHandle::Direct(_) => index.clone(),
            TreeModelHandle::Filtered(proxy) => proxy.map_from_source(index),
        }
    }

    /// Resolves an index of either space to its item.
    pub fn item_from_index(&self, index: &ModelIndex) -> Option<Arc<dyn PropertyItem>> {
        self.real_model().item_from_index(&self.to_source(index))
    }

    /// Returns the data for an index of either space.
    pub fn data(&self, index: &ModelIndex, role: ItemRole) -> ItemData {
        self.real_model().data(&self.to_source(index), role)
    }

    /// Writes data through to the item at an index of either space.
    pub fn set_data(&self, index: &ModelIndex, value: ItemData, role: ItemRole) -> bool {
        self.real_model().set_data(&self.to_source(index), value, role)
    }

    /// Creates a view-facing index for the given position.
    ///
    /// The produced index lives in the parent's space, or in the handle's
    /// view space for top-level rows.
    pub fn index(&self, row: usize, column: usize, parent: &ModelIndex) -> ModelIndex {
        if parent.is_valid() && parent.space() == IndexSpace::Source {
            return self.real_model().index(row, column, parent);
        }
        self.view_model().index(row, column, parent)
    }

    /// Returns the parent of an index, in the same space as the input.
    pub fn parent(&self, index: &ModelIndex) -> ModelIndex {
        if !index.is_valid() {
            return ModelIndex::invalid();
        }
        match index.space() {
            IndexSpace::Source => self.real_model().parent(index),
            IndexSpace::View => self.view_model().parent(index),
        }
    }

    /// Returns whether the row at an index of either space has children.
    pub fn has_children(&self, index: &ModelIndex) -> bool {
        self.real_model().has_children(&self.to_source(index))
    }

    /// The view-facing model's signals (the proxy's when filtered).
    pub fn signals(&self) -> &ModelSignals {
        self.view_model().signals()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::item::ItemKind;
    use crate::model::test_support::StubItem;

    fn populated_model() -> Arc<PropertyItemModel> {
        let model = Arc::new(PropertyItemModel::new());
        let nav = model.append_row(
            Arc::new(
                StubItem::new("navigation_task").with_kind(ItemKind::task_context("navigation_task")),
            ),
            None,
        );
        model
            .append_child_row(&nav, Arc::new(StubItem::new("state")), None)
            .unwrap();
        model.append_row(
            Arc::new(StubItem::new("planner_task").with_kind(ItemKind::task_context("planner_task"))),
            None,
        );
        model
    }

    #[test]
    fn test_direct_handle_is_identity() {
        let model = populated_model();
        let handle = TreeModelHandle::Direct(model.clone());

        let index = model.index(1, 0, &ModelIndex::invalid());
        assert_eq!(handle.to_source(&index), index);
        assert_eq!(handle.from_source(&index), index);
        assert_eq!(handle.view_space(), IndexSpace::Source);
        assert!(Arc::ptr_eq(handle.real_model(), &model));
    }

    #[test]
    fn test_filtered_handle_translates() {
        let model = populated_model();
        let proxy = TaskFilterProxyModel::new(model.clone());
        proxy.set_filter_pattern(Some("plan".into()));
        let handle = TreeModelHandle::Filtered(proxy);

        assert_eq!(handle.view_space(), IndexSpace::View);

        // The only visible row is planner_task, at view row 0.
        let view_index = handle.index(0, 0, &ModelIndex::invalid());
        assert_eq!(view_index.space(), IndexSpace::View);
        let item = handle.item_from_index(&view_index).unwrap();
        assert_eq!(item.data(ItemRole::Display).as_string(), Some("planner_task"));

        let source_index = handle.to_source(&view_index);
        assert_eq!(source_index.row(), 1);
        assert_eq!(handle.from_source(&source_index), view_index);

        // navigation_task is hidden.
        let hidden = model.index(0, 0, &ModelIndex::invalid());
        assert!(!handle.from_source(&hidden).is_valid());
    }

    #[test]
    fn test_parent_preserves_space() {
        let model = populated_model();
        let proxy = TaskFilterProxyModel::new(model.clone());
        let handle = TreeModelHandle::Filtered(proxy);

        let view_parent = handle.index(0, 0, &ModelIndex::invalid());
        let view_child = handle.index(0, 0, &view_parent);
        assert_eq!(handle.parent(&view_child).space(), IndexSpace::View);

        let source_parent = model.index(0, 0, &ModelIndex::invalid());
        let source_child = model.index(0, 0, &source_parent);
        assert_eq!(handle.parent(&source_child).space(), IndexSpace::Source);
    }
}
