//! Controller wiring a tree view to a property model.
//!
//! `TreeViewController` augments a [`TreeView`] with model-aware behavior:
//! it resolves view indices back to source-model items (through the filter
//! proxy when one is installed), routes the view's expand/collapse and
//! context-menu gestures to the items' hooks, and can suspend and later
//! restore the per-row listener state of a view that went invisible —
//! without losing the user's expand/collapse layout.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use taskview_core::ConnectionId;
use tracing::debug;

use super::tree_view::{ContextMenuPolicy, SortOrder, TreeView};
use crate::model::{
    ItemModel, ModelIndex, PropertyItem, PropertyItemDelegate, PropertyItemModel, TreeModelHandle,
};

/// Which per-row hook a view gesture maps to.
#[derive(Clone, Copy)]
enum RowHook {
    Expanded,
    Collapsed,
}

/// Orchestrates a [`TreeView`] over a [`TreeModelHandle`].
///
/// Created once per view with [`setup`](TreeViewController::setup), which
/// installs the delegate and the view configuration. Install a model with
/// [`set_model`](TreeViewController::set_model); afterwards every expand
/// or collapse of a row invokes the `expanded`/`collapsed` hook of the
/// row's Name item and then, if present, of its Value item.
pub struct TreeViewController {
    view: Arc<TreeView>,
    delegate: Arc<PropertyItemDelegate>,
    /// Back-reference handed to signal subscriptions.
    this: Weak<TreeViewController>,
    /// Subscriptions on the view's expand/collapse signals. Released
    /// before every re-attach so repeated `set_model` calls never stack
    /// notifications.
    expanded_sub: Mutex<Option<ConnectionId>>,
    collapsed_sub: Mutex<Option<ConnectionId>>,
    /// Top-level source rows whose listeners were suspended by
    /// [`disconnect`](Self::disconnect). Allocated on first use, cleared
    /// by [`reconnect`](Self::reconnect).
    disconnected_rows: Mutex<Option<Vec<usize>>>,
}

impl TreeViewController {
    /// Creates a controller for `view` and applies the one-time view
    /// setup: item delegate, sorting (column 0 ascending), alternating
    /// row colors, custom context-menu routing and drag-source behavior.
    pub fn setup(view: Arc<TreeView>) -> Arc<Self> {
        let controller = Arc::new_cyclic(|weak: &Weak<Self>| Self {
            view: view.clone(),
            delegate: Arc::new(PropertyItemDelegate::new(weak.clone())),
            this: weak.clone(),
            expanded_sub: Mutex::new(None),
            collapsed_sub: Mutex::new(None),
            disconnected_rows: Mutex::new(None),
        });

        view.set_item_delegate(controller.delegate.clone());
        view.set_sorting_enabled(true);
        view.sort_by_column(0, SortOrder::Ascending);
        view.set_alternating_row_colors(true);
        view.set_context_menu_policy(ContextMenuPolicy::Custom);
        view.set_drag_enabled(true);

        let weak = Arc::downgrade(&controller);
        view.context_menu_requested.connect(move |(index, pos)| {
            let Some(controller) = weak.upgrade() else {
                return;
            };
            if !index.is_valid() {
                return;
            }
            if let Some(item) = controller.item_from_index(index) {
                item.context_menu(*pos, controller.view());
            }
        });

        controller
    }

    /// The view this controller drives.
    pub fn view(&self) -> &Arc<TreeView> {
        &self.view
    }

    /// The delegate installed on the view.
    pub fn delegate(&self) -> &Arc<PropertyItemDelegate> {
        &self.delegate
    }

    /// The model handle installed on the view, if any.
    pub fn model(&self) -> Option<TreeModelHandle> {
        self.view.model()
    }

    /// The ultimate source model, unwrapping the proxy if present.
    pub fn real_model(&self) -> Option<Arc<PropertyItemModel>> {
        self.model().map(|handle| handle.real_model().clone())
    }

    /// Resolves an index of either space to its item.
    ///
    /// Returns `None` while no model is installed or when the index does
    /// not resolve.
    pub fn item_from_index(&self, index: &ModelIndex) -> Option<Arc<dyn PropertyItem>> {
        self.model()?.item_from_index(index)
    }

    /// Installs a model and subscribes to the view's expand/collapse
    /// notifications.
    ///
    /// The previous model's subscriptions are released first, so calling
    /// this repeatedly neither leaks old subscriptions nor double-invokes
    /// item hooks.
    pub fn set_model(&self, model: TreeModelHandle) {
        if let Some(id) = self.expanded_sub.lock().take() {
            self.view.expanded.disconnect(id);
        }
        if let Some(id) = self.collapsed_sub.lock().take() {
            self.view.collapsed.disconnect(id);
        }

        self.view.set_model(Some(model));

        let weak = self.this.clone();
        *self.expanded_sub.lock() = Some(self.view.expanded.connect(move |index| {
            if let Some(controller) = weak.upgrade() {
                controller.invoke_row_hooks(index, RowHook::Expanded);
            }
        }));
        let weak = self.this.clone();
        *self.collapsed_sub.lock() = Some(self.view.collapsed.connect(move |index| {
            if let Some(controller) = weak.upgrade() {
                controller.invoke_row_hooks(index, RowHook::Collapsed);
            }
        }));
    }

    /// Suspends the listeners of every visually expanded top-level row.
    ///
    /// Walks the real model's rows in ascending order; each row that is
    /// expanded (translated through the proxy mapping when present) is
    /// collapsed, which fires the `collapsed` hook on its Name item and
    /// then on its Value item, and its row index is recorded for
    /// [`reconnect`](Self::reconnect). The visual expand state is the
    /// source of truth: invoking this twice without an intervening
    /// reconnect finds nothing left expanded and records nothing.
    ///
    /// Call this when the view is no longer visible, so hidden rows stop
    /// receiving background updates.
    pub fn disconnect(&self) {
        let Some(handle) = self.model() else {
            return;
        };
        let real = handle.real_model().clone();
        let root = ModelIndex::invalid();

        let mut suspended = Vec::new();
        for row in 0..real.row_count(&root) {
            let source_index = real.index(row, 0, &root);
            let view_index = handle.from_source(&source_index);
            if !self.view.is_expanded(&view_index) {
                continue;
            }
            self.view.collapse(&view_index);
            suspended.push(row);
        }

        debug!(
            target: "taskview::controller",
            rows = suspended.len(),
            "suspended row listeners"
        );
        self.disconnected_rows
            .lock()
            .get_or_insert_with(Vec::new)
            .extend(suspended);
    }

    /// Restores the state recorded by [`disconnect`](Self::disconnect).
    ///
    /// Every recorded row is expanded again — firing the `expanded` hook
    /// on both column items — and the record is cleared, leaving the view
    /// in its pre-disconnect layout.
    pub fn reconnect(&self) {
        let Some(handle) = self.model() else {
            return;
        };
        let real = handle.real_model().clone();
        let root = ModelIndex::invalid();

        let rows: Vec<usize> = {
            let mut record = self.disconnected_rows.lock();
            match record.as_mut() {
                Some(rows) => rows.drain(..).collect(),
                None => Vec::new(),
            }
        };

        debug!(
            target: "taskview::controller",
            rows = rows.len(),
            "restoring row listeners"
        );
        for row in rows {
            let source_index = real.index(row, 0, &root);
            let view_index = handle.from_source(&source_index);
            self.view.expand(&view_index);
        }
    }

    /// The rows recorded by [`disconnect`](Self::disconnect).
    ///
    /// Allocates the record on first access.
    pub fn disconnected_items(&self) -> Vec<usize> {
        self.disconnected_rows
            .lock()
            .get_or_insert_with(Vec::new)
            .clone()
    }

    /// Closes the (persistent) editor on the given cell, if any.
    pub(crate) fn close_editor(&self, index: &ModelIndex) {
        self.view.close_persistent_editor(index);
    }

    /// Announces a layout change on the view-facing model, forcing a
    /// visual refresh.
    pub(crate) fn notify_layout_changed(&self) {
        if let Some(handle) = self.model() {
            handle.signals().layout_changed.emit(());
        }
    }

    /// Routes an expand/collapse gesture to the row's item hooks:
    /// column 0 first, then column 1 when an item sits there.
    fn invoke_row_hooks(&self, index: &ModelIndex, hook: RowHook) {
        let Some(handle) = self.model() else {
            return;
        };

        if let Some(item) = handle.item_from_index(&index.sibling_at_column(0)) {
            fire(&*item, hook);
        }

        let value_cell = handle.index(index.row(), 1, &handle.parent(index));
        if !value_cell.is_valid() {
            return;
        }
        if let Some(item) = handle.item_from_index(&value_cell) {
            fire(&*item, hook);
        }
    }
}

fn fire(item: &dyn PropertyItem, hook: RowHook) {
    match hook {
        RowHook::Expanded => item.expanded(),
        RowHook::Collapsed => item.collapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::StubItem;
    use crate::model::{IndexSpace, ItemKind, TaskFilterProxyModel};
    use crate::widget::Point;
    use parking_lot::Mutex;

    struct Fixture {
        controller: Arc<TreeViewController>,
        view: Arc<TreeView>,
        model: Arc<PropertyItemModel>,
        name_items: Vec<Arc<StubItem>>,
        value_items: Vec<Arc<StubItem>>,
    }

    /// Three top-level rows, each with a Name and a Value item and one
    /// child row (so they can expand).
    fn fixture() -> Fixture {
        let model = Arc::new(PropertyItemModel::new());
        let mut name_items = Vec::new();
        let mut value_items = Vec::new();

        for name in ["alpha", "beta", "gamma"] {
            let name_item = Arc::new(StubItem::new(name));
            let value_item = Arc::new(StubItem::new(&format!("{name}_value")));
            let row = model.append_row(name_item.clone(), Some(value_item.clone()));
            model
                .append_child_row(&row, Arc::new(StubItem::new("child")), None)
                .unwrap();
            name_items.push(name_item);
            value_items.push(value_item);
        }

        let view = Arc::new(TreeView::new());
        let controller = TreeViewController::setup(view.clone());
        controller.set_model(TreeModelHandle::Direct(model.clone()));

        Fixture {
            controller,
            view,
            model,
            name_items,
            value_items,
        }
    }

    #[test]
    fn test_setup_configures_view() {
        let view = Arc::new(TreeView::new());
        let controller = TreeViewController::setup(view.clone());

        assert!(view.is_sorting_enabled());
        assert_eq!(view.sort_indicator(), (0, SortOrder::Ascending));
        assert!(view.alternating_row_colors());
        assert_eq!(view.context_menu_policy(), ContextMenuPolicy::Custom);
        assert!(view.is_drag_enabled());
        assert!(view.item_delegate().is_some());
        assert!(Arc::ptr_eq(view.item_delegate().as_ref().unwrap(), controller.delegate()));
    }

    #[test]
    fn test_expand_fires_hooks_on_both_columns_in_order() {
        let model = Arc::new(PropertyItemModel::new());
        let log = Arc::new(Mutex::new(Vec::new()));
        let name_item = Arc::new(StubItem::new("row").with_hook_log(log.clone(), "name"));
        let value_item = Arc::new(StubItem::new("value").with_hook_log(log.clone(), "value"));
        let row = model.append_row(name_item, Some(value_item));
        model
            .append_child_row(&row, Arc::new(StubItem::new("child")), None)
            .unwrap();

        let view = Arc::new(TreeView::new());
        let controller = TreeViewController::setup(view.clone());
        controller.set_model(TreeModelHandle::Direct(model.clone()));

        let index = model.index(0, 0, &ModelIndex::invalid());
        view.expand(&index);
        view.collapse(&index);

        assert_eq!(
            *log.lock(),
            vec![
                "name:expanded",
                "value:expanded",
                "name:collapsed",
                "value:collapsed"
            ]
        );
    }

    #[test]
    fn test_rows_without_value_item_only_fire_name_hook() {
        let model = Arc::new(PropertyItemModel::new());
        let name_item = Arc::new(StubItem::new("row"));
        let row = model.append_row(name_item.clone(), None);
        model
            .append_child_row(&row, Arc::new(StubItem::new("child")), None)
            .unwrap();

        let view = Arc::new(TreeView::new());
        let controller = TreeViewController::setup(view.clone());
        controller.set_model(TreeModelHandle::Direct(model.clone()));

        let index = model.index(0, 0, &ModelIndex::invalid());
        view.expand(&index);
        assert_eq!(name_item.expanded_count(), 1);
    }

    #[test]
    fn test_repeated_set_model_does_not_stack_hooks() {
        let f = fixture();
        // Re-install the same model a few times.
        f.controller
            .set_model(TreeModelHandle::Direct(f.model.clone()));
        f.controller
            .set_model(TreeModelHandle::Direct(f.model.clone()));

        let index = f.model.index(0, 0, &ModelIndex::invalid());
        f.view.expand(&index);

        assert_eq!(f.name_items[0].expanded_count(), 1);
        assert_eq!(f.value_items[0].expanded_count(), 1);
    }

    #[test]
    fn test_expand_collapse_hook_counts_stay_consistent() {
        let f = fixture();
        let index = f.model.index(0, 0, &ModelIndex::invalid());

        for _ in 0..3 {
            f.view.expand(&index);
            f.view.collapse(&index);
        }
        f.view.expand(&index);

        let item = &f.name_items[0];
        assert_eq!(item.expanded_count(), 4);
        assert_eq!(item.collapsed_count(), 3);
    }

    #[test]
    fn test_disconnect_reconnect_round_trip() {
        let f = fixture();
        let first = f.model.index(0, 0, &ModelIndex::invalid());
        let third = f.model.index(2, 0, &ModelIndex::invalid());
        f.view.expand(&first);
        f.view.expand(&third);

        f.controller.disconnect();

        assert_eq!(f.controller.disconnected_items(), vec![0, 2]);
        assert!(!f.view.is_expanded(&first));
        assert!(!f.view.is_expanded(&third));
        assert_eq!(f.name_items[0].collapsed_count(), 1);
        assert_eq!(f.value_items[0].collapsed_count(), 1);
        assert_eq!(f.name_items[1].collapsed_count(), 0);

        f.controller.reconnect();

        assert!(f.controller.disconnected_items().is_empty());
        assert!(f.view.is_expanded(&first));
        assert!(f.view.is_expanded(&third));
        assert!(!f.view.is_expanded(&f.model.index(1, 0, &ModelIndex::invalid())));
        assert_eq!(f.name_items[0].expanded_count(), 2);
        assert_eq!(f.value_items[2].expanded_count(), 2);
    }

    #[test]
    fn test_second_disconnect_records_nothing() {
        let f = fixture();
        f.view.expand(&f.model.index(0, 0, &ModelIndex::invalid()));

        f.controller.disconnect();
        f.controller.disconnect();

        assert_eq!(f.controller.disconnected_items(), vec![0]);
        assert_eq!(f.name_items[0].collapsed_count(), 1);
    }

    #[test]
    fn test_disconnected_items_starts_empty() {
        let f = fixture();
        assert!(f.controller.disconnected_items().is_empty());
    }

    #[test]
    fn test_disconnect_translates_through_proxy() {
        let model = Arc::new(PropertyItemModel::new());
        let mut names = Vec::new();
        for basename in ["navigation_task", "planner_task"] {
            let item =
                Arc::new(StubItem::new(basename).with_kind(ItemKind::task_context(basename)));
            let row = model.append_row(item.clone(), None);
            model
                .append_child_row(&row, Arc::new(StubItem::new("state")), None)
                .unwrap();
            names.push(item);
        }

        let proxy = TaskFilterProxyModel::new(model.clone());
        let view = Arc::new(TreeView::new());
        let controller = TreeViewController::setup(view.clone());
        controller.set_model(TreeModelHandle::Filtered(proxy.clone()));

        // Expand both rows, then hide planner_task behind the filter.
        view.expand(&proxy.index(0, 0, &ModelIndex::invalid()));
        view.expand(&proxy.index(1, 0, &ModelIndex::invalid()));
        proxy.set_filter_pattern(Some("nav".into()));

        controller.disconnect();

        // Only the visible row was suspended; the hidden one is skipped.
        assert_eq!(controller.disconnected_items(), vec![0]);
        assert_eq!(names[0].collapsed_count(), 1);
        assert_eq!(names[1].collapsed_count(), 0);
    }

    #[test]
    fn test_context_menu_routed_to_item() {
        let f = fixture();
        let index = f.model.index(1, 0, &ModelIndex::invalid());

        f.view
            .request_context_menu(index, Point::new(12.0, 30.0));

        let calls = f.name_items[1].context_calls.lock();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], Point::new(12.0, 30.0));
    }

    #[test]
    fn test_context_menu_over_empty_space_is_noop() {
        let f = fixture();
        f.view
            .request_context_menu(ModelIndex::invalid(), Point::new(1.0, 1.0));
        for item in &f.name_items {
            assert!(item.context_calls.lock().is_empty());
        }
    }

    #[test]
    fn test_item_from_index_through_proxy() {
        let model = Arc::new(PropertyItemModel::new());
        model.append_row(
            Arc::new(
                StubItem::new("navigation_task")
                    .with_kind(ItemKind::task_context("navigation_task")),
            ),
            None,
        );
        model.append_row(
            Arc::new(StubItem::new("planner_task").with_kind(ItemKind::task_context("planner_task"))),
            None,
        );

        let proxy = TaskFilterProxyModel::new(model.clone());
        proxy.set_filter_pattern(Some("plan".into()));

        let view = Arc::new(TreeView::new());
        let controller = TreeViewController::setup(view.clone());
        controller.set_model(TreeModelHandle::Filtered(proxy.clone()));

        let view_index = proxy.index(0, 0, &ModelIndex::invalid());
        assert_eq!(view_index.space(), IndexSpace::View);
        let item = controller.item_from_index(&view_index).unwrap();
        assert_eq!(
            item.data(crate::model::ItemRole::Display).as_string(),
            Some("planner_task")
        );

        assert!(Arc::ptr_eq(&controller.real_model().unwrap(), &model));
    }
}
