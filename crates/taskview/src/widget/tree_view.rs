//! Tree view state for hierarchical property models.
//!
//! `TreeView` models the view half of the synchronization protocol: which
//! rows are expanded, which cell is current, which cells hold a persistent
//! editor, and the configuration the controller installs at setup time.
//! The hosting toolkit owns layout and painting and drives this state in
//! response to user gestures; every state change is announced through a
//! signal so the controller can route it to the backing items.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;
use taskview_core::Signal;

use super::Point;
use crate::model::{Editor, ModelIndex, PropertyItemDelegate, TreeModelHandle};

/// Sort direction for a view column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Smallest values first.
    #[default]
    Ascending,
    /// Largest values first.
    Descending,
}

/// How the view reacts to a context-menu gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContextMenuPolicy {
    /// The hosting toolkit shows its own menu; nothing is routed here.
    #[default]
    Standard,
    /// The gesture is routed through `context_menu_requested`.
    Custom,
    /// Context menus are suppressed entirely.
    Disabled,
}

/// View configuration installed at setup time.
struct ViewConfig {
    sorting_enabled: bool,
    sort_column: usize,
    sort_order: SortOrder,
    alternating_row_colors: bool,
    context_menu_policy: ContextMenuPolicy,
    drag_enabled: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            sorting_enabled: false,
            sort_column: 0,
            sort_order: SortOrder::Ascending,
            alternating_row_colors: false,
            context_menu_policy: ContextMenuPolicy::Standard,
            drag_enabled: false,
        }
    }
}

/// View state for a property tree.
///
/// All mutation goes through `&self`: the view is shared between the
/// hosting toolkit, the controller and open editors.
///
/// # Signals
///
/// - `expanded(ModelIndex)`: a row was expanded
/// - `collapsed(ModelIndex)`: a row was collapsed
/// - `current_changed(ModelIndex)`: the current cell moved
/// - `context_menu_requested((ModelIndex, Point))`: a context-menu gesture
///   arrived while the custom policy is active
pub struct TreeView {
    model: RwLock<Option<TreeModelHandle>>,
    item_delegate: RwLock<Option<Arc<PropertyItemDelegate>>>,
    /// Expanded rows, tracked by index internal ID (stable across the
    /// source/view spaces).
    expanded_ids: RwLock<HashSet<u64>>,
    current: RwLock<ModelIndex>,
    persistent_editors: RwLock<HashMap<ModelIndex, Editor>>,
    config: RwLock<ViewConfig>,

    /// Emitted when a row is expanded.
    pub expanded: Signal<ModelIndex>,
    /// Emitted when a row is collapsed.
    pub collapsed: Signal<ModelIndex>,
    /// Emitted when the current cell changes.
    pub current_changed: Signal<ModelIndex>,
    /// Emitted when a context menu is requested under the custom policy.
    ///
    /// Carries the index under the cursor (invalid over empty space) and
    /// the position in widget coordinates.
    pub context_menu_requested: Signal<(ModelIndex, Point)>,
}

impl Default for TreeView {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeView {
    /// Creates a new view with no model.
    pub fn new() -> Self {
        Self {
            model: RwLock::new(None),
            item_delegate: RwLock::new(None),
            expanded_ids: RwLock::new(HashSet::new()),
            current: RwLock::new(ModelIndex::invalid()),
            persistent_editors: RwLock::new(HashMap::new()),
            config: RwLock::new(ViewConfig::default()),
            expanded: Signal::new(),
            collapsed: Signal::new(),
            current_changed: Signal::new(),
            context_menu_requested: Signal::new(),
        }
    }

    // =========================================================================
    // Model
    // =========================================================================

    /// Returns the installed model handle.
    pub fn model(&self) -> Option<TreeModelHandle> {
        self.model.read().clone()
    }

    /// Installs a model handle, resetting all view state.
    pub fn set_model(&self, model: Option<TreeModelHandle>) {
        *self.model.write() = model;
        self.expanded_ids.write().clear();
        self.persistent_editors.write().clear();
        *self.current.write() = ModelIndex::invalid();
    }

    /// Returns the installed item delegate.
    pub fn item_delegate(&self) -> Option<Arc<PropertyItemDelegate>> {
        self.item_delegate.read().clone()
    }

    /// Installs the item delegate.
    pub fn set_item_delegate(&self, delegate: Arc<PropertyItemDelegate>) {
        *self.item_delegate.write() = Some(delegate);
    }

    // =========================================================================
    // Expand/Collapse
    // =========================================================================

    /// Returns whether the row at the given index is expanded.
    pub fn is_expanded(&self, index: &ModelIndex) -> bool {
        index.is_valid() && self.expanded_ids.read().contains(&index.internal_id())
    }

    /// Expands the row at the given index.
    ///
    /// No-op for invalid indices, rows without children, and rows that
    /// are already expanded. Emits `expanded` exactly once per state
    /// change.
    pub fn expand(&self, index: &ModelIndex) {
        if !index.is_valid() {
            return;
        }
        let has_children = match &*self.model.read() {
            Some(handle) => handle.has_children(index),
            None => return,
        };
        if !has_children {
            return;
        }

        let inserted = self.expanded_ids.write().insert(index.internal_id());
        if inserted {
            self.expanded.emit(index.clone());
        }
    }

    /// Collapses the row at the given index.
    ///
    /// No-op for rows that are not expanded. Emits `collapsed` exactly
    /// once per state change.
    pub fn collapse(&self, index: &ModelIndex) {
        if !index.is_valid() {
            return;
        }
        let removed = self.expanded_ids.write().remove(&index.internal_id());
        if removed {
            self.collapsed.emit(index.clone());
        }
    }

    /// Toggles the expanded state of the row at the given index.
    pub fn toggle_expanded(&self, index: &ModelIndex) {
        if self.is_expanded(index) {
            self.collapse(index);
        } else {
            self.expand(index);
        }
    }

    // =========================================================================
    // Current cell
    // =========================================================================

    /// Returns the current (focused) cell.
    pub fn current_index(&self) -> ModelIndex {
        self.current.read().clone()
    }

    /// Moves the current cell and announces the change.
    pub fn set_current_index(&self, index: ModelIndex) {
        let changed = {
            let mut current = self.current.write();
            if *current == index {
                false
            } else {
                *current = index.clone();
                true
            }
        };
        if changed {
            self.current_changed.emit(index);
        }
    }

    // =========================================================================
    // Persistent editors
    // =========================================================================

    /// Keeps `editor` open on the given cell until explicitly closed.
    pub fn open_persistent_editor(&self, index: ModelIndex, editor: Editor) {
        if !index.is_valid() {
            return;
        }
        self.persistent_editors.write().insert(index, editor);
    }

    /// Closes the persistent editor on the given cell, returning it.
    ///
    /// The returned editor is dropped by the caller; nothing else keeps
    /// it alive.
    pub fn close_persistent_editor(&self, index: &ModelIndex) -> Option<Editor> {
        self.persistent_editors.write().remove(index)
    }

    /// Returns whether the given cell has a persistent editor open.
    pub fn has_persistent_editor(&self, index: &ModelIndex) -> bool {
        self.persistent_editors.read().contains_key(index)
    }

    /// Returns the persistent editor open on the given cell, if any.
    pub fn persistent_editor(&self, index: &ModelIndex) -> Option<Editor> {
        self.persistent_editors.read().get(index).cloned()
    }

    // =========================================================================
    // Context menu
    // =========================================================================

    /// Forwards a context-menu gesture from the hosting toolkit.
    ///
    /// The toolkit resolves the pointer position to an index (invalid over
    /// empty space) before calling this. Only the custom policy routes the
    /// gesture on.
    pub fn request_context_menu(&self, index: ModelIndex, pos: Point) {
        if self.config.read().context_menu_policy != ContextMenuPolicy::Custom {
            return;
        }
        self.context_menu_requested.emit((index, pos));
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Returns whether sorting is enabled.
    pub fn is_sorting_enabled(&self) -> bool {
        self.config.read().sorting_enabled
    }

    /// Enables or disables sorting.
    pub fn set_sorting_enabled(&self, enabled: bool) {
        self.config.write().sorting_enabled = enabled;
    }

    /// Returns the sort column and order.
    pub fn sort_indicator(&self) -> (usize, SortOrder) {
        let config = self.config.read();
        (config.sort_column, config.sort_order)
    }

    /// Sets the sort column and order.
    pub fn sort_by_column(&self, column: usize, order: SortOrder) {
        let mut config = self.config.write();
        config.sort_column = column;
        config.sort_order = order;
    }

    /// Returns whether alternating row coloring is on.
    pub fn alternating_row_colors(&self) -> bool {
        self.config.read().alternating_row_colors
    }

    /// Enables or disables alternating row coloring.
    pub fn set_alternating_row_colors(&self, enabled: bool) {
        self.config.write().alternating_row_colors = enabled;
    }

    /// Returns the context-menu policy.
    pub fn context_menu_policy(&self) -> ContextMenuPolicy {
        self.config.read().context_menu_policy
    }

    /// Sets the context-menu policy.
    pub fn set_context_menu_policy(&self, policy: ContextMenuPolicy) {
        self.config.write().context_menu_policy = policy;
    }

    /// Returns whether this view acts as a drag source.
    pub fn is_drag_enabled(&self) -> bool {
        self.config.read().drag_enabled
    }

    /// Enables or disables drag-source behavior.
    pub fn set_drag_enabled(&self, enabled: bool) {
        self.config.write().drag_enabled = enabled;
    }
}
