//! Two-column hierarchical model over property items.
//!
//! `PropertyItemModel` stores rows of [`PropertyItem`]s in a tree. Every
//! row has a Name cell (column 0) and an optional Value cell (column 1);
//! both cells of a row share one node identity, which the indices carry in
//! their internal ID. The model also serializes a row's item into a drag
//! payload for drag-source views.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use super::error::{ModelError, Result};
use super::index::{IndexSpace, ModelIndex};
use super::item::PropertyItem;
use super::role::{ItemData, ItemRole};
use super::traits::{ItemModel, ModelSignals};
use crate::widget::drag_drop::{DragPayload, mime};

/// A node ID for internal tracking.
type NodeId = u64;

/// Counter for generating unique node IDs.
static NODE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

fn next_node_id() -> NodeId {
    NODE_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// A row in the tree: its two cells plus tree links.
struct RowNode {
    id: NodeId,
    /// Column 0 holds the Name item, column 1 the Value item (if any).
    cells: [Option<Arc<dyn PropertyItem>>; 2],
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl RowNode {
    fn new(
        name: Arc<dyn PropertyItem>,
        value: Option<Arc<dyn PropertyItem>>,
        parent: Option<NodeId>,
    ) -> Self {
        Self {
            id: next_node_id(),
            cells: [Some(name), value],
            children: Vec::new(),
            parent,
        }
    }
}

/// Internal storage for tree rows.
struct TreeStorage {
    nodes: HashMap<NodeId, RowNode>,
    root_rows: Vec<NodeId>,
}

impl TreeStorage {
    fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            root_rows: Vec::new(),
        }
    }

    fn get(&self, id: NodeId) -> Option<&RowNode> {
        self.nodes.get(&id)
    }

    fn children_of(&self, parent: Option<NodeId>) -> &[NodeId] {
        match parent {
            None => &self.root_rows,
            Some(id) => self
                .nodes
                .get(&id)
                .map(|n| n.children.as_slice())
                .unwrap_or(&[]),
        }
    }

    fn child_at(&self, parent: Option<NodeId>, row: usize) -> Option<NodeId> {
        self.children_of(parent).get(row).copied()
    }

    fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    fn row_of(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent_of(id);
        self.children_of(parent).iter().position(|&c| c == id)
    }

    fn remove_subtree(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(&id) {
            for child in node.children {
                self.remove_subtree(child);
            }
        }
    }
}

/// A two-column (Name, Value) tree model of property items.
///
/// Rows are appended by external population code; this model owns the
/// tree structure and change notification, while cell behavior lives in
/// the items themselves.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use taskview::model::{ItemData, ItemModel, ItemRole, ModelIndex, PropertyItem, PropertyItemModel};
///
/// struct Label(String);
///
/// impl PropertyItem for Label {
///     fn data(&self, role: ItemRole) -> ItemData {
///         match role {
///             ItemRole::Display => ItemData::from(self.0.as_str()),
///             _ => ItemData::None,
///         }
///     }
/// }
///
/// let model = PropertyItemModel::new();
/// model.append_row(Arc::new(Label("pose".into())), None);
///
/// let index = model.index(0, 0, &ModelIndex::invalid());
/// assert_eq!(model.data(&index, ItemRole::Display).as_string(), Some("pose"));
/// ```
pub struct PropertyItemModel {
    storage: RwLock<TreeStorage>,
    signals: ModelSignals,
}

impl Default for PropertyItemModel {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyItemModel {
    /// Creates a new empty model.
    pub fn new() -> Self {
        Self {
            storage: RwLock::new(TreeStorage::new()),
            signals: ModelSignals::new(),
        }
    }

    /// Appends a top-level row and returns its column-0 index.
    pub fn append_row(
        &self,
        name: Arc<dyn PropertyItem>,
        value: Option<Arc<dyn PropertyItem>>,
    ) -> ModelIndex {
        let (row, id) = {
            let mut storage = self.storage.write();
            let node = RowNode::new(name, value, None);
            let id = node.id;
            let row = storage.root_rows.len();
            storage.nodes.insert(id, node);
            storage.root_rows.push(id);
            (row, id)
        };
        self.signals
            .rows_inserted
            .emit((ModelIndex::invalid(), row, row));
        ModelIndex::with_internal_id(IndexSpace::Source, row, 0, ModelIndex::invalid(), id)
    }

    /// Appends a child row under `parent` and returns its column-0 index.
    ///
    /// `parent` must be a valid source-space index of this model; either
    /// column of the parent row is accepted.
    pub fn append_child_row(
        &self,
        parent: &ModelIndex,
        name: Arc<dyn PropertyItem>,
        value: Option<Arc<dyn PropertyItem>>,
    ) -> Result<ModelIndex> {
        if !parent.is_valid() {
            return Err(ModelError::InvalidIndex);
        }
        if parent.space() != IndexSpace::Source {
            return Err(ModelError::SpaceMismatch {
                expected: IndexSpace::Source,
                found: parent.space(),
            });
        }

        let parent_id = parent.internal_id();
        let (row, id) = {
            let mut storage = self.storage.write();
            if !storage.nodes.contains_key(&parent_id) {
                return Err(ModelError::NoSuchRow { row: parent.row() });
            }
            let node = RowNode::new(name, value, Some(parent_id));
            let id = node.id;
            storage.nodes.insert(id, node);
            let parent_node = storage
                .nodes
                .get_mut(&parent_id)
                .expect("parent checked above");
            let row = parent_node.children.len();
            parent_node.children.push(id);
            (row, id)
        };

        let parent_index = parent.sibling_at_column(0);
        self.signals
            .rows_inserted
            .emit((parent_index.clone(), row, row));
        Ok(ModelIndex::with_internal_id(
            IndexSpace::Source,
            row,
            0,
            parent_index,
            id,
        ))
    }

    /// Removes the row at `index` together with its descendants.
    pub fn remove_row(&self, index: &ModelIndex) -> Result<()> {
        if !index.is_valid() {
            return Err(ModelError::InvalidIndex);
        }
        if index.space() != IndexSpace::Source {
            return Err(ModelError::SpaceMismatch {
                expected: IndexSpace::Source,
                found: index.space(),
            });
        }

        let id = index.internal_id();
        let row = self
            .storage
            .read()
            .row_of(id)
            .ok_or(ModelError::NoSuchRow { row: index.row() })?;
        let parent_index = index.parent();

        self.signals
            .rows_about_to_be_removed
            .emit((parent_index.clone(), row, row));
        {
            let mut storage = self.storage.write();
            match storage.parent_of(id) {
                Some(parent_id) => {
                    if let Some(parent) = storage.nodes.get_mut(&parent_id) {
                        parent.children.retain(|&c| c != id);
                    }
                }
                None => storage.root_rows.retain(|&c| c != id),
            }
            storage.remove_subtree(id);
        }
        self.signals.rows_removed.emit((parent_index, row, row));
        Ok(())
    }

    /// Removes all rows.
    pub fn clear(&self) {
        self.signals.emit_reset(|| {
            let mut storage = self.storage.write();
            storage.nodes.clear();
            storage.root_rows.clear();
        });
    }

    /// Resolves a source-space index to its item.
    ///
    /// Returns `None` for invalid or view-space indices, unknown rows and
    /// empty cells.
    pub fn item_from_index(&self, index: &ModelIndex) -> Option<Arc<dyn PropertyItem>> {
        if !index.is_valid() || index.space() != IndexSpace::Source || index.column() > 1 {
            return None;
        }
        let storage = self.storage.read();
        storage
            .get(index.internal_id())
            .and_then(|node| node.cells[index.column()].clone())
    }

    /// Serializes the first index's item into a drag payload.
    ///
    /// Yields no payload for an empty index sequence, an invalid first
    /// index, or an item without one.
    pub fn mime_data(&self, indexes: &[ModelIndex]) -> Option<DragPayload> {
        let first = indexes.first()?;
        if !first.is_valid() {
            return None;
        }
        let item = self.item_from_index(first)?;
        item.mime_data().map(DragPayload::from_text)
    }

    /// The payload types this model can produce.
    pub fn mime_types(&self) -> &'static [&'static str] {
        &[mime::TEXT_PLAIN]
    }

    /// Creates the canonical column-0 index for a node ID.
    fn create_index_for_id(&self, storage: &TreeStorage, id: NodeId) -> Option<ModelIndex> {
        let row = storage.row_of(id)?;
        let parent_index = match storage.parent_of(id) {
            Some(pid) => self.create_index_for_id(storage, pid)?,
            None => ModelIndex::invalid(),
        };
        Some(ModelIndex::with_internal_id(
            IndexSpace::Source,
            row,
            0,
            parent_index,
            id,
        ))
    }
}

impl ItemModel for PropertyItemModel {
    fn row_count(&self, parent: &ModelIndex) -> usize {
        let storage = self.storage.read();
        if parent.is_valid() {
            if parent.space() != IndexSpace::Source {
                return 0;
            }
            storage.children_of(Some(parent.internal_id())).len()
        } else {
            storage.root_rows.len()
        }
    }

    fn column_count(&self, _parent: &ModelIndex) -> usize {
        2
    }

    fn data(&self, index: &ModelIndex, role: ItemRole) -> ItemData {
        match self.item_from_index(index) {
            Some(item) => item.data(role),
            None => ItemData::None,
        }
    }

    fn index(&self, row: usize, column: usize, parent: &ModelIndex) -> ModelIndex {
        if column >= 2 {
            return ModelIndex::invalid();
        }
        if parent.is_valid() && parent.space() != IndexSpace::Source {
            return ModelIndex::invalid();
        }

        let storage = self.storage.read();
        let parent_id = parent.is_valid().then(|| parent.internal_id());
        let Some(id) = storage.child_at(parent_id, row) else {
            return ModelIndex::invalid();
        };

        let parent_index = if parent.is_valid() {
            parent.sibling_at_column(0)
        } else {
            ModelIndex::invalid()
        };
        ModelIndex::with_internal_id(IndexSpace::Source, row, column, parent_index, id)
    }

    fn parent(&self, index: &ModelIndex) -> ModelIndex {
        if !index.is_valid() || index.space() != IndexSpace::Source {
            return ModelIndex::invalid();
        }
        let storage = self.storage.read();
        match storage.parent_of(index.internal_id()) {
            Some(pid) => self
                .create_index_for_id(&storage, pid)
                .unwrap_or_else(ModelIndex::invalid),
            None => ModelIndex::invalid(),
        }
    }

    fn signals(&self) -> &ModelSignals {
        &self.signals
    }

    fn set_data(&self, index: &ModelIndex, value: ItemData, role: ItemRole) -> bool {
        let Some(item) = self.item_from_index(index) else {
            return false;
        };
        if !item.set_data(value, role) {
            return false;
        }
        self.signals
            .emit_data_changed_single(index.clone(), vec![role]);
        true
    }

    fn header_data(&self, section: usize) -> ItemData {
        match section {
            0 => ItemData::from("Name"),
            1 => ItemData::from("Value"),
            _ => ItemData::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::StubItem;
    use parking_lot::Mutex;

    fn stub(name: &str) -> Arc<dyn PropertyItem> {
        Arc::new(StubItem::new(name))
    }

    #[test]
    fn test_append_and_query() {
        let model = PropertyItemModel::new();
        model.append_row(stub("task"), Some(stub("running")));

        assert_eq!(model.row_count(&ModelIndex::invalid()), 1);
        assert_eq!(model.column_count(&ModelIndex::invalid()), 2);

        let name = model.index(0, 0, &ModelIndex::invalid());
        let value = model.index(0, 1, &ModelIndex::invalid());
        assert_eq!(model.data(&name, ItemRole::Display).as_string(), Some("task"));
        assert_eq!(
            model.data(&value, ItemRole::Display).as_string(),
            Some("running")
        );
        // Both columns of a row share one identity.
        assert_eq!(name.internal_id(), value.internal_id());
    }

    #[test]
    fn test_headers() {
        let model = PropertyItemModel::new();
        assert_eq!(model.header_data(0).as_string(), Some("Name"));
        assert_eq!(model.header_data(1).as_string(), Some("Value"));
        assert!(model.header_data(2).is_none());
    }

    #[test]
    fn test_hierarchy_and_parent() {
        let model = PropertyItemModel::new();
        let root = model.append_row(stub("root"), None);
        let child = model
            .append_child_row(&root, stub("child"), Some(stub("7")))
            .unwrap();
        model
            .append_child_row(&child, stub("grandchild"), None)
            .unwrap();

        assert_eq!(model.row_count(&root), 1);
        assert_eq!(model.row_count(&child), 1);

        let grandchild = model.index(0, 0, &child);
        assert!(grandchild.is_valid());
        assert_eq!(model.parent(&grandchild), child);
        assert_eq!(model.parent(&child), root);
        assert!(!model.parent(&root).is_valid());
    }

    #[test]
    fn test_append_child_rejects_bad_parents() {
        let model = PropertyItemModel::new();
        let root = model.append_row(stub("root"), None);

        assert_eq!(
            model.append_child_row(&ModelIndex::invalid(), stub("x"), None),
            Err(ModelError::InvalidIndex)
        );

        let view_parent = ModelIndex::with_internal_id(
            IndexSpace::View,
            root.row(),
            0,
            ModelIndex::invalid(),
            root.internal_id(),
        );
        assert_eq!(
            model.append_child_row(&view_parent, stub("x"), None),
            Err(ModelError::SpaceMismatch {
                expected: IndexSpace::Source,
                found: IndexSpace::View,
            })
        );
    }

    #[test]
    fn test_rows_inserted_signal() {
        let model = PropertyItemModel::new();
        let events = Arc::new(Mutex::new(Vec::new()));

        let recv = events.clone();
        model
            .signals()
            .rows_inserted
            .connect(move |(parent, first, last)| {
                recv.lock().push((parent.is_valid(), *first, *last));
            });

        let root = model.append_row(stub("a"), None);
        model.append_child_row(&root, stub("b"), None).unwrap();

        assert_eq!(*events.lock(), vec![(false, 0, 0), (true, 0, 0)]);
    }

    #[test]
    fn test_set_data_writes_through_and_notifies() {
        let model = PropertyItemModel::new();
        let value_item = Arc::new(StubItem::new("speed").with_edit(ItemData::from("1.0")));
        model.append_row(stub("speed"), Some(value_item.clone()));

        let changed = Arc::new(Mutex::new(Vec::new()));
        let recv = changed.clone();
        model
            .signals()
            .data_changed
            .connect(move |(index, _, roles)| {
                recv.lock().push((index.column(), roles.clone()));
            });

        let value = model.index(0, 1, &ModelIndex::invalid());
        assert!(model.set_data(&value, ItemData::from("2.0"), ItemRole::Edit));

        assert_eq!(
            model.data(&value, ItemRole::Edit).as_string(),
            Some("2.0")
        );
        assert!(value_item.is_modified());
        assert_eq!(*changed.lock(), vec![(1, vec![ItemRole::Edit])]);
    }

    #[test]
    fn test_set_data_fails_closed() {
        let model = PropertyItemModel::new();
        model.append_row(stub("a"), None);

        // Empty value cell.
        let value = model.index(0, 1, &ModelIndex::invalid());
        assert!(!model.set_data(&value, ItemData::from("x"), ItemRole::Edit));
        // Invalid index.
        assert!(!model.set_data(&ModelIndex::invalid(), ItemData::from("x"), ItemRole::Edit));
    }

    #[test]
    fn test_remove_row() {
        let model = PropertyItemModel::new();
        let root = model.append_row(stub("root"), None);
        model.append_child_row(&root, stub("child"), None).unwrap();

        let removed = Arc::new(Mutex::new(0));
        let recv = removed.clone();
        model.signals().rows_removed.connect(move |_| {
            *recv.lock() += 1;
        });

        let child = model.index(0, 0, &root);
        model.remove_row(&child).unwrap();
        assert_eq!(model.row_count(&root), 0);
        assert_eq!(*removed.lock(), 1);

        model.remove_row(&root).unwrap();
        assert_eq!(model.row_count(&ModelIndex::invalid()), 0);
    }

    #[test]
    fn test_mime_data() {
        let model = PropertyItemModel::new();
        model.append_row(
            Arc::new(StubItem::new("task").with_payload("task:navigation")),
            None,
        );
        model.append_row(stub("bare"), None);

        assert!(model.mime_data(&[]).is_none());
        assert!(model.mime_data(&[ModelIndex::invalid()]).is_none());

        let first = model.index(0, 0, &ModelIndex::invalid());
        let payload = model.mime_data(&[first]).unwrap();
        assert_eq!(payload.text(), Some("task:navigation".into()));

        // Item without a payload yields none.
        let second = model.index(1, 0, &ModelIndex::invalid());
        assert!(model.mime_data(&[second]).is_none());

        assert_eq!(model.mime_types(), &["text/plain"]);
    }

    #[test]
    fn test_item_from_index_spaces() {
        let model = PropertyItemModel::new();
        let root = model.append_row(stub("root"), None);

        assert!(model.item_from_index(&root).is_some());

        let view_index = ModelIndex::with_internal_id(
            IndexSpace::View,
            0,
            0,
            ModelIndex::invalid(),
            root.internal_id(),
        );
        assert!(model.item_from_index(&view_index).is_none());
    }
}
