//! Capability traits for the items backing a property tree.
//!
//! Items are created and owned by external population code (task
//! introspection producers); this layer only drives their hooks and reads
//! or writes their column values. The traits here are the narrow seam
//! between that code and the model/view machinery.

use super::role::{ItemData, ItemRole};
use crate::widget::{Point, TreeView};

/// A staged value change awaiting explicit accept or reject.
///
/// Produced by an item's Edit-role data when its changes require
/// confirmation; owned exclusively by the acknowledge editor built from it
/// and dropped with that editor.
pub trait StagedValue: Send + Sync {
    /// Marks the staged edit as modified or not.
    ///
    /// The reject path calls this with `false` to discard the edit.
    fn set_modified(&self, modified: bool);

    /// Commits the staged value to the live backing object.
    fn write(&self);
}

/// Per-item configuration recognized by this layer.
///
/// Unrecognized options stay with the item; only `accept` changes behavior
/// here: it enables the confirm/reject workflow for the item's
/// descendants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemOptions {
    /// Edits below this item must be explicitly acknowledged before they
    /// count as committed.
    pub accept: bool,
}

impl ItemOptions {
    /// Creates default options (no acknowledgement required).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the accept flag.
    pub fn with_accept(mut self, accept: bool) -> Self {
        self.accept = accept;
        self
    }
}

/// What kind of entity an item represents.
///
/// The filter proxy recognizes task-context rows by this tag; everything
/// else passes through unfiltered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    /// An ordinary property row.
    Plain,
    /// A task-context row; `basename` is the task's unqualified name.
    TaskContext {
        /// The task name without its namespace prefix.
        basename: String,
    },
}

impl ItemKind {
    /// Creates a task-context kind from a basename.
    pub fn task_context(basename: impl Into<String>) -> Self {
        ItemKind::TaskContext {
            basename: basename.into(),
        }
    }
}

/// A node in the hierarchical property tree.
///
/// Implementations hold the actual name/value data and the behavior that
/// fires when the surrounding view changes. All methods take `&self`:
/// items are shared between the model, the proxy and open editors, so
/// mutability is interior.
pub trait PropertyItem: Send + Sync {
    /// Returns the data stored under the given role.
    fn data(&self, role: ItemRole) -> ItemData;

    /// Sets the data for the given role.
    ///
    /// Returns `true` if the value was accepted. A successful Edit-role
    /// write is expected to mark the item modified. The default is
    /// read-only.
    fn set_data(&self, _value: ItemData, _role: ItemRole) -> bool {
        false
    }

    /// Returns the item's configuration options.
    fn options(&self) -> ItemOptions {
        ItemOptions::default()
    }

    /// Returns `true` if the item holds an uncommitted change.
    fn is_modified(&self) -> bool {
        false
    }

    /// Sets or clears the modified flag.
    fn set_modified(&self, _modified: bool) {}

    /// Returns what kind of entity this item represents.
    fn kind(&self) -> ItemKind {
        ItemKind::Plain
    }

    /// Called when the item's row is collapsed in a view.
    ///
    /// Items typically stop background update listeners here.
    fn collapsed(&self) {}

    /// Called when the item's row is expanded in a view.
    ///
    /// Items typically (re)start background update listeners here.
    fn expanded(&self) {}

    /// Called when a context menu is requested on the item's row.
    fn context_menu(&self, _pos: Point, _view: &TreeView) {}

    /// Returns the item's serialized drag payload, if it has one.
    fn mime_data(&self) -> Option<String> {
        None
    }
}
