//! Recording stubs shared by the test modules in this crate.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::{Mutex, RwLock};

use super::item::{ItemKind, ItemOptions, PropertyItem, StagedValue};
use super::role::{ItemData, ItemRole};
use crate::widget::{Point, TreeView};

/// A property item that records every hook invocation.
pub(crate) struct StubItem {
    name: String,
    edit_value: RwLock<ItemData>,
    options: ItemOptions,
    kind: ItemKind,
    modified: Arc<AtomicBool>,
    /// Flags stored `true` on a successful Edit-role write, in addition to
    /// the item's own modified flag. Lets tests model population code that
    /// marks an ancestor modified when a descendant is edited.
    marks_on_write: Vec<Arc<AtomicBool>>,
    pub collapsed_calls: Arc<AtomicUsize>,
    pub expanded_calls: Arc<AtomicUsize>,
    pub context_calls: Arc<Mutex<Vec<Point>>>,
    /// Shared log receiving `"<label>:<hook>"` entries, for ordering
    /// assertions across items.
    hook_log: Option<(Arc<Mutex<Vec<String>>>, String)>,
    payload: Option<String>,
}

impl StubItem {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            edit_value: RwLock::new(ItemData::None),
            options: ItemOptions::default(),
            kind: ItemKind::Plain,
            modified: Arc::new(AtomicBool::new(false)),
            marks_on_write: Vec::new(),
            collapsed_calls: Arc::new(AtomicUsize::new(0)),
            expanded_calls: Arc::new(AtomicUsize::new(0)),
            context_calls: Arc::new(Mutex::new(Vec::new())),
            hook_log: None,
            payload: None,
        }
    }

    pub fn with_edit(self, data: ItemData) -> Self {
        *self.edit_value.write() = data;
        self
    }

    pub fn with_options(mut self, options: ItemOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_kind(mut self, kind: ItemKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_payload(mut self, payload: &str) -> Self {
        self.payload = Some(payload.to_string());
        self
    }

    /// Marks `flag` on every successful Edit-role write to this item.
    pub fn marking_on_write(mut self, flag: Arc<AtomicBool>) -> Self {
        self.marks_on_write.push(flag);
        self
    }

    /// Records hook invocations as `"<label>:<hook>"` in a shared log.
    pub fn with_hook_log(mut self, log: Arc<Mutex<Vec<String>>>, label: &str) -> Self {
        self.hook_log = Some((log, label.to_string()));
        self
    }

    fn log_hook(&self, hook: &str) {
        if let Some((log, label)) = &self.hook_log {
            log.lock().push(format!("{label}:{hook}"));
        }
    }

    /// The item's own modified flag, shareable with other stubs.
    pub fn modified_flag(&self) -> Arc<AtomicBool> {
        self.modified.clone()
    }

    pub fn collapsed_count(&self) -> usize {
        self.collapsed_calls.load(Ordering::SeqCst)
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded_calls.load(Ordering::SeqCst)
    }
}

impl PropertyItem for StubItem {
    fn data(&self, role: ItemRole) -> ItemData {
        match role {
            ItemRole::Display => ItemData::from(self.name.as_str()),
            ItemRole::Edit => self.edit_value.read().clone(),
            _ => ItemData::None,
        }
    }

    fn set_data(&self, value: ItemData, role: ItemRole) -> bool {
        if role != ItemRole::Edit {
            return false;
        }
        *self.edit_value.write() = value;
        self.modified.store(true, Ordering::SeqCst);
        for flag in &self.marks_on_write {
            flag.store(true, Ordering::SeqCst);
        }
        true
    }

    fn options(&self) -> ItemOptions {
        self.options
    }

    fn is_modified(&self) -> bool {
        self.modified.load(Ordering::SeqCst)
    }

    fn set_modified(&self, modified: bool) {
        self.modified.store(modified, Ordering::SeqCst);
    }

    fn kind(&self) -> ItemKind {
        self.kind.clone()
    }

    fn collapsed(&self) {
        self.collapsed_calls.fetch_add(1, Ordering::SeqCst);
        self.log_hook("collapsed");
    }

    fn expanded(&self) {
        self.expanded_calls.fetch_add(1, Ordering::SeqCst);
        self.log_hook("expanded");
    }

    fn context_menu(&self, pos: Point, _view: &TreeView) {
        self.context_calls.lock().push(pos);
    }

    fn mime_data(&self) -> Option<String> {
        self.payload.clone()
    }
}

/// A staged value that counts `write` calls and tracks its modified flag.
pub(crate) struct StubStaged {
    writes: AtomicUsize,
    modified: AtomicBool,
}

impl StubStaged {
    /// A freshly staged edit starts out modified.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            writes: AtomicUsize::new(0),
            modified: AtomicBool::new(true),
        })
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn is_modified(&self) -> bool {
        self.modified.load(Ordering::SeqCst)
    }
}

impl StagedValue for StubStaged {
    fn set_modified(&self, modified: bool) {
        self.modified.store(modified, Ordering::SeqCst);
    }

    fn write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}
