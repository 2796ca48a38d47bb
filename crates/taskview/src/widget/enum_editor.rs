//! Selection editor for enumerated values.

use parking_lot::Mutex;
use taskview_core::Signal;

use crate::model::{ItemData, ValueExtractable};

/// A selection editor over a fixed, caller-supplied set of values.
///
/// The choices are rendered in caller order as their string form; editing
/// means picking one of them. Created by the delegate for cells whose
/// edit-role data is a closed set of string options.
///
/// # Example
///
/// ```
/// use taskview::widget::EnumEditor;
///
/// let editor = EnumEditor::new(["low", "medium", "high"]);
/// assert_eq!(editor.current_text(), Some("low".into()));
///
/// editor.set_current_text("high");
/// assert_eq!(editor.current_index(), Some(2));
/// ```
pub struct EnumEditor {
    items: Vec<String>,
    current: Mutex<Option<usize>>,

    /// Emitted when the user picks an entry.
    pub activated: Signal<String>,
    /// Emitted when the current index changes.
    pub current_index_changed: Signal<usize>,
}

impl EnumEditor {
    /// Creates an editor offering the given values, in order.
    ///
    /// The first entry is preselected when the set is non-empty.
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = values.into_iter().map(Into::into).collect();
        let current = if items.is_empty() { None } else { Some(0) };
        Self {
            items,
            current: Mutex::new(current),
            activated: Signal::new(),
            current_index_changed: Signal::new(),
        }
    }

    /// Returns the number of choices.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns the choices in order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Returns the text at the given index.
    pub fn item_text(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(|s| s.as_str())
    }

    /// Returns the currently selected index.
    pub fn current_index(&self) -> Option<usize> {
        *self.current.lock()
    }

    /// Returns the currently selected entry's text.
    pub fn current_text(&self) -> Option<String> {
        self.current_index()
            .and_then(|i| self.items.get(i).cloned())
    }

    /// Selects the entry at `index`.
    ///
    /// Out-of-range indices are ignored.
    pub fn set_current_index(&self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        let changed = {
            let mut current = self.current.lock();
            if *current == Some(index) {
                false
            } else {
                *current = Some(index);
                true
            }
        };
        if changed {
            self.current_index_changed.emit(index);
        }
    }

    /// Selects the first entry matching `text`, if any.
    pub fn set_current_text(&self, text: &str) {
        if let Some(index) = self.find_text(text) {
            self.set_current_index(index);
        }
    }

    /// Finds the index of the first entry equal to `text`.
    pub fn find_text(&self, text: &str) -> Option<usize> {
        self.items.iter().position(|item| item == text)
    }

    /// Simulates the user committing the entry at `index`.
    pub fn activate(&self, index: usize) {
        self.set_current_index(index);
        if let Some(text) = self.current_text() {
            self.activated.emit(text);
        }
    }
}

impl ValueExtractable for EnumEditor {
    fn extract(&self) -> ItemData {
        match self.current_text() {
            Some(text) => ItemData::String(text),
            None => ItemData::None,
        }
    }
}
