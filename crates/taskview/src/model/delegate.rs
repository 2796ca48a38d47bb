//! Item delegate: per-cell editor dispatch and the edit-commit protocol.
//!
//! The delegate inspects a cell's edit-role data, hands out the matching
//! editor, and routes committed values back into the model. After every
//! commit it runs the pending-acknowledge surfacing walk: the first
//! ancestor configured with the accept option that became modified gets
//! its value cell selected with a persistent confirm editor opened on it.

use std::sync::{Arc, Weak};

use tracing::debug;

use super::index::ModelIndex;
use super::item::StagedValue;
use super::role::{ItemData, ItemRole};
use crate::widget::acknowledge_editor::AcknowledgeEditor;
use crate::widget::controller::TreeViewController;
use crate::widget::default_editors::{DoubleSpinEditor, LineEditor, SpinEditor};
use crate::widget::enum_editor::EnumEditor;

/// Decimal digits a numeric spin editor is widened to for property cells.
const SPIN_EDITOR_DECIMALS: u32 = 10;

/// Capability of an editor to report its edited value.
///
/// Custom editors implement this explicitly; the delegate writes the
/// extracted value into the model at commit time. The default editors
/// never go through this path — they are handled by a fixed per-kind
/// case in [`PropertyItemDelegate::set_model_data`].
pub trait ValueExtractable {
    /// The value currently held by the editor.
    fn extract(&self) -> ItemData;
}

/// Which editor a cell's edit-role data calls for.
///
/// The explicit tag replaces runtime type probing: the delegate switches
/// on this variant, nothing else.
pub enum EditorKind {
    /// A closed, ordered set of string choices.
    Enum(Vec<String>),
    /// A staged edit that must be confirmed or rejected.
    Confirmable(Arc<dyn StagedValue>),
    /// Plain scalar data, edited through a toolkit-default editor.
    Default(ItemData),
}

impl EditorKind {
    /// Classifies edit-role data.
    ///
    /// Returns `None` for `ItemData::None` — a cell without edit data has
    /// no editor.
    pub fn classify(data: &ItemData) -> Option<EditorKind> {
        match data {
            ItemData::None => None,
            ItemData::StringList(options) => Some(EditorKind::Enum(options.clone())),
            ItemData::Staged(staged) => Some(EditorKind::Confirmable(staged.clone())),
            other => Some(EditorKind::Default(other.clone())),
        }
    }
}

/// An editor handed out by the delegate for one edit session.
///
/// Cheap to clone; clones share the same editor instance.
#[derive(Clone)]
pub enum Editor {
    /// Selection over a fixed set of choices.
    Enum(Arc<EnumEditor>),
    /// Apply/Reject confirmation for a staged edit.
    Acknowledge(Arc<AcknowledgeEditor>),
    /// Integer spin editor.
    Spin(Arc<SpinEditor>),
    /// Floating-point spin editor.
    DoubleSpin(Arc<DoubleSpinEditor>),
    /// Single-line text editor.
    Line(Arc<LineEditor>),
}

impl Editor {
    /// The editor's value-extraction capability, if it has one.
    pub fn as_value_extractable(&self) -> Option<&dyn ValueExtractable> {
        match self {
            Editor::Enum(editor) => Some(editor.as_ref()),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Editor::Enum(_) => "Enum",
            Editor::Acknowledge(_) => "Acknowledge",
            Editor::Spin(_) => "Spin",
            Editor::DoubleSpin(_) => "DoubleSpin",
            Editor::Line(_) => "Line",
        };
        write!(f, "Editor::{name}")
    }
}

/// Editor factory and data-commit router for property cells.
///
/// One delegate is installed per view by the controller's setup. Editor
/// selection switches on [`EditorKind`]; commits run through
/// [`commit_data`](Self::commit_data), which writes the editor's value and
/// then surfaces any pending acknowledgement up the ancestor chain.
pub struct PropertyItemDelegate {
    controller: Weak<TreeViewController>,
}

impl PropertyItemDelegate {
    /// Creates a delegate owned by the given controller.
    pub(crate) fn new(controller: Weak<TreeViewController>) -> Self {
        Self { controller }
    }

    /// Creates an editor for the cell at `index`.
    ///
    /// The cell's edit-role data decides: a string list yields an
    /// [`EnumEditor`] seeded with those options in order, a staged edit
    /// yields an [`AcknowledgeEditor`] bound to it and this delegate,
    /// and plain scalars yield a toolkit-default editor — numeric spin
    /// editors widened to 10 decimal digits. Cells without edit data
    /// yield `None`.
    pub fn create_editor(&self, index: &ModelIndex) -> Option<Editor> {
        let controller = self.controller.upgrade()?;
        let handle = controller.model()?;
        let data = handle.data(index, ItemRole::Edit);

        let editor = match EditorKind::classify(&data)? {
            EditorKind::Enum(options) => Editor::Enum(Arc::new(EnumEditor::new(options))),
            EditorKind::Confirmable(staged) => Editor::Acknowledge(AcknowledgeEditor::create(
                staged,
                self.controller.clone(),
                index.clone(),
            )),
            EditorKind::Default(data) => default_editor(&data),
        };
        debug!(
            target: "taskview::delegate",
            row = index.row(),
            column = index.column(),
            editor = ?editor,
            "created editor"
        );
        Some(editor)
    }

    /// Writes the editor's value into the model at the cell's edit role.
    ///
    /// [`ValueExtractable`] editors write their extracted value; the
    /// default editors are a fixed per-kind case. Confirm editors carry
    /// no cell value of their own (their staged edit writes directly to
    /// the backing object). Returns whether a write happened.
    pub fn set_model_data(&self, editor: &Editor, index: &ModelIndex) -> bool {
        let Some(controller) = self.controller.upgrade() else {
            return false;
        };
        let Some(handle) = controller.model() else {
            return false;
        };

        if let Some(extractable) = editor.as_value_extractable() {
            return handle.set_data(index, extractable.extract(), ItemRole::Edit);
        }

        match editor {
            Editor::Spin(e) => handle.set_data(index, ItemData::Int(e.value()), ItemRole::Edit),
            Editor::DoubleSpin(e) => {
                handle.set_data(index, ItemData::Float(e.value()), ItemRole::Edit)
            }
            Editor::Line(e) => handle.set_data(index, ItemData::String(e.text()), ItemRole::Edit),
            Editor::Acknowledge(_) | Editor::Enum(_) => false,
        }
    }

    /// The standard commit-data routine: write the editor's value, then
    /// surface any pending acknowledgement above the edited cell.
    ///
    /// Returns whether a model write happened.
    pub fn commit_data(&self, editor: &Editor, index: &ModelIndex) -> bool {
        let wrote = self.set_model_data(editor, index);
        self.surface_pending_acknowledge(index);
        wrote
    }

    /// Walks the edited cell's ancestor chain and surfaces the first
    /// pending confirmation.
    ///
    /// The first ancestor whose item carries the accept option and is
    /// currently modified gets its value (column 1) cell made current
    /// with a persistent editor opened on it — the confirm editor appears
    /// inline. A missing value cell silently terminates the walk; so does
    /// running out of ancestors.
    pub fn surface_pending_acknowledge(&self, index: &ModelIndex) {
        let Some(controller) = self.controller.upgrade() else {
            return;
        };
        let Some(handle) = controller.model() else {
            return;
        };
        let view = controller.view();

        let mut ancestor = handle.parent(index);
        while ancestor.is_valid() {
            if let Some(item) = handle.item_from_index(&ancestor)
                && item.options().accept
                && item.is_modified()
            {
                let value_cell = handle.index(ancestor.row(), 1, &handle.parent(&ancestor));
                if !value_cell.is_valid() {
                    break;
                }
                debug!(
                    target: "taskview::delegate",
                    row = value_cell.row(),
                    "surfacing pending acknowledgement"
                );
                view.set_current_index(value_cell.clone());
                if let Some(editor) = self.create_editor(&value_cell) {
                    view.open_persistent_editor(value_cell, editor);
                }
                break;
            }
            ancestor = handle.parent(&ancestor);
        }
    }
}

/// Builds the toolkit-default editor for plain scalar data.
fn default_editor(data: &ItemData) -> Editor {
    match data {
        ItemData::Int(value) => Editor::Spin(Arc::new(SpinEditor::new(*value))),
        ItemData::Float(value) => {
            let editor = DoubleSpinEditor::new(*value);
            editor.set_decimals(SPIN_EDITOR_DECIMALS);
            Editor::DoubleSpin(Arc::new(editor))
        }
        other => Editor::Line(Arc::new(LineEditor::new(
            other.display_text().unwrap_or_default(),
        ))),
    }
}
