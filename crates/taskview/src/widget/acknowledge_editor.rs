//! Confirm/reject editor for staged property edits.

use std::sync::{Arc, Weak};

use taskview_core::Signal;

use super::controller::TreeViewController;
use crate::model::{Editor, ModelIndex, StagedValue};

/// The role a button plays in an [`AcknowledgeEditor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcknowledgeButtonRole {
    /// Commits the staged edit.
    Accept,
    /// Discards the staged edit.
    Reject,
}

/// Two-button confirm/cancel editor bound to a staged edit.
///
/// Opened (usually persistently) on the value column of an item whose
/// edits require explicit acknowledgement. The editor owns the staged
/// value for the duration of the edit session; both the accept and reject
/// path close the session, so no editor outlives its edit.
///
/// - **Accept** commits the staged value with a single `write()`, routes
///   the result through the delegate's standard commit path (which also
///   continues the pending-acknowledge surfacing up the ancestor chain),
///   closes the editor and refreshes the view's model.
/// - **Reject** clears the staged value's modified flag without writing
///   anything, closes the editor and refreshes the view's model.
pub struct AcknowledgeEditor {
    staged: Arc<dyn StagedValue>,
    controller: Weak<TreeViewController>,
    /// The cell this editor is open on.
    index: ModelIndex,
    /// Back-reference for handing ourselves to the delegate's commit path.
    this: Weak<AcknowledgeEditor>,
    buttons: Vec<(String, AcknowledgeButtonRole)>,
    center_buttons: bool,

    /// Emitted after the accept path completed.
    pub accepted: Signal<()>,
    /// Emitted after the reject path completed.
    pub rejected: Signal<()>,
}

impl AcknowledgeEditor {
    /// Creates an editor bound to `staged`, owned by `controller`'s
    /// delegate, sitting on `index`.
    pub fn create(
        staged: Arc<dyn StagedValue>,
        controller: Weak<TreeViewController>,
        index: ModelIndex,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            staged,
            controller,
            index,
            this: this.clone(),
            buttons: vec![
                ("Apply".to_string(), AcknowledgeButtonRole::Accept),
                ("Reject".to_string(), AcknowledgeButtonRole::Reject),
            ],
            center_buttons: true,
            accepted: Signal::new(),
            rejected: Signal::new(),
        })
    }

    /// The buttons this editor shows, in order.
    pub fn buttons(&self) -> &[(String, AcknowledgeButtonRole)] {
        &self.buttons
    }

    /// Whether the buttons are centered.
    pub fn center_buttons(&self) -> bool {
        self.center_buttons
    }

    /// The cell this editor is open on.
    pub fn index(&self) -> &ModelIndex {
        &self.index
    }

    /// Runs the accept path: commit, refresh, close.
    pub fn accept(&self) {
        self.staged.write();
        if let (Some(controller), Some(this)) = (self.controller.upgrade(), self.this.upgrade()) {
            controller
                .delegate()
                .commit_data(&Editor::Acknowledge(this), &self.index);
            controller.close_editor(&self.index);
            controller.notify_layout_changed();
        }
        self.accepted.emit(());
    }

    /// Runs the reject path: discard, refresh, close.
    pub fn reject(&self) {
        self.staged.set_modified(false);
        if let Some(controller) = self.controller.upgrade() {
            controller.close_editor(&self.index);
            controller.notify_layout_changed();
        }
        self.rejected.emit(());
    }

    /// Dispatches a button press by role.
    pub fn press(&self, role: AcknowledgeButtonRole) {
        match role {
            AcknowledgeButtonRole::Accept => self.accept(),
            AcknowledgeButtonRole::Reject => self.reject(),
        }
    }
}
