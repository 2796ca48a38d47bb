//! View-side widgets for the taskview property tree.
//!
//! This module provides the widget-facing half of the layer:
//!
//! - [`TreeView`]: the view state a hosting toolkit drives (expand/collapse
//!   set, current index, persistent editors, view configuration)
//! - [`TreeViewController`]: wires a view to a model, routes item hooks,
//!   and suspends/restores row listeners for hidden views
//! - [`EnumEditor`], [`AcknowledgeEditor`], [`SpinEditor`],
//!   [`DoubleSpinEditor`], [`LineEditor`]: the per-cell editors the
//!   delegate hands out
//! - [`drag_drop`]: the serialized payload a drag source view exports
//!
//! Rendering and hit testing belong to the hosting toolkit; these types
//! model the state and protocol underneath.

pub mod acknowledge_editor;
pub mod controller;
pub mod default_editors;
pub mod drag_drop;
pub mod enum_editor;
pub mod tree_view;

pub use acknowledge_editor::{AcknowledgeButtonRole, AcknowledgeEditor};
pub use controller::TreeViewController;
pub use default_editors::{DoubleSpinEditor, LineEditor, SpinEditor};
pub use drag_drop::DragPayload;
pub use enum_editor::EnumEditor;
pub use tree_view::{ContextMenuPolicy, SortOrder, TreeView};

/// A position in widget coordinates.
///
/// The hosting toolkit produces these when it forwards pointer gestures;
/// this layer only passes them along to item hooks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate in pixels.
    pub x: f32,
    /// Vertical coordinate in pixels.
    pub y: f32,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
