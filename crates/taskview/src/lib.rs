//! Tree model/view/delegate layer for inspecting and editing live task
//! properties.
//!
//! taskview keeps a filtered/sorted view of a hierarchical property tree in
//! sync with its source model, picks an editor per cell from the cell's
//! runtime data, and drives a two-phase modify-then-confirm protocol for
//! property writes that must be acknowledged before they reach a live
//! backing object.
//!
//! # Layers
//!
//! - [`model`] — the data side: [`model::ModelIndex`] locators,
//!   [`model::PropertyItemModel`] (a two-column Name/Value tree of
//!   [`model::PropertyItem`]s), [`model::TaskFilterProxyModel`] for
//!   basename filtering, and [`model::PropertyItemDelegate`] for per-cell
//!   editor dispatch and the commit protocol.
//! - [`widget`] — the view side: [`widget::TreeView`] state,
//!   [`widget::TreeViewController`] orchestration, and the editors
//!   ([`widget::EnumEditor`], [`widget::AcknowledgeEditor`], spin/line
//!   editors).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use taskview::model::{PropertyItemModel, TreeModelHandle};
//! use taskview::widget::{TreeView, TreeViewController};
//!
//! let model = Arc::new(PropertyItemModel::new());
//! let view = Arc::new(TreeView::new());
//! let controller = TreeViewController::setup(view.clone());
//! controller.set_model(TreeModelHandle::Direct(model));
//! ```
//!
//! Rendering, hit testing and native event delivery are external
//! collaborators: the hosting toolkit resolves pointer positions to
//! [`model::ModelIndex`]es and forwards gestures to the view, which this
//! layer translates into item hooks and model writes.

pub mod model;
pub mod widget;
