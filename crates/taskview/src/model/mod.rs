//! Model layer for the taskview property tree.
//!
//! This module provides the data side of the Model/View pattern:
//!
//! - [`ModelIndex`]: a space-tagged locator for an item's position
//! - [`ItemRole`] / [`ItemData`]: what kind of data a cell holds
//! - [`PropertyItem`]: the capability trait backing items must provide
//! - [`ItemModel`]: the trait models implement, with [`ModelSignals`]
//! - [`PropertyItemModel`]: the two-column (Name/Value) source model
//! - [`TaskFilterProxyModel`]: basename filtering/sorting over the source
//! - [`TreeModelHandle`]: direct-or-filtered model access with total
//!   index-space conversions
//! - [`PropertyItemDelegate`]: per-cell editor dispatch and the commit
//!   protocol
//!
//! Every index knows which space it addresses ([`IndexSpace::Source`] or
//! [`IndexSpace::View`]); [`TreeModelHandle`] owns the conversions between
//! the two, so call sites never guess whether a proxy sits in between.

mod delegate;
mod error;
mod handle;
mod index;
mod item;
mod proxy_model;
mod role;
#[cfg(test)]
pub(crate) mod test_support;
mod traits;
mod tree_model;

pub use delegate::{Editor, EditorKind, PropertyItemDelegate, ValueExtractable};
pub use error::{ModelError, Result};
pub use handle::TreeModelHandle;
pub use index::{IndexSpace, ModelIndex};
pub use item::{ItemKind, ItemOptions, PropertyItem, StagedValue};
pub use proxy_model::TaskFilterProxyModel;
pub use role::{ItemData, ItemRole};
pub use traits::{ItemModel, ModelSignals};
pub use tree_model::PropertyItemModel;
