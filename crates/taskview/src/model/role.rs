//! Data roles for item models.
//!
//! Roles define what aspect of an item is being requested or set. Each
//! item can have multiple pieces of data associated with it, distinguished
//! by their role.

use std::sync::Arc;

use super::item::StagedValue;

/// Standard roles for accessing different aspects of item data.
///
/// When querying data from a model via `ItemModel::data()`, the role
/// specifies what information is being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemRole {
    /// Primary text to display. Should return a string.
    Display,

    /// Value for editing (may be richer than the display text). The
    /// variant of [`ItemData`] returned here drives editor selection.
    Edit,

    /// Tooltip text shown on hover. Should return a string.
    ToolTip,

    /// Application-specific data. Use `ItemRole::User(n)` for custom
    /// roles where n >= 0.
    User(u32),
}

impl ItemRole {
    /// Returns the numeric value of this role.
    ///
    /// Standard roles have fixed values 0-255; user roles map to >= 256.
    pub fn value(&self) -> u32 {
        match self {
            ItemRole::Display => 0,
            ItemRole::Edit => 2,
            ItemRole::ToolTip => 3,
            ItemRole::User(n) => 256 + n,
        }
    }

    /// Creates an `ItemRole` from a numeric value.
    ///
    /// Returns `None` for reserved but undefined role values (1, 4-255).
    pub fn from_value(value: u32) -> Option<Self> {
        match value {
            0 => Some(ItemRole::Display),
            2 => Some(ItemRole::Edit),
            3 => Some(ItemRole::ToolTip),
            1 | 4..=255 => None,
            n => Some(ItemRole::User(n - 256)),
        }
    }
}

/// Tagged container for item data.
///
/// `ItemData` carries the value associated with an item role. The variant
/// is part of the contract: delegates select editors by switching on it
/// rather than probing the value at runtime.
///
/// - [`StringList`](ItemData::StringList) is a finite, ordered, closed set
///   of choices — cells holding one edit through an enum editor.
/// - [`Staged`](ItemData::Staged) embeds a pending edit on a live backing
///   object — cells holding one edit through an acknowledge editor.
#[derive(Clone, Default)]
pub enum ItemData {
    /// No data.
    #[default]
    None,
    /// String data (for Display, ToolTip, plain edits).
    String(String),
    /// Integer data.
    Int(i64),
    /// Floating point data.
    Float(f64),
    /// Boolean data.
    Bool(bool),
    /// A closed, ordered set of string choices.
    StringList(Vec<String>),
    /// A staged edit awaiting explicit accept/reject.
    Staged(Arc<dyn StagedValue>),
}

impl ItemData {
    /// Returns `true` if this is `ItemData::None`.
    pub fn is_none(&self) -> bool {
        matches!(self, ItemData::None)
    }

    /// Returns `true` if this contains some data.
    pub fn is_some(&self) -> bool {
        !self.is_none()
    }

    /// Attempts to get the data as a string slice.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            ItemData::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Attempts to get the data as an owned string.
    pub fn into_string(self) -> Option<String> {
        match self {
            ItemData::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get the data as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ItemData::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to get the data as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ItemData::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to get the data as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ItemData::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to get the data as a string list.
    pub fn as_string_list(&self) -> Option<&[String]> {
        match self {
            ItemData::StringList(list) => Some(list.as_slice()),
            _ => None,
        }
    }

    /// Attempts to get the data as a staged value.
    pub fn as_staged(&self) -> Option<&Arc<dyn StagedValue>> {
        match self {
            ItemData::Staged(staged) => Some(staged),
            _ => None,
        }
    }

    /// Renders the data as display text.
    ///
    /// Returns `None` for [`ItemData::None`], the staged variant (a
    /// pending edit has no textual form) and string lists.
    pub fn display_text(&self) -> Option<String> {
        match self {
            ItemData::String(s) => Some(s.clone()),
            ItemData::Int(n) => Some(n.to_string()),
            ItemData::Float(n) => Some(n.to_string()),
            ItemData::Bool(b) => Some(b.to_string()),
            ItemData::None | ItemData::StringList(_) | ItemData::Staged(_) => None,
        }
    }
}

impl std::fmt::Debug for ItemData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemData::None => write!(f, "None"),
            ItemData::String(s) => f.debug_tuple("String").field(s).finish(),
            ItemData::Int(n) => f.debug_tuple("Int").field(n).finish(),
            ItemData::Float(n) => f.debug_tuple("Float").field(n).finish(),
            ItemData::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            ItemData::StringList(list) => f.debug_tuple("StringList").field(list).finish(),
            ItemData::Staged(_) => write!(f, "Staged(..)"),
        }
    }
}

impl From<String> for ItemData {
    fn from(s: String) -> Self {
        ItemData::String(s)
    }
}

impl From<&str> for ItemData {
    fn from(s: &str) -> Self {
        ItemData::String(s.to_string())
    }
}

impl From<i64> for ItemData {
    fn from(n: i64) -> Self {
        ItemData::Int(n)
    }
}

impl From<i32> for ItemData {
    fn from(n: i32) -> Self {
        ItemData::Int(n as i64)
    }
}

impl From<f64> for ItemData {
    fn from(n: f64) -> Self {
        ItemData::Float(n)
    }
}

impl From<bool> for ItemData {
    fn from(b: bool) -> Self {
        ItemData::Bool(b)
    }
}

impl From<Vec<String>> for ItemData {
    fn from(list: Vec<String>) -> Self {
        ItemData::StringList(list)
    }
}

impl From<Vec<&str>> for ItemData {
    fn from(list: Vec<&str>) -> Self {
        ItemData::StringList(list.into_iter().map(String::from).collect())
    }
}

impl From<Arc<dyn StagedValue>> for ItemData {
    fn from(staged: Arc<dyn StagedValue>) -> Self {
        ItemData::Staged(staged)
    }
}

impl From<Option<String>> for ItemData {
    fn from(opt: Option<String>) -> Self {
        match opt {
            Some(s) => ItemData::String(s),
            None => ItemData::None,
        }
    }
}
