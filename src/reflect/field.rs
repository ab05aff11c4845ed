//! Typed field values and their attribute string form.

use serde::{Deserialize, Serialize};

use crate::value::format_number;

// ---------------------------------------------------------------------------
// List entries
// ---------------------------------------------------------------------------

/// One `{value, text}` entry of a select's option list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub text: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }
}

/// Kind of a menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuItemKind {
    #[default]
    Item,
    Separator,
}

/// One entry of a menu's item list: a selectable item or a separator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default, rename = "type", skip_serializing_if = "is_item")]
    pub kind: MenuItemKind,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
}

fn is_item(kind: &MenuItemKind) -> bool {
    *kind == MenuItemKind::Item
}

impl MenuItem {
    pub fn item(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: MenuItemKind::Item,
            text: text.into(),
            value: value.into(),
        }
    }

    pub fn separator() -> Self {
        Self {
            kind: MenuItemKind::Separator,
            ..Self::default()
        }
    }

    pub fn is_separator(&self) -> bool {
        self.kind == MenuItemKind::Separator
    }
}

// ---------------------------------------------------------------------------
// FieldValue
// ---------------------------------------------------------------------------

/// A typed widget state value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Bool(bool),
    Text(String),
    Options(Vec<SelectOption>),
    Items(Vec<MenuItem>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Serialized attribute form. `None` means the attribute is absent.
    ///
    /// Booleans map to presence: `true` is the empty string, `false` is no
    /// attribute at all.
    pub fn to_attribute(&self) -> Option<String> {
        match self {
            FieldValue::Number(n) => Some(format_number(*n)),
            FieldValue::Bool(true) => Some(String::new()),
            FieldValue::Bool(false) => None,
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Options(list) => serde_json::to_string(list).ok(),
            FieldValue::Items(list) => serde_json::to_string(list).ok(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}
