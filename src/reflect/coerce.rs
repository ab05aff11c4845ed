//! Attribute string to typed value coercion.
//!
//! Every observed attribute has exactly one [`Coercion`]. Parsing never
//! fails past this module: [`Coercion::resolve`] logs the error and falls
//! back to the documented default.

use crate::value::{parse_float, parse_int};

use super::field::{FieldValue, MenuItem, SelectOption};

// ---------------------------------------------------------------------------
// AttributeError
// ---------------------------------------------------------------------------

/// Errors from coercing an attribute string.
#[derive(Debug, thiserror::Error)]
pub enum AttributeError {
    #[error("not a number: {raw:?}")]
    InvalidNumber { raw: String },
    #[error("unknown keyword {value:?}, expected one of {allowed:?}")]
    UnknownKeyword {
        value: String,
        allowed: &'static [&'static str],
    },
    #[error("malformed list: {source}")]
    MalformedList {
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Coercion
// ---------------------------------------------------------------------------

/// What a numeric attribute falls back to when it does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// The field's documented default.
    Default,
    /// Whatever the field currently holds.
    Current,
}

/// How an attribute string maps onto a typed field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coercion {
    /// Boolean: present means `true`, whatever the value.
    Presence,
    /// Boolean: `true` unless the value is exactly `"false"`. Absent is `true`.
    NotFalse,
    /// Lenient float prefix parse. Absent yields `default`.
    Number { default: f64, fallback: Fallback },
    /// Lenient integer prefix parse. Absent or invalid yields `default`.
    Integer { default: i64 },
    /// Free text. Absent or empty yields `default`.
    Text { default: &'static str },
    /// One of a fixed keyword set. Absent or empty yields `default`.
    Keyword {
        allowed: &'static [&'static str],
        default: &'static str,
    },
    /// JSON array of `{value, text}`.
    OptionList,
    /// JSON array of `{text, value}` or `{type: "separator"}`.
    ItemList,
}

impl Coercion {
    /// Parse `raw` (`None` when the attribute is absent).
    pub fn parse(&self, raw: Option<&str>) -> Result<FieldValue, AttributeError> {
        match (*self, raw) {
            (Coercion::Presence, raw) => Ok(FieldValue::Bool(raw.is_some())),
            (Coercion::NotFalse, raw) => Ok(FieldValue::Bool(raw != Some("false"))),
            (Coercion::Number { default, .. }, None) => Ok(FieldValue::Number(default)),
            (Coercion::Number { .. }, Some(s)) => parse_float(s)
                .map(FieldValue::Number)
                .ok_or_else(|| AttributeError::InvalidNumber { raw: s.to_owned() }),
            (Coercion::Integer { default }, None) => Ok(FieldValue::Number(default as f64)),
            (Coercion::Integer { .. }, Some(s)) => parse_int(s)
                .map(|n| FieldValue::Number(n as f64))
                .ok_or_else(|| AttributeError::InvalidNumber { raw: s.to_owned() }),
            (Coercion::Text { default }, raw) => Ok(FieldValue::text(
                raw.filter(|s| !s.is_empty()).unwrap_or(default),
            )),
            (Coercion::Keyword { default, .. }, None) => Ok(FieldValue::text(default)),
            (Coercion::Keyword { default, .. }, Some("")) => Ok(FieldValue::text(default)),
            (Coercion::Keyword { allowed, .. }, Some(s)) => {
                if allowed.contains(&s) {
                    Ok(FieldValue::text(s))
                } else {
                    Err(AttributeError::UnknownKeyword {
                        value: s.to_owned(),
                        allowed,
                    })
                }
            }
            (Coercion::OptionList, None) => Ok(FieldValue::Options(Vec::new())),
            (Coercion::OptionList, Some(s)) => serde_json::from_str::<Vec<SelectOption>>(s)
                .map(FieldValue::Options)
                .map_err(|source| AttributeError::MalformedList { source }),
            (Coercion::ItemList, None) => Ok(FieldValue::Items(Vec::new())),
            (Coercion::ItemList, Some(s)) => serde_json::from_str::<Vec<MenuItem>>(s)
                .map(FieldValue::Items)
                .map_err(|source| AttributeError::MalformedList { source }),
        }
    }

    /// The documented default, used when the attribute is absent.
    pub fn default_value(&self) -> FieldValue {
        match *self {
            Coercion::Presence => FieldValue::Bool(false),
            Coercion::NotFalse => FieldValue::Bool(true),
            Coercion::Number { default, .. } => FieldValue::Number(default),
            Coercion::Integer { default } => FieldValue::Number(default as f64),
            Coercion::Text { default } | Coercion::Keyword { default, .. } => {
                FieldValue::text(default)
            }
            Coercion::OptionList => FieldValue::Options(Vec::new()),
            Coercion::ItemList => FieldValue::Items(Vec::new()),
        }
    }

    /// Value to use when parsing failed.
    pub fn fallback(&self, current: &FieldValue) -> FieldValue {
        match self {
            Coercion::Number {
                fallback: Fallback::Current,
                ..
            } => current.clone(),
            _ => self.default_value(),
        }
    }

    /// Attribute string for `value`, `None` meaning absent.
    ///
    /// A `NotFalse` field is absent-means-true, so it serializes both states
    /// explicitly.
    pub fn to_attribute(&self, value: &FieldValue) -> Option<String> {
        match (self, value) {
            (Coercion::NotFalse, FieldValue::Bool(b)) => Some(b.to_string()),
            _ => value.to_attribute(),
        }
    }

    /// Parse `raw`, logging and falling back on malformed input.
    pub fn resolve(&self, name: &str, raw: Option<&str>, current: &FieldValue) -> FieldValue {
        match self.parse(raw) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("attribute `{name}`: {err}; using fallback");
                self.fallback(current)
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
