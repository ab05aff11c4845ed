//! Attribute reflection: typed state kept consistent with string attributes.

pub mod attributes;
pub mod binding;
pub mod coerce;
pub mod field;

pub use attributes::AttributeMap;
pub use binding::{
    attribute_changed, get_property, observed, reflect_property, remove_attribute, set_attribute,
    set_property, theme_binding, variant_binding, AttributeBinding, Reflect,
};
pub use coerce::{AttributeError, Coercion, Fallback};
pub use field::{FieldValue, MenuItem, MenuItemKind, SelectOption};
