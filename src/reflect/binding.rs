//! Attribute tables and the property/attribute synchronization functions.
//!
//! Each widget declares a static table of [`AttributeBinding`]s: one entry
//! per observed attribute, naming its coercion, a typed getter and setter,
//! and how much of the tree a change invalidates. The table replaces any
//! name-based dynamic dispatch; an attribute with no entry is not observed.
//!
//! Two write paths keep both views consistent without loops:
//!
//! - attribute → state: [`set_attribute`] stores the string, then
//!   [`attribute_changed`] coerces and applies it. The attribute is never
//!   written back.
//! - property → attribute: [`set_property`] applies a typed value, then
//!   mirrors the resulting state into the attribute map directly, which
//!   does not call back into the widget.
//!
//! Both paths short-circuit on equality, so writing the current value
//! schedules nothing.

use crate::render::Invalidation;
use crate::theme::{Theme, ThemeKey, Variant};
use crate::widget::Widget;

use super::coerce::Coercion;
use super::field::FieldValue;

// ---------------------------------------------------------------------------
// AttributeBinding
// ---------------------------------------------------------------------------

/// One observed attribute and the state field it maps to.
pub struct AttributeBinding<W> {
    pub name: &'static str,
    pub coercion: Coercion,
    /// Current typed value of the field.
    pub get: fn(&W) -> FieldValue,
    /// Apply a typed value (clamping as needed). Returns `true` if state
    /// changed.
    pub set: fn(&mut W, FieldValue) -> bool,
    pub invalidation: Invalidation,
}

impl<W> AttributeBinding<W> {
    pub const fn new(
        name: &'static str,
        coercion: Coercion,
        get: fn(&W) -> FieldValue,
        set: fn(&mut W, FieldValue) -> bool,
        invalidation: Invalidation,
    ) -> Self {
        Self {
            name,
            coercion,
            get,
            set,
            invalidation,
        }
    }
}

/// A widget with a static attribute table.
pub trait Reflect: Widget + Sized {
    const ATTRIBUTES: &'static [AttributeBinding<Self>];

    fn binding(name: &str) -> Option<&'static AttributeBinding<Self>> {
        Self::ATTRIBUTES.iter().find(|b| b.name == name)
    }
}

/// Names of every attribute in `W`'s table.
pub fn observed<W: Reflect>() -> Vec<&'static str> {
    W::ATTRIBUTES.iter().map(|b| b.name).collect()
}

// ---------------------------------------------------------------------------
// Attribute path
// ---------------------------------------------------------------------------

/// Apply an observed attribute's new raw value to widget state.
///
/// Malformed values are logged and replaced by the binding's fallback.
/// Returns `false` (and schedules nothing) when the coerced value equals
/// the current state.
pub fn attribute_changed<W: Reflect>(widget: &mut W, name: &str, raw: Option<&str>) -> bool {
    let Some(binding) = W::binding(name) else {
        return false;
    };
    let current = (binding.get)(widget);
    let next = binding.coercion.resolve(name, raw, &current);
    if next == current {
        return false;
    }
    if !(binding.set)(widget, next) {
        return false;
    }
    log::trace!("{}: attribute `{name}` applied", widget.widget_type());
    widget.host_mut().schedule(binding.invalidation);
    true
}

/// Write an attribute from outside, as an embedder would.
///
/// Unchanged values stop here. Unobserved attributes are stored but
/// trigger nothing.
pub fn set_attribute(widget: &mut dyn Widget, name: &str, value: Option<&str>) -> bool {
    if !widget.host_mut().store_attribute(name, value) {
        return false;
    }
    if !widget.observed_attributes().iter().any(|n| *n == name) {
        return false;
    }
    widget.attribute_changed(name, value)
}

pub fn remove_attribute(widget: &mut dyn Widget, name: &str) -> bool {
    set_attribute(widget, name, None)
}

// ---------------------------------------------------------------------------
// Property path
// ---------------------------------------------------------------------------

pub fn get_property<W: Reflect>(widget: &W, name: &str) -> Option<FieldValue> {
    W::binding(name).map(|b| (b.get)(widget))
}

/// Set a typed property: apply, mirror into the attribute, schedule.
///
/// Returns `false` when `value` equals the current value, when the setter
/// reports no change (e.g. it clamped to the current value), or when
/// `name` is not a property of `W`.
pub fn set_property<W: Reflect>(widget: &mut W, name: &str, value: FieldValue) -> bool {
    let Some(binding) = W::binding(name) else {
        log::debug!("{}: no property `{name}`", widget.widget_type());
        return false;
    };
    if (binding.get)(widget) == value {
        return false;
    }
    if !(binding.set)(widget, value) {
        return false;
    }
    reflect_property(widget, name);
    widget.host_mut().schedule(binding.invalidation);
    true
}

/// Mirror the current value of `name` into the attribute map.
pub fn reflect_property<W: Reflect>(widget: &mut W, name: &str) -> bool {
    let Some(binding) = W::binding(name) else {
        return false;
    };
    let attr = binding.coercion.to_attribute(&(binding.get)(widget));
    widget.host_mut().reflect(name, attr);
    true
}

// ---------------------------------------------------------------------------
// Shared bindings
// ---------------------------------------------------------------------------

pub const THEME: Coercion = Coercion::Keyword {
    allowed: Theme::KEYWORDS,
    default: "light",
};

pub const VARIANT: Coercion = Coercion::Keyword {
    allowed: Variant::KEYWORDS,
    default: "blur",
};

fn get_theme<W: Widget>(widget: &W) -> FieldValue {
    FieldValue::text(widget.host().theme().theme.keyword())
}

fn set_theme<W: Widget>(widget: &mut W, value: FieldValue) -> bool {
    let Some(theme) = value.as_text().and_then(Theme::from_keyword) else {
        return false;
    };
    let key = ThemeKey {
        theme,
        ..widget.host().theme()
    };
    widget.host_mut().set_theme(key)
}

fn get_variant<W: Widget>(widget: &W) -> FieldValue {
    FieldValue::text(widget.host().theme().variant.keyword())
}

fn set_variant<W: Widget>(widget: &mut W, value: FieldValue) -> bool {
    let Some(variant) = value.as_text().and_then(Variant::from_keyword) else {
        return false;
    };
    let key = ThemeKey {
        variant,
        ..widget.host().theme()
    };
    widget.host_mut().set_theme(key)
}

/// `theme` attribute: `light` (default) or `dark`. Rebuilds.
pub const fn theme_binding<W: Widget>() -> AttributeBinding<W> {
    AttributeBinding::new("theme", THEME, get_theme::<W>, set_theme::<W>, Invalidation::Rebuild)
}

/// `variant` attribute: `blur` (default) or `performance`. Rebuilds.
pub const fn variant_binding<W: Widget>() -> AttributeBinding<W> {
    AttributeBinding::new(
        "variant",
        VARIANT,
        get_variant::<W>,
        set_variant::<W>,
        Invalidation::Rebuild,
    )
}

// ===========================================================================
// Tests
// ===========================================================================
