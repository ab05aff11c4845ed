//! Built-in widgets: Button, Switch, Slider, Select, Menu, Input, Loader,
//! Card, Persona, Notification.

use serde::{Deserialize, Serialize};

use crate::reflect::{set_property, FieldValue, Reflect};
use crate::render::View;
use crate::theme::ThemeKey;
use crate::widget::Host;

pub mod button;
pub mod card;
mod dropdown;
pub mod input;
pub mod loader;
pub mod menu;
pub mod notification;
pub mod persona;
pub mod select;
pub mod slider;
pub mod switch;

pub use button::{Button, ButtonConfig};
pub use card::{Card, CardConfig};
pub use input::{Input, InputConfig};
pub use loader::{Loader, LoaderConfig, LoaderKind};
pub use menu::{Menu, MenuConfig};
pub use notification::{Notification, NotificationConfig, NotificationLevel};
pub use persona::{Persona, PersonaConfig};
pub use select::{Select, SelectConfig};
pub use slider::{Slider, SliderConfig};
pub use switch::{Switch, SwitchConfig};

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// Size keyword shared by the loader and the persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Small,
    #[default]
    Medium,
    Large,
}

impl Size {
    pub const KEYWORDS: &'static [&'static str] = &["small", "medium", "large"];

    pub fn keyword(self) -> &'static str {
        match self {
            Size::Small => "small",
            Size::Medium => "medium",
            Size::Large => "large",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Size> {
        match keyword {
            "small" => Some(Size::Small),
            "medium" => Some(Size::Medium),
            "large" => Some(Size::Large),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Setter helpers
// ---------------------------------------------------------------------------

/// Store `next` in `slot`. Returns `true` if it differed.
pub(crate) fn assign<T: PartialEq>(slot: &mut T, next: T) -> bool {
    if *slot == next {
        return false;
    }
    *slot = next;
    true
}

pub(crate) fn assign_bool(slot: &mut bool, value: FieldValue) -> bool {
    value.as_bool().is_some_and(|b| assign(slot, b))
}

pub(crate) fn assign_text(slot: &mut String, value: FieldValue) -> bool {
    match value {
        FieldValue::Text(text) => assign(slot, text),
        _ => false,
    }
}

pub(crate) fn assign_size(slot: &mut Size, value: FieldValue) -> bool {
    value
        .as_text()
        .and_then(Size::from_keyword)
        .is_some_and(|size| assign(slot, size))
}

/// Root element decorated with the host's theme classes.
pub(crate) fn themed(view: View, host: &Host) -> View {
    view.classes(host.theme().classes())
}

/// Apply a configured theme key through the property path.
pub(crate) fn apply_theme<W: Reflect>(widget: &mut W, key: ThemeKey) {
    set_property(widget, "theme", FieldValue::text(key.theme.keyword()));
    set_property(widget, "variant", FieldValue::text(key.variant.keyword()));
}
