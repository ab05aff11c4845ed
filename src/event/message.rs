//! Outbound notifications and their routing envelope.
//!
//! Widgets emit [`Notification`]s (`input`, `change`, `select-change`, ...)
//! into their host's outbox. The document wraps each one in an [`Envelope`]
//! carrying the full bubble path, so ancestors observe notifications no
//! matter how many internal boundaries sit in between.

use serde::Serialize;

use crate::widget::WidgetId;

// ---------------------------------------------------------------------------
// NotificationKind
// ---------------------------------------------------------------------------

/// Name of an outbound notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// Continuous update during a drag or while typing.
    Input,
    /// A discrete, completed interaction.
    Change,
    Click,
    Focus,
    Blur,
    SelectChange,
    MenuSelect,
    PersonaClick,
    /// A notification toast finished closing.
    Close,
}

impl NotificationKind {
    pub fn name(self) -> &'static str {
        match self {
            NotificationKind::Input => "input",
            NotificationKind::Change => "change",
            NotificationKind::Click => "click",
            NotificationKind::Focus => "focus",
            NotificationKind::Blur => "blur",
            NotificationKind::SelectChange => "select-change",
            NotificationKind::MenuSelect => "menu-select",
            NotificationKind::PersonaClick => "persona-click",
            NotificationKind::Close => "close",
        }
    }
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

/// `{index, value, text}` payload of selection notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub index: usize,
    pub value: String,
    pub text: String,
}

impl Selection {
    pub fn new(index: usize, value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            index,
            value: value.into(),
            text: text.into(),
        }
    }
}

/// Notification payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Detail {
    None,
    Value { value: f64 },
    Checked { checked: bool },
    Text { value: String },
    Selection(Selection),
    Persona { name: String, title: String },
}

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// An outbound notification: a kind and its payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub detail: Detail,
}

impl Notification {
    pub fn new(kind: NotificationKind, detail: Detail) -> Self {
        Self { kind, detail }
    }

    pub fn input(value: f64) -> Self {
        Self::new(NotificationKind::Input, Detail::Value { value })
    }

    pub fn change(value: f64) -> Self {
        Self::new(NotificationKind::Change, Detail::Value { value })
    }

    pub fn checked(checked: bool) -> Self {
        Self::new(NotificationKind::Change, Detail::Checked { checked })
    }

    pub fn text(kind: NotificationKind, value: impl Into<String>) -> Self {
        Self::new(kind, Detail::Text { value: value.into() })
    }

    pub fn bare(kind: NotificationKind) -> Self {
        Self::new(kind, Detail::None)
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Payload as JSON, the shape an embedder's `event.detail` would have.
    pub fn detail_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.detail).unwrap_or(serde_json::Value::Null)
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// A notification plus routing metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub notification: Notification,
    /// The widget that emitted the notification.
    pub sender: WidgetId,
    /// `[sender, parent, ..., root]`.
    pub path: Vec<WidgetId>,
}

impl Envelope {
    pub fn new(notification: Notification, sender: WidgetId, path: Vec<WidgetId>) -> Self {
        Self {
            notification,
            sender,
            path,
        }
    }

    pub fn kind(&self) -> NotificationKind {
        self.notification.kind
    }

    /// Whether `widget` observes this notification while it bubbles.
    pub fn reaches(&self, widget: WidgetId) -> bool {
        self.path.contains(&widget)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
