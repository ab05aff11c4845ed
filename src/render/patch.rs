//! In-place updates applied to an existing tree without rebuilding it.

/// One in-place change, addressed by part name.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    Style {
        part: &'static str,
        property: &'static str,
        value: String,
    },
    Attr {
        part: &'static str,
        name: &'static str,
        value: Option<String>,
    },
    Class {
        part: &'static str,
        class: &'static str,
        on: bool,
    },
    Text {
        part: &'static str,
        text: String,
    },
}

impl Patch {
    pub fn style(part: &'static str, property: &'static str, value: impl Into<String>) -> Self {
        Patch::Style {
            part,
            property,
            value: value.into(),
        }
    }

    pub fn attr(part: &'static str, name: &'static str, value: Option<String>) -> Self {
        Patch::Attr { part, name, value }
    }

    pub fn class(part: &'static str, class: &'static str, on: bool) -> Self {
        Patch::Class { part, class, on }
    }

    pub fn text(part: &'static str, text: impl Into<String>) -> Self {
        Patch::Text {
            part,
            text: text.into(),
        }
    }

    /// Part this patch targets.
    pub fn part(&self) -> &'static str {
        match self {
            Patch::Style { part, .. }
            | Patch::Attr { part, .. }
            | Patch::Class { part, .. }
            | Patch::Text { part, .. } => part,
        }
    }
}
