//! Snapshot rendering helpers.
//!
//! Functions for turning a widget's rendered internals and reflected
//! attributes into plain-text strings suitable for inline snapshots.

use crate::theme::StyleProvider;
use crate::widget::{flush, Widget};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Flush pending renders and serialize the widget's internal tree.
///
/// # Examples
///
/// ```
/// use frost_ui::testing::render_markup;
/// use frost_ui::widgets::Card;
///
/// let markup = render_markup(&mut Card::new("Hello"));
/// assert!(markup.contains("Hello"));
/// ```
pub fn render_markup(widget: &mut dyn Widget) -> String {
    render_styled_markup(widget, None)
}

/// Same as [`render_markup`] with a style provider for the root.
pub fn render_styled_markup(
    widget: &mut dyn Widget,
    provider: Option<&dyn StyleProvider>,
) -> String {
    flush(widget, provider);
    widget.host().surface().to_markup()
}

/// Flush, then serialize only the subtree rooted at `part`. Empty when the
/// part is not rendered.
pub fn part_markup(widget: &mut dyn Widget, part: &str) -> String {
    flush(widget, None);
    let dom = widget.host().surface().dom();
    dom.query_part(part)
        .map(|node| dom.subtree_markup(node))
        .unwrap_or_default()
}

/// The widget's host attributes as `name="value"` lines in name order.
/// Presence attributes print bare.
pub fn attribute_listing(widget: &dyn Widget) -> String {
    widget
        .host()
        .attributes()
        .iter()
        .map(|(name, value)| {
            if value.is_empty() {
                name.to_owned()
            } else {
                format!("{name}=\"{value}\"")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{Card, Switch, SwitchConfig};

    #[test]
    fn part_markup_of_missing_part() {
        let mut card = Card::new("Stats");
        assert_eq!(part_markup(&mut card, "nope"), "");
        insta::assert_snapshot!(part_markup(&mut card, "title"), @r#"<h3 part="title" class="card-title">Stats</h3>"#);
    }

    #[test]
    fn attributes_sorted_with_bare_presence() {
        let switch = Switch::from_config(
            SwitchConfig::default().with_checked(true).with_label("Wi-Fi"),
        );
        insta::assert_snapshot!(attribute_listing(&switch), @r#"
        checked
        label="Wi-Fi"
        "#);
    }

    #[test]
    fn styled_root() {
        let provider = |_: crate::theme::ThemeKey, widget_type: &str| {
            vec![("color".to_string(), widget_type.to_lowercase())]
        };
        let markup = render_styled_markup(&mut Card::default(), Some(&provider as &dyn StyleProvider));
        assert!(markup.lines().next().unwrap().ends_with(r#"style="color: card">"#));
    }
}
