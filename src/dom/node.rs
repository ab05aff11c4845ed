//! Node types: NodeId, NodeData.

use std::collections::BTreeMap;

use slotmap::new_key_type;

new_key_type! {
    /// Identifier for an element inside a widget's internal tree.
    ///
    /// Ids do not survive a rebuild: every rebuild allocates fresh nodes, so a
    /// `NodeId` captured before a rebuild resolves to nothing afterwards.
    pub struct NodeId;
}

/// One element of a widget's internal tree.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    /// Element tag (e.g. "div", "button", "input").
    pub tag: String,
    /// Stable part name used to find this element again after a rebuild.
    pub part: Option<String>,
    /// Class list, in insertion order, without duplicates.
    pub classes: Vec<String>,
    /// Element attributes. An empty value renders as a bare flag.
    pub attributes: BTreeMap<String, String>,
    /// Inline style declarations.
    pub style: BTreeMap<String, String>,
    /// Text content of this element.
    pub text: Option<String>,
    /// Whether this element can hold focus.
    pub focusable: bool,
}

impl NodeData {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            part: None,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            style: BTreeMap::new(),
            text: None,
            focusable: false,
        }
    }

    /// Set the part name (builder).
    pub fn with_part(mut self, part: impl Into<String>) -> Self {
        self.part = Some(part.into());
        self
    }

    /// Add a class (builder). Duplicates are ignored.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Set an attribute (builder).
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set an inline style declaration (builder).
    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }

    /// Set the text content (builder).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Mark the element as focusable (builder).
    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class. No-op if already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_owned());
        }
    }

    /// Remove a class. No-op if absent.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Add or remove `class` depending on `on`.
    pub fn set_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    /// Attribute value, if set.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set or remove an attribute. Returns `true` if the element changed.
    pub fn set_attr(&mut self, name: &str, value: Option<&str>) -> bool {
        match value {
            Some(v) if self.attr(name) == Some(v) => false,
            Some(v) => {
                self.attributes.insert(name.to_owned(), v.to_owned());
                true
            }
            None => self.attributes.remove(name).is_some(),
        }
    }

    /// Set an inline style declaration. Returns `true` if the element changed.
    pub fn set_style(&mut self, property: &str, value: &str) -> bool {
        if self.style.get(property).map(String::as_str) == Some(value) {
            return false;
        }
        self.style.insert(property.to_owned(), value.to_owned());
        true
    }

    /// Number of characters of editable text held in the `value` attribute,
    /// falling back to the text content.
    pub fn text_len(&self) -> usize {
        self.attr("value")
            .or(self.text.as_deref())
            .map_or(0, |s| s.chars().count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults() {
        let data = NodeData::new("div");
        assert_eq!(data.tag, "div");
        assert!(data.part.is_none());
        assert!(data.classes.is_empty());
        assert!(data.attributes.is_empty());
        assert!(!data.focusable);
    }

    #[test]
    fn builder_chain() {
        let data = NodeData::new("div")
            .with_part("thumb")
            .with_class("slider-thumb")
            .with_class("slider-thumb")
            .with_attr("role", "slider")
            .with_style("left", "50%")
            .focusable(true);
        assert_eq!(data.part.as_deref(), Some("thumb"));
        assert_eq!(data.classes, vec!["slider-thumb"]);
        assert_eq!(data.attr("role"), Some("slider"));
        assert_eq!(data.style.get("left").map(String::as_str), Some("50%"));
        assert!(data.focusable);
    }

    #[test]
    fn set_class_toggles() {
        let mut data = NodeData::new("div");
        data.set_class("open", true);
        data.set_class("open", true);
        assert_eq!(data.classes, vec!["open"]);
        data.set_class("open", false);
        assert!(!data.has_class("open"));
    }

    #[test]
    fn set_attr_reports_changes() {
        let mut data = NodeData::new("input");
        assert!(data.set_attr("value", Some("a")));
        assert!(!data.set_attr("value", Some("a")));
        assert!(data.set_attr("value", None));
        assert!(!data.set_attr("value", None));
    }

    #[test]
    fn set_style_reports_changes() {
        let mut data = NodeData::new("div");
        assert!(data.set_style("top", "0px"));
        assert!(!data.set_style("top", "0px"));
        assert!(data.set_style("top", "74px"));
    }

    #[test]
    fn text_len_prefers_value_attribute() {
        let data = NodeData::new("input").with_attr("value", "héllo").with_text("ignored text");
        assert_eq!(data.text_len(), 5);
        assert_eq!(NodeData::new("span").with_text("abc").text_len(), 3);
        assert_eq!(NodeData::new("span").text_len(), 0);
    }

    #[test]
    fn node_id_is_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<NodeId>();
    }
}
