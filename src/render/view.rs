//! Declarative element descriptions.
//!
//! A widget describes its internal markup as a [`View`] tree on every full
//! rebuild. The [`Surface`](super::Surface) turns the description into a
//! fresh [`Dom`].

use crate::dom::{Dom, NodeData, NodeId};

/// Description of one element and its children.
///
/// # Examples
///
/// ```
/// # use frost_ui::render::View;
/// let thumb = View::new("div")
///     .part("thumb")
///     .class("slider-thumb")
///     .attr("role", "slider")
///     .style("left", "50%")
///     .focusable(true);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub node: NodeData,
    pub children: Vec<View>,
}

impl View {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            node: NodeData::new(tag),
            children: Vec::new(),
        }
    }

    pub fn part(mut self, part: impl Into<String>) -> Self {
        self.node.part = Some(part.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.node = self.node.with_class(class);
        self
    }

    /// Add `class` only when `on` holds.
    pub fn class_if(self, class: impl Into<String>, on: bool) -> Self {
        if on {
            self.class(class)
        } else {
            self
        }
    }

    pub fn classes<I, S>(self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        classes.into_iter().fold(self, |view, c| view.class(c))
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.node = self.node.with_attr(name, value);
        self
    }

    /// Add a bare flag attribute (`disabled`, `required`) when `on` holds.
    pub fn flag(self, name: impl Into<String>, on: bool) -> Self {
        if on {
            self.attr(name, "")
        } else {
            self
        }
    }

    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.node = self.node.with_style(property, value);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.node.text = Some(text.into());
        self
    }

    pub fn focusable(mut self, focusable: bool) -> Self {
        self.node.focusable = focusable;
        self
    }

    pub fn child(mut self, child: View) -> Self {
        self.children.push(child);
        self
    }

    /// Append `child` if present.
    pub fn child_opt(self, child: Option<View>) -> Self {
        match child {
            Some(c) => self.child(c),
            None => self,
        }
    }

    pub fn children(mut self, children: impl IntoIterator<Item = View>) -> Self {
        self.children.extend(children);
        self
    }

    /// Materialize this description into `dom`, under `parent` or as a new
    /// root. Returns the id of the created element.
    pub fn build(self, dom: &mut Dom, parent: Option<NodeId>) -> Option<NodeId> {
        let View { node, children } = self;
        let id = match parent {
            Some(p) => dom.append(p, node)?,
            None => dom.insert(node),
        };
        for child in children {
            child.build(dom, Some(id));
        }
        Some(id)
    }
}
