//! Markup serialization for inspection and snapshot tests.
//!
//! Output is indented two spaces per level. Attributes print in a fixed
//! order (`part`, `class`, sorted attributes, `style`) so snapshots are
//! deterministic.

use super::node::{NodeData, NodeId};
use super::tree::Dom;

impl Dom {
    /// Serialize the whole tree. Empty string if there is no root.
    pub fn to_markup(&self) -> String {
        match self.root() {
            Some(root) => self.subtree_markup(root),
            None => String::new(),
        }
    }

    /// Serialize the subtree rooted at `id`.
    pub fn subtree_markup(&self, id: NodeId) -> String {
        let mut lines = Vec::new();
        self.write_node(id, 0, &mut lines);
        lines.join("\n")
    }

    fn write_node(&self, id: NodeId, depth: usize, lines: &mut Vec<String>) {
        let Some(data) = self.get(id) else {
            return;
        };
        let indent = "  ".repeat(depth);
        let open = open_tag(data);
        let kids = self.children(id);

        if kids.is_empty() {
            let text = data.text.as_deref().map(escape_text).unwrap_or_default();
            lines.push(format!("{indent}{open}{text}</{}>", data.tag));
            return;
        }

        lines.push(format!("{indent}{open}"));
        if let Some(text) = data.text.as_deref() {
            lines.push(format!("{indent}  {}", escape_text(text)));
        }
        for &child in kids {
            self.write_node(child, depth + 1, lines);
        }
        lines.push(format!("{indent}</{}>", data.tag));
    }
}

fn open_tag(data: &NodeData) -> String {
    let mut tag = format!("<{}", data.tag);
    if let Some(part) = &data.part {
        tag.push_str(&format!(" part=\"{}\"", escape_attr(part)));
    }
    if !data.classes.is_empty() {
        tag.push_str(&format!(" class=\"{}\"", escape_attr(&data.classes.join(" "))));
    }
    for (name, value) in &data.attributes {
        if value.is_empty() {
            tag.push_str(&format!(" {name}"));
        } else {
            tag.push_str(&format!(" {name}=\"{}\"", escape_attr(value)));
        }
    }
    if !data.style.is_empty() {
        let decls: Vec<String> = data.style.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        tag.push_str(&format!(" style=\"{}\"", escape_attr(&decls.join("; "))));
    }
    tag.push('>');
    tag
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}
