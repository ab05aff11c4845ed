//! The render/reconcile cycle.
//!
//! A [`Surface`] owns one widget's internal tree. A rebuild replaces every
//! node, which drops all listeners and invalidates every [`NodeId`], so
//! [`Surface::rebuild`] brackets the replacement:
//!
//! 1. snapshot transient state the widget does not own: the focused part and
//!    the caret offset inside it
//! 2. build the new tree from the widget's [`View`]
//! 3. re-attach listeners from the widget's static listener table
//! 4. restore focus by part name and the caret by character offset
//!
//! Drag sessions live in widget state, not here, so a rebuild neither ends
//! nor resumes one.

use std::collections::HashMap;

use crate::dom::{Dom, NodeId};

use super::patch::Patch;
use super::view::View;

// ---------------------------------------------------------------------------
// Listen
// ---------------------------------------------------------------------------

/// Kinds of input a node can listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listen {
    /// Pointer down/move/up/cancel.
    Pointer,
    Click,
    Key,
    /// Text insertion and commit.
    Text,
    /// Focus and blur.
    Focus,
}

/// A listener declaration: a selector and the input kind it listens for.
///
/// The selector is a part name, or `.class` to attach to every node with
/// that class.
pub type ListenerSpec = (&'static str, Listen);

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// One widget's rendered internal tree plus its transient DOM state.
#[derive(Debug, Default)]
pub struct Surface {
    dom: Dom,
    listeners: HashMap<NodeId, Vec<Listen>>,
    focused: Option<NodeId>,
    caret: usize,
    rebuilds: usize,
    patch_passes: usize,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    /// Whether the tree has been built at least once.
    pub fn is_built(&self) -> bool {
        self.dom.root().is_some()
    }

    /// Number of full rebuilds so far.
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds
    }

    /// Number of in-place patch passes so far.
    pub fn patch_count(&self) -> usize {
        self.patch_passes
    }

    /// Total renders of either kind.
    pub fn render_count(&self) -> usize {
        self.rebuilds + self.patch_passes
    }

    // ── Rebuild ──────────────────────────────────────────────────────

    /// Replace the tree with `view` and re-attach `listeners`.
    pub fn rebuild(&mut self, view: View, listeners: &[ListenerSpec]) {
        let focused_part = self.focused_part().map(str::to_owned);
        let caret = self.caret;

        self.dom.clear();
        self.listeners.clear();
        self.focused = None;
        view.build(&mut self.dom, None);
        self.attach(listeners);

        if let Some(part) = focused_part {
            if let Some(id) = self.dom.query_part(&part) {
                if self.dom.get(id).is_some_and(|d| d.focusable) {
                    self.focused = Some(id);
                    self.caret = caret.min(self.text_len(id));
                } else {
                    log::trace!("focus lost on rebuild: part `{part}` is no longer focusable");
                }
            }
        }
        if self.focused.is_none() {
            self.caret = 0;
        }
        self.rebuilds += 1;
    }

    fn attach(&mut self, listeners: &[ListenerSpec]) {
        for &(selector, kind) in listeners {
            let targets = match selector.strip_prefix('.') {
                Some(class) => self.dom.query_by_class(class),
                None => self.dom.query_part(selector).into_iter().collect(),
            };
            for id in targets {
                self.listeners.entry(id).or_default().push(kind);
            }
        }
    }

    // ── Patch ────────────────────────────────────────────────────────

    /// Apply in-place patches. Returns how many nodes actually changed.
    ///
    /// Patches naming a part that is not in the tree are skipped.
    pub fn apply(&mut self, patches: &[Patch]) -> usize {
        let mut changed = 0;
        for patch in patches {
            let Some(id) = self.dom.query_part(patch.part()) else {
                log::trace!("patch skipped: no part `{}`", patch.part());
                continue;
            };
            let Some(node) = self.dom.get_mut(id) else {
                continue;
            };
            let did_change = match patch {
                Patch::Style { property, value, .. } => node.set_style(property, value),
                Patch::Attr { name, value, .. } => node.set_attr(name, value.as_deref()),
                Patch::Class { class, on, .. } => {
                    let before = node.has_class(class);
                    node.set_class(class, *on);
                    before != *on
                }
                Patch::Text { text, .. } => {
                    if node.text.as_deref() == Some(text.as_str()) {
                        false
                    } else {
                        node.text = Some(text.clone());
                        true
                    }
                }
            };
            if did_change {
                changed += 1;
            }
        }
        if let Some(focused) = self.focused {
            self.caret = self.caret.min(self.text_len(focused));
        }
        self.patch_passes += 1;
        changed
    }

    /// Apply inline style declarations to the root element.
    pub fn style_root(&mut self, declarations: &[(String, String)]) {
        let Some(root) = self.dom.root() else {
            return;
        };
        if let Some(node) = self.dom.get_mut(root) {
            for (property, value) in declarations {
                node.set_style(property, value);
            }
        }
    }

    // ── Listeners ────────────────────────────────────────────────────

    /// Whether `node` currently listens for `kind`. Stale ids never do.
    pub fn listens(&self, node: NodeId, kind: Listen) -> bool {
        self.listeners
            .get(&node)
            .is_some_and(|kinds| kinds.contains(&kind))
    }

    /// Number of attached (node, kind) listener pairs.
    pub fn listener_count(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    pub fn query_part(&self, part: &str) -> Option<NodeId> {
        self.dom.query_part(part)
    }

    // ── Focus and caret ──────────────────────────────────────────────

    /// Focus the element with part name `part`. Returns `false` if it does
    /// not exist or is not focusable.
    pub fn focus_part(&mut self, part: &str) -> bool {
        let Some(id) = self.dom.query_part(part) else {
            return false;
        };
        if !self.dom.get(id).is_some_and(|d| d.focusable) {
            return false;
        }
        if self.focused != Some(id) {
            self.focused = Some(id);
            self.caret = self.text_len(id);
        }
        true
    }

    /// Drop focus. Returns `true` if something was focused.
    pub fn blur(&mut self) -> bool {
        self.caret = 0;
        self.focused.take().is_some()
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn focused_part(&self) -> Option<&str> {
        self.focused.and_then(|id| self.dom.part_of(id))
    }

    /// Caret offset in characters within the focused element.
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Move the caret, clamped to the focused element's text length.
    pub fn set_caret(&mut self, offset: usize) {
        self.caret = match self.focused {
            Some(id) => offset.min(self.text_len(id)),
            None => 0,
        };
    }

    fn text_len(&self, id: NodeId) -> usize {
        self.dom.get(id).map_or(0, |d| d.text_len())
    }

    // ── Inspection ───────────────────────────────────────────────────

    pub fn to_markup(&self) -> String {
        self.dom.to_markup()
    }

    /// Text content of `part`, or `None` if the part does not exist.
    pub fn part_text(&self, part: &str) -> Option<String> {
        self.dom.query_part(part).map(|id| self.dom.text_content(id))
    }
}
