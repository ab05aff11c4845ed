//! Widget trait: describe, patch, react, flush.
//!
//! Every widget owns its state plus a [`Host`]. The document drives it
//! through this trait: attribute writes arrive via
//! [`Widget::attribute_changed`], input via [`Widget::handle_event`], time
//! via [`Widget::poll_timers`] and [`Widget::on_frame`]. State changes only
//! schedule renders; [`flush`] performs them.

use std::any::Any;

use tokio::time::Instant;

use crate::event::UiEvent;
use crate::overlay::OverlayRegistry;
use crate::render::{Invalidation, ListenerSpec, Patch, View};
use crate::theme::StyleProvider;

use super::host::Host;
use super::lifecycle::WidgetId;

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// Pointer capture request recorded during a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    Acquire,
    Release,
}

/// What a widget callback may touch besides the widget itself.
#[derive(Debug)]
pub struct Context<'a> {
    id: WidgetId,
    now: Instant,
    registry: &'a mut OverlayRegistry,
    propagation_stopped: bool,
    capture: Option<Capture>,
    focus_request: Option<&'static str>,
    removal_requested: bool,
}

impl<'a> Context<'a> {
    pub fn new(id: WidgetId, now: Instant, registry: &'a mut OverlayRegistry) -> Self {
        Self {
            id,
            now,
            registry,
            propagation_stopped: false,
            capture: None,
            focus_request: None,
            removal_requested: false,
        }
    }

    /// The widget being called.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn registry(&mut self) -> &mut OverlayRegistry {
        &mut *self.registry
    }

    /// Keep the current click from reaching document-level listeners.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Route subsequent pointer moves and releases to this widget's part
    /// until released. This is the document-level move/up listener of a
    /// drag.
    pub fn capture_pointer(&mut self) {
        self.capture = Some(Capture::Acquire);
    }

    pub fn release_pointer(&mut self) {
        self.capture = Some(Capture::Release);
    }

    pub fn capture(&self) -> Option<Capture> {
        self.capture
    }

    /// Ask the document to move keyboard focus to `part` of this widget.
    pub fn focus(&mut self, part: &'static str) {
        self.focus_request = Some(part);
    }

    pub fn focus_request(&self) -> Option<&'static str> {
        self.focus_request
    }

    /// Ask the document to disconnect and drop this widget.
    pub fn request_removal(&mut self) {
        self.removal_requested = true;
    }

    pub fn is_removal_requested(&self) -> bool {
        self.removal_requested
    }
}

// ---------------------------------------------------------------------------
// Widget trait
// ---------------------------------------------------------------------------

/// Core trait implemented by every widget.
///
/// Object-safe: the document stores widgets as `Box<dyn Widget>`.
pub trait Widget: Any {
    /// Type name handed to the style provider (e.g. "Slider").
    fn widget_type(&self) -> &'static str;

    fn host(&self) -> &Host;

    fn host_mut(&mut self) -> &mut Host;

    /// Full description of the internal tree for the current state.
    fn view(&self) -> View;

    /// In-place updates covering every patchable property.
    ///
    /// Used instead of [`view`](Widget::view) when only patchable state
    /// changed. Defaults to none, which makes patch renders no-ops.
    fn patches(&self) -> Vec<Patch> {
        Vec::new()
    }

    /// Listener table re-attached after every rebuild.
    fn listeners(&self) -> &'static [ListenerSpec] {
        &[]
    }

    /// Attribute names this widget reacts to.
    fn observed_attributes(&self) -> Vec<&'static str> {
        Vec::new()
    }

    /// An observed attribute changed. Returns `true` if state changed.
    fn attribute_changed(&mut self, _name: &str, _value: Option<&str>) -> bool {
        false
    }

    /// Input delivered to `part` of the internal tree.
    fn handle_event(&mut self, _part: &str, _event: &UiEvent, _cx: &mut Context<'_>) {}

    /// Attached to a document.
    fn connected(&mut self, _cx: &mut Context<'_>) {}

    /// About to be dropped by the document.
    fn disconnected(&mut self, _cx: &mut Context<'_>) {}

    /// A document-level click landed outside this widget.
    fn on_outside_click(&mut self, _cx: &mut Context<'_>) {}

    /// The next animation frame.
    fn on_frame(&mut self, _cx: &mut Context<'_>) {}

    /// The shared notification stack changed.
    fn on_queue_changed(&mut self, _cx: &mut Context<'_>) {}

    /// Earliest pending timer.
    fn next_deadline(&self) -> Option<Instant> {
        None
    }

    /// Fire timers due at or before `cx.now()`.
    fn poll_timers(&mut self, _cx: &mut Context<'_>) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ---------------------------------------------------------------------------
// flush
// ---------------------------------------------------------------------------

/// Perform the pending render, if any. Returns what was done.
///
/// A widget that has never been built is always rebuilt. After any render
/// the style provider's declarations are applied to the root element.
pub fn flush(widget: &mut dyn Widget, provider: Option<&dyn StyleProvider>) -> Invalidation {
    let pending = widget.host_mut().take_invalidation();
    let kind = if widget.host().surface().is_built() {
        pending
    } else {
        Invalidation::Rebuild
    };
    match kind {
        Invalidation::None => return kind,
        Invalidation::Rebuild => {
            let view = widget.view();
            let listeners = widget.listeners();
            widget.host_mut().surface_mut().rebuild(view, listeners);
        }
        Invalidation::Patch => {
            let patches = widget.patches();
            let changed = widget.host_mut().surface_mut().apply(&patches);
            log::trace!("{}: {changed} nodes patched", widget.widget_type());
        }
    }
    if let Some(provider) = provider {
        let declarations = provider.declarations(widget.host().theme(), widget.widget_type());
        widget.host_mut().surface_mut().style_root(&declarations);
    }
    kind
}

// ===========================================================================
// Tests
// ===========================================================================
