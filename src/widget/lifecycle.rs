//! Widget lifecycle: connect, render, disconnect.
//!
//! The `LifecycleTracker` records which widgets are currently connected to a
//! document and accumulates lifecycle events that an embedder can drain,
//! e.g. to attach platform resources on connect or to audit render counts.

use std::collections::HashSet;

use crate::render::Invalidation;

slotmap::new_key_type! {
    /// Identifies a widget instance inside a [`Document`](crate::document::Document).
    pub struct WidgetId;
}

// ---------------------------------------------------------------------------
// LifecycleEvent
// ---------------------------------------------------------------------------

/// Events that occur during the widget lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A widget was connected to the document.
    Connected { id: WidgetId },
    /// A widget was disconnected and dropped.
    Disconnected { id: WidgetId },
    /// A connected widget's internal tree was rebuilt or patched.
    Rendered { id: WidgetId, kind: Invalidation },
}

// ---------------------------------------------------------------------------
// LifecycleTracker
// ---------------------------------------------------------------------------

/// Tracks which widgets are connected and accumulates lifecycle events.
#[derive(Debug, Default)]
pub struct LifecycleTracker {
    connected: HashSet<WidgetId>,
    pending: Vec<LifecycleEvent>,
}

impl LifecycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a connect. Connecting twice records one event.
    pub fn on_connect(&mut self, id: WidgetId) {
        if self.connected.insert(id) {
            self.pending.push(LifecycleEvent::Connected { id });
        }
    }

    /// Record a disconnect. Unknown ids record nothing.
    pub fn on_disconnect(&mut self, id: WidgetId) {
        if self.connected.remove(&id) {
            self.pending.push(LifecycleEvent::Disconnected { id });
        }
    }

    /// Record a render of a connected widget. `Invalidation::None` and
    /// disconnected ids record nothing.
    pub fn on_render(&mut self, id: WidgetId, kind: Invalidation) {
        if kind != Invalidation::None && self.connected.contains(&id) {
            self.pending.push(LifecycleEvent::Rendered { id, kind });
        }
    }

    pub fn is_connected(&self, id: WidgetId) -> bool {
        self.connected.contains(&id)
    }

    pub fn connected_count(&self) -> usize {
        self.connected.len()
    }

    /// Drain all pending events in order of occurrence.
    pub fn pending_events(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn make_id(sm: &mut SlotMap<WidgetId, ()>) -> WidgetId {
        sm.insert(())
    }

    #[test]
    fn new_tracker_is_empty() {
        let tracker = LifecycleTracker::new();
        assert_eq!(tracker.connected_count(), 0);
        assert!(!tracker.has_pending());
    }

    #[test]
    fn double_connect_is_noop() {
        let mut sm = SlotMap::with_key();
        let id = make_id(&mut sm);
        let mut tracker = LifecycleTracker::new();

        tracker.on_connect(id);
        tracker.on_connect(id);
        assert_eq!(tracker.connected_count(), 1);
        assert_eq!(tracker.pending_events(), vec![LifecycleEvent::Connected { id }]);
    }

    #[test]
    fn disconnect_unknown_is_noop() {
        let mut sm = SlotMap::with_key();
        let id = make_id(&mut sm);
        let mut tracker = LifecycleTracker::new();

        tracker.on_disconnect(id);
        assert!(!tracker.has_pending());
    }

    #[test]
    fn render_requires_connection_and_a_kind() {
        let mut sm = SlotMap::with_key();
        let id = make_id(&mut sm);
        let mut tracker = LifecycleTracker::new();

        tracker.on_render(id, Invalidation::Rebuild);
        assert!(!tracker.has_pending());

        tracker.on_connect(id);
        let _ = tracker.pending_events();
        tracker.on_render(id, Invalidation::None);
        assert!(!tracker.has_pending());
        tracker.on_render(id, Invalidation::Patch);
        assert_eq!(
            tracker.pending_events(),
            vec![LifecycleEvent::Rendered { id, kind: Invalidation::Patch }]
        );
    }

    #[test]
    fn full_lifecycle_sequence() {
        let mut sm = SlotMap::with_key();
        let id = make_id(&mut sm);
        let mut tracker = LifecycleTracker::new();

        tracker.on_connect(id);
        tracker.on_render(id, Invalidation::Rebuild);
        tracker.on_disconnect(id);

        let events = tracker.pending_events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], LifecycleEvent::Connected { id });
        assert_eq!(events[1], LifecycleEvent::Rendered { id, kind: Invalidation::Rebuild });
        assert_eq!(events[2], LifecycleEvent::Disconnected { id });
        assert!(!tracker.is_connected(id));
    }
}
