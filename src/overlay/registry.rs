//! Process-wide overlay state, passed by reference.
//!
//! One [`OverlayRegistry`] per document replaces module-level singletons:
//! it owns the document-level outside-click listeners and the shared
//! notification stack. Widgets register on connect and unregister on
//! disconnect through their [`Context`](crate::widget::Context).

use slotmap::SlotMap;

use super::queue::NotificationQueue;
use crate::widget::WidgetId;

slotmap::new_key_type! {
    /// Handle for one registered outside-click listener.
    pub struct ListenerKey;
}

#[derive(Debug, Default)]
pub struct OverlayRegistry {
    outside_click: SlotMap<ListenerKey, WidgetId>,
    queue: NotificationQueue,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Outside-click listeners ──────────────────────────────────────

    pub fn register_outside_click(&mut self, owner: WidgetId) -> ListenerKey {
        self.outside_click.insert(owner)
    }

    /// Returns `false` for a key that was already removed.
    pub fn unregister(&mut self, key: ListenerKey) -> bool {
        self.outside_click.remove(key).is_some()
    }

    /// Remove every listener owned by `owner`. Returns how many were removed.
    pub fn unregister_owner(&mut self, owner: WidgetId) -> usize {
        let before = self.outside_click.len();
        self.outside_click.retain(|_, o| *o != owner);
        before - self.outside_click.len()
    }

    pub fn listener_count(&self) -> usize {
        self.outside_click.len()
    }

    /// Owners to notify for a click on `target` (`None` is the document
    /// background). `is_inside(owner, target)` decides whether the click
    /// landed in the owner's own subtree.
    pub fn dispatch_outside_click(
        &self,
        target: Option<WidgetId>,
        is_inside: impl Fn(WidgetId, WidgetId) -> bool,
    ) -> Vec<WidgetId> {
        let mut owners: Vec<WidgetId> = Vec::new();
        for &owner in self.outside_click.values() {
            let outside = target.map_or(true, |t| !is_inside(owner, t));
            if outside && !owners.contains(&owner) {
                owners.push(owner);
            }
        }
        owners
    }

    // ── Notification stack ───────────────────────────────────────────

    pub fn queue(&self) -> &NotificationQueue {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut NotificationQueue {
        &mut self.queue
    }
}
