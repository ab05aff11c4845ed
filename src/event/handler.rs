//! Notification dispatch: delivery queue and bubble path computation.

use std::collections::VecDeque;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::message::{Envelope, NotificationKind};
use crate::widget::WidgetId;

// ---------------------------------------------------------------------------
// EventDispatcher
// ---------------------------------------------------------------------------

/// Queue of delivered notifications plus any async subscribers.
///
/// Every envelope is kept in the queue until drained and also forwarded to
/// each live subscriber. Subscribers whose receiver was dropped are pruned
/// on the next push.
#[derive(Debug, Default)]
pub struct EventDispatcher {
    queue: VecDeque<Envelope>,
    subscribers: Vec<UnboundedSender<Envelope>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, envelope: Envelope) {
        self.subscribers
            .retain(|tx| tx.send(envelope.clone()).is_ok());
        self.queue.push_back(envelope);
    }

    /// Drain every pending envelope, oldest first.
    pub fn drain(&mut self) -> Vec<Envelope> {
        self.queue.drain(..).collect()
    }

    /// Pending envelopes, oldest first, without draining.
    pub fn pending(&self) -> impl Iterator<Item = &Envelope> {
        self.queue.iter()
    }

    /// Number of pending envelopes of `kind`.
    pub fn count(&self, kind: NotificationKind) -> usize {
        self.queue.iter().filter(|e| e.kind() == kind).count()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Open an async stream of every envelope pushed from now on.
    pub fn subscribe(&mut self) -> UnboundedReceiver<Envelope> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// `[start, parent, ..., root]` following `parent_of`.
    pub fn bubble_path(
        start: WidgetId,
        parent_of: impl Fn(WidgetId) -> Option<WidgetId>,
    ) -> Vec<WidgetId> {
        let mut path = vec![start];
        let mut current = start;
        while let Some(parent) = parent_of(current) {
            path.push(parent);
            current = parent;
        }
        path
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::message::Notification;
    use slotmap::{SecondaryMap, SlotMap};

    fn ids(n: usize) -> Vec<WidgetId> {
        let mut sm: SlotMap<WidgetId, ()> = SlotMap::with_key();
        (0..n).map(|_| sm.insert(())).collect()
    }

    #[test]
    fn push_and_drain_in_order() {
        let id = ids(1)[0];
        let mut d = EventDispatcher::new();
        d.push(Envelope::new(Notification::input(1.0), id, vec![id]));
        d.push(Envelope::new(Notification::change(1.0), id, vec![id]));
        assert_eq!(d.pending_count(), 2);
        assert_eq!(d.count(NotificationKind::Change), 1);
        let drained = d.drain();
        assert_eq!(drained[0].kind(), NotificationKind::Input);
        assert_eq!(drained[1].kind(), NotificationKind::Change);
        assert!(d.is_empty());
    }

    #[test]
    fn bubble_path_walks_to_root() {
        let v = ids(3);
        let mut parents = SecondaryMap::new();
        parents.insert(v[0], v[1]);
        parents.insert(v[1], v[2]);
        let path = EventDispatcher::bubble_path(v[0], |id| parents.get(id).copied());
        assert_eq!(path, vec![v[0], v[1], v[2]]);
        assert_eq!(EventDispatcher::bubble_path(v[2], |id| parents.get(id).copied()), vec![v[2]]);
    }

    #[test]
    fn subscribers_receive_copies() {
        let id = ids(1)[0];
        let mut d = EventDispatcher::new();
        let mut rx = d.subscribe();
        d.push(Envelope::new(Notification::input(3.0), id, vec![id]));
        let got = rx.try_recv().unwrap();
        assert_eq!(got.notification, Notification::input(3.0));
        assert_eq!(d.pending_count(), 1);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let id = ids(1)[0];
        let mut d = EventDispatcher::new();
        drop(d.subscribe());
        d.push(Envelope::new(Notification::input(3.0), id, vec![id]));
        assert!(d.subscribers.is_empty());
    }
}
