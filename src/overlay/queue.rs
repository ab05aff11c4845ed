//! The shared, newest-first notification stack.
//!
//! Offsets are never stored. The offset of an entry is always derived from
//! the heights of the entries before it, so a splice followed by a read can
//! never observe stale positions.

use crate::widget::WidgetId;

/// Vertical gap between stacked notifications.
pub const NOTIFICATION_GAP: f64 = 10.0;

/// Height assumed for a notification until its real height is reported.
pub const DEFAULT_NOTIFICATION_HEIGHT: f64 = 64.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Entry {
    id: WidgetId,
    height: f64,
}

/// Active notifications, newest first.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    entries: Vec<Entry>,
    gap: f64,
    dirty: bool,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::with_gap(NOTIFICATION_GAP)
    }

    pub fn with_gap(gap: f64) -> Self {
        Self {
            entries: Vec::new(),
            gap,
            dirty: false,
        }
    }

    /// Insert `id` at the top. Returns `false` if it is already queued.
    pub fn show(&mut self, id: WidgetId, height: f64) -> bool {
        if self.contains(id) {
            return false;
        }
        self.entries.insert(0, Entry { id, height });
        self.dirty = true;
        true
    }

    /// Splice `id` out. Returns `false` if it was not queued.
    pub fn remove(&mut self, id: WidgetId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.entries.remove(index);
        self.dirty = true;
        true
    }

    /// Report the rendered height of `id`.
    pub fn set_height(&mut self, id: WidgetId, height: f64) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) if entry.height != height => {
                entry.height = height;
                self.dirty = true;
                true
            }
            _ => false,
        }
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: WidgetId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// `Σ(height + gap)` of every entry above `id`.
    pub fn offset_of(&self, id: WidgetId) -> Option<f64> {
        let index = self.index_of(id)?;
        Some(
            self.entries[..index]
                .iter()
                .map(|e| e.height + self.gap)
                .sum(),
        )
    }

    /// Every entry with its offset, newest first.
    pub fn offsets(&self) -> Vec<(WidgetId, f64)> {
        let mut offset = 0.0;
        self.entries
            .iter()
            .map(|e| {
                let here = offset;
                offset += e.height + self.gap;
                (e.id, here)
            })
            .collect()
    }

    pub fn ids(&self) -> Vec<WidgetId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether offsets changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use slotmap::SlotMap;

    fn ids(n: usize) -> Vec<WidgetId> {
        let mut sm: SlotMap<WidgetId, ()> = SlotMap::with_key();
        (0..n).map(|_| sm.insert(())).collect()
    }

    #[test]
    fn newest_first() {
        let v = ids(3);
        let mut q = NotificationQueue::new();
        for &id in &v {
            q.show(id, DEFAULT_NOTIFICATION_HEIGHT);
        }
        assert_eq!(q.ids(), vec![v[2], v[1], v[0]]);
        assert!(!q.show(v[0], 10.0));
    }

    #[test]
    fn offsets_sum_heights_and_gaps() {
        let v = ids(3);
        let mut q = NotificationQueue::new();
        q.show(v[0], 40.0);
        q.show(v[1], 60.0);
        q.show(v[2], 50.0);
        // Order: v2 (50), v1 (60), v0 (40).
        assert_eq!(q.offset_of(v[2]), Some(0.0));
        assert_eq!(q.offset_of(v[1]), Some(60.0));
        assert_eq!(q.offset_of(v[0]), Some(130.0));
    }

    #[test]
    fn removal_repacks_without_gaps() {
        let v = ids(4);
        let mut q = NotificationQueue::new();
        for &id in &v {
            q.show(id, 30.0);
        }
        q.take_dirty();
        assert!(q.remove(v[2]));
        assert!(q.take_dirty());
        assert_eq!(q.offsets(), vec![(v[3], 0.0), (v[1], 40.0), (v[0], 80.0)]);
        assert!(!q.remove(v[2]));
        assert!(!q.take_dirty());
    }

    #[test]
    fn height_updates_shift_followers() {
        let v = ids(2);
        let mut q = NotificationQueue::with_gap(0.0);
        q.show(v[0], 10.0);
        q.show(v[1], 10.0);
        assert!(q.set_height(v[1], 25.0));
        assert!(!q.set_height(v[1], 25.0));
        assert_eq!(q.offset_of(v[0]), Some(25.0));
    }
}
