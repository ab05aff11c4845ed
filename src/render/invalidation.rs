//! Render scheduling.
//!
//! Every state change names how much of the internal tree it invalidates.
//! Requests coalesce to the strongest pending kind until the next flush, so
//! two changes before a flush cost one render.

/// How much of a widget's internal tree a change invalidates.
///
/// Ordered by strength: a pending `Rebuild` absorbs any `Patch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Invalidation {
    /// Nothing visible changed.
    #[default]
    None,
    /// Styles, attributes, classes or text change in place.
    Patch,
    /// The structure changed; the tree is rebuilt from scratch.
    Rebuild,
}

/// Coalesces render requests between flushes.
#[derive(Debug, Default, Clone)]
pub struct RenderScheduler {
    pending: Invalidation,
    requests: usize,
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a render of at least `kind`.
    pub fn schedule(&mut self, kind: Invalidation) {
        if kind == Invalidation::None {
            return;
        }
        self.pending = self.pending.max(kind);
        self.requests += 1;
    }

    /// The strongest pending invalidation.
    pub fn pending(&self) -> Invalidation {
        self.pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending != Invalidation::None
    }

    /// Total requests ever scheduled (coalesced or not).
    pub fn requests(&self) -> usize {
        self.requests
    }

    /// Take the pending invalidation, leaving nothing pending.
    pub fn take(&mut self) -> Invalidation {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_by_strength() {
        assert!(Invalidation::None < Invalidation::Patch);
        assert!(Invalidation::Patch < Invalidation::Rebuild);
    }

    #[test]
    fn rebuild_absorbs_patch() {
        let mut s = RenderScheduler::new();
        s.schedule(Invalidation::Patch);
        s.schedule(Invalidation::Rebuild);
        s.schedule(Invalidation::Patch);
        assert_eq!(s.take(), Invalidation::Rebuild);
        assert_eq!(s.requests(), 3);
    }

    #[test]
    fn take_clears() {
        let mut s = RenderScheduler::new();
        s.schedule(Invalidation::Patch);
        assert!(s.is_pending());
        assert_eq!(s.take(), Invalidation::Patch);
        assert!(!s.is_pending());
        assert_eq!(s.take(), Invalidation::None);
    }

    #[test]
    fn scheduling_none_is_ignored() {
        let mut s = RenderScheduler::new();
        s.schedule(Invalidation::None);
        assert_eq!(s.requests(), 0);
        assert!(!s.is_pending());
    }
}
