//! Open/close phases of a transient overlay.
//!
//! ```text
//! idle ──open──▶ opening ──frame──▶ open ──close──▶ closing ──exit elapsed──▶ idle
//! ```
//!
//! `opening` lasts until the next frame so the click that opened the overlay
//! can never be seen as an outside click. `closing` keeps the markup alive
//! until the exit animation has elapsed. An `open()` during `closing` is
//! remembered and applied once `idle` is reached.

use std::time::Duration;

use tokio::time::Instant;

/// Exit animation length for select and menu dropdowns.
pub const DROPDOWN_EXIT: Duration = Duration::from_millis(200);

/// Exit animation length for notification toasts.
pub const NOTIFICATION_EXIT: Duration = Duration::from_millis(300);

// ---------------------------------------------------------------------------
// OverlayPhase
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OverlayPhase {
    #[default]
    Idle,
    Opening,
    Open,
    Closing,
}

impl OverlayPhase {
    /// Whether `next` may directly follow `self`.
    ///
    /// Every allowed step keeps the observed sequence a subsequence of
    /// `idle → opening → open → closing → idle`.
    pub fn can_advance_to(self, next: OverlayPhase) -> bool {
        matches!(
            (self, next),
            (OverlayPhase::Idle, OverlayPhase::Opening)
                | (OverlayPhase::Opening, OverlayPhase::Open)
                | (OverlayPhase::Opening, OverlayPhase::Closing)
                | (OverlayPhase::Open, OverlayPhase::Closing)
                | (OverlayPhase::Closing, OverlayPhase::Idle)
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            OverlayPhase::Idle => "idle",
            OverlayPhase::Opening => "opening",
            OverlayPhase::Open => "open",
            OverlayPhase::Closing => "closing",
        }
    }
}

// ---------------------------------------------------------------------------
// OverlayLifecycle
// ---------------------------------------------------------------------------

/// Phase machine for one overlay instance.
#[derive(Debug, Clone)]
pub struct OverlayLifecycle {
    phase: OverlayPhase,
    exit: Duration,
    closing_deadline: Option<Instant>,
    reopen_requested: bool,
}

impl OverlayLifecycle {
    pub fn new(exit: Duration) -> Self {
        Self {
            phase: OverlayPhase::Idle,
            exit,
            closing_deadline: None,
            reopen_requested: false,
        }
    }

    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    pub fn exit_duration(&self) -> Duration {
        self.exit
    }

    /// The logical `open` flag: opening or open.
    pub fn is_open(&self) -> bool {
        matches!(self.phase, OverlayPhase::Opening | OverlayPhase::Open)
    }

    /// Whether the overlay markup must stay in the tree.
    pub fn is_rendered(&self) -> bool {
        self.phase != OverlayPhase::Idle
    }

    /// Only a fully open overlay reacts to outside clicks.
    pub fn accepts_outside_click(&self) -> bool {
        self.phase == OverlayPhase::Open
    }

    /// Whether a re-open is queued behind the running exit animation.
    pub fn reopen_pending(&self) -> bool {
        self.reopen_requested
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.closing_deadline
    }

    fn advance(&mut self, next: OverlayPhase) {
        debug_assert!(
            self.phase.can_advance_to(next),
            "illegal overlay transition {} -> {}",
            self.phase.name(),
            next.name()
        );
        log::trace!("overlay {} -> {}", self.phase.name(), next.name());
        self.phase = next;
    }

    /// Request the open state. Returns `true` if anything changed.
    ///
    /// During `closing` the request is queued; repeated requests coalesce.
    pub fn open(&mut self) -> bool {
        match self.phase {
            OverlayPhase::Idle => {
                self.advance(OverlayPhase::Opening);
                true
            }
            OverlayPhase::Closing if !self.reopen_requested => {
                self.reopen_requested = true;
                true
            }
            _ => false,
        }
    }

    /// Finish `opening` on the next frame.
    pub fn frame(&mut self) -> bool {
        if self.phase == OverlayPhase::Opening {
            self.advance(OverlayPhase::Open);
            true
        } else {
            false
        }
    }

    /// Start the exit animation. Returns `true` if anything changed.
    ///
    /// During `closing` this cancels a queued re-open. In `idle` it is a
    /// no-op.
    pub fn close(&mut self, now: Instant) -> bool {
        match self.phase {
            OverlayPhase::Opening | OverlayPhase::Open => {
                self.advance(OverlayPhase::Closing);
                self.closing_deadline = Some(now + self.exit);
                true
            }
            OverlayPhase::Closing if self.reopen_requested => {
                self.reopen_requested = false;
                true
            }
            _ => {
                log::debug!("overlay close ignored in phase {}", self.phase.name());
                false
            }
        }
    }

    /// Complete the exit animation if it has elapsed by `now`. Returns
    /// `true` if the phase changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.closing_deadline {
            Some(deadline) if self.phase == OverlayPhase::Closing && deadline <= now => {
                self.closing_deadline = None;
                self.advance(OverlayPhase::Idle);
                if std::mem::take(&mut self.reopen_requested) {
                    self.advance(OverlayPhase::Opening);
                }
                true
            }
            _ => false,
        }
    }
}

impl Default for OverlayLifecycle {
    fn default() -> Self {
        Self::new(DROPDOWN_EXIT)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn full_cycle() {
        let t0 = Instant::now();
        let mut o = OverlayLifecycle::default();
        let mut seen = vec![o.phase()];

        assert!(o.open());
        seen.push(o.phase());
        assert!(o.frame());
        seen.push(o.phase());
        assert!(o.close(t0));
        seen.push(o.phase());
        assert!(!o.poll(t0 + Duration::from_millis(199)));
        assert!(o.poll(t0 + DROPDOWN_EXIT));
        seen.push(o.phase());

        assert_eq!(
            seen,
            vec![
                OverlayPhase::Idle,
                OverlayPhase::Opening,
                OverlayPhase::Open,
                OverlayPhase::Closing,
                OverlayPhase::Idle,
            ]
        );
    }

    #[test]
    fn close_while_opening_goes_through_closing() {
        let t0 = Instant::now();
        let mut o = OverlayLifecycle::default();
        o.open();
        assert!(o.close(t0));
        assert_eq!(o.phase(), OverlayPhase::Closing);
        assert!(!o.accepts_outside_click());
    }

    #[test]
    fn close_in_idle_is_noop() {
        let mut o = OverlayLifecycle::default();
        assert!(!o.close(Instant::now()));
        assert_eq!(o.phase(), OverlayPhase::Idle);
        assert_eq!(o.next_deadline(), None);
    }

    #[test]
    fn reopen_during_closing_coalesces() {
        let t0 = Instant::now();
        let mut o = OverlayLifecycle::default();
        o.open();
        o.frame();
        o.close(t0);
        assert!(o.open());
        assert!(!o.open());
        assert!(o.reopen_pending());
        assert_eq!(o.phase(), OverlayPhase::Closing);

        assert!(o.poll(t0 + DROPDOWN_EXIT));
        assert_eq!(o.phase(), OverlayPhase::Opening);
        assert!(!o.reopen_pending());
    }

    #[test]
    fn close_cancels_queued_reopen() {
        let t0 = Instant::now();
        let mut o = OverlayLifecycle::default();
        o.open();
        o.frame();
        o.close(t0);
        o.open();
        assert!(o.close(t0));
        o.poll(t0 + DROPDOWN_EXIT);
        assert_eq!(o.phase(), OverlayPhase::Idle);
    }

    #[test]
    fn open_flag_and_rendering() {
        let t0 = Instant::now();
        let mut o = OverlayLifecycle::new(NOTIFICATION_EXIT);
        assert!(!o.is_rendered());
        o.open();
        assert!(o.is_open());
        o.frame();
        assert!(o.accepts_outside_click());
        o.close(t0);
        assert!(!o.is_open());
        assert!(o.is_rendered());
        assert_eq!(o.next_deadline(), Some(t0 + NOTIFICATION_EXIT));
    }

    #[test]
    fn transition_table() {
        assert!(OverlayPhase::Open.can_advance_to(OverlayPhase::Closing));
        assert!(!OverlayPhase::Open.can_advance_to(OverlayPhase::Idle));
        assert!(!OverlayPhase::Closing.can_advance_to(OverlayPhase::Open));
    }
}
