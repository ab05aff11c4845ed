//! Gesture lifecycle: begin, update, end, cancel.
//!
//! A [`GestureEngine`] belongs to exactly one widget and holds at most one
//! [`DragSession`]. Updates produce continuous `input` values; ending
//! produces at most one commit. Events that arrive without an active
//! session are ignored.

use crate::geometry::{Axis, Point, Rect};
use crate::value::NumericRange;

use super::drag::DragSession;

/// What a pointer cancel does to the dragged value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CancelPolicy {
    /// Restore the value the drag started from. No commit.
    #[default]
    RollBack,
    /// Treat the cancel exactly like a release.
    Commit,
}

/// Outcome of ending or cancelling a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEnd {
    /// The value changed during the drag; notify a commit.
    Commit(f64),
    /// The drag was cancelled; the value must return to the start value.
    Restore(f64),
    /// Nothing to report.
    Unchanged,
}

#[derive(Debug, Clone, Default)]
pub struct GestureEngine {
    session: Option<DragSession>,
    policy: CancelPolicy,
}

impl GestureEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: CancelPolicy) -> Self {
        Self {
            session: None,
            policy,
        }
    }

    pub fn policy(&self) -> CancelPolicy {
        self.policy
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Start a drag. Returns `false` if one is already running.
    pub fn begin(&mut self, axis: Axis, pointer: Point, value: f64, track: Rect) -> bool {
        if self.session.is_some() {
            log::debug!("drag begin ignored: a session is already active");
            return false;
        }
        self.session = Some(DragSession::begin(axis, pointer, value, track));
        true
    }

    /// Move the pointer. Returns the new value when it differs from the
    /// last one; every such value must be emitted as `input`.
    pub fn update(&mut self, range: &NumericRange, pointer: Point) -> Option<f64> {
        let Some(session) = self.session.as_mut() else {
            log::debug!("drag move ignored: no active session");
            return None;
        };
        let value = session.value_at(range, pointer);
        if value == session.last_value {
            return None;
        }
        session.last_value = value;
        Some(value)
    }

    /// Release the pointer and drop the session.
    pub fn end(&mut self) -> DragEnd {
        match self.session.take() {
            Some(s) if s.last_value != s.start_value => DragEnd::Commit(s.last_value),
            Some(_) => DragEnd::Unchanged,
            None => {
                log::debug!("drag end ignored: no active session");
                DragEnd::Unchanged
            }
        }
    }

    /// Abort the drag according to the cancel policy.
    pub fn cancel(&mut self) -> DragEnd {
        match self.policy {
            CancelPolicy::Commit => self.end(),
            CancelPolicy::RollBack => match self.session.take() {
                Some(s) if s.last_value != s.start_value => DragEnd::Restore(s.start_value),
                _ => DragEnd::Unchanged,
            },
        }
    }
}
