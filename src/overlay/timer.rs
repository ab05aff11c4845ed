//! Deadline-driven timers.
//!
//! Nothing in the crate sleeps on its own. Anything with pending timers
//! implements [`Timed`], and callers either poll it with an explicit `now`
//! or hand it to [`settle`], which sleeps on the tokio clock until every
//! deadline has fired.

use tokio::time::{sleep_until, Instant};

/// Something with time-based state transitions.
pub trait Timed {
    /// The earliest pending deadline, if any.
    fn next_deadline(&self) -> Option<Instant>;

    /// Fire everything due at or before `now`.
    fn poll(&mut self, now: Instant);
}

/// Sleep until `timed` has no pending deadlines, firing each as it comes
/// due. Returns the number of wake-ups.
pub async fn settle<T: Timed + ?Sized>(timed: &mut T) -> usize {
    let mut wakeups = 0;
    while let Some(deadline) = timed.next_deadline() {
        sleep_until(deadline).await;
        timed.poll(Instant::now().max(deadline));
        wakeups += 1;
    }
    wakeups
}

/// The earlier of two optional deadlines.
pub fn earliest(a: Option<Instant>, b: Option<Instant>) -> Option<Instant> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}
