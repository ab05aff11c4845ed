//! Dropdown plumbing shared by Select and Menu: the overlay phase machine
//! plus the widget's outside-click registration.

use tokio::time::Instant;

use crate::overlay::{ListenerKey, OverlayLifecycle, OverlayPhase};
use crate::render::View;
use crate::widget::Context;

#[derive(Debug, Default)]
pub(crate) struct Dropdown {
    lifecycle: OverlayLifecycle,
    listener: Option<ListenerKey>,
}

impl Dropdown {
    pub fn phase(&self) -> OverlayPhase {
        self.lifecycle.phase()
    }

    pub fn is_open(&self) -> bool {
        self.lifecycle.is_open()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.lifecycle.next_deadline()
    }

    #[cfg(test)]
    pub fn is_registered(&self) -> bool {
        self.listener.is_some()
    }

    pub fn open(&mut self) -> bool {
        self.lifecycle.open()
    }

    pub fn close(&mut self, now: Instant) -> bool {
        self.lifecycle.close(now)
    }

    pub fn toggle(&mut self, now: Instant) -> bool {
        if self.lifecycle.is_open() {
            self.lifecycle.close(now)
        } else {
            self.lifecycle.open()
        }
    }

    pub fn frame(&mut self) -> bool {
        self.lifecycle.frame()
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        self.lifecycle.poll(now)
    }

    /// Close in response to a document click outside the widget. Ignored
    /// until fully open so the opening click cannot close it again.
    pub fn outside_click(&mut self, now: Instant) -> bool {
        self.lifecycle.accepts_outside_click() && self.lifecycle.close(now)
    }

    pub fn connect(&mut self, cx: &mut Context<'_>) {
        if self.listener.is_none() {
            let id = cx.id();
            self.listener = Some(cx.registry().register_outside_click(id));
        }
    }

    pub fn disconnect(&mut self, cx: &mut Context<'_>) {
        if let Some(key) = self.listener.take() {
            cx.registry().unregister(key);
        }
    }

    /// The dropdown container while it must stay in the tree: `open` once
    /// fully open, `closing` during the exit animation.
    pub fn container(&self, class: &'static str) -> Option<View> {
        if !self.lifecycle.is_rendered() {
            return None;
        }
        Some(
            View::new("div")
                .part("dropdown")
                .class(class)
                .class_if("open", self.phase() == OverlayPhase::Open)
                .class_if("closing", self.phase() == OverlayPhase::Closing),
        )
    }
}
