//! Per-instance plumbing shared by every widget.
//!
//! A [`Host`] is what a custom element gets from its platform: an attribute
//! map, a render queue, a rendered internal tree, an outbox for outbound
//! notifications, and the layout geometry of its parts.

use std::collections::HashMap;

use crate::event::Notification;
use crate::geometry::Rect;
use crate::reflect::AttributeMap;
use crate::render::{Invalidation, RenderScheduler, Surface};
use crate::theme::ThemeKey;

#[derive(Debug)]
pub struct Host {
    attributes: AttributeMap,
    scheduler: RenderScheduler,
    surface: Surface,
    outbox: Vec<Notification>,
    bounds: HashMap<String, Rect>,
    theme: ThemeKey,
}

impl Host {
    /// A fresh host with its first render already scheduled.
    pub fn new() -> Self {
        let mut scheduler = RenderScheduler::new();
        scheduler.schedule(Invalidation::Rebuild);
        Self {
            attributes: AttributeMap::new(),
            scheduler,
            surface: Surface::new(),
            outbox: Vec::new(),
            bounds: HashMap::new(),
            theme: ThemeKey::default(),
        }
    }

    // ── Attributes ───────────────────────────────────────────────────

    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    /// Store an attribute written from outside. Returns `false` when the
    /// value is unchanged.
    pub(crate) fn store_attribute(&mut self, name: &str, value: Option<&str>) -> bool {
        self.attributes.set(name, value)
    }

    /// Mirror a property into its attribute without notifying the widget.
    pub fn reflect(&mut self, name: &str, value: Option<String>) {
        if self.attributes.set(name, value.as_deref()) {
            log::trace!("reflected `{name}` = {value:?}");
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    pub fn schedule(&mut self, kind: Invalidation) {
        self.scheduler.schedule(kind);
    }

    pub fn scheduler(&self) -> &RenderScheduler {
        &self.scheduler
    }

    pub(crate) fn take_invalidation(&mut self) -> Invalidation {
        self.scheduler.take()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    // ── Theme ────────────────────────────────────────────────────────

    pub fn theme(&self) -> ThemeKey {
        self.theme
    }

    /// Returns `true` if the key changed.
    pub fn set_theme(&mut self, theme: ThemeKey) -> bool {
        if self.theme == theme {
            return false;
        }
        self.theme = theme;
        true
    }

    // ── Notifications ────────────────────────────────────────────────

    pub fn emit(&mut self, notification: Notification) {
        log::trace!("emit `{}`", notification.name());
        self.outbox.push(notification);
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.outbox)
    }

    // ── Geometry ─────────────────────────────────────────────────────

    /// Record the laid-out rectangle of `part`.
    pub fn set_part_bounds(&mut self, part: &str, rect: Rect) {
        self.bounds.insert(part.to_owned(), rect);
    }

    /// Laid-out rectangle of `part`, or [`Rect::EMPTY`] if never reported.
    pub fn part_bounds(&self, part: &str) -> Rect {
        self.bounds.get(part).copied().unwrap_or(Rect::EMPTY)
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}
