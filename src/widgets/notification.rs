//! Notification widget: a stacked, auto-dismissing toast.
//!
//! Connecting a notification shows it: it joins the top of the shared
//! [`NotificationQueue`](crate::overlay::NotificationQueue), animates in on
//! the next frame and starts its dismiss timer. Closing runs the exit
//! animation; once it has elapsed the toast leaves the queue, emits `close`
//! and asks the document to drop it. Every remaining toast is then moved to
//! its re-packed offset.

use std::any::Any;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::event::{Notification as Outbound, NotificationKind, UiEvent};
use crate::overlay::{
    earliest, OverlayLifecycle, OverlayPhase, DEFAULT_NOTIFICATION_HEIGHT, NOTIFICATION_EXIT,
};
use crate::reflect::{
    attribute_changed, observed, set_property, theme_binding, variant_binding, AttributeBinding,
    Coercion, FieldValue, Reflect,
};
use crate::render::{Invalidation, Listen, ListenerSpec, Patch, View};
use crate::theme::ThemeKey;
use crate::value::format_number;
use crate::widget::{Context, Host, Widget};

use super::{apply_theme, assign, assign_text, themed};

/// Default auto-dismiss delay in milliseconds.
pub const DEFAULT_DURATION_MS: u64 = 5000;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationLevel {
    pub const KEYWORDS: &'static [&'static str] = &["info", "success", "warning", "error"];

    pub fn keyword(self) -> &'static str {
        match self {
            NotificationLevel::Info => "info",
            NotificationLevel::Success => "success",
            NotificationLevel::Warning => "warning",
            NotificationLevel::Error => "error",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<NotificationLevel> {
        match keyword {
            "info" => Some(NotificationLevel::Info),
            "success" => Some(NotificationLevel::Success),
            "warning" => Some(NotificationLevel::Warning),
            "error" => Some(NotificationLevel::Error),
            _ => None,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            NotificationLevel::Info => "i",
            NotificationLevel::Success => "✓",
            NotificationLevel::Warning => "!",
            NotificationLevel::Error => "✕",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub message: String,
    /// Milliseconds until auto-dismiss, `0` for never.
    pub duration: u64,
    #[serde(rename = "type")]
    pub level: NotificationLevel,
    #[serde(flatten)]
    pub theme: ThemeKey,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            message: "Notification message".into(),
            duration: DEFAULT_DURATION_MS,
            level: NotificationLevel::Info,
            theme: ThemeKey::default(),
        }
    }
}

impl NotificationConfig {
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_duration(mut self, millis: u64) -> Self {
        self.duration = millis;
        self
    }

    pub fn with_level(mut self, level: NotificationLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_theme(mut self, theme: ThemeKey) -> Self {
        self.theme = theme;
        self
    }
}

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Notification {
    host: Host,
    message: String,
    duration: u64,
    level: NotificationLevel,
    lifecycle: OverlayLifecycle,
    dismiss_at: Option<Instant>,
    offset: f64,
}

impl Notification {
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_config(NotificationConfig::default().with_message(message))
    }

    pub fn from_config(config: NotificationConfig) -> Self {
        let mut notification = Self {
            host: Host::new(),
            message: NotificationConfig::default().message,
            duration: DEFAULT_DURATION_MS,
            level: NotificationLevel::Info,
            lifecycle: OverlayLifecycle::new(NOTIFICATION_EXIT),
            dismiss_at: None,
            offset: 0.0,
        };
        set_property(&mut notification, "message", FieldValue::text(config.message));
        set_property(&mut notification, "duration", FieldValue::Number(config.duration as f64));
        set_property(&mut notification, "type", FieldValue::text(config.level.keyword()));
        apply_theme(&mut notification, config.theme);
        notification
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn level(&self) -> NotificationLevel {
        self.level
    }

    /// Auto-dismiss delay, `None` when the toast stays until closed.
    pub fn duration(&self) -> Option<Duration> {
        (self.duration > 0).then(|| Duration::from_millis(self.duration))
    }

    pub fn phase(&self) -> OverlayPhase {
        self.lifecycle.phase()
    }

    /// Vertical offset inside the stack, in pixels.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Start the exit animation. Cancels a pending auto-dismiss.
    pub fn close(&mut self, now: Instant) -> bool {
        if !self.lifecycle.close(now) {
            return false;
        }
        self.dismiss_at = None;
        self.host.schedule(Invalidation::Patch);
        true
    }

    fn height(&self) -> f64 {
        match self.host.part_bounds("notification").height {
            h if h > 0.0 => h,
            _ => DEFAULT_NOTIFICATION_HEIGHT,
        }
    }

    fn sync_offset(&mut self, cx: &mut Context<'_>) {
        let id = cx.id();
        if let Some(offset) = cx.registry().queue().offset_of(id) {
            if assign(&mut self.offset, offset) {
                self.host.schedule(Invalidation::Patch);
            }
        }
    }

    /// The exit animation finished: leave the stack and the document.
    fn finish(&mut self, cx: &mut Context<'_>) {
        let id = cx.id();
        cx.registry().queue_mut().remove(id);
        self.host.emit(Outbound::bare(NotificationKind::Close));
        cx.request_removal();
    }

    fn is_shown(&self) -> bool {
        self.lifecycle.phase() == OverlayPhase::Open
    }

    fn is_hiding(&self) -> bool {
        self.lifecycle.phase() == OverlayPhase::Closing
    }

    fn role(&self) -> &'static str {
        match self.level {
            NotificationLevel::Warning | NotificationLevel::Error => "alert",
            NotificationLevel::Info | NotificationLevel::Success => "status",
        }
    }
}

impl Default for Notification {
    fn default() -> Self {
        Self::from_config(NotificationConfig::default())
    }
}

impl Reflect for Notification {
    const ATTRIBUTES: &'static [AttributeBinding<Self>] = &[
        AttributeBinding::new(
            "message",
            Coercion::Text { default: "Notification message" },
            |w: &Notification| FieldValue::text(w.message.as_str()),
            |w: &mut Notification, v: FieldValue| assign_text(&mut w.message, v),
            Invalidation::Patch,
        ),
        AttributeBinding::new(
            "duration",
            Coercion::Integer { default: DEFAULT_DURATION_MS as i64 },
            |w: &Notification| FieldValue::Number(w.duration as f64),
            |w: &mut Notification, v: FieldValue| {
                v.as_number()
                    .is_some_and(|ms| assign(&mut w.duration, ms.max(0.0) as u64))
            },
            Invalidation::None,
        ),
        AttributeBinding::new(
            "type",
            Coercion::Keyword { allowed: NotificationLevel::KEYWORDS, default: "info" },
            |w: &Notification| FieldValue::text(w.level.keyword()),
            |w: &mut Notification, v: FieldValue| {
                v.as_text()
                    .and_then(NotificationLevel::from_keyword)
                    .is_some_and(|level| assign(&mut w.level, level))
            },
            Invalidation::Rebuild,
        ),
        theme_binding(),
        variant_binding(),
    ];
}

impl Widget for Notification {
    fn widget_type(&self) -> &'static str {
        "Notification"
    }

    fn host(&self) -> &Host {
        &self.host
    }

    fn host_mut(&mut self) -> &mut Host {
        &mut self.host
    }

    fn view(&self) -> View {
        themed(View::new("div"), &self.host)
            .part("notification")
            .class("notification")
            .class(self.level.keyword())
            .class_if("show", self.is_shown())
            .class_if("hide", self.is_hiding())
            .attr("role", self.role())
            .style("top", format!("{}px", format_number(self.offset)))
            .child(
                View::new("span")
                    .part("icon")
                    .class("notification-icon")
                    .text(self.level.icon()),
            )
            .child(
                View::new("div")
                    .part("message")
                    .class("notification-message")
                    .text(self.message.as_str()),
            )
            .child(
                View::new("button")
                    .part("close")
                    .class("notification-close")
                    .attr("aria-label", "Close")
                    .focusable(true)
                    .text("×"),
            )
    }

    fn patches(&self) -> Vec<Patch> {
        vec![
            Patch::class("notification", "show", self.is_shown()),
            Patch::class("notification", "hide", self.is_hiding()),
            Patch::style("notification", "top", format!("{}px", format_number(self.offset))),
            Patch::text("message", self.message.as_str()),
        ]
    }

    fn listeners(&self) -> &'static [ListenerSpec] {
        &[("close", Listen::Click)]
    }

    fn observed_attributes(&self) -> Vec<&'static str> {
        observed::<Self>()
    }

    fn attribute_changed(&mut self, name: &str, value: Option<&str>) -> bool {
        attribute_changed(self, name, value)
    }

    fn handle_event(&mut self, part: &str, event: &UiEvent, cx: &mut Context<'_>) {
        if part == "close" && matches!(event, UiEvent::Click(_)) {
            cx.stop_propagation();
            self.close(cx.now());
        }
    }

    fn connected(&mut self, cx: &mut Context<'_>) {
        let (id, now, height) = (cx.id(), cx.now(), self.height());
        cx.registry().queue_mut().show(id, height);
        if self.lifecycle.open() {
            self.dismiss_at = self.duration().map(|d| now + d);
            self.host.schedule(Invalidation::Patch);
        }
        self.sync_offset(cx);
    }

    fn disconnected(&mut self, cx: &mut Context<'_>) {
        let id = cx.id();
        cx.registry().queue_mut().remove(id);
        self.dismiss_at = None;
    }

    fn on_frame(&mut self, cx: &mut Context<'_>) {
        if self.lifecycle.frame() {
            self.host.schedule(Invalidation::Patch);
        }
        let (id, height) = (cx.id(), self.height());
        cx.registry().queue_mut().set_height(id, height);
    }

    fn on_queue_changed(&mut self, cx: &mut Context<'_>) {
        self.sync_offset(cx);
    }

    fn next_deadline(&self) -> Option<Instant> {
        earliest(self.dismiss_at, self.lifecycle.next_deadline())
    }

    fn poll_timers(&mut self, cx: &mut Context<'_>) {
        let now = cx.now();
        if self.dismiss_at.is_some_and(|at| at <= now) {
            log::trace!("notification auto-dismissed");
            self.close(now);
        }
        if self.lifecycle.poll(now) && self.lifecycle.phase() == OverlayPhase::Idle {
            self.finish(cx);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
