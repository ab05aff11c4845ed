//! Transient overlays: dropdown phases, the notification stack, the
//! document-level outside-click registry, and timer plumbing.

pub mod phase;
pub mod queue;
pub mod registry;
pub mod timer;

pub use phase::{OverlayLifecycle, OverlayPhase, DROPDOWN_EXIT, NOTIFICATION_EXIT};
pub use queue::{NotificationQueue, DEFAULT_NOTIFICATION_HEIGHT, NOTIFICATION_GAP};
pub use registry::{ListenerKey, OverlayRegistry};
pub use timer::{earliest, settle, Timed};
