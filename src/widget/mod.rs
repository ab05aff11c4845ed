//! Widget system: trait, host, lifecycle.

pub mod host;
pub mod lifecycle;
pub mod traits;

pub use host::Host;
pub use lifecycle::{LifecycleEvent, LifecycleTracker, WidgetId};
pub use traits::{flush, Capture, Context, Widget};
