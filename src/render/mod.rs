//! Rendering: view descriptions, invalidation scheduling, in-place patches,
//! and the rebuild/reconcile cycle.

pub mod invalidation;
pub mod patch;
pub mod surface;
pub mod view;

pub use invalidation::{Invalidation, RenderScheduler};
pub use patch::Patch;
pub use surface::{Listen, ListenerSpec, Surface};
pub use view::View;
