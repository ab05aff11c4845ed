//! Headless testing framework: Pilot, snapshot helpers.
//!
//! Use the [`Pilot`] to drive a [`Document`](crate::document::Document) the
//! way a user would, without a platform. Use [`render_markup`] and related
//! helpers to capture a widget's internals as text for inline snapshots.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{attribute_listing, part_markup, render_markup, render_styled_markup};
