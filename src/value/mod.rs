//! Shared value utilities: range clamping, step snapping, precision, and
//! lenient numeric parsing.
//!
//! - [`NumericRange`]: `[min, max]` with a `step` grid; every numeric widget
//!   funnels its value through [`NumericRange::snap`].
//! - [`parse_float`] / [`parse_int`]: prefix parsing with the same leniency as
//!   attribute values written by hand (`"12.5px"` parses as `12.5`).

pub mod number;
pub mod range;

pub use number::{format_number, parse_float, parse_int};
pub use range::{round_to_precision, step_precision, NumericRange, DEFAULT_STEP};
