//! Numeric ranges: clamp to `[min, max]`, snap to the `step` grid, and round
//! to the step's decimal precision.

/// Step used when a configured step is missing, non-finite, or not positive.
pub const DEFAULT_STEP: f64 = 1.0;

/// Upper bound on the precision used for rounding.
const MAX_PRECISION: usize = 15;

/// Slack when counting how many whole steps fit in a span, so `0.3 / 0.1`
/// (which is `2.9999999999999996`) still counts as three steps.
const STEP_EPSILON: f64 = 1e-9;

/// Number of digits after the decimal point in the shortest string form of
/// `step`.
///
/// `1` has precision 0, `0.1` has precision 1, `0.25` has precision 2.
pub fn step_precision(step: f64) -> usize {
    if !step.is_finite() {
        return 0;
    }
    let repr = step.abs().to_string();
    match repr.find('.') {
        Some(dot) => (repr.len() - dot - 1).min(MAX_PRECISION),
        None => 0,
    }
}

/// Round `value` to `precision` decimal places via its decimal string form.
///
/// Going through the formatted string removes binary drift such as
/// `0.1 + 0.2 = 0.30000000000000004`. Negative zero is normalized to zero.
pub fn round_to_precision(value: f64, precision: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let precision = precision.min(MAX_PRECISION);
    let rounded = format!("{value:.precision$}").parse::<f64>().unwrap_or(value);
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

// ---------------------------------------------------------------------------
// NumericRange
// ---------------------------------------------------------------------------

/// A bounded value domain with a step grid anchored at `min`.
///
/// After [`snap`](Self::snap), a value always satisfies `min <= value <= max`
/// and lies on `min + k * step` for some whole `k`, rounded to the range's
/// precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    min: f64,
    max: f64,
    step: f64,
}

impl Default for NumericRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: DEFAULT_STEP,
        }
    }
}

impl NumericRange {
    /// Create a range. A non-positive or non-finite `step` falls back to
    /// [`DEFAULT_STEP`].
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        Self {
            min,
            max,
            step: sanitize_step(step),
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Copy of this range with a different minimum.
    pub fn with_min(self, min: f64) -> Self {
        Self { min, ..self }
    }

    /// Copy of this range with a different maximum.
    pub fn with_max(self, max: f64) -> Self {
        Self { max, ..self }
    }

    /// Copy of this range with a different step (sanitized).
    pub fn with_step(self, step: f64) -> Self {
        Self {
            step: sanitize_step(step),
            ..self
        }
    }

    /// `max - min`, never negative.
    pub fn span(&self) -> f64 {
        (self.max - self.min).max(0.0)
    }

    /// Decimal places values on this grid are rounded to.
    ///
    /// The larger of the step's and the minimum's precision, so a grid anchored
    /// at a fractional minimum keeps its fraction.
    pub fn precision(&self) -> usize {
        step_precision(self.step).max(step_precision(self.min))
    }

    /// Clamp into `[min, max]`. When `min > max` the result is `min`.
    /// `NaN` clamps to `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.min(self.max).max(self.min)
    }

    /// Clamp, snap to the nearest grid point, and round to precision.
    ///
    /// Ties between two grid points round the step index half away from
    /// zero. The step index is capped so an off-grid `max` is never exceeded.
    pub fn snap(&self, value: f64) -> f64 {
        let bounded = self.clamp(value);
        let max_steps = (self.span() / self.step + STEP_EPSILON).floor();
        let steps = ((bounded - self.min) / self.step).round().clamp(0.0, max_steps);
        let stepped = self.min + steps * self.step;
        self.clamp(round_to_precision(stepped, self.precision()))
    }

    /// Position of `value` within the range as a fraction in `[0, 1]`.
    ///
    /// A zero-width range reports `0.0`.
    pub fn fraction(&self, value: f64) -> f64 {
        let span = self.span();
        if span <= 0.0 {
            return 0.0;
        }
        ((self.clamp(value) - self.min) / span).clamp(0.0, 1.0)
    }

    /// Value at `fraction` of the range, unclamped and unsnapped.
    pub fn value_at(&self, fraction: f64) -> f64 {
        self.min + fraction * (self.max - self.min)
    }

    /// Whether `value` sits on the step grid within rounding tolerance.
    pub fn is_on_grid(&self, value: f64) -> bool {
        let steps = ((value - self.min) / self.step).round();
        let nearest = round_to_precision(self.min + steps * self.step, self.precision());
        (value - nearest).abs() <= STEP_EPSILON * value.abs().max(1.0)
    }
}

fn sanitize_step(step: f64) -> f64 {
    if step.is_finite() && step > 0.0 {
        step
    } else {
        DEFAULT_STEP
    }
}

// ===========================================================================
// Tests
// ===========================================================================
