// File: crates/sparkline-core/src/scale.rs
// Summary: Value (Y) scale, range padding and flatness detection.

/// Value Y coordinate (e.g., price).
pub type Value = f64;

/// Smallest span a scale will divide by.
const MIN_SPAN: f64 = 1e-12;

/// Vertical value scale mapping a data range to [top, bottom] in screen units.
/// Higher values map to smaller y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueScale {
    pub top_px: f64,
    pub bottom_px: f64,
    pub vmin: Value,
    pub vmax: Value,
}

impl ValueScale {
    pub fn new_linear(top_px: f64, bottom_px: f64, vmin: Value, vmax: Value) -> Self {
        let mut s = Self { top_px, bottom_px, vmin, vmax };
        if (s.vmax - s.vmin).abs() < MIN_SPAN { s.vmax = s.vmin + 1.0; }
        s
    }
    /// Works on half values so spans near `f64::MAX` stay finite.
    #[inline]
    pub fn to_px(&self, y: Value) -> f64 {
        let half_span = (self.vmax * 0.5 - self.vmin * 0.5).max(MIN_SPAN * 0.5);
        self.bottom_px - ((y * 0.5 - self.vmin * 0.5) / half_span) * (self.bottom_px - self.top_px)
    }
}

/// Min and max of `values`, or `None` for an empty slice.
pub fn value_bounds(values: impl IntoIterator<Item = Value>) -> Option<(Value, Value)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Widen `[min, max]` by `ratio * (max - min)`, split evenly above and below.
/// The result is clamped to the finite range.
pub fn padded_range(min: Value, max: Value, ratio: f64) -> (Value, Value) {
    let half = (max * 0.5 - min * 0.5) * ratio.max(0.0);
    ((min - half).max(f64::MIN), (max + half).min(f64::MAX))
}

/// Outcome of the flatness check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flatness {
    /// Range is meaningful; use the value mapping.
    Varied,
    /// Range is below the relative threshold.
    BelowThreshold,
    /// min == max, or a zero minimum with a negligible range.
    Degenerate,
}

impl Flatness {
    pub fn is_flat(&self) -> bool { !matches!(self, Flatness::Varied) }
}

/// `(max - min) / |min| < threshold`, guarded so it never divides by zero.
/// A zero minimum compares the absolute range against `zero_epsilon` instead.
pub fn flatness(min: Value, max: Value, threshold: f64, zero_epsilon: f64) -> Flatness {
    let range = max - min;
    if range <= 0.0 {
        return Flatness::Degenerate;
    }
    if min == 0.0 {
        return if range < zero_epsilon { Flatness::Degenerate } else { Flatness::Varied };
    }
    if range / min.abs() < threshold { Flatness::BelowThreshold } else { Flatness::Varied }
}
