// File: crates/sparkline-core/src/types.rs
// Summary: Shared types and constants (plot sizes, margins, plot rectangle).

use serde::{Deserialize, Serialize};

/// Default plot width in abstract units (mini chart).
pub const WIDTH: f64 = 80.0;
/// Default plot height in abstract units (mini chart).
pub const HEIGHT: f64 = 30.0;

/// Plot margins, in the same units as width/height.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Same margin on every side.
    pub const fn uniform(m: u32) -> Self {
        Self::new(m, m, m, m)
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        Self::uniform(2)
    }
}

/// Drawable area after margins. `top < bottom` in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotRect {
    /// Inset a `width` × `height` surface. Margins larger than the surface collapse
    /// to the centre line instead of inverting the rectangle.
    pub fn inset(width: f64, height: f64, insets: &Insets) -> Self {
        let mut left = insets.left as f64;
        let mut right = width - insets.right as f64;
        if right < left {
            left = width * 0.5;
            right = left;
        }
        let mut top = insets.top as f64;
        let mut bottom = height - insets.bottom as f64;
        if bottom < top {
            top = height * 0.5;
            bottom = top;
        }
        Self { left, top, right, bottom }
    }
    pub fn width(&self) -> f64 { self.right - self.left }
    pub fn height(&self) -> f64 { self.bottom - self.top }
}
