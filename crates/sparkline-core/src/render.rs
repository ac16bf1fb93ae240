// File: crates/sparkline-core/src/render.rs
// Summary: Backend-neutral rendering seam: one trait, many chart backends picked at composition time.

use crate::series::{SampledSeries, Trend};
use crate::theme::{Rgba, Theme};

/// Per-chart styling resolved from a theme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesStyle {
    pub theme: Theme,
    pub stroke_width: f32,
    pub draw_labels: bool,
    pub label_size: f32,
    /// Colour up/down by trend; when false every non-flat series uses `theme.up`.
    pub semantic_colors: bool,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self { theme: Theme::dark(), stroke_width: 1.5, draw_labels: false, label_size: 10.0, semantic_colors: true }
    }
}

impl SeriesStyle {
    pub fn with_theme(theme: Theme) -> Self {
        Self { theme, ..Self::default() }
    }

    /// Stroke colour for `series`: muted when flat, otherwise by trend.
    pub fn stroke_for(&self, series: &SampledSeries) -> Rgba {
        match series.trend() {
            Trend::Flat => self.theme.muted,
            Trend::Down if self.semantic_colors => self.theme.down,
            _ => self.theme.up,
        }
    }

    /// Fill colour: the stroke colour at the theme's fill alpha.
    pub fn fill_for(&self, series: &SampledSeries) -> Rgba {
        self.stroke_for(series).with_alpha(self.theme.fill_alpha)
    }
}

/// Draws a sampled series with a given style into some backend-specific output.
pub trait SeriesRenderer {
    type Output;
    type Error;

    fn render_series(&self, series: &SampledSeries, style: &SeriesStyle) -> Result<Self::Output, Self::Error>;
}

impl<R: SeriesRenderer + ?Sized> SeriesRenderer for &R {
    type Output = R::Output;
    type Error = R::Error;

    fn render_series(&self, series: &SampledSeries, style: &SeriesStyle) -> Result<Self::Output, Self::Error> {
        (**self).render_series(series, style)
    }
}
