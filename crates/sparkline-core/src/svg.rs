// File: crates/sparkline-core/src/svg.rs
// Summary: SVG backend for sampled series (web views and headless snapshots).

use std::fmt::Write as _;

use crate::render::{SeriesRenderer, SeriesStyle};
use crate::series::{fmt_coord, SampledSeries};
use crate::types::{HEIGHT, WIDTH};

/// Renders a sampled series into a standalone SVG document.
/// `width`/`height` must match the options the series was sampled with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SvgRenderer {
    pub width: f64,
    pub height: f64,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self { width: WIDTH, height: HEIGHT }
    }
}

impl SvgRenderer {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl SeriesRenderer for SvgRenderer {
    type Output = String;
    type Error = std::fmt::Error;

    fn render_series(&self, series: &SampledSeries, style: &SeriesStyle) -> Result<String, std::fmt::Error> {
        let (w, h) = (fmt_coord(self.width), fmt_coord(self.height));
        let mut out = String::with_capacity(256 + series.len() * 12);
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        )?;
        writeln!(out, r#"  <rect width="100%" height="100%" fill="{}"/>"#, style.theme.background.to_hex())?;

        if series.has_data() {
            if let Some(fill) = &series.fill_path {
                writeln!(out, r#"  <path d="{}" fill="{}" stroke="none"/>"#, fill.to_svg_d(), style.fill_for(series).to_hex())?;
            }
            writeln!(
                out,
                r#"  <polyline points="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linejoin="round"/>"#,
                series.polyline(),
                style.stroke_for(series).to_hex(),
                style.stroke_width,
            )?;
            if style.draw_labels {
                let baseline = fmt_coord(self.height - 1.0);
                for label in series.axis_labels() {
                    writeln!(
                        out,
                        r#"  <text x="{}" y="{}" font-size="{}" fill="{}" text-anchor="middle">{}</text>"#,
                        fmt_coord(label.x),
                        baseline,
                        style.label_size,
                        style.theme.label.to_hex(),
                        escape(&label.text),
                    )?;
                }
            }
        }

        writeln!(out, "</svg>")?;
        Ok(out)
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
