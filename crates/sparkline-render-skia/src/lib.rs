// File: crates/sparkline-render-skia/src/lib.rs
// Summary: Skia backend for sampled series; draws on a CPU raster surface and encodes PNG.
// Notes:
// - Native counterpart of `sparkline_core::SvgRenderer`. Both implement `SeriesRenderer`,
//   so callers choose a backend once when wiring the chart, not per draw call.

use anyhow::Result;
use skia_safe as skia;
use tracing::debug;

use sparkline_core::grid::linspace;
use sparkline_core::{PathCommand, Rgba, SampledSeries, SeriesRenderer, SeriesStyle};

/// Raster renderer producing PNG bytes. `width`/`height` must match the options the
/// series was sampled with; `scale` multiplies both for high-density screens.
#[derive(Clone, Copy, Debug)]
pub struct SkiaRenderer {
    pub width: i32,
    pub height: i32,
    pub scale: f32,
    /// Faint horizontal guide lines behind the series.
    pub grid_lines: usize,
}

impl SkiaRenderer {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height, scale: 1.0, grid_lines: 0 }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale.max(0.1);
        self
    }

    pub fn with_grid_lines(mut self, n: usize) -> Self {
        self.grid_lines = n;
        self
    }

    /// Surface size in device pixels.
    pub fn pixel_size(&self) -> (i32, i32) {
        let w = ((self.width as f32) * self.scale).round().max(1.0) as i32;
        let h = ((self.height as f32) * self.scale).round().max(1.0) as i32;
        (w, h)
    }

    /// Render `series` and write the PNG to `output_png_path`.
    pub fn render_to_png(
        &self,
        series: &SampledSeries,
        style: &SeriesStyle,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let bytes = self.render_series(series, style)?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }
}

impl SeriesRenderer for SkiaRenderer {
    type Output = Vec<u8>;
    type Error = anyhow::Error;

    fn render_series(&self, series: &SampledSeries, style: &SeriesStyle) -> Result<Vec<u8>> {
        let (w, h) = self.pixel_size();
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| anyhow::anyhow!("failed to create {w}x{h} raster surface"))?;
        let canvas = surface.canvas();
        canvas.scale((self.scale, self.scale));
        canvas.clear(color(style.theme.background));

        if self.grid_lines > 0 {
            draw_grid(canvas, self.width as f32, self.height as f32, self.grid_lines, style.theme.grid);
        }

        if series.has_data() {
            if let Some(fill) = &series.fill_path {
                draw_fill(canvas, &fill.commands, style.fill_for(series));
            }
            draw_line(canvas, series, style.stroke_width, style.stroke_for(series));
            if style.draw_labels {
                draw_labels(canvas, series, self.height as f32, style);
            }
        } else {
            debug!("rendering empty series as background only");
        }

        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }
}

// ---- helpers ----------------------------------------------------------------

fn color(c: Rgba) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn draw_grid(canvas: &skia::Canvas, w: f32, h: f32, lines: usize, c: Rgba) {
    let mut paint = skia::Paint::default();
    paint.set_color(color(c));
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);
    // skip the outer edges; they coincide with the surface border
    for y in linspace(0.0, h as f64, lines + 2).into_iter().skip(1).take(lines) {
        canvas.draw_line((0.0, y as f32), (w, y as f32), &paint);
    }
}

fn draw_fill(canvas: &skia::Canvas, commands: &[PathCommand], c: Rgba) {
    let mut path = skia::Path::new();
    for cmd in commands {
        match *cmd {
            PathCommand::MoveTo(x, y) => { path.move_to((x as f32, y as f32)); }
            PathCommand::LineTo(x, y) => { path.line_to((x as f32, y as f32)); }
            PathCommand::Close => { path.close(); }
        }
    }
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color(c));
    canvas.draw_path(&path, &paint);
}

fn draw_line(canvas: &skia::Canvas, series: &SampledSeries, stroke_width: f32, c: Rgba) {
    let mut points = series.points.iter();
    let first = match points.next() {
        Some(p) => p,
        None => return,
    };
    let mut path = skia::Path::new();
    path.move_to((first.x as f32, first.y as f32));
    for p in points {
        path.line_to((p.x as f32, p.y as f32));
    }

    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(stroke_width);
    stroke.set_stroke_join(skia::paint::Join::Round);
    stroke.set_color(color(c));
    canvas.draw_path(&path, &stroke);
}

fn draw_labels(canvas: &skia::Canvas, series: &SampledSeries, h: f32, style: &SeriesStyle) {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_color(color(style.theme.label));
    let mut font = skia::Font::default();
    font.set_size(style.label_size);

    for label in series.axis_labels() {
        let (width, _) = font.measure_str(&label.text, Some(&paint));
        let x = (label.x as f32 - width * 0.5).max(0.0);
        canvas.draw_str(&label.text, (x, h - 1.0), &font, &paint);
    }
}
