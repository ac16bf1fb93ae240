// File: crates/sparkline-demo/src/main.rs
// Summary: Demo loads a price series (CSV or JSON envelope), samples it with a preset and writes SVG + PNG sparklines.
// Notes:
// - Usage: sparkline-demo [input] [preset] [theme]
// - SPARKLINE_CONFIG may point at a JSON config payload; `<preset>.*` keys overlay the preset.
// - RUST_LOG controls verbosity (default `info`).

use anyhow::{Context, Result};
use sparkline_core::{presets, theme, Observation, SampledSeries, SeriesRenderer, SeriesStyle, SvgRenderer};
use sparkline_feed::{parse_observations, RemoteConfig};
use sparkline_render_skia::SkiaRenderer;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let raw = args.next().unwrap_or_else(|| "crates/sparkline-demo/data/intraday_1m.csv".to_string());
    let preset = args.next().unwrap_or_else(|| "intraday".to_string());
    let theme_name = args.next().unwrap_or_else(|| "dark".to_string());

    let path = PathBuf::from(&raw);
    if !path.exists() {
        anyhow::bail!("file not found: {}", path.display());
    }
    tracing::info!(input = %path.display(), %preset, theme = %theme_name, "loading series");

    let observations = load_observations(&path)
        .with_context(|| format!("failed to load '{}'", path.display()))?;
    tracing::info!(rows = observations.len(), "loaded observations");

    let config = load_config()?;
    let options = config.sample_options(&preset, presets::find(&preset));
    let series = sparkline_core::try_sample(&observations, &options)?;
    log_summary(&series);

    let mut style = SeriesStyle::with_theme(theme::find(&theme_name));
    style.draw_labels = config.get_bool(&format!("{preset}.labels"), options.height >= 60.0);

    let svg = SvgRenderer::new(options.width, options.height).render_series(&series, &style)?;
    let out_svg = out_name_with(&path, &preset, "svg")?;
    std::fs::write(&out_svg, svg).with_context(|| format!("writing {}", out_svg.display()))?;
    tracing::info!(path = %out_svg.display(), "wrote svg");

    let skia = SkiaRenderer::new(options.width.round() as i32, options.height.round() as i32).with_scale(4.0);
    let out_png = out_name_with(&path, &preset, "png")?;
    skia.render_to_png(&series, &style, &out_png)?;
    tracing::info!(path = %out_png.display(), "wrote png");

    Ok(())
}

fn load_observations(path: &Path) -> Result<Vec<Observation>> {
    let ext = path.extension().map(|e| e.to_string_lossy().to_lowercase()).unwrap_or_default();
    match ext.as_str() {
        "json" => {
            let body = std::fs::read_to_string(path)?;
            Ok(parse_observations(&body)?)
        }
        _ => load_csv(path),
    }
}

/// Load a `timestamp,price`-style CSV. Header names are matched loosely; rows that fail to
/// parse are kept as invalid observations so the sampler's filtering decides what survives.
fn load_csv(path: &Path) -> Result<Vec<Observation>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.to_lowercase()).collect::<Vec<_>>();
    tracing::debug!(?headers, "csv headers");

    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));
    let i_time = idx(&["timestamp", "time", "date", "datetime", "open_time"])
        .context("no timestamp/time/date column")?;
    let i_value = idx(&["price", "value", "close", "c", "adj_close"]).context("no price/value/close column")?;

    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let (Some(t), Some(v)) = (rec.get(i_time), rec.get(i_value)) else { continue };
        let value = v.parse::<f64>().unwrap_or(f64::NAN);
        out.push(Observation::new(value, t.to_string()));
    }
    Ok(out)
}

fn load_config() -> Result<RemoteConfig> {
    let mut config = RemoteConfig::new();
    if let Ok(path) = std::env::var("SPARKLINE_CONFIG") {
        let body = std::fs::read_to_string(&path).with_context(|| format!("reading config {path}"))?;
        let merged = config.merge_json(&body)?;
        tracing::info!(%path, merged, "applied config");
    }
    Ok(config)
}

fn log_summary(series: &SampledSeries) {
    let stats = series.stats;
    tracing::info!(
        received = stats.received,
        valid = stats.valid,
        after_dedupe = stats.after_dedupe,
        points = series.len(),
        flat = series.is_flat,
        trend = ?series.trend(),
        "sampled"
    );
    if let Some(d) = series.degradation {
        tracing::warn!(degradation = ?d, "series degraded");
    }
    for label in series.axis_labels() {
        tracing::debug!(index = label.index, x = label.x, text = %label.text, "axis label");
    }
}

/// Produce output file name like target/out/sparkline_<stem>_<preset>.<ext>
fn out_name_with(input: &Path, preset: &str, ext: &str) -> Result<PathBuf> {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("series");
    let mut out = PathBuf::from("target/out");
    std::fs::create_dir_all(&out).with_context(|| format!("creating {}", out.display()))?;
    out.push(format!("sparkline_{stem}_{preset}.{ext}"));
    Ok(out)
}
