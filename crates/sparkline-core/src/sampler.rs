// File: crates/sparkline-core/src/sampler.rs
// Summary: The time-series sampler: filter, sort, thin, flatness check, cap, map to plot space.
// Notes:
// - Pure and synchronous. Every call re-derives its output from the observations it is
//   given, so it is safe to run on every poll tick or re-render.
// - Malformed input never errors. Empty, single-point and degenerate series come back
//   as well-formed results tagged with a `Degradation`.

use tracing::{debug, trace, warn};

use crate::dedupe::thin_flat_runs;
use crate::downsample;
use crate::error::{Degradation, SampleError};
use crate::grid::linspace;
use crate::labels::label_positions;
use crate::observation::{Observation, ValueDomain};
use crate::options::{Downsample, SampleOptions};
use crate::scale::{flatness, padded_range, value_bounds, Flatness, ValueScale};
use crate::series::{FillPath, Reading, SampleStats, SampledPoint, SampledSeries};
use crate::types::PlotRect;

/// Sample `observations` for plotting. Invalid options are replaced by defaults.
pub fn sample(observations: &[Observation], options: &SampleOptions) -> SampledSeries {
    if let Err(e) = options.validate() {
        warn!(error = %e, "invalid sampler options; falling back to defaults for bad fields");
        return run(observations, &options.sanitized());
    }
    run(observations, options)
}

/// Like [`sample`], but rejects invalid options instead of sanitizing them.
pub fn try_sample(observations: &[Observation], options: &SampleOptions) -> Result<SampledSeries, SampleError> {
    options.validate()?;
    Ok(run(observations, options))
}

/// Drop invalid observations and sort the rest by (instant, value).
///
/// Sorting on the value as a tiebreak makes the result independent of input order
/// even when the feed repeats a timestamp.
pub fn canonical_readings(observations: &[Observation], domain: ValueDomain) -> Vec<Reading> {
    let mut readings: Vec<Reading> = observations
        .iter()
        .filter_map(|o| o.valid_instant(domain).map(|instant_ms| Reading { instant_ms, value: o.value }))
        .collect();
    readings.sort_by(|a, b| a.instant_ms.cmp(&b.instant_ms).then(a.value.total_cmp(&b.value)));
    readings
}

fn run(observations: &[Observation], o: &SampleOptions) -> SampledSeries {
    let readings = canonical_readings(observations, o.domain);
    let mut stats = SampleStats { received: observations.len(), valid: readings.len(), after_dedupe: 0 };
    if stats.valid < stats.received {
        debug!(dropped = stats.received - stats.valid, received = stats.received, "dropped invalid observations");
    }

    let rect = PlotRect::inset(o.width, o.height, &o.insets);
    let mid_y = o.height * 0.5;

    match readings.as_slice() {
        [] => {
            debug!(received = stats.received, "no valid observations");
            return SampledSeries::empty(stats);
        }
        [only] => {
            stats.after_dedupe = 1;
            let points = vec![
                SampledPoint { x: rect.left, y: mid_y, value: only.value, instant_ms: only.instant_ms },
                SampledPoint { x: rect.right, y: mid_y, value: only.value, instant_ms: only.instant_ms },
            ];
            return finish(points, true, None, Some(Degradation::InsufficientData), stats, &rect, o);
        }
        _ => {}
    }

    let thinned = thin_flat_runs(&readings, o.dedupe_epsilon, o.dedupe_run);
    stats.after_dedupe = thinned.len();
    trace!(valid = stats.valid, kept = thinned.len(), "thinned flat runs");

    // Flatness is judged on the thinned series, before any point cap.
    let (min, max) = match value_bounds(thinned.iter().map(|r| r.value)) {
        Some(b) => b,
        None => return SampledSeries::empty(stats),
    };
    let flat = flatness(min, max, o.flat_threshold, o.zero_range_epsilon);
    let degradation = (flat == Flatness::Degenerate).then_some(Degradation::DegenerateRange);

    let capped = match o.max_points {
        Some(max_points) if thinned.len() > max_points => match o.downsample {
            Downsample::Stride => downsample::stride(&thinned, max_points),
            Downsample::Lttb => downsample::lttb(&thinned, max_points),
        },
        _ => thinned,
    };

    let xs = linspace(rect.left, rect.right, capped.len());
    let (points, value_range) = if flat.is_flat() {
        let points = capped
            .iter()
            .zip(&xs)
            .map(|(r, &x)| SampledPoint { x, y: mid_y, value: r.value, instant_ms: r.instant_ms })
            .collect();
        (points, None)
    } else {
        let (lo, hi) = padded_range(min, max, o.padding_ratio);
        let scale = ValueScale::new_linear(rect.top, rect.bottom, lo, hi);
        let points = capped
            .iter()
            .zip(&xs)
            .map(|(r, &x)| SampledPoint { x, y: scale.to_px(r.value), value: r.value, instant_ms: r.instant_ms })
            .collect();
        (points, Some((lo, hi)))
    };

    finish(points, flat.is_flat(), value_range, degradation, stats, &rect, o)
}

fn finish(
    points: Vec<SampledPoint>,
    is_flat: bool,
    value_range: Option<(f64, f64)>,
    degradation: Option<Degradation>,
    stats: SampleStats,
    rect: &PlotRect,
    o: &SampleOptions,
) -> SampledSeries {
    let fill_path = if o.with_fill { FillPath::under(&points, rect.bottom) } else { None };
    let label_positions = label_positions(points.len());
    if is_flat {
        debug!(points = points.len(), ?degradation, "series rendered as flat line");
    }
    SampledSeries { points, is_flat, fill_path, label_positions, value_range, degradation, stats }
}
