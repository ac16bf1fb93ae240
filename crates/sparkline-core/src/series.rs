// File: crates/sparkline-core/src/series.rs
// Summary: Sampler data model: canonical readings in, plot-ready sampled series out.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::error::Degradation;
use crate::labels::{self, AxisLabel};

/// A validated observation: parsed instant (epoch ms) plus value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    pub instant_ms: i64,
    pub value: f64,
}

/// One plotted point. `x`/`y` are in plot coordinates; `value`/`instant_ms` keep
/// the source reading for tooltips and label text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampledPoint {
    pub x: f64,
    pub y: f64,
    pub value: f64,
    pub instant_ms: i64,
}

impl SampledPoint {
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.instant_ms)
    }
}

/// Drawing command of a fill polygon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Close,
}

/// Closed area under the line, down to the plot bottom.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FillPath {
    pub commands: Vec<PathCommand>,
}

impl FillPath {
    /// `(firstX, bottom) -> (firstX, firstY) -> ... -> (lastX, bottom) -> close`.
    /// `None` below two points.
    pub fn under(points: &[SampledPoint], bottom_y: f64) -> Option<Self> {
        let (first, last) = match points {
            [first, .., last] => (first, last),
            _ => return None,
        };
        let mut commands = Vec::with_capacity(points.len() + 3);
        commands.push(PathCommand::MoveTo(first.x, bottom_y));
        commands.extend(points.iter().map(|p| PathCommand::LineTo(p.x, p.y)));
        commands.push(PathCommand::LineTo(last.x, bottom_y));
        commands.push(PathCommand::Close);
        Some(Self { commands })
    }

    /// SVG path data (`M x y L x y ... Z`).
    pub fn to_svg_d(&self) -> String {
        let mut d = String::with_capacity(self.commands.len() * 16);
        for (i, c) in self.commands.iter().enumerate() {
            if i > 0 { d.push(' '); }
            let _ = match *c {
                PathCommand::MoveTo(x, y) => write!(d, "M{} {}", fmt_coord(x), fmt_coord(y)),
                PathCommand::LineTo(x, y) => write!(d, "L{} {}", fmt_coord(x), fmt_coord(y)),
                PathCommand::Close => write!(d, "Z"),
            };
        }
        d
    }
}

/// Direction of the series for semantic colouring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

/// Counters from one sampling pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SampleStats {
    /// Observations handed to the sampler.
    pub received: usize,
    /// Observations that survived filtering.
    pub valid: usize,
    /// Readings left after flat-run thinning.
    pub after_dedupe: usize,
}

/// Output of the sampler, ready for a renderer.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct SampledSeries {
    pub points: Vec<SampledPoint>,
    pub is_flat: bool,
    pub fill_path: Option<FillPath>,
    /// Sorted, deduplicated indices into `points` that carry axis labels.
    pub label_positions: Vec<usize>,
    /// Padded value domain of the Y mapping; `None` when flat or empty.
    pub value_range: Option<(f64, f64)>,
    pub degradation: Option<Degradation>,
    pub stats: SampleStats,
}

impl SampledSeries {
    /// The "no data" result.
    pub fn empty(stats: SampleStats) -> Self {
        Self { degradation: Some(Degradation::EmptyInput), stats, ..Self::default() }
    }

    pub fn has_data(&self) -> bool { !self.points.is_empty() }

    pub fn len(&self) -> usize { self.points.len() }

    pub fn is_empty(&self) -> bool { self.points.is_empty() }

    pub fn first_value(&self) -> Option<f64> { self.points.first().map(|p| p.value) }

    pub fn last_value(&self) -> Option<f64> { self.points.last().map(|p| p.value) }

    pub fn trend(&self) -> Trend {
        if self.is_flat { return Trend::Flat; }
        match (self.first_value(), self.last_value()) {
            (Some(a), Some(b)) if b > a => Trend::Up,
            (Some(a), Some(b)) if b < a => Trend::Down,
            _ => Trend::Flat,
        }
    }

    /// Change from first to last plotted value, as a fraction of the first.
    pub fn change_ratio(&self) -> Option<f64> {
        let (a, b) = (self.first_value()?, self.last_value()?);
        if a == 0.0 { return None; }
        Some((b - a) / a.abs())
    }

    /// Labels at `label_positions`, text chosen from the time span of the series.
    pub fn axis_labels(&self) -> Vec<AxisLabel> {
        let span_ms = match (self.points.first(), self.points.last()) {
            (Some(a), Some(b)) => b.instant_ms - a.instant_ms,
            _ => return Vec::new(),
        };
        let layout = labels::layout_for_span(span_ms);
        self.label_positions
            .iter()
            .filter_map(|&index| {
                let p = self.points.get(index)?;
                let text = p.instant().map(|dt| dt.format(layout).to_string()).unwrap_or_default();
                Some(AxisLabel { index, x: p.x, text })
            })
            .collect()
    }

    /// Points as an SVG `polyline` attribute: `"x1,y1 x2,y2 ..."`.
    pub fn polyline(&self) -> String {
        let mut s = String::with_capacity(self.points.len() * 12);
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 { s.push(' '); }
            let _ = write!(s, "{},{}", fmt_coord(p.x), fmt_coord(p.y));
        }
        s
    }
}

/// Trim coordinates to two decimals; integers print without a fraction.
pub(crate) fn fmt_coord(v: f64) -> String {
    let r = (v * 100.0).round() / 100.0;
    if r.fract() == 0.0 { format!("{}", r as i64) } else { format!("{r}") }
}
