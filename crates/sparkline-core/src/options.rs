// File: crates/sparkline-core/src/options.rs
// Summary: Sampler options, validation/sanitizing, and named presets per chart context.
// Notes:
// - Chart call sites differ only in thresholds and caps; each one picks a preset and
//   adjusts a field or two with the `with_*` builders.
// - Options derive serde so hosts can ship them as JSON next to other display config.

use serde::{Deserialize, Serialize};

use crate::error::SampleError;
use crate::observation::ValueDomain;
use crate::types::{Insets, HEIGHT, WIDTH};

/// How to cap the number of plotted points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Downsample {
    /// Fixed integer stride `ceil(n / max_points)`, last reading re-appended.
    #[default]
    Stride,
    /// Largest-Triangle-Three-Buckets; keeps peaks at the cost of a little CPU.
    Lttb,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleOptions {
    pub width: f64,
    pub height: f64,
    pub insets: Insets,
    /// Relative range-over-minimum ratio below which the series is flat.
    pub flat_threshold: f64,
    /// Absolute range below which a zero-minimum series is flat.
    pub zero_range_epsilon: f64,
    /// Values within this distance of the last kept value count as unchanged.
    pub dedupe_epsilon: f64,
    /// Keep one in `dedupe_run` readings of an unchanged run; 0 disables thinning.
    pub dedupe_run: usize,
    pub max_points: Option<usize>,
    pub downsample: Downsample,
    pub with_fill: bool,
    /// Fraction of the value range added as Y padding, split above and below.
    pub padding_ratio: f64,
    pub domain: ValueDomain,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            flat_threshold: 0.0001,
            zero_range_epsilon: 1e-9,
            dedupe_epsilon: 0.005,
            dedupe_run: 10,
            max_points: None,
            downsample: Downsample::Stride,
            with_fill: false,
            padding_ratio: 0.10,
            domain: ValueDomain::Positive,
        }
    }
}

impl SampleOptions {
    /// Intraday price charts: tight flatness threshold, 100 points.
    pub fn intraday() -> Self {
        Self { flat_threshold: 0.0001, max_points: Some(100), ..Self::default() }
    }

    /// Multi-day windows: looser flatness threshold, 200 points.
    pub fn multi_day() -> Self {
        Self { flat_threshold: 0.001, max_points: Some(200), ..Self::default() }
    }

    /// List-row mini chart with an area fill.
    pub fn mini() -> Self {
        Self { width: 80.0, height: 30.0, with_fill: true, max_points: Some(100), ..Self::default() }
    }

    /// Fund flows and percentage series: negatives and zero are real data.
    pub fn flow() -> Self {
        Self { domain: ValueDomain::Signed, flat_threshold: 0.001, ..Self::default() }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    pub fn with_flat_threshold(mut self, threshold: f64) -> Self {
        self.flat_threshold = threshold;
        self
    }

    pub fn with_dedupe(mut self, epsilon: f64, run: usize) -> Self {
        self.dedupe_epsilon = epsilon;
        self.dedupe_run = run;
        self
    }

    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = Some(max_points);
        self
    }

    pub fn with_downsample(mut self, downsample: Downsample) -> Self {
        self.downsample = downsample;
        self
    }

    pub fn with_fill(mut self, on: bool) -> Self {
        self.with_fill = on;
        self
    }

    pub fn with_padding(mut self, ratio: f64) -> Self {
        self.padding_ratio = ratio;
        self
    }

    pub fn with_domain(mut self, domain: ValueDomain) -> Self {
        self.domain = domain;
        self
    }

    /// Reject options a chart cannot be drawn with.
    pub fn validate(&self) -> Result<(), SampleError> {
        for (axis, value) in [("width", self.width), ("height", self.height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SampleError::InvalidDimension { axis, value });
            }
        }
        for (name, value) in [
            ("flat_threshold", self.flat_threshold),
            ("zero_range_epsilon", self.zero_range_epsilon),
            ("dedupe_epsilon", self.dedupe_epsilon),
            ("padding_ratio", self.padding_ratio),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SampleError::InvalidRatio { name, value });
            }
        }
        if let Some(max) = self.max_points {
            if max < 2 {
                return Err(SampleError::InvalidMaxPoints(max));
            }
        }
        Ok(())
    }

    /// Copy that passes `validate`: bad dimensions and non-finite ratios take their
    /// defaults, negative ratios clamp to 0, and `max_points` is raised to 2.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let mut o = self.clone();
        // Negative ratios clamp to 0; NaN and infinities take the default.
        let ratio = |v: f64, d: f64| if v.is_finite() { v.max(0.0) } else { d };
        if !(o.width.is_finite() && o.width > 0.0) { o.width = defaults.width; }
        if !(o.height.is_finite() && o.height > 0.0) { o.height = defaults.height; }
        o.flat_threshold = ratio(o.flat_threshold, defaults.flat_threshold);
        o.zero_range_epsilon = ratio(o.zero_range_epsilon, defaults.zero_range_epsilon);
        o.dedupe_epsilon = ratio(o.dedupe_epsilon, defaults.dedupe_epsilon);
        o.padding_ratio = ratio(o.padding_ratio, defaults.padding_ratio);
        o.max_points = o.max_points.map(|m| m.max(2));
        o
    }
}

pub mod presets {
    use super::SampleOptions;

    /// Preset names accepted by [`find`].
    pub const NAMES: [&str; 5] = ["default", "intraday", "multi-day", "mini", "flow"];

    /// Return every built-in preset with its name.
    pub fn all() -> Vec<(&'static str, SampleOptions)> {
        NAMES.iter().map(|&n| (n, find(n))).collect()
    }

    /// Find a preset by name (case-insensitive, `_` and `-` interchangeable),
    /// falling back to the default options.
    pub fn find(name: &str) -> SampleOptions {
        match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "intraday" => SampleOptions::intraday(),
            "multi-day" | "multiday" => SampleOptions::multi_day(),
            "mini" => SampleOptions::mini(),
            "flow" => SampleOptions::flow(),
            _ => SampleOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_resolve_by_name() {
        assert_eq!(presets::find("INTRADAY").max_points, Some(100));
        assert_eq!(presets::find("multi_day").max_points, Some(200));
        assert_eq!(presets::find("flow").domain, ValueDomain::Signed);
        assert_eq!(presets::find("nope"), SampleOptions::default());
        assert_eq!(presets::all().len(), presets::NAMES.len());
    }

    #[test]
    fn validate_rejects_bad_dimensions() {
        let o = SampleOptions::default().with_size(0.0, 30.0);
        assert!(matches!(o.validate(), Err(SampleError::InvalidDimension { axis: "width", .. })));
        let o = SampleOptions::default().with_padding(f64::NAN);
        assert!(matches!(o.validate(), Err(SampleError::InvalidRatio { name: "padding_ratio", .. })));
        let o = SampleOptions::default().with_max_points(1);
        assert_eq!(o.validate(), Err(SampleError::InvalidMaxPoints(1)));
        assert!(SampleOptions::intraday().validate().is_ok());
    }

    #[test]
    fn sanitized_is_always_valid() {
        let o = SampleOptions {
            width: -5.0,
            height: f64::INFINITY,
            flat_threshold: -1.0,
            padding_ratio: f64::NAN,
            max_points: Some(0),
            ..SampleOptions::default()
        };
        let s = o.sanitized();
        assert!(s.validate().is_ok());
        assert_eq!(s.width, WIDTH);
        assert_eq!(s.height, HEIGHT);
        assert_eq!(s.flat_threshold, 0.0);
        assert_eq!(s.padding_ratio, SampleOptions::default().padding_ratio);
        assert_eq!(s.max_points, Some(2));
    }

    #[test]
    fn options_load_from_partial_json() {
        let o: SampleOptions =
            serde_json::from_str(r#"{"width": 320, "max_points": 150, "downsample": "lttb"}"#).unwrap();
        assert_eq!(o.width, 320.0);
        assert_eq!(o.height, HEIGHT);
        assert_eq!(o.max_points, Some(150));
        assert_eq!(o.downsample, Downsample::Lttb);
    }
}
