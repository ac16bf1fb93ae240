// File: crates/sparkline-core/src/labels.rs
// Summary: Sparse axis label placement at quartile breakpoints, plus label text layout.

/// Quantiles that receive a label; the final index is always added.
pub const LABEL_QUANTILES: [f64; 4] = [0.0, 0.25, 0.5, 0.75];

const DAY_MS: i64 = 86_400_000;

/// A tick label at a given point index.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisLabel {
    pub index: usize,
    pub x: f64,
    pub text: String,
}

/// `floor(n * q)` for each quantile plus `n - 1`, sorted with duplicates collapsed.
pub fn label_positions(n: usize) -> Vec<usize> {
    if n == 0 { return Vec::new(); }
    let mut idx: Vec<usize> = LABEL_QUANTILES
        .iter()
        .map(|q| ((n as f64) * q).floor() as usize)
        .chain(std::iter::once(n - 1))
        .map(|i| i.min(n - 1))
        .collect();
    idx.sort_unstable();
    idx.dedup();
    idx
}

/// chrono format string for labels over a series spanning `span_ms`.
pub fn layout_for_span(span_ms: i64) -> &'static str {
    let span = span_ms.abs();
    if span <= DAY_MS {
        "%H:%M"
    } else if span <= 366 * DAY_MS {
        "%b %d"
    } else {
        "%b %Y"
    }
}
