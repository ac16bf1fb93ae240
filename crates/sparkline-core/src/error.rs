// File: crates/sparkline-core/src/error.rs
// Summary: Option validation errors and the degraded-result taxonomy reported by the sampler.

use thiserror::Error;

/// Invalid sampler configuration. Only `try_sample` surfaces these; `sample`
/// sanitizes the options instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SampleError {
    #[error("plot {axis} must be positive and finite, got {value}")]
    InvalidDimension { axis: &'static str, value: f64 },

    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidRatio { name: &'static str, value: f64 },

    #[error("max_points must be at least 2, got {0}")]
    InvalidMaxPoints(usize),
}

/// Why a sampled series is degraded. Never an error: the series is still well formed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Degradation {
    /// No valid observations after filtering; render the "no data" placeholder.
    EmptyInput,
    /// Exactly one valid observation; drawn as a flat midline.
    InsufficientData,
    /// min == max (or a zero minimum with negligible range); drawn as a flat midline.
    DegenerateRange,
}
