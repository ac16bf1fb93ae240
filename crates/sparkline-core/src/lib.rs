// File: crates/sparkline-core/src/lib.rs
// Summary: Core library entry point; exports the sampler, its options and the rendering seam.

pub mod observation;
pub mod types;
pub mod grid;
pub mod scale;
pub mod dedupe;
pub mod downsample;
pub mod labels;
pub mod series;
pub mod options;
pub mod error;
pub mod sampler;
pub mod theme;
pub mod render;
pub mod svg;
pub mod mode;

pub use observation::{Observation, Timestamp, ValueDomain};
pub use types::{Insets, PlotRect};
pub use series::{FillPath, PathCommand, SampleStats, SampledPoint, SampledSeries, Trend};
pub use labels::{label_positions, AxisLabel};
pub use options::{presets, Downsample, SampleOptions};
pub use error::{Degradation, SampleError};
pub use sampler::{sample, try_sample};
pub use theme::{Rgba, Theme};
pub use render::{SeriesRenderer, SeriesStyle};
pub use svg::SvgRenderer;
pub use mode::{ChartMode, DisplayModeStore};
