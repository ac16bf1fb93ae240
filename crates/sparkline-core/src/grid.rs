// File: crates/sparkline-core/src/grid.rs
// Summary: Even spacing helpers for point x-positions and renderer grid lines.

/// `steps` evenly spaced values from `start` to `end` inclusive.
/// A single step yields `start`; zero steps yield nothing.
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (steps as f64 - 1.0);
            // pin the final value so rounding never nudges it off `end`
            (0..steps).map(|i| if i + 1 == steps { end } else { start + step * i as f64 }).collect()
        }
    }
}
