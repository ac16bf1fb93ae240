// File: crates/sparkline-core/src/dedupe.rs
// Summary: Flat-run thinning for sorted readings (overnight / non-trading compression).

use crate::series::Reading;

/// Thin runs of near-identical values in a time-sorted series.
///
/// Walks the series once. A reading is kept when its value differs from the last
/// *kept* value by more than `epsilon`; inside a run of near-identical values only
/// every `run`-th member is kept. The first and final readings are always kept.
/// `run == 0` disables thinning and returns the input unchanged.
pub fn thin_flat_runs(readings: &[Reading], epsilon: f64, run: usize) -> Vec<Reading> {
    let n = readings.len();
    if run == 0 || n <= 2 { return readings.to_vec(); }
    let epsilon = epsilon.max(0.0);

    let mut kept = Vec::with_capacity(n);
    kept.push(readings[0]);
    let mut last_kept = readings[0].value;
    let mut run_len = 0usize;
    let mut last_index_kept = 0usize;

    for (i, r) in readings.iter().enumerate().skip(1) {
        if (r.value - last_kept).abs() > epsilon {
            kept.push(*r);
            last_kept = r.value;
            last_index_kept = i;
            run_len = 0;
        } else {
            run_len += 1;
            if run_len % run == 0 {
                kept.push(*r);
                last_kept = r.value;
                last_index_kept = i;
            }
        }
    }

    if last_index_kept != n - 1 {
        kept.push(readings[n - 1]);
    }
    kept
}
