// File: crates/sparkline-core/src/downsample.rs
// Summary: Point-count caps for sorted readings (fixed stride; LTTB for shape-preserving cuts).

use crate::series::Reading;

/// Keep every `ceil(n / max_points)`-th reading starting from the first, then
/// re-append the final reading if the stride skipped it so the latest value is
/// always on the chart. Returns the input unchanged when it already fits.
pub fn stride(readings: &[Reading], max_points: usize) -> Vec<Reading> {
    let n = readings.len();
    if max_points == 0 || n <= max_points { return readings.to_vec(); }
    let step = n.div_ceil(max_points);
    let mut out: Vec<Reading> = readings.iter().step_by(step).copied().collect();
    if (n - 1) % step != 0 {
        out.push(readings[n - 1]);
    }
    out
}

/// Largest-Triangle-Three-Buckets over (instant, value).
/// Returns up to `threshold` readings preserving overall shape; first and last kept.
pub fn lttb(readings: &[Reading], threshold: usize) -> Vec<Reading> {
    let n = readings.len();
    if threshold == 0 || n == 0 { return Vec::new(); }
    if threshold >= n || n <= 2 { return readings.to_vec(); }
    if threshold < 3 { return vec![readings[0], readings[n - 1]]; }

    let px = |k: usize| readings[k].instant_ms as f64;
    let py = |k: usize| readings[k].value;

    let bucket_size = (n - 2) as f64 / (threshold - 2) as f64;
    let mut sampled = Vec::with_capacity(threshold);
    sampled.push(readings[0]);

    let mut a = 0usize; // index of the reading picked from the previous bucket

    for i in 0..(threshold - 2) {
        let start = (1.0 + (i as f64) * bucket_size).floor() as usize;
        let end = (1.0 + ((i + 1) as f64) * bucket_size).floor().min((n - 1) as f64) as usize;

        // average of the next bucket
        let next_end = (1.0 + ((i + 2) as f64) * bucket_size).floor().min(n as f64 - 1.0) as usize;
        let rs = end.max(1);
        let re = next_end.max(rs + 1).min(n);
        let (mut avg_x, mut avg_y) = (0.0f64, 0.0f64);
        for k in rs..re {
            avg_x += px(k);
            avg_y += py(k);
        }
        let count = (re - rs).max(1) as f64;
        avg_x /= count;
        avg_y /= count;

        let (a_x, a_y) = (px(a), py(a));
        let mut max_area = -1.0f64;
        let mut max_idx = start;
        for k in start..end.max(start + 1).min(n - 1) {
            let area = ((a_x - px(k)) * (avg_y - a_y) - (a_x - avg_x) * (py(k) - a_y)).abs();
            if area > max_area {
                max_area = area;
                max_idx = k;
            }
        }
        sampled.push(readings[max_idx]);
        a = max_idx;
    }

    sampled.push(readings[n - 1]);
    sampled
}
