// File: crates/sparkline-core/tests/sampler_properties.rs
// Purpose: End-to-end sampler behaviour: ordering, flatness, degenerate inputs, caps and labels.

use sparkline_core::sampler::canonical_readings;
use sparkline_core::{
    sample, Degradation, Downsample, Observation, SampleOptions, Timestamp, ValueDomain,
};

const T0: i64 = 1_714_555_800; // 2024-05-01T09:30:00Z

fn minute_series(values: &[f64]) -> Vec<Observation> {
    values.iter().enumerate().map(|(i, &v)| Observation::new(v, T0 + i as i64 * 60)).collect()
}

fn wave(n: usize) -> Vec<f64> {
    (0..n).map(|i| 100.0 + (i as f64 * 0.37).sin() * 5.0 + i as f64 * 0.1).collect()
}

#[test]
fn output_is_independent_of_input_order() {
    let sorted = minute_series(&wave(60));
    let opts = SampleOptions::intraday().with_fill(true);
    let want = sample(&sorted, &opts);

    let mut reversed = sorted.clone();
    reversed.reverse();
    let mut rotated = sorted.clone();
    rotated.rotate_left(17);
    // odd indices first, then even ones
    let interleaved: Vec<Observation> =
        sorted.iter().skip(1).step_by(2).chain(sorted.iter().step_by(2)).cloned().collect();

    for input in [reversed, rotated, interleaved] {
        let got = sample(&input, &opts);
        assert_eq!(got.points, want.points);
        assert_eq!(got.fill_path, want.fill_path);
        assert_eq!(got.label_positions, want.label_positions);
    }
}

#[test]
fn x_is_strictly_increasing_for_varied_series() {
    let s = sample(&minute_series(&wave(250)), &SampleOptions::multi_day().with_size(320.0, 120.0));
    assert!(!s.is_flat);
    assert!(s.points.windows(2).all(|w| w[1].x > w[0].x));
    assert_eq!(s.points.first().unwrap().x, 2.0);
    assert_eq!(s.points.last().unwrap().x, 318.0);
}

#[test]
fn flatness_threshold_boundary() {
    let input = minute_series(&[100.0, 100.05]);
    let tight = sample(&input, &SampleOptions::default().with_flat_threshold(0.0001));
    assert!(!tight.is_flat);
    let loose = sample(&input, &SampleOptions::default().with_flat_threshold(0.001));
    assert!(loose.is_flat);
    assert!(loose.points.iter().all(|p| p.y == 15.0));
    assert!(loose.value_range.is_none());
    // below threshold is flat, but not degenerate
    assert_eq!(loose.degradation, None);
}

#[test]
fn single_observation_is_a_flat_midline() {
    let input = vec![Observation::new(50.0, T0)];
    let s = sample(&input, &SampleOptions::default().with_size(80.0, 30.0));
    assert!(s.is_flat);
    assert!(s.has_data());
    assert_eq!(s.degradation, Some(Degradation::InsufficientData));
    assert_eq!(s.points.len(), 2);
    assert_eq!((s.points[0].x, s.points[0].y), (2.0, 15.0));
    assert_eq!((s.points[1].x, s.points[1].y), (78.0, 15.0));
    assert_eq!(s.points[1].value, 50.0);
}

#[test]
fn dedupe_keeps_final_observation() {
    let mut values = vec![42.0; 50];
    values[49] = 43.0;
    let input = minute_series(&values);
    let s = sample(&input, &SampleOptions::default());
    let last = s.points.last().unwrap();
    assert_eq!(last.value, 43.0);
    assert_eq!(last.instant_ms, (T0 + 49 * 60) * 1000);
    assert!(s.points.len() < 50);
}

#[test]
fn stride_downsample_keeps_last_value() {
    let values: Vec<f64> = (1..=37).map(|i| i as f64).collect();
    let s = sample(&minute_series(&values), &SampleOptions::default().with_max_points(10));
    assert!(s.points.len() <= 11);
    assert_eq!(s.points.last().unwrap().value, 37.0);
    assert_eq!(s.points.first().unwrap().value, 1.0);
}

#[test]
fn lttb_downsample_respects_cap() {
    let s = sample(
        &minute_series(&wave(1_000)),
        &SampleOptions::default()
            .with_dedupe(0.0, 0)
            .with_max_points(120)
            .with_downsample(Downsample::Lttb),
    );
    assert_eq!(s.points.len(), 120);
    assert_eq!(s.stats.after_dedupe, 1_000);
}

#[test]
fn empty_input_has_no_data() {
    let s = sample(&[], &SampleOptions::default());
    assert!(!s.has_data());
    assert_eq!(s.degradation, Some(Degradation::EmptyInput));
    assert!(s.label_positions.is_empty());
    assert!(s.fill_path.is_none());
}

#[test]
fn all_invalid_input_takes_the_empty_path() {
    let input = vec![
        Observation::new(f64::NAN, T0),
        Observation::new(0.0, T0 + 60),
        Observation::new(-4.0, T0 + 120),
        Observation::new(10.0, Timestamp::from("not a date")),
        Observation::new(f64::INFINITY, T0 + 180),
    ];
    let s = sample(&input, &SampleOptions::mini());
    assert!(!s.has_data());
    assert_eq!(s.stats.received, 5);
    assert_eq!(s.stats.valid, 0);
}

#[test]
fn label_positions_for_21_points() {
    let values: Vec<f64> = (0..21).map(|i| 10.0 + i as f64).collect();
    let s = sample(&minute_series(&values), &SampleOptions::default());
    assert_eq!(s.points.len(), 21);
    assert_eq!(s.label_positions, vec![0, 5, 10, 15, 20]);
    let labels = s.axis_labels();
    assert_eq!(labels.len(), 5);
    assert_eq!(labels[0].text, "09:30");
    assert_eq!(labels[4].text, "09:50");
}

#[test]
fn resampling_sorted_input_is_idempotent() {
    let mut input = minute_series(&wave(80));
    input.swap(3, 40);
    input.swap(10, 79);
    let opts = SampleOptions::intraday();
    let first = sample(&input, &opts);

    let sorted: Vec<Observation> = canonical_readings(&input, opts.domain)
        .into_iter()
        .map(|r| Observation::new(r.value, r.instant_ms))
        .collect();
    let again = sample(&sorted, &opts);
    let twice = sample(&sorted, &opts);
    assert_eq!(first.points, again.points);
    assert_eq!(again.points, twice.points);
}

#[test]
fn signed_series_keep_zero_and_negative_values() {
    let input = minute_series(&[-120.0, 0.0, 35.5, -10.0]);
    let s = sample(&input, &SampleOptions::flow());
    assert_eq!(s.points.len(), 4);
    assert!(!s.is_flat);
    let dropped = sample(&input, &SampleOptions::flow().with_domain(ValueDomain::Positive));
    assert_eq!(dropped.stats.valid, 1);
}

#[test]
fn all_zero_flow_series_is_flat_without_dividing_by_zero() {
    let s = sample(&minute_series(&[0.0, 0.0, 0.0]), &SampleOptions::flow());
    assert!(s.is_flat);
    assert_eq!(s.degradation, Some(Degradation::DegenerateRange));
    assert!(s.points.iter().all(|p| p.y.is_finite() && p.x.is_finite()));
}

#[test]
fn mixed_timestamp_shapes_sort_together() {
    let input = vec![
        Observation::new(3.0, "2024-05-01T10:00:00Z"),
        Observation::new(1.0, 1_714_555_800_000i64),
        Observation::new(2.0, "2024-05-01 09:45:00"),
    ];
    let s = sample(&input, &SampleOptions::default());
    let values: Vec<f64> = s.points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![1.0, 2.0, 3.0]);
}
