//! Tests for `simai_rs::chart_process`.
//!
//! Unified time precision evaluation criterion:
//! - All time-related assertions must have absolute error less than 1 microsecond (0.001ms)
//! - Use [`assert_time_close`] function for unified time precision evaluation

mod timing;
mod visible_notes;

use simai_rs::{
    chart_process::{convert_chart_visualization_data, types::NoteVisualization},
    simai::{SimaiOutput, parse_simai},
};

/// Unified time precision evaluation constant: 1 microsecond (unit: milliseconds)
pub(crate) const MICROSECOND_EPSILON: f64 = 1e-3;

/// Assert that two time values in milliseconds are equal within 1 microsecond error margin
#[track_caller]
pub(crate) fn assert_time_close(expected: f64, actual: f64, msg: &str) {
    let diff = (expected - actual).abs();
    assert!(
        diff < MICROSECOND_EPSILON,
        "{msg}: expected {expected:.6}ms, got {actual:.6}ms, diff {diff:.9}ms (allowed: {MICROSECOND_EPSILON}ms)",
    );
}

/// Parses a chart that must be free of problems and converts it.
#[track_caller]
pub(crate) fn convert(source: &str) -> Vec<NoteVisualization> {
    let SimaiOutput { chart, errors } = parse_simai(source);
    assert_eq!(errors, vec![], "problems in {source:?}");
    convert_chart_visualization_data(&chart).unwrap()
}
