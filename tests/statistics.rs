//! Integration tests for timing aggregation

use smvp_toolbox::{aggregate, time_iterations, SmvpError};

#[test]
fn test_reference_series() {
    let record = aggregate(&[10.0, 20.0, 30.0]).unwrap();

    assert_eq!(record.total, 60.0);
    assert_eq!(record.average, 20.0);
    assert_eq!(record.min, 10.0);
    assert_eq!(record.max, 30.0);
    assert!((record.stdev - 8.164_965_809).abs() < 1e-9);
}

#[test]
fn test_population_not_sample_deviation() {
    // Sample stdev would be 1.0; population stdev is sqrt(2/3)
    let record = aggregate(&[1.0, 2.0, 3.0]).unwrap();
    assert!((record.stdev - (2.0f64 / 3.0).sqrt()).abs() < 1e-12);
}

#[test]
fn test_per_iteration_keeps_execution_order() {
    let record = aggregate(&[3.0, 1.0, 2.0]).unwrap();
    assert_eq!(record.per_iteration, vec![3.0, 1.0, 2.0]);
}

#[test]
fn test_empty_series_is_an_error() {
    assert!(matches!(aggregate(&[]), Err(SmvpError::EmptySeries)));
}

#[test]
fn test_timed_loop_record_is_consistent() {
    let mut acc = 0u64;
    let record = time_iterations(50, || {
        for i in 0..100 {
            acc = acc.wrapping_add(i);
        }
    })
    .unwrap();

    assert_eq!(record.iterations(), 50);
    let sum: f64 = record.per_iteration.iter().sum();
    assert!((record.total - sum).abs() < 1e-9);
    assert!(record.min <= record.max);
    assert!(record.stdev >= 0.0);
}
