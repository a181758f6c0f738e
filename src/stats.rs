//! Timing statistics over a series of benchmark iterations

use std::time::Duration;

use crate::error::{Result, SmvpError};

/// Aggregated timings of a benchmark run, all in milliseconds
#[derive(Debug, Clone, PartialEq)]
pub struct TimingRecord {
    pub total: f64,
    pub average: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation (divisor N)
    pub stdev: f64,
    /// Per-iteration durations in execution order
    pub per_iteration: Vec<f64>,
}

impl TimingRecord {
    /// Number of iterations the record covers
    pub fn iterations(&self) -> usize {
        self.per_iteration.len()
    }
}

/// Aggregates per-iteration durations (milliseconds) into a [`TimingRecord`]
///
/// # Errors
///
/// Returns [`SmvpError::EmptySeries`] if `durations` is empty.
pub fn aggregate(durations: &[f64]) -> Result<TimingRecord> {
    if durations.is_empty() {
        return Err(SmvpError::EmptySeries);
    }

    let n = durations.len() as f64;
    let total: f64 = durations.iter().sum();
    let average = total / n;

    let (min, max) = durations
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &d| {
            (lo.min(d), hi.max(d))
        });

    let variance = durations
        .iter()
        .map(|&d| {
            let diff = d - average;
            diff * diff
        })
        .sum::<f64>()
        / n;

    Ok(TimingRecord {
        total,
        average,
        min,
        max,
        stdev: variance.sqrt(),
        per_iteration: durations.to_vec(),
    })
}

/// Converts a measured duration to fractional milliseconds
#[inline]
pub fn duration_to_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1e3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_samples() {
        let record = aggregate(&[10.0, 20.0, 30.0]).unwrap();

        assert_eq!(record.total, 60.0);
        assert_eq!(record.average, 20.0);
        assert_eq!(record.min, 10.0);
        assert_eq!(record.max, 30.0);
        assert!((record.stdev - (200.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert!((record.stdev - 8.165).abs() < 1e-3);
        assert_eq!(record.per_iteration, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_single_sample() {
        let record = aggregate(&[5.0]).unwrap();

        assert_eq!(record.total, 5.0);
        assert_eq!(record.average, 5.0);
        assert_eq!(record.min, 5.0);
        assert_eq!(record.max, 5.0);
        assert_eq!(record.stdev, 0.0);
        assert_eq!(record.iterations(), 1);
    }

    #[test]
    fn test_empty_series() {
        assert!(matches!(aggregate(&[]), Err(SmvpError::EmptySeries)));
    }

    #[test]
    fn test_duration_to_ms() {
        assert_eq!(duration_to_ms(Duration::from_secs(2)), 2000.0);
        assert!((duration_to_ms(Duration::from_micros(1500)) - 1.5).abs() < 1e-12);
    }
}
