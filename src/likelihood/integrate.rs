use ndarray::Array2;
use statrs::distribution::{ContinuousCDF, Normal};
use thiserror::Error;

use crate::quantity::ComparisonInterval;

/// Fraction of defined reference cells allowed to produce an undefined
/// likelihood before the whole call is treated as failed. Downstream
/// normalization needs a well-defined global maximum, so a mostly-undefined
/// surface is worthless.
pub const MAX_UNDEFINED_FRACTION: f64 = 0.95;

/// Recoverable integration failure for one attempt. Callers retry or degrade
/// to an all-zero surface; this never aborts the run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrationFailure {
    #[error("comparison interval [{low}, {high}] is degenerate")]
    DegenerateInterval { low: f64, high: f64 },

    #[error("{undefined} of {defined} defined cells have no stable likelihood")]
    Diverged { undefined: usize, defined: usize },

    #[error("reference field has no defined cells")]
    EmptyReference,
}

/// Per-cell probability that a Gaussian centered on the reference value with
/// the local standard deviation puts mass inside `interval`. Cells whose
/// deviation is undefined, zero, or non-finite, or whose mass comes out
/// non-finite, are NaN in the output.
pub fn interval_probability(
    reference: &Array2<f64>,
    sigma: &Array2<f64>,
    interval: &ComparisonInterval,
) -> Result<Array2<f64>, IntegrationFailure> {
    assert_eq!(reference.dim(), sigma.dim());

    if interval.is_degenerate() {
        return Err(IntegrationFailure::DegenerateInterval {
            low: interval.low,
            high: interval.high,
        });
    }

    let mut defined = 0usize;
    let mut undefined = 0usize;

    let surface = Array2::from_shape_fn(reference.dim(), |idx| {
        let mean = reference[idx];
        if !mean.is_finite() {
            // no information in the reference itself
            return f64::NAN;
        }
        defined += 1;

        let sd = sigma[idx];
        if !sd.is_finite() || sd <= 0.0 {
            undefined += 1;
            return f64::NAN;
        }

        let mass = match Normal::new(mean, sd) {
            Ok(normal) => normal.cdf(interval.high) - normal.cdf(interval.low),
            Err(_) => f64::NAN,
        };
        if mass.is_finite() {
            mass.max(0.0)
        } else {
            undefined += 1;
            f64::NAN
        }
    });

    if defined == 0 {
        return Err(IntegrationFailure::EmptyReference);
    }
    if undefined as f64 > MAX_UNDEFINED_FRACTION * defined as f64 {
        return Err(IntegrationFailure::Diverged { undefined, defined });
    }

    Ok(surface)
}
