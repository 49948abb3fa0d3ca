use ndarray::Array2;

use crate::envelope::Envelope;
use crate::grid::Grid3;
use crate::measurement::DaySummary;
use crate::{HEAT_CONTENT_SCALE, SEAWATER_DENSITY, SEAWATER_SPECIFIC_HEAT};

/// Tag-derived [low, high] range of the quantity matched against the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonInterval {
    pub low: f64,
    pub high: f64,
}

impl ComparisonInterval {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// An interval is degenerate when it is non-finite or inverted.
    pub fn is_degenerate(&self) -> bool {
        !(self.low.is_finite() && self.high.is_finite() && self.low <= self.high)
    }
}

/// kJ m^-2 -> kcal cm^-2 equivalent scaling applied to both sides of every
/// heat content comparison.
pub(crate) fn heat_content_factor() -> f64 {
    SEAWATER_SPECIFIC_HEAT * SEAWATER_DENSITY / HEAT_CONTENT_SCALE
}

/// Isotherm used when the caller supplies none: the coldest predicted low
/// bound of the day's envelope.
pub fn auto_isotherm(envelope: &Envelope) -> f64 {
    envelope
        .low
        .iter()
        .map(|p| p.value)
        .fold(f64::INFINITY, f64::min)
}

/// Depth-integrated policy, tag side: sums (bound − isotherm) over the
/// matched levels for the low and high envelope series. `widen` pushes each
/// bound outward by its standard error × √n before integrating.
pub fn tag_heat_content(envelope: &Envelope, isotherm: f64, widen: bool) -> ComparisonInterval {
    let spread = if widen {
        (envelope.n_obs as f64).sqrt()
    } else {
        0.0
    };
    let factor = heat_content_factor();

    let low = envelope
        .low
        .iter()
        .map(|p| p.value - p.std_err * spread - isotherm)
        .sum::<f64>()
        * factor;
    let high = envelope
        .high
        .iter()
        .map(|p| p.value + p.std_err * spread - isotherm)
        .sum::<f64>()
        * factor;

    ComparisonInterval::new(low, high)
}

/// Sensor-error policy: the day's raw min/max widened multiplicatively by
/// the sensor error fraction.
pub fn sensor_error_interval(summary: &DaySummary, error_fraction: f64) -> ComparisonInterval {
    ComparisonInterval::new(
        summary.min * (1.0 - error_fraction),
        summary.max * (1.0 + error_fraction),
    )
}

/// Depth-integrated policy, grid side: collapses the 3-D temperature grid to
/// a 2-D heat content field over the matched depth levels. Works on a
/// per-cell basis from the caller's grid without mutating it.
///
/// Per cell: levels below the isotherm contribute nothing; a cell with no
/// defined level at all is NaN ("no information"). With `bathy_mask` set,
/// cells undefined at the deepest matched level are NaN regardless — terrain
/// the animal could not have reached.
pub fn collapse_heat_content(
    grid: &Grid3,
    levels: &[usize],
    deepest_level: usize,
    isotherm: f64,
    bathy_mask: bool,
) -> Array2<f64> {
    let (_, nlat, nlon) = grid.values.dim();
    let factor = heat_content_factor();

    Array2::from_shape_fn((nlat, nlon), |(i, j)| {
        if bathy_mask && !grid.values[[deepest_level, i, j]].is_finite() {
            return f64::NAN;
        }
        let mut sum = 0.0;
        let mut defined = false;
        for &k in levels {
            let v = grid.values[[k, i, j]];
            if v.is_finite() {
                defined = true;
                let excess = v - isotherm;
                if excess > 0.0 {
                    sum += excess;
                }
            }
        }
        if defined {
            sum * factor
        } else {
            f64::NAN
        }
    })
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use ndarray::Array3;

    use super::*;
    use crate::envelope::Prediction;

    fn envelope_of(low: &[(f64, f64)], high: &[(f64, f64)]) -> Envelope {
        Envelope {
            level_indices: (0..low.len()).collect(),
            depths: (0..low.len()).map(|i| i as f64 * 10.0).collect(),
            deepest_level: low.len() - 1,
            n_obs: 4,
            low: low
                .iter()
                .map(|&(value, std_err)| Prediction { value, std_err })
                .collect(),
            high: high
                .iter()
                .map(|&(value, std_err)| Prediction { value, std_err })
                .collect(),
        }
    }

    #[test]
    fn tag_integral_matches_hand_computation() {
        let env = envelope_of(&[(10.0, 0.5), (8.0, 0.5)], &[(12.0, 0.5), (9.0, 0.5)]);
        let factor = heat_content_factor();

        let unwidened = tag_heat_content(&env, 8.0, false);
        assert_relative_eq!(unwidened.low, (2.0 + 0.0) * factor);
        assert_relative_eq!(unwidened.high, (4.0 + 1.0) * factor);

        // widening moves low down and high up by se * sqrt(n_obs)
        let widened = tag_heat_content(&env, 8.0, true);
        assert!(widened.low < unwidened.low);
        assert!(widened.high > unwidened.high);
    }

    #[test]
    fn auto_isotherm_is_coldest_low_bound() {
        let env = envelope_of(&[(10.0, 0.1), (7.5, 0.1)], &[(12.0, 0.1), (9.0, 0.1)]);
        assert_relative_eq!(auto_isotherm(&env), 7.5);
    }

    #[test]
    fn sensor_interval_widens_multiplicatively() {
        let interval = sensor_error_interval(&DaySummary::new(20.0, 24.0), 0.01);
        assert_relative_eq!(interval.low, 19.8);
        assert_relative_eq!(interval.high, 24.24);
        assert!(!interval.is_degenerate());
    }

    #[test]
    fn collapse_clips_below_isotherm_and_keeps_caller_grid() {
        // two levels, 1x2 horizontal: one warm column, one cold column
        let mut values = Array3::zeros((2, 1, 2));
        values[[0, 0, 0]] = 12.0;
        values[[1, 0, 0]] = 9.0;
        values[[0, 0, 1]] = 7.0;
        values[[1, 0, 1]] = 6.0;
        let grid = Grid3::new(values.clone(), vec![0.0, 10.0], vec![0.0], vec![0.0, 1.0]).unwrap();

        let field = collapse_heat_content(&grid, &[0, 1], 1, 8.0, false);
        let factor = heat_content_factor();
        assert_relative_eq!(field[[0, 0]], (4.0 + 1.0) * factor);
        // entirely below the isotherm: defined but zero contribution
        assert_relative_eq!(field[[0, 1]], 0.0);

        // no in-place mutation of the caller's grid
        assert_eq!(grid.values, values);
    }

    #[test]
    fn bathymetric_mask_blanks_unreachable_cells() {
        let mut values = Array3::zeros((2, 1, 2));
        values[[0, 0, 0]] = 12.0;
        values[[1, 0, 0]] = f64::NAN; // sea floor above the deepest matched level
        values[[0, 0, 1]] = 12.0;
        values[[1, 0, 1]] = 10.0;
        let grid = Grid3::new(values, vec![0.0, 10.0], vec![0.0], vec![0.0, 1.0]).unwrap();

        let unmasked = collapse_heat_content(&grid, &[0, 1], 1, 8.0, false);
        assert!(unmasked[[0, 0]].is_finite());

        let masked = collapse_heat_content(&grid, &[0, 1], 1, 8.0, true);
        assert!(masked[[0, 0]].is_nan());
        assert!(masked[[0, 1]].is_finite());
    }
}
