use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::measurement::DepthMeasurement;

pub mod loess;

pub use loess::Prediction;

/// Predicted low/high bounds of the measured quantity at the grid depth
/// levels matched to the day's observations.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    /// Indices into the grid depth axis, unique and ascending.
    pub level_indices: Vec<usize>,
    /// Grid depth values at those indices.
    pub depths: Vec<f64>,
    /// Index (into the grid depth axis) of the deepest matched level.
    pub deepest_level: usize,
    /// Number of observations behind the fit.
    pub n_obs: usize,
    pub low: Vec<Prediction>,
    pub high: Vec<Prediction>,
}

/// Matches every observed depth to its closest grid depth level by squared
/// distance, deduplicates, and reports the deepest matched level. Non-finite
/// observed depths are ignored.
pub fn match_depth_levels(observed: &[f64], grid_depths: &[f64]) -> Option<(Vec<usize>, usize)> {
    if grid_depths.is_empty() {
        return None;
    }
    let indices = observed
        .iter()
        .filter(|d| d.is_finite())
        .filter_map(|&d| {
            grid_depths
                .iter()
                .enumerate()
                .min_by_key(|(_, &level)| OrderedFloat((level - d) * (level - d)))
                .map(|(i, _)| i)
        })
        .sorted()
        .dedup()
        .collect_vec();
    let deepest = indices
        .iter()
        .copied()
        .max_by_key(|&i| OrderedFloat(grid_depths[i]))?;
    Some((indices, deepest))
}

/// Fits the day's min/max temperature profiles against depth and evaluates
/// both at the matched grid depth levels.
pub fn fit_envelope(
    profile: &[DepthMeasurement],
    grid_depths: &[f64],
    span: f64,
) -> Result<Envelope, String> {
    let rows = profile
        .iter()
        .filter(|m| m.depth.is_finite() && m.min_value.is_finite() && m.max_value.is_finite())
        .collect_vec();

    let xs = rows.iter().map(|m| m.depth).collect_vec();
    let (indices, deepest) = match_depth_levels(&xs, grid_depths)
        .ok_or_else(|| "no observed depth matches a grid level".to_string())?;
    let targets = indices.iter().map(|&i| grid_depths[i]).collect_vec();

    let ys_min = rows.iter().map(|m| m.min_value).collect_vec();
    let ys_max = rows.iter().map(|m| m.max_value).collect_vec();

    let low = loess::fit_predict(&xs, &ys_min, &targets, span)?;
    let high = loess::fit_predict(&xs, &ys_max, &targets, span)?;

    Ok(Envelope {
        level_indices: indices,
        depths: targets,
        deepest_level: deepest,
        n_obs: rows.len(),
        low,
        high,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn depth_matching_dedupes_and_finds_deepest() {
        let grid_depths = vec![0.0, 10.0, 25.0, 50.0, 100.0];
        let observed = vec![2.0, 4.0, 11.0, 48.0, 52.0, f64::NAN];

        let (indices, deepest) = match_depth_levels(&observed, &grid_depths).unwrap();
        assert_eq!(indices, vec![0, 1, 3]);
        assert_eq!(deepest, 3);
    }

    #[test]
    fn envelope_orders_low_below_high() {
        let grid_depths = vec![0.0, 20.0, 40.0, 60.0, 80.0];
        let profile = (0..9)
            .map(|i| {
                let depth = i as f64 * 10.0;
                // temperature falls with depth, min strictly below max
                DepthMeasurement::new(depth, 24.0 - 0.1 * depth, 26.0 - 0.1 * depth)
            })
            .collect::<Vec<_>>();

        let env = fit_envelope(&profile, &grid_depths, 0.6).unwrap();
        assert_eq!(env.level_indices, vec![0, 1, 2, 3, 4]);
        assert_eq!(env.n_obs, 9);
        for (lo, hi) in env.low.iter().zip(&env.high) {
            assert!(lo.value < hi.value);
        }
    }

    #[test]
    fn envelope_fails_on_single_observation() {
        let grid_depths = vec![0.0, 20.0];
        let profile = vec![DepthMeasurement::new(5.0, 20.0, 22.0)];
        assert!(fit_envelope(&profile, &grid_depths, 0.6).is_err());
    }
}
