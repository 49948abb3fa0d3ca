//! Ocean-heat-content matching: the depth-integrated quantity policy.

use chrono::NaiveDate;
use ndarray::Array2;
use rayon::prelude::*;

use crate::cube::LikelihoodCube;
use crate::envelope::fit_envelope;
use crate::error::{EngineError, EngineResult};
use crate::grid::Grid3;
use crate::likelihood::{focal_std, integrate_with_retry, interval_probability, normalize_surface};
use crate::measurement::DayRecord;
use crate::quantity::{auto_isotherm, collapse_heat_content, tag_heat_content};

use super::Config;

/// Neighborhood for the local uncertainty of the collapsed heat content
/// field.
pub const FOCAL_WINDOW: usize = 9;

/// One day's input: the tag record plus that day's 3-D temperature grid.
#[derive(Debug, Clone, PartialEq)]
pub struct OhcDay {
    pub record: DayRecord,
    pub grid: Grid3,
}

/// Builds the heat-content likelihood cube over the full deployment
/// calendar. Days are independent and run in parallel; each produced surface
/// lands in its own calendar slice.
pub fn estimate(
    days: &[OhcDay],
    calendar: &[NaiveDate],
    config: &Config,
) -> EngineResult<LikelihoodCube> {
    let mut cube = super::prepare_cube(
        calendar,
        days.iter()
            .map(|d| (d.record.day, d.grid.lats.as_slice(), d.grid.lons.as_slice())),
    )?;

    let surfaces = days
        .par_iter()
        .map(|day| day_surface(day, config).map(|surface| (day.record.day, surface)))
        .collect::<EngineResult<Vec<_>>>()?;

    for (day, surface) in surfaces {
        cube.write_surface(day, surface)?;
    }
    Ok(cube)
}

fn day_surface(day: &OhcDay, config: &Config) -> EngineResult<Array2<f64>> {
    let envelope = fit_envelope(&day.record.profile, &day.grid.depths, config.loess_span)
        .map_err(|reason| EngineError::RegressionFailure {
            day: day.record.day,
            quantity: "heat content",
            reason,
        })?;

    let isotherm = config.isotherm.unwrap_or_else(|| auto_isotherm(&envelope));
    let reference = collapse_heat_content(
        &day.grid,
        &envelope.level_indices,
        envelope.deepest_level,
        isotherm,
        config.bathy_mask,
    );
    let sigma = focal_std(&reference, FOCAL_WINDOW);

    let surface = integrate_with_retry(
        day.record.day,
        reference.dim(),
        config.se_widening,
        |widened| {
            let interval = tag_heat_content(&envelope, isotherm, widened);
            interval_probability(&reference, &sigma, &interval)
        },
    );
    Ok(normalize_surface(surface))
}
