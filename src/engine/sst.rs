//! Sea-surface-temperature matching: the sensor-error quantity policy.

use chrono::NaiveDate;
use ndarray::Array2;
use rayon::prelude::*;
use tracing::warn;

use crate::cube::LikelihoodCube;
use crate::error::EngineResult;
use crate::grid::Grid2;
use crate::likelihood::{focal_std, interval_probability, normalize_surface};
use crate::measurement::DayRecord;
use crate::quantity::sensor_error_interval;

use super::Config;

/// Neighborhood for the local uncertainty of the surface temperature field.
/// Smaller than the heat content window: the field is not depth-smoothed.
pub const FOCAL_WINDOW: usize = 3;

/// One day's input: the tag record plus that day's 2-D surface grid.
#[derive(Debug, Clone, PartialEq)]
pub struct SstDay {
    pub record: DayRecord,
    pub grid: Grid2,
}

/// Builds the surface-temperature likelihood cube over the full deployment
/// calendar. There is no envelope regression and no retry here: the interval
/// comes straight from the day's min/max widened by the sensor error, and a
/// failed integration degrades that day to all-zero.
pub fn estimate(
    days: &[SstDay],
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
        .map(|day| (day.record.day, day_surface(day, config)))
        .collect::<Vec<_>>();

    for (day, surface) in surfaces {
        cube.write_surface(day, surface)?;
    }
    Ok(cube)
}

fn day_surface(day: &SstDay, config: &Config) -> Array2<f64> {
    let interval = sensor_error_interval(&day.record.summary, config.sensor_error_fraction);
    let sigma = focal_std(&day.grid.values, FOCAL_WINDOW);

    let surface = match interval_probability(&day.grid.values, &sigma, &interval) {
        Ok(surface) => surface,
        Err(err) => {
            warn!(day = %day.record.day, %err, "surface temperature integration failed, emitting all-zero surface");
            Array2::zeros(day.grid.values.dim())
        }
    };
    normalize_surface(surface)
}
