use chrono::NaiveDate;

use crate::cube::LikelihoodCube;
use crate::error::{EngineError, EngineResult};

pub mod ohc;
pub mod sst;

/// Engine configuration, shared by both quantity policies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Reference isotherm for the heat content integral. `None` computes it
    /// per day as the coldest predicted low bound.
    pub isotherm: Option<f64>,
    /// Exclude cells the animal could not have reached given its deepest
    /// observed depth.
    pub bathy_mask: bool,
    /// Widen envelope bounds by standard error × √n before integrating. When
    /// off, a failed integration retries once with widening.
    pub se_widening: bool,
    /// Multiplicative sensor error applied to surface-only quantities.
    pub sensor_error_fraction: f64,
    /// Span of the local regression smoothing the tag's depth profiles.
    pub loess_span: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            isotherm: None,
            bathy_mask: false,
            se_widening: true,
            sensor_error_fraction: 0.01,
            loess_span: 0.6,
        }
    }
}

/// Builds the cube from the first day's grid axes and front-loads the fatal
/// contract checks (alignment, calendar membership) for every day, so the
/// parallel per-day phase only ever sees recoverable conditions.
pub(crate) fn prepare_cube<'a, I>(
    calendar: &[NaiveDate],
    mut day_axes: I,
) -> EngineResult<LikelihoodCube>
where
    I: Iterator<Item = (NaiveDate, &'a [f64], &'a [f64])> + Clone,
{
    let (_, first_lats, first_lons) = day_axes
        .clone()
        .next()
        .ok_or(EngineError::NoReferenceDays)?;
    let cube = LikelihoodCube::new(calendar, first_lats, first_lons)?;

    for (day, lats, lons) in &mut day_axes {
        cube.check_alignment(day, lats, lons)?;
        cube.day_index(day)?;
    }
    Ok(cube)
}
