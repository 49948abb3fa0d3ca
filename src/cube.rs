use chrono::NaiveDate;
use ndarray::{s, Array2, Array3, ArrayView2};

use crate::error::{EngineError, EngineResult};

/// Geographic coordinate reference of every cube: plain WGS84 lon/lat.
pub const CRS: &str = "EPSG:4326";

/// Time-stacked daily likelihood surfaces over the full deployment calendar.
///
/// Allocated once, all-zero, shaped (nlat, nlon, ndays). The spatial extent
/// and orientation are fixed from the first day's grid: longitudes on a
/// 0–360° convention are shifted to −180..180, and a descending latitude axis
/// is stored ascending with day surfaces row-flipped on write (north-up).
/// Slices for days never written stay all-zero.
#[derive(Debug, Clone, PartialEq)]
pub struct LikelihoodCube {
    data: Array3<f64>,
    lons: Vec<f64>,
    lats: Vec<f64>,
    calendar: Vec<NaiveDate>,
    // axes exactly as day grids supply them, kept for alignment checks
    source_lons: Vec<f64>,
    source_lats: Vec<f64>,
    flip_rows: bool,
}

impl LikelihoodCube {
    pub fn new(calendar: &[NaiveDate], lats: &[f64], lons: &[f64]) -> EngineResult<Self> {
        if calendar.is_empty() {
            return Err(EngineError::EmptyCalendar);
        }

        let shifted_lons = lons
            .iter()
            .map(|&l| if l > 180.0 { l - 360.0 } else { l })
            .collect::<Vec<_>>();

        let flip_rows = lats.len() > 1 && lats[0] > lats[lats.len() - 1];
        let mut stored_lats = lats.to_vec();
        if flip_rows {
            stored_lats.reverse();
        }

        Ok(Self {
            data: Array3::zeros((lats.len(), lons.len(), calendar.len())),
            lons: shifted_lons,
            lats: stored_lats,
            calendar: calendar.to_vec(),
            source_lons: lons.to_vec(),
            source_lats: lats.to_vec(),
            flip_rows,
        })
    }

    /// Checks a day's grid axes against the extent captured at creation.
    /// Any disagreement is a contract violation that aborts the run.
    pub fn check_alignment(&self, day: NaiveDate, lats: &[f64], lons: &[f64]) -> EngineResult<()> {
        if lats.len() != self.source_lats.len() || lons.len() != self.source_lons.len() {
            return Err(EngineError::ExtentMismatch {
                day,
                reason: "coordinate vector lengths differ",
            });
        }
        if lats != self.source_lats.as_slice() {
            return Err(EngineError::ExtentMismatch {
                day,
                reason: "latitude axis differs",
            });
        }
        if lons != self.source_lons.as_slice() {
            return Err(EngineError::ExtentMismatch {
                day,
                reason: "longitude axis differs",
            });
        }
        Ok(())
    }

    /// Position of `day` in the deployment calendar, by exact date match.
    pub fn day_index(&self, day: NaiveDate) -> EngineResult<usize> {
        self.calendar
            .iter()
            .position(|&d| d == day)
            .ok_or(EngineError::DateNotInCalendar { day })
    }

    /// Writes a day's normalized surface into its calendar slice, flipping
    /// rows to north-up when needed and clamping residual negatives.
    pub fn write_surface(&mut self, day: NaiveDate, surface: Array2<f64>) -> EngineResult<()> {
        let index = self.day_index(day)?;
        if surface.dim() != (self.lats.len(), self.lons.len()) {
            return Err(EngineError::ExtentMismatch {
                day,
                reason: "surface shape differs from cube extent",
            });
        }

        let oriented = if self.flip_rows {
            surface.slice(s![..;-1, ..]).to_owned()
        } else {
            surface
        };
        let clamped = oriented.mapv(|v| v.max(0.0));
        self.data.slice_mut(s![.., .., index]).assign(&clamped);
        Ok(())
    }

    /// The (nlat, nlon) surface for one calendar index.
    pub fn surface(&self, index: usize) -> ArrayView2<'_, f64> {
        self.data.slice(s![.., .., index])
    }

    pub fn data(&self) -> &Array3<f64> {
        &self.data
    }

    /// Longitude axis, −180..180.
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// Latitude axis, ascending (north-up).
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    pub fn calendar(&self) -> &[NaiveDate] {
        &self.calendar
    }

    pub fn crs(&self) -> &'static str {
        CRS
    }

    pub fn n_days(&self) -> usize {
        self.calendar.len()
    }
}
