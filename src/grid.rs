use ndarray::{Array2, Array3};

use crate::error::{EngineError, EngineResult};

/// 3-D reference grid, axis order (depth, lat, lon). Values are already
/// unit-corrected by the retrieval collaborator; undefined cells are NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid3 {
    pub values: Array3<f64>,
    pub depths: Vec<f64>,
    pub lats: Vec<f64>,
    pub lons: Vec<f64>,
}

impl Grid3 {
    pub fn new(
        values: Array3<f64>,
        depths: Vec<f64>,
        lats: Vec<f64>,
        lons: Vec<f64>,
    ) -> EngineResult<Self> {
        let expected = [depths.len(), lats.len(), lons.len()];
        let found = values.dim();
        let found = [found.0, found.1, found.2];
        if expected != found {
            return Err(EngineError::ShapeMismatch {
                expected: expected.to_vec(),
                found: found.to_vec(),
            });
        }
        Ok(Self {
            values,
            depths,
            lats,
            lons,
        })
    }
}

/// 2-D reference grid, axis order (lat, lon).
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2 {
    pub values: Array2<f64>,
    pub lats: Vec<f64>,
    pub lons: Vec<f64>,
}

impl Grid2 {
    pub fn new(values: Array2<f64>, lats: Vec<f64>, lons: Vec<f64>) -> EngineResult<Self> {
        let expected = [lats.len(), lons.len()];
        let found = values.dim();
        let found = [found.0, found.1];
        if expected != found {
            return Err(EngineError::ShapeMismatch {
                expected: expected.to_vec(),
                found: found.to_vec(),
            });
        }
        Ok(Self { values, lats, lons })
    }
}
