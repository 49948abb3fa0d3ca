pub mod cube;
pub mod engine;
pub mod envelope;
pub mod error;
pub mod grid;
pub mod likelihood;
pub mod measurement;
pub mod quantity;

pub mod prelude {

    pub mod re_exports {
        pub use chrono;
        pub use ndarray;
    }

    pub use crate::cube::LikelihoodCube;
    pub use crate::engine::{
        ohc::{estimate as ohc_estimate, OhcDay},
        sst::{estimate as sst_estimate, SstDay},
        Config,
    };
    pub use crate::error::{EngineError, EngineResult};
    pub use crate::grid::{Grid2, Grid3};
    pub use crate::measurement::{DayRecord, DaySummary, DepthMeasurement};
}

/// Specific heat capacity of seawater [kJ kg⁻¹ °C⁻¹].
pub const SEAWATER_SPECIFIC_HEAT: f64 = 4.18;

/// Mean seawater density [kg m⁻³].
pub const SEAWATER_DENSITY: f64 = 1025.0;

/// Divisor taking the heat content integral to the kcal cm⁻² convention the
/// reference climatologies use.
pub const HEAT_CONTENT_SCALE: f64 = 1e4;
