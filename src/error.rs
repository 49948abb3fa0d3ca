use chrono::NaiveDate;
use thiserror::Error;

/// Crate-wide result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Fatal engine errors. Recoverable numerical conditions (integration
/// divergence, degenerate normalization) never surface here; they degrade the
/// affected day to an all-zero surface instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A day's grid coordinate vectors disagree with the extent captured at
    /// cube creation. Contract violation, aborts the run.
    #[error("grid for {day} does not match the cube extent ({reason})")]
    ExtentMismatch { day: NaiveDate, reason: &'static str },

    /// A day handed to the engine is missing from the deployment calendar.
    #[error("{day} is not present in the deployment calendar")]
    DateNotInCalendar { day: NaiveDate },

    /// The envelope regression could not be fit for a day.
    #[error("envelope regression failed for {day} ({quantity}): {reason}")]
    RegressionFailure {
        day: NaiveDate,
        quantity: &'static str,
        reason: String,
    },

    /// The deployment calendar is empty; the cube cannot be sized.
    #[error("deployment calendar is empty")]
    EmptyCalendar,

    /// No per-day grids were supplied; the cube extent cannot be established.
    #[error("no reference days supplied, cube extent cannot be established")]
    NoReferenceDays,

    /// An array's shape disagrees with its coordinate vectors.
    #[error("grid shape {found:?} does not match coordinate vectors {expected:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },
}
