use chrono::NaiveDate;
use ndarray::Array2;
use tracing::{debug, warn};

use super::integrate::IntegrationFailure;

/// Where a day's integration stands. The depth-integrated policy walks
/// NotAttempted → Attempted(unwidened) → Attempted(widened) → Failed; a first
/// attempt that already uses widened bounds is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    NotAttempted,
    Attempted { widened: bool },
    Failed,
}

/// Runs `attempt` under the retry policy: one unwidened attempt with a single
/// widened retry, or one widened attempt with no retry. On final failure,
/// warns naming the day and returns an all-zero surface of `shape`.
pub fn integrate_with_retry<F>(
    day: NaiveDate,
    shape: (usize, usize),
    start_widened: bool,
    mut attempt: F,
) -> Array2<f64>
where
    F: FnMut(bool) -> Result<Array2<f64>, IntegrationFailure>,
{
    let mut state = AttemptState::NotAttempted;
    loop {
        state = match state {
            AttemptState::NotAttempted => match attempt(start_widened) {
                Ok(surface) => return surface,
                Err(err) => {
                    debug!(%day, widened = start_widened, %err, "likelihood integration attempt failed");
                    AttemptState::Attempted {
                        widened: start_widened,
                    }
                }
            },
            AttemptState::Attempted { widened: false } => match attempt(true) {
                Ok(surface) => return surface,
                Err(err) => {
                    debug!(%day, widened = true, %err, "widened retry failed");
                    AttemptState::Failed
                }
            },
            AttemptState::Attempted { widened: true } => AttemptState::Failed,
            AttemptState::Failed => {
                warn!(%day, "likelihood integration failed, emitting all-zero surface");
                return Array2::zeros(shape);
            }
        };
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 6, 15).unwrap()
    }

    fn failure() -> IntegrationFailure {
        IntegrationFailure::EmptyReference
    }

    #[test]
    fn unwidened_failure_retries_once_widened() {
        let mut calls = Vec::new();
        let surface = integrate_with_retry(day(), (2, 2), false, |widened| {
            calls.push(widened);
            if widened {
                Ok(Array2::from_elem((2, 2), 0.5))
            } else {
                Err(failure())
            }
        });
        assert_eq!(calls, vec![false, true]);
        assert_eq!(surface[[0, 0]], 0.5);
    }

    #[test]
    fn widened_failure_does_not_retry() {
        let mut calls = 0;
        let surface = integrate_with_retry(day(), (3, 2), true, |_| {
            calls += 1;
            Err(failure())
        });
        assert_eq!(calls, 1);
        assert!(surface.iter().all(|&v| v == 0.0));
        assert_eq!(surface.dim(), (3, 2));
    }

    #[test]
    fn both_attempts_failing_zeroes_the_day() {
        let mut calls = 0;
        let surface = integrate_with_retry(day(), (2, 2), false, |_| {
            calls += 1;
            Err(failure())
        });
        assert_eq!(calls, 2);
        assert!(surface.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn first_success_returns_immediately() {
        let mut calls = 0;
        let surface = integrate_with_retry(day(), (2, 2), true, |widened| {
            calls += 1;
            assert!(widened);
            Ok(Array2::from_elem((2, 2), 1.0))
        });
        assert_eq!(calls, 1);
        assert_eq!(surface[[1, 1]], 1.0);
    }
}
