pub mod focal;
pub mod integrate;
pub mod normalize;
pub mod retry;

pub use focal::focal_std;
pub use integrate::{interval_probability, IntegrationFailure};
pub use normalize::normalize_surface;
pub use retry::{integrate_with_retry, AttemptState};
