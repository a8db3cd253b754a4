//! Weight feedback
//!
//! The closing arc of the control loop: a validation outcome becomes the
//! weight configuration for the next prediction cycle. One-directional by
//! construction - validation never mutates historical data, and a
//! prediction never sees the outcome it generated until validation runs.

use crate::engine::weights::WeightConfig;
use crate::validation::ValidationResult;

pub struct FeedbackLoop;

impl FeedbackLoop {
    /// Derive the next cycle's configuration from a validation outcome.
    /// The caller (the engine) is responsible for installing the result.
    pub fn apply(result: &ValidationResult, current: &WeightConfig) -> WeightConfig {
        current
            .adjust_from(&result.details, result.accuracy)
            .normalize()
    }
}
