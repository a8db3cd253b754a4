//! Prediction engine
//!
//! Orchestrates one cycle: analysis snapshot -> candidate generation ->
//! scoring -> selection -> confidence. The engine owns the current
//! [`WeightConfig`] behind a single-writer lock; a cycle reads one
//! immutable copy at its start, and only validation feedback replaces the
//! stored value. One engine per lottery variant - the two variants share
//! no mutable state.

pub mod candidates;
pub mod confidence;
pub mod scorer;
pub mod weights;

#[cfg(test)]
mod tests;

use parking_lot::RwLock;

use crate::analysis::AnalysisSnapshot;
use crate::error::{PredictionError, Result};
use crate::types::{DrawResult, HistoricalDataset, LotteryVariant, PredictionResult, PICK_COUNT};
use crate::validation::feedback::FeedbackLoop;
use crate::validation::{self, ValidationResult};
use self::weights::{Dimension, WeightConfig, DIMENSION_COUNT, WEIGHT_CEIL, WEIGHT_FLOOR};

/// Below this many draws, per-cycle weight tuning is skipped and the
/// prior configuration is reused. A defined fallback, not an error.
pub const MIN_HISTORY_FOR_TUNING: usize = 10;

pub struct PredictionEngine {
    variant: LotteryVariant,
    weights: RwLock<WeightConfig>,
}

impl PredictionEngine {
    pub fn new(variant: LotteryVariant) -> Self {
        Self::with_weights(variant, WeightConfig::balanced())
    }

    pub fn with_weights(variant: LotteryVariant, weights: WeightConfig) -> Self {
        Self {
            variant,
            weights: RwLock::new(weights),
        }
    }

    pub fn variant(&self) -> LotteryVariant {
        self.variant
    }

    /// The stored configuration, as one immutable copy.
    pub fn current_weights(&self) -> WeightConfig {
        *self.weights.read()
    }

    /// Produce a prediction for the next draw. Pure given the dataset
    /// snapshot and the stored weight configuration: repeated calls with
    /// the same inputs return the same result.
    pub fn predict_next_draw(&self, dataset: &HistoricalDataset) -> Result<PredictionResult> {
        if dataset.variant() != self.variant {
            return Err(PredictionError::InvalidDraw(format!(
                "dataset variant {} does not match engine variant {}",
                dataset.variant(),
                self.variant
            )));
        }

        let snapshot = AnalysisSnapshot::compute(dataset)?;
        let stored = self.current_weights();
        // Cycle-local tuning; the stored config is only replaced by the
        // feedback loop.
        let tuned = optimize_with_snapshot(dataset, &snapshot, &stored);

        let candidate_pool = candidates::generate_candidates(&snapshot);
        let ranked = scorer::rank_candidates(&candidate_pool, &snapshot, &tuned);
        let (numbers, special_number) = scorer::select_top(&ranked)?;

        let mut picks = [0u8; PICK_COUNT];
        picks[..numbers.len()].copy_from_slice(&numbers);
        picks[numbers.len()] = special_number;
        let confidence = confidence::estimate(&picks, dataset, &snapshot)?;

        tracing::debug!(
            variant = %self.variant,
            draws = dataset.len(),
            candidates = candidate_pool.len(),
            confidence,
            "prediction cycle complete"
        );

        Ok(PredictionResult {
            numbers,
            special_number,
            confidence,
        })
    }

    /// Validate a previously issued prediction against the actual draw,
    /// then atomically install the feedback-adjusted weight configuration
    /// for the next cycle.
    pub fn validate_and_update_weights(
        &self,
        prediction: &PredictionResult,
        actual: &DrawResult,
    ) -> Result<ValidationResult> {
        if actual.variant != self.variant {
            return Err(PredictionError::InvalidDraw(format!(
                "draw variant {} does not match engine variant {}",
                actual.variant, self.variant
            )));
        }

        let result = validation::validate(prediction, actual)?;
        let current = self.current_weights();
        let next = FeedbackLoop::apply(&result, &current);
        *self.weights.write() = next;

        tracing::debug!(
            variant = %self.variant,
            accuracy = result.accuracy,
            attribute_match_rate = result.attribute_match_rate,
            "weights replaced from validation feedback"
        );

        Ok(result)
    }
}

/// Tune weights from per-dimension historical accuracy: the share of
/// consecutive draw pairs whose successor intersects each dimension's
/// candidate set. With fewer than [`MIN_HISTORY_FOR_TUNING`] draws the
/// input configuration is returned unchanged.
pub fn optimize_weights(
    dataset: &HistoricalDataset,
    current: &WeightConfig,
) -> Result<WeightConfig> {
    if dataset.len() < MIN_HISTORY_FOR_TUNING {
        return Ok(*current);
    }
    let snapshot = AnalysisSnapshot::compute(dataset)?;
    Ok(optimize_with_snapshot(dataset, &snapshot, current))
}

fn optimize_with_snapshot(
    dataset: &HistoricalDataset,
    snapshot: &AnalysisSnapshot,
    current: &WeightConfig,
) -> WeightConfig {
    if dataset.len() < MIN_HISTORY_FOR_TUNING {
        return *current;
    }

    let mut accuracies = [0.0f64; DIMENSION_COUNT];
    for dimension in Dimension::ALL {
        let mut in_set = [false; 49];
        for n in candidates::candidates_for(dimension, snapshot) {
            in_set[(n - 1) as usize] = true;
        }

        let mut hits = 0usize;
        let mut total = 0usize;
        for pair in dataset.draws().windows(2) {
            if pair[1].all_numbers().iter().any(|&n| in_set[(n - 1) as usize]) {
                hits += 1;
            }
            total += 1;
        }
        accuracies[dimension.index()] = hits as f64 / total as f64;
    }

    let sum: f64 = accuracies.iter().sum();
    if sum <= 0.0 {
        return *current;
    }
    let mut raw = [0.0f64; DIMENSION_COUNT];
    for (slot, accuracy) in raw.iter_mut().zip(accuracies.iter()) {
        *slot = (accuracy / sum).clamp(WEIGHT_FLOOR, WEIGHT_CEIL);
    }
    WeightConfig::normalize_raw(raw)
}
