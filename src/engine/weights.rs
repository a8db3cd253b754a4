//! Per-dimension scoring weights
//!
//! A [`WeightConfig`] is an immutable snapshot: adaptation always produces
//! a new value, and the invariant (non-negative components summing to 1.0)
//! holds on every value that leaves this module.

use serde::{Deserialize, Serialize};

use crate::error::{PredictionError, Result};
use crate::validation::ValidationDetails;

/// Number of scoring dimensions.
pub const DIMENSION_COUNT: usize = 8;
/// Tolerance on the weight-sum invariant.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;
/// Clamp band applied during adaptation, before renormalization.
pub const WEIGHT_FLOOR: f64 = 0.10;
pub const WEIGHT_CEIL: f64 = 0.30;

/// A dimension's match count at or above this is a strong match.
const STRONG_MATCH_THRESHOLD: u32 = 4;

/// The eight statistical lenses used for scoring and weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Periodicity,
    Zodiac,
    Element,
    Attribute,
    Sum,
    Tail,
    Consecutive,
    Distance,
}

impl Dimension {
    pub const ALL: [Dimension; DIMENSION_COUNT] = [
        Dimension::Periodicity,
        Dimension::Zodiac,
        Dimension::Element,
        Dimension::Attribute,
        Dimension::Sum,
        Dimension::Tail,
        Dimension::Consecutive,
        Dimension::Distance,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Dimension::Periodicity => "periodicity",
            Dimension::Zodiac => "zodiac",
            Dimension::Element => "element",
            Dimension::Attribute => "attribute",
            Dimension::Sum => "sum",
            Dimension::Tail => "tail",
            Dimension::Consecutive => "consecutive",
            Dimension::Distance => "distance",
        }
    }
}

/// Normalized per-dimension importance vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 8]", into = "[f64; 8]")]
pub struct WeightConfig {
    weights: [f64; DIMENSION_COUNT],
}

impl WeightConfig {
    /// Construct from raw weights, enforcing the invariant. Never a silent
    /// fix-up: an out-of-tolerance vector is the caller's bug.
    pub fn new(weights: [f64; DIMENSION_COUNT]) -> Result<Self> {
        let sum: f64 = weights.iter().sum();
        if weights.iter().any(|&w| w < 0.0) || (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(PredictionError::InvalidWeight(sum));
        }
        Ok(Self { weights })
    }

    /// The documented starting prior. Sums to 1.0 and already lies inside
    /// the clamp band, so normalization is the identity on it.
    pub fn balanced() -> Self {
        Self {
            weights: [0.20, 0.15, 0.15, 0.10, 0.10, 0.10, 0.10, 0.10],
        }
    }

    pub fn weight(&self, dimension: Dimension) -> f64 {
        self.weights[dimension.index()]
    }

    pub fn weights(&self) -> [f64; DIMENSION_COUNT] {
        self.weights
    }

    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Derive the next configuration from a validation outcome.
    ///
    /// Dimensions with a direct match-count signal (zodiac, element,
    /// consecutive, distance) scale by 1.1 on a strong match and 0.9
    /// otherwise; every weight then takes the overall accuracy multiplier
    /// before the clamp-and-renormalize pass.
    pub fn adjust_from(&self, details: &ValidationDetails, accuracy: f64) -> WeightConfig {
        let overall = if accuracy >= 0.5 {
            1.1
        } else if accuracy >= 0.3 {
            1.0
        } else {
            0.9
        };

        let per_dimension = |count: u32| {
            if count >= STRONG_MATCH_THRESHOLD {
                1.1
            } else {
                0.9
            }
        };

        let mut raw = self.weights;
        raw[Dimension::Zodiac.index()] *= per_dimension(details.zodiac_matches);
        raw[Dimension::Element.index()] *= per_dimension(details.element_matches);
        raw[Dimension::Consecutive.index()] *= per_dimension(details.consecutive_matches);
        raw[Dimension::Distance.index()] *= per_dimension(details.distance_matches);
        for w in &mut raw {
            *w *= overall;
        }

        Self::normalize_raw(raw)
    }

    /// Clamp every weight to the adaptation band, then rescale so the
    /// total is exactly 1.0.
    pub fn normalize(&self) -> WeightConfig {
        Self::normalize_raw(self.weights)
    }

    pub(crate) fn normalize_raw(mut raw: [f64; DIMENSION_COUNT]) -> WeightConfig {
        for w in &mut raw {
            *w = w.clamp(WEIGHT_FLOOR, WEIGHT_CEIL);
        }
        // The clamped sum is in [0.8, 2.4], never zero.
        let sum: f64 = raw.iter().sum();
        for w in &mut raw {
            *w /= sum;
        }
        WeightConfig { weights: raw }
    }
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self::balanced()
    }
}

impl TryFrom<[f64; DIMENSION_COUNT]> for WeightConfig {
    type Error = PredictionError;

    fn try_from(weights: [f64; DIMENSION_COUNT]) -> Result<Self> {
        Self::new(weights)
    }
}

impl From<WeightConfig> for [f64; DIMENSION_COUNT] {
    fn from(config: WeightConfig) -> Self {
        config.weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details_with(zodiac: u32, element: u32) -> ValidationDetails {
        ValidationDetails {
            zodiac_matches: zodiac,
            element_matches: element,
            ..ValidationDetails::default()
        }
    }

    #[test]
    fn test_balanced_prior_is_valid() {
        let config = WeightConfig::balanced();
        assert!((config.sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE);
        for dim in Dimension::ALL {
            let w = config.weight(dim);
            assert!((WEIGHT_FLOOR..=WEIGHT_CEIL).contains(&w), "{:?} = {}", dim, w);
        }
    }

    #[test]
    fn test_new_rejects_bad_sum() {
        let err = WeightConfig::new([0.2; DIMENSION_COUNT]).unwrap_err();
        assert!(matches!(err, PredictionError::InvalidWeight(_)));

        let mut negative = WeightConfig::balanced().weights();
        negative[0] = -0.1;
        negative[1] = 0.45;
        assert!(WeightConfig::new(negative).is_err());
    }

    #[test]
    fn test_new_accepts_exact_sum() {
        let config = WeightConfig::new([0.125; DIMENSION_COUNT]).unwrap();
        assert_eq!(config.weight(Dimension::Periodicity), 0.125);
    }

    #[test]
    fn test_adjust_raises_strong_zodiac() {
        // Spec scenario: accuracy 0.6 with 5 zodiac matches must raise the
        // zodiac weight after renormalization.
        let config = WeightConfig::balanced();
        let adjusted = config.adjust_from(&details_with(5, 3), 0.6);

        assert!(adjusted.weight(Dimension::Zodiac) > config.weight(Dimension::Zodiac));
        assert!((adjusted.sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE);
    }

    #[test]
    fn test_adjust_lowers_weak_element() {
        let config = WeightConfig::balanced();
        let adjusted = config.adjust_from(&details_with(5, 1), 0.6);

        assert!(adjusted.weight(Dimension::Element) < adjusted.weight(Dimension::Zodiac));
    }

    #[test]
    fn test_adjust_preserves_invariant_across_accuracies() {
        let config = WeightConfig::balanced();
        for accuracy in [0.0, 0.2, 0.3, 0.45, 0.5, 0.9, 1.0] {
            for details in [details_with(0, 0), details_with(7, 7), details_with(4, 2)] {
                let adjusted = config.adjust_from(&details, accuracy);
                assert!(
                    (adjusted.sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE,
                    "accuracy {accuracy}"
                );
                for dim in Dimension::ALL {
                    assert!(adjusted.weight(dim) >= 0.0);
                }
            }
        }
    }

    #[test]
    fn test_normalize_idempotent_on_banded_config() {
        let config = WeightConfig::new([0.20, 0.15, 0.15, 0.10, 0.10, 0.10, 0.10, 0.10]).unwrap();
        let once = config.normalize();
        let twice = once.normalize();
        for dim in Dimension::ALL {
            assert!((once.weight(dim) - twice.weight(dim)).abs() <= WEIGHT_SUM_TOLERANCE);
        }
    }

    #[test]
    fn test_normalize_clamps_below_floor() {
        // A config with a component below the floor is still a valid vector;
        // normalization pulls it into the band before rescaling.
        let config = WeightConfig::new([0.25, 0.15, 0.15, 0.15, 0.10, 0.10, 0.05, 0.05]).unwrap();
        let normalized = config.normalize();

        assert!((normalized.sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE);
        assert!(normalized.weight(Dimension::Consecutive) > 0.05);
    }

    #[test]
    fn test_serde_round_trip_enforces_invariant() {
        let config = WeightConfig::balanced();
        let json = serde_json::to_string(&config).unwrap();
        let back: WeightConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);

        let bad = "[0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5]";
        assert!(serde_json::from_str::<WeightConfig>(bad).is_err());
    }
}
