//! Candidate scoring and selection
//!
//! Each candidate gets one sub-score per dimension, normalized to [0,1],
//! combined with the active weight configuration into a single ranking
//! score. Ranking is a total order (score descending, number ascending)
//! so repeated runs over the same snapshot select identically.

use crate::analysis::AnalysisSnapshot;
use crate::engine::weights::{Dimension, WeightConfig, DIMENSION_COUNT};
use crate::error::{PredictionError, Result};
use crate::types::{ORDINARY_COUNT, PICK_COUNT};

/// Per-dimension sub-scores for one candidate.
pub fn score_number(number: u8, snapshot: &AnalysisSnapshot) -> [f64; DIMENSION_COUNT] {
    let mut scores = [0.0; DIMENSION_COUNT];
    scores[Dimension::Periodicity.index()] = periodicity_score(number, snapshot);
    scores[Dimension::Zodiac.index()] = zodiac_score(number, snapshot);
    scores[Dimension::Element.index()] = element_score(number, snapshot);
    scores[Dimension::Attribute.index()] = attribute_match_score(number, snapshot);
    scores[Dimension::Sum.index()] = sum_score(number, snapshot);
    scores[Dimension::Tail.index()] = tail_score(number, snapshot);
    scores[Dimension::Consecutive.index()] = consecutive_score(number, snapshot);
    scores[Dimension::Distance.index()] = snapshot.near3_fraction(number);
    scores
}

/// Weighted combination of the sub-scores.
pub fn combined_score(sub_scores: &[f64; DIMENSION_COUNT], weights: &WeightConfig) -> f64 {
    Dimension::ALL
        .iter()
        .map(|&dim| sub_scores[dim.index()] * weights.weight(dim))
        .sum()
}

/// Score and rank candidates: descending score, ties by ascending number.
pub fn rank_candidates(
    candidates: &[u8],
    snapshot: &AnalysisSnapshot,
    weights: &WeightConfig,
) -> Vec<(u8, f64)> {
    let mut ranked: Vec<(u8, f64)> = candidates
        .iter()
        .map(|&n| (n, combined_score(&score_number(n, snapshot), weights)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
}

/// Take the top 7: the first 6 by rank become the ordinary numbers, the
/// 7th the special number.
pub fn select_top(ranked: &[(u8, f64)]) -> Result<([u8; ORDINARY_COUNT], u8)> {
    if ranked.len() < PICK_COUNT {
        return Err(PredictionError::InsufficientCandidates(ranked.len()));
    }
    let mut numbers = [0u8; ORDINARY_COUNT];
    for (slot, entry) in numbers.iter_mut().zip(ranked.iter()) {
        *slot = entry.0;
    }
    Ok((numbers, ranked[ORDINARY_COUNT].0))
}

/// Inverse-deviation measure of interval stability.
fn periodicity_score(number: u8, snapshot: &AnalysisSnapshot) -> f64 {
    snapshot.periodicity[(number - 1) as usize]
        .std_dev
        .map(|sd| 1.0 / (1.0 + sd))
        .unwrap_or(0.0)
}

/// Transition-successor frequency of the number's zodiac, normalized by
/// the busiest successor.
fn zodiac_score(number: u8, snapshot: &AnalysisSnapshot) -> f64 {
    let max = snapshot.zodiac_successor_counts.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return 0.0;
    }
    let zodiac = snapshot.attributes_of(number).zodiac;
    snapshot.zodiac_successor_counts[zodiac.index()] as f64 / max as f64
}

/// Combination-weighted frequency of the number's element.
fn element_score(number: u8, snapshot: &AnalysisSnapshot) -> f64 {
    let max = snapshot.element_weights.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return 0.0;
    }
    let element = snapshot.attributes_of(number).element;
    snapshot.element_weights[element.index()] as f64 / max as f64
}

/// Four 0.25-weighted checks against the special-number distributions.
fn attribute_match_score(number: u8, snapshot: &AnalysisSnapshot) -> f64 {
    let attrs = snapshot.attributes_of(number);
    let special = &snapshot.special;
    let mut score = 0.0;

    if (number % 2 == 1) == special.majority_odd() {
        score += 0.25;
    }
    if (number > 24) == special.majority_big() {
        score += 0.25;
    }

    let max_zodiac = special.zodiac_counts.iter().copied().max().unwrap_or(0);
    if max_zodiac > 0 {
        score += special.zodiac_counts[attrs.zodiac.index()] as f64 / max_zodiac as f64 * 0.25;
    }
    let max_element = special.element_counts.iter().copied().max().unwrap_or(0);
    if max_element > 0 {
        score += special.element_counts[attrs.element.index()] as f64 / max_element as f64 * 0.25;
    }

    score
}

fn sum_score(number: u8, snapshot: &AnalysisSnapshot) -> f64 {
    if snapshot.max_sum_deviation <= 0.0 {
        return 0.0;
    }
    let deviation = (number as f64 - snapshot.average_sum).abs() / snapshot.max_sum_deviation;
    1.0 - deviation.min(1.0)
}

fn tail_score(number: u8, snapshot: &AnalysisSnapshot) -> f64 {
    let max = snapshot.tail_digit_counts.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return 0.0;
    }
    snapshot.tail_digit_counts[(number % 10) as usize] as f64 / max as f64
}

fn consecutive_score(number: u8, snapshot: &AnalysisSnapshot) -> f64 {
    let max = snapshot.run_participation.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return 0.0;
    }
    snapshot.run_participation[(number - 1) as usize] as f64 / max as f64
}
