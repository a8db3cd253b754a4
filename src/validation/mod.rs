//! Prediction validation
//!
//! Compares an issued prediction against the actual draw and produces the
//! per-dimension feedback signal that drives weight adaptation. Validation
//! is pure: it never touches historical data or engine state.

pub mod feedback;

use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::attributes::AttributeSet;
use crate::error::Result;
use crate::types::{DrawResult, PredictionResult, PICK_COUNT};

/// Per-dimension match counts and deviations between the predicted and
/// actual 7-number sets. Match counts are class-membership counts against
/// the actual set's class multiset, not positional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationDetails {
    pub zodiac_matches: u32,
    pub element_matches: u32,
    pub color_matches: u32,
    pub parity_matches: u32,
    pub size_matches: u32,
    /// |predicted sum - actual sum| / actual sum, 0 when the actual sum is 0.
    pub sum_deviation: f64,
    /// Same measure over last-digit sums.
    pub tail_deviation: f64,
    /// Predicted run lengths that equal some actual run length.
    pub consecutive_matches: u32,
    /// Predicted adjacent gaps within ±1 of some actual gap.
    pub distance_matches: u32,
}

/// Outcome of validating one prediction against one draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Ordinary numbers hit, 0..=6.
    pub hit_count: u32,
    pub special_hit: bool,
    /// (hit_count + special_hit) / 7.
    pub accuracy: f64,
    pub hit_numbers: Vec<u8>,
    pub missed_numbers: Vec<u8>,
    /// Weighted per-dimension match rate in [0,1].
    pub attribute_match_rate: f64,
    pub details: ValidationDetails,
}

/// Compare a prediction to the actual draw.
pub fn validate(prediction: &PredictionResult, actual: &DrawResult) -> Result<ValidationResult> {
    let hit: Vec<u8> = prediction
        .numbers
        .iter()
        .copied()
        .filter(|n| actual.numbers.contains(n))
        .collect();
    let special_hit = prediction.special_number == actual.special_number;

    let details = validation_details(&prediction.all_numbers(), &actual.all_numbers())?;
    let attribute_match_rate = attribute_match_rate(&details);

    let hit_count = hit.len() as u32;
    let accuracy = (hit_count + u32::from(special_hit)) as f64 / PICK_COUNT as f64;

    let mut hit_numbers = hit.clone();
    if special_hit {
        hit_numbers.push(prediction.special_number);
    }
    let mut missed_numbers: Vec<u8> = prediction
        .numbers
        .iter()
        .copied()
        .filter(|n| !actual.numbers.contains(n))
        .collect();
    if !special_hit {
        missed_numbers.push(prediction.special_number);
    }

    Ok(ValidationResult {
        hit_count,
        special_hit,
        accuracy,
        hit_numbers,
        missed_numbers,
        attribute_match_rate,
        details,
    })
}

fn validation_details(
    predicted: &[u8; PICK_COUNT],
    actual: &[u8; PICK_COUNT],
) -> Result<ValidationDetails> {
    let mut predicted_attrs = Vec::with_capacity(PICK_COUNT);
    for &n in predicted {
        predicted_attrs.push(AttributeSet::resolve(n)?);
    }
    let mut actual_attrs = Vec::with_capacity(PICK_COUNT);
    for &n in actual {
        actual_attrs.push(AttributeSet::resolve(n)?);
    }

    let membership = |check: &dyn Fn(&AttributeSet, &AttributeSet) -> bool| -> u32 {
        predicted_attrs
            .iter()
            .filter(|p| actual_attrs.iter().any(|a| check(p, a)))
            .count() as u32
    };

    let zodiac_matches = membership(&|p, a| p.zodiac == a.zodiac);
    let element_matches = membership(&|p, a| p.element == a.element);
    let color_matches = membership(&|p, a| p.color == a.color);
    let parity_matches = membership(&|p, a| p.parity == a.parity);
    let size_matches = membership(&|p, a| p.size == a.size);

    let predicted_sum: i64 = predicted.iter().map(|&n| n as i64).sum();
    let actual_sum: i64 = actual.iter().map(|&n| n as i64).sum();
    let sum_deviation = if actual_sum == 0 {
        0.0
    } else {
        (predicted_sum - actual_sum).abs() as f64 / actual_sum as f64
    };

    let predicted_tail: i64 = predicted.iter().map(|&n| (n % 10) as i64).sum();
    let actual_tail: i64 = actual.iter().map(|&n| (n % 10) as i64).sum();
    let tail_deviation = if actual_tail == 0 {
        0.0
    } else {
        (predicted_tail - actual_tail).abs() as f64 / actual_tail as f64
    };

    let predicted_runs = run_lengths(predicted);
    let actual_runs = run_lengths(actual);
    let consecutive_matches = predicted_runs
        .iter()
        .map(|p| actual_runs.iter().filter(|a| *a == p).count() as u32)
        .sum();

    let predicted_gaps = adjacent_gaps(predicted);
    let actual_gaps = adjacent_gaps(actual);
    let distance_matches = predicted_gaps
        .iter()
        .filter(|&&p| actual_gaps.iter().any(|&a| (p as i16 - a as i16).abs() <= 1))
        .count() as u32;

    Ok(ValidationDetails {
        zodiac_matches,
        element_matches,
        color_matches,
        parity_matches,
        size_matches,
        sum_deviation,
        tail_deviation,
        consecutive_matches,
        distance_matches,
    })
}

/// Lengths of the maximal consecutive runs (2+) in a 7-number set.
fn run_lengths(numbers: &[u8; PICK_COUNT]) -> Vec<usize> {
    let mut sorted = *numbers;
    sorted.sort_unstable();

    let mut runs = Vec::new();
    let mut current = 1usize;
    for i in 1..PICK_COUNT {
        if sorted[i] == sorted[i - 1] + 1 {
            current += 1;
        } else {
            if current > 1 {
                runs.push(current);
            }
            current = 1;
        }
    }
    if current > 1 {
        runs.push(current);
    }
    runs
}

/// Adjacent differences of the sorted 7-number set.
fn adjacent_gaps(numbers: &[u8; PICK_COUNT]) -> Vec<u8> {
    let mut sorted = *numbers;
    sorted.sort_unstable();
    sorted.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Weighted per-dimension match rate, normalized by the 7 picks.
fn attribute_match_rate(details: &ValidationDetails) -> f64 {
    let sum_closeness = (1.0 - details.sum_deviation).max(0.0) * PICK_COUNT as f64;
    let tail_closeness = (1.0 - details.tail_deviation).max(0.0) * PICK_COUNT as f64;

    let weighted = details.zodiac_matches as f64 * 0.20
        + details.element_matches as f64 * 0.20
        + details.color_matches as f64 * 0.15
        + details.parity_matches as f64 * 0.10
        + details.size_matches as f64 * 0.10
        + sum_closeness * 0.10
        + tail_closeness * 0.05
        + details.consecutive_matches as f64 * 0.05
        + details.distance_matches as f64 * 0.05;

    (weighted / PICK_COUNT as f64).clamp(0.0, 1.0)
}

/// Human-readable validation report.
pub fn render_report(result: &ValidationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Prediction validation report");
    let _ = writeln!(out, "============================");
    let _ = writeln!(out, "Hits:");
    let _ = writeln!(out, "- ordinary numbers hit: {}/6", result.hit_count);
    let _ = writeln!(
        out,
        "- special number hit: {}",
        if result.special_hit { "yes" } else { "no" }
    );
    let _ = writeln!(out, "- overall accuracy: {:.2}%", result.accuracy * 100.0);
    let _ = writeln!(out);

    let mut hits = result.hit_numbers.clone();
    hits.sort_unstable();
    let mut missed = result.missed_numbers.clone();
    missed.sort_unstable();
    let _ = writeln!(out, "Hit numbers: {}", join_numbers(&hits));
    let _ = writeln!(out, "Missed numbers: {}", join_numbers(&missed));
    let _ = writeln!(out);

    let _ = writeln!(out, "Attribute match analysis:");
    let _ = writeln!(out, "- zodiac matches: {}/7", result.details.zodiac_matches);
    let _ = writeln!(out, "- element matches: {}/7", result.details.element_matches);
    let _ = writeln!(out, "- color matches: {}/7", result.details.color_matches);
    let _ = writeln!(out, "- parity matches: {}/7", result.details.parity_matches);
    let _ = writeln!(out, "- size matches: {}/7", result.details.size_matches);
    let _ = writeln!(out);

    let _ = writeln!(out, "Numeric analysis:");
    let _ = writeln!(
        out,
        "- sum deviation: {:.2}%",
        result.details.sum_deviation * 100.0
    );
    let _ = writeln!(
        out,
        "- tail sum deviation: {:.2}%",
        result.details.tail_deviation * 100.0
    );
    let _ = writeln!(
        out,
        "- consecutive run matches: {}",
        result.details.consecutive_matches
    );
    let _ = writeln!(out, "- distance matches: {}", result.details.distance_matches);
    let _ = writeln!(out);

    let _ = writeln!(out, "Overall:");
    let _ = writeln!(
        out,
        "attribute match rate: {:.2}%",
        result.attribute_match_rate * 100.0
    );
    out
}

fn join_numbers(numbers: &[u8]) -> String {
    if numbers.is_empty() {
        return "-".to_string();
    }
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
