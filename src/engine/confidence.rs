//! Prediction confidence estimation
//!
//! A [0,1] self-assessment of a finished prediction's plausibility,
//! independent of its eventual correctness. Each term starts at 1.0 and
//! takes multiplicative penalties for implausible shape; the historical
//! term replays a cheap attribute-seeded pick over consecutive draw pairs.

use std::collections::BTreeSet;

use crate::analysis::AnalysisSnapshot;
use crate::attributes::{CelestialType, Color, Element, YinYang, Zodiac};
use crate::error::Result;
use crate::types::{HistoricalDataset, MAX_NUMBER, MIN_NUMBER, PICK_COUNT};

const HISTORICAL_WEIGHT: f64 = 0.30;
const DISTRIBUTION_WEIGHT: f64 = 0.20;
const ZODIAC_WEIGHT: f64 = 0.20;
const ELEMENT_WEIGHT: f64 = 0.15;
const COLOR_WEIGHT: f64 = 0.15;

/// Blend the five confidence terms for a 7-number pick.
pub fn estimate(
    picks: &[u8; PICK_COUNT],
    dataset: &HistoricalDataset,
    snapshot: &AnalysisSnapshot,
) -> Result<f64> {
    if dataset.is_empty() {
        return Ok(0.0);
    }

    let confidence = historical_accuracy(dataset, snapshot) * HISTORICAL_WEIGHT
        + number_distribution_score(picks) * DISTRIBUTION_WEIGHT
        + zodiac_combination_score(picks, snapshot) * ZODIAC_WEIGHT
        + element_balance_score(picks, snapshot) * ELEMENT_WEIGHT
        + color_distribution_score(picks, snapshot) * COLOR_WEIGHT;

    Ok(confidence.clamp(0.0, 1.0))
}

/// Replay a simulated pick over each consecutive draw pair and average
/// the hit rate over 7 slots. The simulated pick is seeded from the
/// previous draw's special-number attributes: the first 7 numbers
/// (ascending) sharing its zodiac, element, or color.
fn historical_accuracy(dataset: &HistoricalDataset, snapshot: &AnalysisSnapshot) -> f64 {
    let draws = dataset.draws();
    if draws.len() < 2 {
        return 0.0;
    }

    let mut total_hits = 0usize;
    let mut total_slots = 0usize;
    for pair in draws.windows(2) {
        let seed = snapshot.attributes_of(pair[0].special_number);
        let simulated: Vec<u8> = (MIN_NUMBER..=MAX_NUMBER)
            .filter(|&n| {
                let attrs = snapshot.attributes_of(n);
                attrs.zodiac == seed.zodiac
                    || attrs.element == seed.element
                    || attrs.color == seed.color
            })
            .take(PICK_COUNT)
            .collect();

        let target = pair[1].all_numbers();
        total_hits += simulated.iter().filter(|n| target.contains(n)).count();
        total_slots += PICK_COUNT;
    }

    total_hits as f64 / total_slots as f64
}

/// Penalizes clumped or lopsided number layouts.
fn number_distribution_score(picks: &[u8; PICK_COUNT]) -> f64 {
    let mut score = 1.0;
    let mut sorted = *picks;
    sorted.sort_unstable();

    let gaps: Vec<f64> = sorted.windows(2).map(|w| (w[1] - w[0]) as f64).collect();
    let avg_gap = gaps.iter().sum::<f64>() / gaps.len() as f64;
    if !(3.0..=10.0).contains(&avg_gap) {
        score *= 0.8;
    }

    let odd = picks.iter().filter(|&&n| n % 2 == 1).count() as i32;
    let even = PICK_COUNT as i32 - odd;
    if (odd - even).abs() > 2 {
        score *= 0.8;
    }

    let small = picks.iter().filter(|&&n| n <= 24).count() as i32;
    let big = PICK_COUNT as i32 - small;
    if (small - big).abs() > 2 {
        score *= 0.8;
    }

    score
}

/// Penalizes narrow or unbalanced zodiac composition, judged over the
/// distinct zodiac set.
fn zodiac_combination_score(picks: &[u8; PICK_COUNT], snapshot: &AnalysisSnapshot) -> f64 {
    let mut score = 1.0;
    let zodiacs: BTreeSet<Zodiac> = picks
        .iter()
        .map(|&n| snapshot.attributes_of(n).zodiac)
        .collect();

    if zodiacs.len() < 4 {
        score *= 0.7;
    }

    let yin = zodiacs
        .iter()
        .filter(|z| z.traits().yin_yang == YinYang::Yin)
        .count() as i32;
    let yang = zodiacs.len() as i32 - yin;
    if (yin - yang).abs() > 2 {
        score *= 0.8;
    }

    let sky = zodiacs
        .iter()
        .filter(|z| z.traits().celestial == CelestialType::Sky)
        .count() as i32;
    let earth = zodiacs.len() as i32 - sky;
    if (sky - earth).abs() > 2 {
        score *= 0.8;
    }

    score
}

/// Penalizes missing elements and uneven element counts.
fn element_balance_score(picks: &[u8; PICK_COUNT], snapshot: &AnalysisSnapshot) -> f64 {
    let mut score = 1.0;
    let mut counts = [0u32; 5];
    for &n in picks {
        counts[snapshot.attributes_of(n).element.index()] += 1;
    }

    let present = counts.iter().filter(|&&c| c > 0).count();
    if present < 4 {
        score *= 0.8;
    }

    let mean = PICK_COUNT as f64 / Element::ALL.len() as f64;
    for &count in counts.iter().filter(|&&c| c > 0) {
        if (count as f64 - mean).abs() > 1.0 {
            score *= 0.9;
        }
    }

    score
}

/// Penalizes missing colors and uneven color counts.
fn color_distribution_score(picks: &[u8; PICK_COUNT], snapshot: &AnalysisSnapshot) -> f64 {
    let mut score = 1.0;
    let mut counts = [0u32; 3];
    for &n in picks {
        counts[snapshot.attributes_of(n).color.index()] += 1;
    }

    let present = counts.iter().filter(|&&c| c > 0).count();
    if present < Color::ALL.len() {
        score *= 0.7;
    }

    let mean = PICK_COUNT as f64 / Color::ALL.len() as f64;
    for &count in counts.iter().filter(|&&c| c > 0) {
        if (count as f64 - mean).abs() > 1.0 {
            score *= 0.9;
        }
    }

    score
}
