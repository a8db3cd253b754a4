//! Candidate number selection
//!
//! Eight per-dimension rules, each a pure function of the analysis
//! snapshot returning a subset of 1..=49. The union, deduplicated, is the
//! scorer's input. Ordering is not significant at this stage.

use crate::analysis::AnalysisSnapshot;
use crate::engine::weights::Dimension;
use crate::types::{MAX_NUMBER, MIN_NUMBER};

/// A zodiac transition pair seen more often than this marks its successor
/// zodiac as a pattern.
const TRANSITION_THRESHOLD: u32 = 5;
/// Periodicity rule: interval standard deviation below this counts as
/// stable.
const STABLE_STD_DEV: f64 = 2.0;

/// Union of all eight dimension rules, deduplicated, ascending.
pub fn generate_candidates(snapshot: &AnalysisSnapshot) -> Vec<u8> {
    let mut selected = [false; 49];
    for dimension in Dimension::ALL {
        for n in candidates_for(dimension, snapshot) {
            selected[(n - 1) as usize] = true;
        }
    }
    (MIN_NUMBER..=MAX_NUMBER)
        .filter(|&n| selected[(n - 1) as usize])
        .collect()
}

/// The candidate subset contributed by one dimension.
pub fn candidates_for(dimension: Dimension, snapshot: &AnalysisSnapshot) -> Vec<u8> {
    match dimension {
        Dimension::Periodicity => by_periodicity(snapshot),
        Dimension::Zodiac => by_zodiac_pattern(snapshot),
        Dimension::Element => by_element_pattern(snapshot),
        Dimension::Attribute => by_special_pattern(snapshot),
        Dimension::Sum => by_sum_pattern(snapshot),
        Dimension::Tail => by_tail_pattern(snapshot),
        Dimension::Consecutive => by_consecutive_pattern(snapshot),
        Dimension::Distance => by_distance_pattern(snapshot),
    }
}

/// Numbers whose occurrence intervals are stable.
fn by_periodicity(snapshot: &AnalysisSnapshot) -> Vec<u8> {
    domain()
        .filter(|&n| {
            snapshot.periodicity[(n - 1) as usize]
                .std_dev
                .map(|sd| sd < STABLE_STD_DEV)
                .unwrap_or(false)
        })
        .collect()
}

/// Numbers whose zodiac appears as the successor of a frequent transition.
fn by_zodiac_pattern(snapshot: &AnalysisSnapshot) -> Vec<u8> {
    let mut pattern_zodiacs = [false; 12];
    for (&(_, to), &count) in &snapshot.zodiac_transitions {
        if count > TRANSITION_THRESHOLD {
            pattern_zodiacs[to.index()] = true;
        }
    }
    domain()
        .filter(|&n| pattern_zodiacs[snapshot.attributes_of(n).zodiac.index()])
        .collect()
}

/// Numbers belonging to the single most frequent element combination.
fn by_element_pattern(snapshot: &AnalysisSnapshot) -> Vec<u8> {
    let Some(mask) = snapshot.most_frequent_combination else {
        return Vec::new();
    };
    domain()
        .filter(|&n| mask & (1 << snapshot.attributes_of(n).element.index()) != 0)
        .collect()
}

/// Numbers matching both majority classes of historical special numbers.
fn by_special_pattern(snapshot: &AnalysisSnapshot) -> Vec<u8> {
    let prefer_odd = snapshot.special.majority_odd();
    let prefer_big = snapshot.special.majority_big();
    domain()
        .filter(|&n| (n % 2 == 1) == prefer_odd && (n > 24) == prefer_big)
        .collect()
}

/// Numbers leaving a reachable residual toward the most frequent sum.
fn by_sum_pattern(snapshot: &AnalysisSnapshot) -> Vec<u8> {
    domain()
        .filter(|&n| {
            let remaining = snapshot.most_frequent_sum as i32 - n as i32;
            (6..=294).contains(&remaining)
        })
        .collect()
}

/// Numbers whose tail digit keeps the residual tail sum reachable.
fn by_tail_pattern(snapshot: &AnalysisSnapshot) -> Vec<u8> {
    domain()
        .filter(|&n| {
            let remaining = snapshot.most_frequent_tail_sum as i32 - (n % 10) as i32;
            (0..=54).contains(&remaining)
        })
        .collect()
}

/// Numbers that could start a run of the most frequent length. Vacuous
/// (admits everything) when no run was ever observed.
fn by_consecutive_pattern(snapshot: &AnalysisSnapshot) -> Vec<u8> {
    let length = snapshot.most_frequent_run_length;
    domain()
        .filter(|&n| length == 0 || n as usize + length - 1 <= MAX_NUMBER as usize)
        .collect()
}

/// Numbers lying at one of the 3 most frequent adjacent distances from
/// some historically drawn number.
fn by_distance_pattern(snapshot: &AnalysisSnapshot) -> Vec<u8> {
    let mut selected = [false; 49];
    for idx in 0..49 {
        if !snapshot.drawn[idx] {
            continue;
        }
        let drawn = (idx + 1) as i32;
        for &gap in &snapshot.top_gaps {
            for candidate in [drawn - gap as i32, drawn + gap as i32] {
                if (MIN_NUMBER as i32..=MAX_NUMBER as i32).contains(&candidate) {
                    selected[(candidate - 1) as usize] = true;
                }
            }
        }
    }
    domain().filter(|&n| selected[(n - 1) as usize]).collect()
}

fn domain() -> impl Iterator<Item = u8> {
    MIN_NUMBER..=MAX_NUMBER
}
