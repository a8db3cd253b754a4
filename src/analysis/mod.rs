//! Statistical aggregation over historical draws
//!
//! One [`AnalysisSnapshot`] is computed per prediction cycle and shared,
//! read-only, by the candidate generator, the scorer, and the confidence
//! estimator. All aggregates use ordered maps or fixed arrays and break
//! ties toward the smallest key, so a snapshot of the same dataset is
//! byte-for-byte reproducible.

use std::collections::BTreeMap;

use crate::attributes::{AttributeSet, Zodiac};
use crate::error::Result;
use crate::types::{DrawResult, HistoricalDataset, MAX_NUMBER, MIN_NUMBER, PICK_COUNT};

/// Occurrence-interval statistics for one number.
#[derive(Debug, Clone, Copy, Default)]
pub struct Periodicity {
    /// Draws in which the number appeared.
    pub occurrences: u32,
    /// Mean gap between consecutive appearances, in draws.
    pub mean_interval: f64,
    /// Standard deviation of the gaps. `None` until the number has
    /// appeared at least twice.
    pub std_dev: Option<f64>,
}

/// Parity, size, and class distributions of historical special numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecialPatterns {
    pub odd: u32,
    pub even: u32,
    pub big: u32,
    pub small: u32,
    pub zodiac_counts: [u32; 12],
    pub element_counts: [u32; 5],
}

impl SpecialPatterns {
    pub fn majority_odd(&self) -> bool {
        self.odd > self.even
    }

    pub fn majority_big(&self) -> bool {
        self.big > self.small
    }
}

/// Immutable statistical snapshot of one dataset.
#[derive(Debug, Clone)]
pub struct AnalysisSnapshot {
    /// Resolved attributes for every number in the domain, indexed by
    /// `number - 1`. Shared arena so downstream stages never re-resolve.
    pub attributes: [AttributeSet; 49],
    pub draw_count: usize,
    /// Indexed by `number - 1`.
    pub periodicity: [Periodicity; 49],
    /// Special-number zodiac transitions across consecutive draws.
    pub zodiac_transitions: BTreeMap<(Zodiac, Zodiac), u32>,
    /// Per-draw element combination (bitmask over [`crate::attributes::Element::ALL`]).
    pub element_combinations: BTreeMap<u8, u32>,
    /// Most frequent element combination, ties toward the smallest mask.
    pub most_frequent_combination: Option<u8>,
    /// Total combination weight carried by each element.
    pub element_weights: [u32; 5],
    /// Transition counts keyed by the successor zodiac.
    pub zodiac_successor_counts: [u32; 12],
    pub special: SpecialPatterns,
    /// Full-draw (6 + special) sum distribution.
    pub sum_counts: BTreeMap<u32, u32>,
    pub most_frequent_sum: u32,
    pub average_sum: f64,
    pub max_sum_deviation: f64,
    /// Tail-digit-sum distribution of full draws.
    pub tail_sum_counts: BTreeMap<u32, u32>,
    pub most_frequent_tail_sum: u32,
    /// Frequency of each last decimal digit over all drawn numbers.
    pub tail_digit_counts: [u32; 10],
    /// Distribution of maximal consecutive-run lengths (runs of 2+).
    pub run_length_counts: BTreeMap<usize, u32>,
    /// Most frequent run length, 0 when no run was ever observed.
    pub most_frequent_run_length: usize,
    /// How often each number extended a consecutive run, indexed by
    /// `number - 1`.
    pub run_participation: [u32; 49],
    /// Adjacent-gap distribution over sorted per-draw number sets.
    pub gap_counts: BTreeMap<u8, u32>,
    /// The 3 most frequent adjacent gaps, most frequent first.
    pub top_gaps: Vec<u8>,
    /// Whether each number was ever drawn, indexed by `number - 1`.
    pub drawn: [bool; 49],
    /// Per number, how many draws contained some number within absolute
    /// distance 3 of it. Indexed by `number - 1`.
    pub near3_counts: [u32; 49],
}

impl AnalysisSnapshot {
    pub fn compute(dataset: &HistoricalDataset) -> Result<Self> {
        let mut attributes = [AttributeSet::resolve(MIN_NUMBER)?; 49];
        for n in MIN_NUMBER..=MAX_NUMBER {
            attributes[(n - 1) as usize] = AttributeSet::resolve(n)?;
        }

        let draws = dataset.draws();
        let mut snapshot = Self {
            attributes,
            draw_count: draws.len(),
            periodicity: [Periodicity::default(); 49],
            zodiac_transitions: BTreeMap::new(),
            element_combinations: BTreeMap::new(),
            most_frequent_combination: None,
            element_weights: [0; 5],
            zodiac_successor_counts: [0; 12],
            special: SpecialPatterns::default(),
            sum_counts: BTreeMap::new(),
            most_frequent_sum: 0,
            average_sum: 0.0,
            max_sum_deviation: 0.0,
            tail_sum_counts: BTreeMap::new(),
            most_frequent_tail_sum: 0,
            tail_digit_counts: [0; 10],
            run_length_counts: BTreeMap::new(),
            most_frequent_run_length: 0,
            run_participation: [0; 49],
            gap_counts: BTreeMap::new(),
            top_gaps: Vec::new(),
            drawn: [false; 49],
            near3_counts: [0; 49],
        };

        snapshot.collect_periodicity(draws);
        snapshot.collect_transitions(draws);
        snapshot.collect_combinations(draws);
        snapshot.collect_special_patterns(draws);
        snapshot.collect_sums(draws);
        snapshot.collect_runs_and_gaps(draws);
        snapshot.collect_proximity(draws);

        Ok(snapshot)
    }

    fn collect_periodicity(&mut self, draws: &[DrawResult]) {
        let mut positions: Vec<Vec<usize>> = vec![Vec::new(); 49];
        for (i, draw) in draws.iter().enumerate() {
            for n in draw.all_numbers() {
                positions[(n - 1) as usize].push(i);
                self.drawn[(n - 1) as usize] = true;
                self.tail_digit_counts[(n % 10) as usize] += 1;
            }
        }

        for (idx, seen_at) in positions.iter().enumerate() {
            let occurrences = seen_at.len() as u32;
            if seen_at.len() < 2 {
                self.periodicity[idx] = Periodicity {
                    occurrences,
                    mean_interval: 0.0,
                    std_dev: None,
                };
                continue;
            }
            let intervals: Vec<f64> = seen_at
                .windows(2)
                .map(|w| (w[1] - w[0]) as f64)
                .collect();
            let mean = intervals.iter().sum::<f64>() / intervals.len() as f64;
            let variance = intervals
                .iter()
                .map(|d| (d - mean) * (d - mean))
                .sum::<f64>()
                / intervals.len() as f64;
            self.periodicity[idx] = Periodicity {
                occurrences,
                mean_interval: mean,
                std_dev: Some(variance.sqrt()),
            };
        }
    }

    fn collect_transitions(&mut self, draws: &[DrawResult]) {
        for pair in draws.windows(2) {
            let from = self.attributes[(pair[0].special_number - 1) as usize].zodiac;
            let to = self.attributes[(pair[1].special_number - 1) as usize].zodiac;
            *self.zodiac_transitions.entry((from, to)).or_insert(0) += 1;
        }
        for (&(_, to), &count) in &self.zodiac_transitions {
            self.zodiac_successor_counts[to.index()] += count;
        }
    }

    fn collect_combinations(&mut self, draws: &[DrawResult]) {
        for draw in draws {
            let mut mask = 0u8;
            for n in draw.all_numbers() {
                mask |= 1 << self.attributes[(n - 1) as usize].element.index();
            }
            *self.element_combinations.entry(mask).or_insert(0) += 1;
        }
        self.most_frequent_combination = max_count_key(&self.element_combinations);
        for (&mask, &count) in &self.element_combinations {
            for i in 0..5 {
                if mask & (1 << i) != 0 {
                    self.element_weights[i] += count;
                }
            }
        }
    }

    fn collect_special_patterns(&mut self, draws: &[DrawResult]) {
        for draw in draws {
            let attrs = self.attributes[(draw.special_number - 1) as usize];
            if draw.special_number % 2 == 1 {
                self.special.odd += 1;
            } else {
                self.special.even += 1;
            }
            if draw.special_number > 24 {
                self.special.big += 1;
            } else {
                self.special.small += 1;
            }
            self.special.zodiac_counts[attrs.zodiac.index()] += 1;
            self.special.element_counts[attrs.element.index()] += 1;
        }
    }

    fn collect_sums(&mut self, draws: &[DrawResult]) {
        let mut sums = Vec::with_capacity(draws.len());
        for draw in draws {
            let sum: u32 = draw.all_numbers().iter().map(|&n| n as u32).sum();
            let tail_sum: u32 = draw.all_numbers().iter().map(|&n| (n % 10) as u32).sum();
            *self.sum_counts.entry(sum).or_insert(0) += 1;
            *self.tail_sum_counts.entry(tail_sum).or_insert(0) += 1;
            sums.push(sum as f64);
        }
        self.most_frequent_sum = max_count_key(&self.sum_counts).unwrap_or(0);
        self.most_frequent_tail_sum = max_count_key(&self.tail_sum_counts).unwrap_or(0);
        if !sums.is_empty() {
            self.average_sum = sums.iter().sum::<f64>() / sums.len() as f64;
            self.max_sum_deviation = sums
                .iter()
                .map(|s| (s - self.average_sum).abs())
                .fold(0.0, f64::max);
        }
    }

    fn collect_runs_and_gaps(&mut self, draws: &[DrawResult]) {
        for draw in draws {
            let mut sorted = draw.all_numbers();
            sorted.sort_unstable();

            let mut run_len = 1usize;
            for i in 1..PICK_COUNT {
                let gap = sorted[i] - sorted[i - 1];
                *self.gap_counts.entry(gap).or_insert(0) += 1;
                if gap == 1 {
                    run_len += 1;
                    self.run_participation[(sorted[i] - 1) as usize] += 1;
                } else {
                    if run_len > 1 {
                        *self.run_length_counts.entry(run_len).or_insert(0) += 1;
                    }
                    run_len = 1;
                }
            }
            if run_len > 1 {
                *self.run_length_counts.entry(run_len).or_insert(0) += 1;
            }
        }
        self.most_frequent_run_length = max_count_key(&self.run_length_counts).unwrap_or(0);

        let mut by_count: Vec<(u8, u32)> =
            self.gap_counts.iter().map(|(&g, &c)| (g, c)).collect();
        by_count.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        self.top_gaps = by_count.into_iter().take(3).map(|(g, _)| g).collect();
    }

    fn collect_proximity(&mut self, draws: &[DrawResult]) {
        for draw in draws {
            let mut covered = [false; 49];
            for n in draw.all_numbers() {
                let lo = n.saturating_sub(3).max(MIN_NUMBER);
                let hi = (n + 3).min(MAX_NUMBER);
                for m in lo..=hi {
                    covered[(m - 1) as usize] = true;
                }
            }
            for (idx, hit) in covered.iter().enumerate() {
                if *hit {
                    self.near3_counts[idx] += 1;
                }
            }
        }
    }

    pub fn attributes_of(&self, number: u8) -> AttributeSet {
        self.attributes[(number - 1) as usize]
    }

    /// Fraction of historical draws containing some number within
    /// absolute distance 3 of `number`.
    pub fn near3_fraction(&self, number: u8) -> f64 {
        if self.draw_count == 0 {
            return 0.0;
        }
        self.near3_counts[(number - 1) as usize] as f64 / self.draw_count as f64
    }
}

/// Key with the highest count; ties resolve to the smallest key since
/// `BTreeMap` iterates in ascending key order.
fn max_count_key<K: Copy + Ord>(map: &BTreeMap<K, u32>) -> Option<K> {
    let mut best: Option<(K, u32)> = None;
    for (&key, &count) in map {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((key, count)),
        }
    }
    best.map(|(k, _)| k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LotteryVariant;
    use chrono::{TimeZone, Utc};

    fn draw(day: i64, numbers: [u8; 6], special: u8) -> DrawResult {
        DrawResult::new(
            Utc.timestamp_opt(1_700_000_000 + day * 86_400, 0).unwrap(),
            LotteryVariant::HongKong,
            numbers,
            special,
        )
        .unwrap()
    }

    fn dataset(draws: Vec<DrawResult>) -> HistoricalDataset {
        HistoricalDataset::new(LotteryVariant::HongKong, draws).unwrap()
    }

    #[test]
    fn test_empty_dataset() {
        let snapshot = AnalysisSnapshot::compute(&dataset(vec![])).unwrap();
        assert_eq!(snapshot.draw_count, 0);
        assert_eq!(snapshot.most_frequent_sum, 0);
        assert_eq!(snapshot.most_frequent_run_length, 0);
        assert!(snapshot.top_gaps.is_empty());
        assert_eq!(snapshot.near3_fraction(10), 0.0);
    }

    #[test]
    fn test_periodicity_intervals() {
        // Number 10 appears in draws 0, 2, 4: intervals [2, 2], std dev 0.
        let snapshot = AnalysisSnapshot::compute(&dataset(vec![
            draw(0, [10, 20, 30, 40, 2, 4], 6),
            draw(1, [11, 21, 31, 41, 3, 5], 7),
            draw(2, [10, 22, 32, 42, 8, 14], 16),
            draw(3, [12, 23, 33, 43, 9, 15], 17),
            draw(4, [10, 24, 34, 44, 18, 26], 28),
        ]))
        .unwrap();

        let p = snapshot.periodicity[9];
        assert_eq!(p.occurrences, 3);
        assert_eq!(p.mean_interval, 2.0);
        assert_eq!(p.std_dev, Some(0.0));

        // Number 11 appeared once: no interval statistics.
        assert_eq!(snapshot.periodicity[10].occurrences, 1);
        assert!(snapshot.periodicity[10].std_dev.is_none());
    }

    #[test]
    fn test_special_patterns_majorities() {
        let snapshot = AnalysisSnapshot::compute(&dataset(vec![
            draw(0, [2, 4, 6, 8, 10, 12], 25),
            draw(1, [14, 16, 18, 20, 22, 24], 27),
            draw(2, [1, 3, 5, 7, 9, 11], 26),
        ]))
        .unwrap();

        // Specials 25, 27, 26: two odd, all big.
        assert!(snapshot.special.majority_odd());
        assert!(snapshot.special.majority_big());
        assert_eq!(snapshot.special.odd, 2);
        assert_eq!(snapshot.special.even, 1);
        assert_eq!(snapshot.special.big, 3);
    }

    #[test]
    fn test_zodiac_transitions_counted() {
        // Specials 7 (pig) -> 19 (pig) -> 31 (pig): two pig->pig transitions.
        let snapshot = AnalysisSnapshot::compute(&dataset(vec![
            draw(0, [1, 2, 3, 4, 5, 6], 7),
            draw(1, [8, 9, 10, 11, 12, 13], 19),
            draw(2, [14, 15, 16, 17, 18, 20], 31),
        ]))
        .unwrap();

        assert_eq!(
            snapshot.zodiac_transitions.get(&(Zodiac::Pig, Zodiac::Pig)),
            Some(&2)
        );
        assert_eq!(snapshot.zodiac_successor_counts[Zodiac::Pig.index()], 2);
    }

    #[test]
    fn test_run_statistics() {
        // 1,2,3 is a run of 3; 10,11 a run of 2.
        let snapshot = AnalysisSnapshot::compute(&dataset(vec![
            draw(0, [1, 2, 3, 10, 11, 30], 40),
        ]))
        .unwrap();

        assert_eq!(snapshot.run_length_counts.get(&3), Some(&1));
        assert_eq!(snapshot.run_length_counts.get(&2), Some(&1));
        // Ties resolve to the smaller length.
        assert_eq!(snapshot.most_frequent_run_length, 2);
        // Numbers 2, 3, 11 extended a run.
        assert_eq!(snapshot.run_participation[1], 1);
        assert_eq!(snapshot.run_participation[2], 1);
        assert_eq!(snapshot.run_participation[10], 1);
        assert_eq!(snapshot.run_participation[0], 0);
    }

    #[test]
    fn test_sum_statistics() {
        let snapshot = AnalysisSnapshot::compute(&dataset(vec![
            draw(0, [1, 2, 3, 4, 5, 6], 7),        // sum 28
            draw(1, [1, 2, 3, 4, 5, 6], 7),        // sum 28 again
            draw(2, [10, 20, 30, 40, 41, 42], 49), // sum 232
        ]))
        .unwrap();

        assert_eq!(snapshot.sum_counts.get(&28), Some(&2));
        assert_eq!(snapshot.most_frequent_sum, 28);
        assert!((snapshot.average_sum - 96.0).abs() < 1e-9);
        assert!((snapshot.max_sum_deviation - 136.0).abs() < 1e-9);
    }

    #[test]
    fn test_top_gaps_deterministic() {
        let snapshot = AnalysisSnapshot::compute(&dataset(vec![
            draw(0, [1, 3, 5, 7, 9, 11], 13),
        ]))
        .unwrap();

        // Every adjacent gap is 2.
        assert_eq!(snapshot.top_gaps, vec![2]);
        assert_eq!(snapshot.gap_counts.get(&2), Some(&6));
    }

    #[test]
    fn test_near3_fraction() {
        let snapshot = AnalysisSnapshot::compute(&dataset(vec![
            draw(0, [1, 2, 3, 4, 5, 6], 7),
            draw(1, [40, 41, 42, 43, 44, 45], 46),
        ]))
        .unwrap();

        // 10 is within 3 of 7 (first draw) but far from the second.
        assert!((snapshot.near3_fraction(10) - 0.5).abs() < 1e-9);
        // 25 is far from both draws.
        assert_eq!(snapshot.near3_fraction(25), 0.0);
        // 44 is covered only by the second draw.
        assert!((snapshot.near3_fraction(44) - 0.5).abs() < 1e-9);
    }
}
