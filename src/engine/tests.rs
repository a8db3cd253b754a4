//! Cross-module scenario tests for the prediction control loop

use chrono::{DateTime, TimeZone, Utc};

use super::weights::{Dimension, WeightConfig, WEIGHT_SUM_TOLERANCE};
use super::{optimize_weights, PredictionEngine};
use crate::types::{DrawResult, HistoricalDataset, LotteryVariant, MAX_NUMBER, MIN_NUMBER};

fn ts(day: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + day * 86_400, 0).unwrap()
}

fn draw(day: i64, numbers: [u8; 6], special: u8) -> DrawResult {
    DrawResult::new(ts(day), LotteryVariant::HongKong, numbers, special).unwrap()
}

fn history() -> HistoricalDataset {
    HistoricalDataset::new(
        LotteryVariant::HongKong,
        vec![
            draw(0, [1, 2, 3, 15, 27, 39], 44),
            draw(1, [5, 9, 13, 22, 31, 46], 8),
            draw(2, [2, 6, 18, 24, 33, 41], 17),
            draw(3, [4, 12, 19, 28, 36, 47], 23),
            draw(4, [3, 7, 16, 25, 34, 43], 11),
            draw(5, [8, 14, 21, 29, 38, 45], 2),
            draw(6, [1, 10, 20, 26, 35, 42], 30),
            draw(7, [6, 13, 23, 32, 40, 48], 19),
            draw(8, [5, 11, 17, 27, 37, 44], 21),
            draw(9, [9, 15, 24, 31, 41, 49], 7),
            draw(10, [2, 12, 22, 30, 39, 46], 35),
            draw(11, [4, 8, 18, 28, 38, 47], 26),
        ],
    )
    .unwrap()
}

#[test]
fn test_prediction_is_deterministic() {
    let dataset = history();
    let engine = PredictionEngine::new(LotteryVariant::HongKong);

    let first = engine.predict_next_draw(&dataset).unwrap();
    let second = engine.predict_next_draw(&dataset).unwrap();
    assert_eq!(first, second);

    // A second engine with the same stored weights agrees too.
    let other = PredictionEngine::new(LotteryVariant::HongKong);
    assert_eq!(other.predict_next_draw(&dataset).unwrap(), first);
}

#[test]
fn test_prediction_shape() {
    let dataset = history();
    let engine = PredictionEngine::new(LotteryVariant::HongKong);
    let prediction = engine.predict_next_draw(&dataset).unwrap();

    let mut seen = [false; 50];
    for n in prediction.all_numbers() {
        assert!((MIN_NUMBER..=MAX_NUMBER).contains(&n));
        assert!(!seen[n as usize], "duplicate pick {n}");
        seen[n as usize] = true;
    }
    assert!((0.0..=1.0).contains(&prediction.confidence));
}

#[test]
fn test_variant_mismatch_rejected() {
    let dataset = history();
    let engine = PredictionEngine::new(LotteryVariant::Macau);
    assert!(engine.predict_next_draw(&dataset).is_err());
}

#[test]
fn test_perfect_match_cycle() {
    let dataset = history();
    let engine = PredictionEngine::new(LotteryVariant::HongKong);
    let prediction = engine.predict_next_draw(&dataset).unwrap();

    let actual = DrawResult::new(
        ts(12),
        LotteryVariant::HongKong,
        prediction.numbers,
        prediction.special_number,
    )
    .unwrap();

    let result = engine.validate_and_update_weights(&prediction, &actual).unwrap();
    assert_eq!(result.hit_count, 6);
    assert!(result.special_hit);
    assert_eq!(result.accuracy, 1.0);
    assert!((engine.current_weights().sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE);
}

#[test]
fn test_total_miss_cycle() {
    let dataset = history();
    let engine = PredictionEngine::new(LotteryVariant::HongKong);
    let prediction = engine.predict_next_draw(&dataset).unwrap();

    // Build an actual draw disjoint from the prediction's 7-number set.
    let picked = prediction.all_numbers();
    let complement: Vec<u8> = (MIN_NUMBER..=MAX_NUMBER)
        .filter(|n| !picked.contains(n))
        .collect();
    let mut numbers = [0u8; 6];
    numbers.copy_from_slice(&complement[..6]);
    let actual =
        DrawResult::new(ts(12), LotteryVariant::HongKong, numbers, complement[6]).unwrap();

    let result = engine.validate_and_update_weights(&prediction, &actual).unwrap();
    assert_eq!(result.hit_count, 0);
    assert!(!result.special_hit);
    assert_eq!(result.accuracy, 0.0);
    assert_eq!(result.missed_numbers.len(), 7);
}

#[test]
fn test_insufficient_history_skips_tuning() {
    let dataset = HistoricalDataset::new(
        LotteryVariant::HongKong,
        vec![
            draw(0, [1, 2, 3, 15, 27, 39], 44),
            draw(1, [5, 9, 13, 22, 31, 46], 8),
            draw(2, [2, 6, 18, 24, 33, 41], 17),
            draw(3, [4, 12, 19, 28, 36, 47], 23),
            draw(4, [3, 7, 16, 25, 34, 43], 11),
        ],
    )
    .unwrap();

    let current = WeightConfig::balanced();
    let tuned = optimize_weights(&dataset, &current).unwrap();
    assert_eq!(tuned, current);
}

#[test]
fn test_tuning_with_enough_history_stays_valid() {
    let dataset = history();
    let current = WeightConfig::balanced();
    let tuned = optimize_weights(&dataset, &current).unwrap();

    assert!((tuned.sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE);
    for dim in Dimension::ALL {
        assert!(tuned.weight(dim) > 0.0);
    }
}

#[test]
fn test_feedback_cycles_keep_weights_valid() {
    let dataset = history();
    let engine = PredictionEngine::new(LotteryVariant::HongKong);

    // Rolling replay: predict from each prefix, validate against the next
    // draw, feed the outcome back.
    for i in 3..dataset.len() {
        let prefix = HistoricalDataset::new(
            LotteryVariant::HongKong,
            dataset.draws()[..i].to_vec(),
        )
        .unwrap();
        let prediction = engine.predict_next_draw(&prefix).unwrap();
        let actual = &dataset.draws()[i];
        let result = engine.validate_and_update_weights(&prediction, actual).unwrap();

        assert!((0.0..=1.0).contains(&result.accuracy));
        let weights = engine.current_weights();
        assert!((weights.sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE);
        for dim in Dimension::ALL {
            assert!(weights.weight(dim) > 0.0);
        }
    }
}
