//! Core data model: draws, datasets, predictions
//!
//! Draw records arrive from the external acquisition pipeline and are
//! read-only to the core. Construction is the defensive boundary: every
//! record is range- and distinctness-checked before it enters a dataset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PredictionError, Result};

/// Smallest drawable number.
pub const MIN_NUMBER: u8 = 1;
/// Largest drawable number.
pub const MAX_NUMBER: u8 = 49;
/// Ordinary numbers per draw.
pub const ORDINARY_COUNT: usize = 6;
/// Ordinary numbers plus the special number.
pub const PICK_COUNT: usize = 7;

/// The two supported lottery configurations. Same 1..=49 number range,
/// fully independent historical datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LotteryVariant {
    Macau,
    HongKong,
}

impl fmt::Display for LotteryVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LotteryVariant::Macau => write!(f, "macau"),
            LotteryVariant::HongKong => write!(f, "hongkong"),
        }
    }
}

impl FromStr for LotteryVariant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "macau" => Ok(LotteryVariant::Macau),
            "hongkong" | "hong_kong" | "hk" => Ok(LotteryVariant::HongKong),
            other => Err(format!("unknown lottery variant: {other}")),
        }
    }
}

/// One recorded lottery outcome: 6 ordinary numbers plus 1 special number.
/// Identity is the draw timestamp, unique and monotonic per variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawResult {
    pub draw_time: DateTime<Utc>,
    pub variant: LotteryVariant,
    pub numbers: [u8; ORDINARY_COUNT],
    pub special_number: u8,
}

impl DrawResult {
    pub fn new(
        draw_time: DateTime<Utc>,
        variant: LotteryVariant,
        numbers: [u8; ORDINARY_COUNT],
        special_number: u8,
    ) -> Result<Self> {
        let draw = Self {
            draw_time,
            variant,
            numbers,
            special_number,
        };
        draw.validate()?;
        Ok(draw)
    }

    /// Integrity check for records that bypassed [`DrawResult::new`]
    /// (deserialized input from the persistence collaborator).
    pub fn validate(&self) -> Result<()> {
        let mut seen = [false; (MAX_NUMBER + 1) as usize];
        for &n in &self.numbers {
            if !(MIN_NUMBER..=MAX_NUMBER).contains(&n) {
                return Err(PredictionError::OutOfRange(n));
            }
            if seen[n as usize] {
                return Err(PredictionError::InvalidDraw(format!(
                    "duplicate ordinary number {n}"
                )));
            }
            seen[n as usize] = true;
        }
        if !(MIN_NUMBER..=MAX_NUMBER).contains(&self.special_number) {
            return Err(PredictionError::OutOfRange(self.special_number));
        }
        if seen[self.special_number as usize] {
            return Err(PredictionError::InvalidDraw(format!(
                "special number {} repeats an ordinary number",
                self.special_number
            )));
        }
        Ok(())
    }

    /// The 6 ordinary numbers followed by the special number.
    pub fn all_numbers(&self) -> [u8; PICK_COUNT] {
        let mut all = [0u8; PICK_COUNT];
        all[..ORDINARY_COUNT].copy_from_slice(&self.numbers);
        all[ORDINARY_COUNT] = self.special_number;
        all
    }
}

/// Chronologically ordered draw history for one variant. Read-only
/// statistical input; construction sorts by timestamp and drops
/// duplicate timestamps.
#[derive(Debug, Clone)]
pub struct HistoricalDataset {
    variant: LotteryVariant,
    draws: Vec<DrawResult>,
}

impl HistoricalDataset {
    pub fn new(variant: LotteryVariant, mut draws: Vec<DrawResult>) -> Result<Self> {
        for draw in &draws {
            if draw.variant != variant {
                return Err(PredictionError::InvalidDraw(format!(
                    "draw at {} belongs to variant {}, dataset is {}",
                    draw.draw_time, draw.variant, variant
                )));
            }
            draw.validate()?;
        }
        draws.sort_by_key(|d| d.draw_time);
        draws.dedup_by_key(|d| d.draw_time);
        Ok(Self { variant, draws })
    }

    pub fn variant(&self) -> LotteryVariant {
        self.variant
    }

    pub fn draws(&self) -> &[DrawResult] {
        &self.draws
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }
}

/// One issued prediction: 6 ordinary numbers in rank order, the special
/// number, and a [0,1] self-assessment of plausibility. Immutable;
/// consumed by the validator once the matching draw is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub numbers: [u8; ORDINARY_COUNT],
    pub special_number: u8,
    pub confidence: f64,
}

impl PredictionResult {
    /// The 6 ordinary numbers followed by the special number.
    pub fn all_numbers(&self) -> [u8; PICK_COUNT] {
        let mut all = [0u8; PICK_COUNT];
        all[..ORDINARY_COUNT].copy_from_slice(&self.numbers);
        all[ORDINARY_COUNT] = self.special_number;
        all
    }
}
