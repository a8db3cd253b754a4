//! Mark Six Draw Prediction Engine
//!
//! Analyzes historical lottery draw records and produces ranked predictions
//! for the next draw, with a self-correcting weighting mechanism driven by
//! validation outcomes.
//!
//! ## Architecture
//!
//! ```text
//! HistoricalDataset → Analysis → Candidates → Scorer → PredictionResult
//!                                               ↑              │
//!                                          WeightConfig        │ once the draw is known
//!                                               ↑              ▼
//!                                         FeedbackLoop ← Validator
//! ```
//!
//! The engine and validator form one closed control loop: every validated
//! prediction reshapes the weight configuration used by the next cycle.
//! All core operations are pure functions of their snapshot inputs; the
//! CLI shell owns file I/O, configuration, and logging setup.

pub mod analysis;
pub mod attributes;
pub mod config;
pub mod engine;
pub mod error;
pub mod types;
pub mod validation;
