//! Error types for the prediction core
//!
//! All failures are local and synchronous; the core never retries or
//! notifies. Retry and notification policy belongs to the caller.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PredictionError>;

#[derive(Error, Debug)]
pub enum PredictionError {
    /// A number outside the 1..=49 domain reached the core.
    #[error("number {0} is outside the valid range 1..=49")]
    OutOfRange(u8),

    /// A draw record violated the integrity rules (duplicates, special
    /// number colliding with the ordinary set, variant mismatch).
    #[error("invalid draw record: {0}")]
    InvalidDraw(String),

    /// A weight vector whose components are negative or whose sum falls
    /// outside 1.0 within tolerance. Never silently corrected.
    #[error("invalid weight vector: components sum to {0}, expected 1.0 within 1e-9")]
    InvalidWeight(f64),

    /// The candidate pool is too small to fill 6 ordinary numbers plus
    /// 1 special number.
    #[error("only {0} distinct candidates available, need at least 7")]
    InsufficientCandidates(usize),
}
