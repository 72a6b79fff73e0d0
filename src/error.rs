//! Error types for the fallible edges of the engine.
//!
//! The tick itself never fails: malformed intents are clamped or ignored.
//! Errors only come from loading configuration and acquiring entropy.

/// Main error type for the simulation crate.
#[derive(thiserror::Error, Debug)]
pub enum SimError {
    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("Unknown control mode: {0}")]
    UnknownControlMode(String),

    /// The OS random source could not seed the match RNG.
    #[error("Entropy source unavailable: {0}")]
    Entropy(String),
}

pub type Result<T> = std::result::Result<T, SimError>;
