//! Neon Pong - two-paddle arcade Pong with an AI opponent and power-ups
//!
//! Core modules:
//! - `sim`: Simulation engine (physics, collisions, AI, power-ups, match flow)
//! - `tuning`: Data-driven game balance and difficulty profiles
//! - `settings`: Player-facing selections (difficulty, control mode, seed)
//! - `audio`: Sound cue mapping for emitted game events
//! - `error`: Error type for the fallible edges (config, entropy)
//! - `logging`: `env_logger` setup for hosts

pub mod audio;
pub mod error;
pub mod logging;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use audio::SoundEffect;
pub use error::{Result, SimError};
pub use logging::init as init_logging;
pub use settings::{ControlMode, Settings};
pub use tuning::{Difficulty, DifficultyProfile, PowerUpTuning, Tuning};

/// Engine-wide timing constants
pub mod consts {
    /// Frame rate the per-tick constants were tuned against
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Largest step a single tick may take (stalls get clamped to this)
    pub const MAX_DT: f32 = 0.05;
}
