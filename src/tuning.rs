//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`] so behavior can be tweaked
//! (or loaded from JSON) without touching simulation code.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Difficulty tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" | "med" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(SimError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Parameter set selected by a difficulty tier.
///
/// Speeds are in pixels per reference frame (1/60 s).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Ball speed after every serve
    pub initial_speed: f32,
    /// Cap for the time-based speed ramp
    pub max_speed: f32,
    /// Ramp increment per reference frame
    pub acceleration: f32,
    /// AI paddle tracking speed
    pub ai_speed: f32,
    /// Per-tick probability that the AI aims at a perturbed target
    pub mistake_chance: f32,
    /// Largest AI aim error in pixels (offset drawn from `[-range, range]`)
    pub mistake_range: i32,
}

impl DifficultyProfile {
    pub const EASY: Self = Self {
        initial_speed: 4.0,
        max_speed: 8.0,
        acceleration: 0.00002,
        ai_speed: 5.0,
        mistake_chance: 0.2,
        mistake_range: 70,
    };

    pub const MEDIUM: Self = Self {
        initial_speed: 5.0,
        max_speed: 10.0,
        acceleration: 0.00002,
        ai_speed: 6.0,
        mistake_chance: 0.1,
        mistake_range: 50,
    };

    pub const HARD: Self = Self {
        initial_speed: 6.0,
        max_speed: 12.0,
        acceleration: 0.00002,
        ai_speed: 7.0,
        mistake_chance: 0.05,
        mistake_range: 30,
    };

    fn validate(&self, tier: Difficulty) -> Result<()> {
        if !(self.initial_speed > 0.0) {
            return Err(invalid(format!("{tier}: initial_speed must be positive")));
        }
        if !(self.max_speed >= self.initial_speed) {
            return Err(invalid(format!(
                "{tier}: max_speed {} is below initial_speed {}",
                self.max_speed, self.initial_speed
            )));
        }
        if !(self.acceleration >= 0.0) {
            return Err(invalid(format!("{tier}: acceleration must not be negative")));
        }
        if !(self.ai_speed >= 0.0) {
            return Err(invalid(format!("{tier}: ai_speed must not be negative")));
        }
        check_probability(&format!("{tier}: mistake_chance"), self.mistake_chance)?;
        if self.mistake_range < 0 {
            return Err(invalid(format!("{tier}: mistake_range must not be negative")));
        }
        Ok(())
    }
}

/// Power-up spawn and effect parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpTuning {
    /// Per-tick spawn probability
    pub spawn_chance: f32,
    /// Maximum power-ups on the field at once
    pub max_live: usize,
    /// Effect duration in seconds
    pub duration: f32,
    /// Pickup square side in pixels
    pub size: f32,
    /// Paddle height multiplier for PaddleGrow
    pub grow_factor: f32,
    /// Paddle height multiplier for PaddleShrink
    pub shrink_factor: f32,
    /// Paddle movement multiplier for SpeedBoost
    pub speed_factor: f32,
    /// Ball size multiplier for BallSize
    pub ball_size_factor: f32,
}

impl Default for PowerUpTuning {
    fn default() -> Self {
        Self {
            spawn_chance: 0.002,
            max_live: 1,
            duration: 5.0,
            size: 20.0,
            grow_factor: 1.5,
            shrink_factor: 0.7,
            speed_factor: 1.5,
            ball_size_factor: 1.5,
        }
    }
}

/// Complete balance table for a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub field_width: f32,
    pub field_height: f32,

    // === Paddles ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Horizontal gap between the field edge and each paddle
    pub paddle_inset: f32,
    /// Keyboard paddle speed (pixels per reference frame)
    pub paddle_speed: f32,

    // === Ball ===
    pub ball_size: f32,
    /// Seconds after a serve before the speed ramp kicks in
    pub ramp_delay: f32,
    /// Paddle deflection strength as a fraction of the current speed
    pub deflection: f32,
    /// Vertical serve component as a fraction of the serve speed
    pub serve_vertical: f32,

    // === AI ===
    /// Drift speed back to center while the ball moves away
    pub ai_return_speed: f32,
    /// The AI does not drift when already this close to center
    pub ai_center_dead_zone: f32,

    // === Match ===
    pub winning_score: u32,

    // === Tables ===
    pub easy: DifficultyProfile,
    pub medium: DifficultyProfile,
    pub hard: DifficultyProfile,
    pub powerups: PowerUpTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 600.0,
            paddle_width: 15.0,
            paddle_height: 100.0,
            paddle_inset: 50.0,
            paddle_speed: 7.0,
            ball_size: 15.0,
            ramp_delay: 3.0,
            deflection: 0.75,
            serve_vertical: 0.7,
            ai_return_speed: 2.0,
            ai_center_dead_zone: 10.0,
            winning_score: 10,
            easy: DifficultyProfile::EASY,
            medium: DifficultyProfile::MEDIUM,
            hard: DifficultyProfile::HARD,
            powerups: PowerUpTuning::default(),
        }
    }
}

impl Tuning {
    /// Profile for a difficulty tier
    pub fn profile(&self, difficulty: Difficulty) -> &DifficultyProfile {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    /// Mutable profile for a difficulty tier
    pub fn profile_mut(&mut self, difficulty: Difficulty) -> &mut DifficultyProfile {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }

    /// Parse and validate a tuning table. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::debug!("Loaded tuning table ({} x {})", tuning.field_width, tuning.field_height);
        Ok(tuning)
    }

    /// Pretty JSON, the same shape `from_json` reads
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject tables the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        if !(self.field_width > 0.0 && self.field_height > 0.0) {
            return Err(invalid("field dimensions must be positive"));
        }
        if !(self.paddle_width > 0.0 && self.paddle_height > 0.0) {
            return Err(invalid("paddle dimensions must be positive"));
        }
        let p = &self.powerups;
        let tallest = self.paddle_height * p.grow_factor.max(p.shrink_factor).max(1.0);
        if tallest > self.field_height {
            return Err(invalid("paddle (grown) is taller than the field"));
        }
        if !(self.paddle_inset >= 0.0)
            || 2.0 * (self.paddle_inset + self.paddle_width) >= self.field_width
        {
            return Err(invalid("paddles do not fit inside the field"));
        }
        if !(self.ball_size > 0.0) {
            return Err(invalid("ball_size must be positive"));
        }
        if !(self.paddle_speed >= 0.0 && self.ai_return_speed >= 0.0) {
            return Err(invalid("paddle speeds must not be negative"));
        }
        if !(self.ramp_delay >= 0.0 && self.deflection >= 0.0 && self.serve_vertical >= 0.0) {
            return Err(invalid("ball parameters must not be negative"));
        }
        if self.winning_score == 0 {
            return Err(invalid("winning_score must be at least 1"));
        }
        for tier in Difficulty::ALL {
            self.profile(tier).validate(tier)?;
        }
        check_probability("powerups.spawn_chance", p.spawn_chance)?;
        if !(p.duration > 0.0) {
            return Err(invalid("powerups.duration must be positive"));
        }
        if !(p.size > 0.0) {
            return Err(invalid("powerups.size must be positive"));
        }
        let factors = [p.grow_factor, p.shrink_factor, p.speed_factor, p.ball_size_factor];
        if factors.iter().any(|f| !(*f > 0.0)) {
            return Err(invalid("power-up multipliers must be positive"));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> SimError {
    SimError::InvalidTuning(msg.into())
}

fn check_probability(name: &str, p: f32) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be within [0, 1], got {p}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_profiles_by_tier() {
        let tuning = Tuning::default();
        assert_eq!(tuning.profile(Difficulty::Easy).initial_speed, 4.0);
        assert_eq!(tuning.profile(Difficulty::Medium).max_speed, 10.0);
        assert_eq!(tuning.profile(Difficulty::Hard).ai_speed, 7.0);
        assert_eq!(tuning.profile(Difficulty::Hard).mistake_range, 30);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "winning_score": 3, "powerups": { "max_live": 2 } }"#)
            .expect("valid tuning");
        assert_eq!(tuning.winning_score, 3);
        assert_eq!(tuning.powerups.max_live, 2);
        assert_eq!(tuning.powerups.duration, 5.0);
        assert_eq!(tuning.field_width, 800.0);
    }

    #[test]
    fn test_rejects_max_below_initial() {
        let json = r#"{ "hard": { "initial_speed": 9.0, "max_speed": 4.0, "acceleration": 0.0,
            "ai_speed": 7.0, "mistake_chance": 0.05, "mistake_range": 30 } }"#;
        let err = Tuning::from_json(json).unwrap_err();
        assert!(matches!(err, SimError::InvalidTuning(_)));
        assert!(err.to_string().contains("Hard"));
    }

    #[test]
    fn test_edited_profile_is_validated() {
        let mut tuning = Tuning::default();
        tuning.profile_mut(Difficulty::Easy).mistake_chance = 2.0;
        assert_eq!(tuning.profile(Difficulty::Easy).mistake_chance, 2.0);
        assert!(matches!(tuning.validate(), Err(SimError::InvalidTuning(_))));

        tuning.profile_mut(Difficulty::Easy).mistake_chance = 0.5;
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_dumped_table_loads_back() {
        let mut tuning = Tuning::default();
        tuning.winning_score = 5;
        tuning.profile_mut(Difficulty::Hard).ai_speed = 9.0;

        let json = tuning.to_json().expect("serializes");
        let loaded = Tuning::from_json(&json).expect("valid tuning");
        assert_eq!(loaded.winning_score, 5);
        assert_eq!(loaded.profile(Difficulty::Hard).ai_speed, 9.0);
    }

    #[test]
    fn test_rejects_bad_probability() {
        let mut tuning = Tuning::default();
        tuning.powerups.spawn_chance = 1.5;
        assert!(matches!(tuning.validate(), Err(SimError::InvalidTuning(_))));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(Tuning::from_json("{ not json"), Err(SimError::Parse(_))));
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("EASY".parse::<Difficulty>().ok(), Some(Difficulty::Easy));
        assert_eq!(" med ".parse::<Difficulty>().ok(), Some(Difficulty::Medium));
        assert_eq!("hard".parse::<Difficulty>().ok(), Some(Difficulty::Hard));
        assert!(matches!(
            "nightmare".parse::<Difficulty>(),
            Err(SimError::UnknownDifficulty(_))
        ));
    }
}
