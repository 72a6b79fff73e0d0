//! Match settings chosen by the player
//!
//! Consumed by the match controller at phase transitions (menu / restart),
//! never while a match is running.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::tuning::Difficulty;

/// Who drives the right paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControlMode {
    /// Player 1 against the AI
    #[default]
    SinglePlayer,
    /// Two humans sharing the keyboard
    TwoPlayer,
}

impl ControlMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlMode::SinglePlayer => "Single Player",
            ControlMode::TwoPlayer => "Two Players",
        }
    }
}

impl fmt::Display for ControlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlMode {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "single" | "single-player" | "singleplayer" | "ai" | "1" => {
                Ok(ControlMode::SinglePlayer)
            }
            "two" | "two-player" | "twoplayer" | "versus" | "2" => Ok(ControlMode::TwoPlayer),
            _ => Err(SimError::UnknownControlMode(s.to_string())),
        }
    }
}

/// Player selections for a match
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub mode: ControlMode,
    /// Fixed RNG seed; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings = serde_json::from_str(json)?;
        log::debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_mode_from_str() {
        assert_eq!("ai".parse::<ControlMode>().ok(), Some(ControlMode::SinglePlayer));
        assert_eq!("Two".parse::<ControlMode>().ok(), Some(ControlMode::TwoPlayer));
        assert!(matches!(
            "three".parse::<ControlMode>(),
            Err(SimError::UnknownControlMode(_))
        ));
    }

    #[test]
    fn test_settings_json_defaults() {
        let settings = Settings::from_json(r#"{ "difficulty": "Hard" }"#).expect("valid settings");
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.mode, ControlMode::SinglePlayer);
        assert_eq!(settings.seed, None);

        let json = Settings { seed: Some(7), ..settings.clone() }.to_json().expect("serializes");
        assert_eq!(Settings::from_json(&json).expect("parses").seed, Some(7));
    }

    #[test]
    fn test_settings_bad_enum() {
        assert!(matches!(
            Settings::from_json(r#"{ "mode": "Chaos" }"#),
            Err(SimError::Parse(_))
        ));
    }
}
