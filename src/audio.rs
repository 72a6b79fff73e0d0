//! Sound cues for game events
//!
//! The simulation never plays audio. A platform audio layer maps each
//! emitted [`GameEvent`] to a cue with [`SoundEffect::for_event`] and plays
//! it however it likes.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball hits top/bottom wall
    Bounce,
    /// Ball hits a paddle
    Hit,
    /// A point was scored
    Score,
    /// Match won
    Win,
    /// Power-up collected
    Powerup,
}

impl SoundEffect {
    /// Cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<SoundEffect> {
        match event {
            GameEvent::HitWall { .. } => Some(SoundEffect::Bounce),
            GameEvent::HitPaddle { .. } => Some(SoundEffect::Hit),
            GameEvent::Scored { .. } => Some(SoundEffect::Score),
            GameEvent::GameWon { .. } => Some(SoundEffect::Win),
            GameEvent::PowerupCollected { .. } => Some(SoundEffect::Powerup),
            GameEvent::PowerupSpawned { .. } | GameEvent::PowerupExpired { .. } => None,
        }
    }

    /// Asset stem (`bounce` -> `sounds/bounce.wav`)
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Bounce => "bounce",
            SoundEffect::Hit => "hit",
            SoundEffect::Score => "score",
            SoundEffect::Win => "win",
            SoundEffect::Powerup => "powerup",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EffectTarget, PowerUpKind, Side};
    use glam::Vec2;

    #[test]
    fn test_event_cues() {
        let cue = |e: GameEvent| SoundEffect::for_event(&e);
        assert_eq!(cue(GameEvent::HitWall { at: Vec2::ZERO }), Some(SoundEffect::Bounce));
        assert_eq!(
            cue(GameEvent::HitPaddle { side: Side::Left, at: Vec2::ZERO }),
            Some(SoundEffect::Hit)
        );
        assert_eq!(
            cue(GameEvent::Scored { side: Side::Right, at: Vec2::ZERO }),
            Some(SoundEffect::Score)
        );
        assert_eq!(cue(GameEvent::GameWon { side: Side::Left }), Some(SoundEffect::Win));
        assert_eq!(
            cue(GameEvent::PowerupCollected { kind: PowerUpKind::BallSize, side: Side::Left }),
            Some(SoundEffect::Powerup)
        );
        assert_eq!(
            cue(GameEvent::PowerupExpired {
                kind: PowerUpKind::BallSize,
                target: EffectTarget::Ball,
            }),
            None
        );
    }

    #[test]
    fn test_names() {
        assert_eq!(SoundEffect::Powerup.name(), "powerup");
        assert_eq!(SoundEffect::Bounce.name(), "bounce");
    }
}
