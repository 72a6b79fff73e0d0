//! Single-player opponent
//!
//! The AI owns the right paddle. It chases the ball while the ball is coming
//! toward it (with tier-dependent aim errors) and otherwise drifts back to
//! center.

use rand::Rng;

use super::state::{Ball, Paddle};
use crate::tuning::{DifficultyProfile, Tuning};

/// Y the AI aims at this tick: the ball center, occasionally perturbed.
pub fn ai_target<R: Rng>(ball: &Ball, profile: &DifficultyProfile, rng: &mut R) -> f32 {
    let mut target = ball.center().y;
    if rng.random::<f32>() < profile.mistake_chance {
        let range = profile.mistake_range.max(0);
        target += rng.random_range(-range..=range) as f32;
    }
    target
}

/// Vertical displacement for the AI paddle this tick.
///
/// Never overshoots its target within a tick. The caller applies the result
/// with [`Paddle::move_by`], which keeps the paddle on screen.
pub fn ai_target_delta<R: Rng>(
    paddle: &Paddle,
    ball: &Ball,
    profile: &DifficultyProfile,
    tuning: &Tuning,
    dt_scaled: f32,
    rng: &mut R,
) -> f32 {
    let paddle_y = paddle.rect.center().y;

    if ball.vel.x > 0.0 {
        let target = ai_target(ball, profile, rng);
        let speed = profile.ai_speed * paddle.speed_multiplier * dt_scaled;
        step_toward(paddle_y, target, speed)
    } else {
        let center = tuning.field_height / 2.0;
        if (paddle_y - center).abs() > tuning.ai_center_dead_zone {
            step_toward(paddle_y, center, tuning.ai_return_speed * dt_scaled)
        } else {
            0.0
        }
    }
}

/// Signed step of at most `max_step` from `from` toward `to`
#[inline]
fn step_toward(from: f32, to: f32, max_step: f32) -> f32 {
    let distance = to - from;
    distance.signum() * distance.abs().min(max_step.max(0.0))
}
