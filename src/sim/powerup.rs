//! Power-up lifecycle: spawn, pickup, timed effects
//!
//! Effects never stack. Picking up an effect that is already running on the
//! same target restarts its timer. Paddle height, paddle speed and ball size
//! are always recomputed from the effect timers, so expiry cannot leave a
//! stale attribute behind.

use glam::Vec2;
use rand::Rng;

use super::geom::Rect;
use super::state::{EffectTarget, EffectTimer, GameEvent, GameState, PowerUp, PowerUpKind, Side};

/// Per-tick power-up update: expire, spawn, collect (in that order)
pub fn update(state: &mut GameState, events: &mut Vec<GameEvent>) {
    expire_effects(state, events);
    maybe_spawn(state, events);
    collect(state, events);
}

/// Roll for a new pickup in the central half of the field
pub fn maybe_spawn(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let cfg = &state.tuning.powerups;
    if state.powerups.len() >= cfg.max_live {
        return;
    }
    if state.rng.random::<f32>() >= cfg.spawn_chance {
        return;
    }

    let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
    let (w, h) = (state.tuning.field_width, state.tuning.field_height);
    let x = state.rng.random_range((w / 4.0) as i32..=(3.0 * w / 4.0) as i32) as f32;
    let y = state.rng.random_range((h / 4.0) as i32..=(3.0 * h / 4.0) as i32) as f32;
    let at = Vec2::new(x, y);
    let size = state.tuning.powerups.size;

    state.powerups.push(PowerUp {
        kind,
        rect: Rect::from_center(at, size, size),
    });
    log::debug!("Spawned {:?} at ({:.0}, {:.0})", kind, x, y);
    events.push(GameEvent::PowerupSpawned { kind, at });
}

/// Pick up every power-up the ball overlaps.
///
/// The pickup goes to the player the ball is heading toward, not the one
/// who last hit it.
pub fn collect(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let ball_rect = state.ball.rect;
    let receiver = if state.ball.vel.x < 0.0 { Side::Left } else { Side::Right };

    let mut taken = Vec::new();
    state.powerups.retain(|p| {
        if ball_rect.intersects(&p.rect) {
            taken.push(p.kind);
            false
        } else {
            true
        }
    });

    for kind in taken {
        apply_effect(state, kind, receiver);
        log::debug!("{:?} collected {:?}", receiver, kind);
        events.push(GameEvent::PowerupCollected { kind, side: receiver });
    }
}

/// What an effect modifies when `receiver` picks it up
pub fn effect_target(kind: PowerUpKind, receiver: Side) -> EffectTarget {
    match kind {
        PowerUpKind::SpeedBoost | PowerUpKind::PaddleGrow => EffectTarget::Paddle(receiver),
        PowerUpKind::PaddleShrink => EffectTarget::Paddle(receiver.opponent()),
        PowerUpKind::BallSize => EffectTarget::Ball,
    }
}

/// Start (or restart) an effect at the current simulated time
pub fn apply_effect(state: &mut GameState, kind: PowerUpKind, receiver: Side) {
    let target = effect_target(kind, receiver);
    let now = state.time;
    let expires_at = now + state.tuning.powerups.duration;

    match state
        .effects
        .iter_mut()
        .find(|t| t.kind == kind && t.target == target)
    {
        Some(timer) => {
            timer.applied_at = now;
            timer.expires_at = expires_at;
        }
        None => state.effects.push(EffectTimer {
            kind,
            target,
            applied_at: now,
            expires_at,
        }),
    }

    refresh_attributes(state);
}

/// Drop every timer that has run out and restore the attributes
pub fn expire_effects(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let now = state.time;
    let before = state.effects.len();

    state.effects.retain(|t| {
        if now >= t.expires_at {
            log::debug!("{:?} on {:?} expired", t.kind, t.target);
            events.push(GameEvent::PowerupExpired {
                kind: t.kind,
                target: t.target,
            });
            false
        } else {
            true
        }
    });

    if state.effects.len() != before {
        refresh_attributes(state);
    }
}

/// Whether `kind` is currently running on `target`
pub fn is_active(state: &GameState, kind: PowerUpKind, target: EffectTarget) -> bool {
    state.effects.iter().any(|t| t.kind == kind && t.target == target)
}

/// Recompute paddle heights, speed multipliers and ball size from the timers
fn refresh_attributes(state: &mut GameState) {
    let cfg = state.tuning.powerups.clone();
    let field_height = state.tuning.field_height;

    for side in [Side::Left, Side::Right] {
        let target = EffectTarget::Paddle(side);

        // Grow and shrink both resize the paddle; the newest one wins
        let size_factor = state
            .effects
            .iter()
            .filter(|t| t.target == target)
            .filter(|t| matches!(t.kind, PowerUpKind::PaddleGrow | PowerUpKind::PaddleShrink))
            .max_by(|a, b| a.applied_at.total_cmp(&b.applied_at))
            .map_or(1.0, |t| match t.kind {
                PowerUpKind::PaddleGrow => cfg.grow_factor,
                _ => cfg.shrink_factor,
            });
        let boosted = is_active(state, PowerUpKind::SpeedBoost, target);

        let paddle = state.paddle_mut(side);
        let height = (paddle.base_height * size_factor).trunc();
        if paddle.rect.h != height {
            paddle.set_height(height, field_height);
        }
        paddle.speed_multiplier = if boosted { cfg.speed_factor } else { 1.0 };
    }

    let ball_factor = if is_active(state, PowerUpKind::BallSize, EffectTarget::Ball) {
        cfg.ball_size_factor
    } else {
        1.0
    };
    let size = (state.ball.base_size * ball_factor).trunc();
    if state.ball.rect.w != size {
        state.ball.set_size(size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;
    use crate::tuning::Tuning;

    fn playing_state() -> GameState {
        let mut tuning = Tuning::default();
        tuning.powerups.spawn_chance = 0.0;
        let mut state = GameState::new(9, tuning);
        state.start_match();
        state
    }

    #[test]
    fn test_spawn_in_central_half() {
        let mut state = playing_state();
        state.tuning.powerups.spawn_chance = 1.0;
        state.tuning.powerups.max_live = 1;

        for _ in 0..200 {
            state.powerups.clear();
            let mut events = Vec::new();
            maybe_spawn(&mut state, &mut events);
            assert_eq!(state.powerups.len(), 1);
            let c = state.powerups[0].rect.center();
            assert!((200.0..=600.0).contains(&c.x));
            assert!((150.0..=450.0).contains(&c.y));
            assert!(matches!(events[0], GameEvent::PowerupSpawned { .. }));
        }
    }

    #[test]
    fn test_spawn_respects_max_live() {
        let mut state = playing_state();
        state.tuning.powerups.spawn_chance = 1.0;
        state.tuning.powerups.max_live = 2;
        let mut events = Vec::new();
        for _ in 0..10 {
            maybe_spawn(&mut state, &mut events);
        }
        assert_eq!(state.powerups.len(), 2);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_collect_goes_to_receiver() {
        for (vx, receiver) in [(-5.0, Side::Left), (5.0, Side::Right)] {
            let mut state = playing_state();
            let center = state.ball.center();
            state.ball.vel.x = vx;
            state.powerups.push(PowerUp {
                kind: PowerUpKind::PaddleGrow,
                rect: Rect::from_center(center, 20.0, 20.0),
            });

            let mut events = Vec::new();
            collect(&mut state, &mut events);
            assert!(state.powerups.is_empty());
            assert_eq!(
                events,
                vec![GameEvent::PowerupCollected { kind: PowerUpKind::PaddleGrow, side: receiver }]
            );
            assert_eq!(state.paddle(receiver).rect.h, 150.0);
            assert_eq!(state.paddle(receiver.opponent()).rect.h, 100.0);
        }
    }

    #[test]
    fn test_shrink_hits_opponent() {
        let mut state = playing_state();
        apply_effect(&mut state, PowerUpKind::PaddleShrink, Side::Left);
        assert_eq!(state.right.rect.h, 70.0);
        assert_eq!(state.left.rect.h, 100.0);
        assert!(is_active(&state, PowerUpKind::PaddleShrink, EffectTarget::Paddle(Side::Right)));
    }

    #[test]
    fn test_speed_boost_and_ball_size() {
        let mut state = playing_state();
        let center = state.ball.center();
        apply_effect(&mut state, PowerUpKind::SpeedBoost, Side::Right);
        apply_effect(&mut state, PowerUpKind::BallSize, Side::Right);
        assert_eq!(state.right.speed_multiplier, 1.5);
        assert_eq!(state.left.speed_multiplier, 1.0);
        assert_eq!(state.ball.rect.w, 22.0);
        assert_eq!(state.ball.center(), center);
    }

    #[test]
    fn test_expiry_restores_baseline() {
        let mut state = playing_state();
        for kind in PowerUpKind::ALL {
            apply_effect(&mut state, kind, Side::Left);
        }

        let mut events = Vec::new();
        state.time += 4.9;
        expire_effects(&mut state, &mut events);
        assert!(events.is_empty());
        assert_eq!(state.left.rect.h, 150.0);

        state.time += 0.1;
        expire_effects(&mut state, &mut events);
        assert_eq!(events.len(), 4);
        assert!(state.effects.is_empty());
        assert_eq!(state.left.rect.h, 100.0);
        assert_eq!(state.right.rect.h, 100.0);
        assert_eq!(state.left.speed_multiplier, 1.0);
        assert_eq!(state.ball.rect.w, 15.0);
    }

    #[test]
    fn test_reacquire_refreshes_without_stacking() {
        let mut state = playing_state();
        apply_effect(&mut state, PowerUpKind::PaddleGrow, Side::Left);
        state.time = 3.0;
        apply_effect(&mut state, PowerUpKind::PaddleGrow, Side::Left);

        assert_eq!(state.effects.len(), 1);
        assert_eq!(state.effects[0].expires_at, 8.0);
        assert_eq!(state.left.rect.h, 150.0);
    }

    #[test]
    fn test_newest_size_effect_wins() {
        let mut state = playing_state();
        // Left grows itself, then Right shrinks Left
        apply_effect(&mut state, PowerUpKind::PaddleGrow, Side::Left);
        state.time = 1.0;
        apply_effect(&mut state, PowerUpKind::PaddleShrink, Side::Right);
        assert_eq!(state.left.rect.h, 70.0);

        // Grow runs out at t=5; shrink holds until t=6
        let mut events = Vec::new();
        state.time = 5.0;
        expire_effects(&mut state, &mut events);
        assert_eq!(state.left.rect.h, 70.0);
        state.time = 6.0;
        expire_effects(&mut state, &mut events);
        assert_eq!(state.left.rect.h, 100.0);
        assert_eq!(state.phase, GamePhase::Playing);
    }
}
