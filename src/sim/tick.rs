//! Simulation tick
//!
//! Match controller and ball physics. One call to [`tick`] samples the
//! input, moves the paddles (player or AI), advances the ball, runs the
//! power-up lifecycle and reports what happened as an ordered event list.

use log::{debug, info};

use super::ai::ai_target_delta;
use super::clock::{clamp_dt, dt_scaled};
use super::collision::{resolve_paddle_hit, scoring_side, wall_contact};
use super::powerup;
use super::state::{GameEvent, GamePhase, GameState, Paddle, Side};
use crate::settings::ControlMode;
use crate::tuning::Difficulty;
use glam::Vec2;

/// Movement request for one paddle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PaddleIntent {
    #[default]
    Idle,
    Up,
    Down,
    /// Center on this Y (mouse/touch control)
    To(f32),
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Player 1 (left paddle)
    pub left: PaddleIntent,
    /// Player 2 (right paddle); ignored when the AI plays
    pub right: PaddleIntent,
    /// Pause toggle
    pub pause: bool,
    /// Start a new match after game over
    pub restart: bool,
    /// Leave the menu and start a match
    pub start: bool,
    /// Return to the menu from anywhere
    pub menu: bool,
    /// Difficulty pick (menu / game over only)
    pub difficulty: Option<Difficulty>,
    /// Control mode pick (menu / game over only)
    pub mode: Option<ControlMode>,
}

/// Advance the match by one tick of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.menu {
        if state.phase != GamePhase::Menu {
            debug!("{:?} -> Menu", state.phase);
            state.phase = GamePhase::Menu;
        }
        return events;
    }

    match state.phase {
        GamePhase::Menu | GamePhase::GameOver => {
            if let Some(difficulty) = input.difficulty {
                state.select_difficulty(difficulty);
            }
            if let Some(mode) = input.mode {
                state.select_mode(mode);
            }
        }
        GamePhase::Playing | GamePhase::Paused => {
            if input.difficulty.is_some() || input.mode.is_some() {
                debug!("Ignoring difficulty/mode change mid-match");
            }
        }
    }

    if input.start {
        if state.phase == GamePhase::Menu {
            state.start_match();
        } else {
            debug!("Ignoring start in {:?}", state.phase);
        }
    }

    if input.restart {
        if state.phase == GamePhase::GameOver {
            state.start_match();
        } else {
            debug!("Ignoring restart in {:?}", state.phase);
        }
    }

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                debug!("Paused");
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                debug!("Resumed");
            }
            _ => {}
        }
    }

    // Don't tick if paused, in the menu or game over
    if state.phase != GamePhase::Playing {
        return events;
    }

    let dt = clamp_dt(dt);
    let scale = dt_scaled(dt);
    state.time += dt;

    // Paddles
    let field_height = state.tuning.field_height;
    let paddle_speed = state.tuning.paddle_speed;
    apply_intent(&mut state.left, input.left, paddle_speed, scale, field_height);
    match state.mode {
        ControlMode::TwoPlayer => {
            apply_intent(&mut state.right, input.right, paddle_speed, scale, field_height);
        }
        ControlMode::SinglePlayer => {
            let profile = state.profile();
            let delta = ai_target_delta(
                &state.right,
                &state.ball,
                &profile,
                &state.tuning,
                scale,
                &mut state.rng,
            );
            state.right.move_by(delta, field_height);
        }
    }

    update_ball(state, scale, &mut events);
    if state.phase == GamePhase::GameOver {
        return events;
    }

    powerup::update(state, &mut events);
    events
}

/// Move a human-controlled paddle
fn apply_intent(
    paddle: &mut Paddle,
    intent: PaddleIntent,
    speed: f32,
    scale: f32,
    field_height: f32,
) {
    let step = speed * paddle.speed_multiplier * scale;
    match intent {
        PaddleIntent::Idle => {}
        PaddleIntent::Up => paddle.move_by(-step, field_height),
        PaddleIntent::Down => paddle.move_by(step, field_height),
        PaddleIntent::To(y) => {
            paddle.follow_pointer(y, field_height);
        }
    }
}

/// Ball physics for one tick: trail, motion, ramp, walls, paddles, scoring
pub fn update_ball(state: &mut GameState, scale: f32, events: &mut Vec<GameEvent>) {
    let profile = state.profile();
    let tuning = &state.tuning;
    let ball = &mut state.ball;

    ball.record_trail();
    ball.rect.translate(ball.vel * scale);

    // Speed ramp: only |vx| is rescaled, vy is left alone
    if state.time - state.last_reset_time > tuning.ramp_delay && ball.speed < profile.max_speed {
        let factor = if ball.speed > 0.0 { ball.vel.x.abs() / ball.speed } else { 1.0 };
        ball.speed = (ball.speed + profile.acceleration * scale).min(profile.max_speed);
        ball.vel.x = (ball.speed * factor).copysign(ball.vel.x);
    }

    if let Some(at) = wall_contact(&ball.rect, tuning.field_height) {
        ball.vel.y = -ball.vel.y;
        events.push(GameEvent::HitWall { at });
    }

    for paddle in [&state.left, &state.right] {
        if let Some(at) = resolve_paddle_hit(ball, paddle, tuning.deflection) {
            events.push(GameEvent::HitPaddle { side: paddle.side, at });
        }
    }

    if let Some(scorer) = scoring_side(&ball.rect, tuning.field_width) {
        let exit_x = match scorer {
            Side::Right => 0.0,
            Side::Left => tuning.field_width,
        };
        let at = Vec2::new(exit_x, ball.center().y);
        score_point(state, scorer, at, events);
    }
}

/// Award a point, then either end the match or serve again
fn score_point(state: &mut GameState, scorer: Side, at: Vec2, events: &mut Vec<GameEvent>) {
    state.scores[scorer.index()] += 1;
    events.push(GameEvent::Scored { side: scorer, at });
    info!(
        "{:?} scores ({} - {})",
        scorer,
        state.score(Side::Left),
        state.score(Side::Right)
    );

    if state.score(scorer) >= state.tuning.winning_score {
        state.phase = GamePhase::GameOver;
        state.winner = Some(scorer);
        events.push(GameEvent::GameWon { side: scorer });
        info!("{:?} wins the match", scorer);
    } else {
        state.reset_ball();
    }
}
