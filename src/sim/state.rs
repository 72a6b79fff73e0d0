//! Game state and core simulation types
//!
//! Everything a match needs lives in [`GameState`]; there is no global state,
//! so any number of matches can run side by side.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::error::{Result, SimError};
use crate::settings::{ControlMode, Settings};
use crate::tuning::{Difficulty, DifficultyProfile, Tuning};

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Menus are up; nothing simulates
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Someone reached the winning score
    GameOver,
}

/// Which paddle: Left is player 1, Right is player 2 (or the AI)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Maximum number of trail points to store
pub const TRAIL_LENGTH: usize = 10;

/// A player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub rect: Rect,
    /// Height without any power-up applied
    pub base_height: f32,
    /// 1.0 normally, boosted while a SpeedBoost is active
    pub speed_multiplier: f32,
}

impl Paddle {
    /// Paddle at its home column, vertically centered
    pub fn new(side: Side, tuning: &Tuning) -> Self {
        let x = match side {
            Side::Left => tuning.paddle_inset,
            Side::Right => tuning.field_width - tuning.paddle_inset - tuning.paddle_width,
        };
        let y = (tuning.field_height - tuning.paddle_height) / 2.0;
        Self {
            side,
            rect: Rect::new(x, y, tuning.paddle_width, tuning.paddle_height),
            base_height: tuning.paddle_height,
            speed_multiplier: 1.0,
        }
    }

    /// Move vertically, clamped so the paddle stays fully on screen
    pub fn move_by(&mut self, dy: f32, field_height: f32) {
        if dy.is_finite() {
            self.rect.y += dy;
        }
        self.clamp_to(field_height);
    }

    /// Center the paddle on a pointer Y. Rejected (no move) if any part of
    /// the paddle would leave the field.
    pub fn follow_pointer(&mut self, y: f32, field_height: f32) -> bool {
        let half = self.rect.h / 2.0;
        if y - half > 0.0 && y + half < field_height {
            self.rect.y = y - half;
            true
        } else {
            false
        }
    }

    /// Resize keeping the top edge, then pull back inside the field
    pub fn set_height(&mut self, height: f32, field_height: f32) {
        self.rect.h = height;
        self.clamp_to(field_height);
    }

    pub fn clamp_to(&mut self, field_height: f32) {
        let max_y = (field_height - self.rect.h).max(0.0);
        self.rect.y = self.rect.y.clamp(0.0, max_y);
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Square bounding box
    pub rect: Rect,
    pub vel: Vec2,
    /// Ramp speed, tracked apart from `vel` so bounces don't disturb it
    pub speed: f32,
    /// Side length without any power-up applied
    pub base_size: f32,
    /// Recent centers for rendering (oldest first, newest last)
    #[serde(skip)]
    pub trail: VecDeque<Vec2>,
}

impl Ball {
    pub fn new(center: Vec2, size: f32) -> Self {
        Self {
            rect: Rect::from_center(center, size, size),
            vel: Vec2::ZERO,
            speed: 0.0,
            base_size: size,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    /// Record current position to trail (call each tick)
    pub fn record_trail(&mut self) {
        self.trail.push_back(self.center());
        while self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }
    }

    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }

    /// Resize around the current center
    pub fn set_size(&mut self, size: f32) {
        let center = self.center();
        self.rect = Rect::from_center(center, size, size);
    }

    /// Re-center and launch in a random diagonal direction at `speed`
    pub fn serve<R: Rng>(&mut self, center: Vec2, speed: f32, vertical: f32, rng: &mut R) {
        self.rect.set_center(center);
        self.speed = speed;
        let sx = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let sy = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.vel = Vec2::new(speed * sx, speed * vertical * sy);
        self.clear_trail();
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    SpeedBoost,
    PaddleGrow,
    PaddleShrink,
    BallSize,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::SpeedBoost,
        PowerUpKind::PaddleGrow,
        PowerUpKind::PaddleShrink,
        PowerUpKind::BallSize,
    ];
}

/// A pickup floating on the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub rect: Rect,
}

/// What a running effect modifies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTarget {
    Paddle(Side),
    Ball,
}

/// A running power-up effect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectTimer {
    pub kind: PowerUpKind,
    pub target: EffectTarget,
    /// Simulated time the effect was (last) applied
    pub applied_at: f32,
    /// Simulated time the effect reverts
    pub expires_at: f32,
}

/// Events emitted by a tick, in order, for audio/render collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off the top or bottom wall
    HitWall { at: Vec2 },
    /// Ball bounced off a paddle
    HitPaddle { side: Side, at: Vec2 },
    /// `side` scored; `at` is the exit point on the field edge
    Scored { side: Side, at: Vec2 },
    /// A power-up appeared
    PowerupSpawned { kind: PowerUpKind, at: Vec2 },
    /// The ball picked up a power-up on behalf of `side`
    PowerupCollected { kind: PowerUpKind, side: Side },
    /// An effect ran out
    PowerupExpired { kind: PowerUpKind, target: EffectTarget },
    /// `side` won the match
    GameWon { side: Side },
}

/// Complete match state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Current phase
    pub phase: GamePhase,
    /// Scores indexed by [`Side::index`]
    pub scores: [u32; 2],
    pub winner: Option<Side>,
    pub difficulty: Difficulty,
    pub mode: ControlMode,
    pub tuning: Tuning,
    /// Simulated seconds spent in `Playing`
    pub time: f32,
    /// Simulated time of the last serve (drives the speed ramp)
    pub last_reset_time: f32,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    /// Live pickups
    pub powerups: Vec<PowerUp>,
    /// Running effects
    pub effects: Vec<EffectTimer>,
    /// Match RNG (AI mistakes, serves, power-up spawns)
    pub rng: Pcg32,
}

impl GameState {
    /// Create a new match with a fixed seed. Starts in the menu.
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed), tuning)
    }

    /// Create a new match seeded from the OS random source
    pub fn from_entropy(tuning: Tuning) -> Result<Self> {
        let rng = Pcg32::try_from_os_rng().map_err(|e| SimError::Entropy(e.to_string()))?;
        Ok(Self::with_rng(rng, tuning))
    }

    /// Create a match from player settings
    pub fn from_settings(settings: &Settings, tuning: Tuning) -> Result<Self> {
        let mut state = match settings.seed {
            Some(seed) => Self::new(seed, tuning),
            None => Self::from_entropy(tuning)?,
        };
        state.difficulty = settings.difficulty;
        state.mode = settings.mode;
        Ok(state)
    }

    fn with_rng(rng: Pcg32, tuning: Tuning) -> Self {
        let center = Vec2::new(tuning.field_width / 2.0, tuning.field_height / 2.0);
        let mut state = Self {
            phase: GamePhase::Menu,
            scores: [0, 0],
            winner: None,
            difficulty: Difficulty::default(),
            mode: ControlMode::default(),
            left: Paddle::new(Side::Left, &tuning),
            right: Paddle::new(Side::Right, &tuning),
            ball: Ball::new(center, tuning.ball_size),
            tuning,
            time: 0.0,
            last_reset_time: 0.0,
            powerups: Vec::new(),
            effects: Vec::new(),
            rng,
        };
        state.reset_ball();
        state
    }

    /// Active difficulty profile
    pub fn profile(&self) -> DifficultyProfile {
        *self.tuning.profile(self.difficulty)
    }

    pub fn score(&self, side: Side) -> u32 {
        self.scores[side.index()]
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn field_center(&self) -> Vec2 {
        Vec2::new(self.tuning.field_width / 2.0, self.tuning.field_height / 2.0)
    }

    /// Pick a difficulty; takes effect at the next serve
    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        if self.difficulty != difficulty {
            log::debug!("Difficulty {} -> {}", self.difficulty, difficulty);
        }
        self.difficulty = difficulty;
    }

    pub fn select_mode(&mut self, mode: ControlMode) {
        if self.mode != mode {
            log::debug!("Control mode {} -> {}", self.mode, mode);
        }
        self.mode = mode;
    }

    /// Serve a fresh ball from the center at the difficulty's initial speed
    pub fn reset_ball(&mut self) {
        let center = self.field_center();
        let speed = self.profile().initial_speed;
        let vertical = self.tuning.serve_vertical;
        self.ball.serve(center, speed, vertical, &mut self.rng);
        self.last_reset_time = self.time;
    }

    /// Reset scores, paddles, ball and power-ups for a fresh match
    pub fn reset_match(&mut self) {
        self.scores = [0, 0];
        self.winner = None;
        self.powerups.clear();
        self.effects.clear();
        self.left = Paddle::new(Side::Left, &self.tuning);
        self.right = Paddle::new(Side::Right, &self.tuning);
        self.ball.base_size = self.tuning.ball_size;
        self.ball.set_size(self.tuning.ball_size);
        self.reset_ball();
    }

    /// Reset and enter `Playing`
    pub fn start_match(&mut self) {
        self.reset_match();
        self.phase = GamePhase::Playing;
        log::info!(
            "Match started: {} / {} (first to {})",
            self.mode,
            self.difficulty,
            self.tuning.winning_score
        );
    }
}
