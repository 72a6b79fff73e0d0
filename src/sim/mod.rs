//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering,
//! audio and platform code:
//! - Clamped timestep only
//! - Seeded RNG only (stored in the state)
//! - State is passed in explicitly, never global

pub mod ai;
pub mod clock;
pub mod collision;
pub mod geom;
pub mod powerup;
pub mod state;
pub mod tick;

pub use ai::{ai_target, ai_target_delta};
pub use clock::{Stepper, clamp_dt, dt_scaled};
pub use collision::{deflection_vy, resolve_paddle_hit, scoring_side, wall_contact};
pub use geom::Rect;
pub use state::{
    Ball, EffectTarget, EffectTimer, GameEvent, GamePhase, GameState, Paddle, PowerUp, PowerUpKind,
    Side, TRAIL_LENGTH,
};
pub use tick::{PaddleIntent, TickInput, tick};
