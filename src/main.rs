//! Neon Pong headless runner
//!
//! Plays a match without a window: a simple autopilot drives player 1 (and
//! player 2 in two-player mode), the AI handles the rest. Every event is
//! logged along with its sound cue.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use log::{debug, info};

use neon_pong::sim::{
    GameEvent, GamePhase, GameState, PaddleIntent, Side, Stepper, TickInput, tick,
};
use neon_pong::{ControlMode, Difficulty, Settings, SoundEffect, Tuning, init_logging};

/// Run a headless Neon Pong match
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Difficulty tier (easy, medium, hard)
    #[arg(short, long, default_value = "medium")]
    difficulty: Difficulty,

    /// Control mode (single, two)
    #[arg(short, long, default_value = "single")]
    mode: ControlMode,

    /// RNG seed (defaults to OS entropy)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Simulated frame rate
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Stop after this many ticks
    #[arg(long, default_value_t = 60 * 60 * 10)]
    max_ticks: u64,

    /// Pace ticks against the wall clock instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// JSON tuning table overriding the defaults
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Print the effective tuning table as JSON and exit
    #[arg(long)]
    print_tuning: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Track the ball with a small dead zone
fn autopilot(state: &GameState, side: Side) -> PaddleIntent {
    let paddle_y = state.paddle(side).rect.center().y;
    let ball_y = state.ball.center().y;
    if ball_y < paddle_y - 10.0 {
        PaddleIntent::Up
    } else if ball_y > paddle_y + 10.0 {
        PaddleIntent::Down
    } else {
        PaddleIntent::Idle
    }
}

fn log_event(event: &GameEvent) {
    match SoundEffect::for_event(event) {
        Some(cue) => debug!("{:?} [{}]", event, cue.name()),
        None => debug!("{:?}", event),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let tuning = match &args.tuning {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading tuning file {}", path.display()))?;
            Tuning::from_json(&json).with_context(|| format!("loading {}", path.display()))?
        }
        None => Tuning::default(),
    };
    if args.print_tuning {
        println!("{}", tuning.to_json()?);
        return Ok(());
    }

    let settings = Settings {
        difficulty: args.difficulty,
        mode: args.mode,
        seed: args.seed,
    };
    let mut state = GameState::from_settings(&settings, tuning)?;

    info!("Neon Pong (headless) starting...");
    tick(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
        0.0,
    );

    let fixed_dt = 1.0 / args.fps.max(1.0);
    let mut stepper = Stepper::new();
    stepper.advance(Instant::now());

    let mut ticks = 0;
    while ticks < args.max_ticks && state.phase != GamePhase::GameOver {
        let dt = if args.realtime {
            std::thread::sleep(Duration::from_secs_f32(fixed_dt));
            stepper.advance(Instant::now())
        } else {
            fixed_dt
        };

        let input = TickInput {
            left: autopilot(&state, Side::Left),
            right: match state.mode {
                ControlMode::TwoPlayer => autopilot(&state, Side::Right),
                ControlMode::SinglePlayer => PaddleIntent::Idle,
            },
            ..Default::default()
        };
        for event in tick(&mut state, &input, dt) {
            log_event(&event);
        }
        ticks += 1;
    }

    match state.winner {
        Some(side) => info!(
            "{:?} won {} - {} after {} ticks ({:.1}s simulated)",
            side,
            state.score(Side::Left),
            state.score(Side::Right),
            ticks,
            state.time
        ),
        None => info!(
            "Stopped after {} ticks at {} - {}",
            ticks,
            state.score(Side::Left),
            state.score(Side::Right)
        ),
    }
    Ok(())
}
