//! Breakout headless runner
//!
//! Plays the game with the autopilot for a fixed number of frames, driving
//! the same tick, audio and draw paths a windowed host would, and prints a
//! JSON summary of the run.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;

use breakout::Settings;
use breakout::audio::{AudioManager, LogAudio, SoundEffect};
use breakout::renderer::{FrameGlobals, SpriteBatch, TextureRegistry, draw_session};
use breakout::sim::{GameEvent, GamePhase, GameSession, TickInput, level, tick};

#[derive(Parser, Debug)]
#[command(about = "Run a seeded Breakout session on autopilot", version)]
struct Args {
    /// Seed for power-up drops and particles
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u64,
    /// Starting level (1-based)
    #[arg(long, default_value_t = 1)]
    level: usize,
    /// Settings JSON file
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Directory of `*.txt` level layouts (defaults to the built-in four)
    #[arg(long)]
    levels_dir: Option<PathBuf>,
    /// Fixed frame time in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
}

#[derive(Debug, Default, Serialize)]
struct RunSummary {
    seed: u64,
    frames: u64,
    level: usize,
    phase: Option<GamePhase>,
    lives: u32,
    bricks_remaining: usize,
    bricks_destroyed: u32,
    solid_hits: u32,
    paddle_hits: u32,
    power_ups_spawned: u32,
    power_ups_collected: u32,
    lives_lost: u32,
    games_over: u32,
    levels_completed: u32,
    sprites_last_frame: usize,
}

impl RunSummary {
    fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::BrickDestroyed { .. } => self.bricks_destroyed += 1,
                GameEvent::SolidBrickHit { .. } => self.solid_hits += 1,
                GameEvent::PaddleHit => self.paddle_hits += 1,
                GameEvent::PowerUpSpawned { .. } => self.power_ups_spawned += 1,
                GameEvent::PowerUpActivated { .. } => self.power_ups_collected += 1,
                GameEvent::LifeLost { .. } => self.lives_lost += 1,
                GameEvent::GameOver => self.games_over += 1,
                GameEvent::LevelCompleted { .. } => self.levels_completed += 1,
                GameEvent::PowerUpExpired { .. } | GameEvent::PhaseChanged { .. } => {}
            }
        }
    }
}

fn build_session(args: &Args) -> Result<GameSession> {
    let settings = match &args.settings {
        Some(path) => Settings::load_from_path(path)?,
        None => Settings::default(),
    };

    let mut session = match &args.levels_dir {
        Some(dir) => {
            let levels = level::load_dir(dir, settings.width, settings.height / 2.0)?;
            GameSession::new(settings, levels, args.seed)?
        }
        None => GameSession::with_standard_levels(settings, args.seed)?,
    };

    if args.level == 0 || args.level > session.levels.len() {
        bail!(
            "level {} out of range (1..={})",
            args.level,
            session.levels.len()
        );
    }
    session.level = args.level - 1;
    Ok(session)
}

fn main() -> Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let args = Args::parse();
    if args.dt.is_nan() || args.dt <= 0.0 {
        bail!("--dt must be positive, got {}", args.dt);
    }

    let mut session = build_session(&args).context("setting up session")?;
    log::info!(
        "Breakout starting: seed={} level={} frames={}",
        session.seed,
        args.level,
        args.frames
    );

    let mut audio = AudioManager::from_settings(LogAudio, &session.settings);
    audio.play(SoundEffect::Music);

    let mut batch = SpriteBatch::new(TextureRegistry::with_game_textures());
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut summary = RunSummary {
        seed: session.seed,
        ..Default::default()
    };
    let mut time = 0.0f32;

    for _ in 0..args.frames {
        let events = tick(&mut session, &input, args.dt);
        audio.play_events(&events);
        summary.record(&events);

        batch.clear();
        draw_session(&session, &mut batch);
        let globals = FrameGlobals::new(
            glam::Vec2::new(session.width, session.height),
            time,
            &session.effects,
        );
        log::trace!(
            "frame: {} sprites, {} bytes, effects {:?}",
            batch.instances().len(),
            batch.as_bytes().len(),
            (globals.shake, globals.confuse, globals.chaos)
        );
        time += args.dt;
    }

    summary.frames = args.frames;
    summary.level = session.level + 1;
    summary.phase = Some(session.phase);
    summary.lives = session.lives;
    summary.bricks_remaining = session.current_level().remaining();
    summary.sprites_last_frame = batch.instances().len();

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
