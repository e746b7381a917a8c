//! Headless runner
//!
//! `gravflip [--realtime] [LEVEL_FILE] [FRAMES]`
//!
//! Plays a scripted input sequence (hold right, jump every second) and prints
//! a CSV trace of the player. Without a level file it starts on the levels
//! listed in `settings.json`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use gravflip::consts::SIM_DT;
use gravflip::game::LevelSource;
use gravflip::platform::{FixedStep, FrameClock};
use gravflip::sim::{Controller, FrameInput, Horizontal};
use gravflip::{Game, Settings, Tuning};

const SETTINGS_PATH: &str = "settings.json";
const TUNING_PATH: &str = "tuning.json";
const DEFAULT_FRAMES: u32 = 600;
const JUMP_EVERY: u32 = 60;

struct Args {
    realtime: bool,
    level: Option<PathBuf>,
    frames: u32,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        realtime: false,
        level: None,
        frames: DEFAULT_FRAMES,
    };
    let mut positional = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--realtime" {
            args.realtime = true;
        } else {
            positional.push(arg);
        }
    }
    let mut positional = positional.into_iter();
    args.level = positional.next().map(PathBuf::from);
    if let Some(frames) = positional.next() {
        args.frames = frames
            .parse()
            .with_context(|| format!("invalid frame count `{frames}`"))?;
    }
    Ok(args)
}

fn load_tuning() -> Result<Tuning> {
    if Path::new(TUNING_PATH).exists() {
        Tuning::load(TUNING_PATH).with_context(|| format!("loading {TUNING_PATH}"))
    } else {
        Ok(Tuning::default())
    }
}

/// Scripted controller for a given simulation step
fn scripted_input(step: u32) -> Controller {
    Controller {
        move_right: true,
        latest_horizontal: Some(Horizontal::Right),
        jump: step > 0 && step % JUMP_EVERY == 0,
        ..Default::default()
    }
}

fn run() -> Result<()> {
    let args = parse_args()?;
    let settings = Settings::load(SETTINGS_PATH);
    let tuning = load_tuning()?;

    let mut game = match &args.level {
        Some(path) => Game::new(
            vec![LevelSource::Path(path.clone())],
            tuning,
            settings.viewport(),
        ),
        None => Game::from_settings(&settings, tuning),
    }
    .context("loading level")?;

    log::info!(
        "Running {} frames{}",
        args.frames,
        if args.realtime { " in real time" } else { "" }
    );

    println!("frame,x,y,vx,vy,blocked_x,blocked_bottom,blocked_top,complete");

    let mut clock = FrameClock::new();
    let mut fixed = FixedStep::new(SIM_DT, settings.max_substeps);
    let mut step = 0;
    while step < args.frames {
        let substeps = if args.realtime {
            fixed.advance(clock.tick())
        } else {
            1
        };

        for _ in 0..substeps {
            if step >= args.frames {
                break;
            }
            let input = FrameInput::new(scripted_input(step), SIM_DT);
            let report = game.step(&input)?;
            let position = game.level().player().position();
            let velocity = game.state().velocity;
            println!(
                "{},{:.3},{:.3},{:.3},{:.3},{},{},{},{}",
                step,
                position.x,
                position.y,
                velocity.x,
                velocity.y,
                report.collisions.blocked_x as u8,
                report.collisions.blocked_bottom as u8,
                report.collisions.blocked_top as u8,
                report.level_complete as u8,
            );
            step += 1;
        }

        if args.realtime {
            clock.pace(settings.target_fps);
        }
    }

    log::info!(
        "Finished on level {} of {}",
        game.level_index(),
        game.level_count()
    );
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<()> {
    env_logger::init();
    log::info!("Gravflip (headless) starting...");
    run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Headless runner is native only
}
