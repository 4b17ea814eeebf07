//! Grove Runner headless demo
//!
//! Drives the simulation with a scripted bot (hold right, jump whenever
//! grounded) until the run ends or the frame budget runs out, then prints
//! a JSON run report. Real hosts drive `App::frame` from a display
//! callback and implement `DrawSink`; this binary exercises the same loop
//! without a renderer.

use std::error::Error;
use std::process;

use glam::Vec2;
use serde::Serialize;

use grove_runner::assets::{ArtCatalog, MemoryAssets};
use grove_runner::consts::TICK_MS;
use grove_runner::sim::stage::Stage;
use grove_runner::sim::tick::{InputDirection, TickInput};
use grove_runner::{App, SimConfig};

/// Ten minutes of simulated time.
const MAX_FRAMES: u64 = 60 * 600;

#[derive(Serialize)]
struct RunReport {
    seed: u64,
    frames: u64,
    stage: Stage,
    player_hp: i32,
    game_over: bool,
    banner: String,
    enemies_remaining: usize,
}

fn run() -> Result<(), Box<dyn Error>> {
    let seed = std::env::args()
        .nth(1)
        .map(|arg| arg.parse::<u64>())
        .transpose()?
        .unwrap_or(7);

    let mut assets = MemoryAssets::new();
    let art = ArtCatalog::load(&mut assets)?;
    let config = SimConfig {
        seed,
        player_name: "demo bot".to_owned(),
        ..SimConfig::default()
    };
    let mut app = App::start(config, art)?;

    let mut frames = 0;
    while frames < MAX_FRAMES {
        // Hold right; flick up whenever grounded so ledges and hops work.
        app.input = if app.state.player.landing {
            TickInput {
                direction: InputDirection::Up,
                vector: Vec2::new(1.0, -0.3),
            }
        } else {
            TickInput {
                direction: InputDirection::Right,
                vector: Vec2::new(1.0, 0.3),
            }
        };

        app.frame(frames as f64 * TICK_MS)?;
        frames += 1;

        if app.state.game_over {
            break;
        }
    }

    let report = RunReport {
        seed,
        frames,
        stage: app.state.stage.current,
        player_hp: app.state.player.hp,
        game_over: app.state.game_over,
        banner: app.state.banner.text.clone(),
        enemies_remaining: app.state.enemies.total(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("demo failed: {err}");
        process::exit(1);
    }
}
