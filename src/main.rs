//! Headless runner (default binary).
//!
//! Starts the configured game, plays it for a fixed number of ticks without
//! input and prints the final snapshot as JSON. Life has no moves of its own,
//! so a glider is clicked in and the simulation set running first.
//!
//! Configuration comes from `GAMEBOY_SEED`, `GAMEBOY_GAME`, `GAMEBOY_TICKS`,
//! overridden by `--seed`, `--game`, `--ticks`. `RUST_LOG` sets verbosity.

use anyhow::Result;
use log::{debug, info};

use gameboy::console::{Console, ConsoleConfig, Mode};
use gameboy::core::games::life::GLIDER;
use gameboy::types::{Button, GameKind};

/// Where the runner drops its glider
const GLIDER_ANCHOR: (i32, i32) = (2, 2);

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = ConsoleConfig::from_env().with_args(&args)?;
    debug!("config: {:?}", config);

    let mut console = Console::new(&config);
    console.start();

    if console.selected() == GameKind::Life {
        seed_glider(&mut console);
    }

    for tick in 0..config.ticks {
        if console.tick() {
            info!("game over after {} ticks", tick + 1);
        }
        if console.mode() == Mode::End {
            break;
        }
    }

    let snapshot = console.snapshot();
    info!(
        "{} finished in status {} with score {}",
        snapshot.game.as_str(),
        snapshot.status.as_str(),
        snapshot.score
    );
    println!("{}", serde_json::to_string(&snapshot)?);
    Ok(())
}

fn seed_glider(console: &mut Console) {
    let (ax, ay) = GLIDER_ANCHOR;
    for &(x, y) in &GLIDER {
        console.click(ax + x, ay + y);
        console.tick();
    }
    console.press(Button::A);
    console.release(Button::A);
    console.tick();
}
