//! Runtime configuration from the environment and the command line.

use anyhow::{anyhow, Result};

use crate::types::GameKind;

pub const DEFAULT_SEED: u32 = 1;
pub const DEFAULT_TICKS: u32 = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Seed for every engine's RNG
    pub seed: u32,
    /// Game selected at startup
    pub game: GameKind,
    /// Ticks the headless runner plays
    pub ticks: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            game: GameKind::Snake,
            ticks: DEFAULT_TICKS,
        }
    }
}

impl ConsoleConfig {
    /// Read `GAMEBOY_SEED`, `GAMEBOY_GAME` and `GAMEBOY_TICKS`.
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        use std::env;

        let seed = env::var("GAMEBOY_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_SEED);

        let game = env::var("GAMEBOY_GAME")
            .ok()
            .and_then(|s| GameKind::from_str(s.trim()))
            .unwrap_or(GameKind::Snake);

        let ticks = env::var("GAMEBOY_TICKS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_TICKS);

        Self { seed, game, ticks }
    }

    /// Apply `--game`, `--seed` and `--ticks` on top of `self`.
    ///
    /// `args` excludes the program name.
    pub fn with_args(mut self, args: &[String]) -> Result<Self> {
        let mut i = 0usize;
        while i < args.len() {
            match args[i].as_str() {
                "--game" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("gameboy: missing value for --game"))?;
                    self.game = GameKind::from_str(v)
                        .ok_or_else(|| anyhow!("gameboy: unknown game: {}", v))?;
                }
                "--seed" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("gameboy: missing value for --seed"))?;
                    self.seed = v
                        .parse::<u32>()
                        .map_err(|_| anyhow!("gameboy: invalid --seed value: {}", v))?;
                }
                "--ticks" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("gameboy: missing value for --ticks"))?;
                    self.ticks = v
                        .parse::<u32>()
                        .map_err(|_| anyhow!("gameboy: invalid --ticks value: {}", v))?;
                }
                other => {
                    return Err(anyhow!("gameboy: unknown argument: {}", other));
                }
            }
            i += 1;
        }
        Ok(self)
    }
}
