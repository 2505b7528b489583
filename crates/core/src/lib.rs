//! Core rules engine - pure, deterministic, and testable
//!
//! This crate contains the shared lifecycle and the rules of the three games
//! hosted on one 20x20 colored field. It has **zero dependencies** on
//! rendering, input devices, or I/O, making it:
//!
//! - **Deterministic**: randomness comes from an injected, seedable RNG
//! - **Testable**: every rule is reachable through `new_game`/`update`
//! - **Portable**: the only output is a grid of colors and a status string
//!
//! # Module Structure
//!
//! - [`grid`]: 20x20 color store with clear, cell writes and line drawing
//! - [`body`]: cells with a motion direction, and rigid multi-cell bodies
//! - [`engine`]: Preview -> Play -> Over lifecycle dispatching to a [`GameRules`]
//! - [`games`]: Snake, falling-block stacking and Life rules
//! - [`rng`]: seedable LCG used for food, shape and color selection
//! - [`snapshot`]: serializable read-only view for drivers
//!
//! # Example
//!
//! ```
//! use gameboy_core::{games, GameEngine};
//! use gameboy_types::{Button, GameStatus, Intent};
//!
//! let mut engine = GameEngine::new(games::for_kind(gameboy_types::GameKind::Snake), 7);
//! engine.new_game();
//! assert_eq!(engine.status(), GameStatus::Play);
//!
//! engine.update(&Intent::press(Button::Left));
//! assert_eq!(engine.info_label(), "Score: 0");
//! ```

pub mod body;
pub mod engine;
pub mod games;
pub mod grid;
pub mod rng;
pub mod snapshot;

pub use gameboy_types as types;

// Re-export commonly used types for convenience
pub use body::{Body, Cell};
pub use engine::{GameContext, GameEngine, GameRules};
pub use grid::Grid;
pub use rng::SimpleRng;
pub use snapshot::GameSnapshot;
