//! The three games hosted by the engine.
//!
//! Each game owns its private state and implements [`GameRules`]; nothing is
//! shared between them except the [`GameContext`](crate::GameContext) the
//! engine hands to every hook.

pub mod blocks;
pub mod life;
pub mod snake;

pub use blocks::BlockStackRules;
pub use life::LifeRules;
pub use snake::SnakeRules;

use crate::engine::GameRules;
use crate::types::GameKind;

/// Fresh rules object for a game kind
pub fn for_kind(kind: GameKind) -> Box<dyn GameRules> {
    match kind {
        GameKind::Snake => Box::new(SnakeRules::new()),
        GameKind::Blocks => Box::new(BlockStackRules::new()),
        GameKind::Life => Box::new(LifeRules::new()),
    }
}
