use serde::Serialize;

use crate::types::{GameKind, GameStatus, FIELD_SIZE};

const SIDE: usize = FIELD_SIZE as usize;

/// Read-only view of one engine after a tick.
///
/// `grid` is row-major (`grid[y][x]`) and holds [`Color::bits`] values.
///
/// [`Color::bits`]: crate::types::Color::bits
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub game: GameKind,
    pub status: GameStatus,
    pub score: u32,
    pub info_label: String,
    pub grid: [[u8; SIDE]; SIDE],
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            game: GameKind::Snake,
            status: GameStatus::Preview,
            score: 0,
            info_label: String::new(),
            grid: [[0u8; SIDE]; SIDE],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_serializes_lowercase_enums() {
        let mut snap = GameSnapshot::default();
        snap.game = GameKind::Blocks;
        snap.status = GameStatus::Over;
        snap.info_label.push_str("Score: 3");
        snap.grid[0][1] = 7;

        let value = serde_json::to_value(&snap).unwrap();
        assert_eq!(value["game"], "blocks");
        assert_eq!(value["status"], "over");
        assert_eq!(value["info_label"], "Score: 3");
        assert_eq!(value["grid"][0][1], 7);
        assert_eq!(value["grid"].as_array().unwrap().len(), 20);
    }
}
