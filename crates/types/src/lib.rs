//! Core types module - shared data structures and constants
//!
//! This module defines the vocabulary shared by the rules engine, the console
//! and any external driver. All types are plain data with no behavior beyond
//! small conversions, making them usable in any context (rules, snapshots,
//! input latching).
//!
//! # Field Dimensions
//!
//! All three games share one square field:
//!
//! - **Size**: 20 x 20 cells (indexed 0-19 on both axes)
//! - **Play column** (block stacking only): columns 0-9
//! - **Preview anchor** (block stacking only): (14, 2)
//!
//! # Coordinates
//!
//! `(x, y)` with `x` growing to the right and `y` growing downwards. `Up`
//! therefore decrements `y`.
//!
//! # Examples
//!
//! ```
//! use gameboy_types::{Button, Buttons, Color, Direction, GameKind, Intent, FIELD_SIZE};
//!
//! // Colors are three RGB bits plus a transparency flag
//! assert_eq!(Color::Yellow.bits(), Color::Red.bits() | Color::Green.bits());
//!
//! // Directions compose into diagonals
//! let diagonal = Direction::UP | Direction::RIGHT;
//! assert_eq!(diagonal.delta(), (1, -1));
//!
//! // One tick of input
//! let intent = Intent::press(Button::Left);
//! assert_eq!(intent.single_button(), Some(Button::Left));
//! assert!(Buttons::empty().is_empty());
//!
//! assert_eq!(GameKind::from_str("life"), Some(GameKind::Life));
//! assert_eq!(FIELD_SIZE, 20);
//! ```

use std::ops::{BitOr, BitOrAssign};

use serde::Serialize;

/// Field width and height in cells (20)
pub const FIELD_SIZE: i32 = 20;

/// Total number of cells on the field
pub const FIELD_CELLS: usize = (FIELD_SIZE * FIELD_SIZE) as usize;

/// Width of the block stacking play column (10)
pub const PLAY_WIDTH: i32 = 10;

/// Where a new falling shape is anchored (origin = min x, min y)
pub const BLOCKS_SPAWN: (i32, i32) = (4, 0);

/// Where the upcoming shape is displayed, right of the divider
pub const BLOCKS_PREVIEW: (i32, i32) = (14, 2);

/// Snake head position at the start of a game
pub const SNAKE_START: (i32, i32) = (10, 10);

/// Snake body length at the start of a game
pub const SNAKE_START_LEN: usize = 3;

/// An 8-valued color: three independent RGB bits plus a transparency flag.
///
/// The same type doubles as a cell state for the life automaton, which only
/// ever uses [`LIFE_ALIVE`] and [`LIFE_DEAD`]. Any other value found on a life
/// field is treated as dead by neighbor counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Black,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
    Transparent,
}

/// Alive cell state in the life automaton
pub const LIFE_ALIVE: Color = Color::Black;

/// Dead cell state in the life automaton
pub const LIFE_DEAD: Color = Color::White;

impl Color {
    /// Colors a falling shape may be painted with (every opaque color except
    /// the `White` background).
    pub const SHAPE_PALETTE: [Color; 7] = [
        Color::Black,
        Color::Blue,
        Color::Green,
        Color::Cyan,
        Color::Red,
        Color::Magenta,
        Color::Yellow,
    ];

    /// Bit encoding: `0bTRGB`
    pub fn bits(self) -> u8 {
        match self {
            Color::Black => 0b0000,
            Color::Blue => 0b0001,
            Color::Green => 0b0010,
            Color::Cyan => 0b0011,
            Color::Red => 0b0100,
            Color::Magenta => 0b0101,
            Color::Yellow => 0b0110,
            Color::White => 0b0111,
            Color::Transparent => 0b1000,
        }
    }

    /// Inverse of [`Color::bits`]
    ///
    /// ```
    /// use gameboy_types::Color;
    ///
    /// assert_eq!(Color::from_bits(0b0101), Some(Color::Magenta));
    /// assert_eq!(Color::from_bits(0b1001), None);
    /// ```
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0b0000 => Some(Color::Black),
            0b0001 => Some(Color::Blue),
            0b0010 => Some(Color::Green),
            0b0011 => Some(Color::Cyan),
            0b0100 => Some(Color::Red),
            0b0101 => Some(Color::Magenta),
            0b0110 => Some(Color::Yellow),
            0b0111 => Some(Color::White),
            0b1000 => Some(Color::Transparent),
            _ => None,
        }
    }
}

/// Motion direction as a 4-bit flag set over {Up, Down, Left, Right}.
///
/// Single flags and the four diagonal pairs move a cell. Every other
/// combination (none, opposite pairs, three or more flags) is motionless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Direction(u8);

impl Direction {
    pub const NONE: Direction = Direction(0b0000);
    pub const LEFT: Direction = Direction(0b0001);
    pub const DOWN: Direction = Direction(0b0010);
    pub const RIGHT: Direction = Direction(0b0100);
    pub const UP: Direction = Direction(0b1000);

    pub fn bits(self) -> u8 {
        self.0
    }

    /// Per-step `(dx, dy)` offset; `(0, 0)` for combinations with no motion.
    ///
    /// ```
    /// use gameboy_types::Direction;
    ///
    /// assert_eq!(Direction::UP.delta(), (0, -1));
    /// assert_eq!((Direction::DOWN | Direction::LEFT).delta(), (-1, 1));
    /// assert_eq!((Direction::UP | Direction::DOWN).delta(), (0, 0));
    /// ```
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::UP => (0, -1),
            Direction::DOWN => (0, 1),
            Direction::LEFT => (-1, 0),
            Direction::RIGHT => (1, 0),
            d if d == Direction::UP | Direction::RIGHT => (1, -1),
            d if d == Direction::DOWN | Direction::RIGHT => (1, 1),
            d if d == Direction::DOWN | Direction::LEFT => (-1, 1),
            d if d == Direction::UP | Direction::LEFT => (-1, -1),
            _ => (0, 0),
        }
    }

    /// Opposite of a cardinal direction; `None` for anything else.
    pub fn opposite(self) -> Option<Direction> {
        match self {
            Direction::UP => Some(Direction::DOWN),
            Direction::DOWN => Some(Direction::UP),
            Direction::LEFT => Some(Direction::RIGHT),
            Direction::RIGHT => Some(Direction::LEFT),
            _ => None,
        }
    }

    pub fn is_cardinal(self) -> bool {
        self.0.count_ones() == 1
    }
}

impl BitOr for Direction {
    type Output = Direction;

    fn bitor(self, rhs: Direction) -> Direction {
        Direction(self.0 | rhs.0)
    }
}

impl BitOrAssign for Direction {
    fn bitor_assign(&mut self, rhs: Direction) {
        self.0 |= rhs.0;
    }
}

/// Logical buttons of the handheld
///
/// Each button owns an independent bit, so the action buttons never alias a
/// combination of directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
}

impl Button {
    pub const ALL: [Button; 6] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::A,
        Button::B,
    ];

    fn bit(self) -> u8 {
        match self {
            Button::Up => 0b00_0001,
            Button::Down => 0b00_0010,
            Button::Left => 0b00_0100,
            Button::Right => 0b00_1000,
            Button::A => 0b01_0000,
            Button::B => 0b10_0000,
        }
    }

    /// Motion direction for a directional button
    pub fn direction(self) -> Option<Direction> {
        match self {
            Button::Up => Some(Direction::UP),
            Button::Down => Some(Direction::DOWN),
            Button::Left => Some(Direction::LEFT),
            Button::Right => Some(Direction::RIGHT),
            Button::A | Button::B => None,
        }
    }
}

/// Set of pressed buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Buttons(u8);

impl Buttons {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, button: Button) {
        self.0 |= button.bit();
    }

    pub fn remove(&mut self, button: Button) {
        self.0 &= !button.bit();
    }

    pub fn contains(&self, button: Button) -> bool {
        self.0 & button.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Keep only the buttons also present in `other`
    pub fn retain(&mut self, other: Buttons) {
        self.0 &= other.0;
    }

    pub fn iter(&self) -> impl Iterator<Item = Button> + '_ {
        Button::ALL.into_iter().filter(|b| self.contains(*b))
    }
}

impl From<Button> for Buttons {
    fn from(button: Button) -> Self {
        Self(button.bit())
    }
}

impl FromIterator<Button> for Buttons {
    fn from_iter<I: IntoIterator<Item = Button>>(iter: I) -> Self {
        let mut out = Buttons::empty();
        for b in iter {
            out.insert(b);
        }
        out
    }
}

/// One tick of normalized input: pressed buttons plus an optional click on a
/// field cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Intent {
    pub buttons: Buttons,
    pub click: Option<(i32, i32)>,
}

impl Intent {
    /// No input this tick
    pub fn none() -> Self {
        Self::default()
    }

    pub fn press(button: Button) -> Self {
        Self {
            buttons: button.into(),
            click: None,
        }
    }

    pub fn click(x: i32, y: i32) -> Self {
        Self {
            buttons: Buttons::empty(),
            click: Some((x, y)),
        }
    }

    /// The pressed button, if exactly one is pressed.
    ///
    /// Rules modules react to at most one button per tick; chords are ignored.
    pub fn single_button(&self) -> Option<Button> {
        if self.buttons.len() != 1 {
            return None;
        }
        self.buttons.iter().next()
    }
}

/// Lifecycle state shared by every game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Preview,
    Play,
    Over,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Preview => "preview",
            GameStatus::Play => "play",
            GameStatus::Over => "over",
        }
    }
}

/// The three games hosted by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    Snake,
    Blocks,
    Life,
}

impl GameKind {
    /// Console order
    pub const ALL: [GameKind; 3] = [GameKind::Snake, GameKind::Blocks, GameKind::Life];

    /// Parse game kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use gameboy_types::GameKind;
    ///
    /// assert_eq!(GameKind::from_str("Snake"), Some(GameKind::Snake));
    /// assert_eq!(GameKind::from_str("tetris"), Some(GameKind::Blocks));
    /// assert_eq!(GameKind::from_str("pong"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "snake" => Some(GameKind::Snake),
            "blocks" | "tetris" => Some(GameKind::Blocks),
            "life" => Some(GameKind::Life),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Snake => "snake",
            GameKind::Blocks => "blocks",
            GameKind::Life => "life",
        }
    }

    /// Title shown in the info label on the preview screen
    pub fn title(&self) -> &'static str {
        match self {
            GameKind::Snake => "Snake",
            GameKind::Blocks => "Blocks",
            GameKind::Life => "Life",
        }
    }
}
