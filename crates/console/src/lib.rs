//! Headless console: game selection, input latching and configuration.
//!
//! This crate sits between a driver (terminal, window, test harness) and the
//! engines in `gameboy-core`. It never draws anything; drivers read
//! [`Console::snapshot`] after each tick.

pub mod config;
pub mod console;
pub mod controller;

pub use gameboy_types as types;

pub use config::ConsoleConfig;
pub use console::{Console, Mode};
pub use controller::Controller;
