//! Gameboy (workspace facade crate).
//!
//! Re-exports the member crates under stable module names so drivers and
//! integration tests depend on one package: `gameboy::{types, core, console}`.

pub use gameboy_console as console;
pub use gameboy_core as core;
pub use gameboy_types as types;
