//! I/O helpers for springs commands.

pub mod config;
pub mod input;
