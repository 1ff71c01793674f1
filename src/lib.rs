//! Mole Panic - Terminal Whack-a-Mole Library
//!
//! This module exposes the game logic for testing and external use.

// Allow dead code in library - some functions are only used by the binary
#![allow(dead_code)]

pub mod app;
pub mod audio;
pub mod core;
pub mod input;
pub mod utils;
pub mod whack;

// UI module is not exposed as it's tightly coupled to the terminal
mod ui;
