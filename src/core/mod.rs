//! Core building blocks: constants, timers, screen flow, buttons.

pub mod button;
pub mod constants;
pub mod screens;
pub mod timers;

pub use constants::*;
