//! Mole Panic: the whack-a-mole session.
//!
//! A 30-second reaction game on a 3x3 board. Moles pop up and must be hit
//! before they sink back; bombs pop up too and cost points and time when hit.
//! Difficulty ramps in three tiers as the clock runs down.

pub mod logic;
pub mod port;
pub mod result;
pub mod types;

pub use logic::*;
pub use port::*;
pub use result::*;
pub use types::*;
