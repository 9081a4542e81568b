//! Game and input engine for the shield board.
//!
//! Everything here is hardware-agnostic: pins, the OLED and timers are reached
//! through the [`Board`] trait, and interrupt sources talk to the main task
//! through the [`EventFlags`] bus.

#![cfg_attr(not(test), no_std)]

// This must go first so the logging macros are visible to every module.
mod fmt;

pub mod board;
pub mod digits;
pub mod entropy;
pub mod flags;
pub mod games;
pub mod input;
pub mod leds;
pub mod menu;
pub mod prng;
pub mod timing;

#[cfg(test)]
mod testing;

pub use board::{Board, Channel, Led};
pub use flags::{EventFlags, Flag};
pub use games::{run_guess_number, run_sequence_memory, Outcome};
pub use menu::Menu;
pub use prng::Prng;
